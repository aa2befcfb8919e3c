//! Bus transport used by the PCT2075 driver
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! The driver only ever needs two kinds of bus transactions: a plain write and a write followed by
//! a read with a repeated start. Both are addressed to a 7-bit device address and bounded by a
//! timeout.
use embedded_hal::i2c::I2c;
use fugit::MillisDurationU32;

/// A two-wire bus capable of the transactions the sensor protocol requires.
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Write `bytes` to the device at `address`.
    ///
    /// # Args
    /// * `address` - The 7-bit address of the device.
    /// * `bytes` - The data to write, beginning with the register pointer.
    /// * `timeout` - The longest the transaction may take before failing.
    fn write(
        &mut self,
        address: u8,
        bytes: &[u8],
        timeout: MillisDurationU32,
    ) -> Result<(), Self::Error>;

    /// Write `bytes` to the device at `address` and then read `buffer.len()` bytes back within the
    /// same transaction.
    ///
    /// # Args
    /// * `address` - The 7-bit address of the device.
    /// * `bytes` - The data to write, beginning with the register pointer.
    /// * `buffer` - The location to store the read data into.
    /// * `timeout` - The longest the transaction may take before failing.
    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
        timeout: MillisDurationU32,
    ) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(
        &mut self,
        address: u8,
        bytes: &[u8],
        timeout: MillisDurationU32,
    ) -> Result<(), Self::Error> {
        (**self).write(address, bytes, timeout)
    }

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
        timeout: MillisDurationU32,
    ) -> Result<(), Self::Error> {
        (**self).write_read(address, bytes, buffer, timeout)
    }
}

/// A transport backed by an embedded-hal I2C bus.
///
/// # Note
/// embedded-hal transactions carry no timeout of their own. The timeout configured on the bus
/// peripheral is what bounds each transaction, so the peripheral should be set up with a timeout no
/// longer than the one handed to the driver.
///
/// To place several sensors on one bus, wrap the bus in one of the `embedded-hal-bus` device
/// proxies and hand each sensor its own proxy.
#[derive(Debug)]
pub struct I2cTransport<I2C> {
    i2c: I2C,
}

impl<I2C> I2cTransport<I2C>
where
    I2C: I2c,
{
    /// Construct a transport on top of an I2C bus.
    ///
    /// # Args
    /// * `i2c` - The I2C bus the sensor is attached to.
    pub fn new(i2c: I2C) -> Self {
        I2cTransport { i2c }
    }

    /// Give back the underlying I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Transport for I2cTransport<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write(
        &mut self,
        address: u8,
        bytes: &[u8],
        timeout: MillisDurationU32,
    ) -> Result<(), Self::Error> {
        log::trace!(
            "I2C write to {:#04x} ({} ms): {:02x?}",
            address,
            timeout.to_millis(),
            bytes
        );
        self.i2c.write(address, bytes)
    }

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
        timeout: MillisDurationU32,
    ) -> Result<(), Self::Error> {
        log::trace!(
            "I2C write-read to {:#04x} ({} ms): {:02x?}, {} bytes",
            address,
            timeout.to_millis(),
            bytes,
            buffer.len()
        );
        self.i2c.write_read(address, bytes, buffer)
    }
}
