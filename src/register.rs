//! PCT2075 register map and register access
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! Every transaction starts with a one-byte register pointer. One-byte registers are followed by
//! a single data byte, two-byte registers by two data bytes in big-endian order.
use super::{Error, Pct2075, Transport};

/// Represents the registers available on the sensor. The value of the enum is the register
/// pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    Temperature = 0x00,
    Configuration = 0x01,
    Hysteresis = 0x02,
    OverTemperatureShutdown = 0x03,
    Idle = 0x04,
}

impl Register {
    /// The size of the register in bytes.
    pub fn width(&self) -> usize {
        match self {
            Register::Configuration | Register::Idle => 1,
            Register::Temperature | Register::Hysteresis | Register::OverTemperatureShutdown => 2,
        }
    }

    /// Check if a register accepts writes.
    pub fn is_writable(&self) -> bool {
        !matches!(self, Register::Temperature)
    }
}

impl<T> Pct2075<T>
where
    T: Transport,
{
    fn check(&self, register: Register, width: usize, write: bool) -> Result<(), Error<T::Error>> {
        if register.width() != width || (write && !register.is_writable()) {
            return Err(Error::InvalidArgument);
        }

        Ok(())
    }

    fn transmit(&mut self, register: Register, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.transport
            .write(self.address, data, self.timeout)
            .map_err(|err| {
                log::warn!("Writing {:?} failed: {:?}", register, err);
                Error::Transport(err)
            })
    }

    fn receive(&mut self, register: Register, data: &mut [u8]) -> Result<(), Error<T::Error>> {
        self.transport
            .write_read(self.address, &[register as u8], data, self.timeout)
            .map_err(|err| {
                log::warn!("Reading {:?} failed: {:?}", register, err);
                Error::Transport(err)
            })
    }

    /// Read a one-byte register.
    ///
    /// # Args
    /// * `register` - The one-byte register to read.
    pub fn read_u8(&mut self, register: Register) -> Result<u8, Error<T::Error>> {
        self.check(register, 1, false)?;

        let mut result: [u8; 1] = [0; 1];
        self.receive(register, &mut result)?;

        log::trace!("{:?} -> {:#04x}", register, result[0]);
        Ok(result[0])
    }

    /// Write a one-byte register.
    ///
    /// # Args
    /// * `register` - The one-byte register to write.
    /// * `value` - The value to place into the register.
    pub fn write_u8(&mut self, register: Register, value: u8) -> Result<(), Error<T::Error>> {
        self.check(register, 1, true)?;

        log::trace!("{:?} <- {:#04x}", register, value);
        self.transmit(register, &[register as u8, value])
    }

    /// Read a two-byte register.
    ///
    /// # Args
    /// * `register` - The two-byte register to read.
    ///
    /// # Returns
    /// The register contents. The first byte on the wire is the most significant byte.
    pub fn read_u16(&mut self, register: Register) -> Result<u16, Error<T::Error>> {
        self.check(register, 2, false)?;

        let mut result: [u8; 2] = [0; 2];
        self.receive(register, &mut result)?;

        let value = u16::from_be_bytes(result);
        log::trace!("{:?} -> {:#06x}", register, value);
        Ok(value)
    }

    /// Write a two-byte register.
    ///
    /// # Args
    /// * `register` - The two-byte register to write.
    /// * `value` - The value to place into the register. It is sent most significant byte first.
    pub fn write_u16(&mut self, register: Register, value: u16) -> Result<(), Error<T::Error>> {
        self.check(register, 2, true)?;

        let [high, low] = value.to_be_bytes();

        log::trace!("{:?} <- {:#06x}", register, value);
        self.transmit(register, &[register as u8, high, low])
    }
}
