//! Driver for the PCT2075 digital temperature sensor
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! This driver exposes the registers of the PCT2075 over any [Transport]. Every operation is a
//! synchronous round trip to the device. No register contents are cached, so the device is always
//! the source of truth.
//!
//! The temperature register is converted into millidegrees celsius. The threshold and idle
//! registers are passed through as raw register contents.
#![cfg_attr(not(test), no_std)]
#![deny(warnings)]

use fugit::MillisDurationU32;

mod configuration;
mod error;
mod register;
mod settings;
pub mod temperature;
mod transport;

pub use configuration::{ComparatorMode, Configuration, FaultQueue, Field, Mode, Polarity};
pub use error::Error;
pub use register::Register;
pub use settings::Settings;
pub use transport::{I2cTransport, Transport};

/// The 7-bit address of the sensor with all address pins tied to ground.
pub const DEFAULT_ADDRESS: u8 = 0x48;

/// The default bus transaction timeout.
pub const DEFAULT_TIMEOUT: MillisDurationU32 = MillisDurationU32::millis(200);

/// The PCT2075 temperature sensor driver.
///
/// # Note
/// Operations take `&mut self`, so a single driver is never used from two places at once. A driver
/// shared between execution contexts must be protected by a mutex held across each call.
pub struct Pct2075<T>
where
    T: Transport,
{
    transport: T,
    address: u8,
    timeout: MillisDurationU32,
}

impl<T> Pct2075<T>
where
    T: Transport,
{
    /// Construct a new driver for the PCT2075.
    ///
    /// # Note
    /// No bus transactions are performed.
    ///
    /// # Args
    /// * `transport` - The bus the sensor is attached to.
    /// * `address` - The 7-bit address of the device, as selected by the address pins.
    /// * `timeout` - The timeout applied to every bus transaction.
    pub fn new(
        transport: T,
        address: u8,
        timeout: MillisDurationU32,
    ) -> Result<Self, Error<T::Error>> {
        if address > 0x7F {
            return Err(Error::InvalidArgument);
        }

        Ok(Pct2075 {
            transport,
            address,
            timeout,
        })
    }

    /// Construct a driver using the default address and timeout.
    ///
    /// # Args
    /// * `transport` - The bus the sensor is attached to.
    pub fn default(transport: T) -> Self {
        Pct2075 {
            transport,
            address: DEFAULT_ADDRESS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The 7-bit address of the device.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The timeout applied to every bus transaction.
    pub fn timeout(&self) -> MillisDurationU32 {
        self.timeout
    }

    /// Release the driver and give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Get the current temperature.
    ///
    /// # Returns
    /// The temperature in millidegrees celsius, with a resolution of 125 millidegrees.
    pub fn get_temperature(&mut self) -> Result<i32, Error<T::Error>> {
        let raw = self.get_temperature_raw()?;
        Ok(temperature::decode(raw))
    }

    /// Get the unconverted contents of the temperature register.
    ///
    /// # Note
    /// The value is not shifted, the temperature occupies bits 15..5.
    pub fn get_temperature_raw(&mut self) -> Result<u16, Error<T::Error>> {
        self.read_u16(Register::Temperature)
    }

    /// Get the unconverted contents of the over-temperature shutdown register.
    pub fn get_shutdown_threshold_raw(&mut self) -> Result<u16, Error<T::Error>> {
        self.read_u16(Register::OverTemperatureShutdown)
    }

    /// Set the over-temperature shutdown register.
    ///
    /// # Args
    /// * `threshold` - The raw, unshifted register contents. See [temperature::encode].
    pub fn set_shutdown_threshold_raw(&mut self, threshold: u16) -> Result<(), Error<T::Error>> {
        self.write_u16(Register::OverTemperatureShutdown, threshold)
    }

    /// Get the unconverted contents of the hysteresis register.
    pub fn get_hysteresis_raw(&mut self) -> Result<u16, Error<T::Error>> {
        self.read_u16(Register::Hysteresis)
    }

    /// Set the hysteresis register.
    ///
    /// # Args
    /// * `hysteresis` - The raw, unshifted register contents. See [temperature::encode].
    pub fn set_hysteresis_raw(&mut self, hysteresis: u16) -> Result<(), Error<T::Error>> {
        self.write_u16(Register::Hysteresis, hysteresis)
    }

    /// Get the idle register, which sets the time between conversions.
    pub fn get_idle_rate(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_u8(Register::Idle)
    }

    /// Set the idle register.
    ///
    /// # Args
    /// * `rate` - The raw register contents in device units.
    pub fn set_idle_rate(&mut self, rate: u8) -> Result<(), Error<T::Error>> {
        self.write_u8(Register::Idle, rate)
    }
}
