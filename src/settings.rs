//! PCT2075 runtime settings
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
use fugit::MillisDurationU32;
use serde::{Deserialize, Serialize};

use super::{Configuration, Error, Pct2075, Register, Transport, DEFAULT_ADDRESS, DEFAULT_TIMEOUT};

/// Represents everything needed to bind and configure a sensor.
///
/// # Note
/// The device holds its own configuration and loses it on power cycles. Settings are a convenient
/// way for an application to describe the desired state, they are not stored anywhere by the
/// driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The 7-bit I2C address of the device.
    pub address: u8,

    /// The bus transaction timeout in milliseconds.
    pub timeout_ms: u32,

    pub configuration: Configuration,

    /// The raw idle register value. Left untouched if absent.
    pub idle_rate: Option<u8>,

    /// The raw over-temperature shutdown register value. Left untouched if absent.
    pub shutdown_threshold: Option<u16>,

    /// The raw hysteresis register value. Left untouched if absent.
    pub hysteresis: Option<u16>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            timeout_ms: DEFAULT_TIMEOUT.to_millis(),
            configuration: Configuration::default(),
            idle_rate: None,
            shutdown_threshold: None,
            hysteresis: None,
        }
    }
}

impl Settings {
    /// Construct settings from a JSON document. Missing keys take their default values.
    ///
    /// # Args
    /// * `data` - The serialized settings.
    pub fn from_json(data: &[u8]) -> Result<Self, serde_json_core::de::Error> {
        let (settings, _) = serde_json_core::from_slice(data)?;
        Ok(settings)
    }

    /// The bus transaction timeout.
    pub fn timeout(&self) -> MillisDurationU32 {
        MillisDurationU32::millis(self.timeout_ms)
    }
}

impl<T> Pct2075<T>
where
    T: Transport,
{
    /// Construct a driver from settings.
    ///
    /// # Note
    /// No bus transactions are performed. Use [Pct2075::apply_settings] to configure the device.
    ///
    /// # Args
    /// * `transport` - The bus the sensor is attached to.
    /// * `settings` - The settings containing the address and timeout to use.
    pub fn from_settings(transport: T, settings: &Settings) -> Result<Self, Error<T::Error>> {
        Pct2075::new(transport, settings.address, settings.timeout())
    }

    /// Bring the device registers in line with the settings.
    ///
    /// # Note
    /// The configuration fields are applied first. Any failure aborts the remaining updates.
    ///
    /// # Args
    /// * `settings` - The desired device state.
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<(), Error<T::Error>> {
        self.apply_configuration(&settings.configuration)?;

        if let Some(idle_rate) = settings.idle_rate {
            self.write_u8(Register::Idle, idle_rate)?;
        }

        if let Some(threshold) = settings.shutdown_threshold {
            self.write_u16(Register::OverTemperatureShutdown, threshold)?;
        }

        if let Some(hysteresis) = settings.hysteresis {
            self.write_u16(Register::Hysteresis, hysteresis)?;
        }

        log::info!("Applied settings to sensor at {:#04x}", self.address);

        Ok(())
    }
}
