//! PCT2075 configuration register fields
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! The configuration register holds four independent bit-fields. Each field is updated with a
//! read-modify-write of the register that leaves every bit outside the field untouched.
//!
//! # Note
//! The read-modify-write is not atomic with respect to other users of the sensor. Callers sharing
//! one sensor between contexts must serialize access themselves.
use bit_field::BitField;
use core::ops::Range;
use serde::{Deserialize, Serialize};

use super::{Error, Pct2075, Register, Transport};

/// A bit-field inside of the configuration register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    /// Normal or shutdown operation.
    Mode,
    /// Comparator or interrupt behavior of the OS output.
    OsCompInt,
    /// Active level of the OS output.
    OsPol,
    /// Number of consecutive faults required to trip the OS output.
    OsFaultQueue,
}

impl Field {
    /// All of the configuration fields.
    pub const ALL: [Field; 4] = [Field::Mode, Field::OsCompInt, Field::OsPol, Field::OsFaultQueue];

    /// The position of the least significant bit of the field.
    pub fn offset(&self) -> usize {
        match self {
            Field::Mode => 0,
            Field::OsCompInt => 1,
            Field::OsPol => 2,
            Field::OsFaultQueue => 3,
        }
    }

    /// The number of bits the field occupies.
    pub fn width(&self) -> usize {
        match self {
            Field::OsFaultQueue => 2,
            _ => 1,
        }
    }

    fn bits(&self) -> Range<usize> {
        self.offset()..self.offset() + self.width()
    }

    /// The mask of an unshifted field value, which is also the largest valid raw value.
    pub fn value_mask(&self) -> u8 {
        (1u8 << self.width()) - 1
    }

    /// The bits the field covers inside of the register.
    pub fn mask(&self) -> u8 {
        self.value_mask() << self.offset()
    }

    /// Replace the field bits of a register value.
    ///
    /// # Args
    /// * `current` - The register value to modify.
    /// * `raw` - The new field value. Bits beyond the field width are discarded.
    ///
    /// # Returns
    /// `current` with only the bits of this field changed.
    pub fn insert(&self, current: u8, raw: u8) -> u8 {
        let mut register = current;
        register.set_bits(self.bits(), raw & self.value_mask());
        register
    }

    /// Get the raw value of the field from a register value.
    pub fn extract(&self, register: u8) -> u8 {
        register.get_bits(self.bits())
    }
}

/// The operational mode of the sensor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Normal = 0,
    /// Conversions are stopped, the registers stay accessible.
    Shutdown = 1,
}

/// Behavior of the OS output when the over-temperature threshold is crossed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparatorMode {
    #[default]
    Comparator = 0,
    Interrupt = 1,
}

/// The active level of the OS output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    #[default]
    ActiveLow = 0,
    ActiveHigh = 1,
}

/// The number of consecutive faults that must occur before the OS output trips.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultQueue {
    #[default]
    One = 0b00,
    Two = 0b01,
    Four = 0b10,
    Six = 0b11,
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for Mode {
    type Error = ();

    fn try_from(value: u8) -> Result<Mode, ()> {
        match value {
            0 => Ok(Mode::Normal),
            1 => Ok(Mode::Shutdown),
            _ => Err(()),
        }
    }
}

impl From<ComparatorMode> for u8 {
    fn from(mode: ComparatorMode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for ComparatorMode {
    type Error = ();

    fn try_from(value: u8) -> Result<ComparatorMode, ()> {
        match value {
            0 => Ok(ComparatorMode::Comparator),
            1 => Ok(ComparatorMode::Interrupt),
            _ => Err(()),
        }
    }
}

impl From<Polarity> for u8 {
    fn from(polarity: Polarity) -> u8 {
        polarity as u8
    }
}

impl TryFrom<u8> for Polarity {
    type Error = ();

    fn try_from(value: u8) -> Result<Polarity, ()> {
        match value {
            0 => Ok(Polarity::ActiveLow),
            1 => Ok(Polarity::ActiveHigh),
            _ => Err(()),
        }
    }
}

impl From<FaultQueue> for u8 {
    fn from(queue: FaultQueue) -> u8 {
        queue as u8
    }
}

impl TryFrom<u8> for FaultQueue {
    type Error = ();

    fn try_from(value: u8) -> Result<FaultQueue, ()> {
        match value {
            0b00 => Ok(FaultQueue::One),
            0b01 => Ok(FaultQueue::Two),
            0b10 => Ok(FaultQueue::Four),
            0b11 => Ok(FaultQueue::Six),
            _ => Err(()),
        }
    }
}

/// A typed view of every field in the configuration register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub mode: Mode,
    pub comparator: ComparatorMode,
    pub polarity: Polarity,
    pub fault_queue: FaultQueue,
}

impl Configuration {
    /// Decode the configuration register.
    pub fn from_register(register: u8) -> Self {
        // Single-bit fields can only ever hold a valid encoding, and the fault queue covers all
        // four values of its two bits.
        let mode = match Field::Mode.extract(register) {
            0 => Mode::Normal,
            _ => Mode::Shutdown,
        };
        let comparator = match Field::OsCompInt.extract(register) {
            0 => ComparatorMode::Comparator,
            _ => ComparatorMode::Interrupt,
        };
        let polarity = match Field::OsPol.extract(register) {
            0 => Polarity::ActiveLow,
            _ => Polarity::ActiveHigh,
        };
        let fault_queue = match Field::OsFaultQueue.extract(register) {
            0b00 => FaultQueue::One,
            0b01 => FaultQueue::Two,
            0b10 => FaultQueue::Four,
            _ => FaultQueue::Six,
        };

        Configuration {
            mode,
            comparator,
            polarity,
            fault_queue,
        }
    }

    /// Write every field into a register value, keeping the reserved bits of `current`.
    pub fn merge_into(&self, current: u8) -> u8 {
        let register = Field::Mode.insert(current, self.mode.into());
        let register = Field::OsCompInt.insert(register, self.comparator.into());
        let register = Field::OsPol.insert(register, self.polarity.into());
        Field::OsFaultQueue.insert(register, self.fault_queue.into())
    }
}

impl<T> Pct2075<T>
where
    T: Transport,
{
    /// Update a single field of the configuration register.
    ///
    /// # Note
    /// This reads the register, replaces the field bits and writes the register back. If the write
    /// fails, the device keeps the configuration it had before the call.
    ///
    /// # Args
    /// * `field` - The field to update.
    /// * `raw` - The raw field value. Must fit within the field.
    pub fn set_field(&mut self, field: Field, raw: u8) -> Result<(), Error<T::Error>> {
        if raw > field.value_mask() {
            return Err(Error::InvalidArgument);
        }

        let current = self.read_u8(Register::Configuration)?;
        let updated = field.insert(current, raw);

        log::debug!(
            "Configuring {:?} = {} ({:#04x} -> {:#04x})",
            field,
            raw,
            current,
            updated
        );

        self.write_u8(Register::Configuration, updated)
    }

    /// Get the raw contents of the configuration register.
    pub fn get_configuration(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_u8(Register::Configuration)
    }

    /// Overwrite the configuration register.
    ///
    /// # Args
    /// * `configuration` - The raw register value to write.
    pub fn set_configuration(&mut self, configuration: u8) -> Result<(), Error<T::Error>> {
        self.write_u8(Register::Configuration, configuration)
    }

    /// Get the decoded configuration register.
    pub fn configuration(&mut self) -> Result<Configuration, Error<T::Error>> {
        self.get_configuration().map(Configuration::from_register)
    }

    /// Update all configuration fields with a single read-modify-write.
    ///
    /// # Args
    /// * `configuration` - The desired field values.
    pub fn apply_configuration(
        &mut self,
        configuration: &Configuration,
    ) -> Result<(), Error<T::Error>> {
        let current = self.read_u8(Register::Configuration)?;
        self.write_u8(Register::Configuration, configuration.merge_into(current))
    }

    /// Select normal or shutdown operation.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error<T::Error>> {
        self.set_field(Field::Mode, mode.into())
    }

    /// Stop temperature conversions.
    pub fn shutdown(&mut self) -> Result<(), Error<T::Error>> {
        self.set_mode(Mode::Shutdown)
    }

    /// Resume temperature conversions.
    pub fn wakeup(&mut self) -> Result<(), Error<T::Error>> {
        self.set_mode(Mode::Normal)
    }

    /// Select comparator or interrupt behavior for the OS output.
    pub fn set_comparator_mode(&mut self, mode: ComparatorMode) -> Result<(), Error<T::Error>> {
        self.set_field(Field::OsCompInt, mode.into())
    }

    /// Select the active level of the OS output.
    pub fn set_polarity(&mut self, polarity: Polarity) -> Result<(), Error<T::Error>> {
        self.set_field(Field::OsPol, polarity.into())
    }

    /// Configure how many consecutive faults trip the OS output.
    pub fn set_fault_queue(&mut self, queue: FaultQueue) -> Result<(), Error<T::Error>> {
        self.set_field(Field::OsFaultQueue, queue.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{I2cTransport, DEFAULT_ADDRESS};
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    fn read_configuration(value: u8) -> I2cTransaction {
        I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0x01], vec![value])
    }

    fn write_configuration(value: u8) -> I2cTransaction {
        I2cTransaction::write(DEFAULT_ADDRESS, vec![0x01, value])
    }

    #[test]
    fn field_masks() {
        assert_eq!(Field::Mode.mask(), 0b0000_0001);
        assert_eq!(Field::OsCompInt.mask(), 0b0000_0010);
        assert_eq!(Field::OsPol.mask(), 0b0000_0100);
        assert_eq!(Field::OsFaultQueue.mask(), 0b0001_1000);
        assert_eq!(Field::OsFaultQueue.value_mask(), 0b11);
    }

    #[test]
    fn insert_preserves_other_bits() {
        for field in Field::ALL {
            for current in 0..=u8::MAX {
                for raw in 0..=field.value_mask() {
                    let updated = field.insert(current, raw);
                    assert_eq!(updated & !field.mask(), current & !field.mask());
                    assert_eq!(updated & field.mask(), raw << field.offset());
                    assert_eq!(field.extract(updated), raw);
                }
            }
        }
    }

    #[test]
    fn insert_shutdown_mode() {
        assert_eq!(Field::Mode.insert(0b0001_0100, Mode::Shutdown.into()), 0b0001_0101);
    }

    #[test]
    fn insert_fault_queue() {
        assert_eq!(Field::OsFaultQueue.insert(0b0000_0001, 3), 0b0001_1001);
    }

    #[test]
    fn out_of_range_values() {
        assert_eq!(Mode::try_from(2), Err(()));
        assert_eq!(Polarity::try_from(1), Ok(Polarity::ActiveHigh));
        assert_eq!(FaultQueue::try_from(4), Err(()));
        assert_eq!(FaultQueue::try_from(2), Ok(FaultQueue::Four));
    }

    #[test]
    fn configuration_decode() {
        let configuration = Configuration::from_register(0b1111_0110);
        assert_eq!(
            configuration,
            Configuration {
                mode: Mode::Normal,
                comparator: ComparatorMode::Interrupt,
                polarity: Polarity::ActiveHigh,
                fault_queue: FaultQueue::Four,
            }
        );

        // Reserved bits survive.
        assert_eq!(configuration.merge_into(0b1110_0001), 0b1111_0110);
    }

    #[test]
    fn set_mode_shutdown() {
        let mut i2c = I2cMock::new(&[
            read_configuration(0b0001_0100),
            write_configuration(0b0001_0101),
        ]);
        let mut sensor = Pct2075::default(I2cTransport::new(i2c.clone()));

        assert_eq!(sensor.shutdown(), Ok(()));
        i2c.done();
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut i2c = I2cMock::new(&[
            read_configuration(0b0000_1000),
            write_configuration(0b0000_1001),
            read_configuration(0b0000_1001),
            write_configuration(0b0000_1001),
        ]);
        let mut sensor = Pct2075::default(I2cTransport::new(i2c.clone()));

        sensor.shutdown().unwrap();
        sensor.shutdown().unwrap();
        i2c.done();
    }

    #[test]
    fn wakeup_clears_mode() {
        let mut i2c = I2cMock::new(&[
            read_configuration(0b0001_1111),
            write_configuration(0b0001_1110),
        ]);
        let mut sensor = Pct2075::default(I2cTransport::new(i2c.clone()));

        sensor.wakeup().unwrap();
        i2c.done();
    }

    #[test]
    fn field_setters() {
        let mut i2c = I2cMock::new(&[
            read_configuration(0b0000_0001),
            write_configuration(0b0001_1001),
            read_configuration(0b0001_1001),
            write_configuration(0b0001_1011),
            read_configuration(0b0001_1011),
            write_configuration(0b0001_1111),
        ]);
        let mut sensor = Pct2075::default(I2cTransport::new(i2c.clone()));

        sensor.set_fault_queue(FaultQueue::Six).unwrap();
        sensor.set_comparator_mode(ComparatorMode::Interrupt).unwrap();
        sensor.set_polarity(Polarity::ActiveHigh).unwrap();
        i2c.done();
    }

    #[test]
    fn out_of_range_field_value_is_rejected() {
        let mut i2c = I2cMock::new(&[]);
        let mut sensor = Pct2075::default(I2cTransport::new(i2c.clone()));

        assert_eq!(sensor.set_field(Field::Mode, 2), Err(Error::InvalidArgument));
        assert_eq!(
            sensor.set_field(Field::OsFaultQueue, 4),
            Err(Error::InvalidArgument)
        );
        i2c.done();
    }

    #[test]
    fn failed_read_skips_write() {
        let mut i2c = I2cMock::new(&[read_configuration(0).with_error(ErrorKind::Other)]);
        let mut sensor = Pct2075::default(I2cTransport::new(i2c.clone()));

        assert_eq!(sensor.shutdown(), Err(Error::Transport(ErrorKind::Other)));
        i2c.done();
    }

    #[test]
    fn failed_write_is_reported() {
        let mut i2c = I2cMock::new(&[
            read_configuration(0),
            write_configuration(0b0000_0100).with_error(ErrorKind::Other),
        ]);
        let mut sensor = Pct2075::default(I2cTransport::new(i2c.clone()));

        assert_eq!(
            sensor.set_polarity(Polarity::ActiveHigh),
            Err(Error::Transport(ErrorKind::Other))
        );
        i2c.done();
    }

    #[test]
    fn typed_configuration_roundtrip() {
        let desired = Configuration {
            mode: Mode::Shutdown,
            comparator: ComparatorMode::Comparator,
            polarity: Polarity::ActiveLow,
            fault_queue: FaultQueue::Four,
        };
        let mut i2c = I2cMock::new(&[
            read_configuration(0b1000_0110),
            write_configuration(0b1001_0001),
            read_configuration(0b1001_0001),
        ]);
        let mut sensor = Pct2075::default(I2cTransport::new(i2c.clone()));

        sensor.apply_configuration(&desired).unwrap();
        assert_eq!(sensor.configuration(), Ok(desired));
        i2c.done();
    }
}
