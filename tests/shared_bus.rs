//! Multiple sensors sharing a single I2C bus.
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
use core::cell::RefCell;

use embedded_hal_bus::i2c::RefCellDevice;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use pct2075::{I2cTransport, Mode, Pct2075, Settings, DEFAULT_ADDRESS, DEFAULT_TIMEOUT};

#[test]
fn two_sensors_one_bus() {
    let mut i2c = I2cMock::new(&[
        I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0x00], vec![0x19, 0x00]),
        I2cTransaction::write_read(0x4C, vec![0x00], vec![0xFF, 0xE0]),
        I2cTransaction::write_read(0x4C, vec![0x01], vec![0x00]),
        I2cTransaction::write(0x4C, vec![0x01, 0x01]),
    ]);
    let bus = RefCell::new(i2c.clone());

    let mut inside = Pct2075::default(I2cTransport::new(RefCellDevice::new(&bus)));
    let mut outside =
        Pct2075::new(I2cTransport::new(RefCellDevice::new(&bus)), 0x4C, DEFAULT_TIMEOUT).unwrap();

    assert_eq!(inside.get_temperature(), Ok(25_000));
    assert_eq!(outside.get_temperature(), Ok(-125));
    outside.set_mode(Mode::Shutdown).unwrap();

    i2c.done();
}

#[test]
fn sensors_from_settings() {
    let settings = Settings::from_json(br#"{"address":78,"timeout_ms":20}"#).unwrap();

    let mut i2c = I2cMock::new(&[I2cTransaction::write_read(0x4E, vec![0x04], vec![0x00])]);
    let bus = RefCell::new(i2c.clone());

    let mut sensor =
        Pct2075::from_settings(I2cTransport::new(RefCellDevice::new(&bus)), &settings).unwrap();
    assert_eq!(sensor.timeout().to_millis(), 20);
    assert_eq!(sensor.get_idle_rate(), Ok(0));

    i2c.done();
}
