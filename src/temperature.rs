//! PCT2075 temperature encoding
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! The temperature register holds an 11-bit two's-complement value in bits 15..5 with a resolution
//! of 0.125 degrees celsius. Bits 4..0 are always zero. Temperatures are represented here as
//! integer millidegrees to avoid any fractional arithmetic.
use bit_field::BitField;

/// The temperature change represented by one LSB of the register, in millidegrees celsius.
pub const MILLIDEGREES_PER_LSB: i32 = 125;

/// The lowest representable temperature in millidegrees celsius.
pub const MIN_MILLIDEGREES: i32 = -1024 * MILLIDEGREES_PER_LSB;

/// The highest representable temperature in millidegrees celsius.
pub const MAX_MILLIDEGREES: i32 = 1023 * MILLIDEGREES_PER_LSB;

const DATA_BITS: core::ops::Range<usize> = 5..15;
const SIGN_BIT: usize = 15;

/// Convert a raw temperature register value into millidegrees celsius.
///
/// # Args
/// * `raw` - The temperature register contents, unshifted.
pub fn decode(raw: u16) -> i32 {
    if !raw.get_bit(SIGN_BIT) {
        raw.get_bits(DATA_BITS) as i32 * MILLIDEGREES_PER_LSB
    } else {
        // Finish the two's-complement negation of the 11-bit field to get the magnitude.
        let magnitude = (!raw).get_bits(DATA_BITS) as i32 + 1;
        -(magnitude * MILLIDEGREES_PER_LSB)
    }
}

/// Convert millidegrees celsius into the temperature register layout.
///
/// # Note
/// The threshold registers share this layout but the device only evaluates their upper 9 bits, so
/// thresholds are effectively rounded towards negative infinity to 0.5 degrees.
///
/// # Args
/// * `millidegrees` - The temperature to encode.
///
/// # Returns
/// The register value, or `None` if the temperature is out of range or not a multiple of 0.125
/// degrees.
pub fn encode(millidegrees: i32) -> Option<u16> {
    if !(MIN_MILLIDEGREES..=MAX_MILLIDEGREES).contains(&millidegrees)
        || millidegrees % MILLIDEGREES_PER_LSB != 0
    {
        return None;
    }

    let counts = (millidegrees / MILLIDEGREES_PER_LSB) as i16;
    Some((counts as u16) << DATA_BITS.start)
}
