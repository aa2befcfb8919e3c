//! PCT2075 driver error definitions
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.

/// An enumeration of possible errors with the sensor.
///
/// # Note
/// The driver never retries. A transport failure is handed back exactly as the transport reported
/// it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
pub enum Error<E> {
    /// A malformed request, such as an out-of-range field value or an 8-bit device address.
    InvalidArgument,

    /// The underlying bus transaction failed or timed out.
    Transport(E),
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Error<E> {
        Error::Transport(err)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "invalid argument"),
            Error::Transport(err) => write!(f, "transport error: {:?}", err),
        }
    }
}
