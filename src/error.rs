//! Error type shared by the interface, command and display layers.

use core::fmt;

/// Errors returned by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The bus reported a failed transaction.
    Communication,
    /// The probe write during `Display::init` failed, so the device was marked failed for the
    /// rest of its lifetime.
    CommunicationFailed,
    /// A frame push was requested before `Display::init` succeeded.
    Uninitialized,
    /// A command argument was outside the range accepted by the chip.
    InvalidArgument,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Communication => write!(f, "I2C communication error"),
            Error::CommunicationFailed => write!(f, "Communication with IS31FL3730 failed"),
            Error::Uninitialized => write!(f, "Display not initialized"),
            Error::InvalidArgument => write!(f, "Command argument out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
