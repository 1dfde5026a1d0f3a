//! Panel operation errors

use core::fmt;

use dotmatrix_hal::SurfaceError;

use crate::config::ConfigError;
use crate::font::FontKey;

/// Errors returned by panel operations
///
/// Out-of-range block indices are never an error; writes past the end of
/// the panel are silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Invalid panel configuration
    Config(ConfigError),
    /// No font table entry for the character
    UnknownCharacter(FontKey),
    /// The host surface rejected a draw
    Surface(SurfaceError),
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<SurfaceError> for Error {
    fn from(e: SurfaceError) -> Self {
        Error::Surface(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "invalid configuration: {}", e),
            Error::UnknownCharacter(key) => {
                write!(f, "no font entry for character code 0x{}", key)
            }
            Error::Surface(e) => write!(f, "surface error: {}", e),
        }
    }
}
