//! Unified error type for the clock core.
//!
//! Command handling funnels parse and persistence failures into [`Error`]
//! before they are turned into an `ERR:` response. Every variant is
//! recoverable; the loop keeps serving the next command.

use core::fmt;

use crate::app::ports::{ConfigError, StorageError};
use crate::protocol::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The command line did not parse or was out of range.
    Parse(ParseError),
    /// A setting failed validation or could not be persisted.
    Config(ConfigError),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// True when the failure came from the storage medium rather than input.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Config(ConfigError::Storage(_)))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Config(ConfigError::Storage(e))
    }
}
