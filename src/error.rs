//! Unified error type.

use std::fmt;

/// The error type returned by usersvc's fallible startup operations.
///
/// Request-level failures (400, 405, 500, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: reading configuration, opening the database pool,
/// binding to a port or accepting a connection.
#[derive(Debug)]
pub enum Error {
    Config(String),
    Io(std::io::Error),
    Storage(sqlx::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(e)       => write!(f, "io: {e}"),
            Self::Storage(e)  => write!(f, "storage: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(_)  => None,
            Self::Io(e)      => Some(e),
            Self::Storage(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Self::Storage(e)
    }
}
