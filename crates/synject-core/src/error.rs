use std::fmt::{Display, Formatter};
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// An injector error result.
pub type Result<T> = std::result::Result<T, Error>;

/// An injector error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid packet: {0}")]
    PacketError(#[from] synject_packet::error::Error),
    #[error("invalid address: {0} is not a dotted-decimal IPv4 address")]
    AddressParse(String),
    #[error("invalid config: {0}")]
    BadConfig(String),
    #[error("IO error: {0}")]
    IoError(#[from] IoError),
    #[error("probe failed to send: {0}")]
    ProbeFailed(IoError),
}

/// Custom IO error result.
pub type IoResult<T> = std::result::Result<T, IoError>;

/// Custom IO error.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Sendto error for {1}: {0}")]
    SendTo(io::Error, SocketAddr),
    #[error("Failed to {1}: {0}")]
    Other(io::Error, IoOperation),
}

/// Io operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IoOperation {
    NewSocket,
    SetHeaderIncluded,
}

impl Display for IoOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewSocket => write!(f, "create new socket"),
            Self::SetHeaderIncluded => write!(f, "set header included"),
        }
    }
}
