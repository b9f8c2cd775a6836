use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A packet error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A packet error.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum Error {
    /// The buffer is too small to hold the packet header.
    #[error("insufficient buffer for {0} header, minimum={1}, provided={2}")]
    InsufficientPacketBuffer(PacketKind, usize, usize),
}

/// The kind of packet which could not be built.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PacketKind {
    Ipv4,
    Tcp,
}

impl Display for PacketKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Tcp => write!(f, "TCP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::InsufficientPacketBuffer(PacketKind::Tcp, 20, 10);
        assert_eq!(
            "insufficient buffer for TCP header, minimum=20, provided=10",
            err.to_string()
        );
        let err = Error::InsufficientPacketBuffer(PacketKind::Ipv4, 20, 0);
        assert_eq!(
            "insufficient buffer for IPv4 header, minimum=20, provided=0",
            err.to_string()
        );
    }
}
