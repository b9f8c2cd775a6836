//! Packet wire format building and parsing for SYN probe injection.
//!
//! The following packets are supported:
//! - `IPv4`
//! - `TCP`
//!
//! # Endianness
//!
//! The internal representation is held in network byte order (big-endian) and
//! all accessor methods take and return data in host byte order, converting as
//! necessary for the given architecture.
//!
//! # Example
//!
//! The following example builds a 20 byte `TCP` header with only the `SYN`
//! flag set:
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! use synject_packet::tcp::{TcpPacket, FLAG_SYN};
//!
//! let mut buf = [0_u8; TcpPacket::minimum_packet_size()];
//! let mut tcp = TcpPacket::new(&mut buf)?;
//! tcp.set_source(1234);
//! tcp.set_destination(34555);
//! tcp.set_sequence(0x1234_5678);
//! tcp.set_flags(FLAG_SYN);
//! tcp.set_window_size(65535);
//! assert_eq!(
//!     tcp.packet(),
//!     &hex_literal::hex!("04 d2 86 fb 12 34 56 78 00 00 00 00 00 02 ff ff 00 00 00 00")
//! );
//! # Ok(())
//! # }
//! ```
#![warn(clippy::all, clippy::pedantic, clippy::nursery, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![forbid(unsafe_code)]

mod buffer;

/// Packet errors.
pub mod error;

/// Functions for calculating network checksums.
pub mod checksum;

/// `IPv4` packets.
pub mod ipv4;

/// `TCP` packets.
pub mod tcp;

/// The IP packet next layer protocol.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum IpProtocol {
    Tcp,
    Other(u8),
}

impl IpProtocol {
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Tcp => 6,
            Self::Other(id) => id,
        }
    }
}

impl From<u8> for IpProtocol {
    fn from(id: u8) -> Self {
        match id {
            6 => Self::Tcp,
            p => Self::Other(p),
        }
    }
}

/// Format a payload as a hexadecimal string.
#[must_use]
pub fn fmt_payload(bytes: &[u8]) -> String {
    use itertools::Itertools as _;
    format!("{:02x}", bytes.iter().format(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_protocol() {
        assert_eq!(6, IpProtocol::Tcp.id());
        assert_eq!(17, IpProtocol::Other(17).id());
        assert_eq!(IpProtocol::Tcp, IpProtocol::from(6));
        assert_eq!(IpProtocol::Other(1), IpProtocol::from(1));
    }

    #[test]
    fn test_fmt_payload() {
        assert_eq!("00 01 ff", fmt_payload(&[0x00, 0x01, 0xff]));
        assert_eq!("", fmt_payload(&[]));
    }
}
