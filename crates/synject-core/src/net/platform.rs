use crate::error::{IoError, IoOperation, IoResult};
use crate::net::socket::Socket;
use socket2::{Domain, Protocol, SockAddr, Type};
use std::net::SocketAddr;
use synject_packet::fmt_payload;
use tracing::instrument;

/// The byte order to encode the `total_length` field of the IPv4 header.
///
/// Nearly all fields in the IP header should be encoded in network byte
/// order prior to passing to `send()`. However, the required byte order of
/// the length field of the IP header is inconsistent between operating
/// systems: OS X requires the length field in host byte order whilst Linux
/// will accept either.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Ipv4ByteOrder {
    #[cfg(any(target_os = "macos", target_os = "ios"))]
    Host,
    Network,
}

impl Ipv4ByteOrder {
    /// The byte ordering required by the current platform.
    #[must_use]
    pub const fn for_platform() -> Self {
        #[cfg(any(target_os = "macos", target_os = "ios"))]
        {
            Self::Host
        }
        #[cfg(not(any(target_os = "macos", target_os = "ios")))]
        {
            Self::Network
        }
    }

    /// Adjust the IPv4 `total_length` header.
    #[must_use]
    pub const fn adjust_length(self, ipv4_total_length: u16) -> u16 {
        match self {
            #[cfg(any(target_os = "macos", target_os = "ios"))]
            Self::Host => ipv4_total_length.swap_bytes(),
            Self::Network => ipv4_total_length,
        }
    }
}

/// A network socket.
pub struct SocketImpl {
    inner: socket2::Socket,
}

impl Socket for SocketImpl {
    #[instrument(level = "trace")]
    fn new_raw_send_socket_ipv4() -> IoResult<Self> {
        Ok(Self {
            inner: socket2::Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::TCP))
                .map_err(|err| IoError::Other(err, IoOperation::NewSocket))?,
        })
    }

    #[instrument(skip(self), level = "trace")]
    fn set_header_included(&mut self, included: bool) -> IoResult<()> {
        self.inner
            .set_header_included(included)
            .map_err(|err| IoError::Other(err, IoOperation::SetHeaderIncluded))
    }

    #[instrument(skip(self, buf), level = "trace")]
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> IoResult<()> {
        tracing::trace!(buf = %fmt_payload(buf), ?addr);
        self.inner
            .send_to(buf, &SockAddr::from(addr))
            .map_err(|err| IoError::SendTo(err, addr))?;
        Ok(())
    }
}
