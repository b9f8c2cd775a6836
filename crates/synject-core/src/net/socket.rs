use crate::error::IoResult as Result;
use std::net::SocketAddr;

/// An abstraction over the raw socket used to inject probes.
#[cfg_attr(test, mockall::automock)]
pub trait Socket
where
    Self: Sized,
{
    /// Create a raw IPv4 socket for sending TCP probes.
    fn new_raw_send_socket_ipv4() -> Result<Self>;
    /// Set the `IP_HDRINCL` option so the stack does not prepend its own
    /// IPv4 header.
    fn set_header_included(&mut self, included: bool) -> Result<()>;
    /// Send a datagram to the given address without establishing a
    /// connection.
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> Result<()>;
}
