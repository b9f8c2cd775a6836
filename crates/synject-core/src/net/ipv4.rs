use crate::error::{Error, Result};
use crate::net::platform::Ipv4ByteOrder;
use crate::net::socket::Socket;
use crate::probe::Probe;
use crate::types::{Identification, Port, Sequence, WindowSize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use synject_packet::checksum::ipv4_header_checksum;
use synject_packet::ipv4::Ipv4Packet;
use synject_packet::tcp::{TcpPacket, FLAG_SYN};
use synject_packet::IpProtocol;
use tracing::instrument;

/// The size of every probe datagram: an IPv4 header followed by a TCP
/// header, no options and no payload.
pub const PROBE_PACKET_SIZE: usize =
    Ipv4Packet::minimum_packet_size() + TcpPacket::minimum_packet_size();

/// IPv4 dispatch configuration.
#[derive(Debug)]
pub struct Ipv4 {
    pub src_addr: Ipv4Addr,
    pub dest_addr: Ipv4Addr,
    pub byte_order: Ipv4ByteOrder,
    pub identification: Identification,
    pub window_size: WindowSize,
}

impl Ipv4 {
    /// Dispatch a TCP `SYN` probe.
    ///
    /// The datagram is handed to the transport with a connectionless
    /// `send_to`; no connection state is established. A transport-level
    /// rejection is surfaced as the recoverable [`Error::ProbeFailed`].
    #[instrument(skip(self, raw_send_socket), level = "trace")]
    pub fn dispatch_syn_probe<S: Socket>(
        &self,
        raw_send_socket: &mut S,
        probe: Probe,
    ) -> Result<()> {
        let mut ipv4_buf = [0_u8; PROBE_PACKET_SIZE];
        let mut tcp_buf = [0_u8; TcpPacket::minimum_packet_size()];
        let tcp =
            self.make_syn_packet(&mut tcp_buf, probe.sequence, probe.src_port, probe.dest_port)?;
        let ipv4 = self.make_ipv4_packet(&mut ipv4_buf, probe.ttl.0, tcp.packet())?;
        let remote_addr = SocketAddr::new(IpAddr::V4(self.dest_addr), probe.dest_port.0);
        raw_send_socket
            .send_to(ipv4.packet(), remote_addr)
            .map_err(Error::ProbeFailed)?;
        Ok(())
    }

    /// Create a TCP `SYN` packet.
    ///
    /// The TCP checksum is left as zero and delegated to the sending stack;
    /// this is a deliberate behavioural choice, not an omission.
    fn make_syn_packet<'a>(
        &self,
        tcp_buf: &'a mut [u8],
        sequence: Sequence,
        src_port: Port,
        dest_port: Port,
    ) -> Result<TcpPacket<'a>> {
        let mut tcp = TcpPacket::new(tcp_buf)?;
        tcp.set_source(src_port.0);
        tcp.set_destination(dest_port.0);
        tcp.set_sequence(sequence.0);
        tcp.set_acknowledgement(0);
        // the first and only segment, no payload follows
        tcp.set_data_offset(0);
        tcp.set_reserved(0);
        tcp.set_flags(FLAG_SYN);
        tcp.set_window_size(self.window_size.0);
        tcp.set_checksum(0);
        tcp.set_urgent_pointer(0);
        Ok(tcp)
    }

    /// Create an `Ipv4Packet` wrapping the given payload.
    ///
    /// The header checksum is computed over the 20 byte header with the
    /// checksum field zeroed, after all other fields have been packed into
    /// network byte order.
    fn make_ipv4_packet<'a>(
        &self,
        ipv4_buf: &'a mut [u8],
        ttl: u8,
        payload: &[u8],
    ) -> Result<Ipv4Packet<'a>> {
        let ipv4_total_length = (Ipv4Packet::minimum_packet_size() + payload.len()) as u16;
        let ipv4_total_length_header = self.byte_order.adjust_length(ipv4_total_length);
        let mut ipv4 = Ipv4Packet::new(&mut ipv4_buf[..ipv4_total_length as usize])?;
        ipv4.set_version(4);
        ipv4.set_header_length(5);
        ipv4.set_tos(0);
        ipv4.set_total_length(ipv4_total_length_header);
        ipv4.set_identification(self.identification.0);
        ipv4.set_flags_and_fragment_offset(0);
        ipv4.set_ttl(ttl);
        ipv4.set_protocol(IpProtocol::Tcp);
        ipv4.set_checksum(0);
        ipv4.set_source(self.src_addr);
        ipv4.set_destination(self.dest_addr);
        ipv4.set_payload(payload);
        let checksum = ipv4_header_checksum(&ipv4.packet()[..Ipv4Packet::minimum_packet_size()]);
        ipv4.set_checksum(checksum);
        Ok(ipv4)
    }
}
