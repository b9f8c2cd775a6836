use crate::config::InjectorConfig;
use crate::error::Result;
use crate::net::ipv4::Ipv4;
use crate::net::platform::Ipv4ByteOrder;
use crate::net::socket::Socket;
use crate::probe::Probe;
use crate::Network;
use tracing::{instrument, warn};

/// A channel for sending raw IPv4 probe datagrams.
///
/// The channel owns the raw socket for its whole lifetime; the socket is
/// released when the channel is dropped.
pub struct Channel<S: Socket> {
    raw_send_socket: S,
    ipv4: Ipv4,
}

impl<S: Socket> Channel<S> {
    /// Create a probe channel for the given configuration.
    ///
    /// Opening the raw socket requires elevated privileges and is fatal on
    /// failure. Enabling `IP_HDRINCL` is not: some stacks imply it for raw
    /// sockets, so a refusal is logged and the channel proceeds with the
    /// headers it builds.
    #[instrument(skip_all)]
    pub fn connect(config: &InjectorConfig) -> Result<Self> {
        let mut raw_send_socket = S::new_raw_send_socket_ipv4()?;
        if let Err(err) = raw_send_socket.set_header_included(true) {
            warn!("failed to set IP_HDRINCL, continuing: {err}");
        }
        let ipv4 = Ipv4 {
            src_addr: config.source_addr,
            dest_addr: config.target_addr,
            byte_order: Ipv4ByteOrder::for_platform(),
            identification: config.identification,
            window_size: config.window_size,
        };
        Ok(Self {
            raw_send_socket,
            ipv4,
        })
    }
}

impl<S: Socket> std::fmt::Debug for Channel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("ipv4", &self.ipv4)
            .finish_non_exhaustive()
    }
}

impl<S: Socket> Network for Channel<S> {
    fn send_probe(&mut self, probe: Probe) -> Result<()> {
        self.ipv4.dispatch_syn_probe(&mut self.raw_send_socket, probe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, IoError, IoOperation};
    use crate::net::socket::MockSocket;
    use crate::types::{Port, Sequence, TimeToLive};
    use crate::Builder;
    use std::io;
    use std::net::Ipv4Addr;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex, MutexGuard};
    use std::time::Duration;
    use synject_packet::ipv4::Ipv4Packet;
    use synject_packet::tcp::TcpPacket;

    // The mocked socket constructor is a static method and so tests which
    // set expectations on it must not run concurrently.
    static MTX: Mutex<()> = Mutex::new(());

    fn lock() -> MutexGuard<'static, ()> {
        MTX.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn make_config() -> InjectorConfig {
        InjectorConfig {
            target_addr: Ipv4Addr::from_str("10.0.0.2").unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_connect_and_send() -> anyhow::Result<()> {
        let _guard = lock();
        let ctx = MockSocket::new_raw_send_socket_ipv4_context();
        ctx.expect().returning(|| {
            let mut mocket = MockSocket::new();
            mocket
                .expect_set_header_included()
                .times(1)
                .returning(|_| Ok(()));
            mocket.expect_send_to().times(1).returning(|_, _| Ok(()));
            Ok(mocket)
        });
        let mut channel = Channel::<MockSocket>::connect(&make_config())?;
        let probe = Probe::new(TimeToLive(1), Sequence(0), Port(1234), Port(34555));
        channel.send_probe(probe)?;
        Ok(())
    }

    // A refused IP_HDRINCL is a warning, not a failure.
    #[test]
    fn test_connect_header_included_refused() -> anyhow::Result<()> {
        let _guard = lock();
        let ctx = MockSocket::new_raw_send_socket_ipv4_context();
        ctx.expect().returning(|| {
            let mut mocket = MockSocket::new();
            mocket.expect_set_header_included().times(1).returning(|_| {
                Err(IoError::Other(
                    io::Error::from(io::ErrorKind::InvalidInput),
                    IoOperation::SetHeaderIncluded,
                ))
            });
            Ok(mocket)
        });
        let channel = Channel::<MockSocket>::connect(&make_config());
        assert!(channel.is_ok());
        Ok(())
    }

    // Run a full three probe sequence over a mocked socket: three sends of
    // exactly 40 bytes, strictly increasing ttl, distinct sequence numbers.
    #[test]
    fn test_run_end_to_end() -> anyhow::Result<()> {
        let _guard = lock();
        let sent = Arc::new(Mutex::new(Vec::<Vec<u8>>::new()));
        let recorded = Arc::clone(&sent);
        let ctx = MockSocket::new_raw_send_socket_ipv4_context();
        ctx.expect().return_once(move || {
            let mut mocket = MockSocket::new();
            mocket
                .expect_set_header_included()
                .times(1)
                .returning(|_| Ok(()));
            mocket.expect_send_to().times(3).returning(move |buf, _| {
                recorded.lock().unwrap().push(buf.to_vec());
                Ok(())
            });
            Ok(mocket)
        });
        let injector = Builder::new("127.0.0.1")
            .probe_count(3)
            .delay_unit(Duration::ZERO)
            .build()?;
        let channel = Channel::<MockSocket>::connect(injector.config())?;
        injector.run_with(channel)?;

        let sent = sent.lock().unwrap();
        assert_eq!(3, sent.len());
        let mut sequences = Vec::new();
        for (i, packet) in sent.iter().enumerate() {
            assert_eq!(40, packet.len());
            let ipv4 = Ipv4Packet::new_view(packet)?;
            assert_eq!(i as u8 + 1, ipv4.get_ttl());
            let tcp = TcpPacket::new_view(ipv4.payload())?;
            sequences.push(tcp.get_sequence());
        }
        sequences.sort_unstable();
        sequences.dedup();
        assert_eq!(3, sequences.len());
        Ok(())
    }

    // Failing to open the raw socket is fatal.
    #[test]
    fn test_connect_socket_open_failure() {
        let _guard = lock();
        let ctx = MockSocket::new_raw_send_socket_ipv4_context();
        ctx.expect().returning(|| {
            Err(IoError::Other(
                io::Error::from(io::ErrorKind::PermissionDenied),
                IoOperation::NewSocket,
            ))
        });
        let err = Channel::<MockSocket>::connect(&make_config()).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
