use crate::config::InjectorConfig;
use crate::error::{Error, Result};
use crate::net::channel::Channel;
use crate::net::platform::SocketImpl;
use crate::probe::Probe;
use crate::types::{Sequence, TimeToLive};
use crate::Network;
use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::{instrument, warn};

/// A `SYN` probe injector.
///
/// Sends a fixed burst of TCP `SYN` probes towards a single target, one per
/// time-to-live value, with an increasing pause between sends.
#[derive(Debug, Clone)]
pub struct Injector {
    config: InjectorConfig,
}

/// The lifecycle of an injection run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    /// The run has not begun.
    Idle,
    /// The probe with the given time-to-live is in flight.
    Probing(TimeToLive),
    /// All probes have been attempted.
    Done,
}

impl Injector {
    /// Create an `Injector` from a configuration.
    ///
    /// Use the [`Builder`](crate::Builder) to construct the configuration.
    pub(crate) const fn new(config: InjectorConfig) -> Self {
        Self { config }
    }

    /// The injector configuration.
    pub const fn config(&self) -> &InjectorConfig {
        &self.config
    }

    /// Run the injection to completion.
    ///
    /// Opens the raw probe channel and attempts every configured probe. A
    /// probe which is rejected by the transport is logged and skipped;
    /// failing to open the channel is fatal.
    #[instrument(skip_all, fields(target = %self.config.target_addr))]
    pub fn run(&self) -> Result<()> {
        let channel = Channel::<SocketImpl>::connect(&self.config)?;
        self.run_with(channel)
    }

    /// Run the injection over an existing network.
    pub(crate) fn run_with<N: Network>(&self, mut network: N) -> Result<()> {
        let mut rng = rand::thread_rng();
        let mut state = State::Idle;
        let mut round = 0;
        while state != State::Done {
            state = match state {
                State::Idle => State::Probing(self.config.first_ttl),
                State::Probing(ttl) => {
                    thread::sleep(delay(self.config.delay_unit, round));
                    let probe = Probe::new(
                        ttl,
                        Sequence(rng.gen()),
                        self.config.source_port,
                        self.config.probe_port,
                    );
                    match network.send_probe(probe) {
                        Ok(()) => {}
                        Err(Error::ProbeFailed(err)) => {
                            warn!("probe with ttl {} failed: {err}", ttl.0);
                        }
                        Err(err) => return Err(err),
                    }
                    round += 1;
                    if round < u32::from(self.config.probe_count.0) {
                        State::Probing(TimeToLive(ttl.0 + 1))
                    } else {
                        State::Done
                    }
                }
                State::Done => State::Done,
            };
        }
        Ok(())
    }
}

/// The pause before the probe for the given zero-based round.
///
/// Probe number `n` (one based) is preceded by a pause of `2n + 1` delay
/// units, so later probes with further-away expiry points are spaced ever
/// wider apart.
fn delay(delay_unit: Duration, round: u32) -> Duration {
    delay_unit * (2 * (round + 1) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoError;
    use crate::types::{Port, ProbeCount};
    use std::io;
    use std::net::Ipv4Addr;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};

    fn make_config(probe_count: u8) -> InjectorConfig {
        InjectorConfig {
            target_addr: Ipv4Addr::from_str("127.0.0.1").unwrap(),
            probe_count: ProbeCount(probe_count),
            delay_unit: Duration::ZERO,
            ..Default::default()
        }
    }

    /// A network which records every probe it is handed.
    struct RecordingNetwork {
        probes: Arc<Mutex<Vec<Probe>>>,
        fail_on: Option<usize>,
    }

    impl Network for RecordingNetwork {
        fn send_probe(&mut self, probe: Probe) -> crate::error::Result<()> {
            let mut probes = self.probes.lock().unwrap();
            probes.push(probe);
            if Some(probes.len()) == self.fail_on {
                return Err(Error::ProbeFailed(IoError::SendTo(
                    io::Error::from(io::ErrorKind::PermissionDenied),
                    std::net::SocketAddr::from(([127, 0, 0, 1], 34555)),
                )));
            }
            Ok(())
        }
    }

    #[test]
    fn test_run_sends_all_probes_with_increasing_ttl() -> anyhow::Result<()> {
        let probes = Arc::new(Mutex::new(Vec::new()));
        let network = RecordingNetwork {
            probes: Arc::clone(&probes),
            fail_on: None,
        };
        let injector = Injector::new(make_config(3));
        injector.run_with(network)?;
        let probes = probes.lock().unwrap();
        assert_eq!(3, probes.len());
        assert_eq!(
            vec![TimeToLive(1), TimeToLive(2), TimeToLive(3)],
            probes.iter().map(|p| p.ttl).collect::<Vec<_>>()
        );
        for probe in probes.iter() {
            assert_eq!(Port(1234), probe.src_port);
            assert_eq!(Port(34555), probe.dest_port);
        }
        let mut sequences = probes.iter().map(|p| p.sequence).collect::<Vec<_>>();
        sequences.sort_unstable();
        sequences.dedup();
        assert_eq!(3, sequences.len());
        Ok(())
    }

    // A rejected probe is skipped and the remaining probes are attempted.
    #[test]
    fn test_run_continues_after_probe_failure() -> anyhow::Result<()> {
        let probes = Arc::new(Mutex::new(Vec::new()));
        let network = RecordingNetwork {
            probes: Arc::clone(&probes),
            fail_on: Some(2),
        };
        let injector = Injector::new(make_config(3));
        injector.run_with(network)?;
        assert_eq!(3, probes.lock().unwrap().len());
        Ok(())
    }

    #[test]
    fn test_run_respects_first_ttl() -> anyhow::Result<()> {
        let probes = Arc::new(Mutex::new(Vec::new()));
        let network = RecordingNetwork {
            probes: Arc::clone(&probes),
            fail_on: None,
        };
        let config = InjectorConfig {
            first_ttl: TimeToLive(5),
            ..make_config(2)
        };
        let injector = Injector::new(config);
        injector.run_with(network)?;
        let probes = probes.lock().unwrap();
        assert_eq!(
            vec![TimeToLive(5), TimeToLive(6)],
            probes.iter().map(|p| p.ttl).collect::<Vec<_>>()
        );
        Ok(())
    }

    #[test]
    fn test_delay_is_strictly_increasing() {
        let unit = Duration::from_millis(10);
        assert_eq!(Duration::from_millis(30), delay(unit, 0));
        assert_eq!(Duration::from_millis(50), delay(unit, 1));
        assert_eq!(Duration::from_millis(70), delay(unit, 2));
        for round in 0..28 {
            assert!(delay(unit, round) < delay(unit, round + 1));
        }
        // the 29th and final probe of a default run waits 59 units
        assert_eq!(Duration::from_millis(590), delay(unit, 28));
    }
}
