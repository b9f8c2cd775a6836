use crate::types::{Identification, Port, ProbeCount, TimeToLive, WindowSize};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Default values for configuration.
pub mod defaults {
    use std::net::Ipv4Addr;
    use std::time::Duration;

    /// The default value for `probe-count`.
    pub const DEFAULT_PROBE_COUNT: u8 = 29;

    /// The default value for `first-ttl`.
    pub const DEFAULT_FIRST_TTL: u8 = 1;

    /// The default value for `source-addr`.
    ///
    /// `SYN` probes are fire-and-forget and so the source address may be
    /// freely spoofed.
    pub const DEFAULT_SOURCE_ADDR: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 109);

    /// The default value for `source-port`.
    pub const DEFAULT_SOURCE_PORT: u16 = 1234;

    /// The default value for `probe-port`.
    pub const DEFAULT_PROBE_PORT: u16 = 34555;

    /// The default value for the IPv4 `identification` field.
    pub const DEFAULT_IDENTIFICATION: u16 = 54321;

    /// The default value for the TCP `window_size` field.
    pub const DEFAULT_WINDOW_SIZE: u16 = 65535;

    /// The default base unit for the inter-probe pacing delay.
    ///
    /// Probe `i` is delayed by `(2i + 1)` of these units before being sent,
    /// giving the cooperating listener time to observe the expired-ttl
    /// response for earlier, deeper probes.
    pub const DEFAULT_DELAY_UNIT: Duration = Duration::from_millis(10);
}

/// Probe injector configuration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InjectorConfig {
    /// The destination address for all probes.
    pub target_addr: Ipv4Addr,
    /// The fixed (spoofable) source address carried in every IPv4 header.
    pub source_addr: Ipv4Addr,
    /// The fixed TCP source port.
    pub source_port: Port,
    /// The fixed TCP destination probe port.
    pub probe_port: Port,
    /// The number of probes in the sequence.
    pub probe_count: ProbeCount,
    /// The ttl of the first probe.
    pub first_ttl: TimeToLive,
    /// The constant IPv4 `identification` field value.
    pub identification: Identification,
    /// The TCP `window_size` field value.
    pub window_size: WindowSize,
    /// The base unit for the inter-probe pacing delay.
    pub delay_unit: Duration,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            target_addr: Ipv4Addr::UNSPECIFIED,
            source_addr: defaults::DEFAULT_SOURCE_ADDR,
            source_port: Port(defaults::DEFAULT_SOURCE_PORT),
            probe_port: Port(defaults::DEFAULT_PROBE_PORT),
            probe_count: ProbeCount(defaults::DEFAULT_PROBE_COUNT),
            first_ttl: TimeToLive(defaults::DEFAULT_FIRST_TTL),
            identification: Identification(defaults::DEFAULT_IDENTIFICATION),
            window_size: WindowSize(defaults::DEFAULT_WINDOW_SIZE),
            delay_unit: defaults::DEFAULT_DELAY_UNIT,
        }
    }
}
