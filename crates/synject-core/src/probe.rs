use crate::types::{Port, Sequence, TimeToLive};

/// Represents a single `SYN` probe.
///
/// A `Probe` captures everything which varies per packet: the ttl and the
/// randomly generated TCP sequence number. All other header fields are fixed
/// for the whole sequence and live in the injector configuration. Each probe
/// is independently constructed and owns no state shared with any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    /// The ttl of the probe.
    pub ttl: TimeToLive,
    /// The random TCP sequence number of the probe.
    pub sequence: Sequence,
    /// The source port.
    pub src_port: Port,
    /// The destination port.
    pub dest_port: Port,
}

impl Probe {
    #[must_use]
    pub const fn new(ttl: TimeToLive, sequence: Sequence, src_port: Port, dest_port: Port) -> Self {
        Self {
            ttl,
            sequence,
            src_port,
            dest_port,
        }
    }
}
