//! Synject - a raw-socket TCP SYN probe injection library.
//!
//! This crate provides the transmit half of a traceroute-style probe
//! sequence: it hand-builds IPv4 and TCP headers for a series of TCP `SYN`
//! packets with a per-probe increasing time-to-live (ttl), computes the IPv4
//! header checksum, and sends each packet over a raw socket with the
//! header-included option set, pacing transmissions so a cooperating
//! listener has time to observe the expired-ttl responses.
//!
//! It does not listen for or parse `ICMP` replies, perform route discovery
//! or validate reachability.
//!
//! # Example
//!
//! The following example builds and runs an injector which sends 29 `SYN`
//! probes with ttl 1..=29 to the target:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use synject_core::Builder;
//!
//! Builder::new("10.0.0.2").build()?.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! The following example overrides the probe count and the probe port:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use synject_core::Builder;
//!
//! Builder::new("10.0.0.2")
//!     .probe_count(3)
//!     .probe_port(34555)
//!     .build()?
//!     .run()?;
//! # Ok(())
//! # }
//! ```
//!
//! # See Also
//!
//! - [`Builder`] - Build an [`Injector`].
//! - [`Injector::run`] - Run the probe sequence on the current thread.
#![warn(clippy::all, clippy::pedantic, clippy::nursery, rust_2018_idioms)]
#![allow(
    clippy::module_name_repetitions,
    clippy::use_self,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc
)]
#![deny(unsafe_code)]

mod builder;
mod config;
mod constants;
mod driver;
mod error;
mod net;
mod probe;
mod types;

pub use builder::Builder;
pub use config::{defaults, InjectorConfig};
pub use constants::MAX_TTL;
pub use driver::Injector;
pub use error::{Error, IoError, IoOperation};
pub use probe::Probe;
pub use types::{Identification, Port, ProbeCount, Sequence, TimeToLive, WindowSize};

use crate::error::Result;

/// An abstraction over a network for probe injection.
#[cfg_attr(test, mockall::automock)]
pub trait Network {
    /// Send a `Probe`.
    fn send_probe(&mut self, probe: Probe) -> Result<()>;
}
