use crate::config::InjectorConfig;
use crate::constants::MAX_TTL;
use crate::driver::Injector;
use crate::error::{Error, Result};
use crate::types::{Identification, Port, ProbeCount, TimeToLive, WindowSize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::time::Duration;

/// Build an [`Injector`].
///
/// Only the target address is mandatory; all other values have sensible
/// defaults.
///
/// # Examples
///
/// Build an injector for the target `10.0.0.2` with all defaults:
///
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// use synject_core::Builder;
///
/// let injector = Builder::new("10.0.0.2").build()?;
/// injector.run()?;
/// # Ok(())
/// # }
/// ```
///
/// Build an injector which sends 5 probes starting from ttl 3:
///
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// use synject_core::Builder;
///
/// let injector = Builder::new("10.0.0.2")
///     .probe_count(5)
///     .first_ttl(3)
///     .build()?;
/// injector.run()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Builder {
    target: String,
    config: InjectorConfig,
}

impl Builder {
    /// Create a `Builder` for a target given as a dotted-decimal IPv4
    /// address.
    ///
    /// The address is not parsed until [`build`](Self::build) is called.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            config: InjectorConfig::default(),
        }
    }

    /// Set the source address carried in the IPv4 header of every probe.
    ///
    /// Probes are fire-and-forget, so this address may be spoofed.
    #[must_use]
    pub const fn source_addr(mut self, source_addr: Ipv4Addr) -> Self {
        self.config.source_addr = source_addr;
        self
    }

    /// Set the TCP source port.
    #[must_use]
    pub const fn source_port(mut self, source_port: u16) -> Self {
        self.config.source_port = Port(source_port);
        self
    }

    /// Set the TCP destination port.
    #[must_use]
    pub const fn probe_port(mut self, probe_port: u16) -> Self {
        self.config.probe_port = Port(probe_port);
        self
    }

    /// Set the number of probes to send.
    #[must_use]
    pub const fn probe_count(mut self, probe_count: u8) -> Self {
        self.config.probe_count = ProbeCount(probe_count);
        self
    }

    /// Set the ttl of the first probe.
    #[must_use]
    pub const fn first_ttl(mut self, first_ttl: u8) -> Self {
        self.config.first_ttl = TimeToLive(first_ttl);
        self
    }

    /// Set the IPv4 `identification` field value.
    #[must_use]
    pub const fn identification(mut self, identification: u16) -> Self {
        self.config.identification = Identification(identification);
        self
    }

    /// Set the TCP `window_size` field value.
    #[must_use]
    pub const fn window_size(mut self, window_size: u16) -> Self {
        self.config.window_size = WindowSize(window_size);
        self
    }

    /// Set the base unit for the inter-probe pacing delay.
    #[must_use]
    pub const fn delay_unit(mut self, delay_unit: Duration) -> Self {
        self.config.delay_unit = delay_unit;
        self
    }

    /// Build the `Injector`.
    ///
    /// The target address is parsed and the configuration validated here,
    /// before any socket is opened or any probe sent.
    pub fn build(self) -> Result<Injector> {
        let mut config = self.config;
        config.target_addr = Ipv4Addr::from_str(&self.target)
            .map_err(|_| Error::AddressParse(self.target))?;
        Self::validate(&config)?;
        Ok(Injector::new(config))
    }

    fn validate(config: &InjectorConfig) -> Result<()> {
        if config.probe_count.0 < 1 {
            return Err(Error::BadConfig(String::from(
                "probe-count must be at least 1",
            )));
        }
        if config.first_ttl.0 < 1 || config.first_ttl.0 > MAX_TTL {
            return Err(Error::BadConfig(format!(
                "first-ttl {} must be in the range 1..={MAX_TTL}",
                config.first_ttl.0
            )));
        }
        let last_ttl = u16::from(config.first_ttl.0) + u16::from(config.probe_count.0) - 1;
        if last_ttl > u16::from(MAX_TTL) {
            return Err(Error::BadConfig(format!(
                "first-ttl {} plus probe-count {} exceeds the maximum ttl {MAX_TTL}",
                config.first_ttl.0, config.probe_count.0
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() -> anyhow::Result<()> {
        let injector = Builder::new("10.0.0.2").build()?;
        let config = injector.config();
        assert_eq!(Ipv4Addr::new(10, 0, 0, 2), config.target_addr);
        assert_eq!(Ipv4Addr::new(192, 168, 1, 109), config.source_addr);
        assert_eq!(Port(1234), config.source_port);
        assert_eq!(Port(34555), config.probe_port);
        assert_eq!(ProbeCount(29), config.probe_count);
        assert_eq!(TimeToLive(1), config.first_ttl);
        assert_eq!(Identification(54321), config.identification);
        assert_eq!(WindowSize(65535), config.window_size);
        assert_eq!(Duration::from_millis(10), config.delay_unit);
        Ok(())
    }

    #[test]
    fn test_build_custom() -> anyhow::Result<()> {
        let injector = Builder::new("10.0.0.2")
            .source_addr(Ipv4Addr::new(172, 16, 0, 1))
            .source_port(4321)
            .probe_port(33434)
            .probe_count(5)
            .first_ttl(3)
            .identification(1)
            .window_size(1024)
            .delay_unit(Duration::from_millis(1))
            .build()?;
        let config = injector.config();
        assert_eq!(Ipv4Addr::new(172, 16, 0, 1), config.source_addr);
        assert_eq!(Port(4321), config.source_port);
        assert_eq!(Port(33434), config.probe_port);
        assert_eq!(ProbeCount(5), config.probe_count);
        assert_eq!(TimeToLive(3), config.first_ttl);
        assert_eq!(Identification(1), config.identification);
        assert_eq!(WindowSize(1024), config.window_size);
        assert_eq!(Duration::from_millis(1), config.delay_unit);
        Ok(())
    }

    // An unparsable target fails fast, before any socket is opened.
    #[test]
    fn test_build_invalid_target() {
        for target in ["", "not-an-address", "10.0.0", "::1", "10.0.0.2:80"] {
            let err = Builder::new(target).build().unwrap_err();
            assert!(matches!(err, Error::AddressParse(_)), "{target}");
        }
    }

    #[test]
    fn test_build_invalid_probe_count() {
        let err = Builder::new("10.0.0.2").probe_count(0).build().unwrap_err();
        assert!(matches!(err, Error::BadConfig(_)));
    }

    #[test]
    fn test_build_invalid_first_ttl() {
        let err = Builder::new("10.0.0.2").first_ttl(0).build().unwrap_err();
        assert!(matches!(err, Error::BadConfig(_)));
        let err = Builder::new("10.0.0.2").first_ttl(255).build().unwrap_err();
        assert!(matches!(err, Error::BadConfig(_)));
    }

    #[test]
    fn test_build_ttl_range_overflow() {
        let err = Builder::new("10.0.0.2")
            .first_ttl(250)
            .probe_count(10)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::BadConfig(_)));
    }

    #[test]
    fn test_build_ttl_range_at_limit() -> anyhow::Result<()> {
        let injector = Builder::new("10.0.0.2")
            .first_ttl(250)
            .probe_count(5)
            .build()?;
        assert_eq!(TimeToLive(250), injector.config().first_ttl);
        Ok(())
    }
}
