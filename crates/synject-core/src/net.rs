/// A channel for sending probes.
pub mod channel;

/// IPv4/TCP packet construction and dispatch.
pub mod ipv4;

/// Platform specific network code.
pub mod platform;

/// A network socket.
pub mod socket;
