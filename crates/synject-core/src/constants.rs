/// The maximum time-to-live value allowed.
///
/// The IP `ttl` is a u8 (0..255) but since a `ttl` of zero would be dropped
/// by the first hop we only allow 254 distinct hops (1..255).
pub const MAX_TTL: u8 = 254;
