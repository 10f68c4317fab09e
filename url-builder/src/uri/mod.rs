//! Syntax helpers for the parts of a URL that are not percent-encoded
//! component text: scheme, authority and IP literals.
//!
//! Implementation refers to RFC 3986 -> https://datatracker.ietf.org/doc/html/rfc3986
pub mod authority;
pub mod ipv4;
pub mod ipv6;
pub mod parts;
pub mod scheme;

pub use authority::Authority;
pub use ipv4::validate_ipv4_address;
pub use ipv6::validate_ipv6_address;
pub use parts::UrlParts;
pub use scheme::validate_scheme;

/// This enumerates the places where a character may be rejected while
/// splitting a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// This is the host of the URL, such as `www.example.com` in
    /// `http://www.example.com/foo?bar#baz`.
    Host,

    /// This is an IPv4 address, either the whole host or the trailing
    /// portion of an IPv6 literal, such as `1.2.3.4` in
    /// `http://[::ffff:1.2.3.4]/foo?bar#baz`.
    Ipv4Address,

    /// This is the IPv6 literal host of the URL, such as
    /// `::ffff:1.2.3.4` in `http://[::ffff:1.2.3.4]/foo?bar#baz`.
    Ipv6Address,
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Context::Host => write!(f, "host"),
            Context::Ipv4Address => write!(f, "IPv4 address"),
            Context::Ipv6Address => write!(f, "IPv6 address"),
        }
    }
}

/// Whether `host` is a dotted-quad IPv4 literal or a bracketed IPv6 literal,
/// either of which is written into a URL verbatim.
pub fn is_ip_literal(host: &str) -> bool {
    validate_ipv4_address(host).is_ok()
        || host
            .strip_prefix('[')
            .and_then(|literal| literal.strip_suffix(']'))
            .is_some_and(|address| validate_ipv6_address(address).is_ok())
}
