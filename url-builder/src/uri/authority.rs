use crate::{
    error::ErrorKind::{self, InvalidCharacter, InvalidPortNumber, TruncatedHost},
    uri::{ipv6::validate_ipv6_address, Context},
};

/// The host and port of a URL authority, still percent-encoded.
///
/// Userinfo is accepted and dropped; a URL builder has no place for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authority<'a> {
    host: &'a str,
    port: Option<u16>,
}

#[derive(Clone, Copy)]
enum State {
    RegName,
    Ipv6Address,
    IpvFuture,
    GarbageCheck { host_end: usize },
    Port { host_end: usize },
}

impl<'a> Authority<'a> {
    pub fn parse(authority: &'a str) -> Result<Self, ErrorKind> {
        let host_port = match authority.rfind('@') {
            Some(delimiter) => &authority[delimiter + 1..],
            None => authority,
        };
        let (host, port) = parse_host_port(host_port)?;
        Ok(Self { host, port })
    }

    /// The host exactly as written, brackets included for IP literals.
    pub fn host(&self) -> &'a str {
        self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl State {
    fn new(host_port: &str) -> Self {
        if host_port.starts_with("[v") {
            Self::IpvFuture
        } else if host_port.starts_with('[') {
            Self::Ipv6Address
        } else {
            Self::RegName
        }
    }

    fn next(self, host_port: &str, i: usize, c: char) -> Result<Self, ErrorKind> {
        match self {
            Self::RegName if c == ':' => Ok(Self::Port { host_end: i }),
            Self::RegName => Ok(Self::RegName),
            Self::Ipv6Address if c == ']' => {
                validate_ipv6_address(&host_port[1..i])?;
                Ok(Self::GarbageCheck { host_end: i + 1 })
            }
            Self::Ipv6Address => Ok(Self::Ipv6Address),
            // IPvFuture bodies are passed through unchecked
            Self::IpvFuture if c == ']' => Ok(Self::GarbageCheck { host_end: i + 1 }),
            Self::IpvFuture => Ok(Self::IpvFuture),
            // only a port delimiter may follow an IP literal
            Self::GarbageCheck { host_end } if c == ':' => Ok(Self::Port { host_end }),
            Self::GarbageCheck { .. } => Err(InvalidCharacter(Context::Host)),
            Self::Port { .. } => Ok(self),
        }
    }

    fn finalize(self, host_port: &str) -> Result<(&str, Option<u16>), ErrorKind> {
        match self {
            Self::Ipv6Address | Self::IpvFuture => Err(TruncatedHost),
            Self::RegName => Ok((host_port, None)),
            Self::GarbageCheck { host_end } => Ok((&host_port[..host_end], None)),
            Self::Port { host_end } => {
                let port = &host_port[host_end + 1..];
                if port.is_empty() {
                    return Ok((&host_port[..host_end], None));
                }
                port.parse::<u16>()
                    .map(|port| (&host_port[..host_end], Some(port)))
                    .map_err(InvalidPortNumber)
            }
        }
    }
}

/// Splits `host[:port]`, where host may be a bracketed IP literal.
pub fn parse_host_port(host_port: &str) -> Result<(&str, Option<u16>), ErrorKind> {
    host_port
        .char_indices()
        .try_fold(State::new(host_port), |machine, (i, c)| {
            machine.next(host_port, i, c)
        })?
        .finalize(host_port)
}
