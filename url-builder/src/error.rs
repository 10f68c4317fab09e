use crate::uri::Context;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ErrorKind>;

#[derive(Error, Debug)]
pub enum ErrorKind {
    /// A high surrogate was not immediately followed by a low surrogate, such
    /// as `[0xD834, 0x0061]`, or ended the input.
    #[error(
        "invalid UTF-16: code unit {index} is a high surrogate (U+{high:04X}) {}",
        after_high_surrogate(.next)
    )]
    InvalidSurrogatePair {
        index: usize,
        high: u16,
        next: Option<u16>,
    },

    /// A `%` was followed by fewer than two characters, such as `foo%2`.
    #[error("could not percent decode <{input}>: incomplete %-pair at position {position}")]
    IncompletePercentTriple { input: String, position: usize },

    /// A `%` was followed by something other than two hex digits, such as
    /// `fo%2o`.
    #[error("invalid %-tuple <{triple}> at position {position}")]
    InvalidHexDigit { triple: String, position: usize },

    /// Raised only by codecs configured with `ErrorPolicy::Report`.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// Raised only by codecs configured with `ErrorPolicy::Report`.
    #[error("unmappable character: {0}")]
    UnmappableCharacter(String),

    #[error("malformed matrix param: <{0}>")]
    MalformedMatrixParam(String),

    /// The structured and unstructured query forms were mixed without a
    /// `clear_query()` in between.
    #[error("cannot call {attempted}() when this already has {existing} specified")]
    InvalidQueryStateTransition {
        attempted: &'static str,
        existing: &'static str,
    },

    #[error("invalid scheme string: {0:?}")]
    InvalidScheme(String),
    #[error("invalid scheme length: {0}")]
    InvalidSchemeLength(usize),
    /// The URL has no `//` authority after its scheme, such as `mailto:x@y`.
    #[error("URL has no authority component: {0:?}")]
    MissingAuthority(String),

    /// URL contains an invalid port number, such as
    /// `http://www.example.com:99999` or `http://www.example.com:foo`
    #[error("invalid port number")]
    InvalidPortNumber(#[source] std::num::ParseIntError),

    /// URL contains a character which is not permitted in the context where it
    /// was encountered; for example, a `g` in an IPv6 literal:
    /// `http://[::g]/`
    #[error("invalid character in {0}")]
    InvalidCharacter(Context),

    /// URL contains an IP address with missing parts, such as
    /// `http://[::ffff:1.2.3]/`
    #[error("too few address parts")]
    TooFewAddressParts,

    /// URL contains an IP address with too many parts, such as
    /// `http://[::ffff:1.2.3.4.8]/`
    #[error("too many address parts")]
    TooManyAddressParts,

    /// URL contains an IPv6 address that is truncated, such as
    /// `http://[2001:db8:85a3::8a2e:0:]/`
    #[error("truncated host")]
    TruncatedHost,
    /// URL contains an IPv4 address with one or more bad parts, such as
    /// `http://[::ffff:1.2.3.256]/`
    #[error("octet group expected")]
    InvalidDecimalOctet,

    /// URL contains an IPv6 address with more than one double-colon, such as
    /// `http://[2001:db8:85a3::8a2e::]/`
    #[error("too many double-colons in IPv6 address")]
    TooManyDoubleColons,
    /// URL contains an IPv6 address with too many digits, such as
    /// `http://[20001:db8:85a3::1]/`
    #[error("too many digits in IPv6 address part")]
    TooManyDigits,
}

fn after_high_surrogate(next: &Option<u16>) -> String {
    match next {
        Some(unit) => format!("but the next code unit is not a low surrogate (U+{unit:04X})"),
        None => "at the end of the input".to_string(),
    }
}
