use crate::{
    chars_sets::DIGIT,
    error::ErrorKind::{
        self, InvalidCharacter, InvalidDecimalOctet, TooFewAddressParts, TooManyAddressParts,
        TruncatedHost,
    },
    uri::Context,
};

const OCTETS: usize = 4;
const MAX_OCTET_DIGITS: usize = 3;

struct Shared {
    octets_done: usize,
    octet: u32,
    digits: usize,
}

enum State {
    ExpectDigit(Shared),
    InOctet(Shared),
}

impl State {
    fn new() -> Self {
        Self::ExpectDigit(Shared {
            octets_done: 0,
            octet: 0,
            digits: 0,
        })
    }

    fn finalize(self) -> Result<(), ErrorKind> {
        match self {
            Self::ExpectDigit(_) => Err(TruncatedHost),
            Self::InOctet(state) if state.octets_done + 1 == OCTETS => Ok(()),
            Self::InOctet(_) => Err(TooFewAddressParts),
        }
    }

    fn next(self, c: char) -> Result<Self, ErrorKind> {
        match self {
            Self::ExpectDigit(state) => Self::next_expect_digit(state, c),
            Self::InOctet(state) => Self::next_in_octet(state, c),
        }
    }

    fn next_expect_digit(state: Shared, c: char) -> Result<Self, ErrorKind> {
        if DIGIT.contains(c) {
            Self::push_digit(state, c)
        } else {
            Err(InvalidCharacter(Context::Ipv4Address))
        }
    }

    fn next_in_octet(state: Shared, c: char) -> Result<Self, ErrorKind> {
        let mut state = state;
        if c == '.' {
            state.octets_done += 1;
            if state.octets_done >= OCTETS {
                return Err(TooManyAddressParts);
            }
            state.octet = 0;
            state.digits = 0;
            Ok(Self::ExpectDigit(state))
        } else if DIGIT.contains(c) {
            Self::push_digit(state, c)
        } else {
            Err(InvalidCharacter(Context::Ipv4Address))
        }
    }

    // dec-octet: at most three digits, at most 255
    fn push_digit(state: Shared, c: char) -> Result<Self, ErrorKind> {
        let mut state = state;
        state.digits += 1;
        state.octet = state.octet * 10 + c.to_digit(10).unwrap_or_default();
        if state.digits > MAX_OCTET_DIGITS || state.octet > 255 {
            Err(InvalidDecimalOctet)
        } else {
            Ok(Self::InOctet(state))
        }
    }
}

/// Checks that `address` is a dotted-quad IPv4 address (RFC 3986
/// `IPv4address`), such as `127.0.0.1`.
pub fn validate_ipv4_address<T>(address: T) -> Result<(), ErrorKind>
where
    T: AsRef<str>,
{
    address
        .as_ref()
        .chars()
        .try_fold(State::new(), State::next)?
        .finalize()
}
