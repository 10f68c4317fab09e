use crate::{
    chars_sets::{DIGIT, HEXDIG},
    error::ErrorKind::{
        self, InvalidCharacter, TooFewAddressParts, TooManyAddressParts, TooManyDigits,
        TooManyDoubleColons, TruncatedHost,
    },
    uri::{ipv4::validate_ipv4_address, Context},
};

const GROUPS: usize = 8;
const MAX_GROUP_DIGITS: usize = 4;

/// Why the machine stopped before the end of the address.
enum Stop<'a> {
    Error(ErrorKind),
    /// A `.` showed up inside a group: the rest of the address is a dotted
    /// quad, validated separately.
    Ipv4Tail(Shared<'a>),
}

impl From<ErrorKind> for Stop<'_> {
    fn from(error: ErrorKind) -> Self {
        Stop::Error(error)
    }
}

struct Shared<'a> {
    address: &'a str,
    groups: usize,
    digits: usize,
    double_colon: bool,
    group_start: usize,
}

enum State<'a> {
    Start(Shared<'a>),
    LeadingColon(Shared<'a>),
    AfterDoubleColon(Shared<'a>),
    HexGroup(Shared<'a>),
    DecimalGroup(Shared<'a>),
    Ipv4Tail(Shared<'a>),
    AfterColon(Shared<'a>),
}

impl<'a> State<'a> {
    fn new(address: &'a str) -> Self {
        Self::Start(Shared {
            address,
            groups: 0,
            digits: 0,
            double_colon: false,
            group_start: 0,
        })
    }

    fn finalize(self) -> Result<(), ErrorKind> {
        let state = match self {
            Self::LeadingColon(_) | Self::AfterColon(_) => return Err(TruncatedHost),
            Self::HexGroup(mut state) | Self::DecimalGroup(mut state) => {
                // count trailing group
                state.groups += 1;
                state
            }
            Self::Ipv4Tail(mut state) => {
                validate_ipv4_address(&state.address[state.group_start..])?;
                // a dotted quad stands in for two groups
                state.groups += 2;
                state
            }
            Self::Start(state) | Self::AfterDoubleColon(state) => state,
        };
        match (state.double_colon, state.groups) {
            (true, n) if n < GROUPS => Ok(()),
            (false, GROUPS) => Ok(()),
            (false, n) if n < GROUPS => Err(TooFewAddressParts),
            (_, _) => Err(TooManyAddressParts),
        }
    }

    fn next(self, i: usize, c: char) -> Result<Self, Stop<'a>> {
        match self {
            Self::Start(state) => Self::next_start(state, i, c),
            Self::LeadingColon(state) => Self::next_leading_colon(state, c),
            Self::AfterDoubleColon(state) => Self::begin_group(state, i, c),
            Self::HexGroup(state) => Self::next_hex_group(state, c),
            Self::DecimalGroup(state) => Self::next_decimal_group(state, c),
            Self::Ipv4Tail(state) => Ok(Self::Ipv4Tail(state)),
            Self::AfterColon(state) => Self::next_after_colon(state, i, c),
        }
    }

    fn next_start(state: Shared<'a>, i: usize, c: char) -> Result<Self, Stop<'a>> {
        if c == ':' {
            Ok(Self::LeadingColon(state))
        } else {
            Self::begin_group(state, i, c)
        }
    }

    fn next_leading_colon(state: Shared<'a>, c: char) -> Result<Self, Stop<'a>> {
        let mut state = state;
        if c == ':' {
            state.double_colon = true;
            Ok(Self::AfterDoubleColon(state))
        } else {
            Err(InvalidCharacter(Context::Ipv6Address).into())
        }
    }

    fn next_after_colon(state: Shared<'a>, i: usize, c: char) -> Result<Self, Stop<'a>> {
        let mut state = state;
        if c != ':' {
            Self::begin_group(state, i, c)
        } else if state.double_colon {
            Err(TooManyDoubleColons.into())
        } else {
            state.double_colon = true;
            Ok(Self::AfterDoubleColon(state))
        }
    }

    fn begin_group(state: Shared<'a>, i: usize, c: char) -> Result<Self, Stop<'a>> {
        let mut state = state;
        state.digits = 1;
        if DIGIT.contains(c) {
            state.group_start = i;
            Ok(Self::DecimalGroup(state))
        } else if HEXDIG.contains(c) {
            Ok(Self::HexGroup(state))
        } else {
            Err(InvalidCharacter(Context::Ipv6Address).into())
        }
    }

    fn end_group(state: Shared<'a>) -> Self {
        let mut state = state;
        state.digits = 0;
        state.groups += 1;
        Self::AfterColon(state)
    }

    fn next_hex_group(state: Shared<'a>, c: char) -> Result<Self, Stop<'a>> {
        if c == ':' {
            Ok(Self::end_group(state))
        } else if HEXDIG.contains(c) {
            Self::push_digit(state).map(Self::HexGroup)
        } else {
            Err(InvalidCharacter(Context::Ipv6Address).into())
        }
    }

    fn next_decimal_group(state: Shared<'a>, c: char) -> Result<Self, Stop<'a>> {
        if c == ':' {
            Ok(Self::end_group(state))
        } else if c == '.' {
            Err(Stop::Ipv4Tail(state))
        } else if DIGIT.contains(c) {
            Self::push_digit(state).map(Self::DecimalGroup)
        } else if HEXDIG.contains(c) {
            Self::push_digit(state).map(Self::HexGroup)
        } else {
            Err(InvalidCharacter(Context::Ipv6Address).into())
        }
    }

    fn push_digit(state: Shared<'a>) -> Result<Shared<'a>, Stop<'a>> {
        let mut state = state;
        state.digits += 1;
        if state.digits > MAX_GROUP_DIGITS {
            Err(TooManyDigits.into())
        } else {
            Ok(state)
        }
    }
}

/// Checks that `address` (without the surrounding brackets) is an RFC 3986
/// `IPv6address`, including the `::` shorthand and a trailing dotted quad.
pub fn validate_ipv6_address<T>(address: T) -> Result<(), ErrorKind>
where
    T: AsRef<str>,
{
    let address = address.as_ref();
    address
        .char_indices()
        .try_fold(State::new(address), |machine, (i, c)| machine.next(i, c))
        .or_else(|stop| match stop {
            Stop::Ipv4Tail(state) => Ok(State::Ipv4Tail(state)),
            Stop::Error(error) => Err(error),
        })?
        .finalize()
}
