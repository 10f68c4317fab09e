//! RFC 3986 character classes, expressed as sets of UTF-16 code units that a
//! [`PercentEncoder`](crate::codec::PercentEncoder) leaves untouched.
//!
//! https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
//! https://datatracker.ietf.org/doc/html/rfc3986#section-2.3
use std::fmt;

const WORDS: usize = (u16::MAX as usize + 1) / 64;

/// Immutable membership predicate over UTF-16 code units.
///
/// Sets are built in `const` context by chaining [`with`](Self::with),
/// [`without`](Self::without) and [`union`](Self::union), so every
/// preconfigured set is a compile-time constant that can be shared freely
/// between threads. Surrogate code units are never members.
#[derive(Clone, PartialEq, Eq)]
pub struct SafeCharSet {
    bits: [u64; WORDS],
}

impl SafeCharSet {
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Adds `c`. Characters outside the Basic Multilingual Plane have no
    /// single code unit and are ignored.
    pub const fn with(mut self, c: char) -> Self {
        let unit = c as u32;
        if unit <= u16::MAX as u32 {
            self.bits[(unit >> 6) as usize] |= 1 << (unit & 63);
        }
        self
    }

    pub const fn without(mut self, c: char) -> Self {
        let unit = c as u32;
        if unit <= u16::MAX as u32 {
            self.bits[(unit >> 6) as usize] &= !(1 << (unit & 63));
        }
        self
    }

    pub const fn with_all(self, chars: &[char]) -> Self {
        let mut set = self;
        let mut i = 0;
        while i < chars.len() {
            set = set.with(chars[i]);
            i += 1;
        }
        set
    }

    /// Adds every character in `first..=last`.
    pub const fn with_range(self, first: char, last: char) -> Self {
        let mut set = self;
        let mut unit = first as u32;
        while unit <= last as u32 && unit <= u16::MAX as u32 {
            set.bits[(unit >> 6) as usize] |= 1 << (unit & 63);
            unit += 1;
        }
        set
    }

    pub const fn union(self, other: &Self) -> Self {
        let mut set = self;
        let mut i = 0;
        while i < WORDS {
            set.bits[i] |= other.bits[i];
            i += 1;
        }
        set
    }

    pub const fn contains_unit(&self, unit: u16) -> bool {
        !is_surrogate(unit) && self.bits[(unit >> 6) as usize] & (1 << (unit & 63)) != 0
    }

    pub const fn contains(&self, c: char) -> bool {
        let unit = c as u32;
        unit <= u16::MAX as u32 && self.contains_unit(unit as u16)
    }

    /// The character for `unit` if it is a member of this set.
    pub fn safe_char(&self, unit: u16) -> Option<char> {
        if self.contains_unit(unit) {
            char::from_u32(u32::from(unit))
        } else {
            None
        }
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        (0..=u16::MAX).filter_map(|unit| self.safe_char(unit))
    }
}

impl Default for SafeCharSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SafeCharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.chars()).finish()
    }
}

pub(crate) const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

pub(crate) const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

const fn is_surrogate(unit: u16) -> bool {
    is_high_surrogate(unit) || is_low_surrogate(unit)
}

pub const ALPHA: SafeCharSet = SafeCharSet::new()
    .with_range('a', 'z')
    .with_range('A', 'Z');
pub const DIGIT: SafeCharSet = SafeCharSet::new().with_range('0', '9');
pub const HEXDIG: SafeCharSet = DIGIT.with_range('A', 'F').with_range('a', 'f');

// https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
pub const SCHEME: SafeCharSet = ALPHA.union(&DIGIT).with_all(&['+', '-', '.']);

pub const UNRESERVED: SafeCharSet = ALPHA.union(&DIGIT).with_all(&['-', '.', '_', '~']);
pub const SUB_DELIMS: SafeCharSet =
    SafeCharSet::new().with_all(&['!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=']);
pub const PCHAR: SafeCharSet = UNRESERVED.union(&SUB_DELIMS).with_all(&[':', '@']);

/// RFC 3986 `reg-name`. Not very aggressive: DNS-illegal names still pass, but
/// the result is URI-compliant.
pub static REG_NAME: SafeCharSet = UNRESERVED.union(&SUB_DELIMS);

/// `pchar` without the delimiter that starts a matrix section.
pub static PATH_SEGMENT: SafeCharSet = PCHAR.without(';');

/// RFC 1738 section 3.3 matrix params. `/` and `?` are already excluded.
pub static MATRIX_PARAM: SafeCharSet = PCHAR.without(';').without('=');

// HTML4 lets `+` mean space in a query, so it can't be left as-is.
const QUERY: SafeCharSet = PCHAR.with_all(&['/', '?']);
pub static UNSTRUCTURED_QUERY: SafeCharSet = QUERY.without('+');

/// HTML4 form `key=value` pairs.
pub static QUERY_PARAM: SafeCharSet = QUERY.without('+').without('=').without('&');

pub static FRAGMENT: SafeCharSet = PCHAR.with_all(&['/', '?']);
