//! URL scheme
//!
//! https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
use crate::{
    chars_sets::{ALPHA, SCHEME},
    error::ErrorKind::{self, InvalidScheme, InvalidSchemeLength},
};

// Not in RFC 3986; long enough for any registered scheme.
const MAX_SCHEME_LEN: usize = 64;

/// Checks `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
pub fn validate_scheme(scheme: &str) -> Result<(), ErrorKind> {
    if scheme.len() > MAX_SCHEME_LEN {
        return Err(InvalidSchemeLength(scheme.len()));
    }

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if ALPHA.contains(first) && chars.all(|ch| SCHEME.contains(ch)) => Ok(()),
        _ => Err(InvalidScheme(scheme.to_string())),
    }
}
