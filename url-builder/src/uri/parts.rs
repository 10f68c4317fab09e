use crate::{
    error::ErrorKind::{self, InvalidScheme, MissingAuthority},
    uri::{authority::Authority, scheme::validate_scheme},
};

/// An absolute URL cut into its raw, still percent-encoded components:
/// `scheme "://" authority path [ "?" query ] [ "#" fragment ]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    scheme: &'a str,
    authority: Authority<'a>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> UrlParts<'a> {
    pub fn split(url: &'a str) -> Result<Self, ErrorKind> {
        let (scheme, rest) = url
            .split_once(':')
            .ok_or_else(|| InvalidScheme(url.to_string()))?;
        validate_scheme(scheme)?;
        let rest = rest
            .strip_prefix("//")
            .ok_or_else(|| MissingAuthority(url.to_string()))?;

        let (rest, fragment) = match rest.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (rest, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };
        let (authority, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));

        Ok(Self {
            scheme,
            authority: Authority::parse(authority)?,
            path,
            query,
            fragment,
        })
    }

    pub fn scheme(&self) -> &'a str {
        self.scheme
    }

    pub fn host(&self) -> &'a str {
        self.authority.host()
    }

    pub fn port(&self) -> Option<u16> {
        self.authority.port()
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    pub fn query(&self) -> Option<&'a str> {
        self.query
    }

    pub fn fragment(&self) -> Option<&'a str> {
        self.fragment
    }
}
