//! Assembling URLs from unescaped parts, and taking them apart again.
mod parse;

use crate::{
    codec::{Charset, Component, ErrorPolicy},
    error::{ErrorKind::InvalidQueryStateTransition, Result},
    uri::{is_ip_literal, validate_scheme},
};

/// One `/`-delimited path segment and the `;key=value` matrix params that
/// follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    segment: String,
    matrix_params: Vec<(String, String)>,
}

impl PathSegment {
    fn new(segment: String) -> Self {
        Self {
            segment,
            matrix_params: Vec::new(),
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn matrix_params(&self) -> &[(String, String)] {
        &self.matrix_params
    }
}

/// A query is either `key=value` pairs or one opaque string, never both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Query {
    #[default]
    Empty,
    Params(Vec<(String, String)>),
    Unstructured(String),
}

/// Builds a URL from unescaped parts, percent-encoding each part with the
/// rules for where it lands.
///
/// ```
/// use url_builder::UrlBuilder;
///
/// let mut builder = UrlBuilder::for_host("http", "foo.com")?;
/// builder
///     .path_segment("seg/;?ment")
///     .matrix_param("k", "v=w")
///     .query_param("q", "a&b")?
///     .fragment("frag ment");
/// assert_eq!(
///     builder.to_url_string()?,
///     "http://foo.com/seg%2F%3B%3Fment;k=v%3Dw?q=a%26b#frag%20ment"
/// );
/// # Ok::<(), url_builder::ErrorKind>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    scheme: String,
    host: String,
    port: Option<u16>,
    path_segments: Vec<PathSegment>,
    query: Query,
    fragment: Option<String>,
    force_trailing_slash: bool,
    charset: Charset,
    policy: ErrorPolicy,
}

impl UrlBuilder {
    /// `host` is a reg-name such as `foo.com`, a dotted-quad IPv4 address or
    /// a bracketed IPv6 literal such as `[::1]`.
    pub fn for_host(scheme: &str, host: &str) -> Result<Self> {
        Self::new(scheme, host, None)
    }

    pub fn for_host_with_port(scheme: &str, host: &str, port: u16) -> Result<Self> {
        Self::new(scheme, host, Some(port))
    }

    fn new(scheme: &str, host: &str, port: Option<u16>) -> Result<Self> {
        validate_scheme(scheme)?;
        Ok(Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            port,
            path_segments: Vec::new(),
            query: Query::Empty,
            fragment: None,
            force_trailing_slash: false,
            charset: Charset::default(),
            policy: ErrorPolicy::default(),
        })
    }

    pub fn path_segment(&mut self, segment: impl Into<String>) -> &mut Self {
        self.path_segments.push(PathSegment::new(segment.into()));
        self
    }

    pub fn path_segments<I>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.path_segments
            .extend(segments.into_iter().map(|segment| PathSegment::new(segment.into())));
        self
    }

    /// Adds a matrix param to the last path segment, starting an empty
    /// segment if there is none yet.
    pub fn matrix_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        if self.path_segments.is_empty() {
            self.path_segments.push(PathSegment::new(String::new()));
        }
        if let Some(segment) = self.path_segments.last_mut() {
            segment.matrix_params.push((key.into(), value.into()));
        }
        self
    }

    /// Fails if an unstructured query has been set.
    pub fn query_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<&mut Self> {
        let pair = (key.into(), value.into());
        match &mut self.query {
            Query::Params(params) => params.push(pair),
            Query::Empty => self.query = Query::Params(vec![pair]),
            Query::Unstructured(_) => {
                return Err(InvalidQueryStateTransition {
                    attempted: "query_param",
                    existing: "an unstructured query",
                })
            }
        }
        Ok(self)
    }

    /// Sets the whole query, replacing an earlier unstructured query. Fails
    /// if query params have been added.
    pub fn unstructured_query(&mut self, query: impl Into<String>) -> Result<&mut Self> {
        if let Query::Params(_) = self.query {
            return Err(InvalidQueryStateTransition {
                attempted: "unstructured_query",
                existing: "query_param pairs",
            });
        }
        self.query = Query::Unstructured(query.into());
        Ok(self)
    }

    pub fn clear_query(&mut self) -> &mut Self {
        self.query = Query::Empty;
        self
    }

    pub fn fragment(&mut self, fragment: impl Into<String>) -> &mut Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Ends the path with `/` even after matrix params.
    pub fn force_trailing_slash(&mut self) -> &mut Self {
        self.force_trailing_slash = true;
        self
    }

    /// Charset and error policy for the path, query and fragment. Host names
    /// are always UTF-8.
    pub fn charset(&mut self, charset: Charset, policy: ErrorPolicy) -> &mut Self {
        self.charset = charset;
        self.policy = policy;
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.path_segments
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn fragment_ref(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.force_trailing_slash
    }

    /// Serializes the builder. Only an [`ErrorPolicy::Report`] builder can
    /// fail, on text its charset can't represent.
    pub fn to_url_string(&self) -> Result<String> {
        let mut url = String::with_capacity(self.scheme.len() + self.host.len() + 16);
        url.push_str(&self.scheme);
        url.push_str("://");

        if is_ip_literal(&self.host) {
            url.push_str(&self.host);
        } else {
            Component::RegName
                .encoder_with(Charset::utf_8(), self.policy)
                .encode_to_sink(&self.host, &mut url)?;
        }
        if let Some(port) = self.port {
            url.push(':');
            url.push_str(&port.to_string());
        }

        let mut segment_encoder = Component::PathSegment.encoder_with(self.charset, self.policy);
        let mut matrix_encoder = Component::MatrixParam.encoder_with(self.charset, self.policy);
        for segment in &self.path_segments {
            url.push('/');
            segment_encoder.encode_to_sink(&segment.segment, &mut url)?;
            for (key, value) in &segment.matrix_params {
                url.push(';');
                matrix_encoder.encode_to_sink(key, &mut url)?;
                url.push('=');
                matrix_encoder.encode_to_sink(value, &mut url)?;
            }
        }
        if self.force_trailing_slash {
            url.push('/');
        }

        match &self.query {
            Query::Empty => {}
            Query::Params(params) => {
                let mut encoder = Component::QueryParam.encoder_with(self.charset, self.policy);
                for (i, (key, value)) in params.iter().enumerate() {
                    url.push(if i == 0 { '?' } else { '&' });
                    encoder.encode_to_sink(key, &mut url)?;
                    url.push('=');
                    encoder.encode_to_sink(value, &mut url)?;
                }
            }
            Query::Unstructured(query) => {
                url.push('?');
                Component::UnstructuredQuery
                    .encoder_with(self.charset, self.policy)
                    .encode_to_sink(query, &mut url)?;
            }
        }

        if let Some(fragment) = &self.fragment {
            url.push('#');
            Component::Fragment
                .encoder_with(self.charset, self.policy)
                .encode_to_sink(fragment, &mut url)?;
        }

        Ok(url)
    }
}
