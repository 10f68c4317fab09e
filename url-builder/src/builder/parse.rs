use crate::{
    builder::UrlBuilder,
    codec::{Charset, ErrorPolicy, PercentDecoder},
    error::{
        ErrorKind::{self, MalformedMatrixParam},
        Result,
    },
    uri::UrlParts,
};
use std::str::FromStr;
use tracing::{debug, trace};

impl UrlBuilder {
    /// Parses an absolute URL, decoding it as UTF-8 and replacing malformed
    /// sequences.
    pub fn from_url(url: &str) -> Result<Self> {
        Self::from_url_with_charset(url, Charset::utf_8(), ErrorPolicy::Replace)
    }

    /// Parses an absolute URL. The host is always decoded as UTF-8; the
    /// path, query and fragment with `charset`, which the returned builder
    /// keeps for serializing.
    ///
    /// A query made entirely of `key=value` pairs becomes query params;
    /// anything else is kept as an unstructured query.
    pub fn from_url_with_charset(url: &str, charset: Charset, policy: ErrorPolicy) -> Result<Self> {
        let parts = UrlParts::split(url)?;
        let mut decoder = PercentDecoder::new(charset, policy);

        let host = if charset.is_utf_8() {
            decoder.decode(parts.host())?
        } else {
            debug!(charset = charset.name(), "decoding host with a separate UTF-8 decoder");
            PercentDecoder::new(Charset::utf_8(), policy).decode(parts.host())?
        };

        let mut builder = Self::new(parts.scheme(), &host, parts.port())?;
        builder.charset(charset, policy);
        builder.build_from_path(parts.path(), &mut decoder)?;
        if let Some(query) = parts.query() {
            builder.build_from_query(query, &mut decoder)?;
        }
        if let Some(fragment) = parts.fragment() {
            builder.fragment(decoder.decode(fragment)?);
        }

        Ok(builder)
    }

    fn build_from_path(&mut self, path: &str, decoder: &mut PercentDecoder) -> Result<()> {
        for chunk in split_trimmed(path, '/') {
            if chunk.is_empty() {
                continue;
            }
            if let Some(matrix) = chunk.strip_prefix(';') {
                self.path_segment("");
                for pair in split_trimmed(matrix, ';') {
                    self.build_from_matrix_pair(pair, decoder)?;
                }
            } else {
                let mut pieces = split_trimmed(chunk, ';').into_iter();
                let segment = pieces.next().unwrap_or_default();
                self.path_segment(decoder.decode(segment)?);
                for pair in pieces {
                    self.build_from_matrix_pair(pair, decoder)?;
                }
            }
        }
        Ok(())
    }

    fn build_from_matrix_pair(&mut self, pair: &str, decoder: &mut PercentDecoder) -> Result<()> {
        match split_trimmed(pair, '=').as_slice() {
            [key, value] => {
                let key = decoder.decode(key)?;
                let value = decoder.decode(value)?;
                self.matrix_param(key, value);
                Ok(())
            }
            _ => Err(MalformedMatrixParam(pair.to_string())),
        }
    }

    fn build_from_query(&mut self, query: &str, decoder: &mut PercentDecoder) -> Result<()> {
        let pairs: Option<Vec<(&str, &str)>> = split_trimmed(query, '&')
            .into_iter()
            .map(|chunk| match split_trimmed(chunk, '=').as_slice() {
                [key, value] => Some((*key, *value)),
                _ => None,
            })
            .collect();

        match pairs {
            Some(pairs) => {
                for (key, value) in pairs {
                    let key = decoder.decode(key)?;
                    let value = decoder.decode(value)?;
                    self.query_param(key, value)?;
                }
            }
            None => {
                trace!(query, "query is not key=value pairs, keeping it unstructured");
                self.unstructured_query(decoder.decode(query)?)?;
            }
        }
        Ok(())
    }
}

impl FromStr for UrlBuilder {
    type Err = ErrorKind;

    fn from_str(url: &str) -> Result<Self> {
        Self::from_url(url)
    }
}

/// Splits on `separator` and drops trailing empty pieces, so `"a;"` is
/// `["a"]` and `";"` is `[]`. Input without the separator comes back whole,
/// even when empty.
fn split_trimmed(s: &str, separator: char) -> Vec<&str> {
    let mut pieces: Vec<&str> = s.split(separator).collect();
    if pieces.len() > 1 {
        while pieces.last().is_some_and(|piece| piece.is_empty()) {
            pieces.pop();
        }
    }
    pieces
}
