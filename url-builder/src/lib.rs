//! Percent-encoding for URLs per RFC 3986, and a URL builder on top of it.
//!
//! Each URL component is escaped with its own set of safe characters (see
//! [`Component`]) and a configurable [`Charset`], so characters outside ASCII
//! and UTF-16 surrogate pairs come out as the right `%XX` bytes.
//!
//! ```
//! use url_builder::UrlBuilder;
//!
//! let mut builder = UrlBuilder::from_url("http://foo.com/snowman?q=a%20b")?;
//! builder.path_segment("\u{2603}");
//! assert_eq!(
//!     builder.to_url_string()?,
//!     "http://foo.com/snowman/%E2%98%83?q=a%20b"
//! );
//! # Ok::<(), url_builder::ErrorKind>(())
//! ```
pub mod builder;
pub mod chars_sets;
pub mod codec;
pub mod error;
pub mod uri;

pub use builder::{PathSegment, Query, UrlBuilder};
pub use chars_sets::SafeCharSet;
pub use codec::{
    Charset, Component, ErrorPolicy, OutputSink, PercentDecoder, PercentEncoder, SinkFn,
};
pub use error::{ErrorKind, Result};
