//! Percent-encoding and decoding under a configurable character encoding.
//!
//! https://datatracker.ietf.org/doc/html/rfc3986#section-2.1
mod charset;
mod component;
mod decoder;
mod encoder;

pub use charset::{Charset, ErrorPolicy};
pub use component::Component;
pub use decoder::PercentDecoder;
pub use encoder::{OutputSink, PercentEncoder, SinkFn};
