use crate::{
    chars_sets::{is_high_surrogate, is_low_surrogate, SafeCharSet},
    codec::charset::{Charset, ErrorPolicy},
    error::{
        ErrorKind::{InvalidSurrogatePair, MalformedInput},
        Result,
    },
};
use tracing::trace;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Code points of unsafe input buffered before a charset flush.
const DEFAULT_RUN_CAPACITY: usize = 1024;
/// Bytes of encoded output buffered before a sink call.
const DEFAULT_OUTPUT_CAPACITY: usize = 8192;
/// Room for one `%XX` triple or the widest UTF-8 char.
const MIN_OUTPUT_CAPACITY: usize = 4;

/// Receives encoded output in bursts. A chunk is only valid for the duration
/// of the call.
pub trait OutputSink {
    fn on_output(&mut self, chunk: &str);
}

impl OutputSink for String {
    fn on_output(&mut self, chunk: &str) {
        self.push_str(chunk);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn on_output(&mut self, chunk: &str) {
        (**self).on_output(chunk);
    }
}

/// Adapts a closure into an [`OutputSink`].
///
/// ```
/// use url_builder::{codec::SinkFn, Component};
///
/// let mut chunks = Vec::new();
/// Component::PathSegment
///     .encoder()
///     .encode_to_sink("a b", &mut SinkFn(|chunk: &str| chunks.push(chunk.to_string())))
///     .unwrap();
/// assert_eq!(chunks.concat(), "a%20b");
/// ```
pub struct SinkFn<F>(pub F);

impl<F: FnMut(&str)> OutputSink for SinkFn<F> {
    fn on_output(&mut self, chunk: &str) {
        (self.0)(chunk);
    }
}

struct OutputBuffer {
    buf: String,
    capacity: usize,
}

impl OutputBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            capacity,
        }
    }

    fn reserve<S: OutputSink + ?Sized>(&mut self, len: usize, sink: &mut S) {
        if self.buf.len() + len > self.capacity {
            self.flush(sink);
        }
    }

    fn push_char<S: OutputSink + ?Sized>(&mut self, c: char, sink: &mut S) {
        self.reserve(c.len_utf8(), sink);
        self.buf.push(c);
    }

    fn push_byte<S: OutputSink + ?Sized>(&mut self, byte: u8, sink: &mut S) {
        self.reserve(3, sink);
        self.buf.push('%');
        self.buf.push(char::from(HEX[usize::from(byte >> 4)]));
        self.buf.push(char::from(HEX[usize::from(byte & 0x0F)]));
    }

    fn flush<S: OutputSink + ?Sized>(&mut self, sink: &mut S) {
        if !self.buf.is_empty() {
            sink.on_output(&self.buf);
            self.buf.clear();
        }
    }
}

/// Escapes every UTF-16 code unit outside a [`SafeCharSet`] as `%XX` triples
/// of its bytes in the configured [`Charset`].
///
/// Runs of unsafe characters are converted together, so a multi-byte charset
/// sees whole characters and surrogate pairs. An encoder owns its scratch
/// buffers and may be reused for any number of inputs.
pub struct PercentEncoder<'s> {
    safe_chars: &'s SafeCharSet,
    charset: Charset,
    policy: ErrorPolicy,
    run_capacity: usize,
    unsafe_units: Vec<u16>,
    unsafe_chars: String,
    encoded_bytes: Vec<u8>,
    output: OutputBuffer,
}

impl<'s> PercentEncoder<'s> {
    pub fn new(safe_chars: &'s SafeCharSet, charset: Charset, policy: ErrorPolicy) -> Self {
        Self::with_buffer_sizes(
            safe_chars,
            charset,
            policy,
            DEFAULT_RUN_CAPACITY,
            DEFAULT_OUTPUT_CAPACITY,
        )
    }

    /// `run_capacity` is in code points and `output_capacity` in bytes; both
    /// are raised to the smallest workable size.
    pub fn with_buffer_sizes(
        safe_chars: &'s SafeCharSet,
        charset: Charset,
        policy: ErrorPolicy,
        run_capacity: usize,
        output_capacity: usize,
    ) -> Self {
        let run_capacity = 2 * run_capacity.max(1);
        Self {
            safe_chars,
            charset,
            policy,
            run_capacity,
            unsafe_units: Vec::with_capacity(run_capacity),
            unsafe_chars: String::with_capacity(run_capacity),
            encoded_bytes: Vec::with_capacity(run_capacity * charset.max_bytes_per_unit()),
            output: OutputBuffer::new(output_capacity.max(MIN_OUTPUT_CAPACITY)),
        }
    }

    pub fn safe_chars(&self) -> &'s SafeCharSet {
        self.safe_chars
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn encode(&mut self, input: &str) -> Result<String> {
        let mut encoded = String::with_capacity(input.len());
        self.encode_to_sink(input, &mut encoded)?;
        Ok(encoded)
    }

    /// Streams the encoding of `input` into `sink`. On error the sink may
    /// already hold a prefix of the output.
    pub fn encode_to_sink<S>(&mut self, input: &str, sink: &mut S) -> Result<()>
    where
        S: OutputSink + ?Sized,
    {
        self.encode_units(input.encode_utf16(), sink)
    }

    /// Encodes raw UTF-16, which unlike `&str` may hold unpaired surrogates.
    pub fn encode_utf16(&mut self, input: &[u16]) -> Result<String> {
        let mut encoded = String::with_capacity(input.len());
        self.encode_utf16_to_sink(input, &mut encoded)?;
        Ok(encoded)
    }

    pub fn encode_utf16_to_sink<S>(&mut self, input: &[u16], sink: &mut S) -> Result<()>
    where
        S: OutputSink + ?Sized,
    {
        self.encode_units(input.iter().copied(), sink)
    }

    fn encode_units<I, S>(&mut self, units: I, sink: &mut S) -> Result<()>
    where
        I: Iterator<Item = u16>,
        S: OutputSink + ?Sized,
    {
        self.unsafe_units.clear();
        self.output.buf.clear();

        let mut units = units.enumerate().peekable();
        while let Some((index, unit)) = units.next() {
            if let Some(c) = self.safe_chars.safe_char(unit) {
                self.flush_unsafe_units(sink)?;
                self.output.push_char(c, sink);
                continue;
            }

            self.unsafe_units.push(unit);
            if is_high_surrogate(unit) {
                match units.next_if(|&(_, next)| is_low_surrogate(next)) {
                    Some((_, low)) => self.unsafe_units.push(low),
                    None => {
                        return Err(InvalidSurrogatePair {
                            index,
                            high: unit,
                            next: units.peek().map(|&(_, next)| next),
                        })
                    }
                }
            }

            // the next step may push a whole pair
            if self.unsafe_units.len() + 2 > self.run_capacity {
                trace!(
                    units = self.unsafe_units.len(),
                    "unsafe run reached capacity, flushing early"
                );
                self.flush_unsafe_units(sink)?;
            }
        }

        self.flush_unsafe_units(sink)?;
        self.output.flush(sink);
        Ok(())
    }

    fn flush_unsafe_units<S>(&mut self, sink: &mut S) -> Result<()>
    where
        S: OutputSink + ?Sized,
    {
        if self.unsafe_units.is_empty() {
            return Ok(());
        }

        self.unsafe_chars.clear();
        for decoded in char::decode_utf16(self.unsafe_units.drain(..)) {
            match (decoded, self.policy) {
                (Ok(c), _) => self.unsafe_chars.push(c),
                // only a lone low surrogate gets here
                (Err(_), ErrorPolicy::Replace) => self.unsafe_chars.push('?'),
                (Err(lone), ErrorPolicy::Report) => {
                    return Err(MalformedInput(format!(
                        "unpaired low surrogate U+{:04X}",
                        lone.unpaired_surrogate()
                    )))
                }
            }
        }

        self.encoded_bytes.clear();
        self.charset
            .encode_into(&self.unsafe_chars, self.policy, &mut self.encoded_bytes)?;
        for &byte in &self.encoded_bytes {
            self.output.push_byte(byte, sink);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PercentEncoder, SinkFn};
    use crate::{
        chars_sets::{SafeCharSet, ALPHA, DIGIT},
        codec::{Charset, ErrorPolicy},
        error::ErrorKind,
    };

    static ALNUM: SafeCharSet = ALPHA.union(&DIGIT);

    fn alnum_encoder(charset: Charset) -> PercentEncoder<'static> {
        PercentEncoder::new(&ALNUM, charset, ErrorPolicy::Report)
    }

    #[test]
    fn safe_chars_pass_through() {
        let mut encoder = alnum_encoder(Charset::utf_8());
        assert_eq!(encoder.encode("abcd1234").unwrap(), "abcd1234");
        assert_eq!(encoder.encode("").unwrap(), "");
        assert_eq!(encoder.encode(" abc ").unwrap(), "%20abc%20");
    }

    #[test]
    fn multi_byte_charsets_emit_one_triple_per_byte() {
        let mut encoder = alnum_encoder(Charset::utf_16be());
        assert_eq!(encoder.encode("snowman\u{2603}").unwrap(), "snowman%26%03");
        assert_eq!(encoder.encode("clef\u{1D11E}").unwrap(), "clef%D8%34%DD%1E");

        static LOWER: SafeCharSet = SafeCharSet::new().with_range('a', 'z');
        let mut encoder = PercentEncoder::new(&LOWER, Charset::utf_16be(), ErrorPolicy::Report);
        assert_eq!(
            encoder.encode("abcdABCD").unwrap(),
            "abcd%00%41%00%42%00%43%00%44"
        );
    }

    #[test]
    fn unpaired_high_surrogates_are_errors() {
        let mut encoder = alnum_encoder(Charset::utf_8());
        let error = encoder.encode_utf16(&[0x61, 0xD834, 0x62]).unwrap_err();
        assert!(matches!(
            error,
            ErrorKind::InvalidSurrogatePair {
                index: 1,
                high: 0xD834,
                next: Some(0x62)
            }
        ));

        let error = encoder.encode_utf16(&[0xD834]).unwrap_err();
        assert!(matches!(
            error,
            ErrorKind::InvalidSurrogatePair { next: None, .. }
        ));
    }

    #[test]
    fn lone_low_surrogates_follow_the_policy() {
        let mut encoder = alnum_encoder(Charset::utf_8());
        assert!(matches!(
            encoder.encode_utf16(&[0xDD1E]),
            Err(ErrorKind::MalformedInput(_))
        ));

        let mut encoder = PercentEncoder::new(&ALNUM, Charset::utf_8(), ErrorPolicy::Replace);
        assert_eq!(encoder.encode_utf16(&[0x61, 0xDD1E]).unwrap(), "a%3F");
    }

    #[test]
    fn tiny_buffers_stream_the_same_output() {
        let input = "\u{1D11E} \u{2603}x\u{e9}\u{e9}\u{e9}\u{1D11E}\u{1D11E}";
        let expected = alnum_encoder(Charset::utf_8()).encode(input).unwrap();

        let mut chunks = Vec::new();
        let mut encoder =
            PercentEncoder::with_buffer_sizes(&ALNUM, Charset::utf_8(), ErrorPolicy::Report, 1, 0);
        encoder
            .encode_to_sink(input, &mut SinkFn(|chunk: &str| chunks.push(chunk.to_string())))
            .unwrap();

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|chunk| chunk.len() <= 4));
        assert_eq!(chunks.concat(), expected);
    }

    #[test]
    fn encoder_is_reusable_after_an_error() {
        let mut encoder = alnum_encoder(Charset::utf_8());
        assert!(encoder.encode_utf16(&[0x20, 0xD834]).is_err());
        assert_eq!(encoder.encode("a b").unwrap(), "a%20b");
    }
}
