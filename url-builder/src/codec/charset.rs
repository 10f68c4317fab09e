use crate::error::{
    ErrorKind::{MalformedInput, UnmappableCharacter},
    Result,
};
use encoding::{
    all, label::encoding_from_whatwg_label, DecoderTrap, EncoderTrap, Encoding, EncodingRef,
};
use std::fmt;

/// What a codec does with characters or bytes its [`Charset`] can't convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Substitute `?` when encoding and U+FFFD when decoding.
    #[default]
    Replace,
    /// Fail with `UnmappableCharacter` when encoding and `MalformedInput`
    /// when decoding.
    Report,
}

impl ErrorPolicy {
    fn encoder_trap(self) -> EncoderTrap {
        match self {
            Self::Replace => EncoderTrap::Replace,
            Self::Report => EncoderTrap::Strict,
        }
    }

    fn decoder_trap(self) -> DecoderTrap {
        match self {
            Self::Replace => DecoderTrap::Replace,
            Self::Report => DecoderTrap::Strict,
        }
    }
}

/// The character encoding that sits between text and percent-encoded bytes.
#[derive(Clone, Copy)]
pub struct Charset {
    encoding: EncodingRef,
}

impl Charset {
    pub fn new(encoding: EncodingRef) -> Self {
        Self { encoding }
    }

    pub fn utf_8() -> Self {
        Self::new(all::UTF_8)
    }

    pub fn utf_16be() -> Self {
        Self::new(all::UTF_16BE)
    }

    pub fn utf_16le() -> Self {
        Self::new(all::UTF_16LE)
    }

    pub fn iso_8859_1() -> Self {
        Self::new(all::ISO_8859_1)
    }

    pub fn us_ascii() -> Self {
        Self::new(all::ASCII)
    }

    /// Looks a charset up by its WHATWG label, such as `"shift_jis"`.
    pub fn for_label(label: &str) -> Option<Self> {
        encoding_from_whatwg_label(label).map(Self::new)
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn is_utf_8(&self) -> bool {
        self.name() == all::UTF_8.name()
    }

    /// Worst-case bytes produced per UTF-16 code unit, used to size scratch
    /// buffers.
    pub fn max_bytes_per_unit(&self) -> usize {
        match self.name() {
            "utf-8" => 3,
            "utf-16be" | "utf-16le" => 2,
            "ascii" => 1,
            name if name.starts_with("iso-8859-") || name.starts_with("windows-125") => 1,
            _ => 4,
        }
    }

    /// Appends the encoding of `input` to `bytes`.
    pub(crate) fn encode_into(
        &self,
        input: &str,
        policy: ErrorPolicy,
        bytes: &mut Vec<u8>,
    ) -> Result<()> {
        self.encoding
            .encode_to(input, policy.encoder_trap(), bytes)
            .map_err(|cause| UnmappableCharacter(format!("{cause} in {input:?} ({})", self.name())))
    }

    /// Decodes all of `bytes`, appending to `output`. Incomplete trailing
    /// sequences are treated as malformed.
    pub(crate) fn decode_into(
        &self,
        bytes: &[u8],
        policy: ErrorPolicy,
        output: &mut String,
    ) -> Result<()> {
        self.encoding
            .decode_to(bytes, policy.decoder_trap(), output)
            .map_err(|cause| MalformedInput(format!("{cause} in {bytes:02X?} ({})", self.name())))
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf_8()
    }
}

impl PartialEq for Charset {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Charset {}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Charset").field(&self.name()).finish()
    }
}
