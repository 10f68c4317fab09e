// https://datatracker.ietf.org/doc/html/rfc3986#section-2.1
use crate::{
    codec::charset::{Charset, ErrorPolicy},
    error::{
        ErrorKind::{IncompletePercentTriple, InvalidHexDigit},
        Result,
    },
};

const DEFAULT_BYTE_CAPACITY: usize = 16;

/// Turns `%XX` triples back into text. Consecutive triples are collected and
/// decoded together with the configured [`Charset`]; everything else is
/// copied through unchanged.
pub struct PercentDecoder {
    charset: Charset,
    policy: ErrorPolicy,
    encoded_bytes: Vec<u8>,
}

impl PercentDecoder {
    pub fn new(charset: Charset, policy: ErrorPolicy) -> Self {
        Self::with_buffer_size(charset, policy, DEFAULT_BYTE_CAPACITY)
    }

    /// Starts with room for `byte_capacity` decoded bytes per run; the
    /// buffer grows as needed.
    pub fn with_buffer_size(charset: Charset, policy: ErrorPolicy, byte_capacity: usize) -> Self {
        Self {
            charset,
            policy,
            encoded_bytes: Vec::with_capacity(byte_capacity.max(1)),
        }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Decodes `input`. Error positions are byte offsets into `input`.
    pub fn decode(&mut self, input: &str) -> Result<String> {
        self.encoded_bytes.clear();
        // decoded bytes never outnumber their triples
        let mut decoded = String::with_capacity(input.len());

        let mut cursor = 0;
        while let Some(offset) = input[cursor..].find('%') {
            let position = cursor + offset;
            if position > cursor {
                self.flush_encoded_bytes(&mut decoded)?;
                decoded.push_str(&input[cursor..position]);
            }
            self.encoded_bytes.push(decode_triple(input, position)?);
            cursor = position + 3;
        }
        if cursor < input.len() {
            self.flush_encoded_bytes(&mut decoded)?;
            decoded.push_str(&input[cursor..]);
        }
        self.flush_encoded_bytes(&mut decoded)?;

        Ok(decoded)
    }

    fn flush_encoded_bytes(&mut self, decoded: &mut String) -> Result<()> {
        if self.encoded_bytes.is_empty() {
            return Ok(());
        }
        let result = self
            .charset
            .decode_into(&self.encoded_bytes, self.policy, decoded);
        self.encoded_bytes.clear();
        result
    }
}

/// Reads the byte of the triple starting at `input[position]`, which is `%`.
fn decode_triple(input: &str, position: usize) -> Result<u8> {
    let mut digits = input[position + 1..].chars();
    match (digits.next(), digits.next()) {
        (Some(high), Some(low)) => match (hex_value(high), hex_value(low)) {
            (Some(high), Some(low)) => Ok((high << 4) | low),
            _ => {
                let end = position + 1 + high.len_utf8() + low.len_utf8();
                Err(InvalidHexDigit {
                    triple: input[position..end].to_string(),
                    position,
                })
            }
        },
        _ => Err(IncompletePercentTriple {
            input: input.to_string(),
            position,
        }),
    }
}

fn hex_value(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'A'..='F' => Some(c as u8 - b'A' + 10),
        'a'..='f' => Some(c as u8 - b'a' + 10),
        _ => None,
    }
}
