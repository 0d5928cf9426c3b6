//! Text encodings with 2-byte code units.
//!
//! Fingerprints are computed over encoded bytes, so the encoding is part of the
//! contract between the compiler and whatever reads the compiled catalog.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// The zero code unit terminating every payload record.
pub const TERMINATOR: [u8; 2] = [0, 0];

/// Width of one code unit in bytes.
pub const CODE_UNIT_WIDTH: usize = 2;

/// Errors raised while converting between text and encoded bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// A character has no representation in the encoding.
    #[error("character {character:?} (U+{:04X}) cannot be encoded as {encoding}", code_point(.character))]
    Unrepresentable { character: char, encoding: TextEncoding },

    /// The byte sequence does not consist of whole code units.
    #[error("byte length {0} is not a multiple of the 2-byte code unit")]
    OddLength(usize),

    /// The code units do not form valid text.
    #[error("invalid {encoding} data: {message}")]
    InvalidData { encoding: TextEncoding, message: String },
}

/// Numeric value of `c`, for error messages.
fn code_point(c: &char) -> u32 {
    u32::from(*c)
}

/// Supported encodings. All of them use 2-byte code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum TextEncoding {
    /// UTF-16, little-endian. Native wide-string layout on Windows.
    #[default]
    #[serde(rename = "utf-16le")]
    Utf16Le,
    /// UTF-16, big-endian.
    #[serde(rename = "utf-16be")]
    Utf16Be,
    /// UCS-2, little-endian: UTF-16 without surrogate pairs.
    #[serde(rename = "ucs-2le")]
    Ucs2Le,
    /// UCS-2, big-endian.
    #[serde(rename = "ucs-2be")]
    Ucs2Be,
}

impl TextEncoding {
    /// The name used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Ucs2Le => "ucs-2le",
            Self::Ucs2Be => "ucs-2be",
        }
    }

    /// Whether code units are stored least-significant byte first.
    const fn is_little_endian(self) -> bool {
        matches!(self, Self::Utf16Le | Self::Ucs2Le)
    }

    /// Whether characters outside the BMP may be written as surrogate pairs.
    const fn allows_surrogates(self) -> bool {
        matches!(self, Self::Utf16Le | Self::Utf16Be)
    }

    /// Serializes one code unit in this encoding's byte order.
    const fn unit_bytes(self, unit: u16) -> [u8; 2] {
        if self.is_little_endian() { unit.to_le_bytes() } else { unit.to_be_bytes() }
    }

    /// Encodes `text` without a terminator.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        if !self.allows_surrogates()
            && let Some(character) = text.chars().find(|c| c.len_utf16() > 1)
        {
            return Err(EncodingError::Unrepresentable { character, encoding: self });
        }

        let mut bytes = Vec::with_capacity(text.len() * CODE_UNIT_WIDTH);
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&self.unit_bytes(unit));
        }
        Ok(bytes)
    }

    /// Encodes `text` followed by the zero terminator.
    pub fn encode_terminated(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        let mut bytes = self.encode(text)?;
        bytes.extend_from_slice(&TERMINATOR);
        Ok(bytes)
    }

    /// Decodes `bytes`, which must not include a terminator.
    pub fn decode(self, bytes: &[u8]) -> Result<String, EncodingError> {
        let (pairs, rest) = bytes.as_chunks::<CODE_UNIT_WIDTH>();
        if !rest.is_empty() {
            return Err(EncodingError::OddLength(bytes.len()));
        }

        let units = pairs.iter().map(|&pair| {
            if self.is_little_endian() { u16::from_le_bytes(pair) } else { u16::from_be_bytes(pair) }
        });

        let mut text = String::with_capacity(pairs.len());
        for decoded in char::decode_utf16(units) {
            match decoded {
                Ok(c) if !self.allows_surrogates() && c.len_utf16() > 1 => {
                    return Err(EncodingError::Unrepresentable { character: c, encoding: self });
                }
                Ok(c) => text.push(c),
                Err(e) => {
                    return Err(EncodingError::InvalidData {
                        encoding: self,
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(text)
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
