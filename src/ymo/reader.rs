//! Reading a compiled catalog back, the way a runtime consumer does.

use std::borrow::Cow;
use std::collections::HashMap;

use thiserror::Error;

use super::format::{
    COUNT_SIZE,
    INDEX_ENTRY_SIZE,
    IndexEntry,
    header_size,
};
use crate::catalog::CONTEXT_SEPARATOR;
use crate::encoding::{
    CODE_UNIT_WIDTH,
    EncodingError,
    TERMINATOR,
    TextEncoding,
};
use crate::hash::fnv1a_32;

/// Errors raised for malformed compiled catalogs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The buffer ends before the header does.
    #[error("Catalog truncated: expected at least {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },

    /// An index record points outside the payload area.
    #[error("Entry {fingerprint:#010x} points at offset {offset}, outside the payload area")]
    OffsetOutOfBounds { fingerprint: u32, offset: u16 },

    /// A payload is not followed by a zero code unit.
    #[error("Entry {fingerprint:#010x} at offset {offset} has no terminator")]
    MissingTerminator { fingerprint: u32, offset: u16 },

    #[error("Entry {fingerprint:#010x} cannot be decoded: {source}")]
    Encoding {
        fingerprint: u32,
        #[source]
        source: EncodingError,
    },
}

/// Borrowed view over compiled catalog bytes with a fingerprint index.
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    /// The whole compiled catalog.
    data: &'a [u8],
    /// Encoding used both for hashing keys and decoding payloads.
    encoding: TextEncoding,
    /// Index records in file order.
    entries: Vec<IndexEntry>,
    /// Fingerprint → encoded payload, terminator excluded.
    payloads: HashMap<u32, &'a [u8]>,
}

impl<'a> CatalogView<'a> {
    /// Parses the header and index of `data` and locates every payload.
    ///
    /// # Errors
    /// - `data` is shorter than its header
    /// - An offset points outside `data` or into the header
    /// - A payload has no terminator
    pub fn parse(data: &'a [u8], encoding: TextEncoding) -> Result<Self, FormatError> {
        let count = match data.first_chunk::<COUNT_SIZE>() {
            Some(bytes) => usize::from(u16::from_le_bytes(*bytes)),
            None => return Err(FormatError::Truncated { expected: COUNT_SIZE, actual: data.len() }),
        };

        let header_end = header_size(count);
        let index = data
            .get(COUNT_SIZE..header_end)
            .ok_or(FormatError::Truncated { expected: header_end, actual: data.len() })?;

        let mut entries = Vec::with_capacity(count);
        let mut payloads = HashMap::with_capacity(count);
        for record in index.chunks_exact(INDEX_ENTRY_SIZE) {
            let entry = Self::index_entry(record)
                .ok_or(FormatError::Truncated { expected: header_end, actual: data.len() })?;

            let payload = Self::payload_at(data, header_end, entry)?;
            // First occurrence of a fingerprint wins
            payloads.entry(entry.fingerprint).or_insert(payload);
            entries.push(entry);
        }

        tracing::debug!(count, %encoding, "Parsed compiled catalog");
        Ok(Self { data, encoding, entries, payloads })
    }

    /// Decodes one `{fingerprint: u32, offset: u16}` record.
    fn index_entry(record: &[u8]) -> Option<IndexEntry> {
        let (fingerprint, rest) = record.split_first_chunk::<4>()?;
        let offset = rest.first_chunk::<2>()?;
        Some(IndexEntry {
            fingerprint: u32::from_le_bytes(*fingerprint),
            offset: u16::from_le_bytes(*offset),
        })
    }

    /// Slices the payload of `entry`, up to but excluding its terminator.
    fn payload_at(data: &'a [u8], header_end: usize, entry: IndexEntry) -> Result<&'a [u8], FormatError> {
        let IndexEntry { fingerprint, offset } = entry;
        let start = usize::from(offset);
        if start < header_end {
            return Err(FormatError::OffsetOutOfBounds { fingerprint, offset });
        }
        let tail = data.get(start..).ok_or(FormatError::OffsetOutOfBounds { fingerprint, offset })?;

        let end = tail
            .chunks_exact(CODE_UNIT_WIDTH)
            .position(|unit| unit == TERMINATOR)
            .ok_or(FormatError::MissingTerminator { fingerprint, offset })?;

        tail.get(..end * CODE_UNIT_WIDTH)
            .ok_or(FormatError::MissingTerminator { fingerprint, offset })
    }

    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    #[must_use]
    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decodes the payload stored under `fingerprint`, if any.
    ///
    /// # Errors
    /// The payload is not valid in the catalog's encoding.
    pub fn get(&self, fingerprint: u32) -> Result<Option<String>, FormatError> {
        let Some(payload) = self.payloads.get(&fingerprint) else {
            return Ok(None);
        };
        self.encoding
            .decode(payload)
            .map(Some)
            .map_err(|source| FormatError::Encoding { fingerprint, source })
    }

    /// Looks up the translation of a lookup key (`source`, or `context + EOT + source`).
    ///
    /// A key that cannot be encoded cannot have been compiled, so it is reported as absent.
    ///
    /// # Errors
    /// The stored payload is not valid in the catalog's encoding.
    pub fn lookup(&self, key: &str) -> Result<Option<String>, FormatError> {
        match self.encoding.encode(key) {
            Ok(bytes) => self.get(fnv1a_32(&bytes)),
            Err(_) => Ok(None),
        }
    }

    /// Translates `key`, falling back to `key` itself when no usable entry exists.
    #[must_use]
    pub fn translate<'k>(&self, key: &'k str) -> Cow<'k, str> {
        self.translate_or(key, key)
    }

    /// Translates `source` within `context`, falling back to `source` itself.
    ///
    /// The lookup key is `context + EOT + source`; an empty context looks up `source`.
    #[must_use]
    pub fn translate_context<'k>(&self, context: &str, source: &'k str) -> Cow<'k, str> {
        if context.is_empty() {
            return self.translate(source);
        }
        self.translate_or(&format!("{context}{CONTEXT_SEPARATOR}{source}"), source)
    }

    /// Looks up `key`, returning `fallback` on a miss or an undecodable payload.
    fn translate_or<'k>(&self, key: &str, fallback: &'k str) -> Cow<'k, str> {
        match self.lookup(key) {
            Ok(Some(translation)) => Cow::Owned(translation),
            Ok(None) => Cow::Borrowed(fallback),
            Err(e) => {
                tracing::warn!(key, error = %e, "Falling back to source text");
                Cow::Borrowed(fallback)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    /// Hand-built catalog: "Hello" → "Bonjour" in UTF-16LE.
    fn hello_catalog() -> Vec<u8> {
        let mut bytes = vec![1, 0];
        bytes.extend_from_slice(&0x7f98_a1d7_u32.to_le_bytes());
        bytes.extend_from_slice(&8_u16.to_le_bytes());
        bytes.extend_from_slice(&TextEncoding::Utf16Le.encode_terminated("Bonjour").unwrap());
        bytes
    }

    #[rstest]
    fn test_lookup_hit() {
        let data = hello_catalog();
        let view = CatalogView::parse(&data, TextEncoding::Utf16Le).unwrap();

        assert_that!(view.len(), eq(1));
        assert_that!(view.lookup("Hello"), ok(some(eq("Bonjour"))));
    }

    #[rstest]
    fn test_lookup_miss() {
        let data = hello_catalog();
        let view = CatalogView::parse(&data, TextEncoding::Utf16Le).unwrap();

        assert_that!(view.lookup("Goodbye"), ok(none()));
    }

    #[rstest]
    fn test_translate_falls_back_to_key() {
        let data = hello_catalog();
        let view = CatalogView::parse(&data, TextEncoding::Utf16Le).unwrap();

        assert_that!(view.translate("Hello"), eq("Bonjour"));
        assert_that!(view.translate("Goodbye"), eq("Goodbye"));
    }

    /// Hand-built catalog: "menu" EOT "Open" → "Ouvrir" in UTF-16LE.
    fn menu_open_catalog() -> Vec<u8> {
        let key = TextEncoding::Utf16Le.encode("menu\u{4}Open").unwrap();
        let mut bytes = vec![1, 0];
        bytes.extend_from_slice(&fnv1a_32(&key).to_le_bytes());
        bytes.extend_from_slice(&8_u16.to_le_bytes());
        bytes.extend_from_slice(&TextEncoding::Utf16Le.encode_terminated("Ouvrir").unwrap());
        bytes
    }

    #[rstest]
    fn test_translate_context_hit() {
        let data = menu_open_catalog();
        let view = CatalogView::parse(&data, TextEncoding::Utf16Le).unwrap();

        assert_that!(view.translate_context("menu", "Open"), eq("Ouvrir"));
    }

    #[rstest]
    #[case::other_context("state", "Open")]
    #[case::other_source("menu", "Close")]
    #[case::no_context("", "Open")]
    fn test_translate_context_miss_falls_back_to_source(
        #[case] context: &str,
        #[case] source: &str,
    ) {
        let data = menu_open_catalog();
        let view = CatalogView::parse(&data, TextEncoding::Utf16Le).unwrap();

        let translated = view.translate_context(context, source);

        assert!(!translated.contains('\u{4}'));
        assert_that!(translated, eq(source));
    }

    #[rstest]
    fn test_lookup_with_wrong_encoding_misses() {
        let data = hello_catalog();
        let view = CatalogView::parse(&data, TextEncoding::Utf16Be).unwrap();

        assert_that!(view.lookup("Hello"), ok(none()));
    }

    #[rstest]
    fn test_parse_empty_catalog() {
        let view = CatalogView::parse(&[0, 0], TextEncoding::Utf16Le).unwrap();

        assert!(view.is_empty());
    }

    #[rstest]
    #[case::no_count(vec![], 2)]
    #[case::half_count(vec![1], 2)]
    #[case::short_index(vec![1, 0, 0xd7, 0xa1], 8)]
    fn test_parse_truncated(#[case] data: Vec<u8>, #[case] expected: usize) {
        let result = CatalogView::parse(&data, TextEncoding::Utf16Le);

        assert_that!(
            result.map(|v| v.len()),
            err(eq(&FormatError::Truncated { expected, actual: data.len() }))
        );
    }

    #[rstest]
    fn test_index_entry_decodes_little_endian() {
        let entry = CatalogView::index_entry(&[0x44, 0x33, 0x22, 0x11, 0x08, 0x01]);

        assert_that!(entry, some(eq(IndexEntry { fingerprint: 0x1122_3344, offset: 0x0108 })));
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::fingerprint_only(&[1, 2, 3, 4])]
    #[case::half_offset(&[1, 2, 3, 4, 5])]
    fn test_index_entry_short_record(#[case] record: &[u8]) {
        assert_that!(CatalogView::index_entry(record), none());
    }

    #[rstest]
    fn test_parse_offset_past_end() {
        let mut data = hello_catalog();
        data[6] = 0xff;

        let result = CatalogView::parse(&data, TextEncoding::Utf16Le);

        assert!(matches!(result, Err(FormatError::OffsetOutOfBounds { offset: 0xff, .. })));
    }

    #[rstest]
    fn test_parse_offset_into_header() {
        let mut data = hello_catalog();
        data[6] = 2;

        let result = CatalogView::parse(&data, TextEncoding::Utf16Le);

        assert!(matches!(result, Err(FormatError::OffsetOutOfBounds { offset: 2, .. })));
    }

    #[rstest]
    fn test_parse_missing_terminator() {
        let mut data = hello_catalog();
        data.truncate(data.len() - 2);

        let result = CatalogView::parse(&data, TextEncoding::Utf16Le);

        assert!(matches!(result, Err(FormatError::MissingTerminator { offset: 8, .. })));
    }
}
