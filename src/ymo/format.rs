//! In-memory form of a compiled catalog and its serialization.

use std::io::{
    self,
    Write,
};
use std::path::Path;

/// Size of the leading `count` field.
pub const COUNT_SIZE: usize = 2;

/// Size of one `{fingerprint, offset}` index record.
pub const INDEX_ENTRY_SIZE: usize = 6;

/// Byte length of the count field plus an index of `count` records.
#[must_use]
pub const fn header_size(count: usize) -> usize {
    COUNT_SIZE + count * INDEX_ENTRY_SIZE
}

/// One index record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexEntry {
    pub fingerprint: u32,
    /// Absolute byte offset of the payload from the start of the file.
    pub offset: u16,
}

/// A fully laid-out catalog, ready to be written.
///
/// `entries[i].offset` always points at `payloads[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledCatalog {
    /// Index records in payload order.
    entries: Vec<IndexEntry>,
    /// Terminated payloads, parallel to `entries`.
    payloads: Vec<Vec<u8>>,
}

impl CompiledCatalog {
    /// Callers guarantee that offsets match the payload layout and that the
    /// count fits in `u16`.
    pub(crate) const fn from_parts(entries: Vec<IndexEntry>, payloads: Vec<Vec<u8>>) -> Self {
        Self { entries, payloads }
    }

    /// Number of index records.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn count(&self) -> u16 {
        self.entries.len() as u16
    }

    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    #[must_use]
    pub fn payloads(&self) -> &[Vec<u8>] {
        &self.payloads
    }

    #[must_use]
    pub const fn header_size(&self) -> usize {
        header_size(self.entries.len())
    }

    /// Total serialized size in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.header_size() + self.payloads.iter().map(Vec::len).sum::<usize>()
    }

    /// Writes the catalog to `writer`.
    ///
    /// # Errors
    /// Any error returned by `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        bytes.extend_from_slice(&self.count().to_le_bytes());
        for entry in &self.entries {
            bytes.extend_from_slice(&entry.fingerprint.to_le_bytes());
            bytes.extend_from_slice(&entry.offset.to_le_bytes());
        }
        for payload in &self.payloads {
            bytes.extend_from_slice(payload);
        }
        bytes
    }

    /// Writes the catalog to `path` through a temporary file in the same directory,
    /// renamed into place only once everything has been written.
    ///
    /// # Errors
    /// - The temporary file cannot be created or written
    /// - The rename fails
    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        self.write_to(file.as_file_mut())?;
        file.as_file().sync_all()?;
        file.persist(path)?;

        tracing::debug!(path = %path.display(), bytes = self.byte_len(), "Wrote compiled catalog");
        Ok(())
    }
}
