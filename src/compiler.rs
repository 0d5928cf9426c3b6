//! Compiles translation entries into a [`CompiledCatalog`].
/// Insertion-ordered fingerprint table
mod table;

use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use self::table::{
    FingerprintTable,
    Insertion,
};
use crate::catalog::{
    TranslationEntry,
    read_po_file,
};
use crate::encoding::{
    EncodingError,
    TextEncoding,
};
use crate::error::Error;
use crate::hash::fnv1a_32;
use crate::ymo::{
    CompiledCatalog,
    IndexEntry,
    header_size,
};

/// Errors raised while building a compiled catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The lookup key or target of an entry cannot be encoded.
    #[error("Failed to encode entry '{key}': {source}")]
    Encoding {
        key: String,
        #[source]
        source: EncodingError,
    },

    /// The index count does not fit the 16-bit count field.
    #[error("Too many entries: {0} distinct fingerprints (maximum {max})", max = u16::MAX)]
    TooManyEntries(usize),

    /// A payload starts beyond what a 16-bit offset can address.
    #[error("Payload for '{key}' starts at byte {offset}, beyond the 16-bit offset limit")]
    OffsetOverflow { key: String, offset: usize },
}

/// Inputs that change the compiled output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Accept fuzzy entries that have a non-empty target.
    pub include_fuzzy: bool,
    /// Encoding for both hashed keys and payloads. Runtime lookups must use the same one.
    pub encoding: TextEncoding,
}

/// Counters describing one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileReport {
    /// Entries seen.
    pub total: usize,
    /// Entries that passed the eligibility filter.
    pub included: usize,
    /// Entries dropped by the eligibility filter.
    pub skipped: usize,
    /// The same lookup key appeared again and replaced the earlier target.
    pub duplicates: usize,
    /// Different lookup keys with the same fingerprint; the later one won.
    pub collisions: usize,
    /// Index records written.
    pub count: u16,
}

/// Compiles `entries` into a catalog.
///
/// # Errors
/// See [`compile_with_report`].
pub fn compile(
    entries: &[TranslationEntry],
    options: &CompileOptions,
) -> Result<CompiledCatalog, CompileError> {
    compile_with_report(entries, options).map(|(catalog, _)| catalog)
}

/// Compiles `entries` into a catalog and reports what happened to them.
///
/// Eligible entries are fingerprinted by their encoded lookup key. When two entries
/// share a fingerprint the later target replaces the earlier one, keeping the
/// earlier position.
///
/// # Errors
/// - An eligible entry contains text the encoding cannot represent
/// - More than `u16::MAX` distinct fingerprints
/// - A payload offset exceeds `u16::MAX`
pub fn compile_with_report(
    entries: &[TranslationEntry],
    options: &CompileOptions,
) -> Result<(CompiledCatalog, CompileReport), CompileError> {
    let mut report = CompileReport { total: entries.len(), ..CompileReport::default() };
    let mut table = FingerprintTable::new();

    for entry in entries {
        if !entry.is_eligible(options.include_fuzzy) {
            report.skipped += 1;
            continue;
        }
        report.included += 1;

        let key = entry.lookup_key();
        let encoding_error =
            |source: EncodingError| CompileError::Encoding { key: key.to_string(), source };
        let fingerprint = fnv1a_32(&options.encoding.encode(&key).map_err(encoding_error)?);
        let payload = options.encoding.encode_terminated(&entry.target).map_err(encoding_error)?;

        if let Insertion::Replaced { previous_key } =
            table.insert(fingerprint, key.to_string(), payload)
        {
            if previous_key == key {
                report.duplicates += 1;
                tracing::warn!(key = %key, "Duplicate entry, keeping the later translation");
            } else {
                report.collisions += 1;
                tracing::warn!(
                    fingerprint = format_args!("{fingerprint:#010x}"),
                    previous = %previous_key,
                    key = %key,
                    "Fingerprint collision, keeping the later translation"
                );
            }
        }
    }

    let catalog = layout(table)?;
    report.count = catalog.count();

    tracing::debug!(?report, "Compiled catalog");
    Ok((catalog, report))
}

/// Assigns sequential payload offsets after the header.
fn layout(table: FingerprintTable) -> Result<CompiledCatalog, CompileError> {
    let count = table.len();
    if u16::try_from(count).is_err() {
        return Err(CompileError::TooManyEntries(count));
    }

    let mut offset = header_size(count);
    let mut entries = Vec::with_capacity(count);
    let mut payloads = Vec::with_capacity(count);
    for slot in table.into_slots() {
        let Ok(short_offset) = u16::try_from(offset) else {
            return Err(CompileError::OffsetOverflow { key: slot.key, offset });
        };
        entries.push(IndexEntry { fingerprint: slot.fingerprint, offset: short_offset });
        offset += slot.payload.len();
        payloads.push(slot.payload);
    }

    Ok(CompiledCatalog::from_parts(entries, payloads))
}

/// Reads the PO catalog at `input`, compiles it, and writes the result to `output`.
///
/// `output` is replaced atomically; on failure any existing file is left untouched.
///
/// # Errors
/// - The catalog cannot be read or parsed
/// - Compilation fails
/// - The output cannot be written
pub fn compile_po_file(
    input: &Path,
    output: &Path,
    options: &CompileOptions,
) -> Result<CompileReport, Error> {
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        include_fuzzy = options.include_fuzzy,
        encoding = %options.encoding,
        "Compiling catalog"
    );

    let entries = read_po_file(input)?;
    let (catalog, report) = compile_with_report(&entries, options)?;
    catalog
        .write_atomic(output)
        .map_err(|source| Error::Write { path: output.display().to_string(), source })?;

    tracing::info!(
        count = report.count,
        skipped = report.skipped,
        collisions = report.collisions,
        bytes = catalog.byte_len(),
        "Compiled catalog written"
    );
    Ok(report)
}
