//! Reads gettext PO catalogs into [`TranslationEntry`] values.

use std::io::Write;
use std::path::Path;

use polib::message::MessageView;
use polib::po_file;
use thiserror::Error;

use super::{
    EntryStatus,
    TranslationEntry,
};

/// Errors raised while reading a catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid PO syntax.
    #[error("Failed to parse catalog '{path}': {message}")]
    Parse { path: String, message: String },
}

/// Header entry handed to polib in place of the catalog's own.
///
/// polib requires every one of these fields and a parseable `Plural-Forms`. None of
/// the values affect compilation.
const STANDARD_HEADER: &str = concat!(
    "msgid \"\"\n",
    "msgstr \"\"\n",
    "\"Project-Id-Version: PACKAGE VERSION\\n\"\n",
    "\"POT-Creation-Date: YEAR-MO-DA HO:MI+ZONE\\n\"\n",
    "\"PO-Revision-Date: YEAR-MO-DA HO:MI+ZONE\\n\"\n",
    "\"Last-Translator: FULL NAME <EMAIL@ADDRESS>\\n\"\n",
    "\"Language-Team: LANGUAGE <LL@li.org>\\n\"\n",
    "\"MIME-Version: 1.0\\n\"\n",
    "\"Content-Type: text/plain; charset=UTF-8\\n\"\n",
    "\"Content-Transfer-Encoding: 8bit\\n\"\n",
    "\"Language: und\\n\"\n",
    "\"Plural-Forms: nplurals=2; plural=(n != 1);\\n\"\n",
    "\n",
);

/// Keywords whose value is a quoted string on the same line.
const KEYWORDS: [&str; 4] = ["msgctxt ", "msgid ", "msgid_plural ", "msgstr"];

/// Reads every singular message of the PO file at `path`, in file order.
///
/// The header entry may be incomplete or missing. Plural messages and obsolete
/// (`#~`) entries are skipped.
///
/// # Errors
/// - The file does not exist or cannot be read
/// - The file is not valid PO syntax
pub fn read_po_file(path: &Path) -> Result<Vec<TranslationEntry>, CatalogError> {
    tracing::debug!(path = %path.display(), "Reading PO catalog");

    let io_error =
        |source: std::io::Error| CatalogError::Io { path: path.display().to_string(), source };
    let parse_error =
        |message: String| CatalogError::Parse { path: path.display().to_string(), message };

    let content = std::fs::read_to_string(path).map_err(io_error)?;
    let normalized = with_standard_header(&content).map_err(parse_error)?;

    let mut staged = tempfile::NamedTempFile::new().map_err(io_error)?;
    staged.write_all(normalized.as_bytes()).map_err(io_error)?;
    staged.flush().map_err(io_error)?;

    let catalog = po_file::parse(staged.path()).map_err(|e| parse_error(e.to_string()))?;

    let mut entries = Vec::new();
    for message in catalog.messages() {
        if message.is_plural() {
            tracing::debug!(msgid = message.msgid(), "Skipping plural message");
            continue;
        }
        if message.msgid().is_empty() {
            continue;
        }

        let target = message.msgstr().unwrap_or_default().to_string();
        let status = if message.is_fuzzy() {
            EntryStatus::Fuzzy
        } else if target.is_empty() {
            EntryStatus::Untranslated
        } else {
            EntryStatus::Translated
        };
        let context = Some(message.msgctxt()).filter(|c| !c.is_empty()).map(str::to_string);

        entries.push(TranslationEntry {
            source: message.msgid().to_string(),
            context,
            target,
            status,
        });
    }

    tracing::debug!(count = entries.len(), "Read PO catalog");
    Ok(entries)
}

/// Replaces the catalog's header entry (if any) with [`STANDARD_HEADER`].
///
/// Lines that would make polib slice outside a quoted string are rejected.
fn with_standard_header(content: &str) -> Result<String, String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut normalized = String::with_capacity(STANDARD_HEADER.len() + content.len() + 1);
    normalized.push_str(STANDARD_HEADER);

    let mut block: Vec<&str> = Vec::new();
    let mut first_entry_seen = false;
    for (number, line) in content.lines().chain(std::iter::once("")).enumerate() {
        let line = line.trim_end();
        if !line.is_empty() {
            check_line(line).map_err(|message| format!("line {}: {message}", number + 1))?;
            block.push(line);
            continue;
        }
        if block.is_empty() {
            continue;
        }

        let is_entry = block.iter().any(|l| l.starts_with("msgid "));
        let drop_block = is_entry && !first_entry_seen && is_header(&block);
        first_entry_seen |= is_entry;
        if drop_block {
            tracing::debug!("Replacing catalog header");
        } else {
            for l in &block {
                normalized.push_str(l);
                normalized.push('\n');
            }
            normalized.push('\n');
        }
        block.clear();
    }

    Ok(normalized)
}

/// Rejects keyword and continuation lines that do not carry a quoted string.
fn check_line(line: &str) -> Result<(), String> {
    let quoted = if line.starts_with('"') {
        Some(line)
    } else if KEYWORDS.iter().any(|k| line.starts_with(k)) {
        line.split_once(' ').map(|(_, value)| value.trim_start())
    } else {
        return Ok(());
    };

    match quoted {
        Some(value) if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') => {
            Ok(())
        }
        _ => Err(format!("expected a quoted string in '{line}'")),
    }
}

/// Whether `block` is a header entry: empty `msgid`, no context, not plural.
fn is_header(block: &[&str]) -> bool {
    let body: Vec<&str> = block.iter().copied().filter(|l| !l.starts_with('#')).collect();
    if body.iter().any(|l| l.starts_with("msgctxt ") || l.starts_with("msgid_plural ")) {
        return false;
    }
    let Some(start) = body.iter().position(|l| l.starts_with("msgid ")) else {
        return false;
    };

    body.iter()
        .skip(start)
        .enumerate()
        .take_while(|(i, l)| *i == 0 || l.starts_with('"'))
        .all(|(_, l)| l.trim_start_matches("msgid ").trim() == "\"\"")
}
