//! Translation entries as read from a catalog.

use std::borrow::Cow;

/// Separator between context and source in a lookup key (gettext's EOT).
pub const CONTEXT_SEPARATOR: char = '\u{4}';

/// Review state of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    Untranslated,
    Translated,
    /// Translated but flagged for review.
    Fuzzy,
}

/// A single source → target pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    pub source: String,
    /// Disambiguating context (`msgctxt`).
    pub context: Option<String>,
    pub target: String,
    pub status: EntryStatus,
}

impl TranslationEntry {
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        status: EntryStatus,
    ) -> Self {
        Self { source: source.into(), context: None, target: target.into(), status }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Whether this entry goes into the compiled catalog.
    ///
    /// Fuzzy entries need `include_fuzzy` and a non-empty target. Everything not
    /// included falls back to the source string at runtime.
    #[must_use]
    pub fn is_eligible(&self, include_fuzzy: bool) -> bool {
        match self.status {
            EntryStatus::Translated => true,
            EntryStatus::Fuzzy => include_fuzzy && !self.target.is_empty(),
            EntryStatus::Untranslated => false,
        }
    }

    /// The text that is encoded and hashed: `context + EOT + source`, or just `source`.
    ///
    /// An empty context is treated as no context.
    #[must_use]
    pub fn lookup_key(&self) -> Cow<'_, str> {
        match self.context.as_deref() {
            Some(context) if !context.is_empty() => {
                Cow::Owned(format!("{context}{CONTEXT_SEPARATOR}{}", self.source))
            }
            _ => Cow::Borrowed(&self.source),
        }
    }
}
