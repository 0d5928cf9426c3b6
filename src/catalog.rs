//! Translation catalog input.
/// Translation entry types
mod entry;
/// Gettext PO file reader
mod po;

pub use entry::{
    CONTEXT_SEPARATOR,
    EntryStatus,
    TranslationEntry,
};
pub use po::{
    CatalogError,
    read_po_file,
};
