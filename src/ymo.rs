//! The compiled catalog ("YMO") binary format.
//!
//! All integers are little-endian:
//!
//! | Offset          | Size          | Field                                       |
//! |-----------------|---------------|---------------------------------------------|
//! | 0               | 2             | `count` of index entries                    |
//! | 2               | `count` × 6   | index: `{fingerprint: u32, offset: u16}`    |
//! | 2 + `count` × 6 | variable      | payloads: encoded target + 2-byte zero unit |
/// Serialized catalog and writer
mod format;
/// Runtime-side reader and lookup
mod reader;

pub use format::{
    COUNT_SIZE,
    CompiledCatalog,
    INDEX_ENTRY_SIZE,
    IndexEntry,
    header_size,
};
pub use reader::{
    CatalogView,
    FormatError,
};
