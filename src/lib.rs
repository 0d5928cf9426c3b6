//! ymo-compiler
//!
//! Compiles gettext PO catalogs into YMO files: a count, an index of FNV-1a
//! fingerprints of the encoded lookup keys, and the encoded translations.
//! Applications load the file as-is and find a translation by hashing the
//! string they are about to display.

pub mod catalog;
pub mod compiler;
pub mod config;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod ymo;

pub use compiler::{
    CompileOptions,
    CompileReport,
    compile,
    compile_po_file,
    compile_with_report,
};
pub use error::Error;
