//! ibzip - classification and staged decompression for InnoDB-format pages
//!
//! InnoDB stores 16 KiB logical pages, physically shrunk to 1/2/4/8 KiB when
//! a table uses compressed row format. This crate parses the fixed FIL
//! header, resolves the physical size class to its shift-size encoding,
//! decides whether a page can be decompressed at all, and stages the aligned
//! buffers the decompression algorithm requires. The byte-level algorithm
//! itself (modification-log replay) is an external collaborator behind the
//! [`storage::zip::ZipCodec`] trait.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

// Core modules
pub mod common;
pub mod storage;

// Re-exports for convenience
pub use common::{Error, Result, error_string};
pub use storage::classify::{PageDisposition, classify};
pub use storage::decompress::ZipDecompressor;
pub use storage::page_constants::LOGICAL_PAGE_SIZE;
pub use storage::page_header::{FilHeader, FilTrailer};
pub use storage::page_info::{PageInfo, get_page_info, is_page_compressed};
pub use storage::page_type::PageType;
pub use storage::size_class::SizeClass;
pub use storage::zip::{ZipCodec, ZipDescriptor};

/// Version information
pub const VERSION_MAJOR: u32 = 0;
/// Version information
pub const VERSION_MINOR: u32 = 1;
/// Version information
pub const VERSION_PATCH: u32 = 0;
/// Version string
pub const VERSION: &str = "0.1.0";

/// Library version string
pub fn version() -> &'static str {
    VERSION
}
