//! Page classification - deciding how a page must be handled
//!
//! Classification is header-driven, not size-driven alone: a sub-logical
//! physical size is necessary but not sufficient evidence that a page can be
//! decompressed.

use crate::storage::page_header::FilHeader;
use crate::storage::page_type::PageType;
use crate::storage::size_class::SizeClass;
use serde::Serialize;

/// The classifier's decision about a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageDisposition {
    /// Physical size equals (or exceeds) the logical size - pass through
    Uncompressed,
    /// Compressed B-tree index page - the only kind the zip algorithm accepts
    CompressedIndex,
    /// Physically compressed, but not an index page; the format defines no
    /// decompression path, so the payload is treated as opaque
    CompressedOther,
    /// Physical size outside the valid class set
    Invalid,
}

impl PageDisposition {
    /// Check if this disposition describes a physically compressed page
    pub fn is_compressed(&self) -> bool {
        matches!(
            self,
            PageDisposition::CompressedIndex | PageDisposition::CompressedOther
        )
    }

    /// Check if the zip decompression algorithm applies
    pub fn is_decompressible(&self) -> bool {
        matches!(self, PageDisposition::CompressedIndex)
    }
}

/// Classify a page from its decoded header and physical size.
///
/// A physical size at or above `logical_size` is uncompressed regardless of
/// what the header claims; below it, the size must be one of the four
/// compressed classes and the page type decides decompressibility.
pub fn classify(header: &FilHeader, physical_size: usize, logical_size: usize) -> PageDisposition {
    if physical_size >= logical_size {
        return PageDisposition::Uncompressed;
    }

    match SizeClass::from_physical(physical_size) {
        Ok(class) if class.is_compressed() => {
            if header.page_type == PageType::Index as u16 {
                PageDisposition::CompressedIndex
            } else {
                PageDisposition::CompressedOther
            }
        }
        _ => PageDisposition::Invalid,
    }
}
