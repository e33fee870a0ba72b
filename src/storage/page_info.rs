//! Metadata-only read path for callers that do not need page contents

use crate::common::error::{Error, Result};
use crate::storage::classify::classify;
use crate::storage::page_constants::{FIL_HEADER_SIZE, LOGICAL_PAGE_SIZE, PageNo, SpaceId};
use crate::storage::page_header::FilHeader;
use crate::storage::page_type::{PageType, is_compressed_page_type};
use crate::storage::size_class::SizeClass;
use serde::Serialize;

/// Summary of a page's identity and size relationship.
///
/// Immutable once constructed; valid independent of the buffer it was read
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Page number from the FIL header
    pub page_number: PageNo,
    /// Raw page type value
    pub page_type: u16,
    /// Tablespace id
    pub space_id: SpaceId,
    /// Whether the page is physically compressed
    pub is_compressed: bool,
    /// Bytes the page occupies on disk
    pub physical_size: usize,
    /// Bytes the page occupies once decompressed
    pub logical_size: usize,
}

impl PageInfo {
    /// The known page type, if the raw value is one we recognize
    pub fn kind(&self) -> Option<PageType> {
        PageType::from_raw(self.page_type)
    }
}

/// Extract a metadata summary from a raw page buffer.
///
/// The buffer's length is taken as the physical size. Never mutates the
/// input and never allocates.
///
/// # Errors
///
/// Returns `Error::TooShort` if the buffer cannot hold a FIL header.
pub fn get_page_info(data: &[u8]) -> Result<PageInfo> {
    if data.len() < FIL_HEADER_SIZE {
        return Err(Error::TooShort(data.len()));
    }

    let header = FilHeader::parse(data)?;
    let disposition = classify(&header, data.len(), LOGICAL_PAGE_SIZE);
    let is_compressed = disposition.is_compressed();

    Ok(PageInfo {
        page_number: header.page_number,
        page_type: header.page_type,
        space_id: header.space_id,
        is_compressed,
        physical_size: data.len(),
        logical_size: if is_compressed {
            LOGICAL_PAGE_SIZE
        } else {
            data.len()
        },
    })
}

/// Check whether a page buffer appears to be compressed.
///
/// Sub-logical buffers are compressed exactly when their length is a valid
/// compressed size class. Full-size buffers are reported compressed only
/// when the header carries a transparent-compression marker (type 14 or 16);
/// such pages are already page-sized and are never routed to the zip path.
///
/// # Errors
///
/// Returns `Error::TooShort` if the buffer cannot hold a FIL header.
pub fn is_page_compressed(data: &[u8]) -> Result<bool> {
    if data.len() < FIL_HEADER_SIZE {
        return Err(Error::TooShort(data.len()));
    }

    if data.len() < LOGICAL_PAGE_SIZE {
        return Ok(SizeClass::from_physical(data.len())
            .map(SizeClass::is_compressed)
            .unwrap_or(false));
    }

    let header = FilHeader::parse(data)?;
    Ok(is_compressed_page_type(header.page_type))
}
