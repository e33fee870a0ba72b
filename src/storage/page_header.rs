//! FIL header and trailer parsing
//!
//! Every page starts with a 38-byte FIL header and ends with an 8-byte FIL
//! trailer. All multi-byte fields are big-endian at fixed absolute offsets.

use crate::common::error::{Error, Result};
use crate::storage::page_constants::{
    FIL_HEADER_SIZE, FIL_NULL, FIL_PAGE_FILE_FLUSH_LSN, FIL_PAGE_LSN, FIL_PAGE_NEXT,
    FIL_PAGE_OFFSET, FIL_PAGE_PREV, FIL_PAGE_SPACE_ID, FIL_PAGE_SPACE_OR_CHKSUM, FIL_PAGE_TYPE,
    FIL_TRAILER_SIZE, PageNo, SpaceId,
};
use crate::storage::page_type::PageType;
use serde::Serialize;

fn be_u16(buf: &[u8], off: usize) -> u16 {
    u16::from_be_bytes([buf[off], buf[off + 1]])
}

fn be_u32(buf: &[u8], off: usize) -> u32 {
    u32::from_be_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]])
}

fn be_u64(buf: &[u8], off: usize) -> u64 {
    u64::from_be_bytes([
        buf[off],
        buf[off + 1],
        buf[off + 2],
        buf[off + 3],
        buf[off + 4],
        buf[off + 5],
        buf[off + 6],
        buf[off + 7],
    ])
}

/// Decoded FIL header - a read-only view over the first 38 bytes of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilHeader {
    /// Checksum, or a legacy space-id overlay on very old files
    pub checksum: u32,
    /// Page number within the tablespace
    pub page_number: PageNo,
    /// Previous page in the sibling list, `None` when the link is null
    pub prev: Option<PageNo>,
    /// Next page in the sibling list, `None` when the link is null
    pub next: Option<PageNo>,
    /// LSN of the page's last modification - opaque to this crate
    pub lsn: u64,
    /// Raw page type value; unknown values are preserved
    pub page_type: u16,
    /// Flush LSN - meaningful only in space 0, page 0
    pub flush_lsn: u64,
    /// Tablespace id
    pub space_id: SpaceId,
}

impl FilHeader {
    /// Decode the header from the start of a page buffer.
    ///
    /// Pure and allocation-free.
    ///
    /// # Errors
    ///
    /// Returns `Error::TooShort` if the buffer holds fewer than 38 bytes.
    pub fn parse(buf: &[u8]) -> Result<FilHeader> {
        if buf.len() < FIL_HEADER_SIZE {
            return Err(Error::TooShort(buf.len()));
        }

        let prev = be_u32(buf, FIL_PAGE_PREV);
        let next = be_u32(buf, FIL_PAGE_NEXT);

        Ok(FilHeader {
            checksum: be_u32(buf, FIL_PAGE_SPACE_OR_CHKSUM),
            page_number: be_u32(buf, FIL_PAGE_OFFSET),
            prev: (prev != FIL_NULL).then_some(prev),
            next: (next != FIL_NULL).then_some(next),
            lsn: be_u64(buf, FIL_PAGE_LSN),
            page_type: be_u16(buf, FIL_PAGE_TYPE),
            flush_lsn: be_u64(buf, FIL_PAGE_FILE_FLUSH_LSN),
            space_id: be_u32(buf, FIL_PAGE_SPACE_ID),
        })
    }

    /// The known page type, if the raw value is one we recognize
    pub fn kind(&self) -> Option<PageType> {
        PageType::from_raw(self.page_type)
    }
}

/// Decoded FIL trailer - the last 8 bytes of a page.
///
/// Surfaced for metadata display only; classification never consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilTrailer {
    /// Old-style checksum
    pub checksum: u32,
    /// Low 32 bits of the page LSN, cross-checked against the header by
    /// recovery tooling
    pub lsn_low32: u32,
}

impl FilTrailer {
    /// Decode the trailer from the end of a page buffer of any physical size.
    ///
    /// # Errors
    ///
    /// Returns `Error::TooShort` if the buffer holds fewer than 8 bytes.
    pub fn parse(buf: &[u8]) -> Result<FilTrailer> {
        if buf.len() < FIL_TRAILER_SIZE {
            return Err(Error::TooShort(buf.len()));
        }

        let off = buf.len() - FIL_TRAILER_SIZE;
        Ok(FilTrailer {
            checksum: be_u32(buf, off),
            lsn_low32: be_u32(buf, off + 4),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::page_constants::LOGICAL_PAGE_SIZE;

    fn sample_header_bytes() -> Vec<u8> {
        let mut buf = vec![0u8; FIL_HEADER_SIZE];
        buf[FIL_PAGE_SPACE_OR_CHKSUM..FIL_PAGE_OFFSET].copy_from_slice(&0xDEAD_BEEFu32.to_be_bytes());
        buf[FIL_PAGE_OFFSET..FIL_PAGE_PREV].copy_from_slice(&7u32.to_be_bytes());
        buf[FIL_PAGE_PREV..FIL_PAGE_NEXT].copy_from_slice(&6u32.to_be_bytes());
        buf[FIL_PAGE_NEXT..FIL_PAGE_LSN].copy_from_slice(&8u32.to_be_bytes());
        buf[FIL_PAGE_LSN..FIL_PAGE_TYPE].copy_from_slice(&0x0102_0304_0506_0708u64.to_be_bytes());
        buf[FIL_PAGE_TYPE..FIL_PAGE_FILE_FLUSH_LSN]
            .copy_from_slice(&(PageType::Index as u16).to_be_bytes());
        buf[FIL_PAGE_FILE_FLUSH_LSN..FIL_PAGE_SPACE_ID].copy_from_slice(&42u64.to_be_bytes());
        buf[FIL_PAGE_SPACE_ID..FIL_HEADER_SIZE].copy_from_slice(&99u32.to_be_bytes());
        buf
    }

    #[test]
    fn test_parse_big_endian_fields() {
        let header = FilHeader::parse(&sample_header_bytes()).unwrap();
        assert_eq!(header.checksum, 0xDEAD_BEEF);
        assert_eq!(header.page_number, 7);
        assert_eq!(header.prev, Some(6));
        assert_eq!(header.next, Some(8));
        assert_eq!(header.lsn, 0x0102_0304_0506_0708);
        assert_eq!(header.page_type, 17855);
        assert_eq!(header.kind(), Some(PageType::Index));
        assert_eq!(header.flush_lsn, 42);
        assert_eq!(header.space_id, 99);
    }

    #[test]
    fn test_parse_null_links() {
        let mut buf = sample_header_bytes();
        buf[FIL_PAGE_PREV..FIL_PAGE_NEXT].copy_from_slice(&FIL_NULL.to_be_bytes());
        buf[FIL_PAGE_NEXT..FIL_PAGE_LSN].copy_from_slice(&FIL_NULL.to_be_bytes());

        let header = FilHeader::parse(&buf).unwrap();
        assert_eq!(header.prev, None);
        assert_eq!(header.next, None);
    }

    #[test]
    fn test_parse_too_short() {
        assert_eq!(FilHeader::parse(&[]), Err(Error::TooShort(0)));
        assert_eq!(
            FilHeader::parse(&[0u8; FIL_HEADER_SIZE - 1]),
            Err(Error::TooShort(FIL_HEADER_SIZE - 1))
        );
    }

    #[test]
    fn test_parse_exactly_38_bytes() {
        let header = FilHeader::parse(&[0u8; FIL_HEADER_SIZE]).unwrap();
        assert_eq!(header.page_type, 0);
        assert_eq!(header.kind(), Some(PageType::Allocated));
        // An all-zero link field is a real page number, not the null sentinel
        assert_eq!(header.prev, Some(0));
    }

    #[test]
    fn test_trailer_reads_final_bytes() {
        let mut page = vec![0u8; LOGICAL_PAGE_SIZE];
        let off = LOGICAL_PAGE_SIZE - FIL_TRAILER_SIZE;
        page[off..off + 4].copy_from_slice(&0x1122_3344u32.to_be_bytes());
        page[off + 4..].copy_from_slice(&0x0506_0708u32.to_be_bytes());

        let trailer = FilTrailer::parse(&page).unwrap();
        assert_eq!(trailer.checksum, 0x1122_3344);
        assert_eq!(trailer.lsn_low32, 0x0506_0708);
    }

    #[test]
    fn test_trailer_on_compressed_physical_size() {
        // The trailer sits at the end of whatever physical buffer we have
        let mut page = vec![0u8; 8192];
        page[8188..].copy_from_slice(&0xABCD_EF01u32.to_be_bytes());
        let trailer = FilTrailer::parse(&page).unwrap();
        assert_eq!(trailer.lsn_low32, 0xABCD_EF01);

        assert_eq!(FilTrailer::parse(&[0u8; 7]), Err(Error::TooShort(7)));
    }
}
