//! Page type enumeration for the page kinds found in tablespace files

use serde::Serialize;
use std::fmt;

/// Known page types, by the 16-bit value at the FIL header's type field.
///
/// Tablespace files from newer servers may carry values outside this set;
/// headers therefore keep the raw `u16` and conversion is fallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum PageType {
    /// Freshly allocated page
    Allocated = 0,
    /// Undo log page
    UndoLog = 2,
    /// File segment inode page
    Inode = 3,
    /// Insert buffer free list page
    IbufFreeList = 4,
    /// Insert buffer bitmap page
    IbufBitmap = 5,
    /// System page
    Sys = 6,
    /// Transaction system page
    TrxSys = 7,
    /// File space header page
    FspHdr = 8,
    /// Extent descriptor page
    Xdes = 9,
    /// Uncompressed BLOB page
    Blob = 10,
    /// Compressed BLOB page
    Zblob = 11,
    /// Compressed BLOB page, continuation
    Zblob2 = 12,
    /// Transparently compressed page
    Compressed = 14,
    /// Encrypted page
    Encrypted = 15,
    /// Transparently compressed and encrypted page
    CompressedEncrypted = 16,
    /// Encrypted R-tree page
    EncryptedRtree = 17,
    /// Serialized dictionary information page
    Sdi = 17853,
    /// R-tree index page
    Rtree = 17854,
    /// B-tree index page - the only kind the zip decompression path accepts
    Index = 17855,
}

impl PageType {
    /// Look up a known page type from the raw header value
    pub fn from_raw(value: u16) -> Option<PageType> {
        match value {
            0 => Some(PageType::Allocated),
            2 => Some(PageType::UndoLog),
            3 => Some(PageType::Inode),
            4 => Some(PageType::IbufFreeList),
            5 => Some(PageType::IbufBitmap),
            6 => Some(PageType::Sys),
            7 => Some(PageType::TrxSys),
            8 => Some(PageType::FspHdr),
            9 => Some(PageType::Xdes),
            10 => Some(PageType::Blob),
            11 => Some(PageType::Zblob),
            12 => Some(PageType::Zblob2),
            14 => Some(PageType::Compressed),
            15 => Some(PageType::Encrypted),
            16 => Some(PageType::CompressedEncrypted),
            17 => Some(PageType::EncryptedRtree),
            17853 => Some(PageType::Sdi),
            17854 => Some(PageType::Rtree),
            17855 => Some(PageType::Index),
            _ => None,
        }
    }

    /// Check if this is the B-tree index page type
    pub fn is_index(&self) -> bool {
        matches!(self, PageType::Index)
    }

    /// Check if this is an index page of either tree flavor
    pub fn is_any_index(&self) -> bool {
        matches!(self, PageType::Index | PageType::Rtree)
    }

    /// Human-readable name for display and logs
    pub fn name(&self) -> &'static str {
        match self {
            PageType::Allocated => "allocated",
            PageType::UndoLog => "undo log",
            PageType::Inode => "inode",
            PageType::IbufFreeList => "ibuf free list",
            PageType::IbufBitmap => "ibuf bitmap",
            PageType::Sys => "system",
            PageType::TrxSys => "trx system",
            PageType::FspHdr => "fsp header",
            PageType::Xdes => "extent descriptor",
            PageType::Blob => "blob",
            PageType::Zblob => "zblob",
            PageType::Zblob2 => "zblob2",
            PageType::Compressed => "compressed",
            PageType::Encrypted => "encrypted",
            PageType::CompressedEncrypted => "compressed+encrypted",
            PageType::EncryptedRtree => "encrypted rtree",
            PageType::Sdi => "sdi",
            PageType::Rtree => "rtree index",
            PageType::Index => "btree index",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Check whether a raw page-type value carries a transparent-compression
/// marker (type 14 or 16). These pages are compressed by a mechanism this
/// crate does not decompress; the marker is only recognized.
pub fn is_compressed_page_type(raw: u16) -> bool {
    raw == PageType::Compressed as u16 || raw == PageType::CompressedEncrypted as u16
}
