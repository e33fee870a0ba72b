//! Physical size classes and the shift-size encoding
//!
//! This module is the single source of truth for the size/shift arithmetic.
//! The relationship is `physical = 1024 << shift` for the four compressed
//! classes (shift 0..=3); the full 16 KiB size is a distinct sentinel and is
//! never encoded through the doubling rule. No other module recomputes this
//! mapping.

use crate::common::error::{Error, Result};
use crate::storage::page_constants::LOGICAL_PAGE_SIZE;
use serde::Serialize;

/// Valid physical size classes for a page on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeClass {
    /// 1 KiB compressed page
    Zip1K,
    /// 2 KiB compressed page
    Zip2K,
    /// 4 KiB compressed page
    Zip4K,
    /// 8 KiB compressed page
    Zip8K,
    /// Full 16 KiB logical page
    Full,
}

impl SizeClass {
    /// All five valid size classes, smallest first
    pub const ALL: [SizeClass; 5] = [
        SizeClass::Zip1K,
        SizeClass::Zip2K,
        SizeClass::Zip4K,
        SizeClass::Zip8K,
        SizeClass::Full,
    ];

    /// The four compressed size classes
    pub const COMPRESSED: [SizeClass; 4] = [
        SizeClass::Zip1K,
        SizeClass::Zip2K,
        SizeClass::Zip4K,
        SizeClass::Zip8K,
    ];

    /// Resolve a physical byte count to its size class.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSize` for any byte count outside
    /// {1024, 2048, 4096, 8192, 16384}. Other sizes are never coerced.
    pub fn from_physical(bytes: usize) -> Result<SizeClass> {
        match bytes {
            1024 => Ok(SizeClass::Zip1K),
            2048 => Ok(SizeClass::Zip2K),
            4096 => Ok(SizeClass::Zip4K),
            8192 => Ok(SizeClass::Zip8K),
            LOGICAL_PAGE_SIZE => Ok(SizeClass::Full),
            _ => Err(Error::InvalidSize(bytes)),
        }
    }

    /// Physical byte count of this class - exact inverse of `from_physical`
    pub fn physical_size(self) -> usize {
        match self {
            SizeClass::Zip1K => 1024,
            SizeClass::Zip2K => 2048,
            SizeClass::Zip4K => 4096,
            SizeClass::Zip8K => 8192,
            SizeClass::Full => LOGICAL_PAGE_SIZE,
        }
    }

    /// Shift-size code for the decompression descriptor.
    ///
    /// `Some(s)` satisfies `1024 << s == physical_size()`; `None` for the
    /// full logical size, which has no shift encoding.
    pub fn shift_size(self) -> Option<u32> {
        match self {
            SizeClass::Zip1K => Some(0),
            SizeClass::Zip2K => Some(1),
            SizeClass::Zip4K => Some(2),
            SizeClass::Zip8K => Some(3),
            SizeClass::Full => None,
        }
    }

    /// Resolve a shift-size code back to its compressed class.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSize` for codes outside 0..=3; the full page
    /// size is not reachable through a shift code.
    pub fn from_shift_size(code: u32) -> Result<SizeClass> {
        match code {
            0 => Ok(SizeClass::Zip1K),
            1 => Ok(SizeClass::Zip2K),
            2 => Ok(SizeClass::Zip4K),
            3 => Ok(SizeClass::Zip8K),
            _ => Err(Error::InvalidSize(1024usize.checked_shl(code).unwrap_or(0))),
        }
    }

    /// Check if this class holds physically compressed pages
    pub fn is_compressed(self) -> bool {
        !matches!(self, SizeClass::Full)
    }
}
