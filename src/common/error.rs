//! Error handling for the ibzip library

use crate::storage::page_constants::{FIL_HEADER_SIZE, LOGICAL_PAGE_SIZE};
use thiserror::Error;

/// Common result type for ibzip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for page classification and decompression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Buffer smaller than the minimum FIL header size
    #[error("page too short: {0} bytes, header needs {min}", min = FIL_HEADER_SIZE)]
    TooShort(usize),
    /// Physical size outside the valid size-class set
    #[error("invalid physical page size: {0} bytes")]
    InvalidSize(usize),
    /// Header fields inconsistent or unreadable
    #[error("invalid page format: {0}")]
    InvalidPage(String),
    /// Caller-requested logical size differs from the fixed logical size
    #[error("unsupported logical page size: {0}, format fixes {fixed}", fixed = LOGICAL_PAGE_SIZE)]
    UnsupportedLogicalSize(usize),
    /// Output buffer below the logical page size
    #[error("output buffer too small: {got} bytes, need {need}")]
    BufferTooSmall {
        /// Bytes available in the caller's buffer
        got: usize,
        /// Bytes required
        need: usize,
    },
    /// The external decompression algorithm reported failure
    #[error("page decompression failed")]
    DecompressFailed,
    /// Caller asked to decompress a page that is not compressed
    #[error("page is not compressed")]
    NotCompressed,
    /// Scratch-buffer allocation failed
    #[error("out of memory")]
    OutOfMemory,
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(msg: S) -> Self {
        Error::Io(msg.into())
    }

    /// Create an invalid-page error
    pub fn invalid_page<S: Into<String>>(msg: S) -> Self {
        Error::InvalidPage(msg.into())
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this error rejects the input before any work is staged
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::DecompressFailed | Error::OutOfMemory | Error::Io(_))
    }

    /// Map to the stable numeric code used by the C API
    pub fn code(&self) -> i32 {
        match self {
            Error::TooShort(_) | Error::InvalidSize(_) | Error::UnsupportedLogicalSize(_) => -1,
            Error::NotCompressed => -2,
            Error::DecompressFailed => -3,
            Error::BufferTooSmall { .. } | Error::OutOfMemory => -4,
            Error::InvalidPage(_) | Error::Io(_) => -5,
        }
    }
}

/// Describe a numeric error code from the C API
pub fn error_string(code: i32) -> &'static str {
    match code {
        0 => "Success",
        -1 => "Invalid page size",
        -2 => "Page is not compressed",
        -3 => "Decompression failed",
        -4 => "Output buffer too small",
        -5 => "Invalid page format",
        _ => "Unknown error",
    }
}
