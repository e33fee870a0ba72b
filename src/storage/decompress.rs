//! Decompression dispatch - staging buffers and driving the external codec
//!
//! The dispatcher validates everything before it allocates or calls out, so
//! the only failure that can surface mid-call is the codec's own. Pages the
//! format defines no decompression for are copied through verbatim; that is
//! policy, not error suppression.

use crate::common::error::{Error, Result};
use crate::ibzip_debug;
use crate::storage::classify::{PageDisposition, classify};
use crate::storage::page_constants::{FIL_HEADER_SIZE, LOGICAL_PAGE_SIZE};
use crate::storage::page_header::FilHeader;
use crate::storage::size_class::SizeClass;
use crate::storage::zip::{ZipCodec, ZipDescriptor};

/// Dispatcher owning the scratch-buffer staging policy for one codec.
///
/// Stateless across calls: every invocation stages its own scratch buffer
/// and releases it before returning, so independent buffers may be processed
/// concurrently.
#[derive(Debug, Clone)]
pub struct ZipDecompressor<C: ZipCodec> {
    codec: C,
}

impl<C: ZipCodec> ZipDecompressor<C> {
    /// Create a dispatcher around a codec implementation
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Borrow the underlying codec
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Process a page at an explicit logical size.
    ///
    /// Copies uncompressed and non-decompressible input through verbatim and
    /// routes compressed index pages to the codec. Returns the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// `UnsupportedLogicalSize` unless `logical_size` is 16384,
    /// `BufferTooSmall` if `out` is below `logical_size`, `OutOfMemory` if
    /// scratch staging fails, `DecompressFailed` if the codec reports
    /// failure.
    pub fn process(&self, input: &[u8], out: &mut [u8], logical_size: usize) -> Result<usize> {
        if logical_size != LOGICAL_PAGE_SIZE {
            return Err(Error::UnsupportedLogicalSize(logical_size));
        }
        if out.len() < logical_size {
            return Err(Error::BufferTooSmall {
                got: out.len(),
                need: logical_size,
            });
        }

        let disposition = if input.len() >= logical_size {
            PageDisposition::Uncompressed
        } else if input.len() < FIL_HEADER_SIZE {
            // Too short to classify; handled like any other non-decompressible input
            PageDisposition::Invalid
        } else {
            let header = FilHeader::parse(input)?;
            classify(&header, input.len(), logical_size)
        };

        ibzip_debug!(
            "process: {} bytes in, disposition {:?}",
            input.len(),
            disposition
        );

        match disposition {
            PageDisposition::CompressedIndex => {
                self.decompress_index_page(input, out, logical_size)
            }
            _ => Ok(copy_through(input, out)),
        }
    }

    /// Process a page at the fixed logical size, auto-detecting compression
    pub fn process_page(&self, input: &[u8], out: &mut [u8]) -> Result<usize> {
        self.process(input, out, LOGICAL_PAGE_SIZE)
    }

    /// Decompress a page the caller asserts is compressed.
    ///
    /// # Errors
    ///
    /// In addition to the `process` errors: `NotCompressed` when the input
    /// is already of logical size (a usage error, not data corruption),
    /// `InvalidSize` when the input length is no valid compressed class.
    pub fn decompress_page(&self, input: &[u8], out: &mut [u8]) -> Result<usize> {
        if out.len() < LOGICAL_PAGE_SIZE {
            return Err(Error::BufferTooSmall {
                got: out.len(),
                need: LOGICAL_PAGE_SIZE,
            });
        }
        if input.len() >= LOGICAL_PAGE_SIZE {
            return Err(Error::NotCompressed);
        }

        let class = SizeClass::from_physical(input.len())?;
        debug_assert!(class.is_compressed());

        let header = FilHeader::parse(input)?;
        match classify(&header, input.len(), LOGICAL_PAGE_SIZE) {
            PageDisposition::CompressedIndex => {
                self.decompress_index_page(input, out, LOGICAL_PAGE_SIZE)
            }
            // No decompression procedure exists for these; hand back the
            // physical bytes unchanged
            _ => Ok(copy_through(input, out)),
        }
    }

    /// Stage aligned scratch memory and run the codec for one index page.
    ///
    /// The scratch buffer lives exactly as long as this call; it is released
    /// on success and failure alike.
    fn decompress_index_page(
        &self,
        input: &[u8],
        out: &mut [u8],
        logical_size: usize,
    ) -> Result<usize> {
        let class = SizeClass::from_physical(input.len())?;
        let ssize = class
            .shift_size()
            .ok_or(Error::InvalidSize(input.len()))?;

        // The codec requires output memory aligned to the logical page size;
        // over-allocate by 2x and carve the aligned region out of the middle.
        let mut scratch: Vec<u8> = Vec::new();
        scratch
            .try_reserve_exact(2 * logical_size)
            .map_err(|_| Error::OutOfMemory)?;
        scratch.resize(2 * logical_size, 0);

        let offset = scratch.as_ptr().align_offset(logical_size);
        let aligned = &mut scratch[offset..offset + logical_size];

        let mut descriptor = ZipDescriptor::new(input, ssize);
        if !self.codec.decompress_low(&mut descriptor, aligned, true) {
            return Err(Error::DecompressFailed);
        }

        out[..logical_size].copy_from_slice(aligned);
        Ok(logical_size)
    }
}

fn copy_through(input: &[u8], out: &mut [u8]) -> usize {
    let n = input.len().min(out.len());
    out[..n].copy_from_slice(&input[..n]);
    n
}
