//! Page I/O - reading physical pages out of tablespace files
//!
//! A tablespace file is a dense array of pages at one physical size, so a
//! page's byte offset is `page_no * physical_size`. Reads return owned
//! buffers; nothing here writes.

use crate::common::error::{Error, Result};
use crate::ibzip_warn;
use crate::storage::decompress::ZipDecompressor;
use crate::storage::page_constants::{LOGICAL_PAGE_SIZE, PageNo};
use crate::storage::size_class::SizeClass;
use crate::storage::zip::ZipCodec;
use memmap2::MmapOptions;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Calculate the byte offset of a page at the given physical size
pub fn page_offset(page_no: PageNo, physical_size: usize) -> u64 {
    u64::from(page_no) * physical_size as u64
}

/// Read one physical page from a file.
///
/// # Errors
///
/// Returns `Error::InvalidSize` for a physical size outside the valid class
/// set, or an I/O error if the seek or read fails.
pub fn read_page_at(file: &mut File, page_no: PageNo, physical_size: usize) -> Result<Vec<u8>> {
    let class = SizeClass::from_physical(physical_size)?;

    let mut buf = vec![0u8; class.physical_size()];
    file.seek(SeekFrom::Start(page_offset(page_no, physical_size)))?;
    file.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read one physical page through a memory mapping.
///
/// # Errors
///
/// Returns `Error::InvalidSize` for an invalid physical size, or an I/O
/// error if the file cannot be opened or mapped.
pub fn read_page_mmap<P: AsRef<Path>>(
    path: P,
    page_no: PageNo,
    physical_size: usize,
) -> Result<Vec<u8>> {
    let class = SizeClass::from_physical(physical_size)?;
    let file = File::open(path)?;

    // SAFETY: the mapping is read-only and private to this call; the file
    // handle outlives the map
    let mmap = unsafe {
        MmapOptions::new()
            .offset(page_offset(page_no, physical_size))
            .len(class.physical_size())
            .map(&file)?
    };

    Ok(mmap.to_vec())
}

/// Page reader over one tablespace file, optionally decompressing through a
/// codec.
///
/// Mirrors the write-side geometry: pages are stored back to back at the
/// configured physical size.
pub struct PageReader<C: ZipCodec> {
    file: File,
    physical_size: usize,
    decompressor: ZipDecompressor<C>,
    decompression_enabled: bool,
}

impl<C: ZipCodec> PageReader<C> {
    /// Create a reader over an open tablespace file.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSize` for a physical size outside the valid
    /// class set.
    pub fn new(file: File, physical_size: usize, codec: C) -> Result<Self> {
        SizeClass::from_physical(physical_size)?;
        Ok(Self {
            file,
            physical_size,
            decompressor: ZipDecompressor::new(codec),
            decompression_enabled: true,
        })
    }

    /// The physical page size this reader was configured with
    pub fn physical_size(&self) -> usize {
        self.physical_size
    }

    /// Borrow the codec behind the reader's dispatcher
    pub fn codec(&self) -> &C {
        self.decompressor.codec()
    }

    /// Turn automatic decompression off - raw physical bytes are returned
    pub fn disable_decompression(&mut self) {
        self.decompression_enabled = false;
    }

    /// Turn automatic decompression back on
    pub fn enable_decompression(&mut self) {
        self.decompression_enabled = true;
    }

    /// Read the raw physical bytes of a page.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the seek or read fails.
    pub fn read_raw(&mut self, page_no: PageNo) -> Result<Vec<u8>> {
        read_page_at(&mut self.file, page_no, self.physical_size)
    }

    /// Read a page in its logical form.
    ///
    /// Compressed index pages are decompressed; everything else passes
    /// through. When decompression fails the raw physical bytes are returned
    /// instead - some pages in a compressed tablespace are not compressed,
    /// and the caller still gets usable data.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying read fails.
    pub fn read_logical(&mut self, page_no: PageNo) -> Result<Vec<u8>> {
        let raw = self.read_raw(page_no)?;
        if !self.decompression_enabled || raw.len() >= LOGICAL_PAGE_SIZE {
            return Ok(raw);
        }

        let mut out = vec![0u8; LOGICAL_PAGE_SIZE];
        match self.decompressor.process_page(&raw, &mut out) {
            Ok(written) => {
                out.truncate(written);
                Ok(out)
            }
            Err(err) => {
                ibzip_warn!("decompression failed for page {page_no}: {err}, using raw bytes");
                Ok(raw)
            }
        }
    }
}
