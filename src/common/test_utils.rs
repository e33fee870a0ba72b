//! Test utilities for the ibzip library

use crate::common::Result;
use crate::storage::page_constants::{
    FIL_HEADER_SIZE, FIL_PAGE_OFFSET, FIL_PAGE_SPACE_ID, FIL_PAGE_TYPE, PageNo, SpaceId,
};
use crate::storage::zip::{ZipCodec, ZipDescriptor};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

static TEST_LOGGER_INIT: Once = Once::new();

/// Initialize logging for tests
pub fn init_test_logging() {
    TEST_LOGGER_INIT.call_once(|| {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    });
}

/// Temporary directory helper for tests
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    /// Create a new temporary directory
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let path = std::env::temp_dir().join(format!("ibzip_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path)?;

        Ok(Self { path })
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a file path within the temporary directory
    pub fn file_path<S: AsRef<str>>(&self, filename: S) -> PathBuf {
        self.path.join(filename.as_ref())
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Build a page buffer with a plausible FIL header and patterned body.
///
/// Fields not passed in stay zero; the body after the header is filled with
/// a position-derived pattern so copies can be verified byte for byte.
pub fn build_page(page_type: u16, page_no: PageNo, space_id: SpaceId, size: usize) -> Vec<u8> {
    let mut page = vec![0u8; size];
    if size >= FIL_HEADER_SIZE {
        page[FIL_PAGE_OFFSET..FIL_PAGE_OFFSET + 4].copy_from_slice(&page_no.to_be_bytes());
        page[FIL_PAGE_TYPE..FIL_PAGE_TYPE + 2].copy_from_slice(&page_type.to_be_bytes());
        page[FIL_PAGE_SPACE_ID..FIL_PAGE_SPACE_ID + 4].copy_from_slice(&space_id.to_be_bytes());
        for (i, byte) in page.iter_mut().enumerate().skip(FIL_HEADER_SIZE) {
            *byte = (i % 251) as u8;
        }
    }
    page
}

/// Recording stand-in for the external decompression algorithm.
///
/// Records what the dispatcher handed it - call count, the descriptor's
/// shift code, whether the output region arrived aligned and zeroed - and
/// either fills the output or reports failure.
pub struct StubZipCodec {
    succeed: bool,
    fill: u8,
    calls: AtomicU64,
    last_ssize: AtomicU32,
    saw_aligned: AtomicBool,
    saw_zeroed: AtomicBool,
}

impl StubZipCodec {
    /// Stub that reports success and fills the output with `0x5A`
    pub fn succeeding() -> Self {
        Self::with_fill(0x5A)
    }

    /// Stub that reports success and fills the output with the given byte
    pub fn with_fill(fill: u8) -> Self {
        Self {
            succeed: true,
            fill,
            calls: AtomicU64::new(0),
            last_ssize: AtomicU32::new(u32::MAX),
            saw_aligned: AtomicBool::new(false),
            saw_zeroed: AtomicBool::new(false),
        }
    }

    /// Stub that reports failure without touching the output
    pub fn failing() -> Self {
        Self {
            succeed: false,
            ..Self::succeeding()
        }
    }

    /// Number of times the dispatcher invoked the codec
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Shift code seen on the most recent call
    pub fn last_ssize(&self) -> Option<u32> {
        match self.last_ssize.load(Ordering::SeqCst) {
            u32::MAX => None,
            ssize => Some(ssize),
        }
    }

    /// Whether every output region so far started at an aligned address
    pub fn saw_aligned_output(&self) -> bool {
        self.saw_aligned.load(Ordering::SeqCst)
    }

    /// Whether every output region so far arrived zeroed
    pub fn saw_zeroed_output(&self) -> bool {
        self.saw_zeroed.load(Ordering::SeqCst)
    }
}

impl ZipCodec for StubZipCodec {
    fn decompress_low(&self, zip: &mut ZipDescriptor<'_>, page: &mut [u8], _full: bool) -> bool {
        let first_call = self.calls.fetch_add(1, Ordering::SeqCst) == 0;
        self.last_ssize.store(zip.ssize, Ordering::SeqCst);

        let aligned = page.as_ptr() as usize % page.len() == 0;
        let zeroed = page.iter().all(|&b| b == 0);
        if first_call {
            self.saw_aligned.store(aligned, Ordering::SeqCst);
            self.saw_zeroed.store(zeroed, Ordering::SeqCst);
        } else {
            self.saw_aligned.fetch_and(aligned, Ordering::SeqCst);
            self.saw_zeroed.fetch_and(zeroed, Ordering::SeqCst);
        }

        if self.succeed {
            page.fill(self.fill);
        }
        self.succeed
    }
}

/// Assert that two byte slices are equal with better error messages
///
/// # Panics
///
/// Panics if the byte slices differ in length or content.
pub fn assert_bytes_equal(actual: &[u8], expected: &[u8], context: &str) {
    assert!(
        actual.len() == expected.len(),
        "{context}: Length mismatch - actual: {}, expected: {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            a == e,
            "{context}: Byte mismatch at index {i}: actual 0x{a:02x}, expected 0x{e:02x}"
        );
    }
}
