//! Descriptor and boundary for the external zip decompression algorithm
//!
//! The modification-log replay that turns a physically compressed index page
//! back into its 16 KiB logical form lives in an external library. This
//! module owns everything that crosses that boundary: the binary-layout
//! descriptor handed to the algorithm and the trait the dispatcher calls
//! through.

use bytemuck::Zeroable;
use std::marker::PhantomData;

/// Compression descriptor passed to the external algorithm.
///
/// The layout is a fixed binary contract with the external library's ABI:
/// the data pointer and shift-size code are populated here, the remaining
/// bookkeeping words belong to the algorithm and are only ever
/// zero-initialized. The descriptor borrows the input buffer; it never owns
/// or frees it.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ZipDescriptor<'a> {
    /// Pointer to the physical page bytes
    pub data: *const u8,
    /// Shift-size code, `1024 << ssize` = physical size
    pub ssize: u32,
    /// Algorithm bookkeeping - end of the modification log
    pub m_end: u32,
    /// Algorithm bookkeeping - modification-log non-empty flag
    pub m_nonempty: u32,
    /// Algorithm bookkeeping - count of externally stored columns
    pub n_blobs: u32,
    _borrow: PhantomData<&'a [u8]>,
}

// SAFETY: the all-zero bit pattern is valid - a null data pointer and zeroed
// bookkeeping fields are exactly the descriptor's initial state
unsafe impl Zeroable for ZipDescriptor<'_> {}

impl<'a> ZipDescriptor<'a> {
    /// Build a descriptor over a physical page with the given shift code.
    ///
    /// Bookkeeping fields start zeroed and are never touched again by this
    /// crate.
    pub fn new(data: &'a [u8], ssize: u32) -> Self {
        let mut desc = Self::zeroed();
        desc.data = data.as_ptr();
        desc.ssize = ssize;
        desc
    }
}

/// Boundary trait for the external decompression algorithm.
///
/// `decompress_low` receives the descriptor, a zeroed output region whose
/// start is aligned to the logical page size, and the `full` flag; it
/// returns `true` on success. Implementations must not retain either buffer.
pub trait ZipCodec {
    /// Run the external algorithm for one page
    fn decompress_low(&self, zip: &mut ZipDescriptor<'_>, page: &mut [u8], full: bool) -> bool;
}

impl<C: ZipCodec + ?Sized> ZipCodec for &C {
    fn decompress_low(&self, zip: &mut ZipDescriptor<'_>, page: &mut [u8], full: bool) -> bool {
        (**self).decompress_low(zip, page, full)
    }
}

/// Binding to the real algorithm in `libinnodb_zipdecompress`.
#[cfg(feature = "extern-zip")]
pub mod extern_zip {
    use super::{ZipCodec, ZipDescriptor};
    use crate::storage::page_constants::LOGICAL_PAGE_SIZE;
    use parking_lot::Mutex;
    use std::os::raw::{c_ulong, c_void};

    // The library's legacy interface reads its page geometry from process
    // globals rather than from the descriptor, so every call must run under
    // one serialization point while they are set.
    static ZIP_ENV_LOCK: Mutex<()> = Mutex::new(());

    #[link(name = "innodb_zipdecompress", kind = "static")]
    extern "C" {
        // C++ symbol: bool page_zip_decompress_low(page_zip_des_t*, page_t*, bool)
        #[link_name = "_Z23page_zip_decompress_lowP14page_zip_des_tPhb"]
        fn page_zip_decompress_low(zip: *mut c_void, page: *mut u8, all: bool) -> bool;

        static mut srv_page_size: c_ulong;
        static mut srv_page_size_shift: c_ulong;
    }

    /// Codec backed by the external library
    #[derive(Debug, Default, Clone, Copy)]
    pub struct ExternZipCodec;

    impl ZipCodec for ExternZipCodec {
        fn decompress_low(&self, zip: &mut ZipDescriptor<'_>, page: &mut [u8], full: bool) -> bool {
            let _env = ZIP_ENV_LOCK.lock();
            // SAFETY: the lock above serializes access to the library's
            // globals; descriptor and output buffer outlive the call and the
            // library does not retain them
            unsafe {
                srv_page_size = LOGICAL_PAGE_SIZE as c_ulong;
                srv_page_size_shift = c_ulong::from(LOGICAL_PAGE_SIZE.trailing_zeros());
                page_zip_decompress_low(
                    (zip as *mut ZipDescriptor<'_>).cast::<c_void>(),
                    page.as_mut_ptr(),
                    full,
                )
            }
        }
    }
}

#[cfg(feature = "extern-zip")]
pub use extern_zip::ExternZipCodec;
