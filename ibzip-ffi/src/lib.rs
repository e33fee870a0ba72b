//! C FFI bindings for the ibzip library
//!
//! This crate provides a C-compatible API over page classification and
//! decompression staging, enabling integration with other languages. The
//! function surface and error codes follow `include/ibzip.h`.

use ibzip::{Error, get_page_info, is_page_compressed};
use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::slice;

/// Success return code
pub const IBZIP_SUCCESS: c_int = 0;
/// Invalid page or buffer size
pub const IBZIP_ERROR_INVALID_SIZE: c_int = -1;
/// Page is not compressed
pub const IBZIP_ERROR_NOT_COMPRESSED: c_int = -2;
/// The decompression algorithm reported failure
pub const IBZIP_ERROR_DECOMPRESS_FAILED: c_int = -3;
/// Output buffer below the logical page size
pub const IBZIP_ERROR_BUFFER_TOO_SMALL: c_int = -4;
/// Header fields inconsistent or unreadable
pub const IBZIP_ERROR_INVALID_PAGE: c_int = -5;

/// Page information structure
#[repr(C)]
pub struct IbzipPageInfo {
    /// Page number from the FIL header
    pub page_number: u32,
    /// Raw page type value
    pub page_type: u16,
    /// Tablespace id
    pub space_id: u32,
    /// 1 if compressed, 0 if not
    pub is_compressed: c_int,
    /// Bytes the page occupies on disk
    pub physical_size: usize,
    /// Bytes the page occupies once decompressed
    pub logical_size: usize,
}

fn error_code(err: &Error) -> c_int {
    err.code()
}

/// Check if a page appears to be compressed.
///
/// Returns 1 if compressed, 0 if not, and a negative error code for invalid
/// input.
///
/// # Safety
/// `page_data` must point to at least `page_size` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn ibzip_is_page_compressed(
    page_data: *const u8,
    page_size: usize,
) -> c_int {
    if page_data.is_null() {
        return IBZIP_ERROR_INVALID_SIZE;
    }

    let data = unsafe { slice::from_raw_parts(page_data, page_size) };
    match is_page_compressed(data) {
        Ok(true) => 1,
        Ok(false) => 0,
        Err(err) => error_code(&err),
    }
}

/// Get information about a page.
///
/// Returns 0 on success and a negative error code on failure.
///
/// # Safety
/// `page_data` must point to at least `page_size` readable bytes and `info`
/// must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn ibzip_get_page_info(
    page_data: *const u8,
    page_size: usize,
    info: *mut IbzipPageInfo,
) -> c_int {
    if page_data.is_null() || info.is_null() {
        return IBZIP_ERROR_INVALID_SIZE;
    }

    let data = unsafe { slice::from_raw_parts(page_data, page_size) };
    match get_page_info(data) {
        Ok(page_info) => {
            unsafe {
                *info = IbzipPageInfo {
                    page_number: page_info.page_number,
                    page_type: page_info.page_type,
                    space_id: page_info.space_id,
                    is_compressed: c_int::from(page_info.is_compressed),
                    physical_size: page_info.physical_size,
                    logical_size: page_info.logical_size,
                };
            }
            IBZIP_SUCCESS
        }
        Err(err) => error_code(&err),
    }
}

/// Decompress a compressed page into `output_buffer`.
///
/// Returns 0 on success and a negative error code on failure; on success
/// `bytes_written` receives the number of bytes produced.
///
/// # Safety
/// All pointers must be valid for the sizes given.
#[cfg(feature = "extern-zip")]
#[no_mangle]
pub unsafe extern "C" fn ibzip_decompress_page(
    compressed_data: *const u8,
    compressed_size: usize,
    output_buffer: *mut u8,
    output_size: usize,
    bytes_written: *mut usize,
) -> c_int {
    use ibzip::ZipDecompressor;
    use ibzip::storage::zip::ExternZipCodec;

    if compressed_data.is_null() || output_buffer.is_null() || bytes_written.is_null() {
        return IBZIP_ERROR_INVALID_SIZE;
    }

    let input = unsafe { slice::from_raw_parts(compressed_data, compressed_size) };
    let out = unsafe { slice::from_raw_parts_mut(output_buffer, output_size) };

    match ZipDecompressor::new(ExternZipCodec).decompress_page(input, out) {
        Ok(written) => {
            unsafe { *bytes_written = written };
            IBZIP_SUCCESS
        }
        Err(err) => error_code(&err),
    }
}

/// Process a page that might be compressed or uncompressed.
///
/// Returns 0 on success and a negative error code on failure; on success
/// `bytes_written` receives the number of bytes produced.
///
/// # Safety
/// All pointers must be valid for the sizes given.
#[cfg(feature = "extern-zip")]
#[no_mangle]
pub unsafe extern "C" fn ibzip_process_page(
    input_data: *const u8,
    input_size: usize,
    output_buffer: *mut u8,
    output_size: usize,
    bytes_written: *mut usize,
) -> c_int {
    use ibzip::ZipDecompressor;
    use ibzip::storage::zip::ExternZipCodec;

    if input_data.is_null() || output_buffer.is_null() || bytes_written.is_null() {
        return IBZIP_ERROR_INVALID_SIZE;
    }

    let input = unsafe { slice::from_raw_parts(input_data, input_size) };
    let out = unsafe { slice::from_raw_parts_mut(output_buffer, output_size) };

    match ZipDecompressor::new(ExternZipCodec).process_page(input, out) {
        Ok(written) => {
            unsafe { *bytes_written = written };
            IBZIP_SUCCESS
        }
        Err(err) => error_code(&err),
    }
}

/// Get a static string description of an error code
#[no_mangle]
pub extern "C" fn ibzip_error_string(error_code: c_int) -> *const c_char {
    let text: &'static [u8] = match error_code {
        IBZIP_SUCCESS => b"Success\0",
        IBZIP_ERROR_INVALID_SIZE => b"Invalid page size\0",
        IBZIP_ERROR_NOT_COMPRESSED => b"Page is not compressed\0",
        IBZIP_ERROR_DECOMPRESS_FAILED => b"Decompression failed\0",
        IBZIP_ERROR_BUFFER_TOO_SMALL => b"Output buffer too small\0",
        IBZIP_ERROR_INVALID_PAGE => b"Invalid page format\0",
        _ => b"Unknown error\0",
    };
    text.as_ptr().cast::<c_char>()
}

/// Get the ibzip library version
///
/// The caller must free the returned string with `ibzip_free_string`.
///
/// # Safety
/// The returned pointer must be freed with `ibzip_free_string`.
#[no_mangle]
pub extern "C" fn ibzip_version() -> *mut c_char {
    CString::new(ibzip::VERSION).unwrap().into_raw()
}

/// Get version components
///
/// # Safety
/// All non-null output parameters must be valid pointers.
#[no_mangle]
pub unsafe extern "C" fn ibzip_version_components(
    major: *mut u32,
    minor: *mut u32,
    patch: *mut u32,
) {
    if !major.is_null() {
        unsafe {
            *major = ibzip::VERSION_MAJOR;
        }
    }
    if !minor.is_null() {
        unsafe {
            *minor = ibzip::VERSION_MINOR;
        }
    }
    if !patch.is_null() {
        unsafe {
            *patch = ibzip::VERSION_PATCH;
        }
    }
}

/// Initialize the ibzip logging system
///
/// This should be called once at application startup.
#[no_mangle]
pub extern "C" fn ibzip_init_logging() {
    ibzip::common::logging::init();
}

/// Free a string allocated by ibzip
///
/// # Safety
/// The string must have been allocated by an ibzip FFI function. After
/// calling this function, the pointer is invalid and must not be used.
#[no_mangle]
pub unsafe extern "C" fn ibzip_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            let _ = CString::from_raw(s);
        }
    }
}
