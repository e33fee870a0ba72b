//! Tests for tablespace page I/O

use ibzip::common::test_utils::{StubZipCodec, TempDir, build_page};
use ibzip::storage::page_io::{PageReader, page_offset, read_page_at, read_page_mmap};
use ibzip::{Error, LOGICAL_PAGE_SIZE, PageType, get_page_info};
use std::fs::File;
use std::io::Write;

fn write_file(dir: &TempDir, name: &str, pages: &[Vec<u8>]) -> std::path::PathBuf {
    let path = dir.file_path(name);
    let mut file = File::create(&path).unwrap();
    for page in pages {
        file.write_all(page).unwrap();
    }
    file.sync_all().unwrap();
    path
}

#[test]
fn test_page_offset_arithmetic() {
    assert_eq!(page_offset(0, 1024), 0);
    assert_eq!(page_offset(3, 1024), 3072);
    assert_eq!(page_offset(2, LOGICAL_PAGE_SIZE), 32768);
    // No overflow near the top of the page-number range
    assert_eq!(
        page_offset(u32::MAX, LOGICAL_PAGE_SIZE),
        u64::from(u32::MAX) * 16384
    );
}

#[test]
fn test_read_specific_pages() {
    let dir = TempDir::new().unwrap();
    let pages: Vec<Vec<u8>> = (0..4u32)
        .map(|i| build_page(PageType::Index as u16, i, 9, 2048))
        .collect();
    let path = write_file(&dir, "four.ibd", &pages);

    let mut file = File::open(&path).unwrap();
    for (i, expected) in pages.iter().enumerate() {
        let got = read_page_at(&mut file, i as u32, 2048).unwrap();
        assert_eq!(&got, expected, "page {i} mismatch");

        let info = get_page_info(&got).unwrap();
        assert_eq!(info.page_number, i as u32);
        assert_eq!(info.space_id, 9);
    }
}

#[test]
fn test_mmap_matches_file_reads() {
    let dir = TempDir::new().unwrap();
    let pages: Vec<Vec<u8>> = (0..3u32)
        .map(|i| build_page(PageType::UndoLog as u16, i, 1, 4096))
        .collect();
    let path = write_file(&dir, "mmap.ibd", &pages);

    let mut file = File::open(&path).unwrap();
    for i in 0..3u32 {
        assert_eq!(
            read_page_at(&mut file, i, 4096).unwrap(),
            read_page_mmap(&path, i, 4096).unwrap()
        );
    }
}

#[test]
fn test_read_past_end_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "one.ibd", &[build_page(0, 0, 0, 1024)]);

    let mut file = File::open(&path).unwrap();
    let err = read_page_at(&mut file, 5, 1024).unwrap_err();
    assert!(err.is_io(), "expected I/O error, got {err:?}");
}

#[test]
fn test_invalid_physical_size() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "odd.ibd", &[build_page(0, 0, 0, 1024)]);
    let mut file = File::open(&path).unwrap();

    assert_eq!(
        read_page_at(&mut file, 0, 1000).unwrap_err(),
        Error::InvalidSize(1000)
    );
    assert_eq!(
        read_page_mmap(&path, 0, 0).unwrap_err(),
        Error::InvalidSize(0)
    );
}

#[test]
fn test_reader_end_to_end_mixed_tablespace() {
    // A compressed tablespace holding system pages and one index page
    let dir = TempDir::new().unwrap();
    let pages = vec![
        build_page(PageType::FspHdr as u16, 0, 4, 8192),
        build_page(PageType::IbufBitmap as u16, 1, 4, 8192),
        build_page(PageType::Index as u16, 2, 4, 8192),
    ];
    let path = write_file(&dir, "mixed.ibd", &pages);

    let mut reader =
        PageReader::new(File::open(&path).unwrap(), 8192, StubZipCodec::with_fill(0x7E)).unwrap();
    assert_eq!(reader.physical_size(), 8192);

    // System pages come back at physical size, untouched
    assert_eq!(reader.read_logical(0).unwrap(), pages[0]);
    assert_eq!(reader.read_logical(1).unwrap(), pages[1]);

    // The index page is decompressed to logical size
    let logical = reader.read_logical(2).unwrap();
    assert_eq!(logical.len(), LOGICAL_PAGE_SIZE);
    assert!(logical.iter().all(|&b| b == 0x7E));

    // Raw access still sees the physical bytes
    assert_eq!(reader.read_raw(2).unwrap(), pages[2]);
}

#[test]
fn test_reader_uncompressed_tablespace() {
    let dir = TempDir::new().unwrap();
    let pages = vec![build_page(PageType::Index as u16, 0, 4, LOGICAL_PAGE_SIZE)];
    let path = write_file(&dir, "plain.ibd", &pages);

    let mut reader = PageReader::new(
        File::open(&path).unwrap(),
        LOGICAL_PAGE_SIZE,
        StubZipCodec::succeeding(),
    )
    .unwrap();

    // Full-size pages never touch the codec
    assert_eq!(reader.read_logical(0).unwrap(), pages[0]);
}
