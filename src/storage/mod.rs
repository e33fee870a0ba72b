//! Storage layer - page parsing, classification, and decompression staging

pub mod classify;
pub mod decompress;
pub mod page_constants;
pub mod page_header;
pub mod page_info;
pub mod page_io;
pub mod page_type;
pub mod size_class;
pub mod zip;
