//! Common utilities and error handling for the ibzip library

pub mod error;
pub mod logging;

pub mod test_utils;

pub use error::{Error, Result, error_string};
