//! Domain model for greenmeter
//!
//! Error types shared by the fetcher and the display.

pub mod errors;

pub use errors::{FetchError, TuiError};
