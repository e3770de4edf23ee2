//! Command-line interface for greenmeter

pub mod args;

pub use args::Args;
