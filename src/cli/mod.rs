//! Thin command-line shell around the generator library.

mod commands;

pub use commands::*;
