//! CLI module - argument parsing and stream setup

mod args;
pub mod convert;

pub use args::Cli;
pub use convert::{open_input, open_output, progress_enabled, run_convert, ConvertOptions};
