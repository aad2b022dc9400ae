//! Error types for the LastPass to KeePass conversion.
//!
//! Library functions return [`ConvertError`]; the binary wraps it in
//! `anyhow` and adds context for the user.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting an export.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input file could not be opened.
    ///
    /// Raised before any output is written.
    #[error("Could not open input file {}", path.display())]
    OpenInput {
        /// Path that was passed with `--input-file`
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created.
    #[error("Could not open output file {}", path.display())]
    OpenOutput {
        /// Path that was passed with `--output-file`
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input contained no header row.
    #[error("Input contains no header row")]
    EmptyInput,

    /// Reading the delimited input failed.
    #[error("Failed to read CSV input")]
    Csv(#[from] csv::Error),

    /// Rendering the XML document failed.
    #[error("Failed to render KeePass XML")]
    Xml(#[from] quick_xml::Error),

    /// Writing the finished document failed.
    #[error("Failed to write output")]
    Write(#[from] std::io::Error),
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
