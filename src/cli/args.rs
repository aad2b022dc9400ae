//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{TimestampStyle, DEFAULT_DATABASE_NAME};

/// Convert a LastPass CSV export into a KeePass 2.x XML file
#[derive(Parser, Debug)]
#[command(name = "lastpass2keepass")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// LastPass CSV export to read. Reads standard input when omitted.
    #[arg(short, long = "input-file")]
    pub input_file: Option<PathBuf>,

    /// Where to write the KeePass XML. Writes to standard output when omitted.
    #[arg(short, long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Database name stored in the XML metadata.
    /// Defaults to the input file name, or "LastPass" when reading stdin.
    #[arg(long, value_parser = validate_database_name)]
    pub database_name: Option<String>,

    /// Timestamp format for all Times/Changed fields.
    /// "legacy" keeps the historical lastpasscsv2keepassxml format (12-hour clock, local time);
    /// "iso8601" writes UTC with a 24-hour clock.
    #[arg(long, value_enum, default_value_t = TimestampStyle::Legacy)]
    pub timestamp_style: TimestampStyle,

    /// Do not print the "Converted N records." summary
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Database name: the explicit flag, else the input file's base name,
    /// else the stdin default.
    pub fn database_name(&self) -> String {
        if let Some(name) = &self.database_name {
            return name.clone();
        }
        self.input_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string())
    }

    /// True when XML goes to a file, leaving the terminal free for status output.
    pub fn writes_to_file(&self) -> bool {
        self.output_file.is_some()
    }
}

/// Validator for the database name
fn validate_database_name(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("database name must not be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}
