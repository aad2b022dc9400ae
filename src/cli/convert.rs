//! Stream handling around the conversion pipeline

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::Term;
use tracing::debug;

use super::args::Cli;
use crate::error::{ConvertError, ConvertResult};
use crate::pipeline::{convert, ConversionSummary, RunContext, TimestampStyle};
use crate::utils::{create_spinner, finish_with_success, print_conversion_header, print_warning};

/// Settings for one run, resolved from the command line.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub database_name: String,
    pub timestamp_style: TimestampStyle,
    /// Show the header card and spinner on stderr
    pub show_progress: bool,
}

impl From<&Cli> for ConvertOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            input: cli.input_file.clone(),
            output: cli.output_file.clone(),
            database_name: cli.database_name(),
            timestamp_style: cli.timestamp_style,
            show_progress: progress_enabled(
                cli.writes_to_file(),
                cli.quiet,
                Term::stderr().is_term(),
            ),
        }
    }
}

/// Status output only makes sense when stdout is free and stderr is a terminal.
pub fn progress_enabled(writes_to_file: bool, quiet: bool, stderr_is_term: bool) -> bool {
    writes_to_file && !quiet && stderr_is_term
}

/// Open the input, or stdin when no path is given.
///
/// Directories are rejected here: `File::open` accepts them on Unix and the
/// failure would otherwise surface only after the output was truncated.
pub fn open_input(path: Option<&Path>) -> ConvertResult<Box<dyn Read>> {
    match path {
        Some(path) => {
            let open_error = |source| ConvertError::OpenInput {
                path: path.to_path_buf(),
                source,
            };
            let file = File::open(path).map_err(open_error)?;
            if file.metadata().map_err(open_error)?.is_dir() {
                return Err(open_error(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "is a directory",
                )));
            }
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Create (or truncate) the output, or use stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> ConvertResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| ConvertError::OpenOutput {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Run a conversion with both streams opened up front.
///
/// Either open failure aborts before anything is written. The streams are
/// closed when this function returns, on success and on error alike.
pub fn run_convert(options: &ConvertOptions) -> Result<ConversionSummary> {
    let ctx = RunContext::now(options.database_name.clone(), options.timestamp_style);
    debug!(
        database = ctx.database_name(),
        timestamp = ctx.timestamp(),
        "run context"
    );

    let input = open_input(options.input.as_deref())?;
    let output = open_output(options.output.as_deref())?;

    if options.show_progress {
        print_conversion_header(options.input.as_deref(), options.output.as_deref());
    }

    let spinner = options
        .show_progress
        .then(|| create_spinner("Converting entries..."));

    let summary = convert(input, output, &ctx).with_context(|| match &options.input {
        Some(path) => format!("Failed to convert {}", path.display()),
        None => "Failed to convert standard input".to_string(),
    })?;

    if let Some(spinner) = spinner {
        finish_with_success(
            &spinner,
            &format!(
                "Wrote {} entries in {} group(s)",
                summary.records, summary.groups
            ),
        );
        if summary.records == 0 {
            print_warning("The export contained no entries");
        }
    }

    Ok(summary)
}
