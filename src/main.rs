//! lastpass2keepass: LastPass CSV to KeePass XML converter
//!
//! Reads a LastPass export from a file or stdin and writes KeePass XML to a
//! file or stdout.

use anyhow::Result;
use clap::Parser;

use lastpass2keepass::cli::{run_convert, Cli, ConvertOptions};
use lastpass2keepass::utils::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ConvertOptions::from(&cli);
    let summary = run_convert(&options)?;

    if !cli.quiet {
        println!("Converted {} records.", summary.records);
    }

    Ok(())
}
