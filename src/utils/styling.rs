//! Terminal styling for status lines
//!
//! Everything here goes to stderr: stdout may be carrying the XML document.

use console::style;
use std::path::Path;

/// Print the input/output card shown before a file conversion
pub fn print_conversion_header(input: Option<&Path>, output: Option<&Path>) {
    eprintln!();
    eprintln!(
        " {} {}",
        style("◆").cyan().bold().for_stderr(),
        style("Converting LastPass export to KeePass XML")
            .bold()
            .for_stderr()
    );
    eprintln!(
        "   Input:  {}",
        style(describe_stream(input, "<stdin>")).dim().for_stderr()
    );
    eprintln!(
        "   Output: {}",
        style(describe_stream(output, "<stdout>")).dim().for_stderr()
    );
    eprintln!();
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!(
        "   {} {}",
        style("⚠").yellow().bold().for_stderr(),
        style(message).yellow().for_stderr()
    );
}

fn describe_stream(path: Option<&Path>, fallback: &str) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| fallback.to_string())
}
