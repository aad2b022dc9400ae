//! Pipeline module - read, group and serialize an export

pub mod context;
pub mod grouper;
pub mod reader;
pub mod record;

pub use context::*;
pub use grouper::*;
pub use reader::*;
pub use record::*;

use std::io::{Read, Write};

use tracing::info;

use crate::error::ConvertResult;
use crate::export::write_document;

/// Outcome of a single conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Data rows read (header excluded)
    pub records: usize,
    /// Groups written, the default group included
    pub groups: usize,
}

/// Run the whole transform from an open input to an open output.
///
/// The document is rendered in memory and written in one go, so nothing
/// reaches `output` unless the input was read completely.
pub fn convert<R: Read, W: Write>(
    input: R,
    output: W,
    ctx: &RunContext,
) -> ConvertResult<ConversionSummary> {
    let rows = read_export(input)?;
    let records = rows.len();
    let grouped = group_records(rows);

    write_document(output, ctx, &grouped)?;

    let summary = ConversionSummary {
        records,
        groups: grouped.groups().len(),
    };
    info!(records = summary.records, groups = summary.groups, "conversion finished");
    Ok(summary)
}
