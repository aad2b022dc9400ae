//! LastPass CSV export reader
//!
//! The first row is the header. Column names are matched case-insensitively;
//! a column the export lacks reads as an empty value for every row.

use std::collections::HashMap;
use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};
use tracing::debug;

use super::record::{Record, SourceRow};
use crate::error::{ConvertError, ConvertResult};

pub const COLUMN_GROUPING: &str = "grouping";
pub const COLUMN_URL: &str = "url";
pub const COLUMN_USERNAME: &str = "username";
pub const COLUMN_PASSWORD: &str = "password";
pub const COLUMN_EXTRA: &str = "extra";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_TAGS: &str = "tags";

/// Columns every LastPass export is expected to carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COLUMN_GROUPING,
    COLUMN_URL,
    COLUMN_USERNAME,
    COLUMN_PASSWORD,
    COLUMN_EXTRA,
    COLUMN_NAME,
];

/// Maps lower-cased column names to their position in a row.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    /// Build the map from the header row.
    ///
    /// When a name repeats, the last occurrence wins.
    pub fn from_record(header: &ByteRecord) -> Self {
        let columns = header
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                let name = String::from_utf8_lossy(raw);
                let name = name.trim_start_matches('\u{feff}').to_lowercase();
                (name, idx)
            })
            .collect();
        Self { columns }
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.get(column).copied()
    }

    /// Required columns absent from the header.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .into_iter()
            .filter(|c| !self.columns.contains_key(*c))
            .collect()
    }

    /// Value of `column` in `row`; empty when the column or cell is absent.
    pub fn field(&self, row: &ByteRecord, column: &str) -> String {
        self.index_of(column)
            .and_then(|idx| row.get(idx))
            .map(|raw| String::from_utf8_lossy(raw).into_owned())
            .unwrap_or_default()
    }

    /// Convert one data row.
    pub fn to_source_row(&self, row: &ByteRecord) -> SourceRow {
        let tags = Some(self.field(row, COLUMN_TAGS)).filter(|t| !t.is_empty());

        SourceRow {
            grouping: self.field(row, COLUMN_GROUPING),
            record: Record {
                title: self.field(row, COLUMN_NAME),
                url: self.field(row, COLUMN_URL),
                username: self.field(row, COLUMN_USERNAME),
                password: self.field(row, COLUMN_PASSWORD),
                notes: self.field(row, COLUMN_EXTRA),
                tags,
            },
        }
    }
}

/// Read a whole export into rows, in input order.
///
/// Rows with too few or too many cells are accepted as-is. Blank lines are
/// skipped and never produce a row.
pub fn read_export<R: Read>(input: R) -> ConvertResult<Vec<SourceRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut record = ByteRecord::new();
    if !reader.read_byte_record(&mut record)? {
        return Err(ConvertError::EmptyInput);
    }

    let header = HeaderMap::from_record(&record);
    let missing = header.missing_required();
    if !missing.is_empty() {
        debug!(?missing, "export header lacks columns, fields will be empty");
    }

    let mut rows = Vec::new();
    while reader.read_byte_record(&mut record)? {
        rows.push(header.to_source_row(&record));
    }

    debug!(rows = rows.len(), "read export");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_case_insensitive() {
        let header = HeaderMap::from_record(&ByteRecord::from(vec!["URL", "UserName", "Name"]));
        assert_eq!(header.index_of("url"), Some(0));
        assert_eq!(header.index_of("username"), Some(1));
        assert_eq!(header.index_of("name"), Some(2));
    }

    #[test]
    fn test_header_strips_byte_order_mark() {
        let header = HeaderMap::from_record(&ByteRecord::from(vec!["\u{feff}url", "name"]));
        assert_eq!(header.index_of("url"), Some(0));
    }

    #[test]
    fn test_short_row_reads_empty() {
        let header = HeaderMap::from_record(&ByteRecord::from(vec!["name", "url", "extra"]));
        let row = header.to_source_row(&ByteRecord::from(vec!["Bank"]));
        assert_eq!(row.record.title, "Bank");
        assert_eq!(row.record.url, "");
        assert_eq!(row.record.notes, "");
    }
}
