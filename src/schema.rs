//! Input column discovery.

use crate::error::{Error, Result};
use csv::{Reader, StringRecord};
use std::io::{BufRead, BufReader, Chain, Cursor, Read};

/// Marker shown instead of a blank example value.
pub const EMPTY_EXAMPLE: &str = "<empty>";

/// Input with its first line read ahead and put back in front.
pub type Source<R> = Chain<Cursor<Vec<u8>>, BufReader<R>>;

/// Reject input whose first physical line is blank.
///
/// The csv reader skips blank lines, which would promote the first data row
/// to the header row.
pub fn check_header_line<R: Read>(source: R) -> Result<Source<R>> {
    let mut buffered = BufReader::new(source);
    let mut first_line = Vec::new();
    buffered.read_until(b'\n', &mut first_line)?;
    if first_line.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::EmptySchema);
    }
    Ok(Cursor::new(first_line).chain(buffered))
}

/// Columns of the input file, with one example value per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSchema {
    columns: Vec<String>,
    examples: Vec<String>,
}

impl InputSchema {
    /// Build a schema from header names and an optional preview row.
    ///
    /// Fails with [`Error::EmptySchema`] when there are no named columns.
    pub fn new(columns: Vec<String>, preview: Option<&StringRecord>) -> Result<Self> {
        if columns.iter().all(|name| name.trim().is_empty()) {
            return Err(Error::EmptySchema);
        }
        let examples = (0..columns.len())
            .map(|index| {
                preview
                    .and_then(|row| row.get(index))
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        Ok(Self { columns, examples })
    }

    /// Read the header row and the first data row from `reader`.
    ///
    /// The first data row is handed back to the caller so it can be replayed
    /// ahead of the remaining records.
    pub fn discover<R: Read>(reader: &mut Reader<R>) -> Result<(Self, Option<StringRecord>)> {
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if columns.iter().all(|name| name.trim().is_empty()) {
            return Err(Error::EmptySchema);
        }

        let mut record = StringRecord::new();
        let preview = if reader.read_record(&mut record)? {
            Some(record)
        } else {
            None
        };

        let schema = Self::new(columns, preview.as_ref())?;
        Ok((schema, preview))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Name of the column at `index` (0-based).
    pub fn column(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    /// Example value for the column at `index`, or `<empty>` when blank.
    pub fn example(&self, index: usize) -> &str {
        match self.examples.get(index) {
            Some(value) if !value.trim().is_empty() => value,
            _ => EMPTY_EXAMPLE,
        }
    }

    /// Numbered column listing used by the interactive mapping.
    pub fn listing(&self) -> String {
        let mut listing = String::new();
        for (index, name) in self.columns.iter().enumerate() {
            listing.push_str(&format!(
                "{}: {} (Example: {})\n",
                index + 1,
                name,
                self.example(index)
            ));
        }
        listing
    }
}
