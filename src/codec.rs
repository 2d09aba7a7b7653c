//! Tabular text at the edges of the pipeline.
//!
//! Input is a plain comma-split table: no quoting or escaping, so a field
//! containing a comma shifts the rest of its row. Output is always-quoted
//! RFC-4180 with embedded quotes doubled.

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use tracing::debug;

use crate::error::{MergeError, Result};
use crate::types::MergeTable;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A decoded input table. Each row keeps its 1-based data line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<(usize, Vec<String>)>,
}

pub fn read_table(input: &[u8]) -> Result<RawTable> {
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
    if input.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(MergeError::EmptyInput);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(input);

    let mut records = reader.records();
    let (headers, header_line) = match records.next() {
        Some(Ok(record)) => (
            record.iter().map(str::to_string).collect::<Vec<_>>(),
            record.position().map_or(1, |p| p.line()),
        ),
        Some(Err(_)) => return Err(MergeError::MalformedRow { index: 0 }),
        None => return Err(MergeError::EmptyInput),
    };

    // Row indices count input lines after the header, blank lines included.
    let data_line = |line: Option<u64>, fallback: usize| {
        line.map_or(fallback, |l| l.saturating_sub(header_line) as usize)
    };

    let mut rows = Vec::new();
    for (i, record) in records.enumerate() {
        let record = record.map_err(|e| {
            let index = data_line(e.position().map(|p| p.line()), i + 1);
            debug!("Row {} could not be decoded: {}", index, e);
            MergeError::MalformedRow { index }
        })?;
        let index = data_line(record.position().map(|p| p.line()), i + 1);
        rows.push((index, record.iter().map(str::to_string).collect()));
    }

    debug!("Decoded table with {} columns and {} rows", headers.len(), rows.len());
    Ok(RawTable { headers, rows })
}

/// Serializes the header row followed by every output row, `\n`-terminated.
pub fn write_table(table: &MergeTable) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(table.header())?;
    for row in &table.rows {
        writer.write_record(row.to_record())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MergeError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| MergeError::Config(format!("Output is not valid UTF-8: {e}")))
}
