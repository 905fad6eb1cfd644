//! Merged-row CSV output.

use std::io::Write;

use crate::compare::format_date;
use crate::error::ReconError;
use crate::model::MergedRow;

pub const OUTPUT_HEADERS: [&str; 3] = ["Country", "Start Date", "End Date"];

/// Write the header and one fully quoted line per row, `\n`-terminated.
pub fn write_merged_csv<W: Write>(writer: W, rows: &[MergedRow]) -> Result<(), ReconError> {
    let mut csv = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(OUTPUT_HEADERS)
        .map_err(|e| ReconError::Io(e.to_string()))?;

    for row in rows {
        let start = format_date(row.start_date);
        let end = format_date(row.end_date);
        csv.write_record([row.country.as_str(), start.as_str(), end.as_str()])
            .map_err(|e| ReconError::Io(e.to_string()))?;
    }

    csv.flush().map_err(|e| ReconError::Io(e.to_string()))?;
    Ok(())
}

/// Render the merged CSV into a string.
pub fn render_merged_csv(rows: &[MergedRow]) -> Result<String, ReconError> {
    let mut buf = Vec::new();
    write_merged_csv(&mut buf, rows)?;
    String::from_utf8(buf).map_err(|e| ReconError::Io(e.to_string()))
}
