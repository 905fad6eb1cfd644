//! Row loading and common-country filtering.

use crate::compare::parse_date;
use crate::config::{ColumnMapping, FilterMode};
use crate::error::ReconError;
use crate::model::{CountryDateRow, CountrySet};

/// Parse one source's CSV text into dated rows, keyed by header names.
///
/// Text with no header at all yields no rows, mirroring the country-set
/// extractor's treatment of empty files.
pub fn load_rows(
    source: &str,
    data: &str,
    columns: &ColumnMapping,
) -> Result<Vec<CountryDateRow>, ReconError> {
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let malformed = |line: usize, err: csv::Error| ReconError::MalformedRow {
        source: source.into(),
        line,
        reason: err.to_string(),
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| malformed(1, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            ReconError::MissingColumn {
                source: source.into(),
                column: name.into(),
            }
        })
    };

    let country_idx = idx(&columns.country)?;
    let start_idx = idx(&columns.start_date)?;
    let end_idx = idx(&columns.end_date)?;

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| {
            let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
            malformed(line, e)
        })?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        let date_at = |i: usize| {
            let value = record.get(i).unwrap_or("");
            parse_date(value).map_err(|cause| ReconError::DateParse {
                source: source.into(),
                line,
                value: value.into(),
                cause,
            })
        };

        rows.push(CountryDateRow {
            country: record.get(country_idx).unwrap_or("").to_string(),
            start_date: date_at(start_idx)?,
            end_date: date_at(end_idx)?,
            line,
        });
    }

    log::debug!("{source}: loaded {} rows", rows.len());
    Ok(rows)
}

/// Drop rows whose country is not admissible. Order of kept rows is preserved.
pub fn filter_rows(
    rows: Vec<CountryDateRow>,
    admissible: &CountrySet,
    mode: FilterMode,
) -> Vec<CountryDateRow> {
    match mode {
        FilterMode::Retain => rows
            .into_iter()
            .filter(|row| admissible.contains(&row.country))
            .collect(),
        FilterMode::LegacySkip => {
            let mut rows = rows;
            let mut i = 0;
            while i < rows.len() {
                if !admissible.contains(&rows[i].country) {
                    // The successor shifts into slot `i` and is stepped over.
                    rows.remove(i);
                }
                i += 1;
            }
            rows
        }
    }
}
