use std::collections::BTreeMap;

use crate::config::JoinMode;
use crate::error::ReconError;
use crate::model::{CountryDateRow, CountrySet, MergedRow};

/// One source's filtered rows, tagged with the source name.
#[derive(Debug, Clone, Copy)]
pub struct Side<'a> {
    pub name: &'a str,
    pub rows: &'a [CountryDateRow],
}

/// Pair the two filtered sources and narrow each country's range.
pub fn merge_rows(
    a: Side<'_>,
    b: Side<'_>,
    common: &CountrySet,
    mode: JoinMode,
) -> Result<Vec<MergedRow>, ReconError> {
    match mode {
        JoinMode::Keyed => merge_keyed(a, b, common),
        JoinMode::Positional => merge_positional(a, b),
    }
}

/// Later start, earlier end. The country name comes from `a`.
pub fn narrow(a: &CountryDateRow, b: &CountryDateRow) -> MergedRow {
    MergedRow {
        country: a.country.clone(),
        start_date: a.start_date.max(b.start_date),
        end_date: a.end_date.min(b.end_date),
    }
}

/// Join by country name, walking `common` in sorted order.
pub fn merge_keyed(
    a: Side<'_>,
    b: Side<'_>,
    common: &CountrySet,
) -> Result<Vec<MergedRow>, ReconError> {
    let a_map = index_common(a, common)?;
    let b_map = index_common(b, common)?;

    let mut merged = Vec::with_capacity(common.len());
    for country in common {
        let left = lookup(a, &a_map, country)?;
        let right = lookup(b, &b_map, country)?;
        merged.push(narrow(left, right));
    }

    Ok(merged)
}

fn lookup<'a>(
    side: Side<'_>,
    map: &BTreeMap<&str, &'a CountryDateRow>,
    country: &str,
) -> Result<&'a CountryDateRow, ReconError> {
    map.get(country).copied().ok_or_else(|| ReconError::MissingRow {
        source: side.name.into(),
        country: country.into(),
    })
}

fn index_common<'a>(
    side: Side<'a>,
    common: &CountrySet,
) -> Result<BTreeMap<&'a str, &'a CountryDateRow>, ReconError> {
    let mut map = BTreeMap::new();
    for row in side.rows.iter().filter(|r| common.contains(&r.country)) {
        if map.insert(row.country.as_str(), row).is_some() {
            return Err(ReconError::DuplicateCountry {
                source: side.name.into(),
                country: row.country.clone(),
                line: row.line,
            });
        }
    }
    Ok(map)
}

/// Pair rows by index. Any length or country disagreement is an error
/// rather than a silent mis-merge.
pub fn merge_positional(a: Side<'_>, b: Side<'_>) -> Result<Vec<MergedRow>, ReconError> {
    if a.rows.len() != b.rows.len() {
        let position = a.rows.len().min(b.rows.len());
        let describe = |side: Side<'_>| {
            side.rows
                .get(position)
                .map(|r| r.country.clone())
                .unwrap_or_else(|| format!("<end of {}>", side.name))
        };
        return Err(ReconError::AlignmentMismatch {
            position,
            left: describe(a),
            right: describe(b),
        });
    }

    a.rows
        .iter()
        .zip(b.rows)
        .enumerate()
        .map(|(position, (left, right))| {
            if left.country != right.country {
                return Err(ReconError::AlignmentMismatch {
                    position,
                    left: left.country.clone(),
                    right: right.country.clone(),
                });
            }
            Ok(narrow(left, right))
        })
        .collect()
}
