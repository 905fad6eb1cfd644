use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::extract::{extract_country_set, intersect};
use crate::filter::{filter_rows, load_rows};
use crate::merge::{merge_rows, Side};
use crate::model::{ReconInput, ReconMeta, ReconResult, ReconSummary};
use crate::range::global_range;

/// Run the reconciliation pipeline:
/// extract → intersect → load + filter → merge → reduce.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let (a, b) = (&input.a, &input.b);

    let country = &config.columns.country;
    let a_countries = extract_country_set(&a.name, &a.data, country)?;
    let b_countries = extract_country_set(&b.name, &b.data, country)?;
    let common = intersect(&a_countries, &b_countries);
    log::info!(
        "{} countries in {}, {} in {}, {} common",
        a_countries.len(),
        a.name,
        b_countries.len(),
        b.name,
        common.len()
    );

    let a_rows = filter_rows(load_rows(&a.name, &a.data, &config.columns)?, &common, config.filter);
    let b_rows = filter_rows(load_rows(&b.name, &b.data, &config.columns)?, &common, config.filter);
    log::debug!(
        "retained {} rows from {}, {} from {} ({} filter)",
        a_rows.len(),
        a.name,
        b_rows.len(),
        b.name,
        config.filter
    );

    let rows = merge_rows(
        Side { name: &a.name, rows: &a_rows },
        Side { name: &b.name, rows: &b_rows },
        &common,
        config.join,
    )?;

    let global = if rows.is_empty() {
        log::warn!("no countries common to {} and {}", a.name, b.name);
        None
    } else {
        Some(global_range(&rows)?)
    };

    Ok(ReconResult {
        meta: ReconMeta {
            source_a: a.name.clone(),
            source_b: b.name.clone(),
            filter_mode: config.filter,
            join_mode: config.join,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        summary: ReconSummary {
            source_a_countries: a_countries.len(),
            source_b_countries: b_countries.len(),
            common_countries: common.len(),
            source_a_retained: a_rows.len(),
            source_b_retained: b_rows.len(),
            merged_rows: rows.len(),
        },
        common_countries: common.into_iter().collect(),
        rows,
        global,
    })
}
