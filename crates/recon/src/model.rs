use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{FilterMode, JoinMode};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Raw CSV text of one source, tagged with the name used in diagnostics.
#[derive(Debug, Clone)]
pub struct SourceInput {
    pub name: String,
    pub data: String,
}

impl SourceInput {
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self { name: name.into(), data: data.into() }
    }
}

/// The two pre-loaded sources being reconciled.
#[derive(Debug, Clone)]
pub struct ReconInput {
    pub a: SourceInput,
    pub b: SourceInput,
}

/// Country names of one source. Ordered, so the intersection iterates sorted.
pub type CountrySet = BTreeSet<String>;

/// One country's reported range from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDateRow {
    pub country: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// 1-based line in the source file (header is line 1).
    pub line: usize,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A common country's range narrowed to the overlap of both sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedRow {
    pub country: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The window valid for every merged country at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlobalRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl GlobalRange {
    /// True when the latest start falls after the earliest end.
    pub fn is_empty(&self) -> bool {
        self.start_date > self.end_date
    }

    /// Whole days covered, inclusive of both ends. Zero for an empty window.
    pub fn days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end_date - self.start_date).num_days() + 1
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub source_a_countries: usize,
    pub source_b_countries: usize,
    pub common_countries: usize,
    pub source_a_retained: usize,
    pub source_b_retained: usize,
    pub merged_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub source_a: String,
    pub source_b: String,
    pub filter_mode: FilterMode,
    pub join_mode: JoinMode,
    pub engine_version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub common_countries: Vec<String>,
    pub rows: Vec<MergedRow>,
    /// `None` exactly when no country is common to both sources.
    pub global: Option<GlobalRange>,
}

impl ReconResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
