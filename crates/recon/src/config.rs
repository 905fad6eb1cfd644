use serde::{Deserialize, Serialize};

use crate::error::ReconError;

pub const DEFAULT_SOURCE_A_NAME: &str = "owid";
pub const DEFAULT_SOURCE_A_FILE: &str = "dates-data(OWID-data).csv";
pub const DEFAULT_SOURCE_B_NAME: &str = "datahub";
pub const DEFAULT_SOURCE_B_FILE: &str = "dates-data(datahub-data).csv";
pub const DEFAULT_OUTPUT_FILE: &str = "dates-data(common).csv";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Reconciliation settings. Every table is optional; an empty document
/// yields the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub filter: FilterMode,
    #[serde(default)]
    pub join: JoinMode,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub a: SourceConfig,
    pub b: SourceConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            a: SourceConfig {
                name: DEFAULT_SOURCE_A_NAME.into(),
                file: DEFAULT_SOURCE_A_FILE.into(),
            },
            b: SourceConfig {
                name: DEFAULT_SOURCE_B_NAME.into(),
                file: DEFAULT_SOURCE_B_FILE.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Label used in diagnostics and JSON output.
    pub name: String,
    pub file: String,
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub country: String,
    pub start_date: String,
    pub end_date: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            country: "Country".into(),
            start_date: "Start Date".into(),
            end_date: "End Date".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv: String,
    pub json: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { csv: DEFAULT_OUTPUT_FILE.into(), json: None }
    }
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// How uncommon countries are dropped from each source's rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Keep exactly the rows whose country is common.
    #[default]
    Retain,
    /// Remove-while-iterating: the row after each removed row is never
    /// examined, so some uncommon rows survive. Matches historical outputs.
    LegacySkip,
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retain => write!(f, "retain"),
            Self::LegacySkip => write!(f, "legacy_skip"),
        }
    }
}

/// How rows of the two filtered sources are paired up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    /// Look both sides up by country name, in sorted country order.
    #[default]
    Keyed,
    /// Pair the i-th row of each side; fails if the sides are misaligned.
    Positional,
}

impl std::fmt::Display for JoinMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyed => write!(f, "keyed"),
            Self::Positional => write!(f, "positional"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        for (slot, source) in [("a", &self.sources.a), ("b", &self.sources.b)] {
            if source.name.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "sources.{slot}: name must not be empty"
                )));
            }
            if source.file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "sources.{slot}: file must not be empty"
                )));
            }
        }

        if self.sources.a.name == self.sources.b.name {
            return Err(ReconError::ConfigValidation(format!(
                "sources a and b share the name '{}'",
                self.sources.a.name
            )));
        }

        let cols = &self.columns;
        let named = [
            ("country", &cols.country),
            ("start_date", &cols.start_date),
            ("end_date", &cols.end_date),
        ];
        for (field, column) in named {
            if column.is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "columns.{field} must not be empty"
                )));
            }
        }
        if cols.country == cols.start_date
            || cols.country == cols.end_date
            || cols.start_date == cols.end_date
        {
            return Err(ReconError::ConfigValidation(
                "columns must name three distinct headers".into(),
            ));
        }

        if self.output.csv.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "output.csv must not be empty".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
