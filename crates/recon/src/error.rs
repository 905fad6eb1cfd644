use std::fmt;

use crate::compare::DateError;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty file name, duplicate column, etc.).
    ConfigValidation(String),
    /// Missing required column in a source's header.
    MissingColumn { source: String, column: String },
    /// A data row could not be decomposed into quoted fields.
    MalformedRow { source: String, line: usize, reason: String },
    /// Date parse error.
    DateParse { source: String, line: usize, value: String, cause: DateError },
    /// The same country appears twice in one filtered source.
    DuplicateCountry { source: String, country: String, line: usize },
    /// A common country has no row in one of the filtered sources.
    MissingRow { source: String, country: String },
    /// Positional join found rows for different countries at the same index.
    AlignmentMismatch { position: usize, left: String, right: String },
    /// Reduction over zero merged rows.
    EmptyInput,
    /// IO error (CSV write, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::MalformedRow { source, line, reason } => {
                write!(f, "source '{source}', line {line}: malformed row: {reason}")
            }
            Self::DateParse { source, line, value, cause } => {
                write!(f, "source '{source}', line {line}: cannot parse date '{value}': {cause}")
            }
            Self::DuplicateCountry { source, country, line } => {
                write!(f, "source '{source}', line {line}: duplicate country '{country}'")
            }
            Self::MissingRow { source, country } => {
                write!(f, "source '{source}': no row for common country '{country}'")
            }
            Self::AlignmentMismatch { position, left, right } => {
                write!(
                    f,
                    "positional join misaligned at row {position}: '{left}' vs '{right}'"
                )
            }
            Self::EmptyInput => write!(f, "no merged rows to reduce"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
