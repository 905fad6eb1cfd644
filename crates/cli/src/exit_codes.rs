//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract. Scripts rely on them.
//!
//! | Code | Meaning                                           |
//! |------|---------------------------------------------------|
//! | 0    | Success (an empty intersection is still success)  |
//! | 1    | General error (unspecified)                       |
//! | 2    | CLI usage error (bad args; emitted by clap)       |
//! | 3    | File not found / unreadable / unwritable          |
//! | 4    | Malformed row or unparseable date                 |
//! | 5    | Join error: misaligned, duplicate or missing row  |
//! | 6    | Invalid configuration                             |

use datespan_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// A source, config or output path could not be read or written.
pub const EXIT_IO: u8 = 3;

/// A source row or date could not be parsed.
pub const EXIT_MALFORMED: u8 = 4;

/// The two filtered sources could not be paired.
pub const EXIT_JOIN: u8 = 5;

/// Config file failed to parse or validate.
pub const EXIT_CONFIG: u8 = 6;

/// Map a ReconError to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_CONFIG,
        ReconError::MissingColumn { .. }
        | ReconError::MalformedRow { .. }
        | ReconError::DateParse { .. } => EXIT_MALFORMED,
        ReconError::DuplicateCountry { .. }
        | ReconError::MissingRow { .. }
        | ReconError::AlignmentMismatch { .. } => EXIT_JOIN,
        ReconError::Io(_) => EXIT_IO,
        ReconError::EmptyInput => EXIT_ERROR,
    }
}
