//! `datespan-recon`: reconcile per-country date ranges from two sources.
//!
//! Pure engine crate: receives pre-loaded CSV text, returns merged rows and
//! the global range. File reads and process exit handling live in the CLI.

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod filter;
pub mod merge;
pub mod model;
pub mod range;
pub mod writer;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{CountryDateRow, GlobalRange, MergedRow, ReconInput, ReconResult, SourceInput};
