//! `ledger-lens` reads transaction exports of unknown layout, infers how
//! money moves through them and scores the business's cash-flow health.
//!
//! Pure engine: the binaries do file I/O and printing, the library only
//! turns tables into [`AnalysisOutcome`]s.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod normalize;
pub mod services;

pub use analysis::{AnalysisOutcome, AnalysisResult, analyze, analyze_with};
pub use config::{AnalysisConfig, Settings};
pub use data::model::{CellValue, RawTable};
pub use error::{ConfigError, ServiceError};
pub use normalize::{Clarification, ColumnRoles, SourceFormat};
