//! # xrfwet - dry to wet basis conversion of XRF compositions
//!
//! Laboratory XRF results are reported on a dry basis. Given the moisture
//! fraction of the sample, this crate expresses the same composition as a
//! percentage of the wet mass, with water added as its own `H2O` component.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV tables │────▶│   Parser    │────▶│   Convert   │────▶│   Report    │
//! │ (dry, ratio)│     │  (auto-enc) │     │ (ratio + m) │     │ (text/json) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use xrfwet::{apply_ratios, to_wet_basis, Composition, RatioTable};
//!
//! let dry: Composition = vec![("Fe", 60.0), ("Si", 40.0)].into_iter().collect();
//! let dry = apply_ratios(&dry, &RatioTable::new());
//! let wet = to_wet_basis(0.5, &dry);
//!
//! assert_eq!(wet.get("H2O"), Some(50.0));
//! assert!((wet.total() - 100.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Layered error types
//! - [`models`] - Composition and ratio table
//! - [`parser`] - CSV table loading with auto-detection
//! - [`transform`] - Conversion arithmetic and the run pipeline
//! - [`prompt`] - Numeric console prompt
//! - [`report`] - Sorted text and JSON report
//! - [`config`] - Pipeline profiles and run configuration
//! - [`logs`] - Progress diagnostics on stderr

// Core modules
pub mod error;
pub mod models;

// Input
pub mod parser;
pub mod prompt;

// Calculation
pub mod transform;

// Output
pub mod report;

// Ambient
pub mod config;
pub mod logs;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{AppError, AppResult, CsvError, CsvErrorKind, InputError, ReportError};

pub use models::{Component, Composition, RatioTable, WATER};

pub use parser::{load_composition, load_ratios, load_table, parse_table, LoadedTable, TableColumns};

pub use prompt::read_fraction;

pub use transform::{apply_ratios, run, to_wet_basis, RunOutcome};

pub use report::Report;

pub use config::{OutputFormat, PipelineKind, RunConfig};
