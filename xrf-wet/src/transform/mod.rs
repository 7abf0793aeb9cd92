//! Composition transformation.
//!
//! - Convert: ratio application and dry-to-wet renormalisation
//! - Pipeline: load, convert, prompt and report for one run

pub mod convert;
pub mod pipeline;

pub use convert::{apply_ratios, to_wet_basis};
pub use pipeline::{run, RunOutcome};
