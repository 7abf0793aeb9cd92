//! End-to-end run of one pipeline.
//!
//! 1. Print the title
//! 2. Load the dry table (and the ratio table for the elemental pipeline)
//! 3. Apply ratios
//! 4. Obtain the moisture fraction (flag or prompt)
//! 5. Renormalise onto the wet basis
//! 6. Write the report
//!
//! Console input and output are passed in so a run can be driven from tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::io;
//! use xrfwet::config::{PipelineKind, RunConfig};
//! use xrfwet::transform::pipeline::run;
//!
//! let config = RunConfig::new(PipelineKind::Oxide).with_moisture(Some(0.75));
//! let outcome = run(&config, io::stdin().lock(), io::stdout()).unwrap();
//! println!("{} components", outcome.wet.len());
//! ```

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};

use super::convert::{apply_ratios, to_wet_basis};
use crate::config::RunConfig;
use crate::error::{AppResult, CsvResult, ReportError};
use crate::logs::{log_info, log_success, log_warning};
use crate::models::{Composition, RatioTable};
use crate::parser::{load_composition, load_ratios};
use crate::prompt::read_fraction;
use crate::report::Report;

/// Dry totals further than this from 100 get a warning.
pub const TOTAL_TOLERANCE: f64 = 0.5;

/// Everything computed during a run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Dry composition after ratio application
    pub dry: Composition,
    /// Moisture fraction used
    pub moisture: f64,
    /// Wet composition, input order plus water
    pub wet: Composition,
    /// Sorted report as written
    pub report: Report,
}

/// Run a pipeline against the given console.
///
/// A table load failure is written to `console` as a single line and
/// returned as [`crate::error::AppError::Load`]; nothing is computed.
pub fn run<R: BufRead, W: Write>(config: &RunConfig, input: R, mut console: W) -> AppResult<RunOutcome> {
    let profile = config.profile();

    writeln!(console, "{}", profile.title).map_err(ReportError::from)?;
    writeln!(console).map_err(ReportError::from)?;

    let (measured, ratios) = match load_inputs(config) {
        Ok(tables) => tables,
        Err(e) => {
            writeln!(console, "{}: {}", profile.load_error, e).map_err(ReportError::from)?;
            return Err(e.into());
        }
    };

    let dry = apply_ratios(&measured, &ratios);
    check_dry_total(&dry);

    let moisture = match config.moisture {
        Some(m) => m,
        None => read_fraction(input, &mut console, profile.prompt)?,
    };
    log_info(format!("Moisture fraction: {}", moisture));

    let wet = to_wet_basis(moisture, &dry);
    let report = Report::new(profile, moisture, &wet);

    match &config.output {
        Some(path) => {
            let mut file = BufWriter::new(File::create(path).map_err(ReportError::from)?);
            report.write(config.format, &mut file)?;
            file.flush().map_err(ReportError::from)?;
            log_success(format!("Report written to: {}", path.display()));
        }
        None => report.write(config.format, &mut console)?,
    }

    Ok(RunOutcome {
        dry,
        moisture,
        wet,
        report,
    })
}

/// Load the dry table and, when the pipeline has one, the ratio table.
fn load_inputs(config: &RunConfig) -> CsvResult<(Composition, RatioTable)> {
    let profile = config.profile();
    let measured = load_composition(&config.data_path, profile.data_columns)?;

    let ratios = match (&config.ratios_path, profile.ratio_columns) {
        (Some(path), Some(columns)) => load_ratios(path, columns)?,
        _ => RatioTable::new(),
    };

    Ok((measured, ratios))
}

/// Warn when the dry composition does not close to 100 %.
///
/// The calculation is unchanged either way.
fn check_dry_total(dry: &Composition) {
    let total = dry.total();
    if (total - 100.0).abs() > TOTAL_TOLERANCE {
        log_warning(format!(
            "Dry composition sums to {:.3} %, wet result will not sum to 100 %",
            total
        ));
    }
}
