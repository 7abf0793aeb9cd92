//! Wet composition report.
//!
//! Text layout (oxide pipeline shown, elemental has no total and a
//! 4-character name column):
//!
//! ```text
//!
//! Wet Composition (% by mass):
//!   Fe2O3:  35.650 %
//!     H2O:  50.000 %   <- sorted by value, largest first
//!
//! Total: 100.000 %
//! ```

use serde::Serialize;
use std::io::Write;

use crate::config::{OutputFormat, Profile};
use crate::error::ReportResult;
use crate::models::{Component, Composition};

/// A sorted wet composition ready for output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Moisture fraction the composition was computed with
    pub moisture: f64,
    /// Components, largest first
    pub components: Vec<Component>,
    /// Sum of all components (oxide pipeline only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip)]
    header: &'static str,
    #[serde(skip)]
    name_width: usize,
}

impl Report {
    pub fn new(profile: &Profile, moisture: f64, wet: &Composition) -> Self {
        let components = wet.sorted_descending();
        // Accumulated in print order
        let total = profile
            .show_total
            .then(|| components.iter().fold(0.0, |acc, c| acc + c.wt_percent));

        Self {
            moisture,
            components,
            total,
            header: profile.result_header,
            name_width: profile.name_width,
        }
    }

    /// Write the fixed-width text report.
    pub fn write_text<W: Write>(&self, mut out: W) -> ReportResult<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.header)?;
        for c in &self.components {
            writeln!(
                out,
                "  {:>width$}: {:7.3} %",
                c.name,
                c.wt_percent,
                width = self.name_width
            )?;
        }
        if let Some(total) = self.total {
            writeln!(out)?;
            writeln!(out, "Total: {:.3} %", total)?;
        }
        Ok(())
    }

    /// Write the report as pretty JSON.
    pub fn write_json<W: Write>(&self, mut out: W) -> ReportResult<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;
        Ok(())
    }

    pub fn write<W: Write>(&self, format: OutputFormat, out: W) -> ReportResult<()> {
        match format {
            OutputFormat::Text => self.write_text(out),
            OutputFormat::Json => self.write_json(out),
        }
    }

    pub fn to_text(&self) -> ReportResult<String> {
        let mut buf = Vec::new();
        self.write_text(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
