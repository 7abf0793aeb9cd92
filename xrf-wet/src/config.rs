//! Run configuration.
//!
//! Each pipeline has a fixed [`Profile`] (titles, prompt, column names,
//! default file locations). A [`RunConfig`] is the profile plus whatever the
//! command line and environment chose for this run.

use clap::ValueEnum;
use std::path::PathBuf;

use crate::parser::TableColumns;

/// Environment variable overriding the dry elemental table path.
pub const ENV_DRY_CSV: &str = "XRF_DRY_CSV";

/// Environment variable overriding the ratio table path.
pub const ENV_RATIOS_CSV: &str = "XRF_RATIOS_CSV";

/// Environment variable overriding the dry oxide table path.
pub const ENV_OXIDE_CSV: &str = "XRF_OXIDE_CSV";

/// Which composition is being converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    /// Element wt% with element-to-oxide ratios applied first.
    Elemental,
    /// Oxide wt% converted directly.
    Oxide,
}

/// Fixed wording and layout of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub title: &'static str,
    pub prompt: &'static str,
    pub result_header: &'static str,
    pub load_error: &'static str,
    pub name_width: usize,
    pub show_total: bool,
    pub data_columns: TableColumns<'static>,
    pub ratio_columns: Option<TableColumns<'static>>,
    pub default_data: &'static str,
    pub default_ratios: Option<&'static str>,
}

static ELEMENTAL: Profile = Profile {
    title: "Calculate Wet Composition from XRF Data",
    prompt: "Enter moisture fraction of Fe filter cake (e.g. 0.75): ",
    result_header: " Wet composition (% by mass):",
    load_error: "Error loading required CSV files",
    name_width: 4,
    show_total: false,
    data_columns: TableColumns::new("Element", "XRF_wt_percent_dry"),
    ratio_columns: Some(TableColumns::new("Element", "ElementToOxideRatio")),
    default_data: "xrf_wt_percent_dry.csv",
    default_ratios: Some("element_to_oxide_ratios.csv"),
};

static OXIDE: Profile = Profile {
    title: "Calculate Wet Composition from XRF Oxide Data",
    prompt: "Enter moisture fraction (e.g. 0.75): ",
    result_header: "Wet Composition (% by mass):",
    load_error: "Error loading CSV",
    name_width: 6,
    show_total: true,
    data_columns: TableColumns::new("Oxide", "XRF_oxide_percent_dry"),
    ratio_columns: None,
    default_data: "xrf_wt_percent_dry.csv",
    default_ratios: None,
};

impl PipelineKind {
    pub fn profile(self) -> &'static Profile {
        match self {
            PipelineKind::Elemental => &ELEMENTAL,
            PipelineKind::Oxide => &OXIDE,
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width console table
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub kind: PipelineKind,
    /// Dry-basis composition table
    pub data_path: PathBuf,
    /// Conversion ratio table (elemental only)
    pub ratios_path: Option<PathBuf>,
    /// Moisture fraction given up front; prompts when `None`
    pub moisture: Option<f64>,
    pub format: OutputFormat,
    /// Report file; stdout when `None`
    pub output: Option<PathBuf>,
}

impl RunConfig {
    /// Configuration with the default file names in the current directory.
    pub fn new(kind: PipelineKind) -> Self {
        let profile = kind.profile();
        Self {
            kind,
            data_path: PathBuf::from(profile.default_data),
            ratios_path: profile.default_ratios.map(PathBuf::from),
            moisture: None,
            format: OutputFormat::default(),
            output: None,
        }
    }

    pub fn profile(&self) -> &'static Profile {
        self.kind.profile()
    }

    pub fn with_data(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.data_path = p;
        }
        self
    }

    /// Ignored for pipelines without a ratio table.
    pub fn with_ratios(mut self, path: Option<PathBuf>) -> Self {
        if let (Some(p), Some(_)) = (path, self.profile().ratio_columns) {
            self.ratios_path = Some(p);
        }
        self
    }

    pub fn with_moisture(mut self, moisture: Option<f64>) -> Self {
        self.moisture = moisture;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elemental_defaults() {
        let config = RunConfig::new(PipelineKind::Elemental);
        assert_eq!(config.data_path, PathBuf::from("xrf_wt_percent_dry.csv"));
        assert_eq!(
            config.ratios_path,
            Some(PathBuf::from("element_to_oxide_ratios.csv"))
        );
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.moisture.is_none());
    }

    #[test]
    fn test_oxide_ignores_ratio_override() {
        let config = RunConfig::new(PipelineKind::Oxide).with_ratios(Some("r.csv".into()));
        assert!(config.ratios_path.is_none());
        assert!(config.profile().show_total);
        assert_eq!(config.profile().data_columns.key, "Oxide");
    }

    #[test]
    fn test_overrides() {
        let config = RunConfig::new(PipelineKind::Elemental)
            .with_data(Some("lab/dry.csv".into()))
            .with_data(None)
            .with_ratios(Some("lab/ratios.csv".into()))
            .with_moisture(Some(0.3))
            .with_format(OutputFormat::Json);

        assert_eq!(config.data_path, PathBuf::from("lab/dry.csv"));
        assert_eq!(config.ratios_path, Some(PathBuf::from("lab/ratios.csv")));
        assert_eq!(config.moisture, Some(0.3));
        assert_eq!(config.format, OutputFormat::Json);
    }
}
