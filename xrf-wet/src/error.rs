//! Error types for the wet-basis conversion tool.
//!
//! One enum per layer:
//!
//! - [`CsvError`] - reference table loading errors
//! - [`InputError`] - console input errors
//! - [`ReportError`] - report serialization and output errors
//! - [`AppError`] - top-level run errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Reference Table Errors
// =============================================================================

/// What went wrong while loading a reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvErrorKind {
    /// File could not be read.
    Io,
    /// File has no header row.
    Empty,
    /// A required column is absent from the header.
    MissingColumn,
    /// A cell could not be parsed as a number.
    InvalidValue,
    /// The CSV reader rejected a row.
    Malformed,
}

/// Reference table loading error with context.
#[derive(Debug, Clone)]
pub struct CsvError {
    pub kind: CsvErrorKind,
    pub line: usize,
    pub column: Option<String>,
    pub value: Option<String>,
    pub message: String,
}

impl CsvError {
    pub fn new(kind: CsvErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            column: None,
            value: None,
            message: message.into(),
        }
    }

    pub fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::new(
            CsvErrorKind::Io,
            0,
            format!("Cannot read file '{}': {}", path.display(), err),
        )
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, &self.column, &self.value) {
            (0, _, _) => write!(f, "{}", self.message),
            (line, Some(col), Some(val)) => {
                write!(f, "Line {}, column '{}' (value '{}'): {}", line, col, val, self.message)
            }
            (line, Some(col), None) => {
                write!(f, "Line {}, column '{}': {}", line, col, self.message)
            }
            (line, None, _) => write!(f, "Line {}: {}", line, self.message),
        }
    }
}

impl std::error::Error for CsvError {}

// =============================================================================
// Console Input Errors
// =============================================================================

/// Errors while reading the moisture fraction from the console.
#[derive(Debug, Error)]
pub enum InputError {
    /// Input stream ended before a number was entered.
    #[error("Input closed before a number was entered")]
    Closed,

    /// Reading or writing the console failed.
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Report Errors
// =============================================================================

/// Errors while rendering or writing the report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the report failed.
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Top-level Errors
// =============================================================================

/// Top-level run errors returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum AppError {
    /// A reference table could not be loaded.
    #[error("{0}")]
    Load(#[from] CsvError),

    /// Moisture fraction could not be obtained.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Report could not be produced.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl AppError {
    /// Load failures end the run quietly; everything else is a hard failure.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, AppError::Load(_))
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for table loading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for console input.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for report output.
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type for a whole run.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::new(CsvErrorKind::Empty, 1, "CSV file is empty");
        let app_err: AppError = csv_err.into();
        assert!(app_err.is_load_failure());
        assert!(app_err.to_string().contains("empty"));

        let app_err: AppError = InputError::Closed.into();
        assert!(!app_err.is_load_failure());
        assert!(app_err.to_string().contains("closed"));
    }

    #[test]
    fn test_error_message_format() {
        let err = CsvError::new(CsvErrorKind::InvalidValue, 5, "not a number")
            .with_column("XRF_wt_percent_dry")
            .with_value("abc");

        let msg = err.to_string();
        assert!(msg.contains("Line 5"));
        assert!(msg.contains("column 'XRF_wt_percent_dry'"));
        assert!(msg.contains("value 'abc'"));
    }

    #[test]
    fn test_io_error_has_no_line_prefix() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let err = CsvError::io(std::path::Path::new("missing.csv"), &io);
        let msg = err.to_string();
        assert!(msg.starts_with("Cannot read file 'missing.csv'"));
        assert_eq!(err.kind, CsvErrorKind::Io);
    }
}
