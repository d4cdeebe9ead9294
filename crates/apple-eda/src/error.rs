//! Error types for the analysis pipeline.
//!
//! Every failure is fatal: the pipeline does not retry or recover, it simply
//! propagates one of these variants up to `main`.

use thiserror::Error;

/// The main error type for loading, cleaning, summarizing and rendering.
#[derive(Error, Debug)]
pub enum EdaError {
    /// A required column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The dataset has no rows left to summarize.
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The input file could not be turned into a dataset.
    #[error("Failed to load '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    /// A column could not be converted to the type the analysis needs.
    #[error("Failed to convert column '{column}' to {target_type}: {reason}")]
    TypeConversionFailed {
        column: String,
        target_type: String,
        reason: String,
    },

    /// A chart could not be drawn or written.
    #[error("Failed to render chart '{chart}': {reason}")]
    RenderFailed { chart: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable code identifying the kind of failure.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::EmptyDataset(_) => "EMPTY_DATASET",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::LoadFailed { .. } => "LOAD_FAILED",
            Self::TypeConversionFailed { .. } => "TYPE_CONVERSION_FAILED",
            Self::RenderFailed { .. } => "RENDER_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Build a render failure from any displayable drawing error.
    pub(crate) fn render(chart: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        EdaError::RenderFailed {
            chart: chart.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            EdaError::ColumnNotFound("Size".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(
            EdaError::EmptyDataset("no rows".to_string()).error_code(),
            "EMPTY_DATASET"
        );
    }

    #[test]
    fn test_with_context() {
        let error =
            EdaError::ColumnNotFound("Quality".to_string()).with_context("During summary");
        assert!(error.to_string().contains("During summary"));
        assert!(error.to_string().contains("Quality"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND"); // Preserves original code
    }

    #[test]
    fn test_render_error_message() {
        let error = EdaError::render("01_histograms.svg", "disk full");
        assert_eq!(error.error_code(), "RENDER_FAILED");
        assert!(error.to_string().contains("01_histograms.svg"));
        assert!(error.to_string().contains("disk full"));
    }

    #[test]
    fn test_result_ext_on_polars_error() {
        let result: std::result::Result<(), polars::error::PolarsError> = Err(
            polars::error::PolarsError::ColumnNotFound("Weight".into()),
        );
        let error = result.context("Reading features").unwrap_err();
        assert_eq!(error.error_code(), "POLARS_ERROR");
        assert!(error.to_string().starts_with("Reading features"));
    }
}
