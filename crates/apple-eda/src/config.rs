//! Configuration types for the analysis run.
//!
//! The dataset schema itself is fixed (see [`crate::schema`]); only the file
//! locations and a few presentation knobs are configurable.

use std::path::PathBuf;

/// Strategy for handling outliers in the numeric features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlierStrategy {
    /// Report outliers but keep every row
    #[default]
    Keep,
    /// Remove rows with any feature outside its IQR bounds
    Remove,
}

/// Configuration for one analysis run.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use apple_eda::config::{AnalysisConfig, OutlierStrategy};
///
/// let config = AnalysisConfig::builder()
///     .input_path("data/apples.csv")
///     .outlier_strategy(OutlierStrategy::Remove)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// CSV file to analyze.
    /// Default: "Apple_Quality_Dataset.csv"
    pub input_path: PathBuf,

    /// Directory the rendered charts are written to.
    /// Default: "outputs"
    pub output_dir: PathBuf,

    /// Number of bins per feature histogram.
    /// Default: 30
    pub histogram_bins: usize,

    /// Strategy for handling outliers.
    /// Default: Keep
    pub outlier_strategy: OutlierStrategy,

    /// Whether to render charts at all.
    /// Default: true
    pub render_charts: bool,

    /// Size in pixels of a single chart.
    /// Default: (800, 600)
    pub chart_size: (u32, u32),
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("Apple_Quality_Dataset.csv"),
            output_dir: PathBuf::from("outputs"),
            histogram_bins: 30,
            outlier_strategy: OutlierStrategy::default(),
            render_charts: true,
            chart_size: (800, 600),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidBins(self.histogram_bins));
        }

        let (width, height) = self.chart_size;
        if width == 0 || height == 0 {
            return Err(ConfigValidationError::InvalidChartSize { width, height });
        }

        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyInputPath);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid histogram bin count: {0} (must be at least 1)")]
    InvalidBins(usize),

    #[error("Invalid chart size: {width}x{height} (both dimensions must be positive)")]
    InvalidChartSize { width: u32, height: u32 },

    #[error("Input path must not be empty")]
    EmptyInputPath,
}

impl From<ConfigValidationError> for crate::error::EdaError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::EdaError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    histogram_bins: Option<usize>,
    outlier_strategy: Option<OutlierStrategy>,
    render_charts: Option<bool>,
    chart_size: Option<(u32, u32)>,
}

impl AnalysisConfigBuilder {
    /// Set the CSV file to analyze.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the directory charts are written to.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the number of histogram bins per feature.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the strategy for handling outliers.
    pub fn outlier_strategy(mut self, strategy: OutlierStrategy) -> Self {
        self.outlier_strategy = Some(strategy);
        self
    }

    /// Enable or disable chart rendering.
    pub fn render_charts(mut self, render: bool) -> Self {
        self.render_charts = Some(render);
        self
    }

    /// Set the pixel size of a single chart.
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_size = Some((width, height));
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            outlier_strategy: self.outlier_strategy.unwrap_or_default(),
            render_charts: self.render_charts.unwrap_or(defaults.render_charts),
            chart_size: self.chart_size.unwrap_or(defaults.chart_size),
        };

        config.validate()?;
        Ok(config)
    }
}
