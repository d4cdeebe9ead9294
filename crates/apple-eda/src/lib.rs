//! Apple Quality Exploratory Data Analysis
//!
//! Loads the apple quality dataset, cleans it, summarizes it and renders a
//! fixed set of charts, built on Polars and Plotters.
//!
//! # Overview
//!
//! - **Loading**: CSV input with the seven numeric features cast to `Float64`
//!   and the `Quality` label read as text
//! - **Cleaning**: rows with any missing value are dropped, then exact
//!   duplicate rows (first occurrence kept, order preserved)
//! - **Outliers**: IQR fences per feature, reported always and removed on request
//! - **Statistics**: count/mean/std/quartiles, mode, skewness, kurtosis,
//!   label counts and the Pearson correlation matrix
//! - **Charts**: histograms, grouped boxplots, a count plot, a correlation
//!   heatmap and scatter plots, written as SVG files
//!
//! The working hypothesis behind the analysis is that apples with higher
//! sweetness and juiciness are more likely to be rated good; the scatter plots
//! are there to eyeball it, nothing tests it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use apple_eda::{Analysis, AnalysisConfig, ConsoleReport};
//!
//! let config = AnalysisConfig::builder()
//!     .input_path("Apple_Quality_Dataset.csv")
//!     .output_dir("outputs")
//!     .build()?;
//!
//! let outcome = Analysis::new(config).run()?;
//! println!("{}", ConsoleReport::new(&outcome.report).with_charts(&outcome.charts));
//! ```
//!
//! # Working on a DataFrame
//!
//! The stages are usable on their own:
//!
//! ```rust,ignore
//! use apple_eda::{
//!     load_dataset, normalize_columns, DataCleaner, StatisticsProfiler, NUMERIC_FEATURES,
//! };
//!
//! let df = load_dataset("Apple_Quality_Dataset.csv")?;
//! let (clean, report) = DataCleaner::clean(df)?;
//! let clean = normalize_columns(clean)?;
//! let stats = StatisticsProfiler::describe(&clean, &NUMERIC_FEATURES)?;
//! ```

pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod schema;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use charts::ChartRenderer;
pub use cleaner::{DataCleaner, OutlierHandler};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError, OutlierStrategy};
pub use error::{EdaError, Result, ResultExt};
pub use loader::{load_dataset, normalize_columns};
pub use pipeline::{Analysis, AnalysisOutcome, AnalysisStage};
pub use profiler::{HistogramBin, StatisticsProfiler};
pub use reporting::ConsoleReport;
pub use schema::{FEATURE_PAIRS, LABEL_COLUMN, NUMERIC_FEATURES};
pub use types::{
    AnalysisReport, BoxSummary, CleaningReport, ColumnSummary, CorrelationMatrix,
    DescriptiveStatistics, LabelFrequency, OutlierSummary,
};
