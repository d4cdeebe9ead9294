//! The analysis pipeline.
//!
//! One linear pass: load, clean, handle outliers, summarize, render. Any
//! failure aborts the run and nothing after it is produced.

pub mod progress;

pub use progress::AnalysisStage;

use crate::charts::ChartRenderer;
use crate::cleaner::{DataCleaner, OutlierHandler};
use crate::config::AnalysisConfig;
use crate::error::{Result, ResultExt};
use crate::loader::{load_dataset, normalize_columns};
use crate::profiler::StatisticsProfiler;
use crate::schema::{LABEL_COLUMN, NUMERIC_FEATURES};
use crate::types::AnalysisReport;
use polars::prelude::DataFrame;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    /// Written chart files, in rendering order; empty when charts are disabled.
    pub charts: Vec<PathBuf>,
}

/// Runs the analysis described by an [`AnalysisConfig`].
///
/// # Example
///
/// ```rust,ignore
/// use apple_eda::{Analysis, AnalysisConfig, OutlierStrategy};
///
/// let config = AnalysisConfig::builder()
///     .input_path("Apple_Quality_Dataset.csv")
///     .outlier_strategy(OutlierStrategy::Remove)
///     .build()?;
///
/// let outcome = Analysis::new(config).run()?;
/// println!("{} rows analyzed", outcome.report.data.height());
/// ```
pub struct Analysis {
    config: AnalysisConfig,
}

impl Analysis {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load the configured file, analyze it and render the charts.
    pub fn run(&self) -> Result<AnalysisOutcome> {
        match self.run_internal() {
            Ok(outcome) => {
                info!("{}", AnalysisStage::Complete.banner());
                Ok(outcome)
            }
            Err(e) => {
                error!("Analysis failed [{}]: {}", e.error_code(), e);
                Err(e)
            }
        }
    }

    fn run_internal(&self) -> Result<AnalysisOutcome> {
        let start_time = Instant::now();
        self.config.validate()?;

        info!("{}", AnalysisStage::Loading.banner());
        let df = load_dataset(&self.config.input_path)?;

        let report = self.analyze(df)?;

        let charts = if self.config.render_charts {
            info!("{}", AnalysisStage::Rendering.banner());
            let renderer = ChartRenderer::new(
                &self.config.output_dir,
                self.config.chart_size,
                self.config.histogram_bins,
            );
            renderer
                .render_all(&report.data, &report.correlation, &report.label_frequency)
                .context("Rendering charts")?
        } else {
            info!("Chart rendering disabled");
            Vec::new()
        };

        info!(
            "Analysis finished in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(AnalysisOutcome { report, charts })
    }

    /// Clean an already loaded dataset and compute every statistic.
    ///
    /// Feature types are normalized after cleaning, so text in a row that has
    /// missing values is dropped with the row instead of failing the cast.
    pub fn analyze(&self, df: DataFrame) -> Result<AnalysisReport> {
        info!("{}", AnalysisStage::Cleaning.banner());
        let (df, cleaning) = DataCleaner::clean(df)?;
        if cleaning.total_missing() > 0 {
            info!(
                "Found {} missing values; dropped {} rows",
                cleaning.total_missing(),
                cleaning.rows_with_missing
            );
        }
        let df = normalize_columns(df)?;

        info!("{}", AnalysisStage::OutlierHandling.banner());
        let outliers =
            OutlierHandler::detect(&df, &NUMERIC_FEATURES).context("Detecting outliers")?;
        let flagged: usize = outliers.iter().map(|o| o.outlier_count).sum();
        if flagged > 0 {
            info!("{} values lie outside the 1.5 IQR fences", flagged);
        }
        let (df, outlier_rows_removed) =
            OutlierHandler::handle_outliers(df, &outliers, self.config.outlier_strategy)?;

        info!("{}", AnalysisStage::Statistics.banner());
        if df.height() < 4 {
            warn!(
                "Only {} rows remain; skewness and kurtosis may be undefined",
                df.height()
            );
        }
        let statistics =
            StatisticsProfiler::describe(&df, &NUMERIC_FEATURES).context("Describing features")?;
        let label_frequency = StatisticsProfiler::label_frequency(&df, LABEL_COLUMN)?;
        let correlation = StatisticsProfiler::correlation_matrix(&df, &NUMERIC_FEATURES)?;

        Ok(AnalysisReport {
            data: df,
            cleaning,
            outliers,
            outlier_rows_removed,
            statistics,
            label_frequency,
            correlation,
        })
    }
}
