//! Outlier handling module.
//!
//! Outliers are values outside the Tukey fences of their feature. They are
//! always reported; rows containing them are dropped only under
//! [`OutlierStrategy::Remove`].

use crate::config::OutlierStrategy;
use crate::error::Result;
use crate::profiler::statistics::{iqr_bounds, sorted};
use crate::types::OutlierSummary;
use crate::utils::{column_as_f64, column_as_optional_f64};
use polars::prelude::*;
use tracing::{debug, info};

/// Handles outlier detection and treatment.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Fences and outlier counts for each listed feature.
    pub fn detect(df: &DataFrame, features: &[&str]) -> Result<Vec<OutlierSummary>> {
        features
            .iter()
            .map(|name| {
                let values = column_as_f64(df, name)?;
                let (lower_bound, upper_bound) = if values.is_empty() {
                    (f64::NAN, f64::NAN)
                } else {
                    iqr_bounds(&sorted(&values))
                };
                let outlier_count = values
                    .iter()
                    .filter(|v| **v < lower_bound || **v > upper_bound)
                    .count();

                debug!(
                    "{}: {} outliers outside [{:.4}, {:.4}]",
                    name, outlier_count, lower_bound, upper_bound
                );
                Ok(OutlierSummary {
                    column: name.to_string(),
                    lower_bound,
                    upper_bound,
                    outlier_count,
                })
            })
            .collect()
    }

    /// Apply the strategy using fences computed beforehand.
    ///
    /// Returns the resulting frame and how many rows were removed.
    pub fn handle_outliers(
        df: DataFrame,
        summaries: &[OutlierSummary],
        strategy: OutlierStrategy,
    ) -> Result<(DataFrame, usize)> {
        match strategy {
            OutlierStrategy::Keep => {
                debug!("Kept all outliers");
                Ok((df, 0))
            }
            OutlierStrategy::Remove => Self::remove_outliers(df, summaries),
        }
    }

    /// Remove rows with any value outside its feature's fences.
    fn remove_outliers(df: DataFrame, summaries: &[OutlierSummary]) -> Result<(DataFrame, usize)> {
        let original_rows = df.height();
        let mut mask_values = vec![true; original_rows];

        for summary in summaries {
            let values = column_as_optional_f64(&df, &summary.column)?;
            for (keep, value) in mask_values.iter_mut().zip(values) {
                if let Some(val) = value {
                    *keep &= val >= summary.lower_bound && val <= summary.upper_bound;
                }
            }
        }

        let mask = BooleanChunked::from_slice("mask".into(), &mask_values);
        let df = df.filter(&mask)?;

        let rows_removed = original_rows - df.height();
        info!("Removed {} rows containing outliers", rows_removed);
        Ok((df, rows_removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df![
            "col1" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0],
            "col2" => [-1000.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 95.0],
        ]
        .unwrap()
    }

    // ==================== detect tests ====================

    #[test]
    fn test_detect_counts_outliers() {
        let summaries = OutlierHandler::detect(&frame(), &["col1", "col2"]).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].column, "col1");
        assert_eq!(summaries[0].outlier_count, 1);
        assert!((summaries[0].upper_bound - 14.5).abs() < 1e-12);
        assert_eq!(summaries[1].outlier_count, 1);
    }

    #[test]
    fn test_detect_no_outliers() {
        let df = df!["value" => [1.0, 2.0, 3.0, 4.0, 5.0]].unwrap();
        let summaries = OutlierHandler::detect(&df, &["value"]).unwrap();
        assert_eq!(summaries[0].outlier_count, 0);
    }

    #[test]
    fn test_detect_iqr_zero() {
        // All same values: IQR = 0, bounds = [5, 5]
        let df = df!["value" => [5.0, 5.0, 5.0, 5.0, 5.0]].unwrap();
        let summaries = OutlierHandler::detect(&df, &["value"]).unwrap();
        assert_eq!(summaries[0].outlier_count, 0);
    }

    #[test]
    fn test_detect_missing_column() {
        let err = OutlierHandler::detect(&frame(), &["nonexistent"]).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    // ==================== handle_outliers tests ====================

    #[test]
    fn test_keep_strategy_leaves_rows() {
        let df = frame();
        let summaries = OutlierHandler::detect(&df, &["col1", "col2"]).unwrap();
        let (df, removed) =
            OutlierHandler::handle_outliers(df, &summaries, OutlierStrategy::Keep).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(df.height(), 10);
    }

    #[test]
    fn test_remove_strategy_drops_rows_from_any_column() {
        let df = frame();
        let summaries = OutlierHandler::detect(&df, &["col1", "col2"]).unwrap();
        let (df, removed) =
            OutlierHandler::handle_outliers(df, &summaries, OutlierStrategy::Remove).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(df.height(), 8);

        let col1 = df.column("col1").unwrap().f64().unwrap();
        assert!(col1.max().unwrap() < 100.0);
        let col2 = df.column("col2").unwrap().f64().unwrap();
        assert!(col2.min().unwrap() > -1000.0);
    }

    #[test]
    fn test_remove_empty_dataframe() {
        let df = df!["value" => Vec::<f64>::new()].unwrap();
        let summaries = OutlierHandler::detect(&df, &["value"]).unwrap();
        let (df, removed) =
            OutlierHandler::handle_outliers(df, &summaries, OutlierStrategy::Remove).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(df.height(), 0);
    }
}
