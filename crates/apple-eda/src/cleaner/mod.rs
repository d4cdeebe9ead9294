//! Data cleaning for the loaded dataset.
//!
//! This module provides functionality for:
//! - Counting missing values per column
//! - Dropping every row that has a missing value
//! - Dropping exact duplicate rows (first occurrence wins)
//! - Reporting and optionally removing IQR outliers

mod outliers;

pub use outliers::OutlierHandler;

use crate::error::Result;
use crate::types::CleaningReport;
use polars::prelude::*;
use tracing::{debug, info};

/// Data cleaner enforcing the "no missing values, no duplicate rows" invariant.
pub struct DataCleaner;

impl DataCleaner {
    /// Missing values per column, in column order. Float `NaN` counts as missing.
    pub fn missing_counts(df: &DataFrame) -> Result<Vec<(String, usize)>> {
        df.get_columns()
            .iter()
            .map(|col| {
                let missing = present_mask(col)?
                    .into_iter()
                    .filter(|present| !present.unwrap_or(false))
                    .count();
                Ok((col.name().to_string(), missing))
            })
            .collect()
    }

    /// Remove every row with a missing value in any column.
    ///
    /// Returns the filtered frame and the number of rows removed.
    pub fn drop_missing(df: DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        if before == 0 || df.width() == 0 {
            return Ok((df, 0));
        }

        let mut complete = BooleanChunked::full("complete".into(), true, before);
        for col in df.get_columns() {
            complete = &complete & &present_mask(col)?;
        }

        let df = df.filter(&complete)?;
        let removed = before - df.height();
        debug!("Removed {} rows with missing values", removed);
        Ok((df, removed))
    }

    /// Remove rows identical to an earlier row across all columns.
    ///
    /// Surviving rows keep their original order. Returns the filtered frame
    /// and the number of duplicates removed.
    pub fn drop_duplicates(df: DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        if before == 0 || df.width() == 0 {
            return Ok((df, 0));
        }

        let df = df
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        let removed = before - df.height();
        debug!("Removed {} duplicate rows", removed);
        Ok((df, removed))
    }

    /// Run the full cleaning pass: missing rows first, then duplicates.
    pub fn clean(df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        info!("Performing data cleaning...");

        let rows_before = df.height();
        let missing_counts = Self::missing_counts(&df)?;
        let (df, rows_with_missing) = Self::drop_missing(df)?;
        let (df, duplicates_removed) = Self::drop_duplicates(df)?;

        let report = CleaningReport {
            rows_before,
            missing_counts,
            rows_with_missing,
            duplicates_removed,
            rows_after: df.height(),
        };

        info!(
            "Cleaning complete: {} -> {} rows ({} with missing values, {} duplicates)",
            report.rows_before, report.rows_after, report.rows_with_missing, report.duplicates_removed
        );
        Ok((df, report))
    }
}

/// Per-row presence for one column: not null, and not `NaN` for float columns.
fn present_mask(col: &Column) -> Result<BooleanChunked> {
    let series = col.as_materialized_series();
    match series.dtype() {
        DataType::Float32 | DataType::Float64 => {
            let values = series.cast(&DataType::Float64)?;
            let present: Vec<bool> = values
                .f64()?
                .into_iter()
                .map(|value| value.is_some_and(|v| !v.is_nan()))
                .collect();
            Ok(BooleanChunked::from_slice(col.name().clone(), &present))
        }
        _ => Ok(series.is_not_null()),
    }
}
