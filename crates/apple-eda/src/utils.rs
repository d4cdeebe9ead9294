//! Shared helpers for pulling typed values out of a DataFrame.

use crate::error::{EdaError, Result};
use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Look up a column, mapping absence to [`EdaError::ColumnNotFound`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| EdaError::ColumnNotFound(name.to_string()))
}

/// Non-null values of a column as `f64`, in row order.
pub fn column_as_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = require_column(df, name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().flatten().collect())
}

/// Non-null values of a column rendered as text, in row order.
pub fn column_as_strings(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let series = require_column(df, name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .flatten()
        .map(|value| value.to_string())
        .collect())
}

/// Values of a numeric column with nulls kept in place.
pub fn column_as_optional_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = require_column(df, name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

/// Feature values paired with the label of their row; rows missing either are skipped.
pub fn labelled_values(df: &DataFrame, feature: &str, label: &str) -> Result<Vec<(String, f64)>> {
    let values = column_as_optional_f64(df, feature)?;
    let labels = require_column(df, label)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(labels
        .str()?
        .into_iter()
        .zip(values)
        .filter_map(|(label, value)| Some((label?.to_string(), value?)))
        .collect())
}

/// `(x, y, label)` triples for rows where all three are present.
pub fn labelled_points(
    df: &DataFrame,
    x: &str,
    y: &str,
    label: &str,
) -> Result<Vec<(f64, f64, String)>> {
    let xs = column_as_optional_f64(df, x)?;
    let ys = column_as_optional_f64(df, y)?;
    let labels = require_column(df, label)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(labels
        .str()?
        .into_iter()
        .zip(xs.into_iter().zip(ys))
        .filter_map(|(label, (x, y))| Some((x?, y?, label?.to_string())))
        .collect())
}

/// Distinct labels in order of first appearance.
pub fn labels_in_order<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for label in labels {
        if !seen.iter().any(|s| s == label) {
            seen.push(label.to_string());
        }
    }
    seen
}
