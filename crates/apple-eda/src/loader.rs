//! CSV loading for the apple quality dataset.
//!
//! Loading happens in two steps. [`load_dataset`] reads the file and checks the
//! required columns; column types are left as inferred so that a row which is
//! dropped for missing values cannot fail the load with stray text.
//! [`normalize_columns`] runs on the cleaned frame and strictly casts the
//! features to `Float64`.
//!
//! An absent or malformed file is [`EdaError::LoadFailed`], a missing column
//! [`EdaError::ColumnNotFound`], and text left in a feature after cleaning
//! [`EdaError::TypeConversionFailed`].

use crate::error::{EdaError, Result, ResultExt};
use crate::schema::{LABEL_COLUMN, NULL_TOKENS, NUMERIC_FEATURES, required_columns};
use crate::utils::{is_numeric_dtype, require_column};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Read the dataset from a CSV file and check its columns.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let load_failed = |reason: String| EdaError::LoadFailed {
        path: path.display().to_string(),
        reason,
    };

    if !path.is_file() {
        return Err(load_failed("file not found".to_string()));
    }

    info!("Loading dataset from: {}", path.display());

    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| load_failed(e.to_string()))?
        .finish()
        .map_err(|e| load_failed(e.to_string()))?;

    check_required_columns(&df)?;

    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

/// Fail with [`EdaError::ColumnNotFound`] on the first absent required column.
pub fn check_required_columns(df: &DataFrame) -> Result<()> {
    for name in required_columns() {
        require_column(df, name)?;
    }
    Ok(())
}

/// Coerce features to `Float64` and the label to text.
///
/// A numeric feature that holds any non-numeric text fails the strict cast.
pub fn normalize_columns(mut df: DataFrame) -> Result<DataFrame> {
    check_required_columns(&df)?;

    for name in NUMERIC_FEATURES {
        let column = require_column(&df, name)?;
        if column.dtype() == &DataType::Float64 {
            continue;
        }

        let series = column.as_materialized_series();
        let conversion_failed = |reason: String| EdaError::TypeConversionFailed {
            column: name.to_string(),
            target_type: "Float64".to_string(),
            reason,
        };
        if !is_numeric_dtype(series.dtype()) && series.dtype() != &DataType::String {
            return Err(conversion_failed(format!(
                "unsupported source type {}",
                series.dtype()
            )));
        }

        let casted = series
            .strict_cast(&DataType::Float64)
            .map_err(|e| conversion_failed(e.to_string()))?;
        df.replace(name, casted)
            .context(format!("Replacing feature column {}", name))?;
        debug!("Converted {} to Float64", name);
    }

    let label = require_column(&df, LABEL_COLUMN)?
        .as_materialized_series()
        .cast(&DataType::String)
        .context("Casting label column to text")?;
    df.replace(LABEL_COLUMN, label)
        .context("Replacing label column")?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple_frame() -> DataFrame {
        df![
            "Size" => [1.0, 2.0],
            "Weight" => [1i64, 2],
            "Sweetness" => [1.0, 2.0],
            "Crunchiness" => [1.0, 2.0],
            "Juiciness" => [1.0, 2.0],
            "Ripeness" => [1.0, 2.0],
            "Acidity" => ["0.5", "-1.25"],
            "Quality" => ["good", "bad"],
        ]
        .unwrap()
    }

    #[test]
    fn test_normalize_casts_features_to_float() {
        let df = normalize_columns(apple_frame()).unwrap();
        for name in NUMERIC_FEATURES {
            assert_eq!(df.column(name).unwrap().dtype(), &DataType::Float64);
        }
        let acidity: Vec<f64> = df
            .column("Acidity")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(acidity, vec![0.5, -1.25]);
    }

    #[test]
    fn test_normalize_keeps_extra_columns() {
        let mut df = apple_frame();
        df.with_column(Series::new("A_id".into(), &[0i64, 1]))
            .unwrap();
        let df = normalize_columns(df).unwrap();
        assert_eq!(df.width(), 9);
        assert_eq!(df.column("A_id").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_normalize_missing_column() {
        let df = apple_frame().drop("Ripeness").unwrap();
        let err = normalize_columns(df).unwrap_err();
        assert!(matches!(err, EdaError::ColumnNotFound(ref name) if name == "Ripeness"));
    }

    #[test]
    fn test_normalize_rejects_text_in_feature() {
        let mut df = apple_frame();
        df.replace("Acidity", Series::new("Acidity".into(), &["0.5", "sour"]))
            .unwrap();
        let err = normalize_columns(df).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_CONVERSION_FAILED");
        assert!(err.to_string().contains("Acidity"));
    }

    #[test]
    fn test_normalize_is_noop_on_normalized_frame() {
        let df = normalize_columns(apple_frame()).unwrap();
        let again = normalize_columns(df.clone()).unwrap();
        assert!(df.equals(&again));
    }

    #[test]
    fn test_label_cast_failure_carries_context() {
        let mut df = apple_frame();
        let nested = Series::new(
            "Quality".into(),
            &[Series::new("".into(), &[1i64]), Series::new("".into(), &[2i64])],
        );
        df.replace("Quality", nested).unwrap();
        let err = normalize_columns(df).unwrap_err();
        assert_eq!(err.error_code(), "POLARS_ERROR");
        assert!(err.to_string().starts_with("Casting label column to text"));
    }

    #[test]
    fn test_load_reads_every_null_token() {
        let dir = tempfile::tempdir().unwrap();
        let header = "Size,Weight,Sweetness,Crunchiness,Juiciness,Ripeness,Acidity,Quality";
        for token in NULL_TOKENS {
            let path = dir.path().join("apples.csv");
            let body = format!("{header}\n1.0,2.0,3.0,4.0,5.0,6.0,7.0,good\n{token},2.0,3.0,4.0,5.0,6.0,7.0,bad\n");
            std::fs::write(&path, body).unwrap();

            let df = load_dataset(&path).unwrap();
            let size = df.column("Size").unwrap();
            assert_eq!(size.null_count(), 1, "token {:?} was not read as missing", token);
            assert_eq!(size.dtype(), &DataType::Float64);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset("does/not/exist.csv").unwrap_err();
        assert_eq!(err.error_code(), "LOAD_FAILED");
        assert!(err.to_string().contains("file not found"));
    }
}
