//! Descriptive statistics over the cleaned dataset.
//!
//! This module provides:
//! - The count/mean/std/min/quartiles/max summary of each numeric feature
//! - Mode, skewness and kurtosis
//! - Label frequency counts
//! - The Pearson correlation matrix
//! - Per-label box summaries for grouped boxplots

pub(crate) mod statistics;

pub use statistics::HistogramBin;

use crate::error::{EdaError, Result};
use crate::types::{
    BoxSummary, ColumnSummary, CorrelationMatrix, DescriptiveStatistics, LabelFrequency,
};
use crate::utils::{column_as_f64, column_as_strings, labelled_values, labels_in_order};
use polars::prelude::*;
use tracing::debug;

/// Computes the summary figures the report and charts are built from.
pub struct StatisticsProfiler;

impl StatisticsProfiler {
    /// Count, mean, std, min, quartiles and max for one column.
    pub fn summarize_column(df: &DataFrame, name: &str) -> Result<ColumnSummary> {
        let values = column_as_f64(df, name)?;
        let sorted = statistics::sorted(&values);

        Ok(ColumnSummary {
            name: name.to_string(),
            count: values.len(),
            mean: statistics::mean(&values),
            std: statistics::sample_std(&values),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q1: statistics::quantile_sorted(&sorted, 0.25),
            median: statistics::quantile_sorted(&sorted, 0.5),
            q3: statistics::quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        })
    }

    /// Summary, mode, skewness and kurtosis for each listed column, in order.
    pub fn describe(df: &DataFrame, columns: &[&str]) -> Result<DescriptiveStatistics> {
        if df.height() == 0 {
            return Err(EdaError::EmptyDataset(
                "no rows left after cleaning".to_string(),
            ));
        }

        let mut stats = DescriptiveStatistics {
            summaries: Vec::with_capacity(columns.len()),
            modes: Vec::with_capacity(columns.len()),
            skewness: Vec::with_capacity(columns.len()),
            kurtosis: Vec::with_capacity(columns.len()),
        };

        for name in columns {
            let values = column_as_f64(df, name)?;
            let key = name.to_string();

            stats.summaries.push(Self::summarize_column(df, name)?);
            stats.modes.push((
                key.clone(),
                statistics::mode(&values).unwrap_or(f64::NAN),
            ));
            stats.skewness.push((key.clone(), statistics::skewness(&values)));
            stats.kurtosis.push((key, statistics::kurtosis(&values)));
            debug!("Summarized {} over {} values", name, values.len());
        }

        Ok(stats)
    }

    /// Occurrences of each value of a categorical column, most frequent first.
    ///
    /// Ties are broken by label so the order is deterministic.
    pub fn label_frequency(df: &DataFrame, column: &str) -> Result<LabelFrequency> {
        let labels = column_as_strings(df, column)?;

        let mut counts: Vec<(String, usize)> = Vec::new();
        for label in labels {
            match counts.iter().position(|(seen, _)| *seen == label) {
                Some(i) => counts[i].1 += 1,
                None => counts.push((label, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(LabelFrequency {
            column: column.to_string(),
            counts,
        })
    }

    /// Pairwise Pearson coefficients of the listed columns.
    pub fn correlation_matrix(df: &DataFrame, columns: &[&str]) -> Result<CorrelationMatrix> {
        let series: Vec<Vec<f64>> = columns
            .iter()
            .map(|name| column_as_f64(df, name))
            .collect::<Result<_>>()?;

        let size = columns.len();
        let mut values = vec![vec![f64::NAN; size]; size];
        for i in 0..size {
            for j in i..size {
                let r = statistics::pearson(&series[i], &series[j]);
                // a column always correlates perfectly with itself unless it is constant
                let r = if i == j && !r.is_nan() { 1.0 } else { r };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            labels: columns.iter().map(|c| c.to_string()).collect(),
            values,
        })
    }

    /// Box summaries of a feature split by label, labels in order of appearance.
    pub fn grouped_box_summaries(
        df: &DataFrame,
        feature: &str,
        label: &str,
    ) -> Result<Vec<BoxSummary>> {
        let pairs = labelled_values(df, feature, label)?;
        let groups = labels_in_order(pairs.iter().map(|(l, _)| l.as_str()));

        Ok(groups
            .iter()
            .filter_map(|group| {
                let values: Vec<f64> = pairs
                    .iter()
                    .filter(|(l, _)| l == group)
                    .map(|(_, v)| *v)
                    .collect();
                statistics::box_summary(group, &values)
            })
            .collect())
    }

    /// Equal-width histogram of one column.
    pub fn histogram(df: &DataFrame, name: &str, bins: usize) -> Result<Vec<HistogramBin>> {
        let values = column_as_f64(df, name)?;
        Ok(statistics::histogram(&values, bins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> DataFrame {
        df![
            "Size" => [1.0, 2.0, 3.0, 4.0],
            "Weight" => [2.0, 4.0, 6.0, 8.0],
            "Acidity" => [4.0, 3.0, 2.0, 1.0],
            "Quality" => ["good", "bad", "good", "good"],
        ]
        .unwrap()
    }

    #[test]
    fn test_summarize_column_matches_hand_computation() {
        let summary = StatisticsProfiler::summarize_column(&fixture(), "Size").unwrap();
        assert_eq!(summary.count, 4);
        assert!((summary.mean - 2.5).abs() < 1e-12);
        // variance = 5 / 3
        assert!((summary.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert!((summary.q1 - 1.75).abs() < 1e-12);
        assert!((summary.median - 2.5).abs() < 1e-12);
        assert!((summary.q3 - 3.25).abs() < 1e-12);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn test_describe_keeps_column_order() {
        let stats =
            StatisticsProfiler::describe(&fixture(), &["Weight", "Size", "Acidity"]).unwrap();
        let names: Vec<&str> = stats.summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Weight", "Size", "Acidity"]);
        assert_eq!(stats.modes[0], ("Weight".to_string(), 2.0));
        assert!(stats.skewness[1].1.abs() < 1e-12);
    }

    #[test]
    fn test_describe_missing_column() {
        let err = StatisticsProfiler::describe(&fixture(), &["Size", "Juiciness"]).unwrap_err();
        assert!(matches!(err, EdaError::ColumnNotFound(ref name) if name == "Juiciness"));
    }

    #[test]
    fn test_describe_empty_dataset() {
        let df = fixture().head(Some(0));
        let err = StatisticsProfiler::describe(&df, &["Size"]).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_DATASET");
    }

    #[test]
    fn test_label_frequency_sorted_and_sums_to_rows() {
        let df = fixture();
        let freq = StatisticsProfiler::label_frequency(&df, "Quality").unwrap();
        assert_eq!(
            freq.counts,
            vec![("good".to_string(), 3), ("bad".to_string(), 1)]
        );
        assert_eq!(freq.total(), df.height());
    }

    #[test]
    fn test_label_frequency_tie_breaks_by_label() {
        let df = df!["Quality" => ["good", "bad", "bad", "good"]].unwrap();
        let freq = StatisticsProfiler::label_frequency(&df, "Quality").unwrap();
        assert_eq!(
            freq.counts,
            vec![("bad".to_string(), 2), ("good".to_string(), 2)]
        );
    }

    #[test]
    fn test_correlation_matrix() {
        let matrix =
            StatisticsProfiler::correlation_matrix(&fixture(), &["Size", "Weight", "Acidity"])
                .unwrap();
        assert_eq!(matrix.values.len(), 3);
        assert_eq!(matrix.get("Size", "Size"), Some(1.0));
        assert!((matrix.get("Size", "Weight").unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get("Acidity", "Size").unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(matrix.get("Size", "Weight"), matrix.get("Weight", "Size"));
        assert_eq!(matrix.get("Size", "Missing"), None);
    }

    #[test]
    fn test_grouped_box_summaries_in_appearance_order() {
        let boxes =
            StatisticsProfiler::grouped_box_summaries(&fixture(), "Size", "Quality").unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].label, "good");
        assert_eq!(boxes[0].min, 1.0);
        assert_eq!(boxes[0].max, 4.0);
        assert!((boxes[0].median - 3.0).abs() < 1e-12);
        assert_eq!(boxes[1].label, "bad");
        assert_eq!(boxes[1].median, 2.0);
    }
}
