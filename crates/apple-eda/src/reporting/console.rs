//! Human-readable text rendering of an [`AnalysisReport`].
//!
//! The layout mirrors the familiar dataframe printouts: features as columns
//! for the summary table, one `name value` line for single-figure statistics.

use crate::types::{AnalysisReport, ColumnSummary, CorrelationMatrix, DescriptiveStatistics};
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

const RULE_WIDTH: usize = 80;
const NAME_WIDTH: usize = 14;
const CELL_WIDTH: usize = 12;

/// Text report printed to the console after a run.
///
/// ```rust,ignore
/// println!("{}", ConsoleReport::new(&outcome.report).with_charts(&outcome.charts));
/// ```
pub struct ConsoleReport<'a> {
    report: &'a AnalysisReport,
    charts: &'a [PathBuf],
}

impl<'a> ConsoleReport<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self {
            report,
            charts: &[],
        }
    }

    /// Also list the chart files that were written.
    pub fn with_charts(mut self, charts: &'a [PathBuf]) -> Self {
        self.charts = charts;
        self
    }

    fn write_missing(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let cleaning = &self.report.cleaning;
        section(f, "MISSING VALUES")?;
        for (name, count) in &cleaning.missing_counts {
            writeln!(f, "{:<w$}{:>8}", name, count, w = NAME_WIDTH)?;
        }
        writeln!(f, "Rows dropped for missing values: {}", cleaning.rows_with_missing)?;
        writeln!(f)?;

        section(f, "DUPLICATES")?;
        writeln!(f, "Duplicate rows removed: {}", cleaning.duplicates_removed)?;
        writeln!(f, "Rows: {} -> {}", cleaning.rows_before, cleaning.rows_after)?;
        writeln!(f)
    }

    fn write_summary(&self, f: &mut Formatter<'_>, stats: &DescriptiveStatistics) -> fmt::Result {
        section(f, "SUMMARY STATISTICS")?;
        write!(f, "{:<w$}", "", w = NAME_WIDTH)?;
        for summary in &stats.summaries {
            write!(f, "{:>w$}", truncate_str(&summary.name, CELL_WIDTH - 1), w = CELL_WIDTH)?;
        }
        writeln!(f)?;

        let rows: [(&str, fn(&ColumnSummary) -> f64); 8] = [
            ("count", |s| s.count as f64),
            ("mean", |s| s.mean),
            ("std", |s| s.std),
            ("min", |s| s.min),
            ("25%", |s| s.q1),
            ("50%", |s| s.median),
            ("75%", |s| s.q3),
            ("max", |s| s.max),
        ];
        for (label, pick) in rows {
            write!(f, "{:<w$}", label, w = NAME_WIDTH)?;
            for summary in &stats.summaries {
                write!(f, "{:>w$}", number(pick(summary)), w = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        write_named_values(f, "MODE", &stats.modes)?;
        write_named_values(f, "SKEWNESS", &stats.skewness)?;
        write_named_values(f, "KURTOSIS", &stats.kurtosis)
    }

    fn write_label_frequency(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let frequency = &self.report.label_frequency;
        section(f, &format!("{} FREQUENCY", frequency.column.to_uppercase()))?;
        writeln!(f, "{:<w$}{:>8}", frequency.column, "count", w = NAME_WIDTH)?;
        for (label, count) in &frequency.counts {
            writeln!(f, "{:<w$}{:>8}", label, count, w = NAME_WIDTH)?;
        }
        writeln!(f)
    }

    fn write_outliers(&self, f: &mut Formatter<'_>) -> fmt::Result {
        section(f, "OUTLIERS (1.5 x IQR)")?;
        writeln!(
            f,
            "{:<w$}{:>c$}{:>c$}{:>c$}",
            "",
            "lower",
            "upper",
            "count",
            w = NAME_WIDTH,
            c = CELL_WIDTH
        )?;
        for outlier in &self.report.outliers {
            writeln!(
                f,
                "{:<w$}{:>c$}{:>c$}{:>c$}",
                outlier.column,
                number(outlier.lower_bound),
                number(outlier.upper_bound),
                outlier.outlier_count,
                w = NAME_WIDTH,
                c = CELL_WIDTH
            )?;
        }
        if self.report.outlier_rows_removed > 0 {
            writeln!(
                f,
                "Rows removed for outliers: {}",
                self.report.outlier_rows_removed
            )?;
        }
        writeln!(f)
    }

    fn write_correlation(&self, f: &mut Formatter<'_>, matrix: &CorrelationMatrix) -> fmt::Result {
        section(f, "CORRELATION MATRIX")?;
        write!(f, "{:<w$}", "", w = NAME_WIDTH)?;
        for label in &matrix.labels {
            write!(f, "{:>w$}", truncate_str(label, CELL_WIDTH - 1), w = CELL_WIDTH)?;
        }
        writeln!(f)?;
        for (label, row) in matrix.labels.iter().zip(&matrix.values) {
            write!(f, "{:<w$}", label, w = NAME_WIDTH)?;
            for value in row {
                write!(f, "{:>w$}", number(*value), w = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }

    fn write_charts(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.charts.is_empty() {
            return Ok(());
        }
        section(f, "CHARTS")?;
        for path in self.charts {
            writeln!(f, "  - {}", path.display())?;
        }
        writeln!(f)
    }
}

impl Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "APPLE QUALITY EDA")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f)?;

        self.write_missing(f)?;
        self.write_summary(f, &self.report.statistics)?;
        self.write_label_frequency(f)?;
        self.write_outliers(f)?;
        self.write_correlation(f, &self.report.correlation)?;
        self.write_charts(f)?;

        write!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}

fn section(f: &mut Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(40))
}

fn write_named_values(f: &mut Formatter<'_>, title: &str, values: &[(String, f64)]) -> fmt::Result {
    section(f, title)?;
    for (name, value) in values {
        writeln!(f, "{:<w$}{:>c$}", name, number(*value), w = NAME_WIDTH, c = CELL_WIDTH)?;
    }
    writeln!(f)
}

/// Six decimals, `NaN` for undefined values.
fn number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", value)
    }
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
