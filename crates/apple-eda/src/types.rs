use polars::prelude::DataFrame;

/// What the cleaner found and removed.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningReport {
    pub rows_before: usize,
    /// Missing values per column, in file column order.
    pub missing_counts: Vec<(String, usize)>,
    pub rows_with_missing: usize,
    pub duplicates_removed: usize,
    pub rows_after: usize,
}

impl CleaningReport {
    pub fn total_missing(&self) -> usize {
        self.missing_counts.iter().map(|(_, count)| count).sum()
    }
}

/// Count, mean, std, min, quartiles and max of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Distribution statistics for every numeric feature, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStatistics {
    pub summaries: Vec<ColumnSummary>,
    pub modes: Vec<(String, f64)>,
    pub skewness: Vec<(String, f64)>,
    pub kurtosis: Vec<(String, f64)>,
}

/// Occurrences of each label value, most frequent first.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFrequency {
    pub column: String,
    pub counts: Vec<(String, usize)>,
}

impl LabelFrequency {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// Pairwise Pearson coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Coefficient between two named columns.
    pub fn get(&self, x: &str, y: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == x)?;
        let j = self.labels.iter().position(|l| l == y)?;
        Some(self.values[i][j])
    }
}

/// IQR fences of one feature and how many values fall outside them.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierSummary {
    pub column: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outlier_count: usize,
}

/// Box-and-whisker figures for one feature within one label group.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub label: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    /// Values beyond the whiskers, drawn as individual points.
    pub fliers: Vec<f64>,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub data: DataFrame,
    pub cleaning: CleaningReport,
    pub outliers: Vec<OutlierSummary>,
    pub outlier_rows_removed: usize,
    pub statistics: DescriptiveStatistics,
    pub label_frequency: LabelFrequency,
    pub correlation: CorrelationMatrix,
}
