//! Stages of an analysis run, used for progress logging.

/// Stages of the analysis pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisStage {
    /// Reading and type-checking the input file
    Loading,
    /// Dropping rows with missing values and duplicate rows
    Cleaning,
    /// Detecting (and optionally removing) outliers
    OutlierHandling,
    /// Descriptive statistics, label counts and correlations
    Statistics,
    /// Writing chart files
    Rendering,
    /// Run finished
    Complete,
}

impl AnalysisStage {
    /// Every stage that does work, in order.
    pub const ALL: [AnalysisStage; 5] = [
        Self::Loading,
        Self::Cleaning,
        Self::OutlierHandling,
        Self::Statistics,
        Self::Rendering,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Dataset",
            Self::Cleaning => "Cleaning Data",
            Self::OutlierHandling => "Handling Outliers",
            Self::Statistics => "Computing Statistics",
            Self::Rendering => "Rendering Charts",
            Self::Complete => "Complete",
        }
    }

    /// One-based position among the working stages; `None` for `Complete`.
    pub fn step(&self) -> Option<usize> {
        Self::ALL.iter().position(|s| s == self).map(|i| i + 1)
    }

    /// Log prefix such as `[2/5] Cleaning Data`.
    pub fn banner(&self) -> String {
        match self.step() {
            Some(step) => format!("[{}/{}] {}", step, Self::ALL.len(), self.display_name()),
            None => self.display_name().to_string(),
        }
    }
}
