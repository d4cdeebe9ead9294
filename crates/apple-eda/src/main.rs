//! CLI entry point for the apple quality analysis.

use anyhow::{Context, Result};
use apple_eda::{Analysis, AnalysisConfig, ConsoleReport, OutlierStrategy};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use tracing::info;

/// CLI-compatible outlier strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutlierStrategy {
    /// Report outliers but keep every row
    Keep,
    /// Remove rows containing outliers
    Remove,
}

impl From<CliOutlierStrategy> for OutlierStrategy {
    fn from(cli: CliOutlierStrategy) -> Self {
        match cli {
            CliOutlierStrategy::Keep => OutlierStrategy::Keep,
            CliOutlierStrategy::Remove => OutlierStrategy::Remove,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory data analysis of the apple quality dataset",
    long_about = "Cleans the apple quality dataset, prints descriptive statistics and \
                  renders histograms, boxplots, a count plot, a correlation heatmap and \
                  scatter plots as SVG files.\n\n\
                  EXAMPLES:\n  \
                  # Analyze the dataset in the current directory\n  \
                  apple-eda\n\n  \
                  # Custom input and output, drop outlier rows\n  \
                  apple-eda -i data/apples.csv -o charts/ --outlier-strategy remove\n\n  \
                  # Statistics only, no prompt\n  \
                  apple-eda --no-charts --no-wait"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long, default_value = "Apple_Quality_Dataset.csv")]
    input: String,

    /// Output directory for chart files
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the report)
    #[arg(short, long)]
    quiet: bool,

    /// Strategy for handling outliers
    #[arg(long, value_enum, default_value = "keep")]
    outlier_strategy: CliOutlierStrategy,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Exit without waiting for Enter
    #[arg(long)]
    no_wait: bool,
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Block until the operator presses Enter (or stdin closes).
fn wait_for_enter() -> Result<()> {
    print!("Press Enter to close...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet);

    let config = AnalysisConfig::builder()
        .input_path(&args.input)
        .output_dir(&args.output)
        .outlier_strategy(args.outlier_strategy.into())
        .render_charts(!args.no_charts)
        .build()
        .context("Invalid configuration")?;

    info!("{}", "=".repeat(80));
    info!("Starting apple quality analysis...");
    info!("{}", "=".repeat(80));

    let outcome = Analysis::new(config)
        .run()
        .with_context(|| format!("Analysis of '{}' failed", args.input))?;

    println!();
    println!(
        "{}",
        ConsoleReport::new(&outcome.report).with_charts(&outcome.charts)
    );

    if !args.no_wait {
        wait_for_enter()?;
    }

    Ok(())
}
