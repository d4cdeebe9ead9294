//! Chart rendering.
//!
//! Every chart is drawn with `plotters` into its own SVG file in the output
//! directory. Files are numbered so a directory listing shows them in the
//! order they are produced:
//!
//! 1. one histogram panel with every numeric feature
//! 2. one boxplot per feature, grouped by label
//! 3. a count plot of the label
//! 4. the annotated correlation heatmap
//! 5. one scatter plot per feature pair, colored by label

mod palette;

use crate::error::{EdaError, Result};
use crate::profiler::{HistogramBin, StatisticsProfiler};
use crate::schema::{FEATURE_PAIRS, LABEL_COLUMN, NUMERIC_FEATURES};
use crate::types::{CorrelationMatrix, LabelFrequency};
use crate::utils::{column_as_strings, labelled_points, labels_in_order};
use palette::{BAR_COLOR, category_label, coolwarm, label_color, padded_range};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type DrawResult = anyhow::Result<()>;

/// Renders the fixed chart sequence for a cleaned dataset.
pub struct ChartRenderer {
    output_dir: PathBuf,
    size: (u32, u32),
    bins: usize,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, size: (u32, u32), bins: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            size,
            bins,
        }
    }

    /// File names of the charts, in rendering order.
    pub fn chart_file_names() -> Vec<String> {
        let mut names = vec!["histograms".to_string()];
        names.extend(
            NUMERIC_FEATURES
                .iter()
                .map(|f| format!("boxplot_{}", f.to_lowercase())),
        );
        names.push("quality_counts".to_string());
        names.push("correlation_heatmap".to_string());
        names.extend(FEATURE_PAIRS.iter().map(|(x, y)| {
            format!("scatter_{}_{}", x.to_lowercase(), y.to_lowercase())
        }));

        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| format!("{:02}_{}.svg", i + 1, name))
            .collect()
    }

    /// Render every chart and return the written paths in order.
    ///
    /// The first failure aborts the remaining charts.
    pub fn render_all(
        &self,
        df: &DataFrame,
        correlation: &CorrelationMatrix,
        label_frequency: &LabelFrequency,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir)?;
        info!("Rendering charts into {}", self.output_dir.display());

        let mut names = Self::chart_file_names().into_iter();
        let mut written = Vec::new();
        let mut next_path = || -> PathBuf {
            let name = names.next().unwrap_or_else(|| "chart.svg".to_string());
            self.output_dir.join(name)
        };

        let path = next_path();
        self.render_histograms(df, &path)?;
        written.push(path);

        for feature in NUMERIC_FEATURES {
            let path = next_path();
            self.render_boxplot(df, feature, &path)?;
            written.push(path);
        }

        let path = next_path();
        self.render_count_plot(df, label_frequency, &path)?;
        written.push(path);

        let path = next_path();
        self.render_heatmap(correlation, &path)?;
        written.push(path);

        for (x, y) in FEATURE_PAIRS {
            let path = next_path();
            self.render_scatter(df, x, y, &path)?;
            written.push(path);
        }

        info!("Rendered {} charts", written.len());
        Ok(written)
    }

    /// All numeric features in one panel, one histogram each.
    pub fn render_histograms(&self, df: &DataFrame, path: &Path) -> Result<()> {
        let histograms = NUMERIC_FEATURES
            .iter()
            .map(|name| -> Result<(&str, Vec<HistogramBin>)> {
                Ok((*name, StatisticsProfiler::histogram(df, name, self.bins)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let draw = || -> DrawResult {
            let (w, h) = self.size;
            let root = SVGBackend::new(path, (w * 2, h * 2)).into_drawing_area();
            root.fill(&WHITE)?;
            let root = root.titled("Histograms of Numerical Features", ("sans-serif", 28))?;
            let cells = root.split_evenly((3, 3));

            for ((name, bins), area) in histograms.iter().zip(cells.iter()) {
                let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
                    continue;
                };
                let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;

                let mut chart = ChartBuilder::on(area)
                    .caption(*name, ("sans-serif", 18))
                    .margin(8)
                    .x_label_area_size(28)
                    .y_label_area_size(40)
                    .build_cartesian_2d(first.start..last.end, 0.0..(y_max * 1.05).max(1.0))?;
                chart.configure_mesh().disable_x_mesh().draw()?;
                chart.draw_series(bins.iter().map(|b| {
                    Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BAR_COLOR.filled())
                }))?;
                chart.draw_series(bins.iter().map(|b| {
                    Rectangle::new(
                        [(b.start, 0.0), (b.end, b.count as f64)],
                        BLACK.mix(0.6).stroke_width(1),
                    )
                }))?;
            }

            root.present()?;
            Ok(())
        };
        finish(draw(), path)
    }

    /// Distribution of one feature within each label group.
    pub fn render_boxplot(&self, df: &DataFrame, feature: &str, path: &Path) -> Result<()> {
        let boxes = StatisticsProfiler::grouped_box_summaries(df, feature, LABEL_COLUMN)?;
        let labels: Vec<String> = boxes.iter().map(|b| b.label.clone()).collect();
        let low = boxes.iter().map(|b| b.min).fold(f64::INFINITY, f64::min);
        let high = boxes.iter().map(|b| b.max).fold(f64::NEG_INFINITY, f64::max);
        let (y_min, y_max) = padded_range(low, high);
        let n = boxes.len().max(1);

        let draw = || -> DrawResult {
            let root = SVGBackend::new(path, self.size).into_drawing_area();
            root.fill(&WHITE)?;
            let formatter = |v: &f64| category_label(&labels, *v);

            let mut chart = ChartBuilder::on(&root)
                .caption(format!("{} by Apple Quality", feature), ("sans-serif", 24))
                .margin(12)
                .x_label_area_size(36)
                .y_label_area_size(56)
                .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_min..y_max)?;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(n)
                .x_label_formatter(&formatter)
                .x_desc(LABEL_COLUMN)
                .y_desc(feature)
                .draw()?;

            for (i, b) in boxes.iter().enumerate() {
                let x = i as f64;
                let color = label_color(i);
                let (left, right) = (x - 0.3, x + 0.3);
                let (cap_left, cap_right) = (x - 0.15, x + 0.15);

                chart.draw_series(std::iter::once(Rectangle::new(
                    [(left, b.q1), (right, b.q3)],
                    color.mix(0.8).filled(),
                )))?;
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(left, b.q1), (right, b.q3)],
                    BLACK.stroke_width(1),
                )))?;
                chart.draw_series(vec![
                    PathElement::new(vec![(left, b.median), (right, b.median)], BLACK.stroke_width(2)),
                    PathElement::new(vec![(x, b.q1), (x, b.lower_whisker)], BLACK.stroke_width(1)),
                    PathElement::new(vec![(x, b.q3), (x, b.upper_whisker)], BLACK.stroke_width(1)),
                    PathElement::new(
                        vec![(cap_left, b.lower_whisker), (cap_right, b.lower_whisker)],
                        BLACK.stroke_width(1),
                    ),
                    PathElement::new(
                        vec![(cap_left, b.upper_whisker), (cap_right, b.upper_whisker)],
                        BLACK.stroke_width(1),
                    ),
                ])?;
                chart.draw_series(
                    b.fliers
                        .iter()
                        .map(|v| Circle::new((x, *v), 3, BLACK.mix(0.7).stroke_width(1))),
                )?;
            }

            root.present()?;
            Ok(())
        };
        finish(draw(), path)
    }

    /// Bar per label value, in the label order and colors of the boxplots and scatters.
    pub fn render_count_plot(
        &self,
        df: &DataFrame,
        frequency: &LabelFrequency,
        path: &Path,
    ) -> Result<()> {
        let bars = count_bars(df, frequency)?;
        let labels: Vec<String> = bars.iter().map(|(l, _)| l.clone()).collect();
        let n = labels.len().max(1);
        let y_max = bars.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;

        let draw = || -> DrawResult {
            let root = SVGBackend::new(path, self.size).into_drawing_area();
            root.fill(&WHITE)?;
            let formatter = |v: &f64| category_label(&labels, *v);

            let mut chart = ChartBuilder::on(&root)
                .caption("Distribution of Apple Quality", ("sans-serif", 24))
                .margin(12)
                .x_label_area_size(36)
                .y_label_area_size(56)
                .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..(y_max * 1.1).max(1.0))?;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(n)
                .x_label_formatter(&formatter)
                .x_desc(frequency.column.as_str())
                .y_desc("count")
                .draw()?;

            chart.draw_series(bars.iter().enumerate().map(|(i, (_, count))| {
                let x = i as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *count as f64)], label_color(i).filled())
            }))?;
            chart.draw_series(bars.iter().enumerate().map(|(i, (_, count))| {
                Text::new(
                    count.to_string(),
                    (i as f64, *count as f64),
                    ("sans-serif", 16)
                        .into_font()
                        .color(&BLACK)
                        .pos(Pos::new(HPos::Center, VPos::Bottom)),
                )
            }))?;

            root.present()?;
            Ok(())
        };
        finish(draw(), path)
    }

    /// Square cells colored by coefficient and annotated with its value.
    pub fn render_heatmap(&self, matrix: &CorrelationMatrix, path: &Path) -> Result<()> {
        let n = matrix.labels.len();
        if n == 0 {
            return Err(EdaError::render(file_name(path), "correlation matrix is empty"));
        }
        // first label on top
        let row_labels: Vec<String> = matrix.labels.iter().rev().cloned().collect();
        let side = self.size.0.max(self.size.1);

        let draw = || -> DrawResult {
            let root = SVGBackend::new(path, (side, side)).into_drawing_area();
            root.fill(&WHITE)?;
            let x_formatter = |v: &f64| category_label(&matrix.labels, *v);
            let y_formatter = |v: &f64| category_label(&row_labels, *v);
            let extent = -0.5..(n as f64 - 0.5);

            let mut chart = ChartBuilder::on(&root)
                .caption("Correlation Heatmap of Numerical Features", ("sans-serif", 24))
                .margin(12)
                .x_label_area_size(40)
                .y_label_area_size(96)
                .build_cartesian_2d(extent.clone(), extent)?;
            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(n)
                .y_labels(n)
                .x_label_formatter(&x_formatter)
                .y_label_formatter(&y_formatter)
                .draw()?;

            let cells: Vec<(f64, f64, f64)> = (0..n)
                .flat_map(|i| (0..n).map(move |j| (i, j)))
                .map(|(i, j)| (j as f64, (n - 1 - i) as f64, matrix.values[i][j]))
                .collect();

            chart.draw_series(cells.iter().map(|(x, y, r)| {
                Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], coolwarm(*r).filled())
            }))?;
            chart.draw_series(cells.iter().map(|(x, y, r)| {
                let text_color = if r.abs() > 0.6 { WHITE } else { BLACK };
                Text::new(
                    annotate(*r),
                    (*x, *y),
                    ("sans-serif", 14)
                        .into_font()
                        .color(&text_color)
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                )
            }))?;

            root.present()?;
            Ok(())
        };
        finish(draw(), path)
    }

    /// One point per row, colored by label, with a legend.
    pub fn render_scatter(&self, df: &DataFrame, x: &str, y: &str, path: &Path) -> Result<()> {
        let points = labelled_points(df, x, y, LABEL_COLUMN)?;
        let groups = labels_in_order(points.iter().map(|(_, _, l)| l.as_str()));

        let bounds = |pick: fn(&(f64, f64, String)) -> f64| {
            let lo = points.iter().map(pick).fold(f64::INFINITY, f64::min);
            let hi = points.iter().map(pick).fold(f64::NEG_INFINITY, f64::max);
            padded_range(lo, hi)
        };
        let (x_min, x_max) = bounds(|p| p.0);
        let (y_min, y_max) = bounds(|p| p.1);

        let draw = || -> DrawResult {
            let root = SVGBackend::new(path, self.size).into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(
                    format!("{} vs. {} (colored by {})", y, x, LABEL_COLUMN),
                    ("sans-serif", 22),
                )
                .margin(12)
                .x_label_area_size(36)
                .y_label_area_size(56)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
            chart.configure_mesh().x_desc(x).y_desc(y).draw()?;

            for (i, group) in groups.iter().enumerate() {
                let color = label_color(i);
                chart
                    .draw_series(
                        points
                            .iter()
                            .filter(|(_, _, l)| l == group)
                            .map(|(px, py, _)| Circle::new((*px, *py), 3, color.mix(0.6).filled())),
                    )?
                    .label(group.as_str())
                    .legend(move |(lx, ly)| Circle::new((lx, ly), 4, color.filled()));
            }

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;

            root.present()?;
            Ok(())
        };
        finish(draw(), path)
    }
}

/// Value shown inside a heatmap cell.
/// Label counts ordered by first appearance in `df`.
fn count_bars(df: &DataFrame, frequency: &LabelFrequency) -> Result<Vec<(String, usize)>> {
    let values = column_as_strings(df, &frequency.column)?;
    let mut order = labels_in_order(values.iter().map(String::as_str));
    for (label, _) in &frequency.counts {
        if !order.contains(label) {
            order.push(label.clone());
        }
    }
    Ok(order
        .into_iter()
        .map(|label| {
            let count = frequency
                .counts
                .iter()
                .find(|(l, _)| *l == label)
                .map_or(0, |(_, c)| *c);
            (label, count)
        })
        .collect())
}

fn annotate(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn finish(result: DrawResult, path: &Path) -> Result<()> {
    result.map_err(|e| EdaError::render(file_name(path), e))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple_frame() -> DataFrame {
        polars::prelude::df![
            "Size" => [-3.97, -1.19, -0.29, -0.65, 1.36, -2.31],
            "Weight" => [-2.51, -2.84, -1.35, -1.74, -0.85, 0.49],
            "Sweetness" => [5.35, 3.66, -1.74, -0.34, 1.24, -1.80],
            "Crunchiness" => [-1.01, 1.59, -0.50, 1.80, 0.35, -0.27],
            "Juiciness" => [1.84, 0.85, 0.19, -0.08, 1.24, -2.28],
            "Ripeness" => [0.33, 0.87, 2.49, -0.23, 0.64, 3.31],
            "Acidity" => [-0.49, -0.72, 2.62, -1.08, 1.00, -1.18],
            "Quality" => ["good", "good", "bad", "good", "bad", "bad"],
        ]
        .unwrap()
    }

    #[test]
    fn test_chart_file_names_order() {
        let names = ChartRenderer::chart_file_names();
        assert_eq!(names.len(), 13);
        assert_eq!(names[0], "01_histograms.svg");
        assert_eq!(names[1], "02_boxplot_size.svg");
        assert_eq!(names[7], "08_boxplot_acidity.svg");
        assert_eq!(names[8], "09_quality_counts.svg");
        assert_eq!(names[9], "10_correlation_heatmap.svg");
        assert_eq!(names[10], "11_scatter_sweetness_juiciness.svg");
        assert_eq!(names[12], "13_scatter_size_weight.svg");
    }

    #[test]
    fn test_annotate() {
        assert_eq!(annotate(0.12345), "0.12");
        assert_eq!(annotate(-1.0), "-1.00");
        assert_eq!(annotate(f64::NAN), "nan");
    }

    #[test]
    fn test_render_all_writes_every_chart() {
        let dir = tempfile::tempdir().unwrap();
        let df = apple_frame();
        let correlation = StatisticsProfiler::correlation_matrix(&df, &NUMERIC_FEATURES).unwrap();
        let frequency = StatisticsProfiler::label_frequency(&df, LABEL_COLUMN).unwrap();

        let renderer = ChartRenderer::new(dir.path(), (400, 300), 30);
        let written = renderer.render_all(&df, &correlation, &frequency).unwrap();

        assert_eq!(written.len(), 13);
        for (path, name) in written.iter().zip(ChartRenderer::chart_file_names()) {
            assert_eq!(path.file_name().unwrap().to_str().unwrap(), name);
            let svg = std::fs::read_to_string(path).unwrap();
            assert!(svg.contains("<svg"));
        }
        let heatmap = std::fs::read_to_string(&written[9]).unwrap();
        assert!(heatmap.contains("1.00"));
    }

    #[test]
    fn test_count_bars_follow_boxplot_label_order() {
        let df = apple_frame();
        let frequency = StatisticsProfiler::label_frequency(&df, LABEL_COLUMN).unwrap();
        let bars = count_bars(&df, &frequency).unwrap();
        assert_eq!(
            bars,
            vec![("good".to_string(), 3), ("bad".to_string(), 3)]
        );

        let df = apple_frame().reverse();
        let frequency = StatisticsProfiler::label_frequency(&df, LABEL_COLUMN).unwrap();
        let bars = count_bars(&df, &frequency).unwrap();
        let boxes = StatisticsProfiler::grouped_box_summaries(&df, "Size", LABEL_COLUMN).unwrap();
        let box_labels: Vec<&str> = boxes.iter().map(|b| b.label.as_str()).collect();
        let bar_labels: Vec<&str> = bars.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(bar_labels, vec!["bad", "good"]);
        assert_eq!(bar_labels, box_labels);
    }

    #[test]
    fn test_render_boxplot_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let df = apple_frame().drop("Ripeness").unwrap();
        let renderer = ChartRenderer::new(dir.path(), (400, 300), 30);
        let err = renderer
            .render_boxplot(&df, "Ripeness", &dir.path().join("box.svg"))
            .unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_render_heatmap_empty_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path(), (400, 300), 30);
        let matrix = CorrelationMatrix {
            labels: vec![],
            values: vec![],
        };
        let err = renderer
            .render_heatmap(&matrix, &dir.path().join("heat.svg"))
            .unwrap_err();
        assert_eq!(err.error_code(), "RENDER_FAILED");
    }
}
