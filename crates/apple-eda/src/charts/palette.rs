//! Colors and axis helpers shared by the charts.

use plotters::style::RGBColor;

/// Per-label colors, cycled by label index.
const LABEL_COLORS: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

pub(crate) const BAR_COLOR: RGBColor = RGBColor(76, 114, 176);
pub(crate) const MISSING_COLOR: RGBColor = RGBColor(200, 200, 200);

pub(crate) fn label_color(index: usize) -> RGBColor {
    LABEL_COLORS[index % LABEL_COLORS.len()]
}

/// Diverging blue-white-red scale for a coefficient in `[-1, 1]`.
pub(crate) fn coolwarm(value: f64) -> RGBColor {
    const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    if value.is_nan() {
        return MISSING_COLOR;
    }
    let t = value.clamp(-1.0, 1.0);
    let (from, to, w) = if t < 0.0 { (MID, COOL, -t) } else { (MID, WARM, t) };
    let lerp = |a: f64, b: f64| (a + (b - a) * w).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Name of the category drawn at integer position `value`, empty between categories.
pub(crate) fn category_label(labels: &[String], value: f64) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Axis range with a small margin on both sides; never empty.
pub(crate) fn padded_range(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span <= 0.0 {
        return (min - 0.5, max + 0.5);
    }
    (min - span * 0.05, max + span * 0.05)
}
