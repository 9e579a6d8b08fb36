use crate::frequency::FrequencyTable;

/// Fraction of a unit slot each bar covers.
pub const BAR_WIDTH: f64 = 0.8;

/// Headroom above the tallest bar.
const Y_MARGIN: f64 = 0.05;

/// A bar already clipped to the x window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub left: f64,
    pub right: f64,
    pub height: f64,
}

/// Compute the y-axis upper bound for the histogram
pub fn compute_chart_params(table: &FrequencyTable) -> f64 {
    let highest = table.peak_count() as f64;
    if highest <= 0.0 {
        1.0
    } else {
        highest * (1.0 + Y_MARGIN)
    }
}

/// Bars centred on each distance, clipped to `window`. Bars wholly outside
/// the window are dropped; their counts still belong to the table.
pub fn visible_bars(table: &FrequencyTable, window: (f64, f64)) -> Vec<Bar> {
    let (lo, hi) = window;
    table
        .iter()
        .filter_map(|(distance, count)| {
            let centre = distance as f64;
            let left = (centre - BAR_WIDTH / 2.0).max(lo);
            let right = (centre + BAR_WIDTH / 2.0).min(hi);
            (left < right).then_some(Bar {
                left,
                right,
                height: count as f64,
            })
        })
        .collect()
}

/// Split `[from, to]` into dash intervals of length `dash` separated by `gap`.
pub fn dash_segments(from: f64, to: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let mut segments = Vec::new();
    if dash <= 0.0 || to <= from {
        return segments;
    }
    let mut start = from;
    while start < to {
        segments.push((start, (start + dash).min(to)));
        start += dash + gap.max(0.0);
    }
    segments
}

/// Dash intervals for a vertical reference line at `x`, spanning `[0, y_top]`.
/// A line outside `window` is clipped away entirely rather than pinned to the edge.
pub fn reference_dashes(
    x: f64,
    window: (f64, f64),
    y_top: f64,
    dash: f64,
    gap: f64,
) -> Vec<(f64, f64)> {
    let (lo, hi) = window;
    if !(lo..=hi).contains(&x) {
        return Vec::new();
    }
    dash_segments(0.0, y_top, y_top * dash, y_top * gap)
}

/// Tick text for a hamming distance: whole bits print bare, anything else
/// keeps one decimal.
pub fn distance_tick(bits: f64) -> String {
    let whole = bits.round();
    if (bits - whole).abs() < 1e-9 {
        format!("{}", whole as i64)
    } else {
        format!("{bits:.1}")
    }
}
