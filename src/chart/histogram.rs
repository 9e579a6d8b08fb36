use super::charting::{compute_chart_params, distance_tick, reference_dashes, visible_bars};
use super::Figure;
use crate::util::group_thousands;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;

const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
const WHEAT: RGBColor = RGBColor(245, 222, 179);
const FOREST: RGBColor = RGBColor(0, 128, 0);
const RED_LINE: RGBColor = RGBColor(255, 0, 0);
/// Axes background of the dark-grid look.
const GRID_BG: RGBColor = RGBColor(234, 234, 242);

const FONT: &str = "sans-serif";

/// Converts lengths given in points into backend units.
#[derive(Debug, Clone, Copy)]
struct Scale(f64);

impl Scale {
    fn f(self, pt: f64) -> f64 {
        pt * self.0
    }

    fn px(self, pt: f64) -> i32 {
        (pt * self.0).round() as i32
    }

    fn stroke(self, pt: f64) -> u32 {
        ((pt * self.0).round() as u32).max(1)
    }
}

/// Draw `figure` onto `root`, whose backend resolves `dpi` units per inch.
pub fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    dpi: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let s = Scale(dpi as f64 / 72.0);
    root.fill(&WHITE)?;

    let title_style = (FONT, s.f(14.0), FontStyle::Bold).into_font().color(&BLACK);
    let body = root
        .margin(s.px(6.0), 0, 0, 0)
        .titled(&figure.title[0], title_style.clone())?
        .titled(&figure.title[1], title_style)?;

    let (x_lo, x_hi) = figure.x_window;
    let y_top = compute_chart_params(&figure.table);

    let mut chart = ChartBuilder::on(&body)
        .margin(s.px(10.0))
        .x_label_area_size(s.px(36.0))
        .y_label_area_size(s.px(64.0))
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_top)?;

    chart.plotting_area().fill(&GRID_BG)?;

    chart
        .configure_mesh()
        .light_line_style(&WHITE.mix(0.0))
        .bold_line_style(WHITE.stroke_width(s.stroke(0.8)))
        .x_labels(8)
        .y_labels(8)
        .x_label_formatter(&|v: &f64| distance_tick(*v))
        .y_label_formatter(&|v: &f64| group_thousands(v.max(0.0).round() as u64))
        .label_style((FONT, s.f(10.0)))
        .axis_desc_style((FONT, s.f(12.0), FontStyle::Bold))
        .x_desc(figure.x_label.as_str())
        .y_desc(figure.y_label.as_str())
        .draw()?;

    let bars = visible_bars(&figure.table, figure.x_window);
    chart.draw_series(bars.iter().map(|b| {
        Rectangle::new([(b.left, 0.0), (b.right, b.height)], STEEL_BLUE.mix(0.8).filled())
    }))?;
    let edge = BLACK.stroke_width(s.stroke(0.5));
    chart.draw_series(
        bars.iter()
            .map(|b| Rectangle::new([(b.left, 0.0), (b.right, b.height)], edge)),
    )?;

    let line_width = s.stroke(2.5);
    let legend_half = s.px(12.0);

    // dashed: mean
    let mean_style = RED_LINE.stroke_width(line_width);
    let mean = figure.summary.mean;
    chart
        .draw_series(
            reference_dashes(mean, figure.x_window, y_top, 0.035, 0.015)
                .into_iter()
                .map(|(a, b)| PathElement::new(vec![(mean, a), (mean, b)], mean_style)),
        )?
        .label(figure.mean_label.as_str())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x - legend_half, y), (x + legend_half, y)], mean_style)
        });

    // dotted: expectation
    let expected_style = FOREST.stroke_width(line_width);
    let expected = figure.summary.expected;
    chart
        .draw_series(
            reference_dashes(expected, figure.x_window, y_top, 0.008, 0.012)
                .into_iter()
                .map(|(a, b)| PathElement::new(vec![(expected, a), (expected, b)], expected_style)),
        )?
        .label(figure.expected_label.as_str())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x - legend_half, y), (x + legend_half, y)], expected_style)
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .margin(s.px(8.0))
        .label_font((FONT, s.f(11.0)))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK.mix(0.3))
        .draw()?;

    draw_annotation(root, chart.plotting_area().get_pixel_range(), figure, s)?;

    root.present()?;
    Ok(())
}

/// Text box anchored top-left at axes fraction (0.73, 0.97).
fn draw_annotation<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: (std::ops::Range<i32>, std::ops::Range<i32>),
    figure: &Figure,
    s: Scale,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (xr, yr) = plot;
    let x0 = xr.start + ((xr.end - xr.start) as f64 * 0.73).round() as i32;
    let y0 = yr.start + ((yr.end - yr.start) as f64 * 0.03).round() as i32;

    let style = (FONT, s.f(10.0))
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Top));
    let pad = s.px(5.0);
    let line_height = s.px(13.0);

    let mut text_width = 0;
    for line in &figure.annotation {
        let (w, _) = root.estimate_text_size(line, &style)?;
        text_width = text_width.max(w as i32);
    }
    let box_w = text_width + 2 * pad;
    let box_h = line_height * figure.annotation.len() as i32 + 2 * pad;

    root.draw(&Rectangle::new(
        [(x0, y0), (x0 + box_w, y0 + box_h)],
        WHEAT.mix(0.5).filled(),
    ))?;
    root.draw(&Rectangle::new(
        [(x0, y0), (x0 + box_w, y0 + box_h)],
        BLACK.mix(0.5).stroke_width(s.stroke(0.5)),
    ))?;
    for (i, line) in figure.annotation.iter().enumerate() {
        root.draw(&Text::new(
            line.as_str(),
            (x0 + pad, y0 + pad + i as i32 * line_height),
            style.clone(),
        ))?;
    }
    Ok(())
}
