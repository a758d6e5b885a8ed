//! Drawing chart models onto a plotters drawing area.
//!
//! Every function takes the root area of a figure, fills it and draws one
//! model. They are generic over the backend: files use `SVGBackend::new`,
//! tests draw into a `String`.

use super::model::{
    BoxModel, CATEGORY_HALF_WIDTH, HeatmapModel, HistogramModel, ScatterModel, ViolinModel,
    category_tick,
};
use super::palette::{
    HISTOGRAM_BLUE, MISSING_GRAY, OUTLINE_GRAY, coolwarm, quality_color, quality_fill, text_on,
};
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Result of drawing onto backend `DB`.
pub type DrawResult<DB> =
    std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

const FONT: &str = "sans-serif";
const CAPTION_SIZE: u32 = 24;
const CATEGORY_X_RANGE: std::ops::Range<f64> = -0.5..1.5;
const SCATTER_ALPHA: f64 = 0.6;

pub fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    model: &HistogramModel,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = model.x_range();
    let mut chart = ChartBuilder::on(root)
        .caption(model.title(), (FONT, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, 0f64..model.y_max())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(model.column.as_str())
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(model.bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.start, 0.0), (bin.end, bin.count as f64)],
            HISTOGRAM_BLUE.mix(0.5).filled(),
        )
    }))?;
    chart.draw_series(model.bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.start, 0.0), (bin.end, bin.count as f64)],
            HISTOGRAM_BLUE.stroke_width(1),
        )
    }))?;

    if !model.density.is_empty() {
        chart.draw_series(LineSeries::new(
            model.density.iter().copied(),
            HISTOGRAM_BLUE.stroke_width(2),
        ))?;
    }

    Ok(())
}

pub fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    model: &ScatterModel,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let ((x_lo, x_hi), (y_lo, y_hi)) = model.ranges();
    let mut chart = ChartBuilder::on(root)
        .caption(model.title(), (FONT, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(model.x_column.as_str())
        .y_desc(model.y_column.as_str())
        .draw()?;

    // legend heading, no marker
    chart
        .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
        .label("Quality");

    for group in &model.groups {
        let color = quality_color(group.code);
        chart
            .draw_series(
                group
                    .points
                    .iter()
                    .map(|&point| Circle::new(point, 3, color.mix(SCATTER_ALPHA).filled())),
            )?
            .label(group.label)
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

pub fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    model: &HeatmapModel,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let (width, _) = root.dim_in_pixel();
    let (matrix_area, bar_area) = root.split_horizontally(width as i32 - 130);

    let labels = model.labels();
    let n = labels.len();
    // cells are centered on integer positions, row 0 at the top
    let span = -0.5..n as f64 - 0.5;
    let x_label = |x: &f64| axis_label(labels, *x);
    let y_label = |y: &f64| axis_label(labels, n as f64 - 1.0 - *y);

    let mut chart = ChartBuilder::on(&matrix_area)
        .caption(model.title(), (FONT, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(110)
        .build_cartesian_2d(span.clone(), span)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n + 1)
        .y_labels(n + 1)
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .draw()?;

    for row in 0..n {
        for col in 0..n {
            let value = model.matrix.values[row][col];
            let fill = if value.is_nan() {
                MISSING_GRAY
            } else {
                coolwarm(model.normalize(value))
            };
            let x = col as f64;
            let y = (n - 1 - row) as f64;

            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                fill.filled(),
            )))?;

            let annotation = model.annotation(row, col);
            if !annotation.is_empty() {
                let text_color = text_on(fill);
                let style = TextStyle::from((FONT, 14).into_font())
                    .color(&text_color)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                chart.draw_series(std::iter::once(Text::new(annotation, (x, y), style)))?;
            }
        }
    }

    draw_colorbar(&bar_area, model)
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    model: &HeatmapModel,
) -> DrawResult<DB> {
    const STEPS: usize = 100;

    let (lo, hi) = model.value_range();
    let mut bar = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(65)
        .margin_right(10)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..1f64, lo..hi)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_label_formatter(&|v: &f64| format!("{v:.2}"))
        .draw()?;

    let step = (hi - lo) / STEPS as f64;
    bar.draw_series((0..STEPS).map(|i| {
        let y0 = lo + step * i as f64;
        let color = coolwarm((i as f64 + 0.5) / STEPS as f64);
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
    }))?;

    Ok(())
}

pub fn draw_box<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    model: &BoxModel,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let (y_lo, y_hi) = model.y_range();
    let mut chart = category_chart(root, &model.title(), y_lo..y_hi)?;
    configure_category_mesh(&mut chart, &model.label_column, &model.column)?;

    let half = CATEGORY_HALF_WIDTH;
    let cap = half / 2.0;
    for stats in model.boxes.iter().filter(|b| !b.is_empty()) {
        let x = stats.code as f64;
        let outline = OUTLINE_GRAY.stroke_width(1);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - half, stats.q1), (x + half, stats.q3)],
            quality_fill(stats.code).filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - half, stats.q1), (x + half, stats.q3)],
            outline,
        )))?;

        let segments = [
            vec![(x - half, stats.median), (x + half, stats.median)],
            vec![(x, stats.q1), (x, stats.whisker_low)],
            vec![(x, stats.q3), (x, stats.whisker_high)],
            vec![(x - cap, stats.whisker_low), (x + cap, stats.whisker_low)],
            vec![(x - cap, stats.whisker_high), (x + cap, stats.whisker_high)],
        ];
        chart.draw_series(
            segments
                .into_iter()
                .map(|points| PathElement::new(points, OUTLINE_GRAY.stroke_width(1))),
        )?;

        chart.draw_series(
            stats
                .outliers
                .iter()
                .map(|&y| Circle::new((x, y), 3, OUTLINE_GRAY.stroke_width(1))),
        )?;
    }

    Ok(())
}

pub fn draw_violin<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    model: &ViolinModel,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let (y_lo, y_hi) = model.y_range();
    let mut chart = category_chart(root, &model.title(), y_lo..y_hi)?;
    configure_category_mesh(&mut chart, &model.label_column, &model.column)?;

    for violin in model.violins.iter().filter(|v| !v.outline.is_empty()) {
        let x = violin.code as f64;
        let shape: Vec<(f64, f64)> = violin
            .outline
            .iter()
            .map(|(y, w)| (x - w, *y))
            .chain(violin.outline.iter().rev().map(|(y, w)| (x + w, *y)))
            .collect();

        chart.draw_series(std::iter::once(Polygon::new(
            shape.clone(),
            quality_fill(violin.code).filled(),
        )))?;
        let mut closed = shape;
        if let Some(first) = closed.first().copied() {
            closed.push(first);
        }
        chart.draw_series(std::iter::once(PathElement::new(
            closed,
            OUTLINE_GRAY.stroke_width(1),
        )))?;

        for (i, (&q, &w)) in violin
            .quartiles
            .iter()
            .zip(violin.quartile_widths.iter())
            .enumerate()
        {
            // median dashes are long, outer quartile dashes short
            let (dash, gap) = if i == 1 { (0.08, 0.03) } else { (0.03, 0.03) };
            chart.draw_series(
                dashes(x - w, x + w, dash, gap)
                    .into_iter()
                    .map(|(a, b)| PathElement::new(vec![(a, q), (b, q)], OUTLINE_GRAY.stroke_width(1))),
            )?;
        }
    }

    Ok(())
}

/// Label of the cell centered at `position`, blank between cells.
fn axis_label(labels: &[String], position: f64) -> String {
    let index = position.round();
    if (position - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Dash segments covering `[start, end]`.
fn dashes(start: f64, end: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let mut at = start;
    while at < end {
        out.push((at, (at + dash).min(end)));
        at += dash + gap;
    }
    out
}

type CategoryChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Two-category chart: `Bad` at x = 0, `Good` at x = 1.
fn category_chart<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    title: &str,
    y_range: std::ops::Range<f64>,
) -> std::result::Result<CategoryChart<'a, DB>, DrawingAreaErrorKind<DB::ErrorType>> {
    ChartBuilder::on(root)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(CATEGORY_X_RANGE, y_range)
}

fn configure_category_mesh<DB: DrawingBackend>(
    chart: &mut CategoryChart<'_, DB>,
    x_desc: &str,
    y_desc: &str,
) -> DrawResult<DB> {
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(3)
        .x_label_formatter(&|x: &f64| category_tick(*x))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()
}
