//! Figure rendering: draws the panel model onto any plotters backend.

use crate::classify::{BenchPattern, HotspotDegree};
use crate::panels::{
    HeatGrid, LinePanelSpec, Panel, PanelKind, Quadrant, RouterPanels, Series, SeriesKey,
    LOAD_AXIS_LABEL,
};
use crate::style::{self, FigureStyle, Marker};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

/// Gray of the legend frame
const LEGEND_EDGE: RGBColor = RGBColor(204, 204, 204);
/// Gray of the key box edge
const KEY_EDGE: RGBColor = RGBColor(102, 102, 102);
/// Cells of the colour bar gradient
const COLORBAR_STEPS: usize = 64;
/// Widening applied to measured text, which comes out narrower than drawn
const TEXT_SLACK: f64 = 1.15;

/// Draw the composite figure: one row per router, six panel columns, shared
/// legends and keys below the grid.
pub fn draw_figure<DB>(
    root: &DrawingArea<DB, Shift>,
    figure: &[RouterPanels],
    style: &FigureStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    if figure.is_empty() {
        return Ok(());
    }
    let (_, height) = root.dim_in_pixel();
    let layout = Layout::new(height, style);

    let grid = root.margin(layout.title_band, layout.legend_band, layout.router_band, layout.right_pad);
    let cells = grid.split_evenly((figure.len(), PanelKind::ALL.len()));

    // Plotting-area x ranges of the first row, for centring titles and legends
    let mut column_spans: Vec<Range<i32>> = Vec::with_capacity(PanelKind::ALL.len());

    for (row_index, row) in figure.iter().enumerate() {
        let is_last_row = row_index + 1 == figure.len();
        for (col_index, panel) in row.panels.iter().enumerate() {
            let cell = &cells[row_index * PanelKind::ALL.len() + col_index];
            let span = match panel {
                Panel::Lines { spec, series } => {
                    draw_line_panel(root, cell, spec, series, style, is_last_row)?
                }
                Panel::PortLatency { matrix } => match matrix {
                    Some(matrix) => draw_heatmap_panel(root, cell, &matrix.grid(), style)?,
                    None => cell.get_pixel_range().0,
                },
                Panel::Stalls { matrix } => match matrix {
                    Some(matrix) => draw_heatmap_panel(root, cell, &matrix.grid(), style)?,
                    None => cell.get_pixel_range().0,
                },
            };
            if row_index == 0 {
                column_spans.push(span);
            }
        }

        let (_, row_span) = cells[row_index * PanelKind::ALL.len()].get_pixel_range();
        draw_router_label(root, row.router.name(), &row_span, &layout, style)?;
    }

    for (kind, span) in figure[0].panels.iter().map(Panel::kind).zip(&column_spans) {
        draw_title(root, kind.title(), center(span), &layout, style)?;
    }

    draw_legends(root, &column_spans, &layout, style)?;
    Ok(())
}

/// Pixel bands around the panel grid
struct Layout {
    title_band: u32,
    router_band: u32,
    legend_band: u32,
    right_pad: u32,
    /// Bottom edge of the legend boxes
    legend_bottom: i32,
    /// Vertical centre of the text keys
    key_center: i32,
}

impl Layout {
    fn new(height: u32, style: &FigureStyle) -> Self {
        let h = height as f64;
        let title_band = (2.0 * 1.25 * style.px(style.fonts.title) + style.px(12.0)).round() as u32;
        let router_band = (2.0 * style.px(style.fonts.router)).round() as u32;
        let key_height = 2.0 * 1.3 * style.px(style.fonts.tick) + style.px(8.0);
        let legend_band = (h * style.legend_band)
            .max(h * (style.legend_y + style.key_offset) + key_height / 2.0 + style.px(4.0))
            .round() as u32;
        Self {
            title_band,
            router_band,
            legend_band,
            right_pad: style.px_u32(6.0),
            legend_bottom: (h - h * style.legend_y).round() as i32,
            key_center: (h - h * (style.legend_y + style.key_offset)).round() as i32,
        }
    }
}

/// Size of `text` in pixels, widened by `TEXT_SLACK` so boxes and label areas
/// built around it hold the glyphs as drawn
fn measure_text<DB>(canvas: &DrawingArea<DB, Shift>, text: &str, font: &TextStyle) -> Result<(i32, i32)>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (w, h) = canvas.estimate_text_size(text, font)?;
    Ok(((w as f64 * TEXT_SLACK).ceil() as i32, h as i32))
}

/// Y tick text: whole numbers once the axis reaches 10, otherwise one decimal
/// with a trailing ".0" dropped
fn axis_tick_label(value: f64, axis_max: f64) -> String {
    if axis_max >= 10.0 {
        return format!("{:.0}", value);
    }
    let text = format!("{:.1}", value);
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

fn center(span: &Range<i32>) -> i32 {
    (span.start + span.end) / 2
}

/// Shrink an area to a centred square
fn square<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> DrawingArea<DB, Shift> {
    let (w, h) = area.dim_in_pixel();
    if w > h {
        let left = (w - h) / 2;
        area.margin(0, 0, left, w - h - left)
    } else {
        let top = (h - w) / 2;
        area.margin(top, h - w - top, 0, 0)
    }
}

fn series_color(key: SeriesKey) -> RGBColor {
    match key {
        SeriesKey::Pattern(pattern) => style::pattern_color(pattern),
        SeriesKey::Degree(degree) => style::degree_color(degree),
    }
}

fn series_marker(key: SeriesKey) -> Marker {
    match key {
        SeriesKey::Pattern(pattern) => style::pattern_marker(pattern),
        SeriesKey::Degree(degree) => style::degree_marker(degree),
    }
}

/// Draw a load-sweep panel and return its plotting-area x range
fn draw_line_panel<DB>(
    canvas: &DrawingArea<DB, Shift>,
    cell: &DrawingArea<DB, Shift>,
    spec: &LinePanelSpec,
    series: &[Series],
    style: &FigureStyle,
    show_x_desc: bool,
) -> Result<Range<i32>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = square(cell);
    // The axis maximum carries the most digits of any tick
    let tick_font = TextStyle::from(style.font(style.fonts.tick));
    let (widest_tick, _) = measure_text(canvas, &axis_tick_label(spec.y_max, spec.y_max), &tick_font)?;
    let y_label_area = widest_tick as f64 + style.px(10.0) + 1.5 * style.px(style.fonts.label);

    let mut chart = ChartBuilder::on(&area)
        .margin(style.px_u32(6.0))
        .x_label_area_size(style.px_u32(1.3 * (style.fonts.tick + style.fonts.label)))
        .y_label_area_size(y_label_area.round() as u32)
        .build_cartesian_2d(0f64..spec.x_max, 0f64..spec.y_max)?;

    let load_format = |x: &f64| format!("{:.1}", x);
    let y_max = spec.y_max;
    let value_format = move |y: &f64| axis_tick_label(*y, y_max);
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(BLACK.mix(0.2))
        .axis_style(BLACK)
        .x_labels(6)
        .y_labels(6)
        .x_label_formatter(&load_format)
        .y_label_formatter(&value_format)
        .label_style(style.font(style.fonts.tick))
        .axis_desc_style(style.font(style.fonts.label))
        .y_desc(spec.y_label);
    if show_x_desc {
        mesh.x_desc(LOAD_AXIS_LABEL);
    }
    mesh.draw()?;

    for s in series {
        let color = series_color(s.key);
        let points: Vec<(f64, f64)> = s
            .points
            .iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .map(|p| (p.x, p.y))
            .collect();
        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            color.stroke_width(style.px_u32(style.line_width)),
        ))?;
        for point in &points {
            draw_marker(canvas, chart.backend_coord(point), color, series_marker(s.key), style)?;
        }
        for label in &s.annotations {
            if label.at.x.is_finite() && label.at.y.is_finite() {
                let at = chart.backend_coord(&(label.at.x, label.at.y));
                draw_loss_label(canvas, at, label.quadrant, &label.text, color, style)?;
            }
        }
    }

    Ok(chart.plotting_area().get_pixel_range().0)
}

/// Draw one marker centred on a pixel position
fn draw_marker<DB>(
    canvas: &DrawingArea<DB, Shift>,
    at: (i32, i32),
    color: RGBColor,
    marker: Marker,
    style: &FigureStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    match marker {
        Marker::Dot { size } => {
            canvas.draw(&Circle::new(at, style.px_u32(size / 2.0), color.filled()))?;
        }
        Marker::Ring { size, stroke } => {
            canvas.draw(&Circle::new(
                at,
                style.px_u32(size / 2.0),
                color.stroke_width(style.px_u32(stroke)),
            ))?;
        }
        Marker::Cross { size, stroke } => {
            canvas.draw(&Cross::new(
                at,
                style.px_u32(size / 2.0),
                color.stroke_width(style.px_u32(stroke)),
            ))?;
        }
    }
    Ok(())
}

/// Draw a loss percentage beside its point on a half-transparent white box
fn draw_loss_label<DB>(
    canvas: &DrawingArea<DB, Shift>,
    at: (i32, i32),
    quadrant: Quadrant,
    text: &str,
    color: RGBColor,
    style: &FigureStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (h_pos, v_pos) = match quadrant {
        Quadrant::TopLeft => (HPos::Right, VPos::Bottom),
        Quadrant::TopRight => (HPos::Left, VPos::Bottom),
        Quadrant::BottomLeft => (HPos::Right, VPos::Top),
        Quadrant::BottomRight => (HPos::Left, VPos::Top),
    };
    let text_style = style
        .font(style.fonts.loss)
        .color(&color)
        .pos(Pos::new(h_pos, v_pos));
    let (w, h) = measure_text(canvas, text, &text_style)?;
    let pad = style.px(1.0).round() as i32;

    let left = match h_pos {
        HPos::Right => at.0 - w,
        HPos::Center => at.0 - w / 2,
        HPos::Left => at.0,
    };
    let top = match v_pos {
        VPos::Bottom => at.1 - h,
        VPos::Center => at.1 - h / 2,
        VPos::Top => at.1,
    };
    canvas.draw(&Rectangle::new(
        [(left - pad, top - pad), (left + w + pad, top + h + pad)],
        WHITE.mix(0.5).filled(),
    ))?;
    canvas.draw(&Text::new(text.to_string(), at, text_style))?;
    Ok(())
}

/// Draw an annotated heatmap with its colour bar and return the heatmap's
/// plotting-area x range
fn draw_heatmap_panel<DB>(
    canvas: &DrawingArea<DB, Shift>,
    cell: &DrawingArea<DB, Shift>,
    grid: &HeatGrid,
    style: &FigureStyle,
) -> Result<Range<i32>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (width, height) = cell.dim_in_pixel();
    let bar_width = (width as f64 * 0.2).round() as u32;
    let (heat_cell, bar_cell) = cell.split_horizontally(width.saturating_sub(bar_width));
    let heat_area = square(&heat_cell);

    let rows = grid.row_labels.len();
    let cols = grid.col_labels.len();
    let tick_px = style.px(style.fonts.tick);
    let label_px = style.px(style.fonts.label);

    let mut chart = ChartBuilder::on(&heat_area)
        .margin(style.px_u32(6.0))
        .x_label_area_size((1.3 * (tick_px + label_px)).round() as u32)
        .y_label_area_size((1.6 * tick_px + 1.4 * label_px).round() as u32)
        .build_cartesian_2d(0f64..cols as f64, 0f64..rows as f64)?;

    let (lo, hi) = match grid.value_range() {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((v, _)) => (v - 0.5, v + 0.5),
        None => return Ok(chart.plotting_area().get_pixel_range().0),
    };
    let annotation_font = style.font(style.fonts.tick);
    let centered = Pos::new(HPos::Center, VPos::Center);

    // Row 0 is drawn at the top
    for (r, values) in grid.values.iter().enumerate() {
        let top = (rows - r) as f64;
        for (c, value) in values.iter().enumerate() {
            let Some(v) = value.filter(|v| v.is_finite()) else {
                continue;
            };
            let fill = style::ylgnbu((v - lo) / (hi - lo));
            let ink = if style::luminance(fill) > 0.408 { BLACK } else { WHITE };
            chart.draw_series(std::iter::once(Rectangle::new(
                [(c as f64, top - 1.0), (c as f64 + 1.0, top)],
                fill.filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                format!("{:.*}", grid.precision, v),
                (c as f64 + 0.5, top - 0.5),
                annotation_font.color(&ink).pos(centered),
            )))?;
        }
    }

    let gap = style.px(4.0).round() as i32;
    let tick_style = style.font(style.fonts.tick).color(&BLACK);
    for (c, label) in grid.col_labels.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(c as f64 + 0.5, 0.0));
        canvas.draw(&Text::new(
            label.clone(),
            (x, y + gap),
            tick_style.pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }
    for (r, label) in grid.row_labels.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(0.0, (rows - r) as f64 - 0.5));
        canvas.draw(&Text::new(
            label.clone(),
            (x - gap, y),
            tick_style.pos(Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }

    let (x_span, y_span) = chart.plotting_area().get_pixel_range();
    let desc_style = style.font(style.fonts.label).color(&BLACK);
    if let Some(x_desc) = grid.x_desc {
        canvas.draw(&Text::new(
            x_desc,
            (center(&x_span), y_span.end + 2 * gap + tick_px.round() as i32),
            desc_style.pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }
    if let Some(y_desc) = grid.y_desc {
        let rotated = style
            .font(style.fonts.label)
            .transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        canvas.draw(&Text::new(
            y_desc,
            (
                x_span.start - 3 * gap - (1.2 * tick_px).round() as i32 - (label_px / 2.0).round() as i32,
                center(&y_span),
            ),
            rotated,
        ))?;
    }

    let precision = grid.precision;
    draw_colorbar(&bar_cell, height, (lo, hi), precision, style)?;

    Ok(x_span)
}

/// Vertical colour bar covering the middle part of the panel height
fn draw_colorbar<DB>(
    area: &DrawingArea<DB, Shift>,
    panel_height: u32,
    (lo, hi): (f64, f64),
    precision: usize,
    style: &FigureStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let inset = (panel_height as f64 * (1.0 - style.colorbar_shrink) / 2.0).round() as u32;
    let area = area.margin(inset, inset, style.px_u32(4.0), 0);

    let mut bar = ChartBuilder::on(&area)
        .right_y_label_area_size(style.px_u32(2.6 * style.fonts.tick))
        .build_cartesian_2d(0f64..1f64, lo..hi)?;

    let tick_format = |v: &f64| format!("{:.*}", precision, v);
    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&tick_format)
        .label_style(style.font(style.fonts.tick))
        .draw()?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let t = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
        Rectangle::new(
            [(0.0, lo + i as f64 * step), (1.0, lo + (i + 1) as f64 * step)],
            style::ylgnbu(t).filled(),
        )
    }))?;
    Ok(())
}

fn draw_title<DB>(
    canvas: &DrawingArea<DB, Shift>,
    lines: [&str; 2],
    x: i32,
    layout: &Layout,
    style: &FigureStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let line_height = (1.25 * style.px(style.fonts.title)).round() as i32;
    let bottom = layout.title_band as i32;
    let text_style = style
        .font(style.fonts.title)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    for (i, line) in lines.iter().enumerate() {
        let y = bottom - (lines.len() - 1 - i) as i32 * line_height;
        canvas.draw(&Text::new(line.to_string(), (x, y), text_style.clone()))?;
    }
    Ok(())
}

fn draw_router_label<DB>(
    canvas: &DrawingArea<DB, Shift>,
    name: &str,
    row_span: &Range<i32>,
    layout: &Layout,
    style: &FigureStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let text_style = style
        .bold_font(style.fonts.router)
        .transform(FontTransform::Rotate270)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    canvas.draw(&Text::new(
        name.to_string(),
        (layout.router_band as i32 / 2, center(row_span)),
        text_style,
    ))?;
    Ok(())
}

/// A legend row entry: line sample with marker, then label
struct LegendEntry {
    label: String,
    color: RGBColor,
    marker: Marker,
}

impl LegendEntry {
    fn of(key: SeriesKey) -> Self {
        Self {
            label: key.label(),
            color: series_color(key),
            marker: series_marker(key),
        }
    }
}

fn traffic_legend() -> Vec<LegendEntry> {
    [BenchPattern::Uniform, BenchPattern::Transpose, BenchPattern::Hotspot]
        .into_iter()
        .map(|pattern| LegendEntry::of(SeriesKey::Pattern(pattern)))
        .collect()
}

fn degree_legend() -> Vec<LegendEntry> {
    HotspotDegree::ALL
        .into_iter()
        .map(|degree| LegendEntry::of(SeriesKey::Degree(degree)))
        .collect()
}

/// Shared legends under column pairs 1–2 and 3–4, keys under columns 5 and 6
fn draw_legends<DB>(
    canvas: &DrawingArea<DB, Shift>,
    spans: &[Range<i32>],
    layout: &Layout,
    style: &FigureStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    if spans.len() < PanelKind::ALL.len() {
        return Ok(());
    }
    let traffic_center = (spans[0].start + spans[1].end) / 2;
    let hotspot_center = (spans[2].start + spans[3].end) / 2;

    draw_legend(canvas, traffic_center, layout.legend_bottom, &traffic_legend(), style)?;
    draw_legend(canvas, hotspot_center, layout.legend_bottom, &degree_legend(), style)?;
    draw_text_key(
        canvas,
        (center(&spans[4]), layout.key_center),
        &["L: Local    N: North    E: East", "S: South    W: West"],
        style,
    )?;
    draw_text_key(canvas, (center(&spans[5]), layout.key_center), &["D: Degree"], style)?;
    Ok(())
}

/// Single-row framed legend, horizontally centred on `center_x`
fn draw_legend<DB>(
    canvas: &DrawingArea<DB, Shift>,
    center_x: i32,
    bottom: i32,
    entries: &[LegendEntry],
    style: &FigureStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let font_px = style.px(style.fonts.tick);
    let handle = (2.0 * font_px).round() as i32;
    let gap = (0.8 * font_px).round() as i32;
    let spacing = (2.0 * font_px).round() as i32;
    let pad = (0.5 * font_px).round() as i32;

    let text_style = style
        .font(style.fonts.tick)
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let sizes = entries
        .iter()
        .map(|entry| measure_text(canvas, &entry.label, &text_style))
        .collect::<Result<Vec<_>>>()?;

    let row_height = sizes
        .iter()
        .map(|(_, h)| *h)
        .max()
        .unwrap_or(0)
        .max(font_px.round() as i32);
    let content_width: i32 = sizes.iter().map(|(w, _)| handle + gap + *w).sum::<i32>()
        + spacing * (entries.len() as i32 - 1).max(0);
    let width = content_width + 2 * pad;
    let height = row_height + 2 * pad;
    let left = center_x - width / 2;
    let top = bottom - height;

    canvas.draw(&Rectangle::new(
        [(left, top), (left + width, bottom)],
        WHITE.mix(0.8).filled(),
    ))?;
    canvas.draw(&Rectangle::new(
        [(left, top), (left + width, bottom)],
        LEGEND_EDGE.stroke_width(1),
    ))?;

    let y = top + pad + row_height / 2;
    let mut x = left + pad;
    for (entry, (text_width, _)) in entries.iter().zip(&sizes) {
        canvas.draw(&PathElement::new(
            vec![(x, y), (x + handle, y)],
            entry.color.stroke_width(style.px_u32(style.line_width)),
        ))?;
        draw_marker(canvas, (x + handle / 2, y), entry.color, entry.marker, style)?;
        canvas.draw(&Text::new(entry.label.clone(), (x + handle + gap, y), text_style.clone()))?;
        x += handle + gap + *text_width + spacing;
    }
    Ok(())
}

/// Boxed multi-line text centred on `at`
fn draw_text_key<DB>(
    canvas: &DrawingArea<DB, Shift>,
    at: (i32, i32),
    lines: &[&str],
    style: &FigureStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let text_style = style
        .font(style.fonts.tick)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let sizes = lines
        .iter()
        .map(|line| measure_text(canvas, line, &text_style))
        .collect::<Result<Vec<_>>>()?;
    let line_height = (1.3 * style.px(style.fonts.tick)).round() as i32;
    let text_width = sizes.iter().map(|(w, _)| *w).max().unwrap_or(0);
    let pad = (0.5 * style.px(style.fonts.tick)).round() as i32;

    let half_w = text_width / 2 + pad;
    let half_h = line_height * lines.len() as i32 / 2 + pad;
    let corners = [(at.0 - half_w, at.1 - half_h), (at.0 + half_w, at.1 + half_h)];
    canvas.draw(&Rectangle::new(corners, WHITE.mix(0.4).filled()))?;
    canvas.draw(&Rectangle::new(corners, KEY_EDGE.stroke_width(1)))?;

    let first_y = at.1 - line_height * (lines.len() as i32 - 1) / 2;
    for (i, line) in lines.iter().enumerate() {
        canvas.draw(&Text::new(
            line.to_string(),
            (at.0, first_y + i as i32 * line_height),
            text_style.clone(),
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_room_for_keys() {
        let style = FigureStyle::default();
        let layout = Layout::new(1100, &style);
        assert!(layout.legend_band as f64 >= 1100.0 * style.legend_band);
        // key box stays inside the legend band
        assert!(layout.key_center > 1100 - layout.legend_band as i32);
        assert!(layout.legend_bottom <= 1100);
        assert!(layout.key_center < layout.legend_bottom);
    }

    #[test]
    fn test_legend_order() {
        let labels: Vec<String> = traffic_legend().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Uniform", "Transpose", "Hotspot"]);
        let labels: Vec<String> = degree_legend().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Degree 1", "Degree 2", "Degree 3", "Degree 4"]);
    }

    #[test]
    fn test_center() {
        assert_eq!(center(&(100..300)), 200);
    }

    #[test]
    fn test_axis_tick_labels() {
        // duration and latency axes print whole cycles
        assert_eq!(axis_tick_label(1000.0, 1300.0), "1000");
        assert_eq!(axis_tick_label(25.0, 25.0), "25");
        assert_eq!(axis_tick_label(0.0, 1300.0), "0");
        // throughput axis keeps fractional ticks but drops ".0"
        assert_eq!(axis_tick_label(5.0, 5.0), "5");
        assert_eq!(axis_tick_label(2.5, 5.0), "2.5");
    }

    #[test]
    fn test_measured_text_is_widened() {
        let style = FigureStyle::default();
        let mut buffer = vec![0u8; 400 * 100 * 3];
        let root = BitMapBackend::with_buffer(&mut buffer, (400, 100)).into_drawing_area();
        let font = TextStyle::from(style.font(style.fonts.tick));
        let (raw_w, raw_h) = root.estimate_text_size("Degree 4", &font).unwrap();
        let (w, h) = measure_text(&root, "Degree 4", &font).unwrap();
        assert!(raw_w > 0);
        assert!(w as f64 >= raw_w as f64 * TEXT_SLACK);
        assert_eq!(h, raw_h as i32);
    }
}
