//! Scatter chart - pure rendering layer.
//!
//! Draws a [`Scene`] onto a ratatui frame: marks on a braille canvas, tick
//! labels and axis titles in the margins, and the tooltip overlay.

use super::Scene;
use crate::interaction::TooltipState;
use crate::reconcile::Mark;
use crate::scale::ScaleState;
use crate::ui::formatters::{format_axis_value, format_value};
use crate::ui::ThemeColors;
use crate::util::layout_config::MarginConfig;
use crate::viewport::AxisAnchors;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Painter, Shape},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Sub-areas of the chart region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartRegions {
    /// Whole chart region, margins included.
    pub outer: Rect,
    /// Plotting canvas.
    pub canvas: Rect,
}

/// Split a chart region into canvas and margins.
pub fn chart_regions(area: Rect, margin: &MarginConfig) -> ChartRegions {
    let width = area
        .width
        .saturating_sub(margin.left)
        .saturating_sub(margin.right);
    let height = area
        .height
        .saturating_sub(margin.top)
        .saturating_sub(margin.bottom);
    let canvas = if width == 0 || height == 0 {
        Rect::new(area.x, area.y, 0, 0)
    } else {
        Rect::new(area.x + margin.left, area.y + margin.top, width, height)
    };
    ChartRegions {
        outer: area,
        canvas,
    }
}

/// A filled disc with an optional one-pixel outline.
struct Dot {
    x: f64,
    y: f64,
    radius: f64,
    fill: Color,
    outline: Option<Color>,
}

impl Shape for Dot {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        if self.radius <= 0.0 {
            return;
        }
        let r2 = self.radius * self.radius;
        let inner = (self.radius - 1.0).max(0.0);
        let reach = self.radius.ceil() as i64;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let (fx, fy) = (dx as f64, dy as f64);
                let d2 = fx * fx + fy * fy;
                if d2 > r2 {
                    continue;
                }
                let color = match self.outline {
                    Some(c) if d2 > inner * inner => c,
                    _ => self.fill,
                };
                if let Some((px, py)) = painter.get_point(self.x + fx, self.y + fy) {
                    painter.paint(px, py, color);
                }
            }
        }
    }
}

/// Draw the chart region.
pub fn draw_chart(f: &mut Frame<'_>, regions: ChartRegions, scene: &Scene, colors: &ThemeColors) {
    let Some(scale) = scene.scale else {
        let para = Paragraph::new("Waiting for a usable window size...")
            .style(Style::default().fg(colors.label));
        f.render_widget(para, regions.outer);
        return;
    };
    if regions.canvas.width == 0 || regions.canvas.height == 0 {
        return;
    }

    draw_canvas(f, regions.canvas, &scale, &scene.marks, colors);

    let bounds = f.area();
    let buf = f.buffer_mut();
    draw_y_ticks(buf, bounds, regions, &scale, &scene.y_ticks, colors);
    draw_x_ticks(buf, bounds, regions, &scale, &scene.x_ticks, colors);
    if let Some(anchors) = scene.anchors {
        draw_titles(buf, bounds, regions.canvas, anchors, scene, colors);
    }

    if let Some(tooltip) = scene.tooltip {
        draw_tooltip(f, &tooltip, scene, colors);
    }
}

fn draw_canvas(f: &mut Frame<'_>, area: Rect, scale: &ScaleState, marks: &[Mark], colors: &ThemeColors) {
    let size = scale.area();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(colors.bg)
        .x_bounds([0.0, size.width])
        .y_bounds([0.0, size.height])
        .paint(|ctx| {
            ctx.draw(&CanvasLine::new(0.0, 0.0, size.width, 0.0, colors.axis));
            ctx.draw(&CanvasLine::new(0.0, 0.0, 0.0, size.height, colors.axis));
            ctx.layer();
            for mark in marks {
                ctx.draw(&Dot {
                    x: mark.x,
                    // Marks are laid out screen-down; the canvas grows upwards.
                    y: size.height - mark.y,
                    radius: mark.radius,
                    fill: mark.color.into(),
                    outline: mark.outlined.then_some(colors.outline),
                });
            }
        });
    f.render_widget(canvas, area);
}

/// Cell containing a canvas pixel, relative to the frame.
fn pixel_cell(canvas: Rect, px: f64, py: f64) -> (i32, i32) {
    (
        i32::from(canvas.x) + (px / 2.0).floor() as i32,
        i32::from(canvas.y) + (py / 4.0).floor() as i32,
    )
}

/// Write `text` starting at `(x, y)`, clipped to `bounds`.
fn put(buf: &mut Buffer, bounds: Rect, x: i32, y: i32, text: &str, style: Style) {
    if y < i32::from(bounds.y) || y >= i32::from(bounds.bottom()) {
        return;
    }
    let mut x = x;
    for ch in text.chars() {
        if x >= i32::from(bounds.x) && x < i32::from(bounds.right()) {
            buf.set_string(x as u16, y as u16, ch.to_string(), style);
        }
        x += 1;
    }
}

fn draw_y_ticks(
    buf: &mut Buffer,
    bounds: Rect,
    regions: ChartRegions,
    scale: &ScaleState,
    ticks: &[f64],
    colors: &ThemeColors,
) {
    let style = Style::default().fg(colors.value);
    let right = i32::from(regions.canvas.x) - 1;
    let last_row = i32::from(regions.canvas.bottom()) - 1;
    for &tick in ticks {
        let (_, row) = pixel_cell(regions.canvas, 0.0, scale.y.map(tick));
        let label = format!("{} -", format_axis_value(tick));
        let x = right - label.width() as i32 + 1;
        put(buf, bounds, x, row.min(last_row), &label, style);
    }
}

fn draw_x_ticks(
    buf: &mut Buffer,
    bounds: Rect,
    regions: ChartRegions,
    scale: &ScaleState,
    ticks: &[f64],
    colors: &ThemeColors,
) {
    let style = Style::default().fg(colors.value);
    let row = i32::from(regions.canvas.bottom());
    let last_col = i32::from(regions.canvas.right()) - 1;
    let mut next_free = i32::MIN;
    for &tick in ticks {
        let (col, _) = pixel_cell(regions.canvas, scale.x.map(tick), 0.0);
        let col = col.min(last_col);
        let label = format_axis_value(tick);
        let x = col - label.width() as i32 / 2;
        // Skip labels that would run into the previous one.
        if x < next_free {
            continue;
        }
        put(buf, bounds, col, row, "|", style);
        put(buf, bounds, x, row + 1, &label, style);
        next_free = x + label.width() as i32 + 1;
    }
}

fn draw_titles(
    buf: &mut Buffer,
    bounds: Rect,
    canvas: Rect,
    anchors: AxisAnchors,
    scene: &Scene,
    colors: &ThemeColors,
) {
    let style = Style::default()
        .fg(colors.heading)
        .add_modifier(Modifier::BOLD);

    let (col, row) = pixel_cell(canvas, anchors.x_title.0, anchors.x_title.1);
    let x = col - scene.x_field.width() as i32 / 2;
    put(buf, bounds, x, row, &scene.x_field, style);

    // Vertical title, one character per row, centred on the anchor.
    let (col, row) = pixel_cell(canvas, anchors.y_title.0, anchors.y_title.1);
    let chars: Vec<char> = scene
        .y_field
        .chars()
        .take(usize::from(canvas.height))
        .collect();
    let top = row - chars.len() as i32 / 2;
    for (i, ch) in chars.iter().enumerate() {
        put(buf, bounds, col, top + i as i32, &ch.to_string(), style);
    }
}

/// Text lines of a tooltip.
pub fn tooltip_lines(tooltip: &TooltipState, x_field: &str, y_field: &str) -> Vec<String> {
    vec![
        format!("Cluster: {}", tooltip.cluster),
        format!("{}: {}", x_field, format_value(tooltip.x_value)),
        format!("{}: {}", y_field, format_value(tooltip.y_value)),
    ]
}

/// Where a tooltip box of `width` x `height` goes for a pointer at `position`.
///
/// Prefers up and to the right of the pointer; flips below or left when that
/// would leave the frame.
pub fn tooltip_rect(tooltip: &TooltipState, width: u16, height: u16, frame: Rect) -> Rect {
    let width = width.min(frame.width);
    let height = height.min(frame.height);
    let pos = tooltip.screen_position;

    let x = if pos.column.saturating_add(2).saturating_add(width) <= frame.right() {
        pos.column.saturating_add(2)
    } else {
        pos.column.saturating_sub(width.saturating_add(1)).max(frame.x)
    };
    let y = if pos.row >= frame.y.saturating_add(height) {
        pos.row - height
    } else {
        pos.row.saturating_add(1).min(frame.bottom().saturating_sub(height))
    };
    Rect::new(x, y, width, height)
}

fn draw_tooltip(f: &mut Frame<'_>, tooltip: &TooltipState, scene: &Scene, colors: &ThemeColors) {
    let lines = tooltip_lines(tooltip, &scene.x_field, &scene.y_field);
    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 4;
    let height = lines.len() as u16 + 2;
    let area = tooltip_rect(tooltip, width, height, f.area());

    f.render_widget(Clear, area);
    let text: Vec<Line<'_>> = lines.into_iter().map(Line::from).collect();
    let para = Paragraph::new(text)
        .style(Style::default().fg(colors.text).bg(colors.tooltip_bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border)),
        );
    f.render_widget(para, area);
}
