//! User interface rendering.

pub mod formatters;
pub mod header;
mod keymap_bar;
mod status_bar;
mod theme;

use crate::app::App;
use crate::chart::ui::{chart_regions, draw_chart, ChartRegions};
use crate::util::layout_config::MarginConfig;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};
use std::time::Instant;

pub use theme::ThemeColors;

/// Screen regions of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiLayout {
    /// Title and switch button row.
    pub header: Rect,
    /// Chart region and its canvas.
    pub chart: ChartRegions,
    /// Status bar row.
    pub status: Rect,
    /// Keymap bar row.
    pub keymap: Rect,
}

/// Split the terminal area into application regions.
pub fn layout(area: Rect, margin: &MarginConfig) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Chart
            Constraint::Length(1), // Status
            Constraint::Length(1), // Keymap
        ])
        .split(area);

    UiLayout {
        header: chunks[0],
        chart: chart_regions(chunks[1], margin),
        status: chunks[2],
        keymap: chunks[3],
    }
}

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &App, now: Instant) {
    let colors = ThemeColors::from_theme(&app.theme);
    let regions = layout(f.area(), &app.chart.config().margin);

    f.render_widget(Block::default().style(Style::default().bg(colors.bg)), f.area());
    header::draw_header(f, regions.header, app.chart.active(), &colors);
    draw_chart(f, regions.chart, &app.chart.scene(now), &colors);
    status_bar::draw_status(f, regions.status, &app.status, app.status_is_error, &colors);
    keymap_bar::draw_keymap(f, regions.keymap, &colors);
}
