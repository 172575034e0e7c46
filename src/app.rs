//! Application state and logic.

use crate::chart::hit_test::{PointerRouter, RawPointer};
use crate::chart::ScatterChart;
use crate::scale::PixelArea;
use crate::ui::formatters::format_number;
use crate::ui::{self, header, UiLayout};
use crate::viewport::ResizeOutcome;
use ratatui::layout::{Position, Rect};
use std::time::Instant;

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// The mounted scatter chart.
    pub chart: ScatterChart,
    /// Turns raw mouse input into chart pointer events.
    pub router: PointerRouter,
    /// Status message.
    pub status: String,
    /// Whether the status message reports a failure.
    pub status_is_error: bool,
    /// Current theme.
    pub theme: Theme,
    /// Set when the user asked to quit.
    pub should_quit: bool,
    /// Regions of the last measured terminal size.
    layout: UiLayout,
}

impl App {
    /// Create a new application instance around a mounted chart.
    pub fn new(chart: ScatterChart) -> Self {
        Self {
            chart,
            router: PointerRouter::new(),
            status: "Ready".to_string(),
            status_is_error: false,
            theme: Theme::GruvboxDark,
            should_quit: false,
            layout: UiLayout::default(),
        }
    }

    /// Regions of the last measured terminal size.
    pub fn layout(&self) -> &UiLayout {
        &self.layout
    }

    /// React to a new terminal size.
    pub fn resize(&mut self, cols: u16, rows: u16, now: Instant) {
        self.layout = ui::layout(Rect::new(0, 0, cols, rows), &self.chart.config().margin);
        let canvas = self.layout.chart.canvas;
        match self
            .chart
            .resize(PixelArea::from_cells(canvas.width, canvas.height), now)
        {
            Ok(ResizeOutcome::Deferred) => {
                self.set_status("Window too small to draw the chart");
            }
            Ok(ResizeOutcome::Applied { .. }) => {
                let count = self.chart.active_dataset().len();
                self.set_status(format!(
                    "{} records on {}x{} canvas",
                    format_number(count),
                    canvas.width,
                    canvas.height
                ));
            }
            Ok(ResizeOutcome::Unchanged) => {}
            Err(e) => self.set_error(format!("Cannot draw chart: {}", e)),
        }
    }

    /// Switch to the other dataset.
    ///
    /// Hover state is dropped whatever the outcome, so the next move over a
    /// point enters it afresh.
    pub fn toggle_dataset(&mut self, now: Instant) {
        self.router.reset();
        match self.chart.toggle_next(now) {
            Ok(_) => {
                let dataset = self.chart.active_dataset();
                self.set_status(format!(
                    "Showing {} vs {} ({} records)",
                    dataset.y_field,
                    dataset.x_field,
                    format_number(dataset.len())
                ));
            }
            Err(e) => self.set_error(format!("Switch failed: {}", e)),
        }
    }

    /// Handle raw mouse input.
    pub fn pointer(&mut self, raw: RawPointer, now: Instant) {
        if let RawPointer::Pressed(pos) = raw {
            let label = header::button_label(self.chart.active());
            let button = header::button_rect(self.layout.header, &label);
            if button.contains(Position::new(pos.column, pos.row)) {
                self.toggle_dataset(now);
                return;
            }
        }

        let events = self.router.route(
            raw,
            self.layout.chart.canvas,
            self.chart.state().reconciler().elements(),
            now,
        );
        for event in events {
            self.chart.pointer(event, now);
        }
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.set_status(format!("Theme: {}", self.theme.name()));
    }

    /// Show key help in the status bar.
    pub fn show_help(&mut self) {
        self.set_status("Help: s=switch dataset, hover a point to inspect, T=theme, q=quit");
    }

    /// Advance animations.
    pub fn tick(&mut self, now: Instant) {
        self.chart.tick(now);
    }

    /// Request exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.status_is_error = true;
        tracing::error!("{}", self.status);
    }
}
