//! Layout and behaviour constants for the scatter chart.

use std::time::Duration;

/// Margins around the plotting canvas, in terminal cells.
#[derive(Debug, Clone)]
pub struct MarginConfig {
    /// Cells above the canvas.
    pub top: u16,
    /// Cells right of the canvas.
    pub right: u16,
    /// Cells below the canvas (x tick labels and axis title).
    pub bottom: u16,
    /// Cells left of the canvas (y tick labels and axis title).
    pub left: u16,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 1,
            right: 2,
            bottom: 3,
            left: 12,
        }
    }
}

/// Mark appearance and transition timing.
#[derive(Debug, Clone)]
pub struct MarkConfig {
    /// Radius of a mark at rest, in pixels.
    pub base_radius: f64,
    /// Radius added while a mark is hovered.
    pub hover_radius_delta: f64,
    /// Duration of data-driven attribute transitions.
    pub transition: Duration,
    /// Duration of hover grow/shrink.
    pub hover_transition: Duration,
}

impl Default for MarkConfig {
    fn default() -> Self {
        Self {
            base_radius: 3.0,
            hover_radius_delta: 2.0,
            transition: Duration::from_millis(1000),
            hover_transition: Duration::from_millis(100),
        }
    }
}

/// Axis decoration.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    /// Desired number of ticks per axis.
    pub tick_count: usize,
    /// Distance of the x axis title below the canvas, in pixels.
    pub x_label_offset: f64,
    /// Distance of the y axis title left of the canvas, in pixels.
    pub y_label_offset: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            tick_count: 5,
            x_label_offset: 8.0,
            y_label_offset: 22.0,
        }
    }
}

/// Combined configuration for a mounted chart.
#[derive(Debug, Clone, Default)]
pub struct ChartConfig {
    /// Canvas margins.
    pub margin: MarginConfig,
    /// Mark appearance and timing.
    pub marks: MarkConfig,
    /// Axis decoration.
    pub axis: AxisConfig,
}

impl ChartConfig {
    /// Override the data transition duration.
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.marks.transition = transition;
        self
    }
}
