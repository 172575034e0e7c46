//! Scatter chart feature - component state and behaviour.
//!
//! A [`ScatterChart`] is one mounted visualization. All of its state is local
//! to the instance and threaded explicitly through the scale computer,
//! reconciler and interaction controller. Rendering backends never touch that
//! state; they consume a [`Scene`], a plain descriptor snapshot.

pub mod hit_test;
pub mod ui;

use crate::data::Dataset;
use crate::error::Result;
use crate::interaction::{InteractionController, PointerEvent, TooltipState};
use crate::reconcile::{Mark, RenderReconciler, SyncReport};
use crate::scale::{PixelArea, ScaleComputer, ScaleState};
use crate::switcher::{DatasetId, DatasetSwitcher};
use crate::util::ChartConfig;
use crate::viewport::{AxisAnchors, ResizeOutcome, ViewportAdapter};
use serde::Serialize;
use std::time::Instant;

/// Scale, elements, inspection and viewport of one chart.
#[derive(Debug)]
pub struct ChartState {
    scale: Option<ScaleState>,
    reconciler: RenderReconciler,
    interaction: InteractionController,
    viewport: ViewportAdapter,
}

impl ChartState {
    /// Create an empty state from configuration.
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            scale: None,
            reconciler: RenderReconciler::new(config.marks.base_radius, config.marks.transition),
            interaction: InteractionController::new(
                config.marks.hover_radius_delta,
                config.marks.hover_transition,
            ),
            viewport: ViewportAdapter::new(config.axis.clone()),
        }
    }

    /// Committed scale, once something has been drawn.
    pub fn scale(&self) -> Option<&ScaleState> {
        self.scale.as_ref()
    }

    /// The element reconciler.
    pub fn reconciler(&self) -> &RenderReconciler {
        &self.reconciler
    }

    /// The viewport adapter.
    pub fn viewport(&self) -> &ViewportAdapter {
        &self.viewport
    }

    /// Live tooltip, if any.
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.interaction.tooltip()
    }

    /// Record the usable area before anything has been drawn.
    pub fn measure(&mut self, measured: PixelArea) -> ResizeOutcome {
        self.viewport.measure(measured)
    }

    /// Run a full scale + reconcile cycle for `dataset`.
    ///
    /// The dataset is validated before anything changes, so a malformed one
    /// leaves the chart exactly as it was. Returns `None` when no usable area
    /// has been measured yet.
    pub fn render_cycle(&mut self, dataset: &Dataset, now: Instant) -> Result<Option<SyncReport>> {
        let Some(area) = self.viewport.area() else {
            ScaleComputer::domains(dataset)?;
            tracing::debug!("No layout yet; deferring draw of {} records", dataset.len());
            return Ok(None);
        };

        let scale = ScaleComputer::compute(dataset, area)?;
        let report = self.reconciler.sync(&dataset.records, &scale, now);
        self.scale = Some(scale);
        self.interaction.reset();
        Ok(Some(report))
    }

    /// Apply a container resize.
    ///
    /// Before the first draw this only measures, and runs the initial cycle
    /// once a usable size arrives.
    pub fn resize(&mut self, measured: PixelArea, dataset: &Dataset, now: Instant) -> Result<ResizeOutcome> {
        if let Some(scale) = self.scale.as_mut() {
            return Ok(self
                .viewport
                .resize(measured, scale, &mut self.reconciler, &dataset.records));
        }

        let outcome = self.viewport.measure(measured);
        if matches!(outcome, ResizeOutcome::Applied { .. }) {
            self.render_cycle(dataset, now)?;
        }
        Ok(outcome)
    }

    /// Dispatch a pointer event to the interaction controller.
    pub fn pointer(&mut self, event: PointerEvent, dataset: &Dataset, now: Instant) {
        self.interaction
            .handle(event, &mut self.reconciler, dataset, now);
    }

    /// Drop any hover highlight and tooltip.
    pub fn dismiss_inspection(&mut self, now: Instant) {
        self.interaction.dismiss(&mut self.reconciler, now);
    }

    /// Advance time-based housekeeping.
    pub fn tick(&mut self, now: Instant) {
        self.reconciler.tick(now);
    }

    /// Whether any transition is still running.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.reconciler.is_animating(now)
    }

    fn clear(&mut self) {
        self.interaction.reset();
        self.reconciler.clear();
        self.scale = None;
    }
}

/// Everything a rendering backend needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    /// Active configuration.
    pub active: DatasetId,
    /// Title of the x axis.
    pub x_field: String,
    /// Title of the y axis.
    pub y_field: String,
    /// Committed scales, absent before the first draw.
    pub scale: Option<ScaleState>,
    /// Tick values along x.
    pub x_ticks: Vec<f64>,
    /// Tick values along y.
    pub y_ticks: Vec<f64>,
    /// Axis title anchors.
    pub anchors: Option<AxisAnchors>,
    /// Marks, back to front.
    pub marks: Vec<Mark>,
    /// Live tooltip.
    pub tooltip: Option<TooltipState>,
}

impl Scene {
    /// Serialise the scene as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of marks that belong to the active dataset.
    pub fn live_marks(&self) -> usize {
        self.marks.iter().filter(|m| !m.exiting).count()
    }
}

/// One mounted scatter visualization.
#[derive(Debug)]
pub struct ScatterChart {
    switcher: DatasetSwitcher,
    state: ChartState,
    config: ChartConfig,
}

impl ScatterChart {
    /// Mount a chart over two configurations. Drawing starts on the first
    /// usable [`resize`](Self::resize).
    pub fn mount(cbd: Dataset, landsize: Dataset, start: DatasetId, config: ChartConfig) -> Self {
        tracing::info!(
            "Mounting chart: {} CBD records, {} landsize records, starting on {}",
            cbd.len(),
            landsize.len(),
            start.name()
        );
        Self {
            switcher: DatasetSwitcher::new(cbd, landsize, start),
            state: ChartState::new(&config),
            config,
        }
    }

    /// Active configuration.
    pub fn active(&self) -> DatasetId {
        self.switcher.active()
    }

    /// Dataset of the active configuration.
    pub fn active_dataset(&self) -> &Dataset {
        self.switcher.active_dataset()
    }

    /// Chart state.
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    /// Chart configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Switch to a configuration.
    pub fn toggle(&mut self, id: DatasetId, now: Instant) -> Result<Option<SyncReport>> {
        self.switcher.toggle(id, &mut self.state, now)
    }

    /// Switch to the other configuration.
    pub fn toggle_next(&mut self, now: Instant) -> Result<Option<SyncReport>> {
        self.switcher.toggle_next(&mut self.state, now)
    }

    /// Apply a container resize.
    pub fn resize(&mut self, measured: PixelArea, now: Instant) -> Result<ResizeOutcome> {
        self.state
            .resize(measured, self.switcher.active_dataset(), now)
    }

    /// Dispatch a pointer event.
    pub fn pointer(&mut self, event: PointerEvent, now: Instant) {
        self.state
            .pointer(event, self.switcher.active_dataset(), now);
    }

    /// Advance time-based housekeeping.
    pub fn tick(&mut self, now: Instant) {
        self.state.tick(now);
    }

    /// Whether any transition is still running.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.state.is_animating(now)
    }

    /// Snapshot the chart for drawing.
    pub fn scene(&self, now: Instant) -> Scene {
        let dataset = self.switcher.active_dataset();
        let scale = self.state.scale().copied();
        let ticks = self.config.axis.tick_count;
        Scene {
            active: self.switcher.active(),
            x_field: dataset.x_field.clone(),
            y_field: dataset.y_field.clone(),
            scale,
            x_ticks: scale.map(|s| s.x.ticks(ticks)).unwrap_or_default(),
            y_ticks: scale.map(|s| s.y.ticks(ticks)).unwrap_or_default(),
            anchors: self.state.viewport().anchors(),
            marks: self.state.reconciler().marks(now),
            tooltip: self.state.tooltip().copied(),
        }
    }
}

impl Drop for ScatterChart {
    fn drop(&mut self) {
        self.state.clear();
        tracing::info!("Chart unmounted");
    }
}
