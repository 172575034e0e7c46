//! Pointer-driven inspection.
//!
//! Pointer input arrives as typed [`PointerEvent`]s and goes through a single
//! state-transition function, [`InteractionController::handle`]. The
//! controller owns the only [`TooltipState`] of a mounted chart.

use crate::data::Dataset;
use crate::reconcile::RenderReconciler;
use serde::Serialize;
use std::time::{Duration, Instant};

/// A position on screen, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScreenPosition {
    /// Column from the left edge.
    pub column: u16,
    /// Row from the top edge.
    pub row: u16,
}

impl ScreenPosition {
    /// Create a new screen position.
    pub fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }
}

/// What the tooltip shows about the inspected record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TooltipState {
    /// Cluster label of the record.
    pub cluster: i32,
    /// Raw x field value.
    pub x_value: f64,
    /// Raw y field value.
    pub y_value: f64,
    /// Where the pointer is.
    pub screen_position: ScreenPosition,
}

/// Pointer input already resolved to a target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer moved onto the element at `index`.
    Enter {
        /// Target element.
        index: usize,
        /// Pointer position.
        position: ScreenPosition,
    },
    /// Pointer moved while over the active element.
    Move {
        /// Pointer position.
        position: ScreenPosition,
    },
    /// Pointer left the active element.
    Leave,
    /// Element at `index` was clicked.
    Click {
        /// Target element.
        index: usize,
        /// Click position.
        position: ScreenPosition,
    },
}

/// Hover and click state for one chart.
#[derive(Debug)]
pub struct InteractionController {
    active: Option<usize>,
    tooltip: Option<TooltipState>,
    hover_radius_delta: f64,
    hover_transition: Duration,
}

impl InteractionController {
    /// Create a controller with nothing inspected.
    pub fn new(hover_radius_delta: f64, hover_transition: Duration) -> Self {
        Self {
            active: None,
            tooltip: None,
            hover_radius_delta,
            hover_transition,
        }
    }

    /// Apply one pointer event.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        reconciler: &mut RenderReconciler,
        dataset: &Dataset,
        now: Instant,
    ) {
        match event {
            PointerEvent::Enter { index, position } => {
                if self.active.is_some_and(|a| a != index) {
                    self.release(reconciler, now);
                }
                let Some(record) = dataset.get(index).copied() else {
                    tracing::debug!("Ignoring enter on stale element {}", index);
                    return;
                };
                let grown = reconciler.base_radius() + self.hover_radius_delta;
                if let Some(element) = reconciler.element_mut(index) {
                    element.set_radius(grown, now, self.hover_transition);
                    element.set_outlined(true);
                }
                self.active = Some(index);
                self.tooltip = Some(TooltipState {
                    cluster: record.cluster,
                    x_value: record.x,
                    y_value: record.y,
                    screen_position: position,
                });
            }
            PointerEvent::Move { position } => {
                if self.active.is_some() {
                    if let Some(tooltip) = self.tooltip.as_mut() {
                        tooltip.screen_position = position;
                    }
                }
            }
            PointerEvent::Leave => self.dismiss(reconciler, now),
            PointerEvent::Click { index, position } => {
                let Some(record) = dataset.get(index) else {
                    tracing::debug!("Ignoring click on stale element {}", index);
                    return;
                };
                self.tooltip = Some(TooltipState {
                    cluster: record.cluster,
                    x_value: record.x,
                    y_value: record.y,
                    screen_position: position,
                });
            }
        }
    }

    /// Revert the hovered element and clear the tooltip.
    pub fn dismiss(&mut self, reconciler: &mut RenderReconciler, now: Instant) {
        self.release(reconciler, now);
        self.tooltip = None;
    }

    /// Forget all inspection state.
    ///
    /// Used on dataset swap, where element attributes are reset by the
    /// reconciler anyway.
    pub fn reset(&mut self) {
        self.active = None;
        self.tooltip = None;
    }

    /// The live tooltip, if any.
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    /// Index of the hovered element, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    fn release(&mut self, reconciler: &mut RenderReconciler, now: Instant) {
        if let Some(index) = self.active.take() {
            let base = reconciler.base_radius();
            if let Some(element) = reconciler.element_mut(index) {
                element.set_radius(base, now, self.hover_transition);
                element.set_outlined(false);
            }
        }
    }
}
