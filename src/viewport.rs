//! Responsive adaptation to container resizes.
//!
//! A resize only changes pixel ranges. Domains stay as computed for the
//! active dataset and no element enters or exits; existing elements and the
//! axis title anchors are moved by a pure coordinate transform.

use crate::data::Record;
use crate::reconcile::RenderReconciler;
use crate::scale::{PixelArea, ScaleState};
use crate::util::layout_config::AxisConfig;
use serde::Serialize;

/// Where the axis titles are anchored, in canvas pixels.
///
/// The x title sits centred below the canvas; the y title sits left of the
/// canvas, centred vertically. Coordinates outside `[0, width] x [0, height]`
/// fall in the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisAnchors {
    /// Anchor of the x axis title.
    pub x_title: (f64, f64),
    /// Anchor of the y axis title.
    pub y_title: (f64, f64),
}

impl AxisAnchors {
    /// Anchors for a canvas of the given area.
    pub fn for_area(area: PixelArea, axis: &AxisConfig) -> Self {
        Self {
            x_title: (area.width / 2.0, area.height + axis.x_label_offset),
            y_title: (-axis.y_label_offset, area.height / 2.0),
        }
    }
}

/// Result of a resize signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ResizeOutcome {
    /// Ranges and element positions were updated.
    Applied {
        /// New usable width.
        width: f64,
        /// New usable height.
        height: f64,
    },
    /// Size was the same as before.
    Unchanged,
    /// Measured size was degenerate; the last good layout is kept until the
    /// next resize signal.
    Deferred,
}

/// Tracks the usable pixel area and applies resizes.
#[derive(Debug)]
pub struct ViewportAdapter {
    area: Option<PixelArea>,
    anchors: Option<AxisAnchors>,
    axis: AxisConfig,
}

impl ViewportAdapter {
    /// Create an adapter that has not measured anything yet.
    pub fn new(axis: AxisConfig) -> Self {
        Self {
            area: None,
            anchors: None,
            axis,
        }
    }

    /// Last usable area, if one has been measured.
    pub fn area(&self) -> Option<PixelArea> {
        self.area
    }

    /// Current axis title anchors.
    pub fn anchors(&self) -> Option<AxisAnchors> {
        self.anchors
    }

    /// Record a measured area without touching any elements.
    ///
    /// Used before the first render cycle, when there is nothing to move yet.
    pub fn measure(&mut self, measured: PixelArea) -> ResizeOutcome {
        if measured.is_degenerate() {
            tracing::debug!("Deferring layout: measured {}x{}", measured.width, measured.height);
            return ResizeOutcome::Deferred;
        }
        self.area = Some(measured);
        self.anchors = Some(AxisAnchors::for_area(measured, &self.axis));
        ResizeOutcome::Applied {
            width: measured.width,
            height: measured.height,
        }
    }

    /// Apply a resize to a chart that has already been drawn.
    pub fn resize(
        &mut self,
        measured: PixelArea,
        scale: &mut ScaleState,
        reconciler: &mut RenderReconciler,
        records: &[Record],
    ) -> ResizeOutcome {
        if measured.is_degenerate() {
            tracing::debug!("Deferring resize: measured {}x{}", measured.width, measured.height);
            return ResizeOutcome::Deferred;
        }

        let old = scale.area();
        if old == measured {
            return ResizeOutcome::Unchanged;
        }

        scale.set_area(measured);
        let sx = measured.width / old.width;
        let sy = measured.height / old.height;
        reconciler.reposition(scale, records, sx, sy);

        self.area = Some(measured);
        self.anchors = Some(AxisAnchors::for_area(measured, &self.axis));
        tracing::info!(
            "Viewport resized: {}x{} -> {}x{}",
            old.width,
            old.height,
            measured.width,
            measured.height
        );
        ResizeOutcome::Applied {
            width: measured.width,
            height: measured.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::scale::ScaleComputer;
    use std::time::{Duration, Instant};

    fn setup() -> (Dataset, ScaleState, RenderReconciler, ViewportAdapter, Instant) {
        let dataset = Dataset::new(
            "x",
            "y",
            vec![
                Record::new(2.0, 300000.0, 0),
                Record::new(5.0, 450000.0, 1),
                Record::new(3.0, 350000.0, 2),
            ],
        );
        let area = PixelArea::new(700.0, 510.0);
        let scale = ScaleComputer::compute(&dataset, area).unwrap();
        let mut reconciler = RenderReconciler::new(3.0, Duration::from_secs(1));
        let t0 = Instant::now();
        reconciler.sync(&dataset.records, &scale, t0);
        let mut viewport = ViewportAdapter::new(AxisConfig::default());
        viewport.measure(area);
        (dataset, scale, reconciler, viewport, t0)
    }

    #[test]
    fn resize_moves_elements_without_reconciling() {
        let (dataset, mut scale, mut reconciler, mut viewport, t0) = setup();
        let domains = (scale.x.domain, scale.y.domain);

        let outcome = viewport.resize(
            PixelArea::new(350.0, 255.0),
            &mut scale,
            &mut reconciler,
            &dataset.records,
        );
        assert_eq!(
            outcome,
            ResizeOutcome::Applied {
                width: 350.0,
                height: 255.0
            }
        );
        assert_eq!((scale.x.domain, scale.y.domain), domains);
        assert_eq!(reconciler.elements().len(), 3);
        assert!(reconciler.exiting().is_empty());
        for (i, (e, r)) in reconciler.elements().iter().zip(&dataset.records).enumerate() {
            assert_eq!(e.index(), i);
            assert_eq!(e.position_at(t0), scale.project(r));
        }
        assert_eq!(reconciler.elements()[1].pixel_x(), 350.0);
        assert_eq!(reconciler.elements()[1].pixel_y(), 0.0);
    }

    #[test]
    fn resize_during_swap_scales_in_flight_positions() {
        let (_, mut scale, mut reconciler, mut viewport, t0) = setup();
        let next = vec![
            Record::new(4.0, 420000.0, 1),
            Record::new(2.5, 310000.0, 0),
            Record::new(5.0, 300000.0, 2),
        ];
        reconciler.sync(&next, &scale, t0);

        let mid = t0 + Duration::from_millis(500);
        let before: Vec<(f64, f64)> = reconciler
            .elements()
            .iter()
            .map(|e| e.position_at(mid))
            .collect();

        viewport.resize(
            PixelArea::new(350.0, 102.0),
            &mut scale,
            &mut reconciler,
            &next,
        );

        for (e, (x, y)) in reconciler.elements().iter().zip(&before) {
            let (nx, ny) = e.position_at(mid);
            assert!((nx - x * 0.5).abs() < 1e-9);
            assert!((ny - y * 0.2).abs() < 1e-9);
        }
        let settled = t0 + Duration::from_secs(1);
        for (e, r) in reconciler.elements().iter().zip(&next) {
            assert_eq!(e.position_at(settled), scale.project(r));
        }
    }

    #[test]
    fn zero_size_is_deferred_then_retried() {
        let (dataset, mut scale, mut reconciler, mut viewport, _) = setup();
        let before = scale;

        let outcome = viewport.resize(
            PixelArea::new(0.0, 200.0),
            &mut scale,
            &mut reconciler,
            &dataset.records,
        );
        assert_eq!(outcome, ResizeOutcome::Deferred);
        assert_eq!(scale, before);
        assert_eq!(viewport.area(), Some(PixelArea::new(700.0, 510.0)));

        let outcome = viewport.resize(
            PixelArea::new(400.0, 200.0),
            &mut scale,
            &mut reconciler,
            &dataset.records,
        );
        assert!(matches!(outcome, ResizeOutcome::Applied { .. }));
        assert_eq!(scale.x.range, (0.0, 400.0));
    }

    #[test]
    fn same_size_is_unchanged() {
        let (dataset, mut scale, mut reconciler, mut viewport, _) = setup();
        let outcome = viewport.resize(
            PixelArea::new(700.0, 510.0),
            &mut scale,
            &mut reconciler,
            &dataset.records,
        );
        assert_eq!(outcome, ResizeOutcome::Unchanged);
    }

    #[test]
    fn anchors_follow_the_area() {
        let (dataset, mut scale, mut reconciler, mut viewport, _) = setup();
        let axis = AxisConfig::default();
        assert_eq!(
            viewport.anchors(),
            Some(AxisAnchors::for_area(PixelArea::new(700.0, 510.0), &axis))
        );
        viewport.resize(
            PixelArea::new(100.0, 40.0),
            &mut scale,
            &mut reconciler,
            &dataset.records,
        );
        let anchors = viewport.anchors().unwrap();
        assert_eq!(anchors.x_title, (50.0, 40.0 + axis.x_label_offset));
        assert_eq!(anchors.y_title, (-axis.y_label_offset, 20.0));
    }

    #[test]
    fn resize_during_transition_keeps_radius_animation() {
        let (dataset, mut scale, mut reconciler, mut viewport, t0) = setup();
        let hover = Duration::from_millis(100);
        if let Some(e) = reconciler.element_mut(0) {
            e.set_radius(5.0, t0, hover);
        }
        viewport.resize(
            PixelArea::new(200.0, 100.0),
            &mut scale,
            &mut reconciler,
            &dataset.records,
        );
        let e = &reconciler.elements()[0];
        assert_eq!(e.target_radius(), 5.0);
        assert!(e.radius_at(t0 + hover / 2) > 3.0);
        assert_eq!(e.position_at(t0), scale.project(&dataset.records[0]));
    }

    #[test]
    fn measure_before_first_draw() {
        let mut viewport = ViewportAdapter::new(AxisConfig::default());
        assert_eq!(viewport.measure(PixelArea::new(0.0, 0.0)), ResizeOutcome::Deferred);
        assert_eq!(viewport.area(), None);
        assert!(matches!(
            viewport.measure(PixelArea::new(10.0, 10.0)),
            ResizeOutcome::Applied { .. }
        ));
    }
}
