//! Positional enter/update/exit reconciliation of chart marks.
//!
//! The reconciler keeps a list of visual elements in one-to-one
//! correspondence with the active records. Records carry no stable key, so
//! identity is array position: with `P` elements and `N` records, the first
//! `min(P, N)` elements are updated in place, the rest of the records enter,
//! and the rest of the elements exit. A dataset swap goes through exactly the
//! same path as an in-place change.

pub mod transition;

use crate::data::{Dataset, Record};
use crate::scale::ScaleState;
use crate::util::palette::{cluster_color, Rgb};
use serde::Serialize;
use std::time::{Duration, Instant};
use transition::Tween;

/// One mark on the canvas, bound to the record at the same position.
#[derive(Debug, Clone)]
pub struct VisualElement {
    index: usize,
    cluster: i32,
    x: Tween<f64>,
    y: Tween<f64>,
    radius: Tween<f64>,
    color: Tween<Rgb>,
    outlined: bool,
}

impl VisualElement {
    fn enter(index: usize, record: &Record, scale: &ScaleState, radius: f64, now: Instant) -> Self {
        let (px, py) = scale.project(record);
        Self {
            index,
            cluster: record.cluster,
            x: Tween::fixed(px, now),
            y: Tween::fixed(py, now),
            radius: Tween::fixed(radius, now),
            color: Tween::fixed(cluster_color(record.cluster), now),
            outlined: false,
        }
    }

    /// Position in the element list, and of the backing record.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Look up the backing record in the dataset this element was synced from.
    pub fn record<'a>(&self, dataset: &'a Dataset) -> Option<&'a Record> {
        dataset.get(self.index)
    }

    /// Cluster label of the backing record.
    pub fn cluster(&self) -> i32 {
        self.cluster
    }

    /// Committed horizontal pixel position.
    pub fn pixel_x(&self) -> f64 {
        self.x.target()
    }

    /// Committed vertical pixel position.
    pub fn pixel_y(&self) -> f64 {
        self.y.target()
    }

    /// Interpolated position at `now`.
    pub fn position_at(&self, now: Instant) -> (f64, f64) {
        (self.x.value_at(now), self.y.value_at(now))
    }

    /// Interpolated radius at `now`.
    pub fn radius_at(&self, now: Instant) -> f64 {
        self.radius.value_at(now)
    }

    /// Radius the element is heading to.
    pub fn target_radius(&self) -> f64 {
        self.radius.target()
    }

    /// Interpolated colour at `now`.
    pub fn color_at(&self, now: Instant) -> Rgb {
        self.color.value_at(now)
    }

    /// Whether the highlight outline is on.
    pub fn is_outlined(&self) -> bool {
        self.outlined
    }

    /// Transition the radius, leaving other attributes alone.
    pub fn set_radius(&mut self, radius: f64, now: Instant, duration: Duration) {
        self.radius.retarget(radius, now, duration);
    }

    /// Toggle the highlight outline.
    pub fn set_outlined(&mut self, outlined: bool) {
        self.outlined = outlined;
    }

    fn is_settled(&self, now: Instant) -> bool {
        self.x.is_settled(now)
            && self.y.is_settled(now)
            && self.radius.is_settled(now)
            && self.color.is_settled(now)
    }

    fn mark_at(&self, now: Instant, exiting: bool) -> Mark {
        let (x, y) = self.position_at(now);
        Mark {
            index: self.index,
            x,
            y,
            radius: self.radius_at(now),
            color: self.color_at(now),
            cluster: self.cluster,
            outlined: self.outlined,
            exiting,
        }
    }
}

/// A drawable snapshot of one element, ready for any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mark {
    /// Element position in the active dataset.
    pub index: usize,
    /// Horizontal pixel position.
    pub x: f64,
    /// Vertical pixel position, growing downwards.
    pub y: f64,
    /// Radius in pixels.
    pub radius: f64,
    /// Fill colour.
    pub color: Rgb,
    /// Cluster label of the backing record.
    pub cluster: i32,
    /// Whether the highlight outline is drawn.
    pub outlined: bool,
    /// Whether the mark is on its way out.
    pub exiting: bool,
}

/// How a sync classified the elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SyncReport {
    /// Elements kept and transitioned to new attributes.
    pub updated: usize,
    /// Elements created for new trailing records.
    pub entered: usize,
    /// Elements scheduled for removal.
    pub exited: usize,
}

/// Keeps the element list in step with the active records.
#[derive(Debug)]
pub struct RenderReconciler {
    elements: Vec<VisualElement>,
    exiting: Vec<VisualElement>,
    base_radius: f64,
    transition: Duration,
}

impl RenderReconciler {
    /// Create an empty reconciler.
    pub fn new(base_radius: f64, transition: Duration) -> Self {
        Self {
            elements: Vec::new(),
            exiting: Vec::new(),
            base_radius,
            transition,
        }
    }

    /// Reconcile the element list against `records`.
    pub fn sync(&mut self, records: &[Record], scale: &ScaleState, now: Instant) -> SyncReport {
        let previous = self.elements.len();
        let kept = previous.min(records.len());

        for mut gone in self.elements.drain(kept..) {
            gone.outlined = false;
            gone.radius.retarget(0.0, now, self.transition);
            self.exiting.push(gone);
        }

        for (element, record) in self.elements.iter_mut().zip(records) {
            let (px, py) = scale.project(record);
            element.cluster = record.cluster;
            element.outlined = false;
            element.x.retarget(px, now, self.transition);
            element.y.retarget(py, now, self.transition);
            element.radius.retarget(self.base_radius, now, self.transition);
            element
                .color
                .retarget(cluster_color(record.cluster), now, self.transition);
        }

        for (index, record) in records.iter().enumerate().skip(kept) {
            self.elements
                .push(VisualElement::enter(index, record, scale, self.base_radius, now));
        }

        let report = SyncReport {
            updated: kept,
            entered: records.len() - kept,
            exited: previous - kept,
        };
        tracing::debug!(
            "Sync: {} updated, {} entered, {} exited",
            report.updated,
            report.entered,
            report.exited
        );
        report
    }

    /// Move every element by a pure per-axis scale factor.
    ///
    /// Targets of live elements are then pinned to `scale`, which must already
    /// carry the new ranges. Radius and colour transitions keep running.
    pub fn reposition(&mut self, scale: &ScaleState, records: &[Record], sx: f64, sy: f64) {
        for element in self.elements.iter_mut().chain(self.exiting.iter_mut()) {
            element.x.transform(|v| v * sx);
            element.y.transform(|v| v * sy);
        }
        for (element, record) in self.elements.iter_mut().zip(records) {
            let (px, py) = scale.project(record);
            element.x.set_target(px);
            element.y.set_target(py);
        }
    }

    /// Drop exiting elements whose transition has finished.
    pub fn tick(&mut self, now: Instant) {
        self.exiting.retain(|e| !e.radius.is_settled(now));
    }

    /// Whether anything on screen is still moving at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        !self.exiting.is_empty() || self.elements.iter().any(|e| !e.is_settled(now))
    }

    /// Live elements, in record order.
    pub fn elements(&self) -> &[VisualElement] {
        &self.elements
    }

    /// Elements still animating out.
    pub fn exiting(&self) -> &[VisualElement] {
        &self.exiting
    }

    /// Mutable access to one live element.
    pub fn element_mut(&mut self, index: usize) -> Option<&mut VisualElement> {
        self.elements.get_mut(index)
    }

    /// Radius of a mark at rest.
    pub fn base_radius(&self) -> f64 {
        self.base_radius
    }

    /// Snapshot of every mark at `now`, back to front.
    ///
    /// Exiting marks come first so live ones paint over them; within the live
    /// set, later records paint over earlier ones.
    pub fn marks(&self, now: Instant) -> Vec<Mark> {
        self.exiting
            .iter()
            .map(|e| e.mark_at(now, true))
            .chain(self.elements.iter().map(|e| e.mark_at(now, false)))
            .collect()
    }

    /// Remove everything immediately.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.exiting.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{PixelArea, ScaleComputer};

    const SECOND: Duration = Duration::from_secs(1);

    fn records(n: usize, offset: f64) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(i as f64 + offset, (i * 10) as f64 + offset, (i % 3) as i32))
            .collect()
    }

    fn scale_for(records: &[Record]) -> ScaleState {
        let dataset = Dataset::new("x", "y", records.to_vec());
        ScaleComputer::compute(&dataset, PixelArea::new(100.0, 50.0)).unwrap()
    }

    fn reconciler() -> RenderReconciler {
        RenderReconciler::new(3.0, SECOND)
    }

    #[test]
    fn first_sync_enters_everything() {
        let t0 = Instant::now();
        let data = records(5, 0.0);
        let mut r = reconciler();
        let report = r.sync(&data, &scale_for(&data), t0);
        assert_eq!(
            report,
            SyncReport {
                updated: 0,
                entered: 5,
                exited: 0
            }
        );
        assert_eq!(r.elements().len(), 5);
        assert!(r.elements().iter().enumerate().all(|(i, e)| e.index() == i));
        // Enters appear at their target immediately.
        let scale = scale_for(&data);
        assert_eq!(r.elements()[4].position_at(t0), scale.project(&data[4]));
        assert_eq!(r.elements()[4].radius_at(t0), 3.0);
    }

    #[test]
    fn shrinking_exits_the_tail() {
        let t0 = Instant::now();
        let big = records(6, 0.0);
        let small = records(4, 1.0);
        let mut r = reconciler();
        r.sync(&big, &scale_for(&big), t0);
        let report = r.sync(&small, &scale_for(&small), t0);
        assert_eq!(report.updated, 4);
        assert_eq!(report.entered, 0);
        assert_eq!(report.exited, 2);
        assert_eq!(r.elements().len(), 4);
        assert_eq!(r.exiting().len(), 2);
        assert_eq!(r.exiting()[0].index(), 4);

        r.tick(t0 + SECOND / 2);
        assert_eq!(r.exiting().len(), 2);
        r.tick(t0 + SECOND);
        assert!(r.exiting().is_empty());
    }

    #[test]
    fn growing_enters_the_tail() {
        let t0 = Instant::now();
        let small = records(2, 0.0);
        let big = records(5, 0.0);
        let mut r = reconciler();
        r.sync(&small, &scale_for(&small), t0);
        let report = r.sync(&big, &scale_for(&big), t0);
        assert_eq!((report.updated, report.entered, report.exited), (2, 3, 0));
        assert_eq!(r.elements().len(), 5);
    }

    #[test]
    fn updates_transition_to_new_positions() {
        let t0 = Instant::now();
        let a = records(3, 0.0);
        let b: Vec<Record> = a.iter().rev().copied().collect();
        let mut r = reconciler();
        r.sync(&a, &scale_for(&a), t0);
        let before = r.elements()[0].position_at(t0);

        let scale_b = scale_for(&b);
        r.sync(&b, &scale_b, t0);
        assert_eq!(r.elements()[0].position_at(t0), before);
        assert_eq!(r.elements()[0].position_at(t0 + SECOND), scale_b.project(&b[0]));
        assert_eq!(
            (r.elements()[0].pixel_x(), r.elements()[0].pixel_y()),
            scale_b.project(&b[0])
        );
        assert!(r.is_animating(t0 + SECOND / 2));
        assert!(!r.is_animating(t0 + SECOND));
    }

    #[test]
    fn update_recolours_by_new_cluster() {
        let t0 = Instant::now();
        let a = vec![Record::new(0.0, 0.0, 0), Record::new(1.0, 1.0, 0)];
        let b = vec![Record::new(0.0, 0.0, 2), Record::new(1.0, 1.0, 0)];
        let mut r = reconciler();
        r.sync(&a, &scale_for(&a), t0);
        r.sync(&b, &scale_for(&b), t0);
        assert_eq!(r.elements()[0].cluster(), 2);
        assert_eq!(r.elements()[0].color_at(t0), cluster_color(0));
        assert_eq!(r.elements()[0].color_at(t0 + SECOND), cluster_color(2));
    }

    #[test]
    fn marks_put_exiting_behind_live() {
        let t0 = Instant::now();
        let big = records(3, 0.0);
        let small = records(1, 0.0);
        let mut r = reconciler();
        r.sync(&big, &scale_for(&big), t0);
        r.sync(&small, &scale_for(&small), t0);
        let marks = r.marks(t0);
        assert_eq!(marks.len(), 3);
        assert!(marks[0].exiting && marks[1].exiting);
        assert!(!marks[2].exiting);
        assert_eq!(marks[2].index, 0);
    }

    #[test]
    fn reposition_scales_coordinates_only() {
        let t0 = Instant::now();
        let data = records(4, 0.0);
        let mut r = reconciler();
        let mut scale = scale_for(&data);
        r.sync(&data, &scale, t0);

        scale.set_area(PixelArea::new(200.0, 25.0));
        r.reposition(&scale, &data, 2.0, 0.5);
        assert_eq!(r.elements().len(), 4);
        for (e, rec) in r.elements().iter().zip(&data) {
            assert_eq!(e.position_at(t0), scale.project(rec));
            assert_eq!(e.radius_at(t0), 3.0);
        }
    }

    #[test]
    fn record_lookup_is_positional() {
        let t0 = Instant::now();
        let data = records(3, 0.0);
        let dataset = Dataset::new("x", "y", data.clone());
        let mut r = reconciler();
        r.sync(&data, &scale_for(&data), t0);
        assert_eq!(r.elements()[2].record(&dataset), Some(&data[2]));
    }
}
