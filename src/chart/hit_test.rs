//! Resolving raw mouse input into typed pointer events.
//!
//! Terminals report the pointer in cells and have no per-element hover
//! callbacks, so the router keeps track of which element is under the
//! pointer and synthesises enter/move/leave the way a retained-mode surface
//! would.

use crate::interaction::{PointerEvent, ScreenPosition};
use crate::reconcile::VisualElement;
use ratatui::layout::Rect;
use std::time::Instant;

/// Raw pointer input in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPointer {
    /// Pointer moved (or dragged) to a cell.
    Moved(ScreenPosition),
    /// Primary button pressed on a cell.
    Pressed(ScreenPosition),
}

/// Convert a cell inside `canvas` to the pixel at its centre.
///
/// Returns `None` for cells outside the canvas.
pub fn cell_to_pixel(position: ScreenPosition, canvas: Rect) -> Option<(f64, f64)> {
    let inside = position.column >= canvas.x
        && position.column < canvas.x.saturating_add(canvas.width)
        && position.row >= canvas.y
        && position.row < canvas.y.saturating_add(canvas.height);
    if !inside {
        return None;
    }
    let px = f64::from(position.column - canvas.x) * 2.0 + 1.0;
    let py = f64::from(position.row - canvas.y) * 4.0 + 2.0;
    Some((px, py))
}

/// Index of the element under a cell, if any.
///
/// A cell is two pixels wide and four tall, so the hit area is the element
/// radius grown by half a cell on each axis. Overlaps go to the closest
/// element, then to the one drawn last.
pub fn hit_test(
    position: ScreenPosition,
    canvas: Rect,
    elements: &[VisualElement],
    now: Instant,
) -> Option<usize> {
    let (px, py) = cell_to_pixel(position, canvas)?;

    let mut best: Option<(usize, f64)> = None;
    for element in elements.iter().rev() {
        let (ex, ey) = element.position_at(now);
        let radius = element.radius_at(now);
        let nx = (px - ex) / (radius + 1.0);
        let ny = (py - ey) / (radius + 2.0);
        let distance = nx * nx + ny * ny;
        if distance <= 1.0 && best.map_or(true, |(_, d)| distance < d) {
            best = Some((element.index(), distance));
        }
    }
    best.map(|(index, _)| index)
}

/// Tracks the hovered element between raw pointer events.
#[derive(Debug, Default)]
pub struct PointerRouter {
    hovered: Option<usize>,
}

impl PointerRouter {
    /// Create a router with nothing hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Element currently under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Forget the hovered element, e.g. after the elements were rebuilt.
    pub fn reset(&mut self) {
        self.hovered = None;
    }

    /// Translate one raw event into the typed events it implies.
    pub fn route(
        &mut self,
        raw: RawPointer,
        canvas: Rect,
        elements: &[VisualElement],
        now: Instant,
    ) -> Vec<PointerEvent> {
        match raw {
            RawPointer::Moved(position) => {
                let hit = hit_test(position, canvas, elements, now);
                let mut events = Vec::with_capacity(2);
                match (self.hovered, hit) {
                    (Some(current), Some(index)) if current == index => {
                        events.push(PointerEvent::Move { position });
                    }
                    (previous, hit) => {
                        if previous.is_some() {
                            events.push(PointerEvent::Leave);
                        }
                        if let Some(index) = hit {
                            events.push(PointerEvent::Enter { index, position });
                        }
                    }
                }
                self.hovered = hit;
                events
            }
            RawPointer::Pressed(position) => hit_test(position, canvas, elements, now)
                .map(|index| vec![PointerEvent::Click { index, position }])
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Record};
    use crate::reconcile::RenderReconciler;
    use crate::scale::{PixelArea, ScaleComputer};
    use std::time::Duration;

    /// Canvas at (10, 2), 20x10 cells = 40x40 pixels.
    fn canvas() -> Rect {
        Rect::new(10, 2, 20, 10)
    }

    /// Two records landing on the canvas corners.
    fn elements(now: Instant) -> RenderReconciler {
        let dataset = Dataset::new(
            "x",
            "y",
            vec![Record::new(0.0, 0.0, 0), Record::new(10.0, 10.0, 1)],
        );
        let scale = ScaleComputer::compute(&dataset, PixelArea::from_cells(20, 10)).unwrap();
        let mut reconciler = RenderReconciler::new(3.0, Duration::from_secs(1));
        reconciler.sync(&dataset.records, &scale, now);
        reconciler
    }

    #[test]
    fn cells_map_to_pixel_centres() {
        assert_eq!(cell_to_pixel(ScreenPosition::new(10, 2), canvas()), Some((1.0, 2.0)));
        assert_eq!(cell_to_pixel(ScreenPosition::new(12, 3), canvas()), Some((5.0, 6.0)));
        assert_eq!(cell_to_pixel(ScreenPosition::new(9, 2), canvas()), None);
        assert_eq!(cell_to_pixel(ScreenPosition::new(30, 2), canvas()), None);
    }

    #[test]
    fn hits_the_element_under_the_cell() {
        let now = Instant::now();
        let r = elements(now);
        // Record 0 sits at pixel (0, 40): bottom-left cell.
        assert_eq!(hit_test(ScreenPosition::new(10, 11), canvas(), r.elements(), now), Some(0));
        // Record 1 sits at pixel (40, 0): top-right cell.
        assert_eq!(hit_test(ScreenPosition::new(29, 2), canvas(), r.elements(), now), Some(1));
        // Middle of the canvas is empty.
        assert_eq!(hit_test(ScreenPosition::new(20, 6), canvas(), r.elements(), now), None);
    }

    #[test]
    fn router_synthesises_enter_move_leave() {
        let now = Instant::now();
        let r = elements(now);
        let mut router = PointerRouter::new();
        let over = ScreenPosition::new(10, 11);
        let over_again = ScreenPosition::new(11, 11);
        let empty = ScreenPosition::new(20, 6);

        assert_eq!(
            router.route(RawPointer::Moved(over), canvas(), r.elements(), now),
            vec![PointerEvent::Enter {
                index: 0,
                position: over
            }]
        );
        assert_eq!(
            router.route(RawPointer::Moved(over_again), canvas(), r.elements(), now),
            vec![PointerEvent::Move {
                position: over_again
            }]
        );
        assert_eq!(
            router.route(RawPointer::Moved(empty), canvas(), r.elements(), now),
            vec![PointerEvent::Leave]
        );
        assert_eq!(router.hovered(), None);
        assert!(router
            .route(RawPointer::Moved(empty), canvas(), r.elements(), now)
            .is_empty());
    }

    #[test]
    fn moving_between_elements_leaves_then_enters() {
        let now = Instant::now();
        let r = elements(now);
        let mut router = PointerRouter::new();
        let a = ScreenPosition::new(10, 11);
        let b = ScreenPosition::new(29, 2);
        router.route(RawPointer::Moved(a), canvas(), r.elements(), now);
        assert_eq!(
            router.route(RawPointer::Moved(b), canvas(), r.elements(), now),
            vec![
                PointerEvent::Leave,
                PointerEvent::Enter {
                    index: 1,
                    position: b
                }
            ]
        );
    }

    #[test]
    fn press_clicks_only_on_elements() {
        let now = Instant::now();
        let r = elements(now);
        let mut router = PointerRouter::new();
        let on = ScreenPosition::new(29, 2);
        assert_eq!(
            router.route(RawPointer::Pressed(on), canvas(), r.elements(), now),
            vec![PointerEvent::Click {
                index: 1,
                position: on
            }]
        );
        assert!(router
            .route(RawPointer::Pressed(ScreenPosition::new(20, 6)), canvas(), r.elements(), now)
            .is_empty());
    }
}
