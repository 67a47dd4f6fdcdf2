//! Collision detection for drag and drop.
//!
//! Every strategy is a pure function of the dragged rectangle, the pointer
//! and the registered drop regions. Results are ordered best-first; the
//! winner is the first entry. Sorting is stable, so ties keep registration
//! order.

use kurbo::{Point, Rect};

/// A registered drop region: a player row or a tier's container area.
#[derive(Debug, Clone, PartialEq)]
pub struct Droppable {
    pub id: String,
    pub rect: Rect,
}

impl Droppable {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self { id: id.into(), rect }
    }
}

/// A candidate target with the score it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub id: String,
    pub value: f64,
}

/// Inputs to a collision strategy.
#[derive(Debug, Clone, Copy)]
pub struct CollisionArgs<'a> {
    /// Current rectangle of the dragged item.
    pub active_rect: Rect,
    /// Pointer position, when the gesture has one.
    pub pointer: Option<Point>,
    pub droppables: &'a [Droppable],
}

/// A collision detection strategy.
pub trait CollisionStrategy {
    fn detect(&self, args: &CollisionArgs<'_>) -> Vec<Collision>;
}

/// Id of the winning collision, if any.
pub fn first_collision(collisions: &[Collision]) -> Option<&str> {
    collisions.first().map(|c| c.id.as_str())
}

fn sort_ascending(collisions: &mut [Collision]) {
    collisions.sort_by(|a, b| a.value.total_cmp(&b.value));
}

fn sort_descending(collisions: &mut [Collision]) {
    collisions.sort_by(|a, b| b.value.total_cmp(&a.value));
}

fn corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ]
}

/// Edge-inclusive containment.
fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Overlap area divided by the area of the union of both rectangles.
pub fn intersection_ratio(a: Rect, b: Rect) -> f64 {
    let width = a.x1.min(b.x1) - a.x0.max(b.x0);
    let height = a.y1.min(b.y1) - a.y0.max(b.y0);
    if width <= 0.0 || height <= 0.0 {
        return 0.0;
    }
    let overlap = width * height;
    let union = a.area() + b.area() - overlap;
    if union <= 0.0 { 0.0 } else { overlap / union }
}

/// Every droppable, nearest center first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosestCenter;

impl CollisionStrategy for ClosestCenter {
    fn detect(&self, args: &CollisionArgs<'_>) -> Vec<Collision> {
        let center = args.active_rect.abs().center();
        let mut collisions: Vec<Collision> = args
            .droppables
            .iter()
            .map(|d| Collision {
                id: d.id.clone(),
                value: center.distance(d.rect.abs().center()),
            })
            .collect();
        sort_ascending(&mut collisions);
        collisions
    }
}

/// Droppables under the pointer, closest corners first.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerWithin;

impl CollisionStrategy for PointerWithin {
    fn detect(&self, args: &CollisionArgs<'_>) -> Vec<Collision> {
        let Some(pointer) = args.pointer else {
            return Vec::new();
        };
        let mut collisions: Vec<Collision> = args
            .droppables
            .iter()
            .filter(|d| contains_inclusive(d.rect.abs(), pointer))
            .map(|d| {
                let total: f64 = corners(d.rect.abs())
                    .iter()
                    .map(|corner| pointer.distance(*corner))
                    .sum();
                Collision {
                    id: d.id.clone(),
                    value: total / 4.0,
                }
            })
            .collect();
        sort_ascending(&mut collisions);
        collisions
    }
}

/// Droppables overlapping the dragged rectangle, largest overlap first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectIntersection;

impl CollisionStrategy for RectIntersection {
    fn detect(&self, args: &CollisionArgs<'_>) -> Vec<Collision> {
        let active = args.active_rect.abs();
        let mut collisions: Vec<Collision> = args
            .droppables
            .iter()
            .filter_map(|d| {
                let ratio = intersection_ratio(active, d.rect.abs());
                (ratio > 0.0).then(|| Collision {
                    id: d.id.clone(),
                    value: ratio,
                })
            })
            .collect();
        sort_descending(&mut collisions);
        collisions
    }
}

/// Rows-first resolution used by the board.
///
/// Closest-center wins when it lands on a player row. Otherwise the looser
/// strategies get a turn, so a nearly empty tier container can still catch
/// the drop: pointer containment, then rectangle overlap, and finally the
/// closest-center result as is.
pub struct RowsFirst<F> {
    is_row: F,
}

impl<F: Fn(&str) -> bool> RowsFirst<F> {
    /// `is_row` reports whether an id names a player row.
    pub fn new(is_row: F) -> Self {
        Self { is_row }
    }
}

impl<F: Fn(&str) -> bool> CollisionStrategy for RowsFirst<F> {
    fn detect(&self, args: &CollisionArgs<'_>) -> Vec<Collision> {
        let center = ClosestCenter.detect(args);
        if first_collision(&center).is_some_and(|id| (self.is_row)(id)) {
            return center;
        }

        let pointer = PointerWithin.detect(args);
        if !pointer.is_empty() {
            return pointer;
        }

        let rect = RectIntersection.detect(args);
        if !rect.is_empty() {
            return rect;
        }

        center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(x, y, x + w, y + h)
    }

    /// Two tiers stacked vertically: T1 holds rows P1 and P2, T2 is empty.
    fn layout() -> Vec<Droppable> {
        vec![
            Droppable::new("T1", rect(0.0, 0.0, 300.0, 120.0)),
            Droppable::new("P1", rect(10.0, 40.0, 280.0, 30.0)),
            Droppable::new("P2", rect(10.0, 80.0, 280.0, 30.0)),
            Droppable::new("T2", rect(0.0, 140.0, 300.0, 80.0)),
        ]
    }

    fn is_row(id: &str) -> bool {
        id.starts_with('P')
    }

    #[test]
    fn test_closest_center_orders_all_droppables() {
        let droppables = layout();
        let args = CollisionArgs {
            active_rect: rect(10.0, 78.0, 280.0, 30.0),
            pointer: None,
            droppables: &droppables,
        };
        let hits = ClosestCenter.detect(&args);
        assert_eq!(hits.len(), droppables.len());
        assert_eq!(first_collision(&hits), Some("P2"));
    }

    #[test]
    fn test_pointer_within_requires_pointer() {
        let droppables = layout();
        let args = CollisionArgs {
            active_rect: rect(0.0, 0.0, 10.0, 10.0),
            pointer: None,
            droppables: &droppables,
        };
        assert!(PointerWithin.detect(&args).is_empty());
    }

    #[test]
    fn test_pointer_within_prefers_tighter_region() {
        let droppables = layout();
        let args = CollisionArgs {
            active_rect: rect(0.0, 0.0, 10.0, 10.0),
            pointer: Some(Point::new(150.0, 55.0)),
            droppables: &droppables,
        };
        let hits = PointerWithin.detect(&args);
        let ids: Vec<_> = hits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "T1"]);
    }

    #[test]
    fn test_pointer_within_is_edge_inclusive() {
        let droppables = vec![Droppable::new("T1", rect(0.0, 0.0, 100.0, 100.0))];
        let args = CollisionArgs {
            active_rect: rect(0.0, 0.0, 10.0, 10.0),
            pointer: Some(Point::new(100.0, 100.0)),
            droppables: &droppables,
        };
        assert_eq!(first_collision(&PointerWithin.detect(&args)), Some("T1"));
    }

    #[test]
    fn test_intersection_ratio() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(intersection_ratio(a, a), 1.0);
        assert_eq!(intersection_ratio(a, rect(20.0, 0.0, 10.0, 10.0)), 0.0);
        assert_eq!(intersection_ratio(a, rect(10.0, 0.0, 10.0, 10.0)), 0.0);
        let half = intersection_ratio(a, rect(5.0, 0.0, 10.0, 10.0));
        assert!((half - 50.0 / 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_intersection_orders_by_overlap() {
        let droppables = layout();
        let args = CollisionArgs {
            active_rect: rect(10.0, 125.0, 280.0, 30.0),
            pointer: None,
            droppables: &droppables,
        };
        let hits = RectIntersection.detect(&args);
        assert_eq!(first_collision(&hits), Some("T2"));
        assert!(hits.iter().all(|c| c.value > 0.0));
    }

    #[test]
    fn test_rows_first_uses_closest_row() {
        let droppables = layout();
        let args = CollisionArgs {
            active_rect: rect(10.0, 42.0, 280.0, 30.0),
            pointer: Some(Point::new(150.0, 57.0)),
            droppables: &droppables,
        };
        let hits = RowsFirst::new(is_row).detect(&args);
        assert_eq!(first_collision(&hits), Some("P1"));
    }

    #[test]
    fn test_rows_first_trusts_row_predicate() {
        let droppables = layout();
        // Centered on P2, pointer above the rows inside T1.
        let args = CollisionArgs {
            active_rect: rect(10.0, 80.0, 280.0, 30.0),
            pointer: Some(Point::new(150.0, 20.0)),
            droppables: &droppables,
        };
        let hits = RowsFirst::new(is_row).detect(&args);
        assert_eq!(first_collision(&hits), Some("P2"));

        // P2 no longer names a player: its region is not treated as a row.
        let hits = RowsFirst::new(|id: &str| id == "P1").detect(&args);
        assert_eq!(first_collision(&hits), Some("T1"));
    }

    #[test]
    fn test_rows_first_lets_empty_tier_capture_pointer() {
        let droppables = layout();
        // The dragged row's center sits nearest T2's center, which is a
        // container, so the pointer decides.
        let args = CollisionArgs {
            active_rect: rect(10.0, 165.0, 280.0, 30.0),
            pointer: Some(Point::new(150.0, 180.0)),
            droppables: &droppables,
        };
        let hits = RowsFirst::new(is_row).detect(&args);
        assert_eq!(first_collision(&hits), Some("T2"));
    }

    #[test]
    fn test_rows_first_falls_back_to_rect_then_center() {
        let droppables = layout();
        // Pointer outside every region but the rectangle overlaps T2.
        let args = CollisionArgs {
            active_rect: rect(10.0, 200.0, 280.0, 30.0),
            pointer: Some(Point::new(400.0, 400.0)),
            droppables: &droppables,
        };
        let hits = RowsFirst::new(is_row).detect(&args);
        assert_eq!(first_collision(&hits), Some("T2"));

        // Nothing overlaps: fall back to closest center, a container.
        let args = CollisionArgs {
            active_rect: rect(10.0, 500.0, 280.0, 30.0),
            pointer: Some(Point::new(400.0, 600.0)),
            droppables: &droppables,
        };
        let hits = RowsFirst::new(is_row).detect(&args);
        assert_eq!(first_collision(&hits), Some("T2"));
    }

    #[test]
    fn test_no_droppables() {
        let args = CollisionArgs {
            active_rect: rect(0.0, 0.0, 10.0, 10.0),
            pointer: Some(Point::new(5.0, 5.0)),
            droppables: &[],
        };
        assert!(RowsFirst::new(is_row).detect(&args).is_empty());
    }
}
