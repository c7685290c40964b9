use crate::pin::PinAddress;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point on the editor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point { Point::new(self.x + rhs.x, self.y + rhs.y) }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point { Point::new(self.x - rhs.x, self.y - rhs.y) }
}

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn min(&self) -> Point { Point::new(self.x, self.y) }

    pub fn max(&self) -> Point { Point::new(self.x + self.width, self.y + self.height) }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Point-in-rect test, inclusive on every edge.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }
}

/// Trait for pin geometry data needed for hit-testing
pub trait PinGeometry {
    fn address(&self) -> PinAddress;
    fn rect(&self) -> Rect;
}

/// Trait for node geometry data needed for hit-testing
pub trait NodeGeometry {
    fn id(&self) -> i32;
    fn rect(&self) -> Rect;
}

// === Standard Implementations ===

/// Simple implementation of PinGeometry
#[derive(Debug, Clone, Copy)]
pub struct SimplePinGeometry {
    pub address: PinAddress,
    pub rect: Rect,
}

impl PinGeometry for SimplePinGeometry {
    fn address(&self) -> PinAddress { self.address }
    fn rect(&self) -> Rect { self.rect }
}

/// Simple implementation of NodeGeometry
#[derive(Debug, Clone, Copy)]
pub struct SimpleNodeGeometry {
    pub id: i32,
    pub rect: Rect,
}

impl NodeGeometry for SimpleNodeGeometry {
    fn id(&self) -> i32 { self.id }
    fn rect(&self) -> Rect { self.rect }
}

/// Find the pin under `point`.
///
/// Pins are tested in iteration order and the first match wins, so callers
/// feed them in node-then-pin declaration order.
pub fn find_pin_at<P, I>(point: Point, pins: I) -> Option<PinAddress>
where
    P: PinGeometry,
    I: IntoIterator<Item = P>,
{
    pins.into_iter()
        .find(|pin| pin.rect().contains(point))
        .map(|pin| pin.address())
}

/// Find the node whose body contains `point`. First match wins.
pub fn find_node_at<N, I>(point: Point, nodes: I) -> Option<i32>
where
    N: NodeGeometry,
    I: IntoIterator<Item = N>,
{
    nodes
        .into_iter()
        .find(|node| node.rect().contains(point))
        .map(|node| node.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Rect
    // ========================================================================

    #[test]
    fn test_rect_contains_is_inclusive() {
        let rect = Rect::new(10.0, 10.0, 20.0, 10.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(30.0, 20.0)));
        assert!(rect.contains(Point::new(15.0, 15.0)));
        assert!(!rect.contains(Point::new(30.1, 20.0)));
        assert!(!rect.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn test_rect_center_and_corners() {
        let rect = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert_eq!(rect.center(), Point::new(5.0, 20.0));
        assert_eq!(rect.min(), Point::new(0.0, 10.0));
        assert_eq!(rect.max(), Point::new(10.0, 30.0));
    }

    #[test]
    fn test_rect_inflate() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0).inflate(5.0);
        assert_eq!(rect, Rect::new(5.0, 5.0, 30.0, 30.0));
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 1.0);
        assert_eq!(a - b, Point::new(2.0, 3.0));
        assert_eq!(a + b, Point::new(4.0, 5.0));
    }

    // ========================================================================
    // find_pin_at() / find_node_at()
    // ========================================================================

    #[test]
    fn test_find_pin_at() {
        let pins = vec![
            SimplePinGeometry { address: PinAddress::new(0, 0), rect: Rect::new(0.0, 0.0, 10.0, 10.0) },
            SimplePinGeometry { address: PinAddress::new(1, 2), rect: Rect::new(50.0, 50.0, 10.0, 10.0) },
        ];

        assert_eq!(find_pin_at(Point::new(5.0, 5.0), pins.clone()), Some(PinAddress::new(0, 0)));
        assert_eq!(find_pin_at(Point::new(55.0, 52.0), pins.clone()), Some(PinAddress::new(1, 2)));
        assert_eq!(find_pin_at(Point::new(100.0, 100.0), pins), None);
    }

    #[test]
    fn test_find_pin_at_first_match_wins() {
        let pins = vec![
            SimplePinGeometry { address: PinAddress::new(0, 1), rect: Rect::new(0.0, 0.0, 10.0, 10.0) },
            SimplePinGeometry { address: PinAddress::new(1, 0), rect: Rect::new(0.0, 0.0, 10.0, 10.0) },
        ];
        assert_eq!(find_pin_at(Point::new(5.0, 5.0), pins), Some(PinAddress::new(0, 1)));
    }

    #[test]
    fn test_find_pin_at_empty_list() {
        let pins: Vec<SimplePinGeometry> = vec![];
        assert_eq!(find_pin_at(Point::new(5.0, 5.0), pins), None);
    }

    #[test]
    fn test_find_node_at() {
        let nodes = vec![
            SimpleNodeGeometry { id: 3, rect: Rect::new(0.0, 0.0, 100.0, 50.0) },
            SimpleNodeGeometry { id: 4, rect: Rect::new(50.0, 0.0, 100.0, 50.0) },
        ];
        // Overlap region resolves to the first node in order
        assert_eq!(find_node_at(Point::new(75.0, 25.0), nodes.clone()), Some(3));
        assert_eq!(find_node_at(Point::new(125.0, 25.0), nodes.clone()), Some(4));
        assert_eq!(find_node_at(Point::new(125.0, 80.0), nodes), None);
    }
}
