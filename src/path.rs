use crate::hit_test::Point;

/// Cubic bezier used for links and the drag-to-link preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point, // Start point
    pub p1: Point, // Control point 1
    pub p2: Point, // Control point 2
    pub p3: Point, // End point
}

impl CubicBezier {
    /// Link curve from `start` to `end`.
    ///
    /// Both tangents sit on the vertical line through the horizontal midpoint:
    /// the first at the start's height, the second at the end's height.
    pub fn link(start: Point, end: Point) -> Self {
        let mid_x = (start.x + end.x) / 2.0;
        CubicBezier {
            p0: start,
            p1: Point::new(mid_x, start.y),
            p2: Point::new(mid_x, end.y),
            p3: end,
        }
    }

    /// SVG path command ("M x y C c1x c1y c2x c2y x y").
    pub fn to_path_command(&self) -> String {
        format!(
            "M {} {} C {} {} {} {} {} {}",
            self.p0.x, self.p0.y, self.p1.x, self.p1.y, self.p2.x, self.p2.y, self.p3.x, self.p3.y
        )
    }
}

/// Generate the SVG path command for a link between two pin centers.
pub fn generate_link_path(start: Point, end: Point) -> String {
    CubicBezier::link(start, end).to_path_command()
}
