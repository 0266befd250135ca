//! Planar geometry primitives for frames and circles.
//!
//! # Responsibility
//! - Model axis-aligned rectangles and discs in screen coordinates.
//! - Provide the containment/contact predicates used by validation and search.
//!
//! # Invariants
//! - `y` grows downward: `top = y`, `bottom = y + height`.
//! - Touching counts as contact for rectangle/rectangle and disc/disc.
//! - Touching is allowed for disc-in-rectangle and disc-in-search-disk.

use serde::{Deserialize, Serialize};

/// A point in the shared frame coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn distance_squared_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Filled circle described by center and diameter.
///
/// The diameter is kept as given; the radius is derived on demand, so a
/// disc built from a stored diameter round-trips it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub center: Point,
    pub diameter: f64,
}

impl Disc {
    /// Builds a disc from center coordinates and diameter.
    pub fn from_diameter(x: f64, y: f64, diameter: f64) -> Self {
        Self {
            center: Point::new(x, y),
            diameter,
        }
    }

    /// Builds a disc from its center and radius.
    pub fn with_radius(center: Point, radius: f64) -> Self {
        Self {
            center,
            diameter: radius * 2.0,
        }
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Smallest axis-aligned rectangle enclosing this disc.
    pub fn bounding_box(&self) -> Rect {
        let r = self.radius();
        Rect::new(self.center.x - r, self.center.y - r, r * 2.0, r * 2.0)
    }
}

/// Returns `true` unless the rectangles are strictly separated on some axis.
///
/// Shared edges and corners count as overlap.
pub fn rectangles_overlap_or_touch(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.left() || a.left() > b.right() || a.bottom() < b.top() || a.top() > b.bottom())
}

/// Returns `true` when the disc lies inside the rectangle, boundary inclusive.
pub fn circle_fits_in_rectangle(circle: &Disc, rect: &Rect) -> bool {
    let r = circle.radius();
    circle.center.x - r >= rect.left()
        && circle.center.x + r <= rect.right()
        && circle.center.y - r >= rect.top()
        && circle.center.y + r <= rect.bottom()
}

/// Returns `true` when the discs overlap or are tangent.
///
/// Compares squared lengths so axis-aligned tangency stays exact.
pub fn circles_touch_or_overlap(a: &Disc, b: &Disc) -> bool {
    let reach = a.radius() + b.radius();
    a.center.distance_squared_to(b.center) <= reach * reach
}

/// Returns `true` when the disc is fully inside the search disk.
///
/// The farthest point of `circle` from `center` may lie exactly on the
/// search boundary.
pub fn circle_within_search_disk(circle: &Disc, center: Point, radius: f64) -> bool {
    circle.center.distance_to(center) + circle.radius() <= radius
}
