//! Geometry kernel: distances, per-kind vertices, hit testing and bounds.
//!
//! Every function here is pure and total. Shapes that do not yet hold enough
//! points are treated as "not renderable, never hit" rather than as errors.

use crate::shapes::{Shape, ShapeKind};
use kurbo::{Point, Rect};
use thiserror::Error;

/// Default hit-test tolerance in world units.
pub const HIT_TOLERANCE: f64 = 10.0;

/// Geometry errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("triangle vertices are collinear")]
    DegenerateTriangle,
}

/// Vertices derived from a shape's stored points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vertices<'a> {
    /// Line endpoints.
    Segment(Point, Point),
    /// Opposite rectangle corners. Width/height may be negative.
    Box(Point, Point),
    /// Circle center and radius.
    Circle { center: Point, radius: f64 },
    /// Apex, bottom-left and bottom-right.
    Triangle([Point; 3]),
    /// Freehand stroke points.
    Polyline(&'a [Point]),
}

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2 - p1).hypot()
}

/// Distance from a point to a line segment (a→b).
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    distance(point, proj)
}

/// Triangle inscribed in the box spanned by `start` and `end`: apex at the
/// top-middle, base along the bottom edge.
pub fn triangle_vertices(start: Point, end: Point) -> [Point; 3] {
    let w = end.x - start.x;
    let h = end.y - start.y;
    [
        Point::new(start.x + w / 2.0, start.y),
        Point::new(start.x, start.y + h),
        Point::new(end.x, start.y + h),
    ]
}

/// Derive the per-kind vertices of a shape, or `None` if it is malformed.
pub fn derive_vertices(shape: &Shape) -> Option<Vertices<'_>> {
    if !shape.is_complete() {
        return None;
    }
    let points = shape.points.as_slice();
    let vertices = match shape.kind {
        ShapeKind::Line => Vertices::Segment(points[0], points[1]),
        ShapeKind::Rectangle => Vertices::Box(points[0], points[1]),
        ShapeKind::Circle => Vertices::Circle {
            center: points[0],
            radius: distance(points[0], points[1]),
        },
        ShapeKind::Triangle => Vertices::Triangle(triangle_vertices(points[0], points[1])),
        ShapeKind::Freehand => Vertices::Polyline(points),
    };
    Some(vertices)
}

/// Barycentric weights of `point` relative to `[a, b, c]`. The weights sum to 1.
pub fn barycentric(point: Point, [a, b, c]: [Point; 3]) -> Result<[f64; 3], GeometryError> {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < f64::EPSILON {
        return Err(GeometryError::DegenerateTriangle);
    }
    let wa = ((b.y - c.y) * (point.x - c.x) + (c.x - b.x) * (point.y - c.y)) / denom;
    let wb = ((c.y - a.y) * (point.x - c.x) + (a.x - c.x) * (point.y - c.y)) / denom;
    Ok([wa, wb, 1.0 - wa - wb])
}

/// Inclusive containment in the box spanned by two corners in any order.
fn box_contains(point: Point, a: Point, b: Point) -> bool {
    point.x >= a.x.min(b.x)
        && point.x <= a.x.max(b.x)
        && point.y >= a.y.min(b.y)
        && point.y <= a.y.max(b.y)
}

/// Check if a point (in world coordinates) hits a shape.
pub fn contains_point(point: Point, shape: &Shape, tolerance: f64) -> bool {
    let Some(vertices) = derive_vertices(shape) else {
        return false;
    };
    match vertices {
        Vertices::Segment(a, b) => distance_to_segment(point, a, b) < tolerance,
        // Vertex proximity only; the connecting segments are not tested.
        Vertices::Polyline(points) => points.iter().any(|&p| distance(point, p) < tolerance),
        Vertices::Box(a, b) => box_contains(point, a, b),
        Vertices::Circle { center, radius } => (distance(point, center) - radius).abs() < tolerance,
        Vertices::Triangle(corners) => match barycentric(point, corners) {
            Ok(weights) => weights.iter().all(|&w| w >= 0.0),
            Err(_) => false,
        },
    }
}

/// Axis-aligned bounds of the stored points; `Rect::ZERO` for an empty shape.
pub fn bounding_box(shape: &Shape) -> Rect {
    let Some(first) = shape.points.first() else {
        return Rect::ZERO;
    };
    shape
        .points
        .iter()
        .fold(Rect::from_points(*first, *first), |rect, p| {
            rect.union_pt(*p)
        })
}

/// Union of the bounds of every non-empty shape.
pub fn bounding_box_of(shapes: &[Shape]) -> Option<Rect> {
    shapes
        .iter()
        .filter(|s| !s.points.is_empty())
        .map(bounding_box)
        .reduce(|acc, r| acc.union(r))
}
