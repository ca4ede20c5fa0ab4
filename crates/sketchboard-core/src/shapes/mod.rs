//! Shape definitions for the diagram canvas.

mod style;

pub use style::{SerializableColor, ShapeStyle};

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The five primitive shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Triangle,
    Freehand,
}

impl ShapeKind {
    /// Kinds defined by an anchor and a terminal point.
    pub fn is_two_point(self) -> bool {
        !matches!(self, ShapeKind::Freehand)
    }

    /// Number of points needed before the shape can be drawn or hit.
    pub fn min_points(self) -> usize {
        match self {
            ShapeKind::Line | ShapeKind::Rectangle | ShapeKind::Circle | ShapeKind::Triangle => 2,
            ShapeKind::Freehand => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Freehand => "freehand",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shape stored in world coordinates.
///
/// Two-point kinds keep `[anchor, terminal]`; freehand keeps the whole
/// stroke. Per-kind geometry lives in [`crate::geometry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Which primitive this shape is.
    pub kind: ShapeKind,
    /// Stored points, in gesture order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Shape {
    /// Start a new shape at `anchor` with a fresh id.
    pub fn new(kind: ShapeKind, anchor: Point, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            points: vec![anchor],
            style,
        }
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Return a copy of this shape extended with the latest pointer position.
    ///
    /// Two-point kinds replace their terminal point (last point wins),
    /// freehand strokes append.
    pub fn with_point(&self, point: Point) -> Self {
        let mut next = self.clone();
        next.push_point(point);
        next
    }

    /// In-place form of [`Shape::with_point`].
    pub(crate) fn push_point(&mut self, point: Point) {
        if self.kind.is_two_point() {
            debug_assert!(
                self.points.len() <= 2,
                "{} shape holds {} points",
                self.kind,
                self.points.len()
            );
            match self.points.first().copied() {
                Some(anchor) => {
                    self.points.clear();
                    self.points.push(anchor);
                    self.points.push(point);
                }
                None => self.points.push(point),
            }
        } else {
            self.points.push(point);
        }
    }

    /// Move every point by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    /// Whether the shape holds enough points to be drawn and hit-tested.
    pub fn is_complete(&self) -> bool {
        self.points.len() >= self.kind.min_points()
    }

    /// The anchor point, if any.
    pub fn anchor(&self) -> Option<Point> {
        self.points.first().copied()
    }
}
