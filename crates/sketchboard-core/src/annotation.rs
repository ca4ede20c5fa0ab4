//! Free-standing text labels placed on the canvas.

use crate::shapes::ShapeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for annotations.
pub type AnnotationId = Uuid;

/// A text label at a world-space point, optionally tied to a shape.
///
/// Annotations are never edited in place; they are added or removed whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    id: AnnotationId,
    position: Point,
    text: String,
    shape_id: Option<ShapeId>,
}

impl Annotation {
    /// Create an annotation. Returns `None` when `text` is empty or only whitespace.
    pub fn new(position: Point, text: impl Into<String>, shape_id: Option<ShapeId>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            position,
            text,
            shape_id,
        })
    }

    pub fn id(&self) -> AnnotationId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The shape this label was placed on, if any.
    pub fn shape_id(&self) -> Option<ShapeId> {
        self.shape_id
    }
}
