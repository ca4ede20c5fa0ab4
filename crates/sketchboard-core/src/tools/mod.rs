//! Tool system for the canvas.

use crate::shapes::{Shape, ShapeId, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tool errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    Unknown(String),
}

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Annotate,
    Line,
    Rectangle,
    Circle,
    Triangle,
    Freehand,
}

impl ToolKind {
    /// Every tool, in toolbar order.
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Select,
        ToolKind::Pan,
        ToolKind::Annotate,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
        ToolKind::Freehand,
    ];

    /// The shape this tool draws, if it is a drawing tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Triangle => Some(ShapeKind::Triangle),
            ToolKind::Freehand => Some(ShapeKind::Freehand),
            ToolKind::Select | ToolKind::Pan | ToolKind::Annotate => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pan => "pan",
            ToolKind::Annotate => "annotate",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Triangle => "triangle",
            ToolKind::Freehand => "freehand",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ToolError::Unknown(s.to_string()))
    }
}

/// State of a gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Panning the view. `last` is in screen coordinates.
    Panning { last: Point },
    /// Drawing a new shape that is not yet part of the canvas.
    Drawing { shape: Shape },
    /// Moving the selected shape. `last` is in world coordinates.
    Dragging {
        id: ShapeId,
        last: Point,
        moved: bool,
    },
}

impl ToolState {
    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, ToolState::Idle)
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ToolState::Idle => "idle",
            ToolState::Panning { .. } => "panning",
            ToolState::Drawing { .. } => "drawing",
            ToolState::Dragging { .. } => "dragging",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_parsing() {
        for tool in ToolKind::ALL {
            assert_eq!(tool.as_str().parse::<ToolKind>(), Ok(tool));
        }
        assert_eq!("Rectangle".parse::<ToolKind>(), Ok(ToolKind::Rectangle));
        assert_eq!(
            "eraser".parse::<ToolKind>(),
            Err(ToolError::Unknown("eraser".to_string()))
        );
    }

    #[test]
    fn test_drawing_tools() {
        let drawing: Vec<_> = ToolKind::ALL
            .into_iter()
            .filter_map(ToolKind::shape_kind)
            .collect();
        assert_eq!(
            drawing,
            vec![
                ShapeKind::Line,
                ShapeKind::Rectangle,
                ShapeKind::Circle,
                ShapeKind::Triangle,
                ShapeKind::Freehand,
            ]
        );
        assert_eq!(ToolKind::Select.shape_kind(), None);
    }

    #[test]
    fn test_default_state_is_idle() {
        let state = ToolState::default();
        assert!(!state.is_active());
        assert_eq!(state.name(), "idle");
        assert!(ToolState::Panning { last: Point::ZERO }.is_active());
    }
}
