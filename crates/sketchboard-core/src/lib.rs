//! Sketchboard Core Library
//!
//! Platform-agnostic geometry, shape model, camera, edit history and the
//! pointer/keyboard state machine for a 2D sketching canvas.

pub mod annotation;
pub mod camera;
pub mod canvas;
pub mod config;
pub mod geometry;
pub mod history;
pub mod input;
pub mod shapes;
pub mod shortcuts;
pub mod tools;

pub use annotation::{Annotation, AnnotationId};
pub use camera::{Camera, GridLines};
pub use canvas::{AnnotationRequest, Canvas, Command, EventOutcome};
pub use config::{ConfigError, EditorConfig};
pub use geometry::{GeometryError, HIT_TOLERANCE, bounding_box, contains_point, distance};
pub use history::{History, Snapshot};
pub use input::{KeyEvent, Modifiers, PointerEvent};
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use tools::{ToolError, ToolKind, ToolState};
