//! Camera module for pan/zoom transforms.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 3.0;
/// Factor applied by one zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 1.2;
/// Grid spacing in world units.
pub const GRID_SIZE: f64 = 20.0;

/// Convert a screen point (relative to the canvas origin) to world coordinates.
pub fn to_world(screen: Point, offset: Vec2, zoom: f64) -> Point {
    ((screen - offset).to_vec2() / zoom).to_point()
}

/// Convert a world point to screen coordinates.
pub fn to_screen(world: Point, offset: Vec2, zoom: f64) -> Point {
    (world.to_vec2() * zoom + offset).to_point()
}

/// Screen-space positions of the background grid lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// Distance between neighbouring lines in screen pixels.
    pub spacing: f64,
    /// X positions of vertical lines.
    pub vertical: Vec<f64>,
    /// Y positions of horizontal lines.
    pub horizontal: Vec<f64>,
}

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels
    pub offset: Vec2,
    /// Current zoom level
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
    /// Multiplier for one zoom step
    pub zoom_step: f64,
    /// Grid spacing in world units
    pub grid_size: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            grid_size: GRID_SIZE,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        to_world(screen_point, self.offset, self.zoom)
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        to_screen(world_point, self.offset, self.zoom)
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Zoom in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.zoom_step);
    }

    /// Zoom out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / self.zoom_step);
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        // Adjust offset so world_point stays at screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
    }

    /// Grid spacing in screen pixels at the current zoom.
    pub fn grid_spacing(&self) -> f64 {
        self.grid_size * self.zoom
    }

    /// Compute the grid lines visible in a viewport of the given size.
    ///
    /// Lines sit on world multiples of the grid size, so the grid moves with
    /// the pan offset.
    pub fn grid_lines(&self, viewport: Size) -> GridLines {
        let spacing = self.grid_spacing();
        if !spacing.is_finite() || spacing <= 0.0 {
            return GridLines::default();
        }
        let positions = |phase: f64, extent: f64| {
            let mut lines = Vec::new();
            let mut pos = phase.rem_euclid(spacing);
            while pos <= extent {
                lines.push(pos);
                pos += spacing;
            }
            lines
        };
        GridLines {
            spacing,
            vertical: positions(self.offset.x, viewport.width),
            horizontal: positions(self.offset.y, viewport.height),
        }
    }
}
