//! # Viewport Camera Module
//!
//! Maps between world coordinates (AU, origin at the system center) and
//! screen coordinates (pixels or terminal cells, origin at the top-left of
//! the viewport). The camera holds two pieces of state: a zoom factor and
//! a screen-space pan offset measured from the viewport center.
//!
//! Zooming is anchored at the cursor: the pan offset is corrected so the
//! world point under the cursor stays under the cursor, which is what
//! makes wheel-zooming feel like zooming "into" a location.

use nalgebra::{Point2, Vector2};

/// Screen units per AU at zoom 1.0
pub const BASE_SCALE: f64 = 10.0;
/// Smallest permitted zoom factor
pub const MIN_ZOOM: f64 = 0.5;
/// Largest permitted zoom factor
pub const MAX_ZOOM: f64 = 50.0;
/// Relative zoom change per wheel step
pub const ZOOM_STEP: f64 = 0.1;

/// Zoom/pan state for viewing the system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    zoom: f64,
    /// Screen-space offset of the world origin from the viewport center
    pan: Vector2<f64>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera at zoom 1.0 centered on the world origin
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: Vector2::zeros(),
        }
    }

    /// Current zoom factor
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset in screen units
    pub fn pan(&self) -> Vector2<f64> {
        self.pan
    }

    /// Return to the initial zoom and pan
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Shift the view by a screen-space delta
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan += Vector2::new(dx, dy);
    }

    /// Screen units per AU at the current zoom
    pub fn scale(&self) -> f64 {
        BASE_SCALE * self.zoom
    }

    /// Project a world position (AU) to screen coordinates
    pub fn world_to_screen(
        &self,
        world: Point2<f64>,
        viewport_w: f64,
        viewport_h: f64,
    ) -> Point2<f64> {
        let center = Vector2::new(viewport_w / 2.0, viewport_h / 2.0);
        Point2::from(center + self.pan + world.coords * self.scale())
    }

    /// Invert a screen coordinate back to a world position (AU)
    pub fn screen_to_world(
        &self,
        screen: Point2<f64>,
        viewport_w: f64,
        viewport_h: f64,
    ) -> Point2<f64> {
        let center = Vector2::new(viewport_w / 2.0, viewport_h / 2.0);
        Point2::from((screen.coords - center - self.pan) / self.scale())
    }

    /// Multiply the zoom by `factor`, anchored at `cursor`
    ///
    /// The zoom is clamped to [`MIN_ZOOM`, `MAX_ZOOM`]; the pan correction
    /// uses the post-clamp factor so the anchor holds at the limits too.
    pub fn zoom_at(
        &mut self,
        cursor: Point2<f64>,
        viewport_w: f64,
        viewport_h: f64,
        factor: f64,
    ) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let applied = new_zoom / self.zoom;
        let center = Vector2::new(viewport_w / 2.0, viewport_h / 2.0);
        let cursor_offset = cursor.coords - center - self.pan;
        self.pan -= cursor_offset * (applied - 1.0);
        self.zoom = new_zoom;
    }

    /// One wheel step in or out, anchored at `cursor`
    pub fn wheel_zoom(
        &mut self,
        cursor: Point2<f64>,
        viewport_w: f64,
        viewport_h: f64,
        zoom_in: bool,
    ) {
        let factor = if zoom_in {
            1.0 + ZOOM_STEP
        } else {
            1.0 - ZOOM_STEP
        };
        self.zoom_at(cursor, viewport_w, viewport_h, factor);
    }
}
