#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::geom::{Bounds, Vec2};

/// Camera state for pan/zoom on the infinite canvas.
///
/// `pan_x` / `pan_y` are in screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom). A zoom that is not a positive
/// finite number is treated as 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Scale factor actually applied by the conversions.
    #[must_use]
    pub fn effective_zoom(&self) -> f64 {
        if self.zoom.is_finite() && self.zoom > 0.0 { self.zoom } else { 1.0 }
    }

    /// Convert a screen-space point (pixels) to page coordinates.
    #[must_use]
    pub fn screen_to_page(&self, screen: Vec2) -> Vec2 {
        let zoom = self.effective_zoom();
        Vec2 {
            x: (screen.x - self.pan_x) / zoom,
            y: (screen.y - self.pan_y) / zoom,
        }
    }

    /// Convert a page-space point to screen coordinates (pixels).
    #[must_use]
    pub fn page_to_screen(&self, page: Vec2) -> Vec2 {
        let zoom = self.effective_zoom();
        Vec2 {
            x: page.x * zoom + self.pan_x,
            y: page.y * zoom + self.pan_y,
        }
    }

    /// Page-space rectangle visible through a `width` × `height` pixel viewport.
    #[must_use]
    pub fn viewport_bounds(&self, width: f64, height: f64) -> Bounds {
        let top_left = self.screen_to_page(Vec2::ZERO);
        let bottom_right = self.screen_to_page(Vec2::new(width, height));
        Bounds::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }
}
