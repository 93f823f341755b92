//! JSON scene snapshots read and written by `layoutctl`.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use board_layout::camera::Camera;
use board_layout::doc::{Binding, Shape, ShapeId};
use board_layout::engine::CanvasModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub shapes: Vec<Shape>,
    pub bindings: Vec<Binding>,
    pub selection: Vec<ShapeId>,
    pub viewport: Viewport,
    pub camera: Camera,
}

impl Scene {
    /// Hydrate an in-memory canvas from this snapshot.
    pub fn into_model(self) -> CanvasModel {
        let mut model = CanvasModel::new();
        model.load_snapshot(self.shapes, self.bindings);
        model.camera = self.camera;
        model.set_viewport(self.viewport.width, self.viewport.height);
        model.select(&self.selection);
        model
    }

    pub fn from_model(model: &CanvasModel) -> Self {
        Self {
            shapes: model.doc.shapes().into_iter().cloned().collect(),
            bindings: model.doc.bindings().to_vec(),
            selection: model.selection().to_vec(),
            viewport: Viewport { width: model.viewport_width, height: model.viewport_height },
            camera: model.camera,
        }
    }
}
