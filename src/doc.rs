//! Document model: shapes, bindings, and the in-memory store.
//!
//! This module defines what lives on the canvas (`Shape`, `ShapeKind`), how a
//! connector terminal is attached to a shape (`Binding`, `AnchorDescriptor`),
//! a typed accessor for the open-ended `props` JSON bag (`Props`), and the
//! store that owns all live entities (`DocStore`).
//!
//! Shape positions are stored in the parent's space. The store is responsible
//! for resolving page transforms and page bounds; layout code only consumes
//! them through the host interface.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_NORMALIZED_ANCHOR;
use crate::geom::{Bounds, Transform, Vec2};

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Geometric box.
    Geo,
    /// Text label.
    Text,
    /// Raster image or video frame.
    Image,
    /// Connector between two bound shapes; endpoints live in `props`.
    Connector,
    /// Container whose bounds are the union of its children.
    Group,
}

/// A shape as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier for this shape.
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Left edge in parent space.
    pub x: f64,
    /// Top edge in parent space.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians about `(x, y)`, relative to the parent.
    #[serde(default)]
    pub rotation: f64,
    /// Containing shape, or `None` for shapes placed directly on the page.
    #[serde(default)]
    pub parent_id: Option<ShapeId>,
    /// Open-ended per-kind properties (text, connector offsets, style).
    #[serde(default)]
    pub props: serde_json::Value,
}

impl Shape {
    /// A fresh top-level shape with a new id and empty props.
    #[must_use]
    pub fn new(kind: ShapeKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            parent_id: None,
            props: serde_json::Value::Null,
        }
    }

    /// Transform mapping this shape's local space into its parent's space.
    #[must_use]
    pub fn local_transform(&self) -> Transform {
        Transform::new(Vec2::new(self.x, self.y), self.rotation)
    }
}

/// Which end of a connector a binding attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Start,
    End,
}

/// Where on a shape a connector terminal lands.
///
/// `is_exact` and `is_precise` are opaque to the layout engine; they are
/// forwarded into the binding unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorDescriptor {
    /// Fractions of the shape's width and height, each in `[0, 1]`.
    pub normalized_anchor: Vec2,
    #[serde(default)]
    pub is_exact: bool,
    #[serde(default)]
    pub is_precise: bool,
}

impl Default for AnchorDescriptor {
    fn default() -> Self {
        Self {
            normalized_anchor: Vec2::new(DEFAULT_NORMALIZED_ANCHOR.0, DEFAULT_NORMALIZED_ANCHOR.1),
            is_exact: false,
            is_precise: false,
        }
    }
}

impl AnchorDescriptor {
    /// Descriptor at the given normalized anchor with both flags cleared.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { normalized_anchor: Vec2::new(x, y), ..Self::default() }
    }
}

/// Directional association from a connector terminal to a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub from_id: ShapeId,
    pub to_id: ShapeId,
    pub terminal: Terminal,
    #[serde(flatten)]
    pub anchor: AnchorDescriptor,
}

/// Typed access to common props fields from a `Shape.props` JSON value.
pub struct Props<'a> {
    value: &'a serde_json::Value,
}

impl<'a> Props<'a> {
    /// Wrap a reference to a `props` JSON value for typed access.
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// Label text. Empty string when absent.
    #[must_use]
    pub fn text(&self) -> &str {
        self.value.get("text").and_then(|v| v.as_str()).unwrap_or("")
    }

    /// Stroke color name. Empty string when absent.
    #[must_use]
    pub fn color(&self) -> &str {
        self.value.get("color").and_then(|v| v.as_str()).unwrap_or("")
    }

    /// Dash style name. Empty string when absent.
    #[must_use]
    pub fn dash(&self) -> &str {
        self.value.get("dash").and_then(|v| v.as_str()).unwrap_or("")
    }

    /// Connector bend in page units. Defaults to `0.0` when absent.
    #[must_use]
    pub fn bend(&self) -> f64 {
        self.value
            .get("bend")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Connector start offset relative to the connector origin.
    #[must_use]
    pub fn start(&self) -> Option<Vec2> {
        self.point("start")
    }

    /// Connector end offset relative to the connector origin.
    #[must_use]
    pub fn end(&self) -> Option<Vec2> {
        self.point("end")
    }

    fn point(&self, key: &str) -> Option<Vec2> {
        let p = self.value.get(key)?;
        Some(Vec2::new(p.get("x")?.as_f64()?, p.get("y")?.as_f64()?))
    }
}

/// In-memory store of shapes and bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocStore {
    shapes: HashMap<ShapeId, Shape>,
    /// Creation order, used for stable sibling ordering.
    order: Vec<ShapeId>,
    bindings: Vec<Binding>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a shape. Replacing keeps the original ordering slot.
    pub fn insert(&mut self, shape: Shape) {
        if !self.shapes.contains_key(&shape.id) {
            self.order.push(shape.id);
        }
        self.shapes.insert(shape.id, shape);
    }

    /// Remove a shape and every binding that references it.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(id)?;
        self.order.retain(|o| o != id);
        self.bindings.retain(|b| b.from_id != *id && b.to_id != *id);
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    pub fn add_binding(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Bindings whose connector is `connector_id`.
    #[must_use]
    pub fn bindings_from(&self, connector_id: &ShapeId) -> Vec<&Binding> {
        self.bindings.iter().filter(|b| b.from_id == *connector_id).collect()
    }

    /// Direct children of `parent_id` (top-level shapes for `None`), in creation order.
    #[must_use]
    pub fn children_of(&self, parent_id: Option<ShapeId>) -> Vec<ShapeId> {
        self.order
            .iter()
            .filter(|id| self.shapes.get(id).is_some_and(|s| s.parent_id == parent_id))
            .copied()
            .collect()
    }

    /// Transform from the shape's local space to page space.
    ///
    /// Returns `None` if the shape or any ancestor is missing, or if the
    /// parent chain loops.
    #[must_use]
    pub fn page_transform(&self, id: &ShapeId) -> Option<Transform> {
        let mut shape = self.shapes.get(id)?;
        let mut transform = shape.local_transform();
        for _ in 0..self.shapes.len() {
            let Some(parent_id) = shape.parent_id else {
                return Some(transform);
            };
            shape = self.shapes.get(&parent_id)?;
            transform = shape.local_transform().then(&transform);
        }
        None
    }

    /// Axis-aligned page bounds of a shape.
    ///
    /// Groups resolve to the union of their children; a group with no
    /// resolvable children has no bounds.
    #[must_use]
    pub fn page_bounds(&self, id: &ShapeId) -> Option<Bounds> {
        let transform = self.page_transform(id)?;
        let shape = self.shapes.get(id)?;
        if shape.kind == ShapeKind::Group {
            return self
                .children_of(Some(*id))
                .iter()
                .filter_map(|child| self.page_bounds(child))
                .reduce(|acc, b| acc.union(&b));
        }
        let corners = [
            Vec2::ZERO,
            Vec2::new(shape.width, 0.0),
            Vec2::new(shape.width, shape.height),
            Vec2::new(0.0, shape.height),
        ]
        .map(|c| transform.local_to_page(c));
        Bounds::from_points(&corners)
    }

    /// Replace all shapes and bindings with a full snapshot.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>, bindings: Vec<Binding>) {
        self.shapes.clear();
        self.order.clear();
        for shape in shapes {
            self.insert(shape);
        }
        self.bindings = bindings;
    }

    /// All shapes in creation order.
    #[must_use]
    pub fn shapes(&self) -> Vec<&Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id)).collect()
    }

    /// Number of shapes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the store contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
