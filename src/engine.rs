//! In-memory canvas model implementing [`CanvasHost`].
//!
//! `CanvasModel` owns the document, camera, selection, and an undo history.
//! Transactions are journaled as full snapshots taken when each level opens;
//! rolling back restores that level's snapshot, and committing the outermost
//! level turns it into one undo step labelled with its history mark.

use tracing::{debug, info};

use crate::camera::Camera;
use crate::doc::{Binding, DocStore, Shape, ShapeId, ShapeKind};
use crate::geom::{Bounds, Transform, Vec2};
use crate::host::{CanvasHost, GroupOptions, HostError};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Restorable copy of everything a transaction can change.
#[derive(Debug, Clone)]
struct Snapshot {
    doc: DocStore,
    selection: Vec<ShapeId>,
}

/// A committed, undoable step.
#[derive(Debug, Clone)]
struct HistoryEntry {
    mark: String,
    before: Snapshot,
}

#[derive(Debug, Clone)]
struct OpenTransaction {
    mark: String,
    before: Snapshot,
}

/// Reference host: a single-user canvas held entirely in memory.
#[derive(Debug, Clone)]
pub struct CanvasModel {
    pub doc: DocStore,
    pub camera: Camera,
    pub viewport_width: f64,
    pub viewport_height: f64,
    selection: Vec<ShapeId>,
    open: Vec<OpenTransaction>,
    history: Vec<HistoryEntry>,
}

impl Default for CanvasModel {
    fn default() -> Self {
        Self {
            doc: DocStore::new(),
            camera: Camera::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            selection: Vec::new(),
            open: Vec::new(),
            history: Vec::new(),
        }
    }
}

impl CanvasModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Hydrate the document from a snapshot. Clears selection and history.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>, bindings: Vec<Binding>) {
        self.doc.load_snapshot(shapes, bindings);
        self.selection.clear();
        self.history.clear();
        self.open.clear();
    }

    /// Update viewport dimensions in screen pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Replace the selection. Unknown ids are dropped.
    pub fn select(&mut self, ids: &[ShapeId]) {
        self.selection = ids.iter().copied().filter(|id| self.doc.contains(id)).collect();
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    #[must_use]
    pub fn object(&self, id: &ShapeId) -> Option<&Shape> {
        self.doc.get(id)
    }

    /// History marks of committed steps, oldest first.
    #[must_use]
    pub fn history_marks(&self) -> Vec<&str> {
        self.history.iter().map(|h| h.mark.as_str()).collect()
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.open.is_empty()
    }

    // --- History ---

    /// Revert the most recent committed step. Returns its mark.
    ///
    /// Has no effect while a transaction is open.
    pub fn undo(&mut self) -> Option<String> {
        if self.in_transaction() {
            return None;
        }
        let entry = self.history.pop()?;
        self.restore(entry.before);
        info!(mark = %entry.mark, "undo");
        Some(entry.mark)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot { doc: self.doc.clone(), selection: self.selection.clone() }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.doc = snapshot.doc;
        self.selection = snapshot.selection;
    }

    /// Page rotation of the space a shape's position is expressed in.
    fn parent_rotation(&self, shape: &Shape) -> Option<f64> {
        match shape.parent_id {
            None => Some(0.0),
            Some(parent_id) => self.doc.page_transform(&parent_id).map(|t| t.rotation),
        }
    }

    fn parent_transform(&self, parent_id: Option<ShapeId>) -> Result<Transform, HostError> {
        match parent_id {
            None => Ok(Transform::IDENTITY),
            Some(id) => self.doc.page_transform(&id).ok_or(HostError::ShapeNotFound(id)),
        }
    }
}

impl CanvasHost for CanvasModel {
    fn shape_bounds(&self, id: ShapeId) -> Option<Bounds> {
        self.doc.page_bounds(&id)
    }

    fn shape_rotation(&self, id: ShapeId) -> f64 {
        self.doc.page_transform(&id).map_or(0.0, |t| t.rotation)
    }

    fn shape(&self, id: ShapeId) -> Option<Shape> {
        self.doc.get(&id).cloned()
    }

    fn page_transform(&self, id: ShapeId) -> Option<Transform> {
        self.doc.page_transform(&id)
    }

    fn sorted_sibling_ids(&self, parent_id: Option<ShapeId>) -> Vec<ShapeId> {
        self.doc.children_of(parent_id)
    }

    fn selection_bounds(&self) -> Option<Bounds> {
        self.selection
            .iter()
            .filter_map(|id| self.doc.page_bounds(id))
            .reduce(|acc, b| acc.union(&b))
    }

    fn viewport_bounds(&self) -> Bounds {
        self.camera.viewport_bounds(self.viewport_width, self.viewport_height)
    }

    fn create_shapes(&mut self, shapes: Vec<Shape>) -> Result<(), HostError> {
        for (i, shape) in shapes.iter().enumerate() {
            if self.doc.contains(&shape.id) || shapes[..i].iter().any(|s| s.id == shape.id) {
                return Err(HostError::DuplicateShape(shape.id));
            }
            if let Some(parent_id) = shape.parent_id {
                if !self.doc.contains(&parent_id) && !shapes.iter().any(|s| s.id == parent_id) {
                    return Err(HostError::ShapeNotFound(parent_id));
                }
            }
        }
        debug!(count = shapes.len(), "creating shapes");
        for shape in shapes {
            self.doc.insert(shape);
        }
        Ok(())
    }

    fn create_bindings(&mut self, bindings: Vec<Binding>) -> Result<(), HostError> {
        for binding in &bindings {
            for id in [binding.from_id, binding.to_id] {
                if !self.doc.contains(&id) {
                    return Err(HostError::ShapeNotFound(id));
                }
            }
        }
        debug!(count = bindings.len(), "creating bindings");
        for binding in bindings {
            self.doc.add_binding(binding);
        }
        Ok(())
    }

    fn group_shapes(&mut self, ids: &[ShapeId], options: GroupOptions) -> Result<ShapeId, HostError> {
        let (first, _) = ids.split_first().ok_or(HostError::EmptyGroup)?;
        let parent_id = self.doc.get(first).ok_or(HostError::ShapeNotFound(*first))?.parent_id;

        let mut union: Option<Bounds> = None;
        let mut child_transforms = Vec::with_capacity(ids.len());
        for id in ids {
            let transform = self.doc.page_transform(id).ok_or(HostError::ShapeNotFound(*id))?;
            let bounds = self.doc.page_bounds(id).ok_or(HostError::ShapeNotFound(*id))?;
            union = Some(union.map_or(bounds, |u| u.union(&bounds)));
            child_transforms.push((*id, transform));
        }
        let union = union.ok_or(HostError::EmptyGroup)?;

        let parent_page = self.parent_transform(parent_id)?;
        let origin = parent_page.page_to_local(union.origin());
        let mut group = Shape::new(ShapeKind::Group, origin.x, origin.y, union.width(), union.height());
        if let Some(group_id) = options.group_id {
            if self.doc.contains(&group_id) {
                return Err(HostError::DuplicateShape(group_id));
            }
            group.id = group_id;
        }
        group.parent_id = parent_id;
        let group_id = group.id;
        let group_page = parent_page.then(&group.local_transform());

        self.doc.insert(group);
        for (id, page) in child_transforms {
            if let Some(child) = self.doc.get_mut(&id) {
                let local = group_page.page_to_local(page.translation);
                child.x = local.x;
                child.y = local.y;
                child.rotation = page.rotation - group_page.rotation;
                child.parent_id = Some(group_id);
            }
        }
        if options.select {
            self.selection = vec![group_id];
        }
        debug!(%group_id, children = ids.len(), "grouped shapes");
        Ok(group_id)
    }

    fn translate_shapes(&mut self, ids: &[ShapeId], delta: Vec2) -> Result<(), HostError> {
        let mut local_deltas = Vec::with_capacity(ids.len());
        for id in ids {
            let shape = self.doc.get(id).ok_or(HostError::ShapeNotFound(*id))?;
            let rotation = self.parent_rotation(shape).ok_or(HostError::ShapeNotFound(*id))?;
            local_deltas.push((*id, delta.rotate(-rotation)));
        }
        for (id, local) in local_deltas {
            if let Some(shape) = self.doc.get_mut(&id) {
                shape.x += local.x;
                shape.y += local.y;
            }
        }
        debug!(count = ids.len(), dx = delta.x, dy = delta.y, "translated shapes");
        Ok(())
    }

    fn begin(&mut self, mark: &str) {
        let before = self.snapshot();
        self.open.push(OpenTransaction { mark: mark.to_string(), before });
        debug!(mark, depth = self.open.len(), "transaction opened");
    }

    fn commit(&mut self) -> Result<(), HostError> {
        let tx = self.open.pop().ok_or(HostError::NoTransaction)?;
        // Nested commits fold into the enclosing step.
        if self.open.is_empty() {
            info!(mark = %tx.mark, shapes = self.doc.len(), "transaction committed");
            self.history.push(HistoryEntry { mark: tx.mark, before: tx.before });
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), HostError> {
        let tx = self.open.pop().ok_or(HostError::NoTransaction)?;
        self.restore(tx.before);
        debug!(mark = %tx.mark, "transaction rolled back");
        Ok(())
    }
}
