//! Host canvas model capability interface.
//!
//! Layout operations never reach for a global editor. Everything they read or
//! create goes through a `CanvasHost` passed in by the caller, which keeps the
//! engine testable against an in-memory model.
//!
//! Mutations are grouped with `begin` / `commit` / `rollback`. `run_atomic`
//! composes the three so that a closure either lands as one undoable history
//! step or leaves the model untouched.

use tracing::{error, warn};

use crate::doc::{Binding, Shape, ShapeId};
use crate::error::LayoutError;
use crate::geom::{Bounds, Transform, Vec2};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("shape already exists: {0}")]
    DuplicateShape(ShapeId),
    #[error("cannot group an empty selection")]
    EmptyGroup,
    #[error("no open transaction")]
    NoTransaction,
}

/// Options for `CanvasHost::group_shapes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupOptions {
    /// Id for the new group; generated by the host when `None`.
    pub group_id: Option<ShapeId>,
    /// Whether the group becomes the current selection.
    pub select: bool,
}

/// Queries and mutations the layout engine needs from a canvas model.
pub trait CanvasHost {
    // --- Queries ---

    /// Page-space axis-aligned bounds, or `None` if the shape cannot be laid out.
    fn shape_bounds(&self, id: ShapeId) -> Option<Bounds>;

    /// Page-space rotation in radians. Unknown shapes report `0.0`.
    fn shape_rotation(&self, id: ShapeId) -> f64;

    fn shape(&self, id: ShapeId) -> Option<Shape>;

    /// Transform from the shape's local space to page space.
    fn page_transform(&self, id: ShapeId) -> Option<Transform>;

    /// Children of `parent_id` (page-level shapes for `None`) in stacking order.
    fn sorted_sibling_ids(&self, parent_id: Option<ShapeId>) -> Vec<ShapeId>;

    fn selection_bounds(&self) -> Option<Bounds>;

    fn viewport_bounds(&self) -> Bounds;

    // --- Mutations ---

    fn create_shapes(&mut self, shapes: Vec<Shape>) -> Result<(), HostError>;

    fn create_bindings(&mut self, bindings: Vec<Binding>) -> Result<(), HostError>;

    /// Group `ids` under a new group shape and return its id.
    fn group_shapes(&mut self, ids: &[ShapeId], options: GroupOptions) -> Result<ShapeId, HostError>;

    /// Move shapes by `delta` in page space.
    fn translate_shapes(&mut self, ids: &[ShapeId], delta: Vec2) -> Result<(), HostError>;

    // --- Transactions ---

    /// Open a transaction labelled with a history `mark`.
    fn begin(&mut self, mark: &str);

    /// Close the innermost transaction, keeping its changes.
    fn commit(&mut self) -> Result<(), HostError>;

    /// Close the innermost transaction, discarding its changes.
    fn rollback(&mut self) -> Result<(), HostError>;

    /// Run `f` inside a transaction: commit on `Ok`, roll back on `Err`.
    ///
    /// A failed rollback is logged; the closure's error is still the one returned.
    fn run_atomic<T, F>(&mut self, mark: &str, f: F) -> Result<T, LayoutError>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T, LayoutError>,
    {
        self.begin(mark);
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(err) => {
                warn!(mark, error = %err, "transaction rolled back");
                if let Err(rollback_err) = self.rollback() {
                    error!(mark, error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
