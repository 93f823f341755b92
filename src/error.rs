//! Error taxonomy for layout operations.
//!
//! Every variant is raised before any mutation is committed; host failures
//! that happen inside a transaction are rolled back before being returned.

use crate::doc::ShapeId;
use crate::host::HostError;

/// Stable machine-readable code for an error, for hosts that surface them.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A requested parent or shape does not exist in the host model.
    #[error("shape not found: {0}")]
    Reference(ShapeId),
    /// Page bounds could not be resolved for a required shape.
    #[error("bounds unavailable for shape {0}")]
    GeometryUnavailable(ShapeId),
    /// The host rejected a mutation; the enclosing transaction was rolled back.
    #[error("host rejected mutation: {0}")]
    Host(#[from] HostError),
}

impl ErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Reference(_) => "E_REFERENCE",
            Self::GeometryUnavailable(_) => "E_GEOMETRY_UNAVAILABLE",
            Self::Host(_) => "E_HOST",
        }
    }
}
