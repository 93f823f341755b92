//! Horizontal first-fit packing of a new shape among its siblings.
//!
//! DESIGN
//! ======
//! A single left-to-right sweep over siblings sorted by `min_x`. Each sibling
//! that shares the target's vertical band and intersects the horizontal span
//! the target would currently occupy pushes the target past its right edge
//! plus `spacing`. Only rightward moves are made and `dy` is always zero.
//!
//! The sweep is greedy: it resolves conflicts in sorted order and never
//! backtracks, so the result is first-fit rather than the smallest possible
//! displacement.

#[cfg(test)]
#[path = "pack_test.rs"]
mod pack_test;

use tracing::debug;

use crate::consts::MARK_PLACING_SHAPE;
use crate::doc::ShapeId;
use crate::error::LayoutError;
use crate::geom::{Bounds, Vec2};
use crate::host::CanvasHost;

/// A sibling shape's id and page bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sibling {
    pub id: ShapeId,
    pub bounds: Bounds,
}

/// Offset that moves `target` clear of overlapping `siblings`.
///
/// The entry whose id equals `target_id` is ignored. Ties on `min_x` keep the
/// input order.
#[must_use]
pub fn placement_offset(target: &Bounds, siblings: &[Sibling], target_id: ShapeId, spacing: f64) -> Vec2 {
    let mut sorted: Vec<&Sibling> = siblings.iter().collect();
    sorted.sort_by(|a, b| a.bounds.min_x.total_cmp(&b.bounds.min_x));

    let width = target.width();
    let mut target_position = target.min_x;
    for sibling in sorted {
        if sibling.id == target_id {
            continue;
        }
        let b = &sibling.bounds;
        if !target.overlaps_vertically(b) {
            continue;
        }
        if b.max_x < target_position {
            continue;
        }
        if b.min_x > target_position + width {
            continue;
        }
        target_position = b.max_x + spacing;
    }

    Vec2::new(target_position - target.min_x, 0.0)
}

/// Move shape `id` clear of its siblings and return the applied offset.
///
/// Siblings whose bounds cannot be resolved are ignored. No translation is
/// issued when the shape is already clear.
///
/// # Errors
///
/// `Reference` if the shape does not exist, `GeometryUnavailable` if its page
/// bounds cannot be resolved, `Host` if the translation is rejected.
pub fn place_shape<H: CanvasHost>(host: &mut H, id: ShapeId, spacing: f64) -> Result<Vec2, LayoutError> {
    let offset = compute_shape_offset(host, id, spacing)?;
    if offset.is_zero() {
        return Ok(offset);
    }
    host.run_atomic(MARK_PLACING_SHAPE, |h| {
        h.translate_shapes(&[id], offset)?;
        Ok(offset)
    })
}

/// Resolve `id` and its siblings through the host and compute the offset
/// without applying it.
pub(crate) fn compute_shape_offset<H: CanvasHost>(host: &H, id: ShapeId, spacing: f64) -> Result<Vec2, LayoutError> {
    let shape = host.shape(id).ok_or(LayoutError::Reference(id))?;
    let target = host.shape_bounds(id).ok_or(LayoutError::GeometryUnavailable(id))?;

    let siblings: Vec<Sibling> = host
        .sorted_sibling_ids(shape.parent_id)
        .into_iter()
        .filter_map(|sibling_id| match host.shape_bounds(sibling_id) {
            Some(bounds) => Some(Sibling { id: sibling_id, bounds }),
            None => {
                debug!(%sibling_id, "skipping sibling without bounds");
                None
            }
        })
        .collect();

    let offset = placement_offset(&target, &siblings, id, spacing);
    debug!(%id, siblings = siblings.len(), dx = offset.x, "computed placement offset");
    Ok(offset)
}
