//! Labeled placeholder groups dropped below the current selection.
//!
//! A placeholder is a video-sized box with a centered text label, grouped so
//! they move together, then packed clear of whatever already sits beside it.

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod placeholder_test;

use tracing::info;
use uuid::Uuid;

use crate::config::LayoutConfig;
use crate::consts::{
    FALLBACK_ANCHOR_HEIGHT, FALLBACK_ANCHOR_WIDTH, MARK_CREATING_PLACEHOLDER, PLACEHOLDER_TEXT_HEIGHT,
    PLACEHOLDER_TEXT_WIDTH,
};
use crate::doc::{Shape, ShapeId, ShapeKind};
use crate::error::LayoutError;
use crate::geom::{Bounds, Vec2};
use crate::host::{CanvasHost, GroupOptions};
use crate::pack::compute_shape_offset;

/// Ids of a created placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderIds {
    pub group: ShapeId,
    pub geo: ShapeId,
    pub text: ShapeId,
}

impl PlaceholderIds {
    /// `[group, geo, text]`.
    #[must_use]
    pub fn to_array(self) -> [ShapeId; 3] {
        [self.group, self.geo, self.text]
    }
}

/// Anchor used when nothing is selected: a fixed-size box centered in the viewport.
#[must_use]
pub fn fallback_anchor(viewport: &Bounds) -> Bounds {
    Bounds::from_rect(
        viewport.mid_x() - FALLBACK_ANCHOR_WIDTH / 2.0,
        viewport.mid_y() - FALLBACK_ANCHOR_HEIGHT / 2.0,
        FALLBACK_ANCHOR_WIDTH,
        FALLBACK_ANCHOR_HEIGHT,
    )
}

/// Create a placeholder group showing `message` below the selection (or the
/// viewport center), then pack it clear of its siblings.
///
/// # Errors
///
/// `Host` if the host rejects a creation, `GeometryUnavailable` if the new
/// group's bounds cannot be resolved. Nothing is committed on error.
pub fn create_placeholder<H: CanvasHost>(
    host: &mut H,
    message: &str,
    config: &LayoutConfig,
) -> Result<PlaceholderIds, LayoutError> {
    let anchor = host.selection_bounds().unwrap_or_else(|| fallback_anchor(&host.viewport_bounds()));

    let Vec2 { x: box_x, y: box_y } = placeholder_origin(&anchor, config);
    let geo = Shape::new(ShapeKind::Geo, box_x, box_y, config.video_width, config.video_height);
    let text = Shape {
        props: serde_json::json!({ "text": message }),
        ..Shape::new(
            ShapeKind::Text,
            box_x + (config.video_width - PLACEHOLDER_TEXT_WIDTH) / 2.0,
            box_y + (config.video_height - PLACEHOLDER_TEXT_HEIGHT) / 2.0,
            PLACEHOLDER_TEXT_WIDTH,
            PLACEHOLDER_TEXT_HEIGHT,
        )
    };
    let ids = PlaceholderIds { group: Uuid::new_v4(), geo: geo.id, text: text.id };

    let offset = host.run_atomic(MARK_CREATING_PLACEHOLDER, |h| {
        h.create_shapes(vec![geo, text])?;
        h.group_shapes(&[ids.geo, ids.text], GroupOptions { group_id: Some(ids.group), select: false })?;
        let offset = compute_shape_offset(&*h, ids.group, config.spacing)?;
        if !offset.is_zero() {
            h.translate_shapes(&[ids.group], offset)?;
        }
        Ok(offset)
    })?;

    info!(group_id = %ids.group, dx = offset.x, "placeholder created");
    Ok(ids)
}

/// Page position the placeholder box would take before packing.
#[must_use]
pub fn placeholder_origin(anchor: &Bounds, config: &LayoutConfig) -> Vec2 {
    Vec2::new(anchor.min_x, anchor.max_y + config.placeholder_gap)
}
