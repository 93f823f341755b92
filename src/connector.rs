//! Connector geometry: anchor-to-anchor connectors between two shapes.
//!
//! DESIGN
//! ======
//! Each side resolves a normalized anchor against its shape's page bounds,
//! rotating the scaled offset by the shape's page rotation. The connector is
//! placed at the componentwise minimum of the two terminals, mapped into the
//! parent's local space when a parent is given, and stores both terminals as
//! offsets from that origin. The connector and its two bindings are created
//! in one transaction.

#[cfg(test)]
#[path = "connector_test.rs"]
mod connector_test;

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{ConnectorOffsetMode, LayoutConfig};
use crate::consts::{CONNECTOR_BEND, CONNECTOR_COLOR, CONNECTOR_DASH, MARK_CREATING_CONNECTOR};
use crate::doc::{AnchorDescriptor, Binding, Shape, ShapeId, ShapeKind, Terminal};
use crate::error::LayoutError;
use crate::geom::{Bounds, Transform, Vec2};
use crate::host::CanvasHost;

/// Optional parent and per-side anchors for `create_connector`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConnectorOptions {
    /// Container whose local space the connector is expressed in.
    pub parent_id: Option<ShapeId>,
    pub start: Option<AnchorDescriptor>,
    pub end: Option<AnchorDescriptor>,
}

/// Resolved placement of a connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorLayout {
    /// Page-space terminal points.
    pub start_terminal: Vec2,
    pub end_terminal: Vec2,
    /// Connector origin in parent space (page space without a parent).
    pub origin: Vec2,
    /// Terminal offsets stored on the connector.
    pub start_offset: Vec2,
    pub end_offset: Vec2,
}

/// What `create_connector` committed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorCreation {
    pub connector_id: ShapeId,
    /// `[start, end]`.
    pub bindings: [Binding; 2],
}

/// Page-space point for `anchor` on a shape with the given page bounds and rotation.
#[must_use]
pub fn terminal_position(bounds: &Bounds, rotation: f64, anchor: Vec2) -> Vec2 {
    bounds.origin() + bounds.size().mul_v(anchor).rotate(rotation)
}

/// Lay out a connector between two page-space terminals.
#[must_use]
pub fn layout_connector(
    start_terminal: Vec2,
    end_terminal: Vec2,
    parent: Option<&Transform>,
    mode: ConnectorOffsetMode,
) -> ConnectorLayout {
    let page_origin = start_terminal.min(end_terminal);
    let to_parent = |p: Vec2| parent.map_or(p, |t| t.page_to_local(p));
    let origin = to_parent(page_origin);

    let (start_offset, end_offset) = match mode {
        ConnectorOffsetMode::Corrected => (to_parent(start_terminal) - origin, to_parent(end_terminal) - origin),
        ConnectorOffsetMode::Literal => {
            let legacy = |terminal: Vec2| {
                let d = origin.x - terminal.x;
                Vec2::new(d, d)
            };
            (legacy(start_terminal), legacy(end_terminal))
        }
    };

    ConnectorLayout { start_terminal, end_terminal, origin, start_offset, end_offset }
}

/// Create a connector from `start_id` to `end_id` plus its two bindings.
///
/// # Errors
///
/// `Reference` if `options.parent_id` names a missing shape,
/// `GeometryUnavailable` if either endpoint (or the parent's transform)
/// cannot be resolved, and `Host` if the host rejects a creation. Nothing is
/// committed on error.
pub fn create_connector<H: CanvasHost>(
    host: &mut H,
    start_id: ShapeId,
    end_id: ShapeId,
    options: ConnectorOptions,
    config: &LayoutConfig,
) -> Result<ConnectorCreation, LayoutError> {
    let start_anchor = options.start.unwrap_or_default();
    let end_anchor = options.end.unwrap_or_default();

    let parent = match options.parent_id {
        Some(parent_id) => {
            host.shape(parent_id).ok_or(LayoutError::Reference(parent_id))?;
            Some(host.page_transform(parent_id).ok_or(LayoutError::GeometryUnavailable(parent_id))?)
        }
        None => None,
    };

    let start_bounds = host.shape_bounds(start_id).ok_or(LayoutError::GeometryUnavailable(start_id))?;
    let end_bounds = host.shape_bounds(end_id).ok_or(LayoutError::GeometryUnavailable(end_id))?;

    let start_terminal =
        terminal_position(&start_bounds, host.shape_rotation(start_id), start_anchor.normalized_anchor);
    let end_terminal = terminal_position(&end_bounds, host.shape_rotation(end_id), end_anchor.normalized_anchor);
    let layout = layout_connector(start_terminal, end_terminal, parent.as_ref(), config.offset_mode);
    debug!(
        %start_id,
        %end_id,
        start_x = start_terminal.x,
        start_y = start_terminal.y,
        end_x = end_terminal.x,
        end_y = end_terminal.y,
        mode = ?config.offset_mode,
        "resolved connector terminals"
    );

    let connector_id = Uuid::new_v4();
    let connector = Shape {
        id: connector_id,
        kind: ShapeKind::Connector,
        x: layout.origin.x,
        y: layout.origin.y,
        width: 0.0,
        height: 0.0,
        rotation: 0.0,
        parent_id: options.parent_id,
        props: serde_json::json!({
            "color": CONNECTOR_COLOR,
            "dash": CONNECTOR_DASH,
            "bend": CONNECTOR_BEND,
            "start": layout.start_offset,
            "end": layout.end_offset,
        }),
    };
    let bindings = [
        Binding { from_id: connector_id, to_id: start_id, terminal: Terminal::Start, anchor: start_anchor },
        Binding { from_id: connector_id, to_id: end_id, terminal: Terminal::End, anchor: end_anchor },
    ];

    host.run_atomic(MARK_CREATING_CONNECTOR, |h| {
        h.create_shapes(vec![connector])?;
        h.create_bindings(bindings.to_vec())?;
        Ok(())
    })?;

    info!(%connector_id, %start_id, %end_id, parent_id = ?options.parent_id, "connector created");
    Ok(ConnectorCreation { connector_id, bindings })
}
