//! Shared numeric defaults for the layout engine.

// ── Packing ─────────────────────────────────────────────────────

/// Horizontal gap left between a placed shape and the sibling that pushed it.
pub const SPACING_BETWEEN_OBJECTS: f64 = 50.0;

// ── Placeholders ────────────────────────────────────────────────

/// Placeholder box width (half of a 1280×720 frame).
pub const VIDEO_WIDTH: f64 = 1280.0 / 2.0;

/// Placeholder box height (half of a 1280×720 frame).
pub const VIDEO_HEIGHT: f64 = 720.0 / 2.0;

/// Vertical gap between the anchor's bottom edge and the placeholder box.
pub const PLACEHOLDER_GAP: f64 = 100.0;

/// Size of the anchor synthesized around the viewport center when nothing is selected.
pub const FALLBACK_ANCHOR_WIDTH: f64 = 200.0;
pub const FALLBACK_ANCHOR_HEIGHT: f64 = 100.0;

/// Size of the placeholder's label shape.
pub const PLACEHOLDER_TEXT_WIDTH: f64 = 200.0;
pub const PLACEHOLDER_TEXT_HEIGHT: f64 = 40.0;

// ── Connectors ──────────────────────────────────────────────────

/// Normalized anchor used when a side supplies none (the shape center).
pub const DEFAULT_NORMALIZED_ANCHOR: (f64, f64) = (0.5, 0.5);

pub const CONNECTOR_COLOR: &str = "violet";
pub const CONNECTOR_DASH: &str = "dashed";
pub const CONNECTOR_BEND: f64 = 50.0;

// ── History marks ───────────────────────────────────────────────

pub const MARK_CREATING_CONNECTOR: &str = "creating_connector";
pub const MARK_CREATING_PLACEHOLDER: &str = "creating_placeholder";
pub const MARK_PLACING_SHAPE: &str = "placing_shape";
