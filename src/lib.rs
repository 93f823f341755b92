//! Shape-layout and connector-geometry engine for infinite-canvas boards.
//!
//! The engine places new shapes clear of their siblings, lays out connectors
//! between rotated shapes, and drops labeled placeholder groups onto the
//! canvas. It never owns the canvas: every operation reads and writes through
//! a [`host::CanvasHost`] supplied by the caller, and multi-entity creations
//! run inside the host's transactions so they commit as one undo step or not
//! at all. [`engine::CanvasModel`] is a complete in-memory host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`pack`] | Horizontal first-fit placement among siblings |
//! | [`connector`] | Anchor resolution and connector/binding creation |
//! | [`placeholder`] | Labeled placeholder groups |
//! | [`host`] | Host capability trait and transaction helper |
//! | [`engine`] | In-memory host with undo history |
//! | [`doc`] | Shapes, bindings, and the document store |
//! | [`geom`] | Vectors, bounds, and rigid transforms |
//! | [`camera`] | Pan/zoom camera and viewport bounds |
//! | [`config`] | Layout settings and environment overrides |
//! | [`error`] | Error taxonomy |
//! | [`consts`] | Shared numeric defaults |

pub mod camera;
pub mod config;
pub mod connector;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geom;
pub mod host;
pub mod pack;
pub mod placeholder;

pub use config::{ConnectorOffsetMode, LayoutConfig};
pub use connector::{ConnectorCreation, ConnectorOptions, create_connector};
pub use error::{ErrorCode, LayoutError};
pub use host::CanvasHost;
pub use pack::{Sibling, place_shape, placement_offset};
pub use placeholder::{PlaceholderIds, create_placeholder};
