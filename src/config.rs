//! Layout configuration: compiled defaults with environment overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{PLACEHOLDER_GAP, SPACING_BETWEEN_OBJECTS, VIDEO_HEIGHT, VIDEO_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} (expected a non-negative number)")]
    InvalidNumber { var: String, value: String },
    #[error("invalid connector offset mode: {0:?} (expected `corrected` or `literal`)")]
    InvalidOffsetMode(String),
}

/// How connector terminal offsets are derived from the anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectorOffsetMode {
    /// `terminal - anchor` on each axis.
    #[default]
    Corrected,
    /// Legacy formula: both axes use `anchor.x - terminal.x`.
    Literal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Gap kept between a packed shape and the sibling that pushed it.
    pub spacing: f64,
    /// Vertical gap between a placeholder's anchor and its box.
    pub placeholder_gap: f64,
    pub video_width: f64,
    pub video_height: f64,
    pub offset_mode: ConnectorOffsetMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: SPACING_BETWEEN_OBJECTS,
            placeholder_gap: PLACEHOLDER_GAP,
            video_width: VIDEO_WIDTH,
            video_height: VIDEO_HEIGHT,
            offset_mode: ConnectorOffsetMode::default(),
        }
    }
}

impl LayoutConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `LAYOUT_SPACING`: default 50
    /// - `LAYOUT_PLACEHOLDER_GAP`: default 100
    /// - `LAYOUT_VIDEO_WIDTH`: default 640
    /// - `LAYOUT_VIDEO_HEIGHT`: default 360
    /// - `LAYOUT_CONNECTOR_OFFSETS`: `corrected` (default) or `literal`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Absent keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            spacing: parse_number(&lookup, "LAYOUT_SPACING", defaults.spacing)?,
            placeholder_gap: parse_number(&lookup, "LAYOUT_PLACEHOLDER_GAP", defaults.placeholder_gap)?,
            video_width: parse_number(&lookup, "LAYOUT_VIDEO_WIDTH", defaults.video_width)?,
            video_height: parse_number(&lookup, "LAYOUT_VIDEO_HEIGHT", defaults.video_height)?,
            offset_mode: parse_offset_mode(lookup("LAYOUT_CONNECTOR_OFFSETS").as_deref())?,
        })
    }
}

fn parse_number<F>(lookup: &F, var: &str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ConfigError::InvalidNumber { var: var.to_string(), value: raw }),
    }
}

fn parse_offset_mode(raw: Option<&str>) -> Result<ConnectorOffsetMode, ConfigError> {
    match raw.map(str::trim) {
        None | Some("corrected") => Ok(ConnectorOffsetMode::Corrected),
        Some("literal") => Ok(ConnectorOffsetMode::Literal),
        Some(other) => Err(ConfigError::InvalidOffsetMode(other.to_string())),
    }
}
