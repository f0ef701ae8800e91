#![forbid(unsafe_code)]

//! Drag session configuration.
//!
//! [`DragConfig`] is supplied once when a drag session is created and never
//! changes for the session's life. With the `config-file` feature it can be
//! loaded from TOML or JSON:
//!
//! ```toml
//! # dragline.toml
//! drag_start_threshold = 8.0
//! pointer_direction_change_threshold = 4.0
//! ```
//!
//! ```rust,ignore
//! let config = DragConfig::from_toml_file("dragline.toml")?;
//! ```

use std::fmt;
#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

/// Default Manhattan distance (px) before an armed session starts dragging.
pub const DEFAULT_DRAG_START_THRESHOLD: f64 = 5.0;

/// Default movement (px) per axis before the reported direction may change.
pub const DEFAULT_POINTER_DIRECTION_CHANGE_THRESHOLD: f64 = 5.0;

/// Window after a touch during which a mouse event is treated as synthesized
/// by the browser and ignored.
pub const MOUSE_EVENT_IGNORE_TIME: Duration = Duration::from_millis(800);

/// Thresholds for one drag session.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct DragConfig {
    /// Minimum Manhattan distance (`|dx| + |dy|`) from the pickup point
    /// before a drag starts.
    pub drag_start_threshold: f64,
    /// Movement on one axis, since the last recorded change, needed before the
    /// reported direction on that axis is updated.
    pub pointer_direction_change_threshold: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            drag_start_threshold: DEFAULT_DRAG_START_THRESHOLD,
            pointer_direction_change_threshold: DEFAULT_POINTER_DIRECTION_CHANGE_THRESHOLD,
        }
    }
}

impl DragConfig {
    /// Construct a validated configuration.
    pub fn new(
        drag_start_threshold: f64,
        pointer_direction_change_threshold: f64,
    ) -> Result<Self, DragConfigError> {
        check_threshold("drag_start_threshold", drag_start_threshold)?;
        check_threshold(
            "pointer_direction_change_threshold",
            pointer_direction_change_threshold,
        )?;
        Ok(Self {
            drag_start_threshold,
            pointer_direction_change_threshold,
        })
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        [
            ("drag_start_threshold", self.drag_start_threshold),
            (
                "pointer_direction_change_threshold",
                self.pointer_direction_change_threshold,
            ),
        ]
        .into_iter()
        .filter_map(|(field, value)| check_threshold(field, value).err())
        .map(|err| err.to_string())
        .collect()
    }

    /// Parse from a TOML string and validate.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, DragConfigError> {
        let config: Self = toml::from_str(s).map_err(DragConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DragConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DragConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a JSON string and validate.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, DragConfigError> {
        let config: Self = serde_json::from_str(s).map_err(DragConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DragConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DragConfigError::Io)?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "config-file")]
    fn validated(self) -> Result<Self, DragConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                drag_start_threshold = self.drag_start_threshold,
                pointer_direction_change_threshold = self.pointer_direction_change_threshold,
                "drag config loaded"
            );
            Ok(self)
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(errors = errors.len(), "drag config rejected");
            Err(DragConfigError::Validation(errors))
        }
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), DragConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DragConfigError::InvalidThreshold { field, value })
    }
}

/// Errors that can occur when building or loading a [`DragConfig`].
#[derive(Debug)]
pub enum DragConfigError {
    /// A threshold was negative, NaN, or infinite.
    InvalidThreshold { field: &'static str, value: f64 },
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for DragConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidThreshold { field, value } => {
                write!(f, "invalid {field} value {value} (must be finite and >= 0)")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for DragConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::InvalidThreshold { .. } | Self::Validation(_) => None,
        }
    }
}
