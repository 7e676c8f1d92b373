//! Core types for validation findings and results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Finding codes emitted by the built-in checkers and the engine.
pub mod codes {
    /// A mandated layer is absent from the drawing.
    pub const LAYER_MISSING: &str = "LAYER_MISSING";
    /// A mandated layer carries the wrong color.
    pub const LAYER_COLOR_WRONG: &str = "LAYER_COLOR_WRONG";
    /// A layer is neither mandated nor on the system allow-list.
    pub const LAYER_UNAUTHORIZED: &str = "LAYER_UNAUTHORIZED";
    /// An entity uses a globally forbidden type.
    pub const FORBIDDEN_ENTITY_TYPE: &str = "FORBIDDEN_ENTITY_TYPE";
    /// A room-outline polyline is not closed.
    pub const POLYLINE_NOT_CLOSED: &str = "POLYLINE_NOT_CLOSED";
    /// A polyline vertex lies off the Z=0 plane.
    pub const Z_NOT_ZERO: &str = "Z_NOT_ZERO";
    /// A polyline has a non-zero constant width.
    pub const POLYLINE_WIDTH_NOT_ZERO: &str = "POLYLINE_WIDTH_NOT_ZERO";
    /// A room polygon is smaller than the minimum area.
    pub const ROOM_TOO_SMALL: &str = "ROOM_TOO_SMALL";
    /// A room polygon is degenerate or self-intersecting.
    pub const POLYGON_INVALID: &str = "POLYGON_INVALID";
    /// Two room polygons share interior area.
    pub const ROOMS_OVERLAP: &str = "ROOMS_OVERLAP";
    /// An AOID value does not match the mandated format.
    pub const AOID_FORMAT_INVALID: &str = "AOID_FORMAT_INVALID";
    /// An AOID value occurs more than once in the drawing.
    pub const AOID_DUPLICATE: &str = "AOID_DUPLICATE";
    /// An AOID annotation lies outside every room polygon.
    pub const AOID_OUTSIDE_ROOM: &str = "AOID_OUTSIDE_ROOM";
    /// An AOID exists in the drawing but not in the room table.
    pub const AOID_NOT_IN_EXCEL: &str = "AOID_NOT_IN_EXCEL";
    /// An AOID exists in the room table but not in the drawing.
    pub const AOID_MISSING_IN_DWG: &str = "AOID_MISSING_IN_DWG";
    /// A text entity sits on a layer not permitted to carry text.
    pub const TEXT_WRONG_LAYER: &str = "TEXT_WRONG_LAYER";
    /// A text entity uses a style with a non-mandated font.
    pub const TEXT_WRONG_FONT: &str = "TEXT_WRONG_FONT";
    /// A text entity overrides the layer color.
    pub const COLOR_NOT_BYLAYER: &str = "COLOR_NOT_BYLAYER";
    /// The drawing file could not be decoded.
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    /// The room table could not be decoded.
    pub const EXCEL_PARSE_ERROR: &str = "EXCEL_PARSE_ERROR";
}

/// Severity level for validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational message, does not fail validation.
    Info,
    /// Deviation that should be addressed but does not fail validation.
    Warning,
    /// Guideline violation that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A point in drawing coordinates (millimeters, model space).
///
/// `z` is only serialized when it deviates from the drawing plane, so report
/// locations stay `{x, y}` for the common planar case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Elevation; 0 for all well-formed plan geometry.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub z: f64,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde skip_serializing_if signature
fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

impl Location {
    /// Creates a planar location.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Creates a location with an explicit elevation.
    #[must_use]
    pub fn with_elevation(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<glam::DVec3> for Location {
    fn from(p: glam::DVec3) -> Self {
        Self::with_elevation(p.x, p.y, p.z)
    }
}

impl From<glam::DVec2> for Location {
    fn from(p: glam::DVec2) -> Self {
        Self::new(p.x, p.y)
    }
}

/// A single deviation from the CAD guideline, found during validation.
///
/// Findings are immutable value objects; checkers construct them and never
/// touch them again. The serialized form is the stable report contract:
/// `code`, `message`, `severity`, `handle`, `layer`, `location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable finding code (e.g. `LAYER_MISSING`).
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Drawing location, when the finding is tied to geometry.
    pub location: Option<Location>,
    /// Handle of the offending entity, when known.
    #[serde(rename = "handle")]
    pub entity_handle: Option<String>,
    /// Layer the finding refers to, when applicable.
    pub layer: Option<String>,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(code: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
            location: None,
            entity_handle: None,
            layer: None,
        }
    }

    /// Creates an ERROR finding.
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, message)
    }

    /// Creates a WARNING finding.
    #[must_use]
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, message)
    }

    /// Attaches a drawing location.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attaches an optional drawing location.
    #[must_use]
    pub fn at_opt(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    /// Attaches the offending entity's handle.
    #[must_use]
    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.entity_handle = Some(handle.into());
        self
    }

    /// Attaches the layer the finding refers to.
    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    /// Attaches handle and layer of the offending entity.
    #[must_use]
    pub fn with_entity(mut self, entity: &crate::model::Entity) -> Self {
        self.entity_handle = entity.handle.clone();
        self.layer = Some(entity.layer.clone());
        self
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " @ ({:.0}, {:.0})", loc.x, loc.y)?;
        }
        Ok(())
    }
}

/// Result of validating one drawing.
///
/// Always produced, even when decoding fails; a fatal decode failure yields a
/// result with a single finding and an empty stats map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Path of the validated drawing.
    pub file_path: String,
    /// True iff no finding has severity ERROR.
    pub valid: bool,
    /// All ERROR findings, in checker order.
    pub errors: Vec<Finding>,
    /// All WARNING findings, in checker order.
    pub warnings: Vec<Finding>,
    /// Summary statistics (entity/layer/room counts and finding counts).
    pub stats: BTreeMap<String, u64>,
}

impl ValidationResult {
    /// Builds a result by partitioning findings into errors and warnings.
    ///
    /// `valid` is derived from the absence of errors. Finding counts are
    /// recorded in `stats`; the engine adds the model-derived counts.
    #[must_use]
    pub fn from_findings(file_path: impl Into<String>, findings: Vec<Finding>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for finding in findings {
            match finding.severity {
                Severity::Error => errors.push(finding),
                Severity::Warning => warnings.push(finding),
                Severity::Info => {}
            }
        }

        let mut stats = BTreeMap::new();
        stats.insert("error_count".to_string(), errors.len() as u64);
        stats.insert("warning_count".to_string(), warnings.len() as u64);

        Self {
            file_path: file_path.into(),
            valid: errors.is_empty(),
            errors,
            warnings,
            stats,
        }
    }

    /// Builds a failed result for a fatal decode error.
    ///
    /// Carries exactly one finding and no statistics; checkers never ran.
    #[must_use]
    pub fn fatal(file_path: impl Into<String>, finding: Finding) -> Self {
        Self {
            file_path: file_path.into(),
            valid: false,
            errors: vec![finding],
            warnings: Vec::new(),
            stats: BTreeMap::new(),
        }
    }

    /// Returns the number of ERROR findings.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of WARNING findings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Iterates all findings, errors first.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Looks up a stat by key.
    #[must_use]
    pub fn stat(&self, key: &str) -> Option<u64> {
        self.stats.get(key).copied()
    }
}
