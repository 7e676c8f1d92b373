//! # plan-check-rules
//!
//! Built-in checkers for the BBL CAD-Richtlinie.
//!
//! This crate provides the guideline checks that run over a parsed drawing
//! model, one module per concern.
//!
//! ## Finding codes
//!
//! | Checker | Codes |
//! |---------|-------|
//! | `required-layers` | `LAYER_MISSING`, `LAYER_COLOR_WRONG`, `LAYER_UNAUTHORIZED` |
//! | `forbidden-entities` | `FORBIDDEN_ENTITY_TYPE` |
//! | `polyline-geometry` | `POLYLINE_NOT_CLOSED`, `Z_NOT_ZERO`, `POLYLINE_WIDTH_NOT_ZERO`, `ROOM_TOO_SMALL`, `POLYGON_INVALID`, `ROOMS_OVERLAP` |
//! | `aoid-annotations` | `AOID_FORMAT_INVALID`, `AOID_DUPLICATE`, `AOID_OUTSIDE_ROOM`, `AOID_NOT_IN_EXCEL`, `AOID_MISSING_IN_DWG` |
//! | `text-styles` | `TEXT_WRONG_LAYER`, `TEXT_WRONG_FONT`, `COLOR_NOT_BYLAYER` |
//!
//! All codes are ERROR severity except `LAYER_UNAUTHORIZED` and
//! `COLOR_NOT_BYLAYER`, which are WARNING.
//!
//! ## Usage
//!
//! ```
//! use plan_check_core::DrawingDocument;
//! use plan_check_rules::default_validator;
//!
//! let validator = default_validator();
//! let doc = DrawingDocument::from_json_str("{}").expect("valid JSON");
//! let result = validator.validate_document("plan.dwg", &doc, None);
//! // an empty drawing is missing every mandated layer
//! assert!(!result.valid);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotations;
mod entity_types;
mod geometry;
mod layer_rules;
mod presets;
mod text_styles;

pub use annotations::AoidAnnotations;
pub use entity_types::ForbiddenEntities;
pub use geometry::PolylineGeometry;
pub use layer_rules::RequiredLayers;
pub use presets::{default_checkers, default_validator, validator_with_rules};
pub use text_styles::TextStyles;

/// Re-export core types for convenience.
pub use plan_check_core::{Checker, Finding, Severity, ValidationResult};
