//! # plan-check-core
//!
//! Core framework for validating architectural floor-plan drawings against
//! the BBL CAD-Richtlinie.
//!
//! This crate provides the foundational types for building drawing
//! validators. It includes:
//!
//! - [`DrawingModel`] as the normalized, read-only view of a parsed drawing
//! - [`Checker`] trait for guideline rules over the model
//! - [`Validator`] for orchestrating checker execution
//! - [`Finding`] and [`ValidationResult`] for representing outcomes
//! - [`RuleSet`] holding the immutable guideline tables
//! - [`DrawingParser`] / [`RoomTableParser`] capabilities for the external
//!   decoding collaborators
//!
//! ## Example
//!
//! ```
//! use plan_check_core::{DrawingDocument, Validator};
//!
//! let validator = Validator::builder().build();
//! let doc = DrawingDocument::from_json_str("{}")?;
//! let result = validator.validate_document("plan.dwg", &doc, None);
//! assert!(result.valid);
//! # Ok::<(), serde_json::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod engine;
mod model;
mod parser;
mod types;

/// Serde DTOs for the converter's normalized JSON document.
pub mod document;
/// 2D polygon predicates used by the geometry checks.
pub mod geom;

pub use checker::{CheckContext, Checker, CheckerBox};
pub use config::{ConfigError, LayerRule, RuleSet};
pub use document::{DrawingDocument, BYLAYER};
pub use engine::{Validator, ValidatorBuilder};
pub use model::{DrawingModel, Entity, EntityKind, Layer, TextStyle};
pub use parser::{DrawingParser, ParseError, RoomRecord, RoomTable, RoomTableParser};
pub use types::{codes, Finding, Location, Severity, ValidationResult};
