//! Checker trait for guideline rules.

use crate::config::RuleSet;
use crate::model::DrawingModel;
use crate::parser::RoomTable;
use crate::types::Finding;

/// Context handed to every checker invocation.
///
/// Carries the immutable rule tables and, when the caller supplied one, the
/// external room table.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// The active rule configuration.
    pub rules: &'a RuleSet,
    /// External room table for cross-referencing, when available.
    pub room_table: Option<&'a RoomTable>,
}

/// A guideline checker over the drawing model.
///
/// Checkers are pure functions of the read-only model and context: no I/O,
/// no shared state, and no failure mode beyond emitting findings. Data-shape
/// problems (missing handles, empty vertex lists) degrade to defaults, never
/// to panics.
///
/// # Example
///
/// ```
/// use plan_check_core::{CheckContext, Checker, DrawingModel, Finding};
///
/// struct NoEntities;
///
/// impl Checker for NoEntities {
///     fn name(&self) -> &'static str {
///         "no-entities"
///     }
///
///     fn check(&self, model: &DrawingModel, _ctx: &CheckContext<'_>) -> Vec<Finding> {
///         if model.entities.is_empty() {
///             vec![Finding::error("EMPTY_DRAWING", "Zeichnung enthält keine Entitäten")]
///         } else {
///             Vec::new()
///         }
///     }
/// }
/// ```
pub trait Checker: Send + Sync {
    /// Returns the kebab-case name of this checker (e.g. `required-layers`).
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this checker validates.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks the drawing model and returns any findings.
    fn check(&self, model: &DrawingModel, ctx: &CheckContext<'_>) -> Vec<Finding>;
}

/// Type alias for boxed checker trait objects.
pub type CheckerBox = Box<dyn Checker>;
