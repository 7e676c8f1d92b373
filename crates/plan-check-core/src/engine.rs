//! Validation engine orchestrating checker execution.
//!
//! State flow per drawing: decode (collaborator) → model → all checkers →
//! partitioned result. Decode failures short-circuit into a fatal result with
//! a single finding; checkers themselves never abort a run.

use crate::checker::{CheckContext, Checker, CheckerBox};
use crate::config::RuleSet;
use crate::document::DrawingDocument;
use crate::model::DrawingModel;
use crate::parser::{DrawingParser, RoomTable, RoomTableParser};
use crate::types::{codes, Finding, ValidationResult};
use std::path::Path;
use tracing::{debug, info};

/// Builder for configuring a [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    rules: Option<RuleSet>,
    checkers: Vec<CheckerBox>,
}

impl ValidatorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule configuration (default: the BBL guideline).
    #[must_use]
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Adds a checker.
    #[must_use]
    pub fn checker<C: Checker + 'static>(mut self, checker: C) -> Self {
        self.checkers.push(Box::new(checker));
        self
    }

    /// Adds a boxed checker.
    #[must_use]
    pub fn checker_box(mut self, checker: CheckerBox) -> Self {
        self.checkers.push(checker);
        self
    }

    /// Adds multiple boxed checkers, preserving their order.
    #[must_use]
    pub fn checkers<I: IntoIterator<Item = CheckerBox>>(mut self, checkers: I) -> Self {
        self.checkers.extend(checkers);
        self
    }

    /// Builds the validator.
    #[must_use]
    pub fn build(self) -> Validator {
        Validator {
            rules: self.rules.unwrap_or_default(),
            checkers: self.checkers,
        }
    }
}

/// The validation engine for one rule configuration.
///
/// Use [`Validator::builder()`] to construct an instance. The engine always
/// produces a [`ValidationResult`]; no code path propagates an error to the
/// caller.
pub struct Validator {
    rules: RuleSet,
    checkers: Vec<CheckerBox>,
}

impl Validator {
    /// Creates a new builder for configuring a validator.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Returns the active rule configuration.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the number of registered checkers.
    #[must_use]
    pub fn checker_count(&self) -> usize {
        self.checkers.len()
    }

    /// Validates a drawing file without a room table.
    #[must_use]
    pub fn validate_file(&self, parser: &dyn DrawingParser, drawing: &Path) -> ValidationResult {
        let file_path = drawing.display().to_string();
        match parser.parse_drawing(drawing) {
            Ok(doc) => self.validate_document(&file_path, &doc, None),
            Err(e) => ValidationResult::fatal(
                file_path,
                Finding::error(
                    codes::PARSE_ERROR,
                    format!("DWG konnte nicht gelesen werden: {e}"),
                ),
            ),
        }
    }

    /// Validates a drawing file and cross-references the given room table.
    ///
    /// The drawing is decoded first; a failing room-table decode also
    /// short-circuits before any checker runs.
    #[must_use]
    pub fn validate_file_with_rooms(
        &self,
        parser: &dyn DrawingParser,
        drawing: &Path,
        table_parser: &dyn RoomTableParser,
        table: &Path,
    ) -> ValidationResult {
        let file_path = drawing.display().to_string();
        let doc = match parser.parse_drawing(drawing) {
            Ok(doc) => doc,
            Err(e) => {
                return ValidationResult::fatal(
                    file_path,
                    Finding::error(
                        codes::PARSE_ERROR,
                        format!("DWG konnte nicht gelesen werden: {e}"),
                    ),
                )
            }
        };
        let room_table = match table_parser.parse_room_table(table) {
            Ok(rooms) => rooms,
            Err(e) => {
                return ValidationResult::fatal(
                    file_path,
                    Finding::error(
                        codes::EXCEL_PARSE_ERROR,
                        format!("Raumtabelle konnte nicht gelesen werden: {e}"),
                    ),
                )
            }
        };
        self.validate_document(&file_path, &doc, Some(&room_table))
    }

    /// Runs all checkers over an already decoded document.
    ///
    /// Checkers run unconditionally in registration order; their findings are
    /// concatenated in that order, then partitioned by severity.
    #[must_use]
    pub fn validate_document(
        &self,
        file_path: &str,
        doc: &DrawingDocument,
        room_table: Option<&RoomTable>,
    ) -> ValidationResult {
        info!(
            "Validating {} with {} checker(s)",
            file_path,
            self.checkers.len()
        );

        let model = DrawingModel::from_document(doc);
        let ctx = CheckContext {
            rules: &self.rules,
            room_table,
        };

        let mut findings = Vec::new();
        for checker in &self.checkers {
            let checker_findings = checker.check(&model, &ctx);
            debug!("{}: {} finding(s)", checker.name(), checker_findings.len());
            findings.extend(checker_findings);
        }

        let mut result = ValidationResult::from_findings(file_path, findings);
        result
            .stats
            .insert("total_entities".to_string(), model.entities.len() as u64);
        result
            .stats
            .insert("layers_found".to_string(), model.layers.len() as u64);
        result.stats.insert(
            "room_polygons".to_string(),
            model.entity_count_on_layer(&self.rules.room_layer) as u64,
        );
        result.stats.insert(
            "aoid_texts".to_string(),
            model.entity_count_on_layer(&self.rules.annotation_layer) as u64,
        );

        info!(
            "Validation of {} complete: {} error(s), {} warning(s)",
            file_path,
            result.error_count(),
            result.warning_count()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseError;
    use crate::types::Severity;

    struct FixtureParser(DrawingDocument);

    impl DrawingParser for FixtureParser {
        fn parse_drawing(&self, _path: &Path) -> Result<DrawingDocument, ParseError> {
            Ok(self.0.clone())
        }
    }

    struct FailingParser;

    impl DrawingParser for FailingParser {
        fn parse_drawing(&self, _path: &Path) -> Result<DrawingDocument, ParseError> {
            Err(ParseError::Malformed("kaputt".to_string()))
        }
    }

    struct FailingTableParser;

    impl RoomTableParser for FailingTableParser {
        fn parse_room_table(&self, _path: &Path) -> Result<RoomTable, ParseError> {
            Err(ParseError::Malformed("kaputt".to_string()))
        }
    }

    struct NamedStub(&'static str);

    impl Checker for NamedStub {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self, _model: &DrawingModel, _ctx: &CheckContext<'_>) -> Vec<Finding> {
            vec![Finding::error(self.0, format!("Befund von {}", self.0))]
        }
    }

    #[test]
    fn builder_registers_checkers_in_order() {
        let validator = Validator::builder()
            .checker(NamedStub("first"))
            .checker_box(Box::new(NamedStub("second")))
            .build();
        assert_eq!(validator.checker_count(), 2);

        let result = validator.validate_document("plan.dwg", &DrawingDocument::default(), None);
        let codes: Vec<&str> = result.errors.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["first", "second"]);
    }

    #[test]
    fn parse_failure_short_circuits() {
        let validator = Validator::builder().checker(NamedStub("never-runs")).build();
        let result = validator.validate_file(&FailingParser, Path::new("broken.dwg"));

        assert!(!result.valid);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors[0].code, codes::PARSE_ERROR);
        assert!(result.errors[0].message.contains("kaputt"));
        assert!(result.stats.is_empty());
    }

    #[test]
    fn room_table_failure_short_circuits() {
        let validator = Validator::builder().checker(NamedStub("never-runs")).build();
        let result = validator.validate_file_with_rooms(
            &FixtureParser(DrawingDocument::default()),
            Path::new("plan.dwg"),
            &FailingTableParser,
            Path::new("rooms.xlsx"),
        );

        assert!(!result.valid);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors[0].code, codes::EXCEL_PARSE_ERROR);
        assert!(result.stats.is_empty());
    }

    #[test]
    fn drawing_failure_wins_over_room_table_failure() {
        let validator = Validator::builder().build();
        let result = validator.validate_file_with_rooms(
            &FailingParser,
            Path::new("broken.dwg"),
            &FailingTableParser,
            Path::new("rooms.xlsx"),
        );
        assert_eq!(result.errors[0].code, codes::PARSE_ERROR);
    }

    #[test]
    fn stats_count_model_contents() {
        let doc = DrawingDocument::from_json_str(
            r#"{
                "tables": {"LAYER": [
                    {"name": "0", "color": 7},
                    {"name": "R_RAUMPOLYGON", "color": 3}
                ]},
                "blocks": {"*Model_Space": {"entities": [
                    {"type": "LWPOLYLINE", "layer": "R_RAUMPOLYGON", "flag": 1,
                     "points": [{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 1, "y": 1}]},
                    {"type": "TEXT", "layer": "R_AOID", "text_value": "2011.DM.04.045"},
                    {"type": "LINE", "layer": "A_ARCHITEKTUR"}
                ]}}
            }"#,
        )
        .expect("document parses");

        let validator = Validator::builder().build();
        let result = validator.validate_document("plan.dwg", &doc, None);

        assert!(result.valid);
        assert_eq!(result.stat("total_entities"), Some(3));
        assert_eq!(result.stat("layers_found"), Some(2));
        assert_eq!(result.stat("room_polygons"), Some(1));
        assert_eq!(result.stat("aoid_texts"), Some(1));
        assert_eq!(result.stat("error_count"), Some(0));
        assert_eq!(result.stat("warning_count"), Some(0));
    }

    #[test]
    fn severity_partition_is_stable_across_runs() {
        let doc = DrawingDocument::default();
        let validator = Validator::builder().checker(NamedStub("stub")).build();
        let first = validator.validate_document("plan.dwg", &doc, None);
        let second = validator.validate_document("plan.dwg", &doc, None);
        assert_eq!(first, second);
        assert_eq!(first.errors[0].severity, Severity::Error);
    }
}
