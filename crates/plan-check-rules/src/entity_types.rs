//! Checker for globally forbidden entity types.

use plan_check_core::{codes, CheckContext, Checker, DrawingModel, Finding, Location};

/// Checker name for forbidden entity types.
pub const NAME: &str = "forbidden-entities";

/// Flags entities whose type is forbidden regardless of layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForbiddenEntities;

impl ForbiddenEntities {
    /// Creates a new checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Checker for ForbiddenEntities {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags globally forbidden entity types"
    }

    fn check(&self, model: &DrawingModel, ctx: &CheckContext<'_>) -> Vec<Finding> {
        model
            .entities
            .iter()
            .filter(|entity| ctx.rules.forbidden_entities.contains(&entity.entity_type))
            .map(|entity| {
                Finding::error(
                    codes::FORBIDDEN_ENTITY_TYPE,
                    format!("Verbotener Entitätstyp '{}' gefunden", entity.entity_type),
                )
                .with_entity(entity)
                .at_opt(entity.location_hint().map(Location::from))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use plan_check_core::{Entity, EntityKind, RuleSet};

    fn other(entity_type: &str, layer: &str, position: Option<DVec3>) -> Entity {
        Entity {
            handle: Some("1A7".to_string()),
            layer: layer.to_string(),
            color: 256,
            entity_type: entity_type.to_string(),
            kind: EntityKind::Other { position },
        }
    }

    fn run(entities: Vec<Entity>) -> Vec<Finding> {
        let rules = RuleSet::default();
        let model = DrawingModel {
            entities,
            ..DrawingModel::default()
        };
        let ctx = CheckContext {
            rules: &rules,
            room_table: None,
        };
        ForbiddenEntities::new().check(&model, &ctx)
    }

    #[test]
    fn spline_is_flagged_even_on_a_mandated_layer() {
        let findings = run(vec![other(
            "SPLINE",
            "A_ARCHITEKTUR",
            Some(DVec3::new(320.0, 410.0, 0.0)),
        )]);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::FORBIDDEN_ENTITY_TYPE);
        assert_eq!(findings[0].layer.as_deref(), Some("A_ARCHITEKTUR"));
        assert_eq!(findings[0].location, Some(Location::new(320.0, 410.0)));
    }

    #[test]
    fn location_is_absent_when_entity_has_none() {
        let findings = run(vec![other("OLE2FRAME", "0", None)]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].location.is_none());
    }

    #[test]
    fn permitted_types_pass() {
        let findings = run(vec![
            other("LINE", "A_ARCHITEKTUR", None),
            other("INSERT", "V_REFERENZPUNKT", None),
        ]);
        assert!(findings.is_empty());
    }
}
