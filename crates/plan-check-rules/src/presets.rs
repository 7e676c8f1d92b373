//! Default checker sets and ready-made validators.

use crate::{AoidAnnotations, ForbiddenEntities, PolylineGeometry, RequiredLayers, TextStyles};
use plan_check_core::{CheckerBox, RuleSet, Validator};

/// Returns all built-in checkers in engine order.
///
/// The order is the reported finding order: layers, entity types, geometry,
/// annotations, text styles.
#[must_use]
pub fn default_checkers() -> Vec<CheckerBox> {
    vec![
        Box::new(RequiredLayers::new()),
        Box::new(ForbiddenEntities::new()),
        Box::new(PolylineGeometry::new()),
        Box::new(AoidAnnotations::new()),
        Box::new(TextStyles::new()),
    ]
}

/// Builds a validator with the BBL guideline rules and all built-in checkers.
#[must_use]
pub fn default_validator() -> Validator {
    validator_with_rules(RuleSet::default())
}

/// Builds a validator with a custom rule set and all built-in checkers.
#[must_use]
pub fn validator_with_rules(rules: RuleSet) -> Validator {
    Validator::builder()
        .rules(rules)
        .checkers(default_checkers())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validator_registers_all_checkers() {
        assert_eq!(default_checkers().len(), 5);
        assert_eq!(default_validator().checker_count(), 5);
    }

    #[test]
    fn checker_order_matches_the_engine_contract() {
        let names: Vec<&str> = default_checkers().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "required-layers",
                "forbidden-entities",
                "polyline-geometry",
                "aoid-annotations",
                "text-styles",
            ]
        );
    }
}
