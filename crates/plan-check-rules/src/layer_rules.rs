//! Checker for the mandated layer set.
//!
//! The guideline names every layer a plan must carry together with its ACI
//! color. Anything beyond that set, except the system layers, is flagged as
//! unauthorized.

use plan_check_core::{codes, CheckContext, Checker, DrawingModel, Finding};

/// Checker name for the mandated layer set.
pub const NAME: &str = "required-layers";

/// Verifies the required-layer/color contract and flags unauthorized layers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredLayers;

impl RequiredLayers {
    /// Creates a new checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Checker for RequiredLayers {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Verifies presence and colors of the mandated layers"
    }

    fn check(&self, model: &DrawingModel, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for rule in &ctx.rules.required_layers {
            match model.layer(&rule.name) {
                None => findings.push(
                    Finding::error(
                        codes::LAYER_MISSING,
                        format!("Erforderlicher Layer '{}' fehlt", rule.name),
                    )
                    .with_layer(rule.name.as_str()),
                ),
                Some(layer) if layer.color != rule.color => findings.push(
                    Finding::error(
                        codes::LAYER_COLOR_WRONG,
                        format!(
                            "Layer '{}' hat Farbe {}, erwartet {}",
                            rule.name, layer.color, rule.color
                        ),
                    )
                    .with_layer(rule.name.as_str()),
                ),
                Some(_) => {}
            }
        }

        for layer in &model.layers {
            if !ctx.rules.is_required_layer(&layer.name)
                && !ctx.rules.system_layers.contains(&layer.name)
            {
                findings.push(
                    Finding::warning(
                        codes::LAYER_UNAUTHORIZED,
                        format!("Nicht autorisierter Layer '{}' gefunden", layer.name),
                    )
                    .with_layer(layer.name.as_str()),
                );
            }
        }

        findings
    }
}
