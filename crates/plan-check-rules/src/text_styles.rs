//! Checker for text styling conventions.

use plan_check_core::{codes, CheckContext, Checker, DrawingModel, Finding, Location, BYLAYER};

/// Checker name for text styling.
pub const NAME: &str = "text-styles";

/// Style name assumed when a text entity carries no style reference.
const DEFAULT_STYLE: &str = "Standard";

/// Validates text layers, font family and color mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextStyles;

impl TextStyles {
    /// Creates a new checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Checker for TextStyles {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Validates text layers, font family and color mode"
    }

    fn check(&self, model: &DrawingModel, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        let allowed_layers = ctx
            .rules
            .text_layers
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let required_font = ctx.rules.required_font.to_lowercase();

        for entity in &model.entities {
            let Some((insertion, _, style)) = entity.as_text() else {
                continue;
            };
            let location = Location::new(insertion.x, insertion.y);

            if !ctx.rules.text_layers.contains(&entity.layer) {
                findings.push(
                    Finding::error(
                        codes::TEXT_WRONG_LAYER,
                        format!(
                            "Text auf Layer '{}' - nur erlaubt auf {{{allowed_layers}}}",
                            entity.layer
                        ),
                    )
                    .with_entity(entity)
                    .at(location),
                );
            }

            let style_name = style.unwrap_or(DEFAULT_STYLE);
            if let Some(text_style) = model.text_style(style_name) {
                let font = text_style.font_file.to_lowercase();
                if !font.is_empty() && !font.contains(&required_font) {
                    findings.push(
                        Finding::error(
                            codes::TEXT_WRONG_FONT,
                            format!(
                                "Text verwendet Schriftart '{font}', nur {} erlaubt",
                                ctx.rules.required_font
                            ),
                        )
                        .with_entity(entity)
                        .at(location),
                    );
                }
            }

            if entity.color != BYLAYER {
                findings.push(
                    Finding::warning(
                        codes::COLOR_NOT_BYLAYER,
                        format!(
                            "Text hat explizite Farbe {}, sollte BYLAYER sein",
                            entity.color
                        ),
                    )
                    .with_entity(entity)
                    .at(location),
                );
            }
        }

        findings
    }
}
