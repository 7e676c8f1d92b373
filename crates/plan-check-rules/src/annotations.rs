//! Checker for AOID room-identifier annotations.
//!
//! AOIDs are text entities on the annotation layer whose value follows the
//! organizational numbering scheme. Each value must be well-formed, unique
//! within the drawing, and placed inside a room polygon; when an external
//! room table is supplied, drawing and table must agree in both directions.

use glam::DVec2;
use plan_check_core::geom::Polygon2;
use plan_check_core::{codes, CheckContext, Checker, DrawingModel, Entity, Finding, Location};

/// Checker name for AOID annotations.
pub const NAME: &str = "aoid-annotations";

/// Validates AOID format, uniqueness, placement and room-table agreement.
#[derive(Debug, Clone, Copy, Default)]
pub struct AoidAnnotations;

impl AoidAnnotations {
    /// Creates a new checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Checker for AoidAnnotations {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Validates AOID format, uniqueness, placement and room-table agreement"
    }

    fn check(&self, model: &DrawingModel, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        let rooms = room_polygons(model, &ctx.rules.room_layer);
        let texts = annotation_texts(model, &ctx.rules.annotation_layer);

        // unique conforming values in drawing order
        let mut seen: Vec<String> = Vec::new();

        for (entity, value, point) in &texts {
            let location = Location::from(*point);

            if !ctx.rules.aoid_pattern.is_match(value) {
                findings.push(
                    Finding::error(
                        codes::AOID_FORMAT_INVALID,
                        format!("AOID '{value}' entspricht nicht dem Format (z.B. 2011.DM.04.045)"),
                    )
                    .with_entity(entity)
                    .at(location),
                );
                continue;
            }

            if seen.iter().any(|s| s == value) {
                findings.push(
                    Finding::error(
                        codes::AOID_DUPLICATE,
                        format!("AOID '{value}' kommt mehrfach vor"),
                    )
                    .with_entity(entity)
                    .at(location),
                );
            } else {
                seen.push(value.clone());
            }

            if !rooms.is_empty() && !rooms.iter().any(|polygon| polygon.contains(*point)) {
                findings.push(
                    Finding::error(
                        codes::AOID_OUTSIDE_ROOM,
                        format!("AOID '{value}' liegt nicht innerhalb eines Raumpolygons"),
                    )
                    .with_entity(entity)
                    .at(location),
                );
            }
        }

        if let Some(table) = ctx.room_table {
            for aoid in &seen {
                if !table.contains(aoid) {
                    findings.push(Finding::error(
                        codes::AOID_NOT_IN_EXCEL,
                        format!("AOID '{aoid}' in DWG, aber nicht in Raumtabelle"),
                    ));
                }
            }
            for aoid in table.aoids() {
                if !seen.iter().any(|s| s == aoid) {
                    findings.push(Finding::error(
                        codes::AOID_MISSING_IN_DWG,
                        format!("AOID '{aoid}' in Raumtabelle, aber nicht in DWG"),
                    ));
                }
            }
        }

        findings
    }
}

/// Collects every constructible room polygon; validity is not required here,
/// the geometry checker reports broken rings separately.
fn room_polygons(model: &DrawingModel, room_layer: &str) -> Vec<Polygon2> {
    model
        .entities
        .iter()
        .filter(|entity| entity.layer == room_layer)
        .filter_map(Entity::as_polyline)
        .filter(|(vertices, _, _)| vertices.len() >= 3)
        .filter_map(|(vertices, _, _)| {
            Polygon2::new(vertices.iter().map(|v| DVec2::new(v.x, v.y)))
        })
        .collect()
}

fn annotation_texts<'a>(
    model: &'a DrawingModel,
    annotation_layer: &str,
) -> Vec<(&'a Entity, String, DVec2)> {
    model
        .entities
        .iter()
        .filter(|entity| entity.layer == annotation_layer)
        .filter_map(|entity| {
            entity.as_text().map(|(insertion, value, _)| {
                (
                    entity,
                    value.trim().to_string(),
                    DVec2::new(insertion.x, insertion.y),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use plan_check_core::{EntityKind, RoomRecord, RoomTable, RuleSet};

    fn aoid_text(handle: &str, value: &str, x: f64, y: f64) -> Entity {
        Entity {
            handle: Some(handle.to_string()),
            layer: "R_AOID".to_string(),
            color: 256,
            entity_type: "TEXT".to_string(),
            kind: EntityKind::Text {
                insertion: DVec3::new(x, y, 0.0),
                height: 100.0,
                value: value.to_string(),
                style: Some("Standard".to_string()),
            },
        }
    }

    fn room_rect(handle: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Entity {
        Entity {
            handle: Some(handle.to_string()),
            layer: "R_RAUMPOLYGON".to_string(),
            color: 256,
            entity_type: "LWPOLYLINE".to_string(),
            kind: EntityKind::Polyline {
                vertices: vec![
                    DVec3::new(x0, y0, 0.0),
                    DVec3::new(x1, y0, 0.0),
                    DVec3::new(x1, y1, 0.0),
                    DVec3::new(x0, y1, 0.0),
                ],
                closed: true,
                width: 0.0,
            },
        }
    }

    fn run(entities: Vec<Entity>, table: Option<&RoomTable>) -> Vec<Finding> {
        let rules = RuleSet::default();
        let model = DrawingModel {
            entities,
            ..DrawingModel::default()
        };
        let ctx = CheckContext {
            rules: &rules,
            room_table: table,
        };
        AoidAnnotations::new().check(&model, &ctx)
    }

    #[test]
    fn conforming_annotation_inside_room_passes() {
        let findings = run(
            vec![
                room_rect("1A3", 0.0, 0.0, 5000.0, 4000.0),
                aoid_text("1A5", "2011.DM.04.045", 2500.0, 2000.0),
            ],
            None,
        );
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    #[test]
    fn malformed_value_skips_further_checks() {
        // no containment finding despite lying outside every room
        let findings = run(
            vec![
                room_rect("1A3", 0.0, 0.0, 5000.0, 4000.0),
                aoid_text("1A6", "INVALID-AOID", 90000.0, 90000.0),
            ],
            None,
        );

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::AOID_FORMAT_INVALID);
    }

    #[test]
    fn malformed_value_is_not_added_to_the_seen_set() {
        let table: RoomTable = std::iter::empty::<RoomRecord>().collect();
        let findings = run(
            vec![aoid_text("1A6", "INVALID-AOID", 100.0, 100.0)],
            Some(&table),
        );
        // only the format finding; no AOID_NOT_IN_EXCEL for a skipped value
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::AOID_FORMAT_INVALID);
    }

    #[test]
    fn duplicate_reports_second_occurrence_only() {
        let findings = run(
            vec![
                room_rect("1A3", 0.0, 0.0, 5000.0, 4000.0),
                aoid_text("1A5", "2011.DM.04.045", 1000.0, 1000.0),
                aoid_text("1A6", "2011.DM.04.045", 2000.0, 2000.0),
            ],
            None,
        );

        let duplicates: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.code == codes::AOID_DUPLICATE)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].entity_handle.as_deref(), Some("1A6"));
    }

    #[test]
    fn value_surrounded_by_whitespace_is_trimmed() {
        let findings = run(
            vec![
                room_rect("1A3", 0.0, 0.0, 5000.0, 4000.0),
                aoid_text("1A5", "  2011.DM.04.045  ", 2500.0, 2000.0),
            ],
            None,
        );
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    #[test]
    fn annotation_outside_all_rooms_is_flagged() {
        let findings = run(
            vec![
                room_rect("1A3", 0.0, 0.0, 5000.0, 4000.0),
                aoid_text("1A5", "2011.DM.04.045", 8000.0, 1500.0),
            ],
            None,
        );

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::AOID_OUTSIDE_ROOM);
        assert_eq!(findings[0].location, Some(Location::new(8000.0, 1500.0)));
    }

    #[test]
    fn containment_is_not_checked_without_room_polygons() {
        let findings = run(vec![aoid_text("1A5", "2011.DM.04.045", 8000.0, 1500.0)], None);
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    #[test]
    fn reconciliation_reports_both_directions() {
        let table: RoomTable = [
            RoomRecord {
                aoid: "2011.DM.04.045".to_string(),
                name: Some("Büro".to_string()),
                area: Some(18.3),
            },
            RoomRecord {
                aoid: "2011.DM.04.099".to_string(),
                name: None,
                area: None,
            },
        ]
        .into_iter()
        .collect();

        let findings = run(
            vec![
                room_rect("1A3", 0.0, 0.0, 5000.0, 4000.0),
                aoid_text("1A5", "2011.DM.04.045", 2500.0, 2000.0),
                aoid_text("1A6", "2011.DM.04.001", 1000.0, 1000.0),
            ],
            Some(&table),
        );

        let codes_seen: Vec<&str> = findings.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(
            codes_seen,
            vec![codes::AOID_NOT_IN_EXCEL, codes::AOID_MISSING_IN_DWG]
        );
        assert!(findings[0].message.contains("2011.DM.04.001"));
        assert!(findings[1].message.contains("2011.DM.04.099"));
        // reconciliation findings carry no coordinates
        assert!(findings[0].location.is_none());
        assert!(findings[1].location.is_none());
    }

    #[test]
    fn matching_table_yields_no_reconciliation_findings() {
        let table: RoomTable = [RoomRecord {
            aoid: "2011.DM.04.045".to_string(),
            name: None,
            area: None,
        }]
        .into_iter()
        .collect();

        let findings = run(
            vec![
                room_rect("1A3", 0.0, 0.0, 5000.0, 4000.0),
                aoid_text("1A5", "2011.DM.04.045", 2500.0, 2000.0),
            ],
            Some(&table),
        );
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }
}
