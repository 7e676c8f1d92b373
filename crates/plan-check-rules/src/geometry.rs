//! Geometry checker for polyline entities.
//!
//! Validates closure, planarity and stroke width of every polyline, plus the
//! room-specific predicates (minimum area, simple-polygon validity, pairwise
//! interior overlap) on the primary room-polygon layer.

use glam::DVec2;
use plan_check_core::geom::{Polygon2, PolygonIssue};
use plan_check_core::{codes, CheckContext, Checker, DrawingModel, Finding, Location};

/// Checker name for polyline geometry.
pub const NAME: &str = "polyline-geometry";

/// Square millimeters per square meter.
const MM2_PER_M2: f64 = 1_000_000.0;

/// Validates room-polygon geometry and general polyline well-formedness.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolylineGeometry;

impl PolylineGeometry {
    /// Creates a new checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Checker for PolylineGeometry {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Validates closure, planarity, width and room-polygon geometry"
    }

    fn check(&self, model: &DrawingModel, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut rooms: Vec<(String, Polygon2, Location)> = Vec::new();

        for entity in &model.entities {
            let Some((vertices, closed, width)) = entity.as_polyline() else {
                continue;
            };
            if vertices.is_empty() {
                continue;
            }
            let first = Location::from(vertices[0]);

            if ctx.rules.is_room_outline_layer(&entity.layer) && !closed {
                findings.push(
                    Finding::error(codes::POLYLINE_NOT_CLOSED, "Raumpolygon ist nicht geschlossen")
                        .with_entity(entity)
                        .at(first),
                );
            }

            // one finding per polyline, first offending vertex only
            if let Some(vertex) = vertices.iter().find(|v| v.z != 0.0) {
                findings.push(
                    Finding::error(
                        codes::Z_NOT_ZERO,
                        format!("Z-Koordinate ist nicht 0 (gefunden: {})", vertex.z),
                    )
                    .with_entity(entity)
                    .at(Location::from(*vertex)),
                );
            }

            if width != 0.0 {
                findings.push(
                    Finding::error(
                        codes::POLYLINE_WIDTH_NOT_ZERO,
                        format!("Polylinienbreite ist {width}, erwartet 0"),
                    )
                    .with_entity(entity)
                    .at(first),
                );
            }

            if entity.layer == ctx.rules.room_layer && vertices.len() >= 3 {
                let ring = vertices.iter().map(|v| DVec2::new(v.x, v.y));
                match Polygon2::new(ring) {
                    None => findings.push(
                        Finding::error(
                            codes::POLYGON_INVALID,
                            "Ungültiges Polygon: zu wenige eindeutige Stützpunkte",
                        )
                        .with_entity(entity)
                        .at(first),
                    ),
                    Some(polygon) => {
                        let area_m2 = polygon.area() / MM2_PER_M2;
                        if area_m2 < ctx.rules.min_room_area_m2 {
                            findings.push(
                                Finding::error(
                                    codes::ROOM_TOO_SMALL,
                                    format!(
                                        "Raumfläche {area_m2:.3} m² < {} m²",
                                        ctx.rules.min_room_area_m2
                                    ),
                                )
                                .with_entity(entity)
                                .at(first),
                            );
                        }
                        if let Some(issue) = polygon.invalidity() {
                            findings.push(
                                Finding::error(
                                    codes::POLYGON_INVALID,
                                    format!("Ungültiges Polygon: {}", describe(issue)),
                                )
                                .with_entity(entity)
                                .at(first),
                            );
                        } else {
                            rooms.push((entity.handle_or_unknown().to_string(), polygon, first));
                        }
                    }
                }
            }
        }

        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                if rooms[i].1.overlaps(&rooms[j].1) {
                    findings.push(
                        Finding::error(
                            codes::ROOMS_OVERLAP,
                            format!(
                                "Raumpolygone {} und {} überlappen sich",
                                rooms[i].0, rooms[j].0
                            ),
                        )
                        .with_handle(rooms[i].0.as_str())
                        .with_layer(ctx.rules.room_layer.as_str())
                        .at(rooms[i].2),
                    );
                }
            }
        }

        findings
    }
}

fn describe(issue: PolygonIssue) -> String {
    match issue {
        PolygonIssue::SelfIntersection { at } => {
            format!("Selbstüberschneidung bei ({:.0}, {:.0})", at.x, at.y)
        }
        PolygonIssue::ZeroArea => "Fläche ist null".to_string(),
    }
}
