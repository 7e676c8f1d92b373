//! In-memory drawing model consumed by the checkers.
//!
//! Built once from the converter's [`DrawingDocument`](crate::document) and
//! then read-only: checkers never mutate it. The per-type field variability of
//! entities is modeled as a tagged variant so each checker gets exhaustive,
//! compile-checked handling.

use crate::document::{DrawingDocument, EntityRecord};
use glam::DVec3;

/// A layer of the drawing; identity is the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Layer name.
    pub name: String,
    /// ACI color number.
    pub color: i32,
    /// Raw layer flags.
    pub flags: i32,
}

/// A text style of the drawing; identity is the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    /// Style name.
    pub name: String,
    /// Font file the style resolves to; may be empty.
    pub font_file: String,
}

/// Type-specific payload of an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// A lightweight polyline.
    Polyline {
        /// Ordered vertices.
        vertices: Vec<DVec3>,
        /// Closed-flag (bit 0 of the entity flags).
        closed: bool,
        /// Constant stroke width.
        width: f64,
    },
    /// A single- or multi-line text.
    Text {
        /// Insertion point.
        insertion: DVec3,
        /// Text height.
        height: f64,
        /// Text content.
        value: String,
        /// Style reference by name.
        style: Option<String>,
    },
    /// Any other entity type; only its position matters to the checkers.
    Other {
        /// Insertion point, or first vertex, when the record carries one.
        position: Option<DVec3>,
    },
}

/// One entity of the modeled space.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Opaque handle, unique within the drawing; absent for synthetic data.
    pub handle: Option<String>,
    /// Layer reference by name.
    pub layer: String,
    /// ACI color; [`crate::document::BYLAYER`] when inherited.
    pub color: i32,
    /// Entity type tag as emitted by the converter.
    pub entity_type: String,
    /// Type-specific payload.
    pub kind: EntityKind,
}

impl Entity {
    /// The handle, or `"?"` for synthetic entities without one.
    #[must_use]
    pub fn handle_or_unknown(&self) -> &str {
        self.handle.as_deref().unwrap_or("?")
    }

    /// A representative location: the insertion point if present, else the
    /// first vertex.
    #[must_use]
    pub fn location_hint(&self) -> Option<DVec3> {
        match &self.kind {
            EntityKind::Polyline { vertices, .. } => vertices.first().copied(),
            EntityKind::Text { insertion, .. } => Some(*insertion),
            EntityKind::Other { position } => *position,
        }
    }

    /// The polyline payload, when this entity is a polyline.
    #[must_use]
    pub fn as_polyline(&self) -> Option<(&[DVec3], bool, f64)> {
        match &self.kind {
            EntityKind::Polyline {
                vertices,
                closed,
                width,
            } => Some((vertices.as_slice(), *closed, *width)),
            _ => None,
        }
    }

    /// The text payload, when this entity is text-like.
    #[must_use]
    pub fn as_text(&self) -> Option<(DVec3, &str, Option<&str>)> {
        match &self.kind {
            EntityKind::Text {
                insertion,
                value,
                style,
                ..
            } => Some((*insertion, value.as_str(), style.as_deref())),
            _ => None,
        }
    }
}

/// Normalized, read-only representation of one parsed drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingModel {
    /// Layer table in drawing order.
    pub layers: Vec<Layer>,
    /// Text style table in drawing order.
    pub styles: Vec<TextStyle>,
    /// Model-space entities in drawing order.
    pub entities: Vec<Entity>,
}

impl DrawingModel {
    /// Builds the model from a converter document.
    #[must_use]
    pub fn from_document(doc: &DrawingDocument) -> Self {
        let layers = doc
            .tables
            .layers
            .iter()
            .map(|l| Layer {
                name: l.name.clone(),
                color: l.color,
                flags: l.flag,
            })
            .collect();

        let styles = doc
            .tables
            .styles
            .iter()
            .map(|s| TextStyle {
                name: s.name.clone(),
                font_file: s.font_file.clone(),
            })
            .collect();

        let entities = doc
            .model_space_entities()
            .iter()
            .map(convert_entity)
            .collect();

        Self {
            layers,
            styles,
            entities,
        }
    }

    /// Looks up a layer by name.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Looks up a text style by name.
    #[must_use]
    pub fn text_style(&self, name: &str) -> Option<&TextStyle> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Counts entities referencing the given layer.
    #[must_use]
    pub fn entity_count_on_layer(&self, layer: &str) -> usize {
        self.entities.iter().filter(|e| e.layer == layer).count()
    }
}

fn convert_entity(record: &EntityRecord) -> Entity {
    let kind = match record.entity_type.as_str() {
        "LWPOLYLINE" => EntityKind::Polyline {
            vertices: record.points.iter().map(|p| DVec3::from(*p)).collect(),
            closed: record.flag & 1 != 0,
            width: record.const_width,
        },
        "TEXT" | "MTEXT" => EntityKind::Text {
            insertion: record
                .insertion_point
                .map(DVec3::from)
                .unwrap_or_default(),
            height: record.height,
            value: record.text_value.clone().unwrap_or_default(),
            style: record.style.clone(),
        },
        _ => EntityKind::Other {
            position: record
                .insertion_point
                .map(DVec3::from)
                .or_else(|| record.points.first().map(|p| DVec3::from(*p))),
        },
    };

    Entity {
        handle: record.handle.clone(),
        layer: record.layer.clone(),
        color: record.color,
        entity_type: record.entity_type.clone(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BYLAYER;

    #[test]
    fn converts_polyline_closed_flag_and_vertices() {
        let doc = DrawingDocument::from_json_str(
            r#"{
                "blocks": {"*Model_Space": {"entities": [{
                    "type": "LWPOLYLINE",
                    "handle": "1A3",
                    "layer": "R_RAUMPOLYGON",
                    "flag": 1,
                    "const_width": 0.0,
                    "points": [
                        {"x": 0.0, "y": 0.0},
                        {"x": 5000.0, "y": 0.0, "z": 0.0},
                        {"x": 5000.0, "y": 4000.0}
                    ]
                }]}}
            }"#,
        )
        .expect("document parses");
        let model = DrawingModel::from_document(&doc);

        let (vertices, closed, width) = model.entities[0]
            .as_polyline()
            .expect("entity is a polyline");
        assert!(closed);
        assert_eq!(width, 0.0);
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1], DVec3::new(5000.0, 0.0, 0.0));
        assert_eq!(model.entities[0].location_hint(), Some(DVec3::ZERO));
    }

    #[test]
    fn converts_text_and_mtext() {
        let doc = DrawingDocument::from_json_str(
            r#"{
                "blocks": {"*Model_Space": {"entities": [
                    {
                        "type": "TEXT",
                        "layer": "R_AOID",
                        "insertion_point": {"x": 2500.0, "y": 2000.0},
                        "height": 100.0,
                        "text_value": "2011.DM.04.045",
                        "style": "Standard"
                    },
                    {"type": "MTEXT", "layer": "V_TEXT", "text_value": "Hinweis"}
                ]}}
            }"#,
        )
        .expect("document parses");
        let model = DrawingModel::from_document(&doc);

        let (insertion, value, style) = model.entities[0].as_text().expect("TEXT is text-like");
        assert_eq!(insertion, DVec3::new(2500.0, 2000.0, 0.0));
        assert_eq!(value, "2011.DM.04.045");
        assert_eq!(style, Some("Standard"));
        assert_eq!(model.entities[0].color, BYLAYER);

        assert!(model.entities[1].as_text().is_some());
    }

    #[test]
    fn other_entities_keep_a_position_hint() {
        let doc = DrawingDocument::from_json_str(
            r#"{
                "blocks": {"*Model_Space": {"entities": [
                    {"type": "SPLINE", "layer": "A_ARCHITEKTUR",
                     "points": [{"x": 7.0, "y": 8.0, "z": 9.0}]},
                    {"type": "OLE2FRAME", "layer": "0"}
                ]}}
            }"#,
        )
        .expect("document parses");
        let model = DrawingModel::from_document(&doc);

        assert_eq!(
            model.entities[0].location_hint(),
            Some(DVec3::new(7.0, 8.0, 9.0))
        );
        assert_eq!(model.entities[1].location_hint(), None);
        assert_eq!(model.entities[1].handle_or_unknown(), "?");
    }

    #[test]
    fn layer_and_style_lookup() {
        let doc = DrawingDocument::from_json_str(
            r#"{
                "tables": {
                    "LAYER": [{"name": "R_AOID", "color": 30, "flag": 0}],
                    "STYLE": [{"name": "Standard", "font_file": "arial.ttf"}]
                }
            }"#,
        )
        .expect("document parses");
        let model = DrawingModel::from_document(&doc);

        assert_eq!(model.layer("R_AOID").map(|l| l.color), Some(30));
        assert!(model.layer("V_TEXT").is_none());
        assert_eq!(
            model.text_style("Standard").map(|s| s.font_file.as_str()),
            Some("arial.ttf")
        );
    }
}
