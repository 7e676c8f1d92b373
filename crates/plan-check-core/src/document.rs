//! Serde DTOs for the normalized drawing document.
//!
//! This is the wire format the external drawing converter emits (LibreDWG's
//! `dwgread -O JSON`): a layer and style table plus one modeled entity space.
//! Every optional key defaults to empty/zero so partially populated documents
//! from mocks or older converter versions still load.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Name of the block holding the modeled entity space.
pub const MODEL_SPACE: &str = "*Model_Space";

/// Sentinel color meaning "inherit the layer color".
pub const BYLAYER: i32 = 256;

/// A parsed drawing document as emitted by the converter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrawingDocument {
    /// Symbol tables (layers, text styles).
    #[serde(default)]
    pub tables: TablesRecord,
    /// Blocks by name; entities live in [`MODEL_SPACE`].
    #[serde(default)]
    pub blocks: BTreeMap<String, BlockRecord>,
}

impl DrawingDocument {
    /// Deserializes a document from converter JSON output.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error for malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the entities of the modeled space, or an empty slice when the
    /// document carries no model-space block.
    #[must_use]
    pub fn model_space_entities(&self) -> &[EntityRecord] {
        self.blocks
            .get(MODEL_SPACE)
            .map_or(&[], |block| block.entities.as_slice())
    }
}

/// Symbol tables of a drawing document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TablesRecord {
    /// Layer table.
    #[serde(default, rename = "LAYER")]
    pub layers: Vec<LayerRecord>,
    /// Text style table.
    #[serde(default, rename = "STYLE")]
    pub styles: Vec<StyleRecord>,
}

/// One layer table entry.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerRecord {
    /// Layer name; identity within the drawing.
    pub name: String,
    /// ACI color number.
    #[serde(default)]
    pub color: i32,
    /// Raw layer flags.
    #[serde(default)]
    pub flag: i32,
}

/// One text style table entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleRecord {
    /// Style name; identity within the drawing.
    pub name: String,
    /// Font file the style resolves to; may be empty.
    #[serde(default)]
    pub font_file: String,
}

/// A block record; only its entity list matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockRecord {
    /// Entities in drawing order.
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
}

/// One entity record, tagged by `type`.
///
/// The converter emits type-specific keys next to the common ones; unknown
/// entity types simply leave the typed fields at their defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityRecord {
    /// Entity type tag (`LWPOLYLINE`, `TEXT`, ...).
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Opaque handle, unique within the drawing; absent for synthetic data.
    #[serde(default)]
    pub handle: Option<String>,
    /// Layer reference by name; not required to resolve.
    #[serde(default)]
    pub layer: String,
    /// ACI color; [`BYLAYER`] when inherited.
    #[serde(default = "default_color")]
    pub color: i32,
    /// Raw entity flags; bit 0 marks a closed polyline.
    #[serde(default)]
    pub flag: u32,
    /// Constant stroke width of a polyline.
    #[serde(default)]
    pub const_width: f64,
    /// Polyline vertices.
    #[serde(default)]
    pub points: Vec<PointRecord>,
    /// Insertion point of text-like entities.
    #[serde(default)]
    pub insertion_point: Option<PointRecord>,
    /// Text height.
    #[serde(default)]
    pub height: f64,
    /// Text content.
    #[serde(default)]
    pub text_value: Option<String>,
    /// Text style reference by name.
    #[serde(default)]
    pub style: Option<String>,
}

fn default_color() -> i32 {
    BYLAYER
}

/// A 3D coordinate; missing components default to zero.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PointRecord {
    /// X coordinate.
    #[serde(default)]
    pub x: f64,
    /// Y coordinate.
    #[serde(default)]
    pub y: f64,
    /// Elevation.
    #[serde(default)]
    pub z: f64,
}

impl From<PointRecord> for glam::DVec3 {
    fn from(p: PointRecord) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}
