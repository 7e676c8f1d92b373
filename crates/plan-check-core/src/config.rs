//! Rule-set configuration for the BBL CAD-Richtlinie.
//!
//! The tables are process-wide, read-only values: construct a [`RuleSet`]
//! once at startup (the default is the published guideline) and pass it by
//! reference into the engine and checkers. A TOML file can override any
//! table, which goes through a serde DTO and is validated into the domain
//! model here.

use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// One mandated layer with its required color and permitted entity types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayerRule {
    /// Layer name.
    pub name: String,
    /// Required ACI color.
    pub color: i32,
    /// Entity types permitted on this layer.
    #[serde(default)]
    pub allowed_entities: BTreeSet<String>,
}

impl LayerRule {
    fn new(name: &str, color: i32, allowed: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            color,
            allowed_entities: allowed.iter().map(ToString::to_string).collect(),
        }
    }
}

/// The complete, immutable rule configuration.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Mandated layers, in guideline order.
    pub required_layers: Vec<LayerRule>,
    /// Layers allowed without being mandated (default/no-plot layers).
    pub system_layers: BTreeSet<String>,
    /// Entity types forbidden on every layer.
    pub forbidden_entities: BTreeSet<String>,
    /// Layers permitted to carry text entities.
    pub text_layers: BTreeSet<String>,
    /// Compiled AOID format pattern.
    pub aoid_pattern: Regex,
    /// Minimum room area in square meters.
    pub min_room_area_m2: f64,
    /// Mandated font family, matched case-insensitively against font files.
    pub required_font: String,
    /// Primary room-polygon layer (area, validity, overlap, containment).
    pub room_layer: String,
    /// Layers whose polylines must be closed.
    pub room_outline_layers: Vec<String>,
    /// Layer carrying AOID annotations.
    pub annotation_layer: String,
}

impl Default for RuleSet {
    /// The BBL CAD-Richtlinie tables.
    fn default() -> Self {
        let architecture = &["LWPOLYLINE", "LINE", "ARC", "CIRCLE", "INSERT"];
        #[allow(clippy::expect_used)] // the default pattern is a compile-time constant
        let aoid_pattern =
            Regex::new(DEFAULT_AOID_PATTERN).expect("default AOID pattern compiles");
        Self {
            required_layers: vec![
                LayerRule::new(
                    "A_ARCHITEKTUR",
                    253,
                    &["LWPOLYLINE", "LINE", "ARC", "CIRCLE", "INSERT", "HATCH"],
                ),
                LayerRule::new("A_ELEKTRO", 253, architecture),
                LayerRule::new("A_HEIZUNG-KUEHLUNG", 253, architecture),
                LayerRule::new("A_LUEFTUNG", 253, architecture),
                LayerRule::new("A_SANITAER", 253, architecture),
                LayerRule::new("A_SCHRAFFUR", 253, &["HATCH"]),
                LayerRule::new("V_ACHSEN", 8, &["LINE", "TEXT", "DIMENSION"]),
                LayerRule::new("V_BEMASSUNG", 40, &["DIMENSION", "TEXT"]),
                LayerRule::new("V_PLANLAYOUT", 7, &["LINE", "LWPOLYLINE", "TEXT", "MTEXT"]),
                LayerRule::new("V_REFERENZPUNKT", 1, &["POINT", "INSERT"]),
                LayerRule::new("V_TEXT", 7, &["TEXT", "MTEXT"]),
                LayerRule::new("R_AOID", 30, &["TEXT", "MTEXT"]),
                LayerRule::new("R_RAUMPOLYGON", 3, &["LWPOLYLINE"]),
                LayerRule::new("R_RAUMPOLYGON-ABZUG", 1, &["LWPOLYLINE"]),
                LayerRule::new("R_GESCHOSSPOLYGON", 4, &["LWPOLYLINE"]),
            ],
            system_layers: to_set(&["0", "Defpoints"]),
            forbidden_entities: to_set(&["SPLINE", "ELLIPSE", "MULTILINE", "OLE2FRAME", "OLEFRAME"]),
            text_layers: to_set(&["V_PLANLAYOUT", "V_ACHSEN", "V_TEXT", "R_AOID"]),
            aoid_pattern,
            min_room_area_m2: 0.25,
            required_font: "Arial".to_string(),
            room_layer: "R_RAUMPOLYGON".to_string(),
            room_outline_layers: vec![
                "R_RAUMPOLYGON".to_string(),
                "R_RAUMPOLYGON-ABZUG".to_string(),
                "R_GESCHOSSPOLYGON".to_string(),
            ],
            annotation_layer: "R_AOID".to_string(),
        }
    }
}

const DEFAULT_AOID_PATTERN: &str = r"^\d{4}\.[A-Z]{2}\.\d{2}\.\d{3}$";

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(ToString::to_string).collect()
}

impl RuleSet {
    /// Whether a layer name is mandated by the guideline.
    #[must_use]
    pub fn is_required_layer(&self, name: &str) -> bool {
        self.required_layers.iter().any(|rule| rule.name == name)
    }

    /// Whether a layer's polylines must be closed.
    #[must_use]
    pub fn is_room_outline_layer(&self, name: &str) -> bool {
        self.room_outline_layers.iter().any(|l| l == name)
    }

    /// Loads a rule set from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or its content is not a
    /// valid rule set.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses a rule set from a TOML string.
    ///
    /// Omitted tables keep their guideline defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML or an uncompilable AOID pattern.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: RuleSetFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Self::try_from(file)
    }
}

impl TryFrom<RuleSetFile> for RuleSet {
    type Error = ConfigError;

    fn try_from(file: RuleSetFile) -> Result<Self, Self::Error> {
        let defaults = Self::default();
        let aoid_pattern = match file.aoid_pattern {
            Some(pattern) => Regex::new(&pattern).map_err(|e| ConfigError::Pattern {
                pattern,
                message: e.to_string(),
            })?,
            None => defaults.aoid_pattern,
        };
        Ok(Self {
            required_layers: file.required_layers.unwrap_or(defaults.required_layers),
            system_layers: file.system_layers.unwrap_or(defaults.system_layers),
            forbidden_entities: file
                .forbidden_entities
                .unwrap_or(defaults.forbidden_entities),
            text_layers: file.text_layers.unwrap_or(defaults.text_layers),
            aoid_pattern,
            min_room_area_m2: file.min_room_area_m2.unwrap_or(defaults.min_room_area_m2),
            required_font: file.required_font.unwrap_or(defaults.required_font),
            room_layer: file.room_layer.unwrap_or(defaults.room_layer),
            room_outline_layers: file
                .room_outline_layers
                .unwrap_or(defaults.room_outline_layers),
            annotation_layer: file.annotation_layer.unwrap_or(defaults.annotation_layer),
        })
    }
}

/// Serde DTO for the rule-set TOML file; every table is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct RuleSetFile {
    #[serde(default)]
    required_layers: Option<Vec<LayerRule>>,
    #[serde(default)]
    system_layers: Option<BTreeSet<String>>,
    #[serde(default)]
    forbidden_entities: Option<BTreeSet<String>>,
    #[serde(default)]
    text_layers: Option<BTreeSet<String>>,
    #[serde(default)]
    aoid_pattern: Option<String>,
    #[serde(default)]
    min_room_area_m2: Option<f64>,
    #[serde(default)]
    required_font: Option<String>,
    #[serde(default)]
    room_layer: Option<String>,
    #[serde(default)]
    room_outline_layers: Option<Vec<String>>,
    #[serde(default)]
    annotation_layer: Option<String>,
}

/// Rule-set loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the rule-set file.
    #[error("Failed to read rule set {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Invalid TOML content.
    #[error("Failed to parse rule set: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// The AOID pattern does not compile.
    #[error("Invalid AOID pattern '{pattern}': {message}")]
    Pattern {
        /// Offending pattern.
        pattern: String,
        /// Regex error message.
        message: String,
    },
}
