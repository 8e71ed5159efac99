use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type AssetId = String;

/// The kind of layer an asset renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Image,
    Text,
    Vector,
    DynamicVector,
    Value,
}

impl AssetKind {
    /// Whether Enter on a cell of this kind opens a modal editor.
    /// Text cells are edited inline instead.
    pub fn opens_modal(self) -> bool {
        !matches!(self, AssetKind::Text)
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Image => write!(f, "image"),
            AssetKind::Text => write!(f, "text"),
            AssetKind::Vector => write!(f, "vector"),
            AssetKind::DynamicVector => write!(f, "dynamic vector"),
            AssetKind::Value => write!(f, "value"),
        }
    }
}

/// Default position, size and opacity of a positioned layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for Placement {
    fn default() -> Self {
        Placement {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            opacity: 1.0,
        }
    }
}

/// Default property values of an asset, one shape per asset kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssetDefaults {
    Image {
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        placement: Placement,
    },
    Text {
        /// Default text keyed by language code
        #[serde(default)]
        text: BTreeMap<String, String>,
        #[serde(default)]
        placement: Placement,
    },
    Vector {
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        placement: Placement,
    },
    DynamicVector {
        #[serde(default)]
        template: String,
        #[serde(default)]
        placement: Placement,
    },
    Value {
        #[serde(default)]
        value: String,
    },
}

impl AssetDefaults {
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetDefaults::Image { .. } => AssetKind::Image,
            AssetDefaults::Text { .. } => AssetKind::Text,
            AssetDefaults::Vector { .. } => AssetKind::Vector,
            AssetDefaults::DynamicVector { .. } => AssetKind::DynamicVector,
            AssetDefaults::Value { .. } => AssetKind::Value,
        }
    }

    /// Empty defaults for a kind
    pub fn empty(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Image => AssetDefaults::Image {
                path: None,
                placement: Placement::default(),
            },
            AssetKind::Text => AssetDefaults::Text {
                text: BTreeMap::new(),
                placement: Placement::default(),
            },
            AssetKind::Vector => AssetDefaults::Vector {
                path: None,
                placement: Placement::default(),
            },
            AssetKind::DynamicVector => AssetDefaults::DynamicVector {
                template: String::new(),
                placement: Placement::default(),
            },
            AssetKind::Value => AssetDefaults::Value {
                value: String::new(),
            },
        }
    }
}

/// A reusable layer definition; one column of the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub defaults: AssetDefaults,
}

impl Asset {
    pub fn new(id: impl Into<AssetId>, name: impl Into<String>, kind: AssetKind) -> Self {
        Asset {
            id: id.into(),
            name: name.into(),
            defaults: AssetDefaults::empty(kind),
        }
    }

    pub fn kind(&self) -> AssetKind {
        self.defaults.kind()
    }

    /// Default text for a language (Text assets only)
    pub fn default_text(&self, language: &str) -> Option<&str> {
        match &self.defaults {
            AssetDefaults::Text { text, .. } => text.get(language).map(|s| s.as_str()),
            _ => None,
        }
    }

    /// Default value (Value assets only)
    pub fn default_value(&self) -> Option<&str> {
        match &self.defaults {
            AssetDefaults::Value { value } => Some(value),
            _ => None,
        }
    }
}
