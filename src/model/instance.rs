use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::asset::{AssetId, AssetKind};

pub type InstanceId = String;

/// Page-specific repositioning of a positioned layer. `None` means "use the
/// asset default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl PlacementOverrides {
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.opacity.is_none()
    }
}

/// Override fields of an instance, one shape per asset kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Overrides {
    Image {
        #[serde(default)]
        placement: PlacementOverrides,
    },
    Text {
        /// Override text keyed by language code
        #[serde(default)]
        text: BTreeMap<String, String>,
        #[serde(default)]
        placement: PlacementOverrides,
    },
    Vector {
        #[serde(default)]
        placement: PlacementOverrides,
    },
    DynamicVector {
        #[serde(default)]
        placement: PlacementOverrides,
    },
    Value {
        #[serde(default)]
        override_value: Option<String>,
    },
}

impl Overrides {
    /// Overrides with every field unset
    pub fn cleared(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Image => Overrides::Image {
                placement: PlacementOverrides::default(),
            },
            AssetKind::Text => Overrides::Text {
                text: BTreeMap::new(),
                placement: PlacementOverrides::default(),
            },
            AssetKind::Vector => Overrides::Vector {
                placement: PlacementOverrides::default(),
            },
            AssetKind::DynamicVector => Overrides::DynamicVector {
                placement: PlacementOverrides::default(),
            },
            AssetKind::Value => Overrides::Value {
                override_value: None,
            },
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            Overrides::Image { .. } => AssetKind::Image,
            Overrides::Text { .. } => AssetKind::Text,
            Overrides::Vector { .. } => AssetKind::Vector,
            Overrides::DynamicVector { .. } => AssetKind::DynamicVector,
            Overrides::Value { .. } => AssetKind::Value,
        }
    }
}

/// A per-page association of an asset with override values. Its existence
/// marks the asset as on for that page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInstance {
    pub id: InstanceId,
    pub asset_id: AssetId,
    pub overrides: Overrides,
}

impl AssetInstance {
    /// A fresh instance using only asset defaults
    pub fn new(id: impl Into<InstanceId>, asset_id: impl Into<AssetId>, kind: AssetKind) -> Self {
        AssetInstance {
            id: id.into(),
            asset_id: asset_id.into(),
            overrides: Overrides::cleared(kind),
        }
    }

    /// Text override for a language, if set
    pub fn text_override(&self, language: &str) -> Option<&str> {
        match &self.overrides {
            Overrides::Text { text, .. } => text.get(language).map(|s| s.as_str()),
            _ => None,
        }
    }

    pub fn value_override(&self) -> Option<&str> {
        match &self.overrides {
            Overrides::Value { override_value } => override_value.as_deref(),
            _ => None,
        }
    }
}

/// A change to the override fields of one instance. Applying a patch never
/// touches the instance's `id` or `asset_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InstancePatch {
    /// Replace every override field
    ReplaceOverrides { overrides: Overrides },
    /// Set (`Some`) or clear (`None`) the text override for one language
    SetText {
        language: String,
        text: Option<String>,
    },
    /// Set or clear a value override
    SetValue { value: Option<String> },
}

impl InstancePatch {
    /// Apply the patch in place. Returns true if anything changed.
    /// Patches that do not fit the instance's override shape are ignored.
    pub fn apply(&self, instance: &mut AssetInstance) -> bool {
        match self {
            InstancePatch::ReplaceOverrides { overrides } => {
                if instance.overrides == *overrides {
                    return false;
                }
                instance.overrides = overrides.clone();
                true
            }
            InstancePatch::SetText {
                language,
                text: new_text,
            } => {
                let Overrides::Text { text, .. } = &mut instance.overrides else {
                    return false;
                };
                match new_text {
                    Some(t) => text.insert(language.clone(), t.clone()).as_ref() != Some(t),
                    None => text.remove(language).is_some(),
                }
            }
            InstancePatch::SetValue { value } => {
                let Overrides::Value { override_value } = &mut instance.overrides else {
                    return false;
                };
                if override_value == value {
                    return false;
                }
                *override_value = value.clone();
                true
            }
        }
    }
}
