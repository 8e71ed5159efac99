use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::asset::AssetId;
use super::instance::{AssetInstance, InstanceId};

pub type PageId = String;

/// One row of the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Instances on this page, keyed by instance id. Order carries no meaning.
    #[serde(default)]
    pub instances: IndexMap<InstanceId, AssetInstance>,
}

impl Page {
    pub fn new(id: impl Into<PageId>) -> Self {
        Page {
            id: id.into(),
            title: None,
            instances: IndexMap::new(),
        }
    }

    /// The instance of `asset_id` on this page, if the asset is on
    pub fn instance_for(&self, asset_id: &str) -> Option<&AssetInstance> {
        self.instances.values().find(|i| i.asset_id == asset_id)
    }

    pub fn instance_for_mut(&mut self, asset_id: &str) -> Option<&mut AssetInstance> {
        self.instances.values_mut().find(|i| i.asset_id == asset_id)
    }

    /// Display label: the title, or the id when untitled
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    pub fn uses(&self, asset_id: &AssetId) -> bool {
        self.instance_for(asset_id).is_some()
    }
}
