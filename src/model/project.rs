use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetId};
use super::instance::AssetInstance;
use super::page::Page;

/// The document tree the grid edits: pages are rows (in order), assets are
/// columns (in map order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub assets: IndexMap<AssetId, Asset>,
}

impl Project {
    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    pub fn asset(&self, asset_id: &str) -> Option<&Asset> {
        self.assets.get(asset_id)
    }

    /// The instance at a grid cell, if the asset is on for that page
    pub fn instance_at(&self, page_id: &str, asset_id: &str) -> Option<&AssetInstance> {
        self.page(page_id)?.instance_for(asset_id)
    }

    pub fn asset_ids(&self) -> Vec<AssetId> {
        self.assets.keys().cloned().collect()
    }
}
