use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::asset::{Asset, AssetId};
use crate::model::page::{Page, PageId};

/// Error type for visibility changes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisibilityError {
    #[error("cannot hide the last visible column")]
    LastVisibleColumn,
    #[error("cannot hide the last visible row")]
    LastVisibleRow,
}

/// Hidden row/column ids. UI state, not document content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    #[serde(default)]
    pub hidden_columns: HashSet<AssetId>,
    #[serde(default)]
    pub hidden_rows: HashSet<PageId>,
}

/// Pages not hidden, in document order
pub fn visible_pages<'a>(pages: &'a [Page], hidden_rows: &HashSet<PageId>) -> Vec<&'a Page> {
    pages
        .iter()
        .filter(|p| !hidden_rows.contains(&p.id))
        .collect()
}

/// Assets not hidden, in column order
pub fn visible_assets<'a>(
    assets: &'a IndexMap<AssetId, Asset>,
    hidden_columns: &HashSet<AssetId>,
) -> Vec<&'a Asset> {
    assets
        .values()
        .filter(|a| !hidden_columns.contains(&a.id))
        .collect()
}

impl Visibility {
    pub fn visible_pages<'a>(&self, pages: &'a [Page]) -> Vec<&'a Page> {
        visible_pages(pages, &self.hidden_rows)
    }

    pub fn visible_assets<'a>(&self, assets: &'a IndexMap<AssetId, Asset>) -> Vec<&'a Asset> {
        visible_assets(assets, &self.hidden_columns)
    }

    pub fn is_column_hidden(&self, asset_id: &str) -> bool {
        self.hidden_columns.contains(asset_id)
    }

    pub fn is_row_hidden(&self, page_id: &str) -> bool {
        self.hidden_rows.contains(page_id)
    }

    /// Hide a column. Returns Ok(false) when nothing changed (already hidden
    /// or unknown id). Refuses to hide the last visible column.
    pub fn hide_column(
        &mut self,
        asset_id: &str,
        assets: &IndexMap<AssetId, Asset>,
    ) -> Result<bool, VisibilityError> {
        if !assets.contains_key(asset_id) || self.is_column_hidden(asset_id) {
            return Ok(false);
        }
        if self.visible_assets(assets).len() <= 1 {
            return Err(VisibilityError::LastVisibleColumn);
        }
        Ok(self.hidden_columns.insert(asset_id.to_string()))
    }

    /// Hide a row. Same rules as [`Visibility::hide_column`].
    pub fn hide_row(&mut self, page_id: &str, pages: &[Page]) -> Result<bool, VisibilityError> {
        if !pages.iter().any(|p| p.id == page_id) || self.is_row_hidden(page_id) {
            return Ok(false);
        }
        if self.visible_pages(pages).len() <= 1 {
            return Err(VisibilityError::LastVisibleRow);
        }
        Ok(self.hidden_rows.insert(page_id.to_string()))
    }

    pub fn show_column(&mut self, asset_id: &str) -> bool {
        self.hidden_columns.remove(asset_id)
    }

    pub fn show_row(&mut self, page_id: &str) -> bool {
        self.hidden_rows.remove(page_id)
    }

    pub fn show_all_columns(&mut self) {
        self.hidden_columns.clear();
    }

    pub fn show_all_rows(&mut self) {
        self.hidden_rows.clear();
    }

    /// Drop hidden ids that no longer exist in the document
    pub fn prune(&mut self, pages: &[Page], assets: &IndexMap<AssetId, Asset>) {
        self.hidden_columns.retain(|id| assets.contains_key(id));
        self.hidden_rows.retain(|id| pages.iter().any(|p| &p.id == id));
    }
}
