use serde::Serialize;

use crate::model::asset::AssetId;
use crate::model::instance::{AssetInstance, InstanceId, InstancePatch};
use crate::model::page::PageId;

/// A change the engine asks the host to make. Document intents are applied
/// by the persistence layer (see `ops::document::apply_intent` for the
/// in-memory version); host intents drive the surrounding UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    // --- Document ---
    UpdateAssetInstance {
        page_id: PageId,
        instance_id: InstanceId,
        patch: InstancePatch,
    },
    /// Create the instance when the cell is off, delete it when on
    ToggleAssetInstance { page_id: PageId, asset_id: AssetId },
    /// Turn a cell on with the given overrides (paste onto an off cell)
    InsertAssetInstance {
        page_id: PageId,
        instance: AssetInstance,
    },
    /// New full column order
    ReorderAssets { asset_ids: Vec<AssetId> },
    RenamePage {
        page_id: PageId,
        title: Option<String>,
    },
    DeletePage { page_id: PageId },

    // --- Host ---
    /// Open the type-specific modal editor for a cell
    OpenEditor {
        page_id: PageId,
        asset_id: AssetId,
        instance_id: InstanceId,
    },
    /// Start routing pointer move/up events from the whole window to the engine
    BeginPointerCapture,
    /// Stop routing pointer events and clear the drag cursor style
    EndPointerCapture,
}

impl Intent {
    /// Whether this intent changes the document (as opposed to host UI)
    pub fn is_document_change(&self) -> bool {
        !matches!(
            self,
            Intent::OpenEditor { .. } | Intent::BeginPointerCapture | Intent::EndPointerCapture
        )
    }
}
