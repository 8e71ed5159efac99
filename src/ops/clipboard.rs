use serde::Serialize;

use crate::grid::intent::Intent;
use crate::model::asset::AssetKind;
use crate::model::instance::{AssetInstance, InstancePatch};
use crate::model::page::PageId;
use crate::model::project::Project;
use crate::ops::document::new_instance_id;

/// Error type for paste
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasteError {
    #[error("clipboard is empty")]
    Empty,
    #[error("copied cell was off; nothing to paste")]
    SourceCellOff,
    #[error("cannot paste a {found} cell onto a {expected} cell")]
    TypeMismatch {
        expected: AssetKind,
        found: AssetKind,
    },
    #[error("no such cell")]
    UnknownCell,
}

/// One copied cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipboardEntry {
    /// Snapshot of the copied instance; None when the cell was off
    pub instance: Option<AssetInstance>,
    /// Kind of the asset the cell belongs to
    pub asset_kind: AssetKind,
    pub source_page_id: PageId,
}

/// Process-local, single-slot clipboard
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entry: Option<ClipboardEntry>,
}

impl Clipboard {
    pub fn entry(&self) -> Option<&ClipboardEntry> {
        self.entry.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Snapshot the cell at (page, asset), replacing any previous content.
    /// Returns false (clipboard untouched) for unknown pages or assets.
    pub fn copy(&mut self, project: &Project, page_id: &str, asset_id: &str) -> bool {
        let (Some(page), Some(asset)) = (project.page(page_id), project.asset(asset_id)) else {
            return false;
        };
        self.entry = Some(ClipboardEntry {
            instance: page.instance_for(asset_id).cloned(),
            asset_kind: asset.kind(),
            source_page_id: page.id.clone(),
        });
        true
    }

    /// Intent that pastes the clipboard onto (page, asset). The target's
    /// identity is kept; only its override fields are replaced. An off
    /// target is turned on.
    pub fn paste(
        &self,
        project: &Project,
        page_id: &str,
        asset_id: &str,
    ) -> Result<Intent, PasteError> {
        let entry = self.entry.as_ref().ok_or(PasteError::Empty)?;
        let (Some(page), Some(asset)) = (project.page(page_id), project.asset(asset_id)) else {
            return Err(PasteError::UnknownCell);
        };
        if asset.kind() != entry.asset_kind {
            return Err(PasteError::TypeMismatch {
                expected: asset.kind(),
                found: entry.asset_kind,
            });
        }
        let source = entry.instance.as_ref().ok_or(PasteError::SourceCellOff)?;

        Ok(match page.instance_for(asset_id) {
            Some(target) => Intent::UpdateAssetInstance {
                page_id: page.id.clone(),
                instance_id: target.id.clone(),
                patch: InstancePatch::ReplaceOverrides {
                    overrides: source.overrides.clone(),
                },
            },
            None => Intent::InsertAssetInstance {
                page_id: page.id.clone(),
                instance: AssetInstance {
                    id: new_instance_id(),
                    asset_id: asset.id.clone(),
                    overrides: source.overrides.clone(),
                },
            },
        })
    }
}
