//! In-memory application of document intents. Stale ids are tolerated:
//! an intent that references a missing page, asset or instance is a no-op.

use indexmap::IndexMap;
use tracing::debug;

use crate::grid::intent::Intent;
use crate::model::instance::AssetInstance;
use crate::model::project::Project;

/// Fresh instance id
pub fn new_instance_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Apply one intent to the project. Returns true if the document changed.
/// Host intents (editor, pointer capture) never change the document.
pub fn apply_intent(project: &mut Project, intent: &Intent) -> bool {
    let changed = match intent {
        Intent::UpdateAssetInstance {
            page_id,
            instance_id,
            patch,
        } => project
            .page_mut(page_id)
            .and_then(|p| p.instances.get_mut(instance_id))
            .is_some_and(|inst| patch.apply(inst)),
        Intent::ToggleAssetInstance { page_id, asset_id } => {
            toggle_instance(project, page_id, asset_id)
        }
        Intent::InsertAssetInstance { page_id, instance } => {
            insert_instance(project, page_id, instance)
        }
        Intent::ReorderAssets { asset_ids } => reorder_assets(project, asset_ids),
        Intent::RenamePage { page_id, title } => match project.page_mut(page_id) {
            Some(page) if page.title != *title => {
                page.title = title.clone();
                true
            }
            _ => false,
        },
        Intent::DeletePage { page_id } => {
            let before = project.pages.len();
            project.pages.retain(|p| &p.id != page_id);
            project.pages.len() != before
        }
        Intent::OpenEditor { .. } | Intent::BeginPointerCapture | Intent::EndPointerCapture => {
            false
        }
    };
    debug!(?intent, changed, "applied intent");
    changed
}

fn toggle_instance(project: &mut Project, page_id: &str, asset_id: &str) -> bool {
    let Some(kind) = project.asset(asset_id).map(|a| a.kind()) else {
        return false;
    };
    let Some(page) = project.page_mut(page_id) else {
        return false;
    };
    match page.instance_for(asset_id).map(|i| i.id.clone()) {
        Some(existing) => page.instances.shift_remove(&existing).is_some(),
        None => {
            let instance = AssetInstance::new(new_instance_id(), asset_id, kind);
            page.instances.insert(instance.id.clone(), instance);
            true
        }
    }
}

/// Insert an instance, keeping one instance per (page, asset): if the asset
/// is already on for the page, its overrides are replaced instead.
fn insert_instance(project: &mut Project, page_id: &str, instance: &AssetInstance) -> bool {
    if project.asset(&instance.asset_id).is_none() {
        return false;
    }
    let Some(page) = project.page_mut(page_id) else {
        return false;
    };
    if let Some(existing) = page.instance_for_mut(&instance.asset_id) {
        if existing.overrides == instance.overrides {
            return false;
        }
        existing.overrides = instance.overrides.clone();
        return true;
    }
    page.instances
        .insert(instance.id.clone(), instance.clone());
    true
}

/// Rebuild the asset map in the requested order. Unknown ids are skipped;
/// assets missing from the request keep their relative order at the end.
fn reorder_assets(project: &mut Project, asset_ids: &[String]) -> bool {
    let mut old = std::mem::take(&mut project.assets);
    let before: Vec<String> = old.keys().cloned().collect();

    let mut reordered = IndexMap::with_capacity(old.len());
    for id in asset_ids {
        if let Some(asset) = old.shift_remove(id) {
            reordered.insert(id.clone(), asset);
        }
    }
    reordered.extend(old);
    project.assets = reordered;

    project.assets.keys().ne(before.iter())
}
