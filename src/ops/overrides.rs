use crate::grid::intent::Intent;
use crate::model::asset::AssetKind;
use crate::model::instance::{AssetInstance, InstancePatch, Overrides};
use crate::model::project::Project;

/// Whether any override field of `instance` diverges from the asset default.
/// An override shape that does not match `kind` counts as diverging, so a
/// reset will normalize it.
pub fn has_overrides(instance: &AssetInstance, kind: AssetKind) -> bool {
    if instance.overrides.kind() != kind {
        return true;
    }
    match &instance.overrides {
        Overrides::Image { placement }
        | Overrides::Vector { placement }
        | Overrides::DynamicVector { placement } => !placement.is_empty(),
        Overrides::Text { text, placement } => {
            text.values().any(|t| !t.is_empty()) || !placement.is_empty()
        }
        Overrides::Value { override_value } => override_value.is_some(),
    }
}

/// Patch that clears every override field relevant to `kind`
pub fn reset_patch(kind: AssetKind) -> InstancePatch {
    InstancePatch::ReplaceOverrides {
        overrides: Overrides::cleared(kind),
    }
}

/// Apply a reset to a copy of `instance`
pub fn reset(instance: &AssetInstance, kind: AssetKind) -> AssetInstance {
    let mut out = instance.clone();
    reset_patch(kind).apply(&mut out);
    out
}

/// Reset intent for one cell; None when the cell is off or unknown
pub fn reset_cell(project: &Project, page_id: &str, asset_id: &str) -> Option<Intent> {
    let asset = project.asset(asset_id)?;
    let instance = project.instance_at(page_id, asset_id)?;
    Some(Intent::UpdateAssetInstance {
        page_id: page_id.to_string(),
        instance_id: instance.id.clone(),
        patch: reset_patch(asset.kind()),
    })
}

/// Reset intents for every page on which `asset_id` is on
pub fn reset_column(project: &Project, asset_id: &str) -> Vec<Intent> {
    project
        .pages
        .iter()
        .filter_map(|page| reset_cell(project, &page.id, asset_id))
        .collect()
}

/// Reset intents for every asset that is on for `page_id`
pub fn reset_row(project: &Project, page_id: &str) -> Vec<Intent> {
    let Some(page) = project.page(page_id) else {
        return Vec::new();
    };
    project
        .assets
        .keys()
        .filter(|asset_id| page.uses(asset_id))
        .filter_map(|asset_id| reset_cell(project, page_id, asset_id))
        .collect()
}

/// Show/hide intent for a cell: creates the instance when off, deletes it
/// when on. None for unknown pages or assets.
pub fn toggle_cell(project: &Project, page_id: &str, asset_id: &str) -> Option<Intent> {
    project.page(page_id)?;
    project.asset(asset_id)?;
    Some(Intent::ToggleAssetInstance {
        page_id: page_id.to_string(),
        asset_id: asset_id.to_string(),
    })
}
