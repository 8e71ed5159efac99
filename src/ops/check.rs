use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::asset::AssetKind;
use crate::model::page::Page;
use crate::model::project::Project;

/// Structured result from `pg check`, suitable for --json output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
    pub warnings: Vec<CheckWarning>,
}

/// A validation error (something that should be fixed).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// An instance references an asset that doesn't exist
    #[serde(rename = "dangling_asset")]
    DanglingAsset {
        page_id: String,
        instance_id: String,
        asset_id: String,
    },
    /// More than one instance of the same asset on one page
    #[serde(rename = "duplicate_cell")]
    DuplicateCell {
        page_id: String,
        asset_id: String,
        instance_ids: Vec<String>,
    },
    /// Override shape doesn't match the asset's kind
    #[serde(rename = "kind_mismatch")]
    KindMismatch {
        page_id: String,
        instance_id: String,
        expected: AssetKind,
        found: AssetKind,
    },
    /// Two pages share an id
    #[serde(rename = "duplicate_page_id")]
    DuplicatePageId { page_id: String },
    /// The same instance id appears on more than one page
    #[serde(rename = "shared_instance")]
    SharedInstance {
        instance_id: String,
        page_ids: Vec<String>,
    },
}

/// A validation warning (non-critical issue).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CheckWarning {
    /// Asset is off on every page
    #[serde(rename = "unused_asset")]
    UnusedAsset { asset_id: String },
    /// Instance map key differs from the instance's own id
    #[serde(rename = "mismatched_key")]
    MismatchedKey { page_id: String, key: String, instance_id: String },
}

// ---------------------------------------------------------------------------
// Main check entry point
// ---------------------------------------------------------------------------

/// Validate a project and return structured results.
///
/// Checks performed:
/// 1. Every instance references an existing asset
/// 2. At most one instance per (page, asset)
/// 3. Override shapes match their asset kinds
/// 4. Page ids are unique; no instance lives on two pages
/// 5. Warnings for unused assets and mismatched instance keys
pub fn check_project(project: &Project) -> CheckResult {
    let mut result = CheckResult::default();

    let mut seen_pages = HashSet::new();
    for page in &project.pages {
        if !seen_pages.insert(page.id.as_str()) {
            result.errors.push(CheckError::DuplicatePageId {
                page_id: page.id.clone(),
            });
        }
        check_page(project, page, &mut result);
    }

    for (instance_id, page_ids) in find_shared_instances(project) {
        result
            .errors
            .push(CheckError::SharedInstance { instance_id, page_ids });
    }

    for asset_id in project.assets.keys() {
        if !project.pages.iter().any(|p| p.uses(asset_id)) {
            result.warnings.push(CheckWarning::UnusedAsset {
                asset_id: asset_id.clone(),
            });
        }
    }

    result.valid = result.errors.is_empty();
    result
}

// ---------------------------------------------------------------------------
// Per-page validation
// ---------------------------------------------------------------------------

fn check_page(project: &Project, page: &Page, result: &mut CheckResult) {
    let mut by_asset: HashMap<&str, Vec<String>> = HashMap::new();

    for (key, instance) in &page.instances {
        if key != &instance.id {
            result.warnings.push(CheckWarning::MismatchedKey {
                page_id: page.id.clone(),
                key: key.clone(),
                instance_id: instance.id.clone(),
            });
        }

        let Some(asset) = project.asset(&instance.asset_id) else {
            result.errors.push(CheckError::DanglingAsset {
                page_id: page.id.clone(),
                instance_id: instance.id.clone(),
                asset_id: instance.asset_id.clone(),
            });
            continue;
        };

        if instance.overrides.kind() != asset.kind() {
            result.errors.push(CheckError::KindMismatch {
                page_id: page.id.clone(),
                instance_id: instance.id.clone(),
                expected: asset.kind(),
                found: instance.overrides.kind(),
            });
        }

        by_asset
            .entry(instance.asset_id.as_str())
            .or_default()
            .push(instance.id.clone());
    }

    let mut duplicates: Vec<(&str, Vec<String>)> = by_asset
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .collect();
    duplicates.sort_by(|a, b| a.0.cmp(b.0));
    for (asset_id, instance_ids) in duplicates {
        result.errors.push(CheckError::DuplicateCell {
            page_id: page.id.clone(),
            asset_id: asset_id.to_string(),
            instance_ids,
        });
    }
}

fn find_shared_instances(project: &Project) -> Vec<(String, Vec<String>)> {
    let mut locations: HashMap<&str, Vec<String>> = HashMap::new();
    for page in &project.pages {
        for instance in page.instances.values() {
            locations
                .entry(instance.id.as_str())
                .or_default()
                .push(page.id.clone());
        }
    }
    let mut shared: Vec<(String, Vec<String>)> = locations
        .into_iter()
        .filter(|(_, pages)| pages.len() > 1)
        .map(|(id, pages)| (id.to_string(), pages))
        .collect();
    shared.sort();
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::instance::{AssetInstance, Overrides};
    use crate::ops::test_fixtures::sample_project;

    #[test]
    fn test_check_clean_project() {
        let project = sample_project();
        let result = check_project(&project);
        assert!(result.valid, "unexpected errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_check_dangling_asset() {
        let mut project = sample_project();
        let page = project.page_mut("p3").unwrap();
        page.instances.insert(
            "x".into(),
            AssetInstance::new("x", "gone", AssetKind::Image),
        );
        let result = check_project(&project);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![CheckError::DanglingAsset {
                page_id: "p3".into(),
                instance_id: "x".into(),
                asset_id: "gone".into(),
            }]
        );
    }

    #[test]
    fn test_check_duplicate_cell() {
        let mut project = sample_project();
        let page = project.page_mut("p3").unwrap();
        page.instances.insert(
            "p3-photo-2".into(),
            AssetInstance::new("p3-photo-2", "photo", AssetKind::Image),
        );
        let result = check_project(&project);
        assert_eq!(
            result.errors,
            vec![CheckError::DuplicateCell {
                page_id: "p3".into(),
                asset_id: "photo".into(),
                instance_ids: vec!["p3-photo".into(), "p3-photo-2".into()],
            }]
        );
    }

    #[test]
    fn test_check_kind_mismatch() {
        let mut project = sample_project();
        let page = project.page_mut("p2").unwrap();
        page.instances.get_mut("p2-count").unwrap().overrides =
            Overrides::cleared(AssetKind::Text);
        let result = check_project(&project);
        assert!(matches!(
            result.errors.as_slice(),
            [CheckError::KindMismatch {
                expected: AssetKind::Value,
                found: AssetKind::Text,
                ..
            }]
        ));
    }

    #[test]
    fn test_check_shared_instance_and_duplicate_page() {
        let mut project = sample_project();
        let mut copy = project.pages[0].clone();
        copy.title = None;
        project.pages.push(copy);
        let result = check_project(&project);
        assert!(
            result
                .errors
                .contains(&CheckError::DuplicatePageId { page_id: "p1".into() })
        );
        assert!(result.errors.iter().any(|e| matches!(
            e,
            CheckError::SharedInstance { instance_id, .. } if instance_id == "p1-body"
        )));
    }

    #[test]
    fn test_warn_unused_asset() {
        let mut project = sample_project();
        project.assets.insert(
            "spare".into(),
            crate::model::Asset::new("spare", "Spare", AssetKind::Vector),
        );
        let result = check_project(&project);
        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec![CheckWarning::UnusedAsset {
                asset_id: "spare".into()
            }]
        );
    }

    #[test]
    fn test_check_result_serializes_to_json() {
        let mut project = sample_project();
        project
            .page_mut("p1")
            .unwrap()
            .instances
            .insert("z".into(), AssetInstance::new("z", "nope", AssetKind::Value));
        let json = serde_json::to_value(check_project(&project)).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["type"], "dangling_asset");
    }
}
