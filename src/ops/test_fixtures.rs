use std::collections::BTreeMap;

use crate::model::asset::{Asset, AssetDefaults, AssetKind, Placement};
use crate::model::instance::{AssetInstance, Overrides, PlacementOverrides};
use crate::model::page::Page;
use crate::model::project::Project;

fn instance(id: &str, asset_id: &str, overrides: Overrides) -> AssetInstance {
    AssetInstance {
        id: id.to_string(),
        asset_id: asset_id.to_string(),
        overrides,
    }
}

fn page(id: &str, title: Option<&str>, instances: Vec<AssetInstance>) -> Page {
    let mut page = Page::new(id);
    page.title = title.map(|t| t.to_string());
    for inst in instances {
        page.instances.insert(inst.id.clone(), inst);
    }
    page
}

/// Three pages, three assets:
///
/// | page | photo (image)  | body (text)    | count (value) |
/// |------|----------------|----------------|---------------|
/// | p1   | x moved        | en "Welcome"   | off           |
/// | p2   | off            | defaults       | "7"           |
/// | p3   | defaults       | off            | off           |
pub fn sample_project() -> Project {
    let mut project = Project::default();

    project.assets.insert(
        "photo".into(),
        Asset {
            id: "photo".into(),
            name: "Photo".into(),
            defaults: AssetDefaults::Image {
                path: Some("cover.png".into()),
                placement: Placement::default(),
            },
        },
    );
    let mut body_text = BTreeMap::new();
    body_text.insert("en".to_string(), "Default body".to_string());
    project.assets.insert(
        "body".into(),
        Asset {
            id: "body".into(),
            name: "Body".into(),
            defaults: AssetDefaults::Text {
                text: body_text,
                placement: Placement::default(),
            },
        },
    );
    project.assets.insert(
        "count".into(),
        Asset {
            id: "count".into(),
            name: "Count".into(),
            defaults: AssetDefaults::Value { value: "0".into() },
        },
    );

    let mut welcome = BTreeMap::new();
    welcome.insert("en".to_string(), "Welcome".to_string());

    project.pages = vec![
        page(
            "p1",
            Some("Cover"),
            vec![
                instance(
                    "p1-photo",
                    "photo",
                    Overrides::Image {
                        placement: PlacementOverrides {
                            x: Some(40.0),
                            ..Default::default()
                        },
                    },
                ),
                instance(
                    "p1-body",
                    "body",
                    Overrides::Text {
                        text: welcome,
                        placement: PlacementOverrides::default(),
                    },
                ),
            ],
        ),
        page(
            "p2",
            None,
            vec![
                instance("p2-body", "body", Overrides::cleared(AssetKind::Text)),
                instance(
                    "p2-count",
                    "count",
                    Overrides::Value {
                        override_value: Some("7".into()),
                    },
                ),
            ],
        ),
        page(
            "p3",
            Some("Back"),
            vec![instance("p3-photo", "photo", Overrides::cleared(AssetKind::Image))],
        ),
    ];

    project
}
