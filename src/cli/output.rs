use serde::Serialize;

use crate::grid::cursor::{ColumnRef, Cursor};
use crate::grid::engine::GridEngine;
use crate::grid::intent::Intent;
use crate::model::asset::{Asset, AssetKind};
use crate::model::instance::{AssetInstance, InstancePatch};
use crate::model::project::Project;
use crate::ops::check::{CheckError, CheckResult, CheckWarning};
use crate::ops::overrides::has_overrides;
use crate::util::unicode::{pad_to_width, single_line};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct GridJson {
    pub columns: Vec<ColumnJson>,
    pub rows: Vec<RowJson>,
    pub hidden_columns: Vec<String>,
    pub hidden_rows: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub asset_id: String,
    pub name: String,
    pub kind: AssetKind,
}

#[derive(Serialize)]
pub struct RowJson {
    pub page_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub cells: Vec<CellJson>,
}

#[derive(Serialize)]
pub struct CellJson {
    pub asset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    pub overridden: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn grid_to_json(engine: &GridEngine, project: &Project) -> GridJson {
    let assets = engine.visibility.visible_assets(&project.assets);
    let rows = engine
        .visibility
        .visible_pages(&project.pages)
        .into_iter()
        .map(|page| RowJson {
            page_id: page.id.clone(),
            title: page.title.clone(),
            cells: assets
                .iter()
                .map(|asset| {
                    let instance = page.instance_for(&asset.id);
                    CellJson {
                        asset_id: asset.id.clone(),
                        instance_id: instance.map(|i| i.id.clone()),
                        overridden: instance.is_some_and(|i| has_overrides(i, asset.kind())),
                    }
                })
                .collect(),
        })
        .collect();

    let mut hidden_columns: Vec<String> =
        engine.visibility.hidden_columns.iter().cloned().collect();
    hidden_columns.sort();
    let mut hidden_rows: Vec<String> = engine.visibility.hidden_rows.iter().cloned().collect();
    hidden_rows.sort();

    GridJson {
        columns: assets
            .iter()
            .map(|a| ColumnJson {
                asset_id: a.id.clone(),
                name: a.name.clone(),
                kind: a.kind(),
            })
            .collect(),
        rows,
        hidden_columns,
        hidden_rows,
        cursor: engine.cursor.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const PAGE_WIDTH: usize = 12;
const PREVIEW_WIDTH: usize = 8;
const CELL_WIDTH: usize = 14;

/// Text rendering of the visible grid. The focused cell is marked with `>`;
/// `·` is an off cell and `*` marks overridden values.
pub fn format_grid(engine: &GridEngine, project: &Project) -> Vec<String> {
    let language = engine.config.editor.language.as_str();
    let assets = engine.visibility.visible_assets(&project.assets);
    let mut lines = Vec::new();

    let mut header = vec![
        pad_to_width("page", PAGE_WIDTH),
        cell(false, "preview", PREVIEW_WIDTH),
    ];
    header.extend(assets.iter().map(|a| cell(false, &a.name, CELL_WIDTH)));
    lines.push(join_row(header));

    for page in engine.visibility.visible_pages(&project.pages) {
        let focused = |column: &ColumnRef| {
            engine
                .cursor
                .as_ref()
                .is_some_and(|c| c.page_id == page.id && c.column == *column)
        };
        let mut row = vec![
            pad_to_width(page.label(), PAGE_WIDTH),
            cell(focused(&ColumnRef::Preview), "", PREVIEW_WIDTH),
        ];
        for asset in &assets {
            let text = cell_text(asset, page.instance_for(&asset.id), language);
            let column = ColumnRef::Asset(asset.id.clone());
            row.push(cell(focused(&column), &text, CELL_WIDTH));
        }
        lines.push(join_row(row));
    }
    lines
}

fn cell(focused: bool, text: &str, width: usize) -> String {
    let marker = if focused { '>' } else { ' ' };
    format!("{}{}", marker, pad_to_width(text, width - 1))
}

fn join_row(cells: Vec<String>) -> String {
    cells.join(" ").trim_end().to_string()
}

/// Short text for one cell: the effective text or value, or `on` for
/// visual assets
pub fn cell_text(asset: &Asset, instance: Option<&AssetInstance>, language: &str) -> String {
    let Some(instance) = instance else {
        return "\u{00B7}".to_string();
    };
    let marker = if has_overrides(instance, asset.kind()) {
        "*"
    } else {
        ""
    };
    let body = match asset.kind() {
        AssetKind::Text => instance
            .text_override(language)
            .filter(|t| !t.is_empty())
            .or_else(|| asset.default_text(language))
            .unwrap_or(""),
        AssetKind::Value => instance
            .value_override()
            .or_else(|| asset.default_value())
            .unwrap_or(""),
        AssetKind::Image | AssetKind::Vector | AssetKind::DynamicVector => "on",
    };
    format!("{}{}", marker, single_line(body))
}

pub fn format_cursor(cursor: Option<&Cursor>) -> String {
    match cursor {
        Some(c) => format!("cursor: {}", c.key()),
        None => "cursor: none".to_string(),
    }
}

pub fn format_intent(intent: &Intent) -> String {
    match intent {
        Intent::UpdateAssetInstance {
            page_id,
            instance_id,
            patch,
        } => {
            let change = match patch {
                InstancePatch::ReplaceOverrides { .. } => "replace overrides".to_string(),
                InstancePatch::SetText {
                    language,
                    text: Some(text),
                } => format!("text[{}] = {:?}", language, text),
                InstancePatch::SetText {
                    language,
                    text: None,
                } => format!("text[{}] cleared", language),
                InstancePatch::SetValue { value: Some(value) } => format!("value = {:?}", value),
                InstancePatch::SetValue { value: None } => "value cleared".to_string(),
            };
            format!("update {}/{}: {}", page_id, instance_id, change)
        }
        Intent::ToggleAssetInstance { page_id, asset_id } => {
            format!("toggle {}/{}", page_id, asset_id)
        }
        Intent::InsertAssetInstance { page_id, instance } => {
            format!(
                "insert {}/{} as {}",
                page_id, instance.asset_id, instance.id
            )
        }
        Intent::ReorderAssets { asset_ids } => format!("reorder [{}]", asset_ids.join(", ")),
        Intent::RenamePage {
            page_id,
            title: Some(title),
        } => format!("rename {} to {:?}", page_id, title),
        Intent::RenamePage {
            page_id,
            title: None,
        } => format!("rename {} (untitled)", page_id),
        Intent::DeletePage { page_id } => format!("delete page {}", page_id),
        Intent::OpenEditor {
            page_id, asset_id, ..
        } => format!("open editor {}/{}", page_id, asset_id),
        Intent::BeginPointerCapture => "begin pointer capture".to_string(),
        Intent::EndPointerCapture => "end pointer capture".to_string(),
    }
}

pub fn format_check(result: &CheckResult) -> Vec<String> {
    let mut lines = Vec::new();
    if !result.errors.is_empty() {
        lines.push("Errors:".to_string());
        for err in &result.errors {
            lines.push(match err {
                CheckError::DanglingAsset {
                    page_id,
                    instance_id,
                    asset_id,
                } => format!(
                    "  [{}] {} references missing asset: {}",
                    page_id, instance_id, asset_id
                ),
                CheckError::DuplicateCell {
                    page_id,
                    asset_id,
                    instance_ids,
                } => format!(
                    "  [{}] {} has several instances: {}",
                    page_id,
                    asset_id,
                    instance_ids.join(", ")
                ),
                CheckError::KindMismatch {
                    page_id,
                    instance_id,
                    expected,
                    found,
                } => format!(
                    "  [{}] {} has {} overrides on a {} asset",
                    page_id, instance_id, found, expected
                ),
                CheckError::DuplicatePageId { page_id } => {
                    format!("  page id {} is used more than once", page_id)
                }
                CheckError::SharedInstance {
                    instance_id,
                    page_ids,
                } => format!(
                    "  {} appears on pages: {}",
                    instance_id,
                    page_ids.join(", ")
                ),
            });
        }
    }
    if !result.warnings.is_empty() {
        if !result.errors.is_empty() {
            lines.push(String::new());
        }
        lines.push("Warnings:".to_string());
        for warn in &result.warnings {
            lines.push(match warn {
                CheckWarning::UnusedAsset { asset_id } => {
                    format!("  {} is off on every page", asset_id)
                }
                CheckWarning::MismatchedKey {
                    page_id,
                    key,
                    instance_id,
                } => format!(
                    "  [{}] instance {} is stored under key {}",
                    page_id, instance_id, key
                ),
            });
        }
    }
    lines.push(if result.valid {
        "\u{2713} document is valid".to_string()
    } else {
        "\u{2717} document has errors".to_string()
    });
    lines
}
