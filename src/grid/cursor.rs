//! Cursor movement over the visible grid. Columns are the visible assets
//! plus the preview column, which sits left of every asset column.

use serde::{Deserialize, Serialize};

use crate::model::asset::AssetId;
use crate::model::page::PageId;

/// A grid column: the preview sentinel or a real asset column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "asset_id", rename_all = "snake_case")]
pub enum ColumnRef {
    Preview,
    Asset(AssetId),
}

impl ColumnRef {
    pub fn asset_id(&self) -> Option<&str> {
        match self {
            ColumnRef::Preview => None,
            ColumnRef::Asset(id) => Some(id.as_str()),
        }
    }
}

/// The focused grid coordinate. An invisible cursor is `Option::<Cursor>::None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub page_id: PageId,
    pub column: ColumnRef,
}

impl Cursor {
    pub fn new(page_id: impl Into<PageId>, column: ColumnRef) -> Self {
        Cursor {
            page_id: page_id.into(),
            column,
        }
    }

    pub fn at_asset(page_id: impl Into<PageId>, asset_id: impl Into<AssetId>) -> Self {
        Cursor::new(page_id, ColumnRef::Asset(asset_id.into()))
    }

    pub fn at_preview(page_id: impl Into<PageId>) -> Self {
        Cursor::new(page_id, ColumnRef::Preview)
    }

    pub fn key(&self) -> CellKey {
        CellKey {
            page_id: self.page_id.clone(),
            column: self.column.clone(),
        }
    }
}

/// Stable lookup key of a rendered cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub page_id: PageId,
    pub column: ColumnRef,
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.column {
            ColumnRef::Preview => write!(f, "{}:preview", self.page_id),
            ColumnRef::Asset(id) => write!(f, "{}:{}", self.page_id, id),
        }
    }
}

/// Arrow key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Move `cursor` one step within the visible grid. Row moves clamp at the
/// first/last page; Left from the first asset column escapes to the
/// preview column; Right clamps at the last asset column. Returns None when
/// the cursor refers to a row or column that is not visible.
pub fn step(
    cursor: &Cursor,
    direction: Direction,
    pages: &[&str],
    assets: &[&str],
) -> Option<Cursor> {
    let row = pages.iter().position(|p| *p == cursor.page_id)?;
    let col = match &cursor.column {
        ColumnRef::Preview => None,
        ColumnRef::Asset(id) => Some(assets.iter().position(|a| *a == id)?),
    };

    let moved = match direction {
        Direction::Up => Cursor::new(pages[row.saturating_sub(1)], cursor.column.clone()),
        Direction::Down => {
            let next = (row + 1).min(pages.len() - 1);
            Cursor::new(pages[next], cursor.column.clone())
        }
        Direction::Left => match col {
            None | Some(0) => Cursor::at_preview(pages[row]),
            Some(c) => Cursor::at_asset(pages[row], assets[c - 1]),
        },
        Direction::Right => match col {
            None => match assets.first() {
                Some(first) => Cursor::at_asset(pages[row], *first),
                None => cursor.clone(),
            },
            Some(c) => Cursor::at_asset(pages[row], assets[(c + 1).min(assets.len() - 1)]),
        },
    };
    Some(moved)
}

/// Where a cursor should go when its row is about to be hidden: the next
/// visible row, else the previous one.
pub fn neighbor_row<'a>(pages: &[&'a str], hidden: &str) -> Option<&'a str> {
    let idx = pages.iter().position(|p| *p == hidden)?;
    pages
        .get(idx + 1)
        .or_else(|| idx.checked_sub(1).and_then(|i| pages.get(i)))
        .copied()
}

/// Where a cursor should go when its column is about to be hidden: the next
/// visible asset column, else the previous one, else the preview column.
pub fn neighbor_column(assets: &[&str], hidden: &str) -> ColumnRef {
    let Some(idx) = assets.iter().position(|a| *a == hidden) else {
        return ColumnRef::Preview;
    };
    assets
        .get(idx + 1)
        .or_else(|| idx.checked_sub(1).and_then(|i| assets.get(i)))
        .map(|id| ColumnRef::Asset(id.to_string()))
        .unwrap_or(ColumnRef::Preview)
}
