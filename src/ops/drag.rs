//! Column drag math: pointer x ↔ insertion index, and the resulting column
//! order. Everything here is pure; geometry comes in as plain numbers.

use std::collections::HashSet;

use crate::model::asset::AssetId;

/// Horizontal layout of the asset columns during one drag gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGeometry {
    /// Left edge of the first asset column
    pub base_x: f64,
    /// Width of one asset column (taken from the dragged header)
    pub column_width: f64,
    /// Number of visible asset columns
    pub visible_count: usize,
}

impl DragGeometry {
    pub fn new(base_x: f64, column_width: f64, visible_count: usize) -> Self {
        DragGeometry {
            base_x,
            column_width,
            visible_count,
        }
    }

    /// Nearest column boundary to `x`, clamped to `[0, visible_count - 1]`.
    /// Half-column positions round up.
    pub fn pointer_x_to_insert_index(&self, x: f64) -> usize {
        if self.visible_count == 0 || !(self.column_width > 0.0) || !x.is_finite() {
            return 0;
        }
        let max = (self.visible_count - 1) as f64;
        let raw = ((x - self.base_x) / self.column_width).round();
        raw.clamp(0.0, max) as usize
    }

    /// Left pixel of the drop indicator for an insertion index. The two
    /// extremes sit flush with the container edges.
    pub fn insert_index_to_pixel_left(&self, index: usize) -> f64 {
        if index == 0 {
            self.base_x
        } else if index >= self.visible_count {
            self.base_x + self.visible_count as f64 * self.column_width
        } else {
            self.base_x + index as f64 * self.column_width
        }
    }
}

/// Move `dragged` to `new_index` among the visible columns and return the
/// new full column order. Hidden columns keep their relative positions.
/// Returns None when `dragged` is not a visible column.
pub fn reorder_asset_ids(
    all: &[AssetId],
    visible: &[AssetId],
    dragged: &str,
    new_index: usize,
) -> Option<Vec<AssetId>> {
    if !visible.iter().any(|id| id == dragged) {
        return None;
    }
    let current = all.iter().position(|id| id == dragged)?;

    let visible_set: HashSet<&str> = visible.iter().map(String::as_str).collect();
    let mut order = all.to_vec();
    let moved = order.remove(current);

    // Visible columns after removal, as positions in the full list
    let visible_positions: Vec<usize> = order
        .iter()
        .enumerate()
        .filter(|(_, id)| visible_set.contains(id.as_str()))
        .map(|(i, _)| i)
        .collect();

    let insert_at = if new_index >= visible_positions.len() {
        // After the last visible column
        visible_positions
            .last()
            .map(|&i| i + 1)
            .unwrap_or(order.len())
    } else {
        visible_positions[new_index]
    };

    order.insert(insert_at, moved);
    Some(order)
}
