use serde::Serialize;

use crate::model::asset::AssetId;
use crate::ops::drag::DragGeometry;

use super::geometry::Rect;

/// Mouse button of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// One column drag gesture, from pointer-down to pointer-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragState {
    pub dragged_asset_id: AssetId,
    /// Visible index of the dragged column when the gesture started
    pub origin_index: usize,
    /// Header bounds captured at pointer-down
    pub origin_rect: Rect,
    pub current_pointer_x: f64,
    /// Where the column would land if released now
    pub insert_index: usize,
    #[serde(skip)]
    pub geometry: DragGeometry,
    /// Pointer x at pointer-down
    #[serde(skip)]
    start_pointer_x: f64,
}

impl DragState {
    pub fn start(
        dragged_asset_id: AssetId,
        origin_index: usize,
        origin_rect: Rect,
        pointer_x: f64,
        geometry: DragGeometry,
    ) -> Self {
        DragState {
            dragged_asset_id,
            origin_index,
            origin_rect,
            current_pointer_x: pointer_x,
            insert_index: origin_index,
            geometry,
            start_pointer_x: pointer_x,
        }
    }

    /// Track the pointer. The insert index is the column boundary nearest
    /// the pointer; a pointer back at its press position stays at the origin.
    pub fn update(&mut self, pointer_x: f64) {
        self.current_pointer_x = pointer_x;
        self.insert_index = if pointer_x == self.start_pointer_x {
            self.origin_index
        } else {
            self.geometry.pointer_x_to_insert_index(pointer_x)
        };
    }

    /// Left pixel of the drop indicator
    pub fn indicator_left(&self) -> f64 {
        self.geometry.insert_index_to_pixel_left(self.insert_index)
    }

    pub fn has_moved(&self) -> bool {
        self.insert_index != self.origin_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag_from_first() -> DragState {
        // Columns start at 280, 100px wide, 4 visible. Grab mid-header.
        let geometry = DragGeometry::new(280.0, 100.0, 4);
        DragState::start(
            "a".into(),
            0,
            Rect::new(280.0, 0.0, 100.0, 32.0),
            330.0,
            geometry,
        )
    }

    #[test]
    fn press_without_move_stays_at_origin() {
        let mut drag = drag_from_first();
        drag.update(330.0);
        assert_eq!(drag.insert_index, 0);
        assert!(!drag.has_moved());
    }

    #[test]
    fn insert_index_follows_pointer_boundary() {
        let mut drag = drag_from_first();
        // round((440 - 280) / 100) = 2
        drag.update(440.0);
        assert_eq!(drag.insert_index, 2);
        assert_eq!(drag.indicator_left(), 480.0);
        assert!(drag.has_moved());

        drag.update(329.0);
        assert_eq!(drag.insert_index, 0);
        assert!(!drag.has_moved());
    }

    #[test]
    fn half_column_rounds_up() {
        let mut drag = drag_from_first();
        drag.update(330.5);
        assert_eq!(drag.insert_index, 1);
    }

    #[test]
    fn far_right_clamps_to_last_column() {
        let mut drag = drag_from_first();
        drag.update(5000.0);
        assert_eq!(drag.insert_index, 3);
    }
}
