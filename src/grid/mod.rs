pub mod cursor;
pub mod drag;
pub mod edit;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod intent;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use cursor::{CellKey, ColumnRef, Cursor, Direction};
pub use drag::{DragState, PointerButton};
pub use edit::{EditKey, EditTarget, InlineEdit};
pub use engine::{GridEngine, ModalEditor, PendingConfirm};
pub use geometry::{Landmark, LayoutProbe, Rect, ScrollRequest};
pub use input::{handle_key, handle_paste};
pub use intent::Intent;
