use tracing::{debug, info, warn};

use crate::io::state::GridUiState;
use crate::model::asset::{Asset, AssetKind};
use crate::model::config::GridConfig;
use crate::model::instance::{AssetInstance, InstanceId, InstancePatch};
use crate::model::page::{Page, PageId};
use crate::model::project::Project;
use crate::model::AssetId;
use crate::ops::clipboard::{Clipboard, PasteError};
use crate::ops::drag::{DragGeometry, reorder_asset_ids};
use crate::ops::overrides;
use crate::ops::page_ops::{self, PageError};
use crate::ops::visibility::{Visibility, VisibilityError};

use super::cursor::{self, ColumnRef, Cursor, Direction};
use super::drag::{DragState, PointerButton};
use super::edit::{EditTarget, InlineEdit};
use super::geometry::{Landmark, LayoutProbe, ScrollRequest, scroll_into_view, unobstructed_area};
use super::intent::Intent;

/// A type-specific modal editor the host has open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalEditor {
    pub page_id: PageId,
    pub asset_id: AssetId,
    pub instance_id: InstanceId,
}

/// An action waiting for user confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    DeletePage { page_id: PageId },
}

/// Interaction state of the grid. The document itself is owned elsewhere
/// and passed in by reference; every change to it leaves as an [`Intent`].
#[derive(Debug, Clone, Default)]
pub struct GridEngine {
    pub config: GridConfig,
    pub visibility: Visibility,
    /// Focused cell; None when the cursor is invisible
    pub cursor: Option<Cursor>,
    pub clipboard: Clipboard,
    /// Active inline edit (text, value or page title)
    pub edit: Option<InlineEdit>,
    /// Open modal editor
    pub modal: Option<ModalEditor>,
    /// Column drag in progress
    pub drag: Option<DragState>,
    pub pending_confirm: Option<PendingConfirm>,
    /// Set by the host while keyboard focus is in a text input elsewhere
    pub text_input_focused: bool,
    /// Transient message for the status line
    pub status_message: Option<String>,
    pub status_is_error: bool,
    /// A cursor move is waiting for its scroll-into-view
    pending_scroll: bool,
}

impl GridEngine {
    pub fn new(config: GridConfig) -> Self {
        GridEngine {
            config,
            ..Default::default()
        }
    }

    // -----------------------------------------------------------------------
    // Visible sequences
    // -----------------------------------------------------------------------

    pub fn visible_page_ids<'a>(&self, project: &'a Project) -> Vec<&'a str> {
        self.visibility
            .visible_pages(&project.pages)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect()
    }

    pub fn visible_asset_ids<'a>(&self, project: &'a Project) -> Vec<&'a str> {
        self.visibility
            .visible_assets(&project.assets)
            .into_iter()
            .map(|a| a.id.as_str())
            .collect()
    }

    /// Whether an inline or modal edit owns the keyboard
    pub fn is_editing(&self) -> bool {
        self.edit.is_some() || self.modal.is_some()
    }

    // -----------------------------------------------------------------------
    // Cursor
    // -----------------------------------------------------------------------

    /// Focus a cell. Ignored unless both the row and the column are visible.
    pub fn click(&mut self, project: &Project, page_id: &str, column: ColumnRef) -> bool {
        if !self.visible_page_ids(project).contains(&page_id) {
            return false;
        }
        if let ColumnRef::Asset(asset_id) = &column
            && !self.visible_asset_ids(project).contains(&asset_id.as_str())
        {
            return false;
        }
        self.cursor = Some(Cursor::new(page_id, column));
        true
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
        self.pending_scroll = false;
    }

    /// Move the cursor one step. Schedules a scroll-into-view when the
    /// cursor actually moved.
    pub fn move_cursor(&mut self, project: &Project, direction: Direction) -> bool {
        let Some(current) = &self.cursor else {
            return false;
        };
        let pages = self.visible_page_ids(project);
        let assets = self.visible_asset_ids(project);
        let Some(next) = cursor::step(current, direction, &pages, &assets) else {
            return false;
        };
        if &next == current {
            return false;
        }
        debug!(from = %current.key(), to = %next.key(), "cursor moved");
        self.cursor = Some(next);
        self.pending_scroll = true;
        true
    }

    /// Scroll needed to show the cursor cell, computed from the layout as it
    /// is now. Call after the host has rendered the last cursor move.
    pub fn take_scroll_request(&mut self, probe: &dyn LayoutProbe) -> Option<ScrollRequest> {
        if !std::mem::take(&mut self.pending_scroll) {
            return None;
        }
        let cursor = self.cursor.as_ref()?;
        let cell = probe.cell_rect(&cursor.key())?;
        let area = unobstructed_area(probe)?;
        scroll_into_view(cell, area, self.config.scroll.margin)
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending_scroll
    }

    /// The page and asset under the cursor, if it is on an asset column
    pub fn focused_cell<'a>(&self, project: &'a Project) -> Option<(&'a Page, &'a Asset)> {
        let cursor = self.cursor.as_ref()?;
        let asset_id = cursor.column.asset_id()?;
        Some((project.page(&cursor.page_id)?, project.asset(asset_id)?))
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Enter on the focused cell: modal editor for image, vector and value
    /// cells, inline edit for text cells. No-op on the preview column and
    /// on cells that are off.
    pub fn activate(&mut self, project: &Project) -> Vec<Intent> {
        let Some((page, asset)) = self.focused_cell(project) else {
            return Vec::new();
        };
        let Some(instance) = page.instance_for(&asset.id) else {
            return Vec::new();
        };
        if asset.kind().opens_modal() {
            let modal = ModalEditor {
                page_id: page.id.clone(),
                asset_id: asset.id.clone(),
                instance_id: instance.id.clone(),
            };
            debug!(page = %modal.page_id, asset = %modal.asset_id, "opening editor");
            let intent = Intent::OpenEditor {
                page_id: modal.page_id.clone(),
                asset_id: modal.asset_id.clone(),
                instance_id: modal.instance_id.clone(),
            };
            self.modal = Some(modal);
            vec![intent]
        } else {
            let (page_id, asset_id) = (page.id.clone(), asset.id.clone());
            self.begin_text_edit(project, &page_id, &asset_id);
            Vec::new()
        }
    }

    /// Begin an inline edit of a text cell in the configured language
    pub fn begin_text_edit(&mut self, project: &Project, page_id: &str, asset_id: &str) -> bool {
        let Some(asset) = project.asset(asset_id) else {
            return false;
        };
        let Some(instance) = project.instance_at(page_id, asset_id) else {
            return false;
        };
        if asset.kind() != AssetKind::Text {
            return false;
        }
        let language = self.config.editor.language.clone();
        let default = asset.default_text(&language).unwrap_or("").to_string();
        let seed = instance
            .text_override(&language)
            .filter(|t| !t.is_empty())
            .unwrap_or(&default)
            .to_string();
        let target = EditTarget::Text {
            page_id: page_id.to_string(),
            instance_id: instance.id.clone(),
            language,
        };
        self.begin_edit(InlineEdit::begin(target, seed, Some(default)));
        true
    }

    /// Begin an inline edit of a value cell
    pub fn begin_value_edit(&mut self, project: &Project, page_id: &str, asset_id: &str) -> bool {
        let Some(asset) = project.asset(asset_id) else {
            return false;
        };
        let Some(instance) = project.instance_at(page_id, asset_id) else {
            return false;
        };
        let Some(default) = asset.default_value() else {
            return false;
        };
        let seed = instance.value_override().unwrap_or(default).to_string();
        let target = EditTarget::Value {
            page_id: page_id.to_string(),
            instance_id: instance.id.clone(),
        };
        self.begin_edit(InlineEdit::begin(target, seed, Some(default.to_string())));
        true
    }

    /// Begin an inline edit of a page title
    pub fn begin_title_edit(&mut self, project: &Project, page_id: &str) -> bool {
        let Some(page) = project.page(page_id) else {
            return false;
        };
        let seed = page.title.clone().unwrap_or_default();
        let target = EditTarget::PageTitle {
            page_id: page.id.clone(),
        };
        self.begin_edit(InlineEdit::begin(target, seed, None));
        true
    }

    /// Starting a new edit discards any edit already in progress
    fn begin_edit(&mut self, edit: InlineEdit) {
        if let Some(previous) = self.edit.take() {
            debug!(target = ?previous.target, "discarding previous inline edit");
        }
        debug!(target = ?edit.target, "inline edit started");
        self.edit = Some(edit);
    }

    /// Write the edit buffer back and leave edit mode
    pub fn commit_edit(&mut self) -> Vec<Intent> {
        let Some(edit) = self.edit.take() else {
            return Vec::new();
        };
        edit.commit().into_iter().collect()
    }

    /// Leave edit mode without writing
    pub fn cancel_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            debug!(target = ?edit.target, "inline edit cancelled");
        }
    }

    /// Grid lost focus: commit any inline edit and release a drag
    pub fn blur(&mut self) -> Vec<Intent> {
        let mut intents = self.commit_edit();
        intents.extend(self.cancel_drag());
        intents
    }

    /// The open modal editor saved `instance`
    pub fn editor_saved(&mut self, instance: &AssetInstance) -> Vec<Intent> {
        let Some(modal) = self.modal.take() else {
            return Vec::new();
        };
        if modal.instance_id != instance.id {
            warn!(expected = %modal.instance_id, got = %instance.id, "editor saved a different instance");
            return Vec::new();
        }
        vec![Intent::UpdateAssetInstance {
            page_id: modal.page_id,
            instance_id: modal.instance_id,
            patch: InstancePatch::ReplaceOverrides {
                overrides: instance.overrides.clone(),
            },
        }]
    }

    /// The open modal editor closed without saving
    pub fn editor_closed(&mut self) {
        self.modal = None;
    }

    // -----------------------------------------------------------------------
    // Overrides
    // -----------------------------------------------------------------------

    /// Reset the focused cell to asset defaults
    pub fn reset_focused(&mut self, project: &Project) -> Vec<Intent> {
        let Some((page, asset)) = self.focused_cell(project) else {
            return Vec::new();
        };
        overrides::reset_cell(project, &page.id, &asset.id)
            .into_iter()
            .collect()
    }

    /// Reset every instance in a column (column header menu)
    pub fn reset_column(&self, project: &Project, asset_id: &str) -> Vec<Intent> {
        overrides::reset_column(project, asset_id)
    }

    /// Reset every instance on a page (row header menu)
    pub fn reset_row(&self, project: &Project, page_id: &str) -> Vec<Intent> {
        overrides::reset_row(project, page_id)
    }

    /// Turn the focused cell on or off
    pub fn toggle_focused(&mut self, project: &Project) -> Vec<Intent> {
        let Some((page, asset)) = self.focused_cell(project) else {
            return Vec::new();
        };
        overrides::toggle_cell(project, &page.id, &asset.id)
            .into_iter()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Clipboard
    // -----------------------------------------------------------------------

    /// Copy the focused cell. False when the cursor is not on an asset cell.
    pub fn copy(&mut self, project: &Project) -> bool {
        let Some((page, asset)) = self.focused_cell(project) else {
            return false;
        };
        let copied = self.clipboard.copy(project, &page.id, &asset.id);
        if copied {
            self.set_status(format!("copied {} / {}", page.label(), asset.name), false);
        }
        copied
    }

    /// Paste onto the focused cell. A rejected paste leaves the document
    /// alone and shows the reason on the status line.
    pub fn paste(&mut self, project: &Project) -> Result<Intent, PasteError> {
        let result = match self.focused_cell(project) {
            Some((page, asset)) => self.clipboard.paste(project, &page.id, &asset.id),
            None => Err(PasteError::UnknownCell),
        };
        match &result {
            Ok(_) => self.set_status("pasted".to_string(), false),
            Err(e) => {
                warn!(error = %e, "paste rejected");
                self.set_status(e.to_string(), true);
            }
        }
        result
    }

    // -----------------------------------------------------------------------
    // Visibility
    // -----------------------------------------------------------------------

    /// Hide a column. A cursor on that column moves to the nearest visible
    /// neighbour (next, else previous, else the preview column).
    pub fn hide_column(&mut self, project: &Project, asset_id: &str) -> Result<bool, VisibilityError> {
        let before = self.visible_asset_ids(project);
        let changed = self
            .visibility
            .hide_column(asset_id, &project.assets)
            .inspect_err(|e| {
                warn!(%asset_id, error = %e, "hide column refused");
                self.set_status(e.to_string(), true);
            })?;
        if changed
            && let Some(cursor) = &mut self.cursor
            && cursor.column.asset_id() == Some(asset_id)
        {
            cursor.column = cursor::neighbor_column(&before, asset_id);
            self.pending_scroll = true;
        }
        if changed {
            let editing_column = self.edit.as_ref().is_some_and(|e| match &e.target {
                EditTarget::Text {
                    page_id,
                    instance_id,
                    ..
                }
                | EditTarget::Value {
                    page_id,
                    instance_id,
                } => project
                    .page(page_id)
                    .and_then(|p| p.instances.get(instance_id))
                    .is_some_and(|i| i.asset_id == asset_id),
                EditTarget::PageTitle { .. } => false,
            });
            if editing_column {
                self.cancel_edit();
            }
            if self.modal.as_ref().is_some_and(|m| m.asset_id == asset_id) {
                debug!(%asset_id, "closing editor on hidden column");
                self.modal = None;
            }
        }
        Ok(changed)
    }

    /// Hide a row. A cursor on that row moves to the next visible row, else
    /// the previous one.
    pub fn hide_row(&mut self, project: &Project, page_id: &str) -> Result<bool, VisibilityError> {
        let before = self.visible_page_ids(project);
        let changed = self
            .visibility
            .hide_row(page_id, &project.pages)
            .inspect_err(|e| {
                warn!(%page_id, error = %e, "hide row refused");
                self.set_status(e.to_string(), true);
            })?;
        if changed
            && let Some(cursor) = &mut self.cursor
            && cursor.page_id == page_id
        {
            match cursor::neighbor_row(&before, page_id) {
                Some(next) => {
                    cursor.page_id = next.to_string();
                    self.pending_scroll = true;
                }
                None => self.cursor = None,
            }
        }
        if changed
            && self
                .edit
                .as_ref()
                .is_some_and(|e| e.target.page_id() == page_id)
        {
            self.cancel_edit();
        }
        Ok(changed)
    }

    pub fn show_column(&mut self, asset_id: &str) -> bool {
        self.visibility.show_column(asset_id)
    }

    pub fn show_row(&mut self, page_id: &str) -> bool {
        self.visibility.show_row(page_id)
    }

    pub fn show_all_columns(&mut self) {
        self.visibility.show_all_columns();
    }

    pub fn show_all_rows(&mut self) {
        self.visibility.show_all_rows();
    }

    // -----------------------------------------------------------------------
    // Column drag
    // -----------------------------------------------------------------------

    /// Pointer pressed on a column header. Only the primary button starts a
    /// drag; the host must route pointer events from the whole window to
    /// the engine until it sees `EndPointerCapture`.
    pub fn pointer_down(
        &mut self,
        project: &Project,
        button: PointerButton,
        asset_id: &str,
        pointer_x: f64,
        probe: &dyn LayoutProbe,
    ) -> Vec<Intent> {
        if button != PointerButton::Primary {
            return Vec::new();
        }
        // A capture left over from a lost pointer-up is released first
        let mut intents = self.cancel_drag();

        let visible = self.visible_asset_ids(project);
        let Some(origin_index) = visible.iter().position(|id| *id == asset_id) else {
            return intents;
        };
        let Some(origin_rect) = probe.column_header_rect(asset_id) else {
            return intents;
        };
        if !(origin_rect.width > 0.0) {
            return intents;
        }
        let side_panel = probe
            .landmark_rect(Landmark::SidePanel)
            .map_or(0.0, |r| r.width);
        let base_x = self.config.layout.leading_width() + side_panel;
        let geometry = DragGeometry::new(base_x, origin_rect.width, visible.len());

        debug!(%asset_id, origin_index, base_x, "column drag started");
        self.drag = Some(DragState::start(
            asset_id.to_string(),
            origin_index,
            origin_rect,
            pointer_x,
            geometry,
        ));
        intents.push(Intent::BeginPointerCapture);
        intents
    }

    pub fn pointer_move(&mut self, pointer_x: f64) {
        if let Some(drag) = &mut self.drag {
            drag.update(pointer_x);
        }
    }

    /// Pointer released anywhere. Emits a reorder when the column landed on
    /// a new index, and always ends the capture.
    pub fn pointer_up(&mut self, project: &Project, pointer_x: f64) -> Vec<Intent> {
        let Some(mut drag) = self.drag.take() else {
            return Vec::new();
        };
        drag.update(pointer_x);

        let mut intents = Vec::new();
        if drag.has_moved() {
            let all = project.asset_ids();
            let visible: Vec<AssetId> = self
                .visible_asset_ids(project)
                .into_iter()
                .map(String::from)
                .collect();
            if let Some(order) =
                reorder_asset_ids(&all, &visible, &drag.dragged_asset_id, drag.insert_index)
            {
                info!(
                    asset = %drag.dragged_asset_id,
                    from = drag.origin_index,
                    to = drag.insert_index,
                    "column reordered"
                );
                intents.push(Intent::ReorderAssets { asset_ids: order });
            }
        }
        intents.push(Intent::EndPointerCapture);
        intents
    }

    /// Abandon a drag without reordering
    pub fn cancel_drag(&mut self) -> Vec<Intent> {
        match self.drag.take() {
            Some(drag) => {
                debug!(asset = %drag.dragged_asset_id, "column drag cancelled");
                vec![Intent::EndPointerCapture]
            }
            None => Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Pages
    // -----------------------------------------------------------------------

    /// Ask to delete a page. The last page is refused outright; any other
    /// page waits for [`GridEngine::confirm_pending`].
    pub fn request_delete_page(&mut self, project: &Project, page_id: &str) -> Result<(), PageError> {
        if let Err(e) = page_ops::check_delete_page(project, page_id) {
            warn!(%page_id, error = %e, "delete page refused");
            self.set_status(e.to_string(), true);
            return Err(e);
        }
        let label = project.page(page_id).map_or(page_id, |p| p.label());
        self.set_status(format!("delete page \"{}\"? (y/n)", label), false);
        self.pending_confirm = Some(PendingConfirm::DeletePage {
            page_id: page_id.to_string(),
        });
        Ok(())
    }

    pub fn confirm_pending(&mut self) -> Vec<Intent> {
        self.status_message = None;
        match self.pending_confirm.take() {
            Some(PendingConfirm::DeletePage { page_id }) => {
                info!(%page_id, "page deleted");
                vec![Intent::DeletePage { page_id }]
            }
            None => Vec::new(),
        }
    }

    pub fn cancel_pending(&mut self) {
        if self.pending_confirm.take().is_some() {
            self.status_message = None;
        }
    }

    // -----------------------------------------------------------------------
    // Document changes
    // -----------------------------------------------------------------------

    /// Bring engine state back in line after the document changed: drop
    /// hidden ids that no longer exist, clear a cursor whose row or column
    /// is gone, and abandon edits, editors, drags and confirmations that
    /// point at deleted things.
    pub fn reconcile(&mut self, project: &Project) -> Vec<Intent> {
        self.visibility.prune(&project.pages, &project.assets);

        if let Some(cursor) = &self.cursor {
            let page_ok = self
                .visible_page_ids(project)
                .contains(&cursor.page_id.as_str());
            let column_ok = match &cursor.column {
                ColumnRef::Preview => true,
                ColumnRef::Asset(id) => self.visible_asset_ids(project).contains(&id.as_str()),
            };
            if !(page_ok && column_ok) {
                debug!(cursor = %cursor.key(), "clearing stale cursor");
                self.clear_cursor();
            }
        }

        if let Some(edit) = &self.edit {
            let alive = match &edit.target {
                EditTarget::Text {
                    page_id,
                    instance_id,
                    ..
                }
                | EditTarget::Value {
                    page_id,
                    instance_id,
                } => project
                    .page(page_id)
                    .is_some_and(|p| p.instances.contains_key(instance_id)),
                EditTarget::PageTitle { page_id } => project.page(page_id).is_some(),
            };
            if !alive {
                self.cancel_edit();
            }
        }

        if let Some(modal) = &self.modal
            && !project
                .page(&modal.page_id)
                .is_some_and(|p| p.instances.contains_key(&modal.instance_id))
        {
            self.modal = None;
        }

        if let Some(PendingConfirm::DeletePage { page_id }) = &self.pending_confirm
            && project.page(page_id).is_none()
        {
            self.pending_confirm = None;
        }

        let orphaned_drag = self
            .drag
            .as_ref()
            .is_some_and(|d| project.asset(&d.dragged_asset_id).is_none());
        if orphaned_drag {
            self.cancel_drag()
        } else {
            Vec::new()
        }
    }

    // -----------------------------------------------------------------------
    // Persistence of UI state
    // -----------------------------------------------------------------------

    pub fn ui_state(&self) -> GridUiState {
        GridUiState {
            visibility: self.visibility.clone(),
            cursor: self.cursor.clone(),
        }
    }

    pub fn restore_ui_state(&mut self, state: GridUiState, project: &Project) {
        self.visibility = state.visibility;
        self.cursor = state.cursor;
        self.reconcile(project);
    }

    // -----------------------------------------------------------------------
    // Status line
    // -----------------------------------------------------------------------

    pub fn set_status(&mut self, message: String, is_error: bool) {
        self.status_message = Some(message);
        self.status_is_error = is_error;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }
}
