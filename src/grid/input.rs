use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::project::Project;
use crate::model::AssetKind;

use super::cursor::{ColumnRef, Direction};
use super::edit::EditKey;
use super::engine::GridEngine;
use super::intent::Intent;

/// Handle a key event. Returns the intents the host should apply, in order.
pub fn handle_key(engine: &mut GridEngine, project: &Project, key: KeyEvent) -> Vec<Intent> {
    // Ignore bare modifier presses and key releases
    if matches!(key.code, KeyCode::Modifier(_)) || key.kind == KeyEventKind::Release {
        return Vec::new();
    }

    // The modal editor owns the keyboard until it closes
    if engine.modal.is_some() {
        return Vec::new();
    }
    if engine.drag.is_some() {
        return match key.code {
            KeyCode::Esc => engine.cancel_drag(),
            _ => Vec::new(),
        };
    }
    if engine.edit.is_some() {
        return handle_edit(engine, key);
    }
    if engine.pending_confirm.is_some() {
        return handle_confirm(engine, key);
    }
    // Typing in a text field elsewhere in the host
    if engine.text_input_focused {
        return Vec::new();
    }
    handle_navigate(engine, project, key)
}

/// Handle pasted text (bracketed paste). Only an active inline edit takes it.
pub fn handle_paste(engine: &mut GridEngine, text: &str) -> bool {
    match &mut engine.edit {
        Some(edit) if !text.is_empty() => {
            edit.insert_str(text);
            true
        }
        _ => false,
    }
}

fn handle_edit(engine: &mut GridEngine, key: KeyEvent) -> Vec<Intent> {
    let Some(edit) = &mut engine.edit else {
        return Vec::new();
    };
    match edit.handle_key(key) {
        EditKey::Commit => engine.commit_edit(),
        EditKey::Cancel => {
            engine.cancel_edit();
            Vec::new()
        }
        EditKey::Handled | EditKey::Ignored => Vec::new(),
    }
}

fn handle_confirm(engine: &mut GridEngine, key: KeyEvent) -> Vec<Intent> {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y')) | (_, KeyCode::Enter) => engine.confirm_pending(),
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            engine.cancel_pending();
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_navigate(engine: &mut GridEngine, project: &Project, key: KeyEvent) -> Vec<Intent> {
    let command = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);

    match (command, key.code) {
        (false, KeyCode::Up) => move_cursor(engine, project, Direction::Up),
        (false, KeyCode::Down) => move_cursor(engine, project, Direction::Down),
        (false, KeyCode::Left) => move_cursor(engine, project, Direction::Left),
        (false, KeyCode::Right) => move_cursor(engine, project, Direction::Right),

        (false, KeyCode::Enter) => engine.activate(project),
        (false, KeyCode::F(2)) => {
            begin_inline_edit(engine, project);
            Vec::new()
        }
        (false, KeyCode::Char(' ')) => engine.toggle_focused(project),
        (false, KeyCode::Delete | KeyCode::Backspace) => engine.reset_focused(project),

        (true, KeyCode::Char('c' | 'C')) => {
            engine.copy(project);
            Vec::new()
        }
        (true, KeyCode::Char('v' | 'V')) => engine.paste(project).into_iter().collect(),

        _ => Vec::new(),
    }
}

fn move_cursor(engine: &mut GridEngine, project: &Project, direction: Direction) -> Vec<Intent> {
    engine.move_cursor(project, direction);
    Vec::new()
}

/// F2: edit in place. Text and value cells edit their content, the preview
/// column edits the page title.
fn begin_inline_edit(engine: &mut GridEngine, project: &Project) -> bool {
    let Some(cursor) = engine.cursor.clone() else {
        return false;
    };
    match &cursor.column {
        ColumnRef::Preview => engine.begin_title_edit(project, &cursor.page_id),
        ColumnRef::Asset(asset_id) => match project.asset(asset_id).map(|a| a.kind()) {
            Some(AssetKind::Text) => engine.begin_text_edit(project, &cursor.page_id, asset_id),
            Some(AssetKind::Value) => engine.begin_value_edit(project, &cursor.page_id, asset_id),
            _ => false,
        },
    }
}
