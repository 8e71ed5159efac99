//! Event scripts for `pg replay`: a tiny token language for keys, clicks,
//! typing and column drags, plus the fixed layout they are replayed against.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Serialize;

use crate::grid::cursor::{CellKey, ColumnRef, Cursor};
use crate::grid::drag::PointerButton;
use crate::grid::engine::GridEngine;
use crate::grid::geometry::{Landmark, LayoutProbe, Rect, ScrollRequest};
use crate::grid::input::handle_key;
use crate::grid::intent::Intent;
use crate::model::project::Project;
use crate::ops::document::apply_intent;

/// One scripted event
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptEvent {
    Key(KeyEvent),
    /// Each character is pressed as a key
    Type(String),
    Click { page_id: String, column: ColumnRef },
    /// Drag a column header and drop it at a visible index
    Drag { asset_id: String, index: usize },
    Blur,
    DeletePage(String),
    CloseEditor,
}

/// Error type for script parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown event: {0}")]
    UnknownEvent(String),
    #[error("malformed event {token:?}: expected {expected}")]
    Malformed {
        token: String,
        expected: &'static str,
    },
}

pub fn parse_script(tokens: &[String]) -> Result<Vec<ScriptEvent>, ScriptError> {
    tokens.iter().map(|t| parse_event(t)).collect()
}

pub fn parse_event(token: &str) -> Result<ScriptEvent, ScriptError> {
    let plain = |code| Ok(ScriptEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    let ctrl = |code| Ok(ScriptEvent::Key(KeyEvent::new(code, KeyModifiers::CONTROL)));

    match token {
        "up" => return plain(KeyCode::Up),
        "down" => return plain(KeyCode::Down),
        "left" => return plain(KeyCode::Left),
        "right" => return plain(KeyCode::Right),
        "enter" => return plain(KeyCode::Enter),
        "esc" => return plain(KeyCode::Esc),
        "delete" => return plain(KeyCode::Delete),
        "backspace" => return plain(KeyCode::Backspace),
        "space" => return plain(KeyCode::Char(' ')),
        "f2" => return plain(KeyCode::F(2)),
        "ctrl+c" => return ctrl(KeyCode::Char('c')),
        "ctrl+v" => return ctrl(KeyCode::Char('v')),
        "ctrl+enter" => return ctrl(KeyCode::Enter),
        "blur" => return Ok(ScriptEvent::Blur),
        "close-editor" => return Ok(ScriptEvent::CloseEditor),
        _ => {}
    }

    let Some((name, rest)) = token.split_once(':') else {
        return Err(ScriptError::UnknownEvent(token.to_string()));
    };
    let malformed = |expected| ScriptError::Malformed {
        token: token.to_string(),
        expected,
    };
    match name {
        "type" => Ok(ScriptEvent::Type(rest.to_string())),
        "click" => {
            let (page_id, column) = rest
                .split_once(':')
                .filter(|(p, c)| !p.is_empty() && !c.is_empty())
                .ok_or_else(|| malformed("click:PAGE:ASSET or click:PAGE:preview"))?;
            let column = match column {
                "preview" => ColumnRef::Preview,
                id => ColumnRef::Asset(id.to_string()),
            };
            Ok(ScriptEvent::Click {
                page_id: page_id.to_string(),
                column,
            })
        }
        "drag" => {
            let (asset_id, index) = rest
                .rsplit_once(':')
                .and_then(|(a, i)| Some((a, i.parse::<usize>().ok()?)))
                .filter(|(a, _)| !a.is_empty())
                .ok_or_else(|| malformed("drag:ASSET:INDEX"))?;
            Ok(ScriptEvent::Drag {
                asset_id: asset_id.to_string(),
                index,
            })
        }
        "delete-page" if !rest.is_empty() => Ok(ScriptEvent::DeletePage(rest.to_string())),
        "delete-page" => Err(malformed("delete-page:PAGE")),
        _ => Err(ScriptError::UnknownEvent(token.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Fixed layout
// ---------------------------------------------------------------------------

/// A regular grid layout standing in for a rendered host: equal-width
/// asset columns after the page and preview columns, equal-height rows
/// under a sticky header bar.
pub struct UniformLayout {
    pages: Vec<String>,
    assets: Vec<String>,
    base_x: f64,
    preview_width: f64,
    viewport: Rect,
}

impl UniformLayout {
    pub const COLUMN_WIDTH: f64 = 100.0;
    pub const ROW_HEIGHT: f64 = 48.0;
    pub const HEADER_HEIGHT: f64 = 32.0;

    /// Layout of the grid as the engine currently shows it
    pub fn snapshot(engine: &GridEngine, project: &Project) -> Self {
        UniformLayout {
            pages: engine
                .visible_page_ids(project)
                .into_iter()
                .map(String::from)
                .collect(),
            assets: engine
                .visible_asset_ids(project)
                .into_iter()
                .map(String::from)
                .collect(),
            base_x: engine.config.layout.leading_width(),
            preview_width: engine.config.layout.preview_column_width,
            viewport: Rect::new(0.0, 0.0, 1024.0, 640.0),
        }
    }

    /// Horizontal center of the header at a visible column index
    pub fn header_center(&self, index: usize) -> f64 {
        self.base_x + (index as f64 + 0.5) * Self::COLUMN_WIDTH
    }

    /// Left edge of the visible column at `index`: the pointer position
    /// that drops a dragged column there
    pub fn boundary_x(&self, index: usize) -> f64 {
        self.base_x + index as f64 * Self::COLUMN_WIDTH
    }

    pub fn column_index(&self, asset_id: &str) -> Option<usize> {
        self.assets.iter().position(|a| a == asset_id)
    }
}

impl LayoutProbe for UniformLayout {
    fn cell_rect(&self, key: &CellKey) -> Option<Rect> {
        let row = self.pages.iter().position(|p| *p == key.page_id)?;
        let top = Self::HEADER_HEIGHT + row as f64 * Self::ROW_HEIGHT;
        let (left, width) = match key.column.asset_id() {
            None => (self.base_x - self.preview_width, self.preview_width),
            Some(id) => (
                self.base_x + self.column_index(id)? as f64 * Self::COLUMN_WIDTH,
                Self::COLUMN_WIDTH,
            ),
        };
        Some(Rect::new(left, top, width, Self::ROW_HEIGHT))
    }

    fn column_header_rect(&self, asset_id: &str) -> Option<Rect> {
        let left = self.base_x + self.column_index(asset_id)? as f64 * Self::COLUMN_WIDTH;
        Some(Rect::new(left, 0.0, Self::COLUMN_WIDTH, Self::HEADER_HEIGHT))
    }

    fn landmark_rect(&self, landmark: Landmark) -> Option<Rect> {
        match landmark {
            Landmark::Viewport => Some(self.viewport),
            Landmark::HeaderBar => Some(Rect::new(
                self.viewport.x,
                self.viewport.y,
                self.viewport.width,
                Self::HEADER_HEIGHT,
            )),
            Landmark::Toolbar | Landmark::SidePanel => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// What a replay did
#[derive(Debug, Default, Serialize)]
pub struct ReplayReport {
    /// Every intent the engine emitted, in order
    pub intents: Vec<Intent>,
    /// Scroll requests issued after cursor moves
    pub scrolls: Vec<ScrollRequest>,
    pub cursor: Option<Cursor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub status_is_error: bool,
    /// Whether any document intent changed the document
    pub document_changed: bool,
}

/// Run `events` through `engine`, applying document intents to `project`
/// as they are emitted.
pub fn replay(engine: &mut GridEngine, project: &mut Project, events: &[ScriptEvent]) -> ReplayReport {
    let mut report = ReplayReport::default();

    for event in events {
        match event {
            ScriptEvent::Type(text) => {
                for c in text.chars() {
                    let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
                    let intents = handle_key(engine, project, key);
                    settle(engine, project, intents, &mut report);
                }
            }
            other => {
                let intents = run_event(engine, project, other);
                settle(engine, project, intents, &mut report);
            }
        }
        let layout = UniformLayout::snapshot(engine, project);
        if let Some(scroll) = engine.take_scroll_request(&layout) {
            report.scrolls.push(scroll);
        }
    }

    report.cursor = engine.cursor.clone();
    report.status = engine.status_message.clone();
    report.status_is_error = engine.status_is_error;
    report
}

fn run_event(engine: &mut GridEngine, project: &Project, event: &ScriptEvent) -> Vec<Intent> {
    match event {
        ScriptEvent::Key(key) => handle_key(engine, project, *key),
        ScriptEvent::Type(_) => Vec::new(),
        ScriptEvent::Click { page_id, column } => {
            // Clicking elsewhere blurs an inline edit first
            let intents = engine.commit_edit();
            engine.click(project, page_id, column.clone());
            intents
        }
        ScriptEvent::Drag { asset_id, index } => {
            let layout = UniformLayout::snapshot(engine, project);
            let Some(origin) = layout.column_index(asset_id) else {
                return Vec::new();
            };
            let from = layout.header_center(origin);
            let to = layout.boundary_x(*index);
            let mut intents =
                engine.pointer_down(project, PointerButton::Primary, asset_id, from, &layout);
            engine.pointer_move(to);
            intents.extend(engine.pointer_up(project, to));
            intents
        }
        ScriptEvent::Blur => engine.blur(),
        ScriptEvent::DeletePage(page_id) => {
            // Refusals are reported on the status line
            let _ = engine.request_delete_page(project, page_id);
            Vec::new()
        }
        ScriptEvent::CloseEditor => {
            engine.editor_closed();
            Vec::new()
        }
    }
}

fn settle(engine: &mut GridEngine, project: &mut Project, intents: Vec<Intent>, report: &mut ReplayReport) {
    if intents.is_empty() {
        return;
    }
    for intent in intents {
        if intent.is_document_change() && apply_intent(project, &intent) {
            report.document_changed = true;
        }
        report.intents.push(intent);
    }
    report.intents.extend(engine.reconcile(project));
}
