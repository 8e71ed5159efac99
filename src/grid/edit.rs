//! Inline editing of a single cell or page title. One buffer, a byte-offset
//! cursor kept on grapheme boundaries, and commit/cancel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::instance::{InstanceId, InstancePatch};
use crate::model::page::PageId;
use crate::ops::page_ops::normalize_title;
use crate::util::unicode::{
    next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left, word_boundary_right,
};

use super::intent::Intent;

/// What an inline edit writes back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// Per-language text override (multi-line)
    Text {
        page_id: PageId,
        instance_id: InstanceId,
        language: String,
    },
    /// Value override (single line)
    Value {
        page_id: PageId,
        instance_id: InstanceId,
    },
    /// Page title (single line)
    PageTitle { page_id: PageId },
}

impl EditTarget {
    pub fn page_id(&self) -> &str {
        match self {
            EditTarget::Text { page_id, .. }
            | EditTarget::Value { page_id, .. }
            | EditTarget::PageTitle { page_id } => page_id,
        }
    }

    fn is_multiline(&self) -> bool {
        matches!(self, EditTarget::Text { .. })
    }
}

/// Result of feeding a key to an inline edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Key changed the buffer or cursor
    Handled,
    /// Key asks to write the buffer back
    Commit,
    /// Key asks to discard the buffer
    Cancel,
    /// Key means nothing to the editor
    Ignored,
}

/// An in-progress inline edit
#[derive(Debug, Clone)]
pub struct InlineEdit {
    pub target: EditTarget,
    pub buffer: String,
    /// Byte offset into `buffer`, always on a grapheme boundary
    pub cursor: usize,
    /// Buffer contents when the edit began
    original: String,
    /// Asset default for text/value edits. Committing the default clears
    /// the override instead of storing a copy of it.
    default: Option<String>,
}

impl InlineEdit {
    /// Begin editing with the current effective value as the seed
    pub fn begin(target: EditTarget, seed: impl Into<String>, default: Option<String>) -> Self {
        let buffer: String = seed.into();
        InlineEdit {
            target,
            cursor: buffer.len(),
            original: buffer.clone(),
            buffer,
            default,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer != self.original
    }

    pub fn insert_str(&mut self, text: &str) {
        let text = if self.target.is_multiline() {
            text.replace('\r', "")
        } else {
            text.replace(['\n', '\r'], " ")
        };
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn delete_word_back(&mut self) {
        let start = word_boundary_left(&self.buffer, self.cursor);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    /// Feed a key press to the editor
    pub fn handle_key(&mut self, key: KeyEvent) -> EditKey {
        let ctrl = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => EditKey::Cancel,
            KeyCode::Enter if ctrl || !self.target.is_multiline() => EditKey::Commit,
            KeyCode::Enter => {
                self.insert_str("\n");
                EditKey::Handled
            }
            KeyCode::Backspace if ctrl || alt => {
                self.delete_word_back();
                EditKey::Handled
            }
            KeyCode::Backspace => {
                self.backspace();
                EditKey::Handled
            }
            KeyCode::Delete => {
                self.delete_forward();
                EditKey::Handled
            }
            KeyCode::Left if ctrl || alt => {
                self.cursor = word_boundary_left(&self.buffer, self.cursor);
                EditKey::Handled
            }
            KeyCode::Right if ctrl || alt => {
                self.cursor = word_boundary_right(&self.buffer, self.cursor);
                EditKey::Handled
            }
            KeyCode::Left => {
                self.move_left();
                EditKey::Handled
            }
            KeyCode::Right => {
                self.move_right();
                EditKey::Handled
            }
            KeyCode::Home => {
                self.cursor = 0;
                EditKey::Handled
            }
            KeyCode::End => {
                self.cursor = self.buffer.len();
                EditKey::Handled
            }
            KeyCode::Char(c) if !ctrl => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                EditKey::Handled
            }
            _ => EditKey::Ignored,
        }
    }

    /// The document change this edit makes, if any. Consumes the edit.
    pub fn commit(self) -> Option<Intent> {
        match self.target {
            EditTarget::Text {
                page_id,
                instance_id,
                language,
            } => {
                if self.buffer == self.original {
                    return None;
                }
                // An empty or default buffer falls back to the asset default
                let text = (!self.buffer.is_empty()
                    && self.default.as_deref() != Some(self.buffer.as_str()))
                .then_some(self.buffer);
                Some(Intent::UpdateAssetInstance {
                    page_id,
                    instance_id,
                    patch: InstancePatch::SetText { language, text },
                })
            }
            EditTarget::Value {
                page_id,
                instance_id,
            } => {
                let trimmed = self.buffer.trim();
                if trimmed == self.original.trim() {
                    return None;
                }
                let value = (self.default.as_deref() != Some(trimmed)).then(|| trimmed.to_string());
                Some(Intent::UpdateAssetInstance {
                    page_id,
                    instance_id,
                    patch: InstancePatch::SetValue { value },
                })
            }
            EditTarget::PageTitle { page_id } => {
                let title = normalize_title(&self.buffer);
                if title == normalize_title(&self.original) {
                    return None;
                }
                Some(Intent::RenamePage { page_id, title })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn text_edit(seed: &str, default: Option<&str>) -> InlineEdit {
        InlineEdit::begin(
            EditTarget::Text {
                page_id: "p1".into(),
                instance_id: "i1".into(),
                language: "en".into(),
            },
            seed,
            default.map(|d| d.to_string()),
        )
    }

    fn type_str(edit: &mut InlineEdit, s: &str) {
        for c in s.chars() {
            assert_eq!(edit.handle_key(key(KeyCode::Char(c))), EditKey::Handled);
        }
    }

    #[test]
    fn begin_places_cursor_at_end() {
        let edit = text_edit("héllo", None);
        assert_eq!(edit.cursor, "héllo".len());
        assert!(!edit.is_dirty());
    }

    #[test]
    fn text_enter_inserts_newline_ctrl_enter_commits() {
        let mut edit = text_edit("a", None);
        assert_eq!(edit.handle_key(key(KeyCode::Enter)), EditKey::Handled);
        type_str(&mut edit, "b");
        assert_eq!(edit.buffer, "a\nb");
        assert_eq!(edit.handle_key(ctrl(KeyCode::Enter)), EditKey::Commit);
    }

    #[test]
    fn escape_cancels() {
        let mut edit = text_edit("a", None);
        assert_eq!(edit.handle_key(key(KeyCode::Esc)), EditKey::Cancel);
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut edit = text_edit("ok👍🏽", None);
        edit.backspace();
        assert_eq!(edit.buffer, "ok");
        edit.move_left();
        edit.delete_forward();
        assert_eq!(edit.buffer, "o");
    }

    #[test]
    fn ctrl_backspace_deletes_word() {
        let mut edit = text_edit("hello big world", None);
        edit.handle_key(ctrl(KeyCode::Backspace));
        assert_eq!(edit.buffer, "hello big ");
    }

    #[test]
    fn commit_unchanged_is_none() {
        let edit = text_edit("Welcome", Some("Default"));
        assert_eq!(edit.commit(), None);
    }

    #[test]
    fn commit_text_sets_override() {
        let mut edit = text_edit("Default", Some("Default"));
        edit.handle_key(key(KeyCode::Char('!')));
        assert_eq!(
            edit.commit(),
            Some(Intent::UpdateAssetInstance {
                page_id: "p1".into(),
                instance_id: "i1".into(),
                patch: InstancePatch::SetText {
                    language: "en".into(),
                    text: Some("Default!".into()),
                },
            })
        );
    }

    #[test]
    fn commit_back_to_default_clears_override() {
        let mut edit = text_edit("Custom", Some("Default"));
        edit.buffer = "Default".into();
        edit.cursor = edit.buffer.len();
        let Some(Intent::UpdateAssetInstance { patch, .. }) = edit.commit() else {
            panic!("expected update");
        };
        assert_eq!(
            patch,
            InstancePatch::SetText {
                language: "en".into(),
                text: None,
            }
        );
    }

    #[test]
    fn commit_empty_text_clears_override() {
        let mut edit = text_edit("Hi", Some("Default"));
        edit.handle_key(key(KeyCode::Backspace));
        edit.handle_key(key(KeyCode::Backspace));
        assert_eq!(edit.buffer, "");
        let Some(Intent::UpdateAssetInstance { patch, .. }) = edit.commit() else {
            panic!("expected update");
        };
        assert_eq!(
            patch,
            InstancePatch::SetText {
                language: "en".into(),
                text: None,
            }
        );
    }

    #[test]
    fn value_edit_is_single_line() {
        let mut edit = InlineEdit::begin(
            EditTarget::Value {
                page_id: "p2".into(),
                instance_id: "c".into(),
            },
            "7",
            Some("0".into()),
        );
        edit.insert_str("1\n2");
        assert_eq!(edit.buffer, "71 2");
        assert_eq!(edit.handle_key(key(KeyCode::Enter)), EditKey::Commit);
    }

    #[test]
    fn value_commit_trims_and_clears_default() {
        let mut edit = InlineEdit::begin(
            EditTarget::Value {
                page_id: "p2".into(),
                instance_id: "c".into(),
            },
            "7",
            Some("0".into()),
        );
        edit.buffer = " 0 ".into();
        let Some(Intent::UpdateAssetInstance { patch, .. }) = edit.commit() else {
            panic!("expected update");
        };
        assert_eq!(patch, InstancePatch::SetValue { value: None });
    }

    #[test]
    fn title_commit_normalizes() {
        let mut edit = InlineEdit::begin(
            EditTarget::PageTitle {
                page_id: "p1".into(),
            },
            "Cover",
            None,
        );
        edit.handle_key(key(KeyCode::Home));
        type_str(&mut edit, "  ");
        // Only whitespace added: same title after trimming
        assert!(edit.clone().commit().is_none());

        edit.buffer = "   ".into();
        assert_eq!(
            edit.commit(),
            Some(Intent::RenamePage {
                page_id: "p1".into(),
                title: None,
            })
        );
    }

    #[test]
    fn ctrl_chars_are_not_inserted() {
        let mut edit = text_edit("x", None);
        assert_eq!(edit.handle_key(ctrl(KeyCode::Char('c'))), EditKey::Ignored);
        assert_eq!(edit.buffer, "x");
    }
}
