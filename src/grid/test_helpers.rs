use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::cursor::CellKey;
use super::geometry::{Landmark, LayoutProbe, Rect};

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Layout double: fixed-size cells laid out in a regular grid.
///
/// Asset columns start after the page and preview columns; the header bar
/// and toolbar sit at the top of the viewport.
pub struct GridProbe {
    pub pages: Vec<String>,
    pub assets: Vec<String>,
    pub leading: f64,
    pub preview_width: f64,
    pub column_width: f64,
    pub row_height: f64,
    pub header_height: f64,
    pub landmarks: HashMap<Landmark, Rect>,
}

impl GridProbe {
    /// 100px columns after a 280px lead, 40px rows under a 32px header,
    /// inside an 800x400 viewport.
    pub fn new(pages: &[&str], assets: &[&str]) -> Self {
        let mut landmarks = HashMap::new();
        landmarks.insert(Landmark::Viewport, Rect::new(0.0, 0.0, 800.0, 400.0));
        landmarks.insert(Landmark::HeaderBar, Rect::new(0.0, 0.0, 800.0, 32.0));
        GridProbe {
            pages: pages.iter().map(|s| s.to_string()).collect(),
            assets: assets.iter().map(|s| s.to_string()).collect(),
            leading: 280.0,
            preview_width: 120.0,
            column_width: 100.0,
            row_height: 40.0,
            header_height: 32.0,
            landmarks,
        }
    }

    fn column_left(&self, asset_id: &str) -> Option<f64> {
        let idx = self.assets.iter().position(|a| a == asset_id)?;
        Some(self.leading + idx as f64 * self.column_width)
    }
}

impl LayoutProbe for GridProbe {
    fn cell_rect(&self, key: &CellKey) -> Option<Rect> {
        let row = self.pages.iter().position(|p| *p == key.page_id)?;
        let top = self.header_height + row as f64 * self.row_height;
        let (left, width) = match key.column.asset_id() {
            None => (self.leading - self.preview_width, self.preview_width),
            Some(id) => (self.column_left(id)?, self.column_width),
        };
        Some(Rect::new(left, top, width, self.row_height))
    }

    fn column_header_rect(&self, asset_id: &str) -> Option<Rect> {
        let left = self.column_left(asset_id)?;
        Some(Rect::new(left, 0.0, self.column_width, self.header_height))
    }

    fn landmark_rect(&self, landmark: Landmark) -> Option<Rect> {
        self.landmarks.get(&landmark).copied()
    }
}
