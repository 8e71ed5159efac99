use serde::Serialize;

use super::cursor::CellKey;

/// An axis-aligned rectangle in pixels (host coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Structural parts of the grid UI whose bounds the engine reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    /// The scrolling container of the grid
    Viewport,
    /// Sticky column header bar at the top of the viewport
    HeaderBar,
    /// Toolbar overlapping the top of the viewport
    Toolbar,
    /// Side panel pushing the grid to the right
    SidePanel,
}

/// Read access to the host's current layout. Every lookup may fail (element
/// not rendered yet); callers treat a miss as "nothing to do".
pub trait LayoutProbe {
    /// Bounds of the cell with the given key
    fn cell_rect(&self, key: &CellKey) -> Option<Rect>;
    /// Bounds of an asset column header
    fn column_header_rect(&self, asset_id: &str) -> Option<Rect>;
    /// Bounds of a named landmark
    fn landmark_rect(&self, landmark: Landmark) -> Option<Rect>;
}

/// How far the viewport should scroll, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub dx: f64,
    pub dy: f64,
}

/// Scroll offset that brings `cell` fully into `area` with `margin` pixels
/// to spare on every side. Returns None when no scroll is needed. When the
/// cell (plus margins) is larger than the area, its top-left edge wins.
pub fn scroll_into_view(cell: Rect, area: Rect, margin: f64) -> Option<ScrollRequest> {
    let dx = axis_delta(
        cell.left() - margin,
        cell.right() + margin,
        area.left(),
        area.right(),
    );
    let dy = axis_delta(
        cell.top() - margin,
        cell.bottom() + margin,
        area.top(),
        area.bottom(),
    );
    if dx == 0.0 && dy == 0.0 {
        None
    } else {
        Some(ScrollRequest { dx, dy })
    }
}

fn axis_delta(start: f64, end: f64, area_start: f64, area_end: f64) -> f64 {
    if start < area_start {
        start - area_start
    } else if end > area_end {
        // Never scroll the start past the area's start
        (end - area_end).min(start - area_start)
    } else {
        0.0
    }
}

/// The part of the viewport not covered by the sticky header bar or the
/// toolbar.
pub fn unobstructed_area(probe: &dyn LayoutProbe) -> Option<Rect> {
    let viewport = probe.landmark_rect(Landmark::Viewport)?;
    let mut top = viewport.top();
    for landmark in [Landmark::HeaderBar, Landmark::Toolbar] {
        if let Some(r) = probe.landmark_rect(landmark)
            && r.bottom() > top
            && r.top() <= top
        {
            top = r.bottom();
        }
    }
    let height = (viewport.bottom() - top).max(0.0);
    Some(Rect::new(viewport.left(), top, viewport.width, height))
}
