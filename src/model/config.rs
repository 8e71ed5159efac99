use serde::{Deserialize, Serialize};

/// Configuration from pagegrid.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Widths of the static columns left of the first asset column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Page title column, in pixels
    #[serde(default = "default_page_column_width")]
    pub page_column_width: f64,
    /// Preview column, in pixels
    #[serde(default = "default_preview_column_width")]
    pub preview_column_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page_column_width: default_page_column_width(),
            preview_column_width: default_preview_column_width(),
        }
    }
}

impl LayoutConfig {
    /// Sum of the static leading column widths
    pub fn leading_width(&self) -> f64 {
        self.page_column_width + self.preview_column_width
    }
}

fn default_page_column_width() -> f64 {
    160.0
}

fn default_preview_column_width() -> f64 {
    120.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Space kept between the focused cell and each viewport edge, in pixels
    #[serde(default = "default_scroll_margin")]
    pub margin: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            margin: default_scroll_margin(),
        }
    }
}

fn default_scroll_margin() -> f64 {
    20.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Language whose text is edited inline
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}
