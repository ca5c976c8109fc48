use serde::{Deserialize, Serialize};

/// Document-level layout and typography defaults.
///
/// Replaced as a whole value; the editor never patches single fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasSettings {
    /// Outer (page) background
    pub background_color: String,

    /// Content area background
    pub content_background_color: String,

    pub content_width: String,
    pub max_width: String,

    /// Padding around the content table
    pub padding: String,

    pub font_family: String,
    pub font_size: String,
    pub line_height: String,
    pub text_color: String,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            background_color: "#f4f4f4".to_string(),
            content_background_color: "#ffffff".to_string(),
            content_width: "600px".to_string(),
            max_width: "600px".to_string(),
            padding: "20px".to_string(),
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            font_size: "16px".to_string(),
            line_height: "1.5".to_string(),
            text_color: "#333333".to_string(),
        }
    }
}
