//! # Email Template
//!
//! Root aggregate: the ordered forest of top-level components plus canvas
//! settings. This is the JSON value handed to persistence.

use crate::canvas::CanvasSettings;
use crate::component::EmailComponent;
use crate::error::ModelError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub components: Vec<EmailComponent>,

    #[serde(default)]
    pub canvas_settings: CanvasSettings,
}

impl EmailTemplate {
    pub fn new(components: Vec<EmailComponent>, canvas_settings: CanvasSettings) -> Self {
        Self {
            id: None,
            name: None,
            components,
            canvas_settings,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentKind;

    #[test]
    fn test_load_template_json() {
        let json = r##"{
            "name": "Welcome",
            "components": [
                { "id": "h-1", "type": "heading", "content": "Hi", "level": 1 },
                {
                    "id": "c-1",
                    "type": "column",
                    "columnWidths": ["50%", "50%"],
                    "children": [[{ "id": "b-1", "type": "button", "text": "Go", "href": "https://example.com" }], []],
                    "styles": { "gap": "10px" }
                }
            ],
            "canvasSettings": { "backgroundColor": "#eeeeee" }
        }"##;

        let template = EmailTemplate::from_json(json).unwrap();
        assert_eq!(template.name.as_deref(), Some("Welcome"));
        assert_eq!(template.components.len(), 2);
        assert_eq!(template.canvas_settings.background_color, "#eeeeee");

        match &template.components[1].kind {
            ComponentKind::Column { children, .. } => assert_eq!(children[0][0].id, "b-1"),
            other => panic!("Expected column, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = EmailTemplate::from_json(r#"{"components": [{"id": "x", "type": "marquee"}]}"#);
        assert!(matches!(result, Err(ModelError::Json(_))));
    }

    #[test]
    fn test_unknown_style_keys_do_not_reject_template() {
        let template = EmailTemplate::from_json(
            r#"{"components":[{"id":"t","type":"text","content":"x","styles":{"padding":"10px"}}]}"#,
        )
        .unwrap();

        assert_eq!(template.components[0].styles.get_extra("padding"), Some("10px"));
        let reloaded = EmailTemplate::from_json(&template.to_json_pretty().unwrap()).unwrap();
        assert_eq!(reloaded, template);
    }
}
