//! Partial updates for a single component.
//!
//! Fields merge shallowly into the node; fields that do not belong to the
//! node's variant are ignored. `styles` merges per key, so patching `color`
//! keeps every other override.

use crate::tree::backfill_columns;
use mailcraft_model::{ComponentKind, EmailComponent, ListType, StyleMap, StyleProperty};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_type: Option<ListType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

impl ComponentPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn styles(styles: StyleMap) -> Self {
        Self {
            styles: Some(styles),
            ..Self::default()
        }
    }

    pub fn style(property: StyleProperty, value: impl Into<String>) -> Self {
        Self::styles(StyleMap::new().with(property, value))
    }

    pub fn column_widths(widths: Vec<String>) -> Self {
        Self {
            column_widths: Some(widths),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `component` in place
    pub fn apply_to(&self, component: &mut EmailComponent) {
        if let Some(styles) = &self.styles {
            component.styles.merge(styles);
        }

        match &mut component.kind {
            ComponentKind::Text { content } => {
                set(content, &self.content);
            }
            ComponentKind::Heading { content, level } => {
                set(content, &self.content);
                if let Some(new_level) = self.level {
                    *level = new_level.clamp(1, 6);
                }
            }
            ComponentKind::Image { src, alt } => {
                set(src, &self.src);
                set(alt, &self.alt);
            }
            ComponentKind::Button { text, href } => {
                set(text, &self.text);
                set(href, &self.href);
            }
            ComponentKind::Spacer { height } => {
                set(height, &self.height);
            }
            ComponentKind::List { list_type, items } => {
                if let Some(new_type) = self.list_type {
                    *list_type = new_type;
                }
                set(items, &self.items);
            }
            ComponentKind::Column {
                column_widths,
                children,
            } => {
                if let Some(widths) = &self.column_widths {
                    *column_widths = widths.clone();
                    backfill_columns(children, column_widths.len());
                }
            }
            ComponentKind::Divider | ComponentKind::Container { .. } => {}
        }
    }
}

fn set<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}
