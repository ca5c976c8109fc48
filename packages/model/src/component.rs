//! # Email Components
//!
//! The component tree is a tagged union discriminated by `type`. Containers
//! own a single `children` list; columns own one list per column, index
//! aligned with `columnWidths`.

use crate::error::ModelError;
use crate::id_generator::IdSource;
use crate::styles::{default_styles, StyleMap};
use crate::units::format_value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One node of the component tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailComponent {
    /// Unique within a template, never changes after creation
    pub id: String,

    /// Explicit style overrides
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub styles: StyleMap,

    #[serde(flatten)]
    pub kind: ComponentKind,
}

/// Variant payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentKind {
    Text {
        content: String,
    },
    Heading {
        content: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    Image {
        src: String,
        #[serde(default)]
        alt: String,
    },
    Button {
        text: String,
        #[serde(default = "default_href")]
        href: String,
    },
    Divider,
    Spacer {
        height: String,
    },
    #[serde(rename_all = "camelCase")]
    List {
        #[serde(default)]
        list_type: ListType,
        #[serde(default)]
        items: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Column {
        column_widths: Vec<String>,
        #[serde(default)]
        children: Vec<Vec<EmailComponent>>,
    },
    Container {
        #[serde(default)]
        children: Vec<EmailComponent>,
    },
}

fn default_heading_level() -> u8 {
    2
}

fn default_href() -> String {
    "#".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Ul,
    Ol,
}

impl ListType {
    pub fn tag(self) -> &'static str {
        match self {
            ListType::Ul => "ul",
            ListType::Ol => "ol",
        }
    }

    /// `list-style-type` used when the component does not override it
    pub fn default_marker(self) -> &'static str {
        match self {
            ListType::Ul => "disc",
            ListType::Ol => "decimal",
        }
    }
}

/// Payload-free discriminant of `ComponentKind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Text,
    Heading,
    Image,
    Button,
    Divider,
    Spacer,
    List,
    Column,
    Container,
}

impl ComponentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Text => "text",
            ComponentType::Heading => "heading",
            ComponentType::Image => "image",
            ComponentType::Button => "button",
            ComponentType::Divider => "divider",
            ComponentType::Spacer => "spacer",
            ComponentType::List => "list",
            ComponentType::Column => "column",
            ComponentType::Container => "container",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EmailComponent {
    pub fn new(id: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            styles: StyleMap::new(),
            kind,
        }
    }

    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = styles;
        self
    }

    pub fn component_type(&self) -> ComponentType {
        match &self.kind {
            ComponentKind::Text { .. } => ComponentType::Text,
            ComponentKind::Heading { .. } => ComponentType::Heading,
            ComponentKind::Image { .. } => ComponentType::Image,
            ComponentKind::Button { .. } => ComponentType::Button,
            ComponentKind::Divider => ComponentType::Divider,
            ComponentKind::Spacer { .. } => ComponentType::Spacer,
            ComponentKind::List { .. } => ComponentType::List,
            ComponentKind::Column { .. } => ComponentType::Column,
            ComponentKind::Container { .. } => ComponentType::Container,
        }
    }

    /// Whether other components can be placed inside this one
    pub fn accepts_children(&self) -> bool {
        matches!(
            self.kind,
            ComponentKind::Column { .. } | ComponentKind::Container { .. }
        )
    }

    /// Number of nodes in this subtree, including `self`
    pub fn subtree_size(&self) -> usize {
        1 + match &self.kind {
            ComponentKind::Container { children } => {
                children.iter().map(EmailComponent::subtree_size).sum()
            }
            ComponentKind::Column { children, .. } => children
                .iter()
                .flatten()
                .map(EmailComponent::subtree_size)
                .sum(),
            _ => 0,
        }
    }
}

/// What an "add component" request may name.
///
/// `column2`..`column4` are column layouts with equal-width columns;
/// plain `column` is the two-column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentPreset {
    Basic(ComponentType),
    Columns(usize),
}

impl FromStr for ComponentPreset {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let preset = match s {
            "text" => ComponentPreset::Basic(ComponentType::Text),
            "heading" => ComponentPreset::Basic(ComponentType::Heading),
            "image" => ComponentPreset::Basic(ComponentType::Image),
            "button" => ComponentPreset::Basic(ComponentType::Button),
            "divider" => ComponentPreset::Basic(ComponentType::Divider),
            "spacer" => ComponentPreset::Basic(ComponentType::Spacer),
            "list" => ComponentPreset::Basic(ComponentType::List),
            "container" => ComponentPreset::Basic(ComponentType::Container),
            "column" | "column2" => ComponentPreset::Columns(2),
            "column3" => ComponentPreset::Columns(3),
            "column4" => ComponentPreset::Columns(4),
            other => return Err(ModelError::UnknownComponentType(other.to_string())),
        };
        Ok(preset)
    }
}

impl ComponentPreset {
    pub fn component_type(self) -> ComponentType {
        match self {
            ComponentPreset::Basic(component_type) => component_type,
            ComponentPreset::Columns(_) => ComponentType::Column,
        }
    }

    /// Build a fresh node carrying the type's default payload and styles
    pub fn build(self, ids: &mut dyn IdSource) -> EmailComponent {
        let kind = match self {
            ComponentPreset::Basic(ComponentType::Column) => column_kind(2),
            ComponentPreset::Basic(component_type) => default_kind(component_type),
            ComponentPreset::Columns(count) => column_kind(count.max(1)),
        };

        EmailComponent {
            id: ids.new_id(),
            styles: default_styles(self.component_type()),
            kind,
        }
    }
}

fn default_kind(component_type: ComponentType) -> ComponentKind {
    match component_type {
        ComponentType::Text => ComponentKind::Text {
            content: "Add your text here...".to_string(),
        },
        ComponentType::Heading => ComponentKind::Heading {
            content: "Your Heading Here".to_string(),
            level: default_heading_level(),
        },
        ComponentType::Image => ComponentKind::Image {
            src: "https://via.placeholder.com/600x200?text=Image".to_string(),
            alt: "Image".to_string(),
        },
        ComponentType::Button => ComponentKind::Button {
            text: "Click Here".to_string(),
            href: default_href(),
        },
        ComponentType::Divider => ComponentKind::Divider,
        ComponentType::Spacer => ComponentKind::Spacer {
            height: "20px".to_string(),
        },
        ComponentType::List => ComponentKind::List {
            list_type: ListType::Ul,
            items: vec![
                "List item 1".to_string(),
                "List item 2".to_string(),
                "List item 3".to_string(),
            ],
        },
        ComponentType::Column => column_kind(2),
        ComponentType::Container => ComponentKind::Container {
            children: Vec::new(),
        },
    }
}

fn column_kind(count: usize) -> ComponentKind {
    let width = format!("{}%", format_value(100.0 / count as f64));
    ComponentKind::Column {
        column_widths: vec![width; count],
        children: vec![Vec::new(); count],
    }
}
