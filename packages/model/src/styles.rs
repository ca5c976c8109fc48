//! # Style Model
//!
//! The vocabulary of stylable properties, per-type defaults, and style
//! resolution (explicit override, then type default, then `""`).
//!
//! Values are free-form strings that already carry their unit. Nothing here
//! fails: missing data resolves to an empty string.

use crate::component::{ComponentType, EmailComponent};
use serde::de::{self, IntoDeserializer};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::warn;

/// A stylable property.
///
/// Declaration order is significant: `StyleMap` iterates in this order, which
/// keeps compiled inline styles stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleProperty {
    // Typography
    FontFamily,
    FontSize,
    FontWeight,
    FontStyle,
    LineHeight,
    LetterSpacing,
    TextAlign,
    TextDecoration,
    TextTransform,
    Color,
    BackgroundColor,

    // Layout sizing
    Display,
    Width,
    MaxWidth,
    Height,
    MinHeight,
    VerticalAlign,

    // Spacing
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,

    // Borders
    Border,
    BorderTop,
    BorderRight,
    BorderBottom,
    BorderLeft,
    BorderWidth,
    BorderStyle,
    BorderColor,
    BorderRadius,
    BoxShadow,

    // Layout containers
    Gap,

    // Lists
    ListStyleType,
    ListStylePosition,

    Opacity,
}

impl StyleProperty {
    /// Hyphenated CSS property name
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::FontFamily => "font-family",
            StyleProperty::FontSize => "font-size",
            StyleProperty::FontWeight => "font-weight",
            StyleProperty::FontStyle => "font-style",
            StyleProperty::LineHeight => "line-height",
            StyleProperty::LetterSpacing => "letter-spacing",
            StyleProperty::TextAlign => "text-align",
            StyleProperty::TextDecoration => "text-decoration",
            StyleProperty::TextTransform => "text-transform",
            StyleProperty::Color => "color",
            StyleProperty::BackgroundColor => "background-color",
            StyleProperty::Display => "display",
            StyleProperty::Width => "width",
            StyleProperty::MaxWidth => "max-width",
            StyleProperty::Height => "height",
            StyleProperty::MinHeight => "min-height",
            StyleProperty::VerticalAlign => "vertical-align",
            StyleProperty::PaddingTop => "padding-top",
            StyleProperty::PaddingRight => "padding-right",
            StyleProperty::PaddingBottom => "padding-bottom",
            StyleProperty::PaddingLeft => "padding-left",
            StyleProperty::MarginTop => "margin-top",
            StyleProperty::MarginRight => "margin-right",
            StyleProperty::MarginBottom => "margin-bottom",
            StyleProperty::MarginLeft => "margin-left",
            StyleProperty::Border => "border",
            StyleProperty::BorderTop => "border-top",
            StyleProperty::BorderRight => "border-right",
            StyleProperty::BorderBottom => "border-bottom",
            StyleProperty::BorderLeft => "border-left",
            StyleProperty::BorderWidth => "border-width",
            StyleProperty::BorderStyle => "border-style",
            StyleProperty::BorderColor => "border-color",
            StyleProperty::BorderRadius => "border-radius",
            StyleProperty::BoxShadow => "box-shadow",
            StyleProperty::Gap => "gap",
            StyleProperty::ListStyleType => "list-style-type",
            StyleProperty::ListStylePosition => "list-style-position",
            StyleProperty::Opacity => "opacity",
        }
    }

    /// Property for a camelCase style key, if it is part of the vocabulary
    pub fn from_key(key: &str) -> Option<Self> {
        let deserializer: de::value::StrDeserializer<'_, de::value::Error> = key.into_deserializer();
        StyleProperty::deserialize(deserializer).ok()
    }

    pub fn is_margin(self) -> bool {
        matches!(
            self,
            StyleProperty::MarginTop
                | StyleProperty::MarginRight
                | StyleProperty::MarginBottom
                | StyleProperty::MarginLeft
        )
    }
}

/// Partial record of style overrides, ordered by `StyleProperty`.
///
/// Keys outside the `StyleProperty` vocabulary (a `padding` shorthand, a
/// `textShadow`) are kept verbatim as extras so that hand-written templates
/// load and round-trip. Extras follow the known properties when iterated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    known: BTreeMap<StyleProperty, String>,
    extra: BTreeMap<String, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: StyleProperty, value: impl Into<String>) {
        self.known.insert(property, value.into());
    }

    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.known.get(&property).map(String::as_str)
    }

    /// Value if present and non-empty
    pub fn get_non_empty(&self, property: StyleProperty) -> Option<&str> {
        self.get(property).filter(|value| !value.is_empty())
    }

    pub fn remove(&mut self, property: StyleProperty) -> Option<String> {
        self.known.remove(&property)
    }

    /// Set a key by name. Known names land on their `StyleProperty`.
    pub fn set_raw(&mut self, key: &str, value: impl Into<String>) {
        match StyleProperty::from_key(key) {
            Some(property) => self.set(property, value),
            None => {
                self.extra.insert(key.to_string(), value.into());
            }
        }
    }

    pub fn get_extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.extra.is_empty()
    }

    pub fn len(&self) -> usize {
        self.known.len() + self.extra.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> {
        self.known
            .iter()
            .map(|(property, value)| (*property, value.as_str()))
    }

    /// Keys outside the vocabulary, as written
    pub fn extras(&self) -> impl Iterator<Item = (&str, &str)> {
        self.extra
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Every entry as `(css name, value)`, known properties first
    pub fn css_declarations(&self) -> impl Iterator<Item = (Cow<'static, str>, &str)> {
        self.iter()
            .map(|(property, value)| (Cow::Borrowed(property.css_name()), value))
            .chain(
                self.extras()
                    .map(|(key, value)| (Cow::Owned(css_property_name(key)), value)),
            )
    }

    /// Merge `patch` key by key. Keys absent from the patch are kept.
    pub fn merge(&mut self, patch: &StyleMap) {
        for (property, value) in patch.iter() {
            self.set(property, value);
        }
        for (key, value) in patch.extras() {
            self.extra.insert(key.to_string(), value.to_string());
        }
    }
}

impl FromIterator<(StyleProperty, String)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (StyleProperty, String)>>(iter: I) -> Self {
        Self {
            known: iter.into_iter().collect(),
            extra: BTreeMap::new(),
        }
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (property, value) in &self.known {
            map.serialize_entry(property, value)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut styles = StyleMap::new();

        for (key, value) in raw {
            let value = match value {
                serde_json::Value::String(value) => value,
                serde_json::Value::Number(number) => number.to_string(),
                serde_json::Value::Bool(flag) => flag.to_string(),
                serde_json::Value::Null => continue,
                other => {
                    warn!(key = %key, value = %other, "Ignoring non-scalar style value");
                    continue;
                }
            };
            styles.set_raw(&key, value);
        }

        Ok(styles)
    }
}

/// Hyphenated CSS name for a style key: `textShadow` becomes `text-shadow`,
/// already-hyphenated keys pass through lowercased
pub fn css_property_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if !name.is_empty() {
                name.push('-');
            }
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    name
}

/// Canonical default styles for a component type
pub fn default_styles(component_type: ComponentType) -> StyleMap {
    use StyleProperty::*;

    match component_type {
        ComponentType::Text => StyleMap::new()
            .with(FontSize, "16px")
            .with(LineHeight, "1.5")
            .with(Color, "#333333")
            .with(TextAlign, "left")
            .with(PaddingTop, "10px")
            .with(PaddingRight, "0px")
            .with(PaddingBottom, "10px")
            .with(PaddingLeft, "0px")
            .with(MarginTop, "0px")
            .with(MarginBottom, "0px"),
        ComponentType::Heading => StyleMap::new()
            .with(FontSize, "28px")
            .with(FontWeight, "bold")
            .with(LineHeight, "1.3")
            .with(Color, "#111111")
            .with(TextAlign, "left")
            .with(PaddingTop, "10px")
            .with(PaddingRight, "0px")
            .with(PaddingBottom, "10px")
            .with(PaddingLeft, "0px")
            .with(MarginTop, "0px")
            .with(MarginBottom, "0px"),
        ComponentType::Image => StyleMap::new()
            .with(Display, "block")
            .with(Width, "100%")
            .with(MaxWidth, "100%")
            .with(Height, "auto")
            .with(TextAlign, "center")
            .with(MarginTop, "0px")
            .with(MarginBottom, "0px")
            .with(Border, "0"),
        ComponentType::Button => StyleMap::new()
            .with(FontSize, "16px")
            .with(FontWeight, "bold")
            .with(TextAlign, "center")
            .with(TextDecoration, "none")
            .with(Color, "#ffffff")
            .with(BackgroundColor, "#007bff")
            .with(Display, "inline-block")
            .with(PaddingTop, "12px")
            .with(PaddingRight, "24px")
            .with(PaddingBottom, "12px")
            .with(PaddingLeft, "24px")
            .with(BorderRadius, "4px"),
        ComponentType::Divider => StyleMap::new()
            .with(Width, "100%")
            .with(MarginTop, "20px")
            .with(MarginBottom, "20px")
            .with(Border, "none")
            .with(BorderTop, "1px solid #e0e0e0"),
        ComponentType::Spacer => StyleMap::new().with(BackgroundColor, "transparent"),
        ComponentType::List => StyleMap::new()
            .with(FontSize, "16px")
            .with(LineHeight, "1.6")
            .with(Color, "#333333")
            .with(MarginTop, "10px")
            .with(MarginBottom, "10px")
            .with(PaddingLeft, "20px")
            .with(ListStylePosition, "outside"),
        ComponentType::Column => StyleMap::new().with(Width, "100%").with(Gap, "20px"),
        ComponentType::Container => StyleMap::new()
            .with(BackgroundColor, "transparent")
            .with(PaddingTop, "20px")
            .with(PaddingRight, "20px")
            .with(PaddingBottom, "20px")
            .with(PaddingLeft, "20px"),
    }
}

/// Effective value of `property` on `component`.
///
/// Explicit non-empty override first, then the type default, then `""`.
pub fn effective_style(component: &EmailComponent, property: StyleProperty) -> String {
    if let Some(value) = component.styles.get_non_empty(property) {
        return value.to_string();
    }

    default_styles(component.component_type())
        .get(property)
        .unwrap_or_default()
        .to_string()
}

/// Type defaults overlaid with the component's non-empty overrides
pub fn resolved_styles(component: &EmailComponent) -> StyleMap {
    let mut styles = default_styles(component.component_type());
    for (property, value) in component.styles.iter() {
        if !value.is_empty() {
            styles.set(property, value);
        }
    }
    for (key, value) in component.styles.extras() {
        if !value.is_empty() {
            styles.set_raw(key, value);
        }
    }
    styles
}
