//! Unified spacing control.
//!
//! Presents the four sides of `padding` or `margin` as one value while they
//! agree. Sides equal to `"0px"` are ignored when checking agreement, so a
//! component with nothing set reads as unified.
//!
//! Every write produces one `StyleMap` patch. Switching back to unified mode
//! writes all four sides in that single patch, never side by side.

use mailcraft_model::{effective_style, parse_value, EmailComponent, StyleMap, StyleProperty, UnitPolicy};

const ZERO: &str = "0px";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpacingGroup {
    Padding,
    Margin,
}

impl SpacingGroup {
    /// Properties in top, right, bottom, left order
    pub fn properties(self) -> [StyleProperty; 4] {
        match self {
            SpacingGroup::Padding => [
                StyleProperty::PaddingTop,
                StyleProperty::PaddingRight,
                StyleProperty::PaddingBottom,
                StyleProperty::PaddingLeft,
            ],
            SpacingGroup::Margin => [
                StyleProperty::MarginTop,
                StyleProperty::MarginRight,
                StyleProperty::MarginBottom,
                StyleProperty::MarginLeft,
            ],
        }
    }

    pub fn property(self, side: SpacingSide) -> StyleProperty {
        self.properties()[side as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingSide {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingMode {
    Unified,
    Advanced,
}

/// Effective side values of `group`, unset sides read as `"0px"`
pub fn read_spacing(component: &EmailComponent, group: SpacingGroup) -> [String; 4] {
    group.properties().map(|property| {
        let value = effective_style(component, property);
        if value.is_empty() {
            ZERO.to_string()
        } else {
            value
        }
    })
}

/// The shared value when all non-zero sides agree.
///
/// Sides are compared after normalization, so `"10"`, `"10px"` and
/// `"10.0px"` agree.
pub fn unified_value(sides: &[String; 4]) -> Option<String> {
    let normalized = sides.each_ref().map(|value| normalize(value));
    let mut non_zero = normalized.iter().filter(|value| value.as_str() != ZERO);
    let Some(first) = non_zero.next() else {
        return Some(ZERO.to_string());
    };

    non_zero
        .all(|value| value == first)
        .then(|| first.clone())
}

/// One patch writing `value` to all four sides
pub fn unified_patch(group: SpacingGroup, value: &str) -> StyleMap {
    let value = normalize(value);
    group
        .properties()
        .into_iter()
        .map(|property| (property, value.clone()))
        .collect()
}

/// One patch writing a single side
pub fn side_patch(group: SpacingGroup, side: SpacingSide, value: &str) -> StyleMap {
    StyleMap::new().with(group.property(side), normalize(value))
}

/// Bare numbers become pixels, malformed input becomes `0px`
fn normalize(value: &str) -> String {
    parse_value(value, &UnitPolicy::SPACING).to_string()
}

/// Mode state for one spacing control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingControl {
    pub group: SpacingGroup,
    pub mode: SpacingMode,
}

impl SpacingControl {
    /// Opens unified when the component's sides agree, advanced otherwise
    pub fn for_component(component: &EmailComponent, group: SpacingGroup) -> Self {
        let mode = match unified_value(&read_spacing(component, group)) {
            Some(_) => SpacingMode::Unified,
            None => SpacingMode::Advanced,
        };
        Self { group, mode }
    }

    /// Value shown in unified mode
    pub fn display_value(&self, component: &EmailComponent) -> Option<String> {
        unified_value(&read_spacing(component, self.group))
    }

    /// Flip the mode.
    ///
    /// Returning to unified yields the patch that writes the representative
    /// value (the top side, or `"0px"`) to every side.
    pub fn toggle(&mut self, component: &EmailComponent) -> Option<StyleMap> {
        match self.mode {
            SpacingMode::Unified => {
                self.mode = SpacingMode::Advanced;
                None
            }
            SpacingMode::Advanced => {
                self.mode = SpacingMode::Unified;
                let [top, ..] = read_spacing(component, self.group);
                Some(unified_patch(self.group, &top))
            }
        }
    }

    /// Patch for an edit made through the unified input
    pub fn set_all(&self, value: &str) -> StyleMap {
        unified_patch(self.group, value)
    }

    /// Patch for an edit made through one side's input
    pub fn set_side(&self, side: SpacingSide, value: &str) -> StyleMap {
        side_patch(self.group, side, value)
    }
}
