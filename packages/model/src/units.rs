//! # Unit-Aware Values
//!
//! Splits a style string such as `"16px"` into magnitude and unit for the
//! numeric editing controls, and joins them back.
//!
//! Unit policy is per control: each call site passes the units it accepts
//! and the unit to use when the value carries none. `"50%"` is a fine column
//! width but not a letter spacing.

use std::fmt;

/// Units a control accepts, plus its fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPolicy {
    /// Accepted units. `""` means unitless.
    pub allowed: &'static [&'static str],
    pub default_unit: &'static str,
}

impl UnitPolicy {
    pub const SPACING: UnitPolicy = UnitPolicy {
        allowed: &["px"],
        default_unit: "px",
    };

    pub const FONT_SIZE: UnitPolicy = UnitPolicy {
        allowed: &["px", "em", "rem"],
        default_unit: "px",
    };

    pub const SIZE: UnitPolicy = UnitPolicy {
        allowed: &["px", "%"],
        default_unit: "px",
    };

    pub const PERCENT_SIZE: UnitPolicy = UnitPolicy {
        allowed: &["%", "px"],
        default_unit: "%",
    };

    pub const LINE_HEIGHT: UnitPolicy = UnitPolicy {
        allowed: &["", "px", "%"],
        default_unit: "",
    };

    pub const LETTER_SPACING: UnitPolicy = UnitPolicy {
        allowed: &["px", "em"],
        default_unit: "px",
    };

    pub fn accepts(&self, unit: &str) -> bool {
        self.allowed.contains(&unit)
    }

    fn fallback_unit(&self) -> &'static str {
        self.allowed.first().copied().unwrap_or(self.default_unit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedValue {
    pub magnitude: f64,
    pub unit: String,
}

impl ParsedValue {
    pub fn new(magnitude: f64, unit: impl Into<String>) -> Self {
        Self {
            magnitude,
            unit: unit.into(),
        }
    }

    fn zero(policy: &UnitPolicy) -> Self {
        Self::new(0.0, policy.default_unit)
    }
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_value(self.magnitude), self.unit)
    }
}

/// Parse `value` under `policy`. Never fails: malformed input yields zero
/// in the policy's default unit.
pub fn parse_value(value: &str, policy: &UnitPolicy) -> ParsedValue {
    try_parse_value(value, policy).unwrap_or_else(|| ParsedValue::zero(policy))
}

/// Like `parse_value`, but `None` when `value` carries no number
/// (`""`, `"auto"`, `"none"`).
pub fn try_parse_value(value: &str, policy: &UnitPolicy) -> Option<ParsedValue> {
    let (number, unit) = split_number(value.trim())?;
    let magnitude = number.parse::<f64>().ok()?;

    let unit = unit.trim().to_ascii_lowercase();
    let unit = if policy.accepts(&unit) {
        unit
    } else {
        policy.fallback_unit().to_string()
    };

    Some(ParsedValue::new(magnitude, unit))
}

/// Leading `[+-]digits[.digits]` and the remainder
fn split_number(value: &str) -> Option<(&str, &str)> {
    let bytes = value.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let mut digits = 0;
    let mut seen_dot = false;
    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if digits == 0 {
        return None;
    }

    Some(value.split_at(end))
}

/// Format a magnitude without trailing zeros (`16`, `1.5`, `33.33`)
pub fn format_value(magnitude: f64) -> String {
    if !magnitude.is_finite() {
        return "0".to_string();
    }

    let formatted = format!("{:.2}", magnitude);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
