//! Inline style serialization.

use mailcraft_model::StyleMap;

/// Join declarations into a `key: value; key: value` string.
///
/// Empty values and `transparent` are dropped. Values are attribute-escaped.
pub fn inline_style<'a>(declarations: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    declarations
        .into_iter()
        .filter(|(_, value)| is_emitted(value))
        .map(|(name, value)| format!("{}: {}", name, escape_html(value.trim())))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Inline string for a style map, in property order with CSS names
pub(crate) fn style_map_to_inline(styles: &StyleMap) -> String {
    let declarations: Vec<_> = styles.css_declarations().collect();
    inline_style(
        declarations
            .iter()
            .map(|(name, value)| (name.as_ref(), *value)),
    )
}

/// ` style="..."`, or nothing when there is no declaration to emit
pub(crate) fn style_attribute(inline: &str) -> String {
    if inline.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", inline)
    }
}

fn is_emitted(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "transparent" && value != "undefined"
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_model::StyleProperty;

    #[test]
    fn test_empty_and_transparent_are_dropped() {
        let styles = StyleMap::new()
            .with(StyleProperty::FontSize, "16px")
            .with(StyleProperty::Color, "")
            .with(StyleProperty::BackgroundColor, "transparent")
            .with(StyleProperty::TextAlign, "center");

        assert_eq!(
            style_map_to_inline(&styles),
            "font-size: 16px; text-align: center"
        );
    }

    #[test]
    fn test_unknown_keys_are_hyphenated() {
        let mut styles = StyleMap::new().with(StyleProperty::Color, "red");
        styles.set_raw("textShadow", "1px 1px #000");

        assert_eq!(
            style_map_to_inline(&styles),
            "color: red; text-shadow: 1px 1px #000"
        );
    }

    #[test]
    fn test_quotes_in_values_are_escaped() {
        let inline = inline_style([("font-family", "\"Open Sans\", Arial")]);
        assert_eq!(inline, "font-family: &quot;Open Sans&quot;, Arial");
    }

    #[test]
    fn test_no_declarations_no_attribute() {
        assert_eq!(style_attribute(""), "");
        assert_eq!(style_attribute("color: red"), " style=\"color: red\"");
    }
}
