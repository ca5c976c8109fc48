use crate::context::{CompileOptions, Context};
use crate::inline::{escape_html, inline_style, style_attribute, style_map_to_inline};
use mailcraft_model::{
    format_value, parse_value, resolved_styles, try_parse_value, CanvasSettings, ComponentKind,
    EmailComponent, EmailTemplate, ListType, StyleMap, StyleProperty, UnitPolicy,
};
use tracing::{debug, instrument};

/// Compile a component tree to an HTML document with default options
pub fn compile_html(components: &[EmailComponent], canvas: &CanvasSettings) -> String {
    compile_with_options(components, canvas, CompileOptions::default())
}

/// Compile a whole template. Its name, when set, becomes the document title.
pub fn compile_template(template: &EmailTemplate, options: CompileOptions) -> String {
    let options = match template.name.as_deref() {
        Some(name) if !name.trim().is_empty() => CompileOptions {
            title: name.to_string(),
            ..options
        },
        _ => options,
    };
    compile_with_options(&template.components, &template.canvas_settings, options)
}

#[instrument(skip_all, fields(components = components.len(), pretty = options.pretty))]
pub fn compile_with_options(
    components: &[EmailComponent],
    canvas: &CanvasSettings,
    options: CompileOptions,
) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(&mut ctx);

    let body_style = inline_style([
        ("margin", "0"),
        ("padding", "0"),
        ("background-color", canvas.background_color.as_str()),
    ]);
    ctx.block(
        &format!("<body{}>", style_attribute(&body_style)),
        "</body>",
        |ctx| compile_skeleton(components, canvas, ctx),
    );

    ctx.dedent();
    ctx.add_line("</html>");

    let html = ctx.get_output();
    debug!(bytes = html.len(), "Compiled email HTML");
    html
}

fn compile_head(ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line("<meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">");
    let title = format!("<title>{}</title>", escape_html(&ctx.options().title));
    ctx.add_line(&title);

    ctx.dedent();
    ctx.add_line("</head>");
}

/// Outer full-width table, centered padded cell, inner content table
fn compile_skeleton(components: &[EmailComponent], canvas: &CanvasSettings, ctx: &mut Context) {
    let outer_style = inline_style([("background-color", canvas.background_color.as_str())]);
    let cell_style = inline_style([("padding", canvas.padding.as_str())]);
    let inner_style = inline_style([
        ("width", "100%"),
        ("max-width", canvas.max_width.as_str()),
        ("background-color", canvas.content_background_color.as_str()),
        ("font-family", canvas.font_family.as_str()),
        ("font-size", canvas.font_size.as_str()),
        ("line-height", canvas.line_height.as_str()),
        ("color", canvas.text_color.as_str()),
    ]);

    ctx.block(
        &format!(
            "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\"{}>",
            style_attribute(&outer_style)
        ),
        "</table>",
        |ctx| {
            ctx.block("<tr>", "</tr>", |ctx| {
                ctx.block(
                    &format!("<td align=\"center\"{}>", style_attribute(&cell_style)),
                    "</td>",
                    |ctx| {
                        ctx.block(
                            &format!(
                                "<table role=\"presentation\"{} cellpadding=\"0\" cellspacing=\"0\" border=\"0\"{}>",
                                width_attribute(&canvas.content_width, &UnitPolicy::SIZE),
                                style_attribute(&inner_style)
                            ),
                            "</table>",
                            |ctx| {
                                ctx.block("<tr>", "</tr>", |ctx| {
                                    ctx.block("<td>", "</td>", |ctx| {
                                        compile_components(components, ctx)
                                    })
                                })
                            },
                        )
                    },
                )
            })
        },
    );
}

fn compile_components(components: &[EmailComponent], ctx: &mut Context) {
    for component in components {
        compile_component(component, ctx);
    }
}

fn compile_component(component: &EmailComponent, ctx: &mut Context) {
    let styles = resolved_styles(component);

    match &component.kind {
        ComponentKind::Text { content } => {
            let style = style_attribute(&style_map_to_inline(&styles));
            ctx.add_line(&format!("<p{}>{}</p>", style, content));
        }

        ComponentKind::Heading { content, level } => {
            let level = (*level).clamp(1, 6);
            let style = style_attribute(&style_map_to_inline(&styles));
            ctx.add_line(&format!("<h{}{}>{}</h{}>", level, style, content, level));
        }

        ComponentKind::Image { src, alt } => compile_image(src, alt, styles, ctx),

        ComponentKind::Button { text, href } => compile_button(text, href, styles, ctx),

        ComponentKind::Divider => {
            let style = style_attribute(&style_map_to_inline(&styles));
            ctx.add_line(&format!("<hr{} />", style));
        }

        ComponentKind::Spacer { height } => {
            let mut styles = styles;
            let height = if height.trim().is_empty() {
                "0px"
            } else {
                height.as_str()
            };
            styles.set(StyleProperty::Height, height);
            styles.set(StyleProperty::LineHeight, height);
            let style = style_attribute(&style_map_to_inline(&styles));
            ctx.add_line(&format!("<div{}></div>", style));
        }

        ComponentKind::List { list_type, items } => compile_list(*list_type, items, styles, ctx),

        ComponentKind::Container { children } => {
            let style = style_attribute(&style_map_to_inline(&styles));
            ctx.block(&format!("<div{}>", style), "</div>", |ctx| {
                compile_components(children, ctx)
            });
        }

        ComponentKind::Column {
            column_widths,
            children,
        } => compile_columns(column_widths, children, styles, ctx),
    }
}

fn compile_image(src: &str, alt: &str, styles: StyleMap, ctx: &mut Context) {
    let alignment = styles
        .get_non_empty(StyleProperty::TextAlign)
        .unwrap_or("center")
        .to_string();

    let mut wrapper = StyleMap::new().with(StyleProperty::TextAlign, alignment.as_str());
    let mut image = StyleMap::new();
    for (property, value) in styles.iter() {
        if property.is_margin() {
            wrapper.set(property, value);
        } else if property != StyleProperty::TextAlign {
            image.set(property, value);
        }
    }
    for (key, value) in styles.extras() {
        image.set_raw(key, value);
    }

    if image.get(StyleProperty::Display) == Some("block") {
        let (left, right) = match alignment.as_str() {
            "left" => ("0", "auto"),
            "right" => ("auto", "0"),
            _ => ("auto", "auto"),
        };
        image.set(StyleProperty::MarginLeft, left);
        image.set(StyleProperty::MarginRight, right);
    }

    let wrapper_style = style_attribute(&style_map_to_inline(&wrapper));
    ctx.block(&format!("<div{}>", wrapper_style), "</div>", |ctx| {
        ctx.add_line(&format!(
            "<img src=\"{}\" alt=\"{}\"{} />",
            escape_html(src),
            escape_html(alt),
            style_attribute(&style_map_to_inline(&image))
        ));
    });
}

fn compile_button(text: &str, href: &str, mut styles: StyleMap, ctx: &mut Context) {
    let alignment = styles
        .remove(StyleProperty::TextAlign)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "center".to_string());

    let wrapper_style = inline_style([("text-align", alignment.as_str())]);
    ctx.block(
        &format!("<div{}>", style_attribute(&wrapper_style)),
        "</div>",
        |ctx| {
            ctx.add_line(&format!(
                "<a href=\"{}\" target=\"_blank\"{}>{}</a>",
                escape_html(href),
                style_attribute(&style_map_to_inline(&styles)),
                escape_html(text)
            ));
        },
    );
}

fn compile_list(list_type: ListType, items: &[String], mut styles: StyleMap, ctx: &mut Context) {
    if styles.get_non_empty(StyleProperty::ListStyleType).is_none() {
        styles.set(StyleProperty::ListStyleType, list_type.default_marker());
    }

    let tag = list_type.tag();
    let style = style_attribute(&style_map_to_inline(&styles));
    ctx.block(&format!("<{}{}>", tag, style), &format!("</{}>", tag), |ctx| {
        for item in items {
            ctx.add_line(&format!("<li>{}</li>", escape_html(item)));
        }
    });
}

fn compile_columns(
    column_widths: &[String],
    children: &[Vec<EmailComponent>],
    mut styles: StyleMap,
    ctx: &mut Context,
) {
    let gap = styles
        .remove(StyleProperty::Gap)
        .map(|gap| parse_value(&gap, &UnitPolicy::SPACING).magnitude.max(0.0).round() as u32)
        .unwrap_or(0);

    let style = style_attribute(&style_map_to_inline(&styles));
    ctx.block(
        &format!(
            "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"{}\" border=\"0\"{}>",
            gap, style
        ),
        "</table>",
        |ctx| {
            ctx.block("<tr>", "</tr>", |ctx| {
                for (index, width) in column_widths.iter().enumerate() {
                    let cell_style =
                        inline_style([("width", width.as_str()), ("vertical-align", "top")]);
                    ctx.block(
                        &format!(
                            "<td{} valign=\"top\"{}>",
                            width_attribute(width, &UnitPolicy::PERCENT_SIZE),
                            style_attribute(&cell_style)
                        ),
                        "</td>",
                        |ctx| {
                            if let Some(column) = children.get(index) {
                                compile_components(column, ctx);
                            }
                        },
                    );
                }
            })
        },
    );
}

/// ` width="..."` in HTML attribute form: `"50%"` stays, `"600px"` becomes
/// `"600"`. Nothing when the value has no number, such as `"auto"`.
fn width_attribute(value: &str, policy: &UnitPolicy) -> String {
    let Some(parsed) = try_parse_value(value, policy) else {
        return String::new();
    };
    if parsed.unit == "%" {
        format!(" width=\"{}\"", parsed)
    } else {
        format!(" width=\"{}\"", format_value(parsed.magnitude))
    }
}
