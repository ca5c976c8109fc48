use crate::{compile_html, compile_template, compile_with_options, CompileOptions};
use mailcraft_model::{
    CanvasSettings, ComponentKind, ComponentPreset, EmailComponent, EmailTemplate, ListType,
    SequentialIds, StyleMap, StyleProperty,
};
use pretty_assertions::assert_eq;

fn preset(name: &str, ids: &mut SequentialIds) -> EmailComponent {
    name.parse::<ComponentPreset>().unwrap().build(ids)
}

fn compile(components: &[EmailComponent]) -> String {
    compile_html(components, &CanvasSettings::default())
}

fn line_containing<'a>(html: &'a str, needle: &str) -> &'a str {
    html.lines()
        .find(|line| line.contains(needle))
        .unwrap_or_else(|| panic!("no line containing {:?} in\n{}", needle, html))
        .trim()
}

#[test]
fn test_document_skeleton() {
    let html = compile(&[]);

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>\n<html>\n"));
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.contains("<title>Email</title>"));
    assert!(html.contains("<body style=\"margin: 0; padding: 0; background-color: #f4f4f4\">"));
    assert!(html.contains("<td align=\"center\" style=\"padding: 20px\">"));
    assert!(html.contains("width=\"600\""));
    assert!(html.contains("max-width: 600px; background-color: #ffffff"));
    assert!(html.contains("font-family: Arial, Helvetica, sans-serif"));
    assert_eq!(html.matches("<table").count(), 2);
    assert!(html.ends_with("</html>\n"));
}

#[test]
fn test_canvas_settings_flow_into_skeleton() {
    let canvas = CanvasSettings {
        background_color: "#000000".to_string(),
        max_width: "640px".to_string(),
        content_width: "100%".to_string(),
        ..CanvasSettings::default()
    };
    let html = compile_html(&[], &canvas);

    assert!(html.contains("background-color: #000000"));
    assert!(html.contains("max-width: 640px"));
    assert!(html.contains("width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"width: 100%; max-width: 640px"));
}

#[test]
fn test_text_content_is_emitted_verbatim() {
    let text = EmailComponent::new(
        "t",
        ComponentKind::Text {
            content: "Hello <strong>world</strong>".to_string(),
        },
    );
    let html = compile(&[text]);

    assert_eq!(
        line_containing(&html, "<p"),
        "<p style=\"font-size: 16px; line-height: 1.5; text-align: left; color: #333333; padding-top: 10px; padding-right: 0px; padding-bottom: 10px; padding-left: 0px; margin-top: 0px; margin-bottom: 0px\">Hello <strong>world</strong></p>"
    );
}

#[test]
fn test_heading_level_selects_tag() {
    let heading = EmailComponent::new(
        "h",
        ComponentKind::Heading {
            content: "Welcome".to_string(),
            level: 3,
        },
    );
    let html = compile(&[heading]);

    assert!(html.contains(">Welcome</h3>"));
    assert!(line_containing(&html, "<h3").starts_with("<h3 style=\"font-size: 28px; font-weight: bold"));
}

#[test]
fn test_button_alignment_lives_on_wrapper() {
    let mut ids = SequentialIds::new("b");
    let button = preset("button", &mut ids);
    let html = compile(&[button]);

    assert!(html.contains("<div style=\"text-align: center\">"));

    let anchor = line_containing(&html, "<a ");
    assert!(anchor.starts_with("<a href=\"#\" target=\"_blank\" style=\""));
    assert!(!anchor.contains("text-align"));
    assert!(anchor.contains("background-color: #007bff"));
    assert!(anchor.ends_with(">Click Here</a>"));
}

#[test]
fn test_button_overrides_and_escaping() {
    let button = EmailComponent::new(
        "b",
        ComponentKind::Button {
            text: "Save <50%> & more".to_string(),
            href: "https://example.com/?a=1&b=2".to_string(),
        },
    )
    .with_styles(StyleMap::new().with(StyleProperty::TextAlign, "right"));
    let html = compile(&[button]);

    assert!(html.contains("<div style=\"text-align: right\">"));
    assert!(html.contains("href=\"https://example.com/?a=1&amp;b=2\""));
    assert!(html.contains(">Save &lt;50%&gt; &amp; more</a>"));
}

#[test]
fn test_image_alignment_becomes_margins() {
    let mut ids = SequentialIds::new("i");
    let image = preset("image", &mut ids);
    let html = compile(&[image]);

    assert!(html.contains("<div style=\"text-align: center; margin-top: 0px; margin-bottom: 0px\">"));

    let img = line_containing(&html, "<img");
    assert_eq!(
        img,
        "<img src=\"https://via.placeholder.com/600x200?text=Image\" alt=\"Image\" style=\"display: block; width: 100%; max-width: 100%; height: auto; margin-right: auto; margin-left: auto; border: 0\" />"
    );
}

#[test]
fn test_left_aligned_inline_image_keeps_no_auto_margins() {
    let left = EmailComponent::new(
        "l",
        ComponentKind::Image {
            src: "a.png".to_string(),
            alt: "\"quoted\"".to_string(),
        },
    )
    .with_styles(StyleMap::new().with(StyleProperty::TextAlign, "left"));
    let html = compile(&[left]);
    let img = line_containing(&html, "<img");
    assert!(img.contains("alt=\"&quot;quoted&quot;\""));
    assert!(img.contains("margin-right: auto; margin-left: 0"));

    let inline = EmailComponent::new(
        "n",
        ComponentKind::Image {
            src: "b.png".to_string(),
            alt: String::new(),
        },
    )
    .with_styles(StyleMap::new().with(StyleProperty::Display, "inline"));
    let html = compile(&[inline]);
    let img = line_containing(&html, "<img");
    assert!(!img.contains("margin-left"));
    assert!(!img.contains("text-align"));
}

#[test]
fn test_divider_and_spacer() {
    let mut ids = SequentialIds::new("d");
    let html = compile(&[preset("divider", &mut ids), preset("spacer", &mut ids)]);

    assert_eq!(
        line_containing(&html, "<hr"),
        "<hr style=\"width: 100%; margin-top: 20px; margin-bottom: 20px; border: none; border-top: 1px solid #e0e0e0\" />"
    );
    assert_eq!(
        line_containing(&html, "line-height: 20px; height"),
        "<div style=\"line-height: 20px; height: 20px\"></div>"
    );
}

#[test]
fn test_list_marker_defaults_by_kind() {
    let ordered = EmailComponent::new(
        "o",
        ComponentKind::List {
            list_type: ListType::Ol,
            items: vec!["One".to_string(), "<Two>".to_string()],
        },
    );
    let squares = EmailComponent::new(
        "u",
        ComponentKind::List {
            list_type: ListType::Ul,
            items: vec!["Dot".to_string()],
        },
    )
    .with_styles(StyleMap::new().with(StyleProperty::ListStyleType, "square"));

    let html = compile(&[ordered, squares]);

    assert!(line_containing(&html, "<ol").contains("list-style-type: decimal"));
    assert!(html.contains("<li>&lt;Two&gt;</li>"));
    assert!(line_containing(&html, "<ul").contains("list-style-type: square"));
    assert!(!html.contains("list-style-type: disc"));
}

#[test]
fn test_container_nests_children() {
    let child = EmailComponent::new(
        "t",
        ComponentKind::Text {
            content: "Inside".to_string(),
        },
    );
    let container = EmailComponent::new(
        "c",
        ComponentKind::Container {
            children: vec![child],
        },
    )
    .with_styles(StyleMap::new().with(StyleProperty::BackgroundColor, "#fafafa"));
    let html = compile(&[container]);

    let open = html.find("background-color: #fafafa").unwrap();
    let inner = html.find(">Inside</p>").unwrap();
    assert!(open < inner);
    // transparent default is not emitted
    assert!(!html.contains("transparent"));
}

#[test]
fn test_columns_render_as_table_cells() {
    let mut ids = SequentialIds::new("c");
    let mut columns = preset("column3", &mut ids);
    let button = preset("button", &mut ids);
    if let ComponentKind::Column { children, .. } = &mut columns.kind {
        children[1].push(button);
    }
    let html = compile(&[columns]);

    assert!(html.contains(
        "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"20\" border=\"0\" style=\"width: 100%\">"
    ));
    assert_eq!(
        html.matches("<td width=\"33.33%\" valign=\"top\" style=\"width: 33.33%; vertical-align: top\">")
            .count(),
        3
    );
    assert!(!html.contains("gap"));

    // the button sits in the second cell
    let cells: Vec<&str> = html.split("<td width=").collect();
    assert!(!cells[1].contains("Click Here"));
    assert!(cells[2].contains("Click Here"));
    assert!(!cells[3].contains("Click Here"));
}

#[test]
fn test_short_column_lists_render_empty_cells() {
    let columns = EmailComponent::new(
        "c",
        ComponentKind::Column {
            column_widths: vec!["200px".to_string(), "400px".to_string()],
            children: vec![],
        },
    )
    .with_styles(StyleMap::new().with(StyleProperty::Gap, "12.6px"));
    let html = compile(&[columns]);

    assert!(html.contains("cellspacing=\"13\""));
    assert!(html.contains("<td width=\"200\" valign=\"top\" style=\"width: 200px; vertical-align: top\">"));
    assert!(html.contains("<td width=\"400\" valign=\"top\""));
}

#[test]
fn test_compact_output() {
    let mut ids = SequentialIds::new("x");
    let html = compile_with_options(
        &[preset("divider", &mut ids)],
        &CanvasSettings::default(),
        CompileOptions {
            pretty: false,
            ..CompileOptions::default()
        },
    );

    assert!(!html.contains('\n'));
    assert!(html.starts_with("<!DOCTYPE html><html><head>"));
    assert!(html.contains("<td><hr style="));
}

#[test]
fn test_template_name_becomes_title() {
    let mut template = EmailTemplate::new(vec![], CanvasSettings::default());
    template.name = Some("Spring <Sale>".to_string());

    let html = compile_template(&template, CompileOptions::default());
    assert!(html.contains("<title>Spring &lt;Sale&gt;</title>"));

    template.name = Some("  ".to_string());
    let html = compile_template(&template, CompileOptions::default());
    assert!(html.contains("<title>Email</title>"));
}

#[test]
fn test_compilation_is_deterministic() {
    let mut ids = SequentialIds::new("d");
    let tree: Vec<EmailComponent> = ["heading", "text", "image", "button", "list", "column4", "container"]
        .iter()
        .map(|name| preset(name, &mut ids))
        .collect();

    let canvas = CanvasSettings::default();
    assert_eq!(compile_html(&tree, &canvas), compile_html(&tree, &canvas));
}

#[test]
fn test_json_template_compiles() {
    let template: EmailTemplate = serde_json::from_str(
        r##"{
            "name": "Welcome",
            "components": [
                {"id": "h", "type": "heading", "content": "Hi there", "level": 1, "styles": {"color": "#222222"}},
                {"id": "b", "type": "button", "text": "Go", "href": "https://example.com", "styles": {}}
            ],
            "canvasSettings": {"maxWidth": "700px"}
        }"##,
    )
    .unwrap();

    let html = compile_template(&template, CompileOptions::default());
    assert!(html.contains("<title>Welcome</title>"));
    assert!(html.contains("color: #222222"));
    assert!(html.contains(">Hi there</h1>"));
    assert!(html.contains("href=\"https://example.com\""));
    assert!(html.contains("max-width: 700px"));
}

#[test]
fn test_unknown_style_keys_are_emitted() {
    let template = EmailTemplate::from_json(
        r#"{"components":[{"id":"t","type":"text","content":"x","styles":{"padding":"10px","textShadow":"1px 1px #000"}}]}"#,
    )
    .unwrap();

    let html = compile_template(&template, CompileOptions::default());
    let paragraph = line_containing(&html, "<p");
    assert!(paragraph.ends_with("margin-bottom: 0px; padding: 10px; text-shadow: 1px 1px #000\">x</p>"));
}

#[test]
fn test_non_numeric_widths_omit_the_attribute() {
    let columns = EmailComponent::new(
        "c",
        ComponentKind::Column {
            column_widths: vec!["auto".to_string(), "50%".to_string()],
            children: vec![vec![], vec![]],
        },
    );
    let canvas = CanvasSettings {
        content_width: "auto".to_string(),
        ..CanvasSettings::default()
    };
    let html = compile_html(&[columns], &canvas);

    assert!(html.contains("<td valign=\"top\" style=\"width: auto; vertical-align: top\">"));
    assert!(html.contains("<td width=\"50%\" valign=\"top\""));
    assert!(!html.contains("width=\"0"));
    assert!(html.contains(
        "<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"width: 100%; max-width: 600px"
    ));
}
