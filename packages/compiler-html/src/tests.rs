use crate::{compile_page_to_html, render_node, CompileOptions, FragmentPolicy};
use folio_model::{CellAttrs, Mark, Node, NodeKind, Page, Section, TextAlign, VerticalAlign};
use serde_json::json;

fn node(value: serde_json::Value) -> Node {
    serde_json::from_value(value).expect("Failed to deserialize node")
}

#[test]
fn test_render_paragraph_with_marks() {
    let paragraph = node(json!({
        "type": "paragraph",
        "content": [
            { "type": "text", "text": "plain " },
            { "type": "text", "text": "bold", "marks": [{ "type": "bold" }] },
            { "type": "text", "text": " and " },
            {
                "type": "text",
                "text": "link",
                "marks": [
                    { "type": "italic" },
                    { "type": "link", "attrs": { "href": "https://example.com", "target": "_blank" } }
                ]
            }
        ]
    }));

    let html = render_node(&paragraph);
    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<p>"));
    assert!(html.contains("plain <strong>bold</strong> and "));
    // First mark is innermost
    assert!(html.contains(
        "<a href=\"https://example.com\" target=\"_blank\"><em>link</em></a>"
    ));
    assert!(html.ends_with("</p>"));
}

#[test]
fn test_render_preserves_repeated_spaces() {
    let html = render_node(&Node::paragraph(vec![Node::text("a  b c")]));
    println!("Generated HTML:\n{}", html);

    assert_eq!(html, "<p>a&nbsp;&nbsp;b c</p>");
}

#[test]
fn test_render_converts_non_breaking_spaces() {
    let html = render_node(&Node::paragraph(vec![Node::text("x\u{a0}y")]));

    assert_eq!(html, "<p>x&nbsp;y</p>");
}

#[test]
fn test_render_escapes_text() {
    let html = render_node(&Node::paragraph(vec![Node::text("<script>\"a\" & 'b'</script>")]));
    println!("Generated HTML:\n{}", html);

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"));
}

#[test]
fn test_render_alignment_skips_left() {
    let centered = node(json!({
        "type": "heading",
        "attrs": { "level": 3, "textAlign": "center" },
        "content": [{ "type": "text", "text": "Title" }]
    }));
    let left = node(json!({
        "type": "paragraph",
        "attrs": { "textAlign": "left" },
        "content": [{ "type": "text", "text": "body" }]
    }));

    assert_eq!(
        render_node(&centered),
        "<h3 style=\"text-align: center\">Title</h3>"
    );
    assert_eq!(render_node(&left), "<p>body</p>");
}

#[test]
fn test_render_lists() {
    let ordered = node(json!({
        "type": "orderedList",
        "attrs": { "start": 3 },
        "content": [{
            "type": "listItem",
            "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "third" }] }]
        }]
    }));

    let html = render_node(&ordered);
    println!("Generated HTML:\n{}", html);

    assert_eq!(html, "<ol start=\"3\"><li><p>third</p></li></ol>");
}

#[test]
fn test_render_task_items() {
    let tasks = node(json!({
        "type": "taskList",
        "content": [
            {
                "type": "taskItem",
                "attrs": { "checked": true },
                "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "done" }] }]
            },
            {
                "type": "taskItem",
                "attrs": { "checked": false },
                "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "todo" }] }]
            }
        ]
    }));

    let html = render_node(&tasks);
    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<ul data-type=\"taskList\">"));
    assert!(html.contains(
        "<li data-type=\"taskItem\" data-checked=\"true\"><label><input type=\"checkbox\" checked=\"checked\"/></label><div><p>done</p></div></li>"
    ));
    assert!(html.contains(
        "<li data-type=\"taskItem\" data-checked=\"false\"><label><input type=\"checkbox\"/></label><div><p>todo</p></div></li>"
    ));
}

#[test]
fn test_render_code_block() {
    let code = node(json!({
        "type": "codeBlock",
        "attrs": { "language": "rust" },
        "content": [
            { "type": "text", "text": "fn main() {" },
            { "type": "hardBreak" },
            { "type": "text", "text": "    1 < 2" },
            { "type": "text", "text": "}" }
        ]
    }));

    let html = render_node(&code);
    println!("Generated HTML:\n{}", html);

    assert_eq!(
        html,
        "<pre><code class=\"language-rust\">fn main() {\n    1 &lt; 2}</code></pre>"
    );
}

#[test]
fn test_render_breaks_and_rules() {
    let paragraph = Node::paragraph(vec![
        Node::text("one"),
        Node::new(NodeKind::HardBreak, vec![]),
        Node::text("two"),
    ]);

    assert_eq!(render_node(&paragraph), "<p>one<br/>two</p>");
    assert_eq!(
        render_node(&Node::new(NodeKind::HorizontalRule, vec![])),
        "<hr/>"
    );
}

#[test]
fn test_render_table_cells() {
    let header = Node::new(
        NodeKind::TableHeader(CellAttrs {
            colspan: 2,
            colwidth: Some(vec![120, 80]),
            ..CellAttrs::default()
        }),
        vec![Node::paragraph(vec![Node::text("Name")])],
    );
    let cell = Node::new(
        NodeKind::TableCell(CellAttrs {
            background_color: Some("#ffeeee".to_string()),
            text_color: Some("red".to_string()),
            text_align: Some(TextAlign::Center),
            vertical_align: Some(VerticalAlign::Top),
            ..CellAttrs::default()
        }),
        vec![Node::paragraph(vec![Node::text("value")])],
    );
    let table = Node::table(vec![
        Node::table_row(vec![header]),
        Node::table_row(vec![cell]),
    ]);

    let html = render_node(&table);
    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<table><tr>"));
    assert!(!html.contains("<tbody>"));
    assert!(html.contains("<th colspan=\"2\" data-colwidth=\"120,80\"><p>Name</p></th>"));
    assert!(html.contains(
        "style=\"background-color: #ffeeee !important; color: red !important; text-align: center !important; vertical-align: top !important;\""
    ));
    assert!(html.contains("data-background-color=\"#ffeeee\""));
    assert!(html.contains("data-text-color=\"red\""));
    assert!(html.contains("data-text-align=\"center\""));
    assert!(html.contains("data-vertical-align=\"top\""));
    assert!(html.ends_with("</tr></table>"));
}

#[test]
fn test_render_highlight_and_scripts() {
    let text = Node::marked_text(
        "H2O",
        vec![
            Mark::Subscript,
            Mark::Highlight {
                color: Some("#ff0".to_string()),
            },
        ],
    );

    assert_eq!(
        render_node(&text),
        "<mark data-color=\"#ff0\" style=\"background-color: #ff0\"><sub>H2O</sub></mark>"
    );
}

#[test]
fn test_render_unknown_node_renders_children() {
    let callout = node(json!({
        "type": "callout",
        "attrs": { "tone": "warning" },
        "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "careful" }] }]
    }));

    assert_eq!(render_node(&callout), "<p>careful</p>");
}

#[test]
fn test_render_unknown_mark_has_no_wrapper() {
    let text = node(json!({
        "type": "text",
        "text": "plain",
        "marks": [{ "type": "comment", "attrs": { "id": "c1" } }]
    }));

    assert_eq!(render_node(&text), "plain");
}

fn guide_page() -> Page {
    Page::new(
        "Guide & Co",
        vec![
            Section::html("description", "", vec!["<p>Intro</p>".to_string()]),
            Section::html(
                "setup",
                "Setup",
                vec![
                    "<p>Install</p>".to_string(),
                    "<p></p>".to_string(),
                    "   ".to_string(),
                    "<p>Run</p>".to_string(),
                ],
            ),
            Section::html("section-3", "", vec!["<hr/>".to_string()]),
        ],
    )
}

#[test]
fn test_compile_page_layout() {
    let html = compile_page_to_html(&guide_page(), CompileOptions::default());
    println!("Generated HTML:\n{}", html);

    assert_eq!(
        html,
        "<h1>Guide &amp; Co</h1><p>Intro</p><h2>Setup</h2><p>Install</p><p></p><p>Run</p><hr/>"
    );
}

#[test]
fn test_compile_page_drop_empty_policy() {
    let options = CompileOptions {
        fragment_policy: FragmentPolicy::DropEmpty,
    };
    let html = compile_page_to_html(&guide_page(), options);
    println!("Generated HTML:\n{}", html);

    assert_eq!(
        html,
        "<h1>Guide &amp; Co</h1><p>Intro</p><h2>Setup</h2><p>Install</p><p>Run</p>"
    );
}

#[test]
fn test_drop_empty_discards_textless_rules_and_tables() {
    let rule = render_node(&Node::new(NodeKind::HorizontalRule, vec![]));
    let empty_table = render_node(&Node::table(vec![Node::table_row(vec![
        Node::table_cell(vec![Node::paragraph(vec![])]),
    ])]));
    let page = Page::new(
        "Layout",
        vec![Section::html(
            "grid",
            "Grid",
            vec![rule.clone(), empty_table.clone(), "<p>kept</p>".to_string()],
        )],
    );

    // Only visible text counts under DropEmpty, so structure without text goes too
    let dropped = compile_page_to_html(
        &page,
        CompileOptions {
            fragment_policy: FragmentPolicy::DropEmpty,
        },
    );
    assert_eq!(dropped, "<h1>Layout</h1><p></p><h2>Grid</h2><p>kept</p>");

    let preserved = compile_page_to_html(&page, CompileOptions::default());
    assert_eq!(
        preserved,
        format!("<h1>Layout</h1><p></p><h2>Grid</h2>{}{}<p>kept</p>", rule, empty_table)
    );
}

#[test]
fn test_compile_page_without_description() {
    let page = Page::new(
        "Notes",
        vec![Section::html("a", "A", vec!["<p>a</p>".to_string()])],
    );

    let html = compile_page_to_html(&page, CompileOptions::default());

    assert_eq!(html, "<h1>Notes</h1><p></p><h2>A</h2><p>a</p>");
}

#[test]
fn test_compile_empty_page() {
    let page = Page::new("", vec![]);

    assert_eq!(
        compile_page_to_html(&page, CompileOptions::default()),
        "<h1></h1><p></p>"
    );
}

#[test]
fn test_compile_page_escapes_section_titles() {
    let page = Page::new(
        "T",
        vec![Section::html("a-b", "A  <b>", vec![])],
    );

    let html = compile_page_to_html(&page, CompileOptions::default());

    assert!(html.contains("<h2>A&nbsp;&nbsp;&lt;b&gt;</h2>"));
}

#[test]
fn test_fragment_policy_serde_names() {
    let policy: FragmentPolicy = serde_json::from_value(json!("dropEmpty")).unwrap();
    assert_eq!(policy, FragmentPolicy::DropEmpty);
    assert_eq!(
        serde_json::to_value(FragmentPolicy::PreserveSpacers).unwrap(),
        json!("preserveSpacers")
    );
}
