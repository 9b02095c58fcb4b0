use crate::cell::{cell_data_attributes, cell_style};
use folio_common::code_text;
use folio_model::{CellAttrs, Mark, Node, NodeKind, TextAlign};

struct Context {
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_children(&mut self, node: &Node) {
        for child in &node.content {
            compile_node(child, self);
        }
    }

    /// `<tag attrs>children</tag>`
    fn wrap(&mut self, tag: &str, attrs: &str, node: &Node) {
        self.add(&format!("<{}{}>", tag, attrs));
        self.add_children(node);
        self.add(&format!("</{}>", tag));
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render one node and its children to a markup fragment
pub fn render_node(node: &Node) -> String {
    let mut ctx = Context::new();
    compile_node(node, &mut ctx);
    ctx.get_output()
}

fn compile_node(node: &Node, ctx: &mut Context) {
    match &node.kind {
        NodeKind::Text { text, marks } => ctx.add(&render_text(text, marks)),

        NodeKind::Paragraph { align } => ctx.wrap("p", &align_style(*align), node),

        NodeKind::Heading { level, align } => {
            ctx.wrap(&format!("h{}", level), &align_style(*align), node)
        }

        NodeKind::BulletList => ctx.wrap("ul", "", node),

        NodeKind::OrderedList { start } => {
            let attrs = if *start != 1 {
                format!(" start=\"{}\"", start)
            } else {
                String::new()
            };
            ctx.wrap("ol", &attrs, node)
        }

        NodeKind::ListItem => ctx.wrap("li", "", node),

        NodeKind::TaskList => ctx.wrap("ul", " data-type=\"taskList\"", node),

        NodeKind::TaskItem { checked } => {
            ctx.add(&format!(
                "<li data-type=\"taskItem\" data-checked=\"{}\">",
                checked
            ));
            ctx.add("<label><input type=\"checkbox\"");
            if *checked {
                ctx.add(" checked=\"checked\"");
            }
            ctx.add("/></label><div>");
            ctx.add_children(node);
            ctx.add("</div></li>");
        }

        NodeKind::Blockquote => ctx.wrap("blockquote", "", node),

        NodeKind::CodeBlock { language } => {
            ctx.add("<pre><code");
            if let Some(language) = language {
                ctx.add(&format!(" class=\"language-{}\"", escape_html(language)));
            }
            ctx.add(">");
            ctx.add(&escape_html(&code_text(node)));
            ctx.add("</code></pre>");
        }

        NodeKind::HardBreak => ctx.add("<br/>"),

        NodeKind::HorizontalRule => ctx.add("<hr/>"),

        NodeKind::Table => ctx.wrap("table", "", node),

        NodeKind::TableRow => ctx.wrap("tr", "", node),

        NodeKind::TableHeader(cell) => ctx.wrap("th", &cell_attributes(cell), node),

        NodeKind::TableCell(cell) => ctx.wrap("td", &cell_attributes(cell), node),

        // The document root and unrecognized nodes contribute only their children
        NodeKind::Doc | NodeKind::Unknown { .. } => ctx.add_children(node),
    }
}

/// Escaped text wrapped in its marks; the first mark ends up innermost
fn render_text(text: &str, marks: &[Mark]) -> String {
    let mut html = escape_text(text);

    for mark in marks {
        html = match mark {
            Mark::Bold => format!("<strong>{}</strong>", html),
            Mark::Italic => format!("<em>{}</em>", html),
            Mark::Underline => format!("<u>{}</u>", html),
            Mark::Strike => format!("<s>{}</s>", html),
            Mark::Code => format!("<code>{}</code>", html),
            Mark::Link { href, target } => {
                let target = target
                    .as_ref()
                    .map(|t| format!(" target=\"{}\"", escape_html(t)))
                    .unwrap_or_default();
                format!("<a href=\"{}\"{}>{}</a>", escape_html(href), target, html)
            }
            Mark::Highlight { color: Some(color) } => {
                let color = escape_html(color);
                format!(
                    "<mark data-color=\"{}\" style=\"background-color: {}\">{}</mark>",
                    color, color, html
                )
            }
            Mark::Highlight { color: None } => format!("<mark>{}</mark>", html),
            Mark::Subscript => format!("<sub>{}</sub>", html),
            Mark::Superscript => format!("<sup>{}</sup>", html),
            Mark::Unknown { .. } => html,
        };
    }

    html
}

fn align_style(align: Option<TextAlign>) -> String {
    match align {
        Some(align) if align != TextAlign::Left => {
            format!(" style=\"text-align: {}\"", align)
        }
        _ => String::new(),
    }
}

fn cell_attributes(cell: &CellAttrs) -> String {
    let mut attrs = String::new();

    if cell.colspan != 1 {
        attrs.push_str(&format!(" colspan=\"{}\"", cell.colspan));
    }
    if cell.rowspan != 1 {
        attrs.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
    }
    if let Some(widths) = &cell.colwidth {
        let widths: Vec<String> = widths.iter().map(u32::to_string).collect();
        attrs.push_str(&format!(" data-colwidth=\"{}\"", widths.join(",")));
    }
    if let Some(style) = cell_style(cell) {
        attrs.push_str(&format!(" style=\"{}\"", escape_html(&style)));
    }
    for (name, value) in cell_data_attributes(cell) {
        attrs.push_str(&format!(" {}=\"{}\"", name, escape_html(&value)));
    }

    attrs
}

/// Escape the five HTML-significant characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape text content so the editor's whitespace survives re-parsing.
///
/// Non-breaking spaces become `&nbsp;`, and every space in a run of two or
/// more becomes `&nbsp;` as well. Single spaces are left alone.
pub fn escape_text(text: &str) -> String {
    let escaped = escape_html(text).replace('\u{a0}', "&nbsp;");

    let mut output = String::with_capacity(escaped.len());
    let mut run = 0;
    for ch in escaped.chars() {
        if ch == ' ' {
            run += 1;
            continue;
        }
        flush_spaces(&mut output, run);
        run = 0;
        output.push(ch);
    }
    flush_spaces(&mut output, run);

    output
}

fn flush_spaces(output: &mut String, run: usize) {
    match run {
        0 => {}
        1 => output.push(' '),
        _ => {
            for _ in 0..run {
                output.push_str("&nbsp;");
            }
        }
    }
}
