//! Editor document tree.
//!
//! The rich-text editor produces a Tiptap/ProseMirror JSON tree:
//!
//! ```json
//! { "type": "heading", "attrs": { "level": 2 }, "content": [{ "type": "text", "text": "Intro" }] }
//! ```
//!
//! Node types are a closed set ([`NodeKind`]) with an explicit `Unknown`
//! fallback that keeps the original type name, attributes and children, so
//! extension nodes survive a load/save cycle and renderers can still recurse
//! into their content.

use crate::attrs::{attr_bool, attr_string, attr_u32, CellAttrs, TextAlign};
use crate::mark::Mark;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node of the editor tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub struct Node {
    pub kind: NodeKind,
    pub content: Vec<Node>,
}

/// Node type plus the attributes that type understands
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Doc,
    Paragraph {
        align: Option<TextAlign>,
    },
    Heading {
        level: u8,
        align: Option<TextAlign>,
    },
    Text {
        text: String,
        marks: Vec<Mark>,
    },
    BulletList,
    OrderedList {
        start: u32,
    },
    ListItem,
    TaskList,
    TaskItem {
        checked: bool,
    },
    Blockquote,
    CodeBlock {
        language: Option<String>,
    },
    HardBreak,
    HorizontalRule,
    Table,
    TableRow,
    TableHeader(CellAttrs),
    TableCell(CellAttrs),
    Unknown {
        node_type: String,
        attrs: Map<String, Value>,
    },
}

impl NodeKind {
    /// The Tiptap type name
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::Doc => "doc",
            NodeKind::Paragraph { .. } => "paragraph",
            NodeKind::Heading { .. } => "heading",
            NodeKind::Text { .. } => "text",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList { .. } => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::TaskList => "taskList",
            NodeKind::TaskItem { .. } => "taskItem",
            NodeKind::Blockquote => "blockquote",
            NodeKind::CodeBlock { .. } => "codeBlock",
            NodeKind::HardBreak => "hardBreak",
            NodeKind::HorizontalRule => "horizontalRule",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableHeader(_) => "tableHeader",
            NodeKind::TableCell(_) => "tableCell",
            NodeKind::Unknown { node_type, .. } => node_type,
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind, content: Vec<Node>) -> Self {
        Self { kind, content }
    }

    pub fn doc(content: Vec<Node>) -> Self {
        Self::new(NodeKind::Doc, content)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::marked_text(text, Vec::new())
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self::new(
            NodeKind::Text {
                text: text.into(),
                marks,
            },
            Vec::new(),
        )
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Self::new(NodeKind::Paragraph { align: None }, content)
    }

    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Self::new(NodeKind::Heading { level, align: None }, content)
    }

    pub fn table(rows: Vec<Node>) -> Self {
        Self::new(NodeKind::Table, rows)
    }

    pub fn table_row(cells: Vec<Node>) -> Self {
        Self::new(NodeKind::TableRow, cells)
    }

    pub fn table_cell(content: Vec<Node>) -> Self {
        Self::new(NodeKind::TableCell(CellAttrs::default()), content)
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. })
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, NodeKind::Table)
    }

    /// Atomic nodes with no content and a size of one
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::HardBreak | NodeKind::HorizontalRule)
    }

    /// Heading level, if this is a heading
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Heading { level, .. } => Some(level),
            _ => None,
        }
    }
}

/// Wire shape of a node, exactly as the editor serializes it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawNode {
    #[serde(rename = "type", default)]
    node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    marks: Option<Vec<Mark>>,
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let attrs = raw.attrs.unwrap_or_default();
        let content = raw.content.unwrap_or_default();
        let align = || attr_string(&attrs, "textAlign").and_then(|s| s.parse().ok());

        let kind = match raw.node_type.as_str() {
            "doc" => NodeKind::Doc,
            "paragraph" => NodeKind::Paragraph { align: align() },
            "heading" => NodeKind::Heading {
                level: attr_u32(&attrs, "level").unwrap_or(1).clamp(1, 6) as u8,
                align: align(),
            },
            "text" => {
                return Node::marked_text(
                    raw.text.unwrap_or_default(),
                    raw.marks.unwrap_or_default(),
                )
            }
            "bulletList" => NodeKind::BulletList,
            "orderedList" => NodeKind::OrderedList {
                start: attr_u32(&attrs, "start").unwrap_or(1),
            },
            "listItem" => NodeKind::ListItem,
            "taskList" => NodeKind::TaskList,
            "taskItem" => NodeKind::TaskItem {
                checked: attr_bool(&attrs, "checked").unwrap_or(false),
            },
            "blockquote" => NodeKind::Blockquote,
            "codeBlock" => NodeKind::CodeBlock {
                language: attr_string(&attrs, "language"),
            },
            "hardBreak" => NodeKind::HardBreak,
            "horizontalRule" => NodeKind::HorizontalRule,
            "table" => NodeKind::Table,
            "tableRow" => NodeKind::TableRow,
            "tableHeader" => NodeKind::TableHeader(CellAttrs::from_json(&attrs)),
            "tableCell" => NodeKind::TableCell(CellAttrs::from_json(&attrs)),
            _ => NodeKind::Unknown {
                node_type: raw.node_type.clone(),
                attrs,
            },
        };

        Node { kind, content }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let mut raw = RawNode {
            node_type: node.kind.type_name().to_string(),
            content: if node.content.is_empty() {
                None
            } else {
                Some(node.content)
            },
            ..RawNode::default()
        };

        let mut attrs = Map::new();
        match node.kind {
            NodeKind::Paragraph { align } => insert_align(&mut attrs, align),
            NodeKind::Heading { level, align } => {
                attrs.insert("level".to_string(), Value::from(level));
                insert_align(&mut attrs, align);
            }
            NodeKind::Text { text, marks } => {
                raw.text = Some(text);
                if !marks.is_empty() {
                    raw.marks = Some(marks);
                }
            }
            NodeKind::OrderedList { start } => {
                attrs.insert("start".to_string(), Value::from(start));
            }
            NodeKind::TaskItem { checked } => {
                attrs.insert("checked".to_string(), Value::from(checked));
            }
            NodeKind::CodeBlock { language } => {
                attrs.insert(
                    "language".to_string(),
                    language.map(Value::from).unwrap_or(Value::Null),
                );
            }
            NodeKind::TableHeader(cell) | NodeKind::TableCell(cell) => {
                attrs = cell.to_json();
            }
            NodeKind::Unknown { attrs: extra, .. } => attrs = extra,
            _ => {}
        }

        if !attrs.is_empty() {
            raw.attrs = Some(attrs);
        }
        raw
    }
}

fn insert_align(attrs: &mut Map<String, Value>, align: Option<TextAlign>) {
    if let Some(align) = align {
        attrs.insert("textAlign".to_string(), Value::from(align.as_str()));
    }
}
