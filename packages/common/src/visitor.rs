use folio_model::{Mark, Node, NodeKind};

/// Visitor pattern for traversing editor trees immutably
///
/// The default implementations walk the entire tree. Override specific
/// visit_* methods to act on the nodes you care about.
pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_text(&mut self, _text: &str, _marks: &[Mark]) {
        // Leaf node, no children to walk
    }

    fn visit_hard_break(&mut self) {
        // Leaf node, no children to walk
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    match &node.kind {
        NodeKind::Text { text, marks } => visitor.visit_text(text, marks),
        NodeKind::HardBreak => visitor.visit_hard_break(),
        _ => {
            for child in &node.content {
                visitor.visit_node(child);
            }
        }
    }
}

/// Concatenates every text node below a node
pub struct TextCollector {
    text: String,
    hard_break: &'static str,
}

impl TextCollector {
    pub fn new(hard_break: &'static str) -> Self {
        Self {
            text: String::new(),
            hard_break,
        }
    }

    pub fn finish(self) -> String {
        self.text
    }
}

impl Visitor for TextCollector {
    fn visit_text(&mut self, text: &str, _marks: &[Mark]) {
        self.text.push_str(text);
    }

    fn visit_hard_break(&mut self) {
        self.text.push_str(self.hard_break);
    }
}

/// Text of a node with hard breaks read as spaces (headings, titles)
pub fn plain_text(node: &Node) -> String {
    let mut collector = TextCollector::new(" ");
    collector.visit_node(node);
    collector.finish()
}

/// Text of a node with hard breaks read as newlines (code blocks)
pub fn code_text(node: &Node) -> String {
    let mut collector = TextCollector::new("\n");
    collector.visit_node(node);
    collector.finish()
}
