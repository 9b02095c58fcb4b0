//! # Document Positions
//!
//! Integer offsets into a document, counted the way ProseMirror counts them:
//!
//! - a text node occupies one position per UTF-16 code unit
//! - a leaf node (`hardBreak`, `horizontalRule`) occupies one position
//! - every other node occupies its content plus one opening and one closing token
//!
//! ```text
//! 0 <p> 1 a 2 b 3 c 4 </p> 5 <hr> 6
//! ```
//!
//! Offsets are relative to the start of the root's content, so position `0`
//! is "before the first top-level block".

use crate::node::{Node, NodeKind};

/// Range occupied by one child, in absolute document offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRange {
    /// Index among its siblings
    pub index: usize,
    /// Offset directly before the child
    pub start: usize,
    /// Offset directly after the child
    pub end: usize,
}

impl ChildRange {
    pub fn size(&self) -> usize {
        self.end - self.start
    }

    /// `pos` lies strictly between the child's start and end
    pub fn contains_strictly(&self, pos: usize) -> bool {
        pos > self.start && pos < self.end
    }
}

/// A position together with the chain of ancestors enclosing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPos {
    pub pos: usize,
    /// One entry per depth; `path[0]` is the enclosing direct child of the root
    pub path: Vec<ChildRange>,
}

impl ResolvedPos {
    /// Number of ancestors between the root and the position
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Range of the ancestor at `depth` (1-based, root excluded)
    pub fn ancestor(&self, depth: usize) -> Option<ChildRange> {
        depth.checked_sub(1).and_then(|d| self.path.get(d).copied())
    }

    /// Offset directly before the ancestor at `depth`
    pub fn before(&self, depth: usize) -> Option<usize> {
        self.ancestor(depth).map(|range| range.start)
    }

    /// Offset directly after the ancestor at `depth`
    pub fn after(&self, depth: usize) -> Option<usize> {
        self.ancestor(depth).map(|range| range.end)
    }

    /// Walk the stored path down from `root` and return the ancestor node at `depth`
    pub fn node<'a>(&self, root: &'a Node, depth: usize) -> Option<&'a Node> {
        let mut current = root;
        for range in self.path.iter().take(depth) {
            current = current.content.get(range.index)?;
        }
        Some(current)
    }
}

impl Node {
    /// Number of positions this node occupies inside its parent
    pub fn node_size(&self) -> usize {
        match &self.kind {
            NodeKind::Text { text, .. } => text.encode_utf16().count(),
            _ if self.is_leaf() => 1,
            _ => self.content_size() + 2,
        }
    }

    /// Number of positions occupied by this node's children
    pub fn content_size(&self) -> usize {
        self.content.iter().map(Node::node_size).sum()
    }

    /// Ranges of every direct child, with offsets relative to this node's content start
    pub fn child_ranges(&self) -> Vec<ChildRange> {
        let mut ranges = Vec::with_capacity(self.content.len());
        let mut offset = 0;
        for (index, child) in self.content.iter().enumerate() {
            let end = offset + child.node_size();
            ranges.push(ChildRange {
                index,
                start: offset,
                end,
            });
            offset = end;
        }
        ranges
    }

    /// Offsets between direct children, including the very start and end
    pub fn child_boundaries(&self) -> Vec<usize> {
        let mut boundaries = vec![0];
        boundaries.extend(self.child_ranges().iter().map(|range| range.end));
        boundaries
    }

    /// Index of the direct child starting at `pos`, if `pos` is a child boundary
    pub fn boundary_index(&self, pos: usize) -> Option<usize> {
        self.child_boundaries().iter().position(|&b| b == pos)
    }

    /// Resolve `pos` to the chain of container nodes enclosing it.
    ///
    /// Returns `None` when `pos` is past the end of the content. Text and leaf
    /// nodes never appear in the path: a position inside a text node resolves to
    /// the text's parent.
    pub fn resolve(&self, pos: usize) -> Option<ResolvedPos> {
        if pos > self.content_size() {
            return None;
        }

        let mut path = Vec::new();
        let mut node = self;
        let mut base = 0;

        'descend: loop {
            let mut offset = base;
            for (index, child) in node.content.iter().enumerate() {
                let start = offset;
                let end = start + child.node_size();

                if pos > start && pos < end && !child.is_text() && !child.is_leaf() {
                    path.push(ChildRange { index, start, end });
                    node = child;
                    base = start + 1;
                    continue 'descend;
                }
                if pos < end {
                    break;
                }
                offset = end;
            }
            break;
        }

        Some(ResolvedPos { pos, path })
    }

    /// The direct child enclosing `pos`, or starting exactly at `pos`
    pub fn top_level_child(&self, pos: usize) -> Option<ChildRange> {
        let resolved = self.resolve(pos)?;
        if let Some(range) = resolved.ancestor(1) {
            return Some(range);
        }

        self.child_ranges()
            .into_iter()
            .find(|range| range.start == pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn sample() -> Node {
        // <p>ab</p>  size 4   [0, 4)
        // <table>    size 10  [4, 14)
        //   <tr><td><p>xy</p></td></tr>
        // <hr>       size 1   [14, 15)
        Node::doc(vec![
            Node::paragraph(vec![Node::text("ab")]),
            Node::table(vec![Node::table_row(vec![Node::table_cell(vec![
                Node::paragraph(vec![Node::text("xy")]),
            ])])]),
            Node::new(NodeKind::HorizontalRule, vec![]),
        ])
    }

    #[test]
    fn test_node_sizes() {
        let doc = sample();
        assert_eq!(doc.content[0].node_size(), 4);
        assert_eq!(doc.content[1].node_size(), 10);
        assert_eq!(doc.content[2].node_size(), 1);
        assert_eq!(doc.content_size(), 15);
    }

    #[test]
    fn test_text_size_counts_utf16_units() {
        assert_eq!(Node::text("é😀").node_size(), 3);
    }

    #[test]
    fn test_child_boundaries() {
        assert_eq!(sample().child_boundaries(), vec![0, 4, 14, 15]);
    }

    #[test]
    fn test_resolve_inside_nested_table() {
        let doc = sample();
        // 4 table, 5 row, 6 cell, 7 paragraph, 8 'x'
        let resolved = doc.resolve(8).unwrap();

        assert_eq!(resolved.depth(), 4);
        assert_eq!(resolved.before(1), Some(4));
        assert_eq!(resolved.after(1), Some(14));
        assert_eq!(resolved.node(&doc, 1).unwrap().type_name(), "table");
        assert_eq!(resolved.node(&doc, 4).unwrap().type_name(), "paragraph");
    }

    #[test]
    fn test_top_level_child_from_boundary_and_inside() {
        let doc = sample();

        let at_start = doc.top_level_child(4).unwrap();
        assert_eq!((at_start.index, at_start.start, at_start.end), (1, 4, 14));

        let inside = doc.top_level_child(9).unwrap();
        assert_eq!(inside, at_start);

        let leaf = doc.top_level_child(14).unwrap();
        assert_eq!(leaf.index, 2);
    }

    #[test]
    fn test_resolve_out_of_range() {
        let doc = sample();
        assert!(doc.resolve(16).is_none());
        assert!(doc.top_level_child(15).is_none());
    }
}
