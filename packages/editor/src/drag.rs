//! # Block Drag-Reorder
//!
//! Moves one top-level table to another place among its siblings.
//!
//! ## Protocol
//!
//! ```text
//! pointer down ──▶ start(): table? resolve DOM offset, dim block
//! pointer up   ──▶ drop():  table? before/after by target midpoint
//!                           re-resolve both blocks against the root
//!                           plan delete + insert, apply as one transaction
//! ```
//!
//! Rendered elements do not map one-to-one onto model nodes, so the offset a
//! block reports is only a hint: it is resolved to the enclosing direct child
//! of the document and checked against the root's own child ranges before
//! anything is changed.
//!
//! A drag that cannot be carried out is an [`DragAbort`] inside the returned
//! [`DropOutcome`], never an error. Every abort restores the dragged block's
//! opacity and leaves the document as it was.

use crate::{Document, StepError, Step, Transaction, UndoStack};
use folio_model::{ChildRange, Node, NodeKind};
use thiserror::Error;
use tracing::debug;

pub const TABLE_TAG: &str = "TABLE";

/// Opacity of a block while it is being dragged
pub const DRAGGING_OPACITY: f64 = 0.5;

const LINE_HEIGHT: f64 = 24.0;

/// A top-level block as laid out on screen
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
    /// Upper-case element name, `TABLE`, `P`, `UL`...
    pub tag: String,
    pub top: f64,
    pub height: f64,
    /// Offset the editor maps the element to; may point inside the block
    pub dom_pos: Option<usize>,
    pub opacity: f64,
}

impl RenderedBlock {
    pub fn new(tag: impl Into<String>, top: f64, height: f64, dom_pos: Option<usize>) -> Self {
        Self {
            tag: tag.into(),
            top,
            height,
            dom_pos,
            opacity: 1.0,
        }
    }

    pub fn is_table(&self) -> bool {
        self.tag.eq_ignore_ascii_case(TABLE_TAG)
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The rendered top-level blocks of a document, top to bottom
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockLayout {
    blocks: Vec<RenderedBlock>,
}

impl BlockLayout {
    pub fn new(blocks: Vec<RenderedBlock>) -> Self {
        Self { blocks }
    }

    /// Stack the document's top-level blocks one under another.
    ///
    /// Container elements map to the offset just inside the block, leaf
    /// elements to the offset before them.
    pub fn from_document(doc: &Node) -> Self {
        let mut top = 0.0;
        let blocks = doc
            .child_ranges()
            .into_iter()
            .zip(&doc.content)
            .map(|(range, node)| {
                let height = LINE_HEIGHT * block_lines(node) as f64;
                let dom_pos = if node.is_leaf() {
                    range.start
                } else {
                    range.start + 1
                };
                let block = RenderedBlock::new(dom_tag(node), top, height, Some(dom_pos));
                top += height;
                block
            })
            .collect();

        Self { blocks }
    }

    pub fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&RenderedBlock> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block under a vertical pointer coordinate
    pub fn block_at(&self, y: f64) -> Option<usize> {
        self.blocks
            .iter()
            .position(|block| y >= block.top && y < block.bottom())
    }

    fn set_opacity(&mut self, index: usize, opacity: f64) {
        if let Some(block) = self.blocks.get_mut(index) {
            block.opacity = opacity;
        }
    }
}

fn dom_tag(node: &Node) -> String {
    let tag = match &node.kind {
        NodeKind::Paragraph { .. } => "P",
        NodeKind::Heading { level, .. } => return format!("H{}", level),
        NodeKind::BulletList | NodeKind::TaskList => "UL",
        NodeKind::OrderedList { .. } => "OL",
        NodeKind::Blockquote => "BLOCKQUOTE",
        NodeKind::CodeBlock { .. } => "PRE",
        NodeKind::HorizontalRule => "HR",
        NodeKind::Table => TABLE_TAG,
        _ => "DIV",
    };
    tag.to_string()
}

fn block_lines(node: &Node) -> usize {
    match node.kind {
        NodeKind::Table
        | NodeKind::BulletList
        | NodeKind::OrderedList { .. }
        | NodeKind::TaskList => node.content.len().max(1),
        _ => 1,
    }
}

/// Which side of the target block the dragged block lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPlacement {
    Before,
    After,
}

impl DropPlacement {
    /// `Before` when the pointer is above the target's vertical midpoint
    pub fn from_pointer(target: &RenderedBlock, pointer_y: f64) -> Self {
        if pointer_y < target.midpoint() {
            DropPlacement::Before
        } else {
            DropPlacement::After
        }
    }
}

/// Why a drag had no effect
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DragAbort {
    #[error("no drag in progress")]
    NoActiveDrag,

    #[error("no rendered block at index {0}")]
    UnknownBlock(usize),

    #[error("only tables can be dragged, got {tag}")]
    NotATable { tag: String },

    #[error("block position could not be resolved")]
    Unresolved,

    #[error("dropped onto itself")]
    SameTarget,

    #[error("insertion point {0} lies inside the dragged block")]
    InsideSelf(usize),

    #[error("block is already at insertion point {0}")]
    NoOp(usize),

    #[error("transaction rejected: {0}")]
    Rejected(StepError),
}

/// The block currently being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDrag {
    /// Index into the layout
    pub block: usize,
    /// Document offset the block resolved to at drag start
    pub pos: usize,
}

/// A verified move, ready to apply
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlan {
    pub source: ChildRange,
    pub target: ChildRange,
    pub placement: DropPlacement,
    /// Insertion offset once the source has been deleted
    pub insert_at: usize,
    pub transaction: Transaction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Moved { plan: MovePlan, version: u64 },
    Aborted(DragAbort),
}

impl DropOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, DropOutcome::Moved { .. })
    }

    pub fn abort(&self) -> Option<&DragAbort> {
        match self {
            DropOutcome::Aborted(abort) => Some(abort),
            DropOutcome::Moved { .. } => None,
        }
    }
}

/// Re-locate the direct child of the root enclosing `pos` and check that
/// its offsets agree with the root's own child list
fn resolve_top_level(doc: &Node, pos: usize) -> Result<(ChildRange, &Node), DragAbort> {
    let range = doc.top_level_child(pos).ok_or(DragAbort::Unresolved)?;
    let verified = doc
        .child_ranges()
        .get(range.index)
        .copied()
        .ok_or(DragAbort::Unresolved)?;

    if verified != range {
        return Err(DragAbort::Unresolved);
    }

    let node = doc.content.get(range.index).ok_or(DragAbort::Unresolved)?;
    if !node.is_table() {
        return Err(DragAbort::NotATable {
            tag: node.type_name().to_string(),
        });
    }

    Ok((range, node))
}

/// Work out the delete + insert that moves the table at `source_pos` next
/// to the table at `target_pos`
pub fn plan_move(
    doc: &Node,
    source_pos: usize,
    target_pos: usize,
    placement: DropPlacement,
) -> Result<MovePlan, DragAbort> {
    let (source, node) = resolve_top_level(doc, source_pos)?;
    let (target, _) = resolve_top_level(doc, target_pos)?;

    if source.index == target.index {
        return Err(DragAbort::SameTarget);
    }

    let insert = match placement {
        DropPlacement::Before => target.start,
        DropPlacement::After => target.end,
    };

    if source.contains_strictly(insert) {
        return Err(DragAbort::InsideSelf(insert));
    }
    if insert == source.start || insert == source.end {
        return Err(DragAbort::NoOp(insert));
    }

    // Deleting the source first shifts everything after it
    let insert_at = if insert > source.start {
        insert - source.size()
    } else {
        insert
    };

    let transaction = Transaction::new()
        .step(Step::delete(source.start, source.end))
        .step(Step::insert(insert_at, vec![node.clone()]))
        .with_description("Move table");

    Ok(MovePlan {
        source,
        target,
        placement,
        insert_at,
        transaction,
    })
}

/// Tracks one drag gesture from pointer down to drop
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<ActiveDrag> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Begin dragging a rendered block; only tables are accepted
    pub fn start(
        &mut self,
        layout: &mut BlockLayout,
        block: usize,
        doc: &Node,
    ) -> Result<ActiveDrag, DragAbort> {
        if let Some(previous) = self.active.take() {
            layout.set_opacity(previous.block, 1.0);
        }

        let result = Self::resolve_start(layout, block, doc);
        match &result {
            Ok(active) => {
                layout.set_opacity(block, DRAGGING_OPACITY);
                self.active = Some(*active);
            }
            Err(abort) => debug!(block, reason = %abort, "drag start rejected"),
        }
        result
    }

    fn resolve_start(layout: &BlockLayout, block: usize, doc: &Node) -> Result<ActiveDrag, DragAbort> {
        let rendered = layout.block(block).ok_or(DragAbort::UnknownBlock(block))?;
        if !rendered.is_table() {
            return Err(DragAbort::NotATable {
                tag: rendered.tag.clone(),
            });
        }

        let pos = rendered.dom_pos.ok_or(DragAbort::Unresolved)?;
        doc.resolve(pos).ok_or(DragAbort::Unresolved)?;

        Ok(ActiveDrag { block, pos })
    }

    /// Abandon the current drag without touching the document
    pub fn cancel(&mut self, layout: &mut BlockLayout) {
        if let Some(active) = self.active.take() {
            layout.set_opacity(active.block, 1.0);
        }
    }

    /// Drop the dragged block onto `target` with the pointer at `pointer_y`.
    ///
    /// On success the move is applied to `doc` as one transaction and
    /// recorded in `history` as one undo level.
    pub fn drop(
        &mut self,
        layout: &mut BlockLayout,
        target: usize,
        pointer_y: f64,
        doc: &mut Document,
        history: &mut UndoStack,
    ) -> DropOutcome {
        let Some(active) = self.active.take() else {
            return DropOutcome::Aborted(DragAbort::NoActiveDrag);
        };
        layout.set_opacity(active.block, 1.0);

        let outcome = match Self::plan_drop(layout, active, target, pointer_y, doc.tree()) {
            Ok(plan) => match history.apply(&plan.transaction, doc) {
                Ok(result) => DropOutcome::Moved {
                    plan,
                    version: result.version,
                },
                Err(crate::EditorError::Step(err)) => DropOutcome::Aborted(DragAbort::Rejected(err)),
                Err(_) => DropOutcome::Aborted(DragAbort::Unresolved),
            },
            Err(abort) => DropOutcome::Aborted(abort),
        };

        match &outcome {
            DropOutcome::Moved { plan, .. } => debug!(
                from = plan.source.start,
                to = plan.insert_at,
                "table moved"
            ),
            DropOutcome::Aborted(abort) => debug!(target, reason = %abort, "drop aborted"),
        }

        outcome
    }

    fn plan_drop(
        layout: &BlockLayout,
        active: ActiveDrag,
        target: usize,
        pointer_y: f64,
        doc: &Node,
    ) -> Result<MovePlan, DragAbort> {
        let rendered = layout.block(target).ok_or(DragAbort::UnknownBlock(target))?;
        if !rendered.is_table() {
            return Err(DragAbort::NotATable {
                tag: rendered.tag.clone(),
            });
        }
        if target == active.block {
            return Err(DragAbort::SameTarget);
        }

        let target_pos = rendered.dom_pos.ok_or(DragAbort::Unresolved)?;
        let placement = DropPlacement::from_pointer(rendered, pointer_y);

        plan_move(doc, active.pos, target_pos, placement)
    }
}
