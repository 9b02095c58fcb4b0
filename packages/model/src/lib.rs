//! # Folio Model
//!
//! Shared data shapes for Folio:
//!
//! - [`Node`]: the block-structured editor tree (Tiptap/ProseMirror JSON)
//! - [`Mark`]: inline formatting attached to text nodes
//! - [`Page`] / [`Section`]: the flattened storage representation of a page
//! - document positions ([`ResolvedPos`], [`ChildRange`]) used for structural edits

pub mod attrs;
pub mod mark;
pub mod node;
pub mod page;
pub mod position;

pub use attrs::{CellAttrs, TextAlign, VerticalAlign};
pub use mark::Mark;
pub use node::{Node, NodeKind};
pub use page::{
    Page, SaveRequest, SaveResponse, SavedPage, Section, SectionKind, TocEntry, DEFAULT_PAGE_TITLE,
    DESCRIPTION_ID,
};
pub use position::{ChildRange, ResolvedPos};
