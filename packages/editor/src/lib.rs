//! # Folio Editor
//!
//! Editing state for one page: the editor tree, structural transactions,
//! undo history, table drag-reorder and the save path.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: editor tree, positions, page shapes  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + transactions   │
//! │  - Load/save editor JSON                    │
//! │  - Atomic transactions with inverses        │
//! │  - One undo level per transaction           │
//! │  - Table-only drag-reorder                  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-sections: tree → page sections     │
//! │ compiler-html: page → editor HTML           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{Document, DropPlacement, Pipeline};
//!
//! let doc = Document::load("page.json")?;
//! let mut pipeline = Pipeline::new(doc);
//!
//! // Move the first table below the second one
//! let outcome = pipeline.reorder(0, 3, DropPlacement::After);
//!
//! let response = pipeline.save_document(Some("docs".to_string()));
//! ```

mod document;
pub mod drag;
mod errors;
mod pipeline;
mod transaction;
mod undo_stack;

pub use document::{Document, DocumentStorage, TransactionResult};
pub use drag::{
    plan_move, ActiveDrag, BlockLayout, DragAbort, DragController, DropOutcome, DropPlacement,
    MovePlan, RenderedBlock,
};
pub use errors::EditorError;
pub use pipeline::{page_id, Pipeline, PipelineResult};
pub use transaction::{Step, StepError, Transaction};
pub use undo_stack::{HistoryEntry, UndoStack};
