//! # Undo/Redo Stack
//!
//! Tracks transaction history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each transaction records its inverse when it is applied
//! - One history entry per transaction, however many steps it holds
//! - Undo applies the inverse and moves the entry to the redo stack
//! - Redo reapplies the original transaction
//! - New transactions clear the redo stack
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let mut doc = Document::from_tree(tree);
//!
//! // Apply a move as one undoable step
//! let transaction = Transaction::new()
//!     .step(Step::delete(0, 12))
//!     .step(Step::insert(20, vec![table]));
//! stack.apply(&transaction, &mut doc)?;
//!
//! stack.undo(&mut doc)?;
//! stack.redo(&mut doc)?;
//! ```

use crate::{Document, EditorError, Transaction, TransactionResult};

/// A transaction and the transaction that reverts it
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub transaction: Transaction,
    pub inverse: Transaction,
}

impl HistoryEntry {
    pub fn description(&self) -> Option<&str> {
        self.transaction.description.as_deref()
    }
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Applied transactions (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Undone transactions (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Apply a transaction and record it for undo
    pub fn apply(
        &mut self,
        transaction: &Transaction,
        doc: &mut Document,
    ) -> Result<TransactionResult, EditorError> {
        let result = doc.apply(transaction)?;

        self.push_entry(HistoryEntry {
            transaction: transaction.clone(),
            inverse: result.inverse.clone(),
        });

        Ok(result)
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates future
        self.redo_stack.clear();
    }

    /// Undo the most recent transaction
    pub fn undo(&mut self, doc: &mut Document) -> Result<bool, EditorError> {
        let Some(entry) = self.undo_stack.pop() else {
            return Ok(false);
        };

        if let Err(err) = doc.apply(&entry.inverse) {
            self.undo_stack.push(entry);
            return Err(err);
        }

        self.redo_stack.push(entry);
        Ok(true)
    }

    /// Redo the most recently undone transaction
    pub fn redo(&mut self, doc: &mut Document) -> Result<bool, EditorError> {
        let Some(entry) = self.redo_stack.pop() else {
            return Ok(false);
        };

        if let Err(err) = doc.apply(&entry.transaction) {
            self.redo_stack.push(entry);
            return Err(err);
        }

        self.undo_stack.push(entry);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().and_then(HistoryEntry::description)
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().and_then(HistoryEntry::description)
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
