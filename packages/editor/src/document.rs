//! # Document Handle
//!
//! A Document wraps one editor tree and its editing state.
//!
//! Documents can be:
//! - **Memory-backed**: temporary, for tests or trees received over the wire
//! - **File-backed**: a tree stored as JSON on disk
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Convert → Save
//!   ↓      ↓        ↓        ↓
//! JSON  Transactions Page   JSON
//! ```

use crate::{EditorError, Transaction};
use folio_common::{read_json, write_json};
use folio_model::Node;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Editable editor tree
#[derive(Debug)]
pub struct Document {
    /// Current version number (increments on each applied transaction)
    pub version: u64,

    tree: Node,

    /// Backing storage strategy
    storage: DocumentStorage,
}

/// Storage backend for document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStorage {
    /// In-memory only
    Memory,

    /// Backed by a JSON file
    File { path: PathBuf, dirty: bool },
}

/// Outcome of applying a transaction to a document
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionResult {
    pub version: u64,

    /// Transaction that reverts the one just applied
    pub inverse: Transaction,
}

impl Document {
    /// Create a memory-backed document
    pub fn from_tree(tree: Node) -> Self {
        Self {
            version: 0,
            tree,
            storage: DocumentStorage::Memory,
        }
    }

    /// Parse editor JSON into a memory-backed document
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let tree: Node = serde_json::from_str(json).map_err(folio_common::CommonError::from)?;
        Ok(Self::from_tree(tree))
    }

    /// Load a file-backed document
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let path = path.into();
        let tree: Node = read_json(&path)?;
        debug!(path = %path.display(), blocks = tree.content.len(), "loaded document");

        Ok(Self {
            version: 0,
            tree,
            storage: DocumentStorage::File { path, dirty: false },
        })
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            DocumentStorage::File { path, .. } => Some(path),
            DocumentStorage::Memory => None,
        }
    }

    pub fn storage(&self) -> &DocumentStorage {
        &self.storage
    }

    /// Apply a transaction; the document is untouched when any step fails
    pub fn apply(&mut self, transaction: &Transaction) -> Result<TransactionResult, EditorError> {
        let inverse = transaction.apply(&mut self.tree)?;
        self.version += 1;

        if let DocumentStorage::File { dirty, .. } = &mut self.storage {
            *dirty = true;
        }

        Ok(TransactionResult {
            version: self.version,
            inverse,
        })
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory => false,
        }
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self, pretty: bool) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { path, dirty } => {
                write_json(path, &self.tree, pretty)?;
                *dirty = false;
                Ok(())
            }
            DocumentStorage::Memory => Err(EditorError::NotFileBacked),
        }
    }

    /// Write the tree to `path` and make the document file-backed there
    pub fn save_as(&mut self, path: impl Into<PathBuf>, pretty: bool) -> Result<(), EditorError> {
        let path = path.into();
        write_json(&path, &self.tree, pretty)?;
        self.storage = DocumentStorage::File { path, dirty: false };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Step;

    fn tree() -> Node {
        Node::doc(vec![
            Node::paragraph(vec![Node::text("a")]),
            Node::paragraph(vec![Node::text("b")]),
        ])
    }

    #[test]
    fn test_create_memory_document() {
        let doc = Document::from_tree(tree());

        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert!(doc.path().is_none());
        assert_eq!(doc.tree().content.len(), 2);
    }

    #[test]
    fn test_document_version_increments() {
        let mut doc = Document::from_tree(tree());
        let transaction = Transaction::new().step(Step::delete(0, 3));

        let result = doc.apply(&transaction).unwrap();

        assert_eq!(result.version, 1);
        assert_eq!(doc.version, 1);
        assert_eq!(doc.tree().content.len(), 1);
    }

    #[test]
    fn test_failed_transaction_keeps_version() {
        let mut doc = Document::from_tree(tree());
        let transaction = Transaction::new().step(Step::delete(1, 3));

        assert!(doc.apply(&transaction).is_err());
        assert_eq!(doc.version, 0);
        assert_eq!(doc.tree(), &tree());
    }

    #[test]
    fn test_missing_file_reports_common_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = Document::load(dir.path().join("missing.json")).unwrap_err();

        assert!(matches!(
            err,
            EditorError::Common(folio_common::CommonError::Io(_))
        ));
    }

    #[test]
    fn test_memory_document_cannot_save() {
        let mut doc = Document::from_tree(tree());

        assert!(matches!(doc.save(false), Err(EditorError::NotFileBacked)));
    }

    #[test]
    fn test_file_document_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        let mut doc = Document::from_tree(tree());
        doc.save_as(&path, true).unwrap();

        let mut loaded = Document::load(&path).unwrap();
        assert_eq!(loaded.tree(), &tree());
        assert!(!loaded.is_dirty());

        loaded
            .apply(&Transaction::new().step(Step::delete(3, 6)))
            .unwrap();
        assert!(loaded.is_dirty());

        loaded.save(false).unwrap();
        assert!(!loaded.is_dirty());
        assert_eq!(Document::load(&path).unwrap().tree().content.len(), 1);
    }
}
