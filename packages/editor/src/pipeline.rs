//! # Editing Pipeline
//!
//! Coordinates the page lifecycle: Load → Edit → Convert → Save
//!
//! The Pipeline manages:
//! - Applying transactions with undo history
//! - Table drag-reorder by block index
//! - Converting the editor tree into the stored page shape
//! - Rebuilding editor HTML from a stored page

use crate::drag::{BlockLayout, DragController, DropOutcome, DropPlacement};
use crate::{Document, EditorError, Transaction, UndoStack};
use folio_compiler_html::{compile_page_to_html, CompileOptions};
use folio_compiler_sections::{build_toc, convert_with_options, slugify, ConvertOptions};
use folio_model::{Page, SaveRequest, SaveResponse, SavedPage};
use tracing::{debug, instrument};

/// Manages the full edit → save pipeline for one document
pub struct Pipeline {
    document: Document,
    history: UndoStack,
    convert_options: ConvertOptions,
    compile_options: CompileOptions,
}

/// Result of applying a transaction through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    /// New version number
    pub version: u64,

    /// Undo levels available after the edit
    pub undo_levels: usize,
}

impl Pipeline {
    /// Create pipeline for document
    pub fn new(document: Document) -> Self {
        Self {
            document,
            history: UndoStack::new(),
            convert_options: ConvertOptions::default(),
            compile_options: CompileOptions::default(),
        }
    }

    pub fn with_convert_options(mut self, options: ConvertOptions) -> Self {
        self.convert_options = options;
        self
    }

    pub fn with_compile_options(mut self, options: CompileOptions) -> Self {
        self.compile_options = options;
        self
    }

    /// Apply a transaction as one undo level
    pub fn apply(&mut self, transaction: &Transaction) -> Result<PipelineResult, EditorError> {
        let result = self.history.apply(transaction, &mut self.document)?;

        Ok(PipelineResult {
            version: result.version,
            undo_levels: self.history.undo_levels(),
        })
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.history.undo(&mut self.document)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.history.redo(&mut self.document)
    }

    /// Drag top-level block `from` onto block `to`.
    ///
    /// Lays the document out, starts a drag on `from` and drops it in the
    /// upper or lower half of `to` depending on `placement`.
    pub fn reorder(&mut self, from: usize, to: usize, placement: DropPlacement) -> DropOutcome {
        let mut layout = BlockLayout::from_document(self.document.tree());
        let mut drag = DragController::new();

        if let Err(abort) = drag.start(&mut layout, from, self.document.tree()) {
            return DropOutcome::Aborted(abort);
        }

        let pointer_y = layout
            .block(to)
            .map(|block| match placement {
                DropPlacement::Before => block.top + block.height * 0.25,
                DropPlacement::After => block.top + block.height * 0.75,
            })
            .unwrap_or_default();

        drag.drop(&mut layout, to, pointer_y, &mut self.document, &mut self.history)
    }

    /// Convert an editor tree into the saved page shape.
    ///
    /// The page id is the slug of the page title, prefixed with the project
    /// id when one is given.
    #[instrument(skip_all, fields(project = request.project_id.as_deref().unwrap_or("")))]
    pub fn save(&self, request: SaveRequest) -> SaveResponse {
        let page = convert_with_options(&request.content, &self.convert_options);
        let toc = build_toc(&page);
        let id = page_id(request.project_id.as_deref(), &page.title);

        debug!(id = %id, sections = page.sections.len(), "page saved");

        SaveResponse {
            success: true,
            page: SavedPage {
                id,
                title: page.title,
                sections: page.sections,
                toc,
            },
        }
    }

    /// Save the pipeline's own document
    pub fn save_document(&self, project_id: Option<String>) -> SaveResponse {
        self.save(SaveRequest {
            content: self.document.tree().clone(),
            project_id,
        })
    }

    /// HTML that seeds the editor when a stored page is opened
    pub fn render_page(&self, page: &Page) -> String {
        compile_page_to_html(page, self.compile_options)
    }

    /// Get current document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get mutable document reference
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

/// `project/slug`, or just the slug; `untitled` when the title has no letters or digits
pub fn page_id(project_id: Option<&str>, title: &str) -> String {
    let mut slug = slugify(title);
    if slug.is_empty() {
        slug = "untitled".to_string();
    }

    match project_id.filter(|id| !id.is_empty()) {
        Some(project) => format!("{}/{}", project, slug),
        None => slug,
    }
}
