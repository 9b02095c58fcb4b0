//! Error types for the editor

use folio_common::CommonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("{0}")]
    Common(#[from] CommonError),

    #[error("Step error: {0}")]
    Step(#[from] crate::transaction::StepError),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
