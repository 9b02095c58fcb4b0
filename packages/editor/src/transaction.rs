//! # Transactions
//!
//! Structural edits on the top level of an editor tree.
//!
//! ## Step Semantics
//!
//! ### Delete
//! - Removes every top-level block between two block boundaries
//! - Both offsets must fall on boundaries, `from < to`
//!
//! ### Insert
//! - Inserts blocks at a top-level boundary
//! - Inserting nothing is rejected
//!
//! A [`Transaction`] applies its steps in order against a working copy and
//! only replaces the document when every step succeeded, so a failing step
//! leaves the document untouched.

use folio_model::Node;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One structural edit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum Step {
    /// Remove the top-level blocks between two boundaries
    Delete { from: usize, to: usize },

    /// Insert blocks at a top-level boundary
    Insert { pos: usize, nodes: Vec<Node> },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    #[error("Position {pos} is outside the document (size {size})")]
    OutOfRange { pos: usize, size: usize },

    #[error("Position {0} is not between two top-level blocks")]
    NotABoundary(usize),

    #[error("Empty range {from}..{to}")]
    EmptyRange { from: usize, to: usize },

    #[error("Nothing to insert")]
    NothingToInsert,
}

impl Step {
    pub fn delete(from: usize, to: usize) -> Self {
        Step::Delete { from, to }
    }

    pub fn insert(pos: usize, nodes: Vec<Node>) -> Self {
        Step::Insert { pos, nodes }
    }

    /// Check that the step can be applied to `doc`
    pub fn validate(&self, doc: &Node) -> Result<(), StepError> {
        match self {
            Step::Delete { from, to } => {
                if from >= to {
                    return Err(StepError::EmptyRange {
                        from: *from,
                        to: *to,
                    });
                }
                boundary(doc, *from)?;
                boundary(doc, *to)?;
                Ok(())
            }
            Step::Insert { pos, nodes } => {
                if nodes.is_empty() {
                    return Err(StepError::NothingToInsert);
                }
                boundary(doc, *pos)?;
                Ok(())
            }
        }
    }

    /// Apply the step with validation
    pub fn apply(&self, doc: &mut Node) -> Result<(), StepError> {
        match self {
            Step::Delete { from, to } => {
                self.validate(doc)?;
                let start = boundary(doc, *from)?;
                let end = boundary(doc, *to)?;
                doc.content.drain(start..end);
                Ok(())
            }
            Step::Insert { pos, nodes } => {
                self.validate(doc)?;
                let index = boundary(doc, *pos)?;
                doc.content.splice(index..index, nodes.iter().cloned());
                Ok(())
            }
        }
    }

    /// The step that undoes this one, computed against the document before applying
    pub fn to_inverse(&self, doc: &Node) -> Result<Step, StepError> {
        self.validate(doc)?;

        match self {
            Step::Delete { from, to } => {
                let start = boundary(doc, *from)?;
                let end = boundary(doc, *to)?;
                Ok(Step::Insert {
                    pos: *from,
                    nodes: doc.content[start..end].to_vec(),
                })
            }
            Step::Insert { pos, nodes } => {
                let size: usize = nodes.iter().map(Node::node_size).sum();
                Ok(Step::Delete {
                    from: *pos,
                    to: pos + size,
                })
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::Delete { .. } => "delete",
            Step::Insert { .. } => "insert",
        }
    }
}

fn boundary(doc: &Node, pos: usize) -> Result<usize, StepError> {
    let size = doc.content_size();
    if pos > size {
        return Err(StepError::OutOfRange { pos, size });
    }
    doc.boundary_index(pos).ok_or(StepError::NotABoundary(pos))
}

/// An ordered group of steps applied as one unit
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub steps: Vec<Step>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply every step or none of them; returns the inverse transaction
    pub fn apply(&self, doc: &mut Node) -> Result<Transaction, StepError> {
        let mut working = doc.clone();
        let mut inverses = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            inverses.push(step.to_inverse(&working)?);
            step.apply(&mut working)?;
        }

        *doc = working;
        inverses.reverse();

        Ok(Transaction {
            steps: inverses,
            description: self.description.clone(),
        })
    }
}
