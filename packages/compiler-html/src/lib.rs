//! # Folio HTML compiler
//!
//! Two directions of the page markup pipeline:
//!
//! - [`render_node`]: one editor node (and its children) to a self-contained
//!   markup fragment, as stored in a section
//! - [`compile_page_to_html`]: a stored page back to one HTML document used to
//!   seed the editor
//!
//! [`parse_cell_attrs`] recovers structured table-cell attributes from the
//! markup the renderer emits.

mod cell;
mod page;
mod render;

#[cfg(test)]
mod tests;

pub use cell::{cell_data_attributes, cell_style, parse_cell_attrs, style_property};
pub use page::{compile_page_to_html, CompileOptions, FragmentPolicy};
pub use render::{escape_html, escape_text, render_node};
