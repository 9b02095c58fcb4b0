//! Flattened page storage.
//!
//! A page is stored as a title plus an ordered list of sections, each holding
//! pre-rendered markup fragments. The list is regenerated wholesale on every
//! save; nothing here is patched incrementally.

use crate::node::Node;
use serde::{Deserialize, Serialize};

/// Title used when a document has no level-1 heading
pub const DEFAULT_PAGE_TITLE: &str = "Untitled";

/// Id given to the page description section
pub const DESCRIPTION_ID: &str = "description";

/// Storage format of a section's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Pre-rendered markup fragments
    #[default]
    Html,
}

/// A titled span of rendered content within a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    /// Empty for the description and for untitled runs of content
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: SectionKind,
    /// Markup fragments; order and empty fragments are significant
    #[serde(default)]
    pub content: Vec<String>,
}

impl Section {
    pub fn html(id: impl Into<String>, title: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: SectionKind::Html,
            content,
        }
    }

    pub fn is_untitled(&self) -> bool {
        self.title.is_empty()
    }

    /// All fragments joined in order
    pub fn markup(&self) -> String {
        self.content.concat()
    }
}

/// Title plus ordered sections, as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Page {
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }

    /// The first untitled section, which is the page description
    pub fn description(&self) -> Option<&Section> {
        self.sections.iter().find(|section| section.is_untitled())
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// One table-of-contents entry per titled section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub level: u8,
}

/// Body accepted by the page save endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    /// Editor tree, as produced by the editor
    pub content: Node,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Page returned by the save endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPage {
    pub id: String,
    pub title: String,
    pub sections: Vec<Section>,
    pub toc: Vec<TocEntry>,
}

/// Body returned by the page save endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    pub page: SavedPage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_wire_shape() {
        let section = Section::html("intro", "Intro", vec!["<p>a</p>".to_string(), String::new()]);
        let value = serde_json::to_value(&section).unwrap();

        assert_eq!(
            value,
            json!({ "id": "intro", "title": "Intro", "type": "html", "content": ["<p>a</p>", ""] })
        );
    }

    #[test]
    fn test_page_description_is_first_untitled_section() {
        let page = Page::new(
            "Guide",
            vec![
                Section::html("setup", "Setup", vec![]),
                Section::html(DESCRIPTION_ID, "", vec!["<p>d</p>".to_string()]),
                Section::html("section-3", "", vec!["<p>e</p>".to_string()]),
            ],
        );

        assert_eq!(page.description().unwrap().id, DESCRIPTION_ID);
        assert_eq!(page.section("section-3").unwrap().markup(), "<p>e</p>");
    }

    #[test]
    fn test_save_request_uses_camel_case() {
        let request: SaveRequest = serde_json::from_value(json!({
            "content": { "type": "doc", "content": [] },
            "projectId": "p-1"
        }))
        .unwrap();

        assert_eq!(request.project_id.as_deref(), Some("p-1"));
        assert_eq!(request.content, Node::doc(vec![]));
    }
}
