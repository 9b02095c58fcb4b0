//! Editor tree to section list conversion.
//!
//! The top-level children of the document are fed one at a time through a
//! small state machine:
//!
//! ```text
//!   BeforeTitle ──h1──▶ CollectingDescription ──h2 / 2nd block──▶ InSection
//!        │                                                        ▲
//!        └───────────────────────────h2───────────────────────────┘
//! ```
//!
//! Exactly one content block following the title becomes the description.
//! Anything after it, up to the next heading, starts an untitled section.

use crate::slug::{slugify, SlugRegistry};
use folio_common::plain_text;
use folio_compiler_html::render_node;
use folio_model::{Node, NodeKind, Page, Section, DEFAULT_PAGE_TITLE, DESCRIPTION_ID};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Content emitted for a document with nothing in it
pub const PLACEHOLDER_FRAGMENT: &str = "<p></p>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Page title used when the document has no level-1 heading
    pub default_title: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_PAGE_TITLE.to_string(),
        }
    }
}

/// Where the converter is in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No level-1 heading seen yet
    BeforeTitle,
    /// Title consumed; the next content block becomes the description
    CollectingDescription,
    /// Description slot closed; content goes to the open section
    InSection,
}

/// How a top-level node drives the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// The first level-1 heading
    TitleHeading(String),
    /// A level-2 heading, or any level-1 heading after the title
    SectionHeading(String),
    /// Rendered markup of any other block
    Content(String),
}

/// A section before its id is assigned
#[derive(Debug, Clone, Default)]
struct Draft {
    title: String,
    fragments: Vec<String>,
}

impl Draft {
    fn titled(title: String) -> Self {
        Self {
            title,
            fragments: Vec::new(),
        }
    }

    fn untitled(fragment: String) -> Self {
        Self {
            title: String::new(),
            fragments: vec![fragment],
        }
    }
}

pub struct SectionConverter {
    phase: Phase,
    title: Option<String>,
    description: Option<String>,
    current: Option<Draft>,
    drafts: Vec<Draft>,
    options: ConvertOptions,
}

impl SectionConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            phase: Phase::BeforeTitle,
            title: None,
            description: None,
            current: None,
            drafts: Vec::new(),
            options,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the description slot has been filled
    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    /// Classify a top-level node. Headings without a level-1 title yet are
    /// read as the title; every later level-1 heading degrades to a section.
    ///
    /// A section heading with no text is kept as content: a title-less
    /// boundary could not be told apart from the description once stored.
    pub fn classify(&self, node: &Node) -> Input {
        match node.kind {
            NodeKind::Heading { level: 1, .. } if self.title.is_none() => {
                Input::TitleHeading(plain_text(node).trim().to_string())
            }
            NodeKind::Heading { level: 1 | 2, .. } => {
                let text = plain_text(node).trim().to_string();
                if text.is_empty() {
                    Input::Content(render_node(node))
                } else {
                    Input::SectionHeading(text)
                }
            }
            _ => Input::Content(render_node(node)),
        }
    }

    pub fn feed(&mut self, node: &Node) {
        let input = self.classify(node);
        self.step(input);
    }

    pub fn step(&mut self, input: Input) {
        match input {
            Input::TitleHeading(text) => self.on_title_heading(text),
            Input::SectionHeading(text) => self.on_section_heading(text),
            Input::Content(fragment) => self.on_content(fragment),
        }
    }

    fn on_title_heading(&mut self, text: String) {
        debug!(title = %text, "page title");
        self.close_current();
        self.title = Some(text);
        self.phase = Phase::CollectingDescription;
    }

    fn on_section_heading(&mut self, text: String) {
        debug!(title = %text, "section boundary");
        self.phase = Phase::InSection;
        self.close_current();
        self.current = Some(Draft::titled(text));
    }

    fn on_content(&mut self, fragment: String) {
        if fragment.trim().is_empty() {
            return;
        }

        match self.phase {
            Phase::CollectingDescription if self.description.is_none() => {
                self.description = Some(fragment);
            }
            Phase::CollectingDescription => {
                // One-shot: the second block after the title opens a new section
                self.phase = Phase::InSection;
                self.close_current();
                self.current = Some(Draft::untitled(fragment));
            }
            Phase::BeforeTitle | Phase::InSection => match &mut self.current {
                Some(draft) => draft.fragments.push(fragment),
                None => self.current = Some(Draft::untitled(fragment)),
            },
        }
    }

    fn close_current(&mut self) {
        if let Some(draft) = self.current.take() {
            self.drafts.push(draft);
        }
    }

    /// Close everything still open and assign section ids
    pub fn finish(mut self) -> Page {
        self.close_current();

        let title = self
            .title
            .filter(|title| !title.is_empty())
            .unwrap_or(self.options.default_title);

        let mut registry = SlugRegistry::new();
        let mut sections = Vec::with_capacity(self.drafts.len() + 1);

        if let Some(fragment) = self.description {
            sections.push(Section::html(
                registry.claim(DESCRIPTION_ID),
                "",
                vec![fragment],
            ));
        }

        for draft in self.drafts {
            let position = sections.len() + 1;
            let slug = slugify(&draft.title);
            let id = if slug.is_empty() {
                registry.claim(&format!("section-{}", position))
            } else {
                registry.claim(&slug)
            };
            sections.push(Section::html(id, draft.title, draft.fragments));
        }

        if sections.is_empty() {
            sections.push(Section::html(
                "section-1",
                "",
                vec![PLACEHOLDER_FRAGMENT.to_string()],
            ));
        }

        debug!(sections = sections.len(), "conversion finished");
        Page::new(title, sections)
    }
}

/// Convert an editor tree with default options
pub fn convert(tree: &Node) -> Page {
    convert_with_options(tree, &ConvertOptions::default())
}

/// Convert an editor tree into a page title plus ordered sections.
///
/// `tree` is normally a `doc` node; any other node is treated as a document
/// with that single child.
#[instrument(skip_all, fields(blocks = tree.content.len()))]
pub fn convert_with_options(tree: &Node, options: &ConvertOptions) -> Page {
    let mut converter = SectionConverter::new(options.clone());

    match tree.kind {
        NodeKind::Doc => {
            for node in &tree.content {
                converter.feed(node);
            }
        }
        _ => converter.feed(tree),
    }

    converter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(text: &str) -> Input {
        Input::Content(format!("<p>{}</p>", text))
    }

    #[test]
    fn test_title_enters_description_phase() {
        let mut converter = SectionConverter::new(ConvertOptions::default());
        assert_eq!(converter.phase(), Phase::BeforeTitle);

        converter.step(Input::TitleHeading("Guide".to_string()));
        assert_eq!(converter.phase(), Phase::CollectingDescription);
        assert!(!converter.has_description());
    }

    #[test]
    fn test_description_is_one_shot() {
        let mut converter = SectionConverter::new(ConvertOptions::default());
        converter.step(Input::TitleHeading("Guide".to_string()));
        converter.step(content("first"));

        assert!(converter.has_description());
        assert_eq!(converter.phase(), Phase::CollectingDescription);

        converter.step(content("second"));
        assert_eq!(converter.phase(), Phase::InSection);

        converter.step(content("third"));
        let page = converter.finish();

        assert_eq!(page.sections.len(), 2);
        assert_eq!(page.sections[0].id, DESCRIPTION_ID);
        assert_eq!(page.sections[0].content, vec!["<p>first</p>"]);
        assert_eq!(page.sections[1].id, "section-2");
        assert_eq!(
            page.sections[1].content,
            vec!["<p>second</p>", "<p>third</p>"]
        );
    }

    #[test]
    fn test_heading_closes_description_phase() {
        let mut converter = SectionConverter::new(ConvertOptions::default());
        converter.step(Input::TitleHeading("Guide".to_string()));
        converter.step(Input::SectionHeading("Setup".to_string()));
        converter.step(content("install"));

        assert_eq!(converter.phase(), Phase::InSection);

        let page = converter.finish();
        assert_eq!(page.sections.len(), 1);
        assert_eq!(page.sections[0].id, "setup");
        assert_eq!(page.sections[0].title, "Setup");
    }

    #[test]
    fn test_blank_content_is_ignored() {
        let mut converter = SectionConverter::new(ConvertOptions::default());
        converter.step(Input::TitleHeading("Guide".to_string()));
        converter.step(Input::Content("  ".to_string()));

        assert!(!converter.has_description());
    }

    #[test]
    fn test_classify_degrades_second_h1() {
        let mut converter = SectionConverter::new(ConvertOptions::default());
        let h1 = Node::heading(1, vec![Node::text(" Title ")]);

        assert_eq!(converter.classify(&h1), Input::TitleHeading("Title".to_string()));
        converter.feed(&h1);
        assert_eq!(
            converter.classify(&h1),
            Input::SectionHeading("Title".to_string())
        );
    }

    #[test]
    fn test_classify_deeper_headings_as_content() {
        let converter = SectionConverter::new(ConvertOptions::default());
        let h3 = Node::heading(3, vec![Node::text("Detail")]);

        assert_eq!(
            converter.classify(&h3),
            Input::Content("<h3>Detail</h3>".to_string())
        );
    }

    #[test]
    fn test_classify_blank_section_heading_as_content() {
        let mut converter = SectionConverter::new(ConvertOptions::default());
        converter.step(Input::TitleHeading("Page".to_string()));

        assert_eq!(
            converter.classify(&Node::heading(2, vec![])),
            Input::Content("<h2></h2>".to_string())
        );
        assert!(matches!(
            converter.classify(&Node::heading(1, vec![Node::text("  ")])),
            Input::Content(_)
        ));
    }

    #[test]
    fn test_empty_title_falls_back_to_default() {
        let options = ConvertOptions {
            default_title: "Draft".to_string(),
        };
        let mut converter = SectionConverter::new(options);
        converter.step(Input::TitleHeading(String::new()));

        assert_eq!(converter.finish().title, "Draft");
    }
}
