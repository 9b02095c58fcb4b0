use crate::render::escape_text;
use folio_model::{Page, Section};
use serde::{Deserialize, Serialize};

/// Which stored fragments make it into the reconstructed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FragmentPolicy {
    /// Keep fragments that have visible text or contain a tag, so empty
    /// `<p></p>` spacer paragraphs survive
    #[default]
    PreserveSpacers,
    /// Keep only fragments with visible text once tags are stripped; drops
    /// spacer paragraphs and bare `<hr/>` fragments
    DropEmpty,
}

impl FragmentPolicy {
    pub fn keeps(&self, fragment: &str) -> bool {
        match self {
            FragmentPolicy::PreserveSpacers => {
                !fragment.trim().is_empty() || contains_tag(fragment)
            }
            FragmentPolicy::DropEmpty => !strip_tags(fragment).trim().is_empty(),
        }
    }
}

/// Options for page reconstruction
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    pub fragment_policy: FragmentPolicy,
}

/// Rebuild the HTML document the editor is seeded with from a stored page.
///
/// ```text
/// <h1>title</h1>
/// description (or <p></p>)
/// <h2>section title</h2> fragments...   for every other section
/// ```
pub fn compile_page_to_html(page: &Page, options: CompileOptions) -> String {
    if page.title.is_empty() && page.sections.is_empty() {
        return "<h1></h1><p></p>".to_string();
    }

    let mut html = format!("<h1>{}</h1>", escape_text(&page.title));

    let description_index = page.sections.iter().position(Section::is_untitled);
    let description = description_index
        .map(|index| page.sections[index].markup())
        .filter(|markup| !markup.trim().is_empty());
    html.push_str(description.as_deref().unwrap_or("<p></p>"));

    for (index, section) in page.sections.iter().enumerate() {
        if Some(index) == description_index {
            continue;
        }

        if !section.is_untitled() {
            html.push_str(&format!("<h2>{}</h2>", escape_text(&section.title)));
        }

        for fragment in &section.content {
            if options.fragment_policy.keeps(fragment) {
                html.push_str(fragment);
            }
        }
    }

    html
}

/// Text left after removing everything between `<` and `>`
fn strip_tags(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ")
}

fn contains_tag(fragment: &str) -> bool {
    let mut rest = fragment;
    while let Some(open) = rest.find('<') {
        rest = &rest[open + 1..];
        if rest
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/')
            && rest.contains('>')
        {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_policies_disagree_on_spacers() {
        assert!(FragmentPolicy::PreserveSpacers.keeps("<p></p>"));
        assert!(!FragmentPolicy::DropEmpty.keeps("<p></p>"));
        assert!(!FragmentPolicy::DropEmpty.keeps("<p>&nbsp;&nbsp;</p>"));
        assert!(FragmentPolicy::DropEmpty.keeps("<p>text</p>"));
        assert!(!FragmentPolicy::PreserveSpacers.keeps("   "));
        assert!(!FragmentPolicy::PreserveSpacers.keeps(""));
    }

    #[test]
    fn test_contains_tag() {
        assert!(contains_tag("<br/>"));
        assert!(contains_tag("a </p>"));
        assert!(!contains_tag("1 < 2"));
        assert!(!contains_tag("plain"));
    }
}
