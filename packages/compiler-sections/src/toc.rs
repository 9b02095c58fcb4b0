use folio_model::{Page, TocEntry};

/// Level given to every section heading in the table of contents
pub const SECTION_TOC_LEVEL: u8 = 2;

/// One entry per titled section, in page order
pub fn build_toc(page: &Page) -> Vec<TocEntry> {
    page.sections
        .iter()
        .filter(|section| !section.is_untitled())
        .map(|section| TocEntry {
            id: section.id.clone(),
            title: section.title.clone(),
            level: SECTION_TOC_LEVEL,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::Section;

    #[test]
    fn test_toc_skips_untitled_sections() {
        let page = Page::new(
            "Guide",
            vec![
                Section::html("description", "", vec!["<p>d</p>".to_string()]),
                Section::html("setup", "Setup", vec![]),
                Section::html("section-3", "", vec!["<p>x</p>".to_string()]),
                Section::html("usage", "Usage", vec![]),
            ],
        );

        let toc = build_toc(&page);

        assert_eq!(
            toc,
            vec![
                TocEntry {
                    id: "setup".to_string(),
                    title: "Setup".to_string(),
                    level: 2,
                },
                TocEntry {
                    id: "usage".to_string(),
                    title: "Usage".to_string(),
                    level: 2,
                },
            ]
        );
    }
}
