//! Table cell presentation attributes.
//!
//! Cell colours and alignment are written twice: as `!important` inline CSS
//! (so they win over table themes) and as `data-*` attributes. Reading them
//! back prefers the `data-*` attribute and falls back to the inline style.

use folio_model::CellAttrs;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const STYLE_PROPERTIES: [&str; 4] = ["background-color", "color", "text-align", "vertical-align"];

fn style_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        STYLE_PROPERTIES
            .iter()
            .map(|property| {
                // Anchored on `;` or start so `color` never matches inside `background-color`
                let pattern = format!(
                    r"(?i)(?:^|;)\s*{}\s*:\s*([^;!]+?)\s*(?:!\s*important\s*)?(?:;|$)",
                    regex::escape(property)
                );
                let regex = Regex::new(&pattern).expect("style property pattern is valid");
                (*property, regex)
            })
            .collect()
    })
}

/// Value of one CSS property in an inline style string
pub fn style_property(style: &str, property: &str) -> Option<String> {
    let (_, regex) = style_patterns()
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(property))?;

    regex
        .captures(style)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Inline CSS for a cell, `None` when the cell carries no presentation attributes
pub fn cell_style(cell: &CellAttrs) -> Option<String> {
    let mut declarations = Vec::new();

    if let Some(color) = &cell.background_color {
        declarations.push(format!("background-color: {} !important", color));
    }
    if let Some(color) = &cell.text_color {
        declarations.push(format!("color: {} !important", color));
    }
    if let Some(align) = cell.text_align {
        declarations.push(format!("text-align: {} !important", align));
    }
    if let Some(align) = cell.vertical_align {
        declarations.push(format!("vertical-align: {} !important", align));
    }

    if declarations.is_empty() {
        None
    } else {
        Some(format!("{};", declarations.join("; ")))
    }
}

/// `data-*` mirrors of the cell's presentation attributes, in render order
pub fn cell_data_attributes(cell: &CellAttrs) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();

    if let Some(color) = &cell.background_color {
        attrs.push(("data-background-color", color.clone()));
    }
    if let Some(color) = &cell.text_color {
        attrs.push(("data-text-color", color.clone()));
    }
    if let Some(align) = cell.text_align {
        attrs.push(("data-text-align", align.to_string()));
    }
    if let Some(align) = cell.vertical_align {
        attrs.push(("data-vertical-align", align.to_string()));
    }

    attrs
}

/// Recover cell attributes from the HTML attributes of a `<td>`/`<th>`
pub fn parse_cell_attrs(attributes: &HashMap<String, String>) -> CellAttrs {
    let style = attributes.get("style").map(String::as_str).unwrap_or("");
    let lookup = |data_attr: &str, property: &str| {
        attributes
            .get(data_attr)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .or_else(|| style_property(style, property))
    };

    let span = |name: &str| {
        attributes
            .get(name)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1)
    };

    let colwidth = attributes.get("data-colwidth").and_then(|value| {
        let widths: Vec<u32> = value
            .split(',')
            .filter_map(|w| w.trim().parse().ok())
            .collect();
        if widths.is_empty() {
            None
        } else {
            Some(widths)
        }
    });

    CellAttrs {
        colspan: span("colspan"),
        rowspan: span("rowspan"),
        colwidth,
        background_color: lookup("data-background-color", "background-color"),
        text_color: lookup("data-text-color", "color"),
        text_align: lookup("data-text-align", "text-align").and_then(|s| s.parse().ok()),
        vertical_align: lookup("data-vertical-align", "vertical-align")
            .and_then(|s| s.parse().ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::{TextAlign, VerticalAlign};

    fn attributes(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_style_property_ignores_background_when_reading_color() {
        let style = "background-color: #eee !important; color: red";
        assert_eq!(style_property(style, "color").as_deref(), Some("red"));
        assert_eq!(
            style_property(style, "background-color").as_deref(),
            Some("#eee")
        );
        assert_eq!(style_property("background-color: #eee", "color"), None);
    }

    #[test]
    fn test_style_property_handles_function_values() {
        let style = "color: rgb(1, 2, 3) !important;";
        assert_eq!(
            style_property(style, "color").as_deref(),
            Some("rgb(1, 2, 3)")
        );
    }

    #[test]
    fn test_cell_style_is_important() {
        let cell = CellAttrs {
            background_color: Some("#ffeeee".to_string()),
            vertical_align: Some(VerticalAlign::Middle),
            ..CellAttrs::default()
        };

        assert_eq!(
            cell_style(&cell).as_deref(),
            Some("background-color: #ffeeee !important; vertical-align: middle !important;")
        );
        assert!(cell_style(&CellAttrs::default()).is_none());
    }

    #[test]
    fn test_parse_prefers_data_attributes() {
        let attrs = parse_cell_attrs(&attributes(&[
            ("data-background-color", "blue"),
            ("style", "background-color: red !important; text-align: right !important"),
        ]));

        assert_eq!(attrs.background_color.as_deref(), Some("blue"));
        assert_eq!(attrs.text_align, Some(TextAlign::Right));
    }

    #[test]
    fn test_parse_falls_back_to_style() {
        let attrs = parse_cell_attrs(&attributes(&[
            ("colspan", "2"),
            ("data-colwidth", "100, 50"),
            ("style", "color: #333; vertical-align: bottom"),
        ]));

        assert_eq!(attrs.colspan, 2);
        assert_eq!(attrs.rowspan, 1);
        assert_eq!(attrs.colwidth, Some(vec![100, 50]));
        assert_eq!(attrs.text_color.as_deref(), Some("#333"));
        assert_eq!(attrs.vertical_align, Some(VerticalAlign::Bottom));
        assert_eq!(attrs.background_color, None);
    }
}
