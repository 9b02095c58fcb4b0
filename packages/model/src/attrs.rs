use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Horizontal alignment of a block or table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

impl FromStr for TextAlign {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" | "end" => Ok(TextAlign::Right),
            "justify" => Ok(TextAlign::Justify),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical alignment of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Middle => "middle",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

impl FromStr for VerticalAlign {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(VerticalAlign::Top),
            "middle" | "center" => Ok(VerticalAlign::Middle),
            "bottom" => Ok(VerticalAlign::Bottom),
            _ => Err(()),
        }
    }
}

impl fmt::Display for VerticalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured attributes of a `tableHeader` / `tableCell` node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAttrs {
    pub colspan: u32,
    pub rowspan: u32,
    pub colwidth: Option<Vec<u32>>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub text_align: Option<TextAlign>,
    pub vertical_align: Option<VerticalAlign>,
}

impl Default for CellAttrs {
    fn default() -> Self {
        Self {
            colspan: 1,
            rowspan: 1,
            colwidth: None,
            background_color: None,
            text_color: None,
            text_align: None,
            vertical_align: None,
        }
    }
}

impl CellAttrs {
    /// Read cell attributes from a Tiptap `attrs` object; ill-typed values fall back to defaults
    pub fn from_json(attrs: &Map<String, Value>) -> Self {
        let colwidth = attrs.get("colwidth").and_then(Value::as_array).map(|widths| {
            widths
                .iter()
                .filter_map(Value::as_u64)
                .map(saturate_u32)
                .collect::<Vec<_>>()
        });

        Self {
            colspan: attr_u32(attrs, "colspan").unwrap_or(1).max(1),
            rowspan: attr_u32(attrs, "rowspan").unwrap_or(1).max(1),
            colwidth,
            background_color: attr_string(attrs, "backgroundColor"),
            text_color: attr_string(attrs, "textColor"),
            text_align: attr_string(attrs, "textAlign").and_then(|s| s.parse().ok()),
            vertical_align: attr_string(attrs, "verticalAlign").and_then(|s| s.parse().ok()),
        }
    }

    pub fn to_json(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert("colspan".to_string(), Value::from(self.colspan));
        attrs.insert("rowspan".to_string(), Value::from(self.rowspan));
        attrs.insert(
            "colwidth".to_string(),
            match &self.colwidth {
                Some(widths) => Value::from(widths.clone()),
                None => Value::Null,
            },
        );
        if let Some(color) = &self.background_color {
            attrs.insert("backgroundColor".to_string(), Value::from(color.as_str()));
        }
        if let Some(color) = &self.text_color {
            attrs.insert("textColor".to_string(), Value::from(color.as_str()));
        }
        if let Some(align) = self.text_align {
            attrs.insert("textAlign".to_string(), Value::from(align.as_str()));
        }
        if let Some(align) = self.vertical_align {
            attrs.insert("verticalAlign".to_string(), Value::from(align.as_str()));
        }
        attrs
    }
}

/// Non-empty string attribute
pub(crate) fn attr_string(attrs: &Map<String, Value>, key: &str) -> Option<String> {
    match attrs.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Numeric attribute, accepting numbers encoded as strings
pub(crate) fn attr_u32(attrs: &Map<String, Value>, key: &str) -> Option<u32> {
    match attrs.get(key)? {
        Value::Number(n) => n.as_u64().map(saturate_u32),
        Value::String(s) => s.trim().parse::<u64>().ok().map(saturate_u32),
        _ => None,
    }
}

fn saturate_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

pub(crate) fn attr_bool(attrs: &Map<String, Value>, key: &str) -> Option<bool> {
    match attrs.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_attrs_defaults() {
        let attrs = CellAttrs::from_json(&Map::new());
        assert_eq!(attrs, CellAttrs::default());
    }

    #[test]
    fn test_cell_attrs_from_json() {
        let value = json!({
            "colspan": 2,
            "rowspan": "3",
            "colwidth": [120, 80],
            "backgroundColor": "#ffeeee",
            "textColor": "",
            "textAlign": "center",
            "verticalAlign": "bottom"
        });
        let attrs = CellAttrs::from_json(value.as_object().unwrap());

        assert_eq!(attrs.colspan, 2);
        assert_eq!(attrs.rowspan, 3);
        assert_eq!(attrs.colwidth, Some(vec![120, 80]));
        assert_eq!(attrs.background_color.as_deref(), Some("#ffeeee"));
        assert_eq!(attrs.text_color, None);
        assert_eq!(attrs.text_align, Some(TextAlign::Center));
        assert_eq!(attrs.vertical_align, Some(VerticalAlign::Bottom));
    }

    #[test]
    fn test_oversized_numbers_saturate() {
        let value = json!({
            "colspan": 4294967298u64,
            "rowspan": "4294967297",
            "colwidth": [4294967396u64, 80]
        });
        let attrs = CellAttrs::from_json(value.as_object().unwrap());

        assert_eq!(attrs.colspan, u32::MAX);
        assert_eq!(attrs.rowspan, u32::MAX);
        assert_eq!(attrs.colwidth, Some(vec![u32::MAX, 80]));
    }

    #[test]
    fn test_unknown_alignment_is_ignored() {
        assert!("diagonal".parse::<TextAlign>().is_err());
        assert_eq!("Middle".parse::<VerticalAlign>(), Ok(VerticalAlign::Middle));
    }
}
