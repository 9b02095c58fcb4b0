use crate::attrs::attr_string;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inline formatting annotation attached to a text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMark", into = "RawMark")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Link {
        href: String,
        target: Option<String>,
    },
    Highlight {
        color: Option<String>,
    },
    Subscript,
    Superscript,
    /// Mark type this crate does not know about; kept so it survives a round trip
    Unknown {
        mark_type: String,
        attrs: Map<String, Value>,
    },
}

impl Mark {
    pub fn type_name(&self) -> &str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Strike => "strike",
            Mark::Code => "code",
            Mark::Link { .. } => "link",
            Mark::Highlight { .. } => "highlight",
            Mark::Subscript => "subscript",
            Mark::Superscript => "superscript",
            Mark::Unknown { mark_type, .. } => mark_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawMark {
    #[serde(rename = "type", default)]
    mark_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Map<String, Value>>,
}

impl From<RawMark> for Mark {
    fn from(raw: RawMark) -> Self {
        let attrs = raw.attrs.unwrap_or_default();

        match raw.mark_type.as_str() {
            "bold" => Mark::Bold,
            "italic" => Mark::Italic,
            "underline" => Mark::Underline,
            "strike" => Mark::Strike,
            "code" => Mark::Code,
            "link" => Mark::Link {
                href: attr_string(&attrs, "href").unwrap_or_default(),
                target: attr_string(&attrs, "target"),
            },
            "highlight" => Mark::Highlight {
                color: attr_string(&attrs, "color"),
            },
            "subscript" => Mark::Subscript,
            "superscript" => Mark::Superscript,
            _ => Mark::Unknown {
                mark_type: raw.mark_type,
                attrs,
            },
        }
    }
}

impl From<Mark> for RawMark {
    fn from(mark: Mark) -> Self {
        let mark_type = mark.type_name().to_string();
        let attrs = match mark {
            Mark::Link { href, target } => {
                let mut attrs = Map::new();
                attrs.insert("href".to_string(), Value::from(href));
                if let Some(target) = target {
                    attrs.insert("target".to_string(), Value::from(target));
                }
                Some(attrs)
            }
            Mark::Highlight { color: Some(color) } => {
                let mut attrs = Map::new();
                attrs.insert("color".to_string(), Value::from(color));
                Some(attrs)
            }
            Mark::Unknown { attrs, .. } if !attrs.is_empty() => Some(attrs),
            _ => None,
        };

        RawMark { mark_type, attrs }
    }
}
