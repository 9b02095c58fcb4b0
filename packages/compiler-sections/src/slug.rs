use std::collections::HashMap;

/// Normalize heading text into a URL-safe id.
///
/// Letters and digits are lowercased, whitespace, `-` and `_` become single
/// hyphens, everything else is dropped. Leading and trailing hyphens are
/// trimmed, so `"My Section!!"` becomes `"my-section"` and `"!!!"` becomes
/// an empty string.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_hyphen = true;
        }
    }

    slug
}

/// Hands out unique ids in claim order.
///
/// The first claim of an id gets it unchanged; later claims get `-2`, `-3`
/// and so on, skipping any suffixed id that was itself claimed earlier.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    claimed: HashMap<String, usize>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: &str) -> String {
        let mut count = self.claimed.get(base).copied().unwrap_or(0);
        let mut candidate = base.to_string();

        while self.claimed.contains_key(&candidate) {
            count += 1;
            candidate = format!("{}-{}", base, count);
        }

        self.claimed.insert(base.to_string(), count.max(1));
        self.claimed.entry(candidate.clone()).or_insert(1);
        candidate
    }

    pub fn is_claimed(&self, id: &str) -> bool {
        self.claimed.contains_key(id)
    }
}
