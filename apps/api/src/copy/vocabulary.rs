//! Vocabulary: word lists used for title filtering, keyword hints, and fallback copy.
//!
//! Immutable once loaded; shared as `Arc<Vocabulary>` by the normalizer,
//! fallback writer, and prompt builder.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Words removed from formatted titles (colors, pack sizes, gender words).
    pub stop_words: Vec<String>,
    pub colors: Vec<String>,
    pub quantities: Vec<String>,
    pub product_types: Vec<String>,
    /// Phrases a description must not open with.
    pub banned_openings: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            stop_words: owned(&[
                "black", "white", "navy", "green", "grey", "gray", "beige", "red", "blue",
                "pack", "2-pack", "3-pack", "5-pack", "multipack", "mens", "men", "kids",
                "women", "womens", "ladies", "boys", "girls", "unisex",
            ]),
            colors: owned(&[
                "black", "white", "navy", "green", "grey", "gray", "beige", "red", "blue",
                "khaki", "olive", "brown", "tan", "cream", "ecru", "stone", "charcoal", "pink",
                "burgundy", "yellow", "orange", "purple",
            ]),
            quantities: owned(&["2-pack", "3-pack", "5-pack", "multipack", "pair", "set"]),
            product_types: owned(&[
                "jacket", "coat", "blazer", "gilet", "jeans", "trousers", "chinos", "joggers",
                "shorts", "skirt", "dress", "shirt", "t-shirt", "tee", "polo", "top", "blouse",
                "jumper", "sweater", "cardigan", "hoodie", "sweatshirt", "vest", "socks",
                "boxers", "briefs", "cap", "hat", "beanie", "scarf", "belt", "sneakers",
                "trainers", "boots",
            ]),
            banned_openings: owned(&[
                "introducing",
                "meet the",
                "presenting",
                "here is",
                "this is",
            ]),
        }
    }
}

impl Vocabulary {
    /// Loads a vocabulary override file. Lists missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid vocabulary file '{}'", path.display()))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        contains_word(&self.stop_words, word)
    }
}

/// Lower-cases a token and drops apostrophes and edge punctuation, so
/// "Women's," and "womens" compare equal.
pub fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .chars()
        .filter(|c| *c != '\'' && *c != '’')
        .flat_map(char::to_lowercase)
        .collect()
}

fn contains_word(list: &[String], word: &str) -> bool {
    let needle = normalize_word(word);
    !needle.is_empty() && list.iter().any(|w| normalize_word(w) == needle)
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword hints
// ────────────────────────────────────────────────────────────────────────────

/// Details spotted in a raw product title by vocabulary lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordHints {
    pub color: Option<String>,
    /// Pack size, rendered as `N-pack` when a count was found.
    pub quantity: Option<String>,
    pub product_type: Option<String>,
}

impl KeywordHints {
    /// First color, first quantity, and last product-type token in the title.
    pub fn extract(title: &str, vocabulary: &Vocabulary) -> Self {
        let tokens: Vec<String> = title
            .split_whitespace()
            .map(normalize_word)
            .filter(|t| !t.is_empty())
            .collect();

        let color = tokens
            .iter()
            .find(|t| contains_word(&vocabulary.colors, t))
            .cloned();

        let product_type = tokens
            .iter()
            .rev()
            .find(|t| contains_word(&vocabulary.product_types, t))
            .cloned();

        Self {
            color,
            quantity: find_quantity(&tokens, vocabulary),
            product_type,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.quantity.is_none() && self.product_type.is_none()
    }

    /// One-line summary for the prompt, e.g. `colour: navy; pack: 3-pack; product type: jacket`.
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = [
            ("colour", &self.color),
            ("pack", &self.quantity),
            ("product type", &self.product_type),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| format!("{label}: {v}")))
        .collect();

        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

/// Recognizes `3-pack`, `3pk`, `3 pack`, `pack of 3`, then falls back to the quantity list.
fn find_quantity(tokens: &[String], vocabulary: &Vocabulary) -> Option<String> {
    for (i, token) in tokens.iter().enumerate() {
        let count = token
            .strip_suffix("-pack")
            .or_else(|| token.strip_suffix("pack"))
            .or_else(|| token.strip_suffix("pk"));
        if let Some(n) = count.filter(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        {
            return Some(format!("{n}-pack"));
        }

        let next = tokens.get(i + 1).map(String::as_str);
        if token.chars().all(|c| c.is_ascii_digit()) && matches!(next, Some("pack" | "pk")) {
            return Some(format!("{token}-pack"));
        }
        if token == "pack" && next == Some("of") {
            if let Some(n) = tokens
                .get(i + 2)
                .filter(|n| n.chars().all(|c| c.is_ascii_digit()))
            {
                return Some(format!("{n}-pack"));
            }
        }
    }

    tokens
        .iter()
        .find(|t| contains_word(&vocabulary.quantities, t))
        .cloned()
}
