//! Normalizer: cleans extracted fields and enforces the copy rules.
//!
//! Title: markup/quotes/enumeration stripped, stop words removed, capped at
//! `title_max_words`. Description: same cleanup, banned openings removed,
//! capped at `description_max_words`.

use std::sync::Arc;

use crate::copy::extractor::FieldExtractor;
use crate::copy::vocabulary::Vocabulary;

/// Length limits applied to every outgoing pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyRules {
    pub title_max_words: usize,
    pub description_max_words: usize,
    /// Append `...` to a description that had to be cut.
    pub description_ellipsis: bool,
}

impl Default for CopyRules {
    fn default() -> Self {
        Self {
            title_max_words: 4,
            description_max_words: 40,
            description_ellipsis: false,
        }
    }
}

/// Removes bold/italic/code markers and heading hashes, and swaps smart quotes for plain ones.
pub fn clean_markup(text: &str) -> String {
    let plain: String = text
        .replace("**", "")
        .replace("__", "")
        .replace('`', "")
        .chars()
        .map(|c| match c {
            '“' | '”' | '„' => '"',
            '‘' | '’' => '\'',
            other => other,
        })
        .collect();

    plain
        .lines()
        .map(|line| line.trim_start_matches('#').trim_start())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips a leading list marker: `1.`, `2)`, `-`, `*`, `•`.
pub fn strip_enumeration(text: &str) -> &str {
    let text = text.trim_start();
    let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &text[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
        return text;
    }
    match text.chars().next() {
        Some(marker @ ('-' | '*' | '•')) => text[marker.len_utf8()..].trim_start(),
        _ => text,
    }
}

fn strip_quotes(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct Normalizer {
    rules: CopyRules,
    vocabulary: Arc<Vocabulary>,
}

impl Normalizer {
    pub fn new(rules: CopyRules, vocabulary: Arc<Vocabulary>) -> Self {
        Self { rules, vocabulary }
    }

    pub fn rules(&self) -> &CopyRules {
        &self.rules
    }

    fn clean_value(&self, text: &str, extractor: &FieldExtractor) -> String {
        let cleaned = clean_markup(text);
        let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        let unlisted = strip_enumeration(&collapsed);
        let unlabelled = extractor.strip_leading_labels(unlisted);
        strip_quotes(unlabelled).to_string()
    }

    /// Stop words removed first, then the word cap applied.
    pub fn normalize_title(&self, text: &str, extractor: &FieldExtractor) -> String {
        let cleaned = self.clean_value(text, extractor);
        let title = cleaned
            .split_whitespace()
            .filter(|word| !self.vocabulary.is_stop_word(word))
            .take(self.rules.title_max_words)
            .collect::<Vec<_>>()
            .join(" ");
        title
            .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '-' | '–'))
            .trim_end()
            .to_string()
    }

    pub fn normalize_description(&self, text: &str, extractor: &FieldExtractor) -> String {
        let cleaned = self.clean_value(text, extractor);
        let opened = self.remove_banned_opening(&cleaned);
        self.truncate_words(&opened)
    }

    /// Drops a banned opening phrase (case-insensitive, whole words) and re-capitalizes.
    fn remove_banned_opening(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        for phrase in &self.vocabulary.banned_openings {
            let phrase = phrase.trim().to_lowercase();
            if phrase.is_empty() || !lower.starts_with(&phrase) {
                continue;
            }
            let Some(rest) = text.get(phrase.len()..) else {
                continue;
            };
            if rest.is_empty()
                || rest.starts_with(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            {
                let rest = rest.trim_start_matches(|c: char| {
                    c.is_whitespace() || matches!(c, ':' | ',' | '-' | '–' | '!' | '.')
                });
                return capitalize_first(rest);
            }
        }
        text.to_string()
    }

    fn truncate_words(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let limit = self.rules.description_max_words;
        if words.len() <= limit {
            return words.join(" ");
        }

        let mut kept = words[..limit].join(" ");
        if self.rules.description_ellipsis {
            let trimmed_len = kept
                .trim_end_matches(|c: char| c.is_ascii_punctuation() || c == '–')
                .len();
            kept.truncate(trimmed_len);
            kept.push_str("...");
        }
        kept
    }
}
