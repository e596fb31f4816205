//! Field Extractor: locates the title and description inside a free-text model reply.
//!
//! Matchers are evaluated in priority order per field; the first capture wins.
//! The line-anchored patterns tolerate leading enumeration ("1.", "-", "•") plus up
//! to two qualifier words before the label ("Rewritten Title:", "SEO Title:"). A
//! colon-only inline pattern per field is tried last, for replies that put both
//! labels on one line. A dash separator only counts when whitespace precedes it.

use std::ops::Range;

use regex::Regex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

impl Field {
    fn other(self) -> Field {
        match self {
            Field::Title => Field::Description,
            Field::Description => Field::Title,
        }
    }
}

/// Labels in priority order. More specific labels come first.
const TITLE_LABELS: &[&str] = &["retail title", "product title", "title"];
const DESCRIPTION_LABELS: &[&str] = &["product description", "description"];

const LEADING_LABEL_PATTERN: &str =
    r"(?i)^\s*(?:[a-z]+\s+){0,2}?(?:title|description)(?:\s*:|\s+[\-–](?:\s|$))\s*";

/// Where another field's label starts inside a captured value.
const INLINE_TITLE_LABEL: &str = r"(?i)\b(?:retail[ \t]+|product[ \t]+)?title[ \t]*:";
const INLINE_DESCRIPTION_LABEL: &str = r"(?i)\b(?:product[ \t]+)?description[ \t]*:";

/// A labelled value found in the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub value: String,
    /// Byte range of the whole labelled line(s) in the searched text.
    pub span: Range<usize>,
}

#[derive(Debug)]
struct LabelMatcher {
    field: Field,
    label: &'static str,
    pattern: Regex,
}

#[derive(Debug)]
pub struct FieldExtractor {
    matchers: Vec<LabelMatcher>,
    leading_label: Regex,
    inline_title: Regex,
    inline_description: Regex,
}

impl FieldExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        let mut matchers = Vec::with_capacity(TITLE_LABELS.len() + DESCRIPTION_LABELS.len());
        for (field, labels) in [
            (Field::Title, TITLE_LABELS),
            (Field::Description, DESCRIPTION_LABELS),
        ] {
            for &label in labels {
                matchers.push(LabelMatcher {
                    field,
                    label,
                    pattern: label_pattern(label)?,
                });
            }
        }
        matchers.push(LabelMatcher {
            field: Field::Title,
            label: "inline title",
            pattern: inline_pattern(INLINE_TITLE_LABEL)?,
        });
        matchers.push(LabelMatcher {
            field: Field::Description,
            label: "inline description",
            pattern: inline_pattern(INLINE_DESCRIPTION_LABEL)?,
        });

        Ok(Self {
            matchers,
            leading_label: Regex::new(LEADING_LABEL_PATTERN)?,
            inline_title: Regex::new(INLINE_TITLE_LABEL)?,
            inline_description: Regex::new(INLINE_DESCRIPTION_LABEL)?,
        })
    }

    fn inline_label(&self, field: Field) -> &Regex {
        match field {
            Field::Title => &self.inline_title,
            Field::Description => &self.inline_description,
        }
    }

    /// Runs the matchers for `field` in order and returns the first usable capture.
    ///
    /// A capture that is itself another labelled line (an empty label followed by
    /// the next field) is skipped, and later matches of the same pattern are tried.
    /// A value is cut where the other field's label starts on the same line.
    pub fn find(&self, field: Field, text: &str) -> Option<FieldMatch> {
        let other_label = self.inline_label(field.other());
        self.matchers
            .iter()
            .filter(|m| m.field == field)
            .find_map(|m| {
                m.pattern.captures_iter(text).find_map(|caps| {
                    let whole = caps.get(0)?;
                    let group = caps.get(1)?;
                    let (value, span_end) = match other_label.find(group.as_str()) {
                        Some(cut) => (
                            group.as_str()[..cut.start()].trim_end_matches(is_value_separator),
                            group.start() + cut.start(),
                        ),
                        None => (group.as_str(), whole.end()),
                    };
                    let value = value.trim();
                    if value.is_empty() || self.leading_label.is_match(value) {
                        debug!("Label '{}' matched without a usable value", m.label);
                        return None;
                    }
                    Some(FieldMatch {
                        value: value.to_string(),
                        span: whole.start()..span_end,
                    })
                })
            })
    }

    /// Removes any number of leaked field labels from the start of a value.
    pub fn strip_leading_labels<'a>(&self, text: &'a str) -> &'a str {
        let mut rest = text.trim_start();
        while let Some(m) = self.leading_label.find(rest) {
            rest = &rest[m.end()..];
        }
        rest
    }
}

/// Punctuation joining two labelled fields on one line ("Wool Coat | Description: ...").
fn is_value_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '|' | ';' | ',' | '/' | '-' | '–' | '"' | '\'')
}

fn label_pattern(label: &str) -> Result<Regex, regex::Error> {
    let label = regex::escape(label).replace(' ', r"\s+");
    Regex::new(&format!(
        r#"(?im)^[ \t>#*•\-\d.)]*(?:[a-z]+[ \t]+){{0,2}}?{label}(?:[ \t]*:|[ \t]+[\-–](?:[ \t]|$))[ \t]*\n?[ \t]*["']?(.+?)["']?[ \t\r]*$"#
    ))
}

fn inline_pattern(label: &str) -> Result<Regex, regex::Error> {
    let label = label.trim_start_matches("(?i)");
    Regex::new(&format!(r#"(?im){label}[ \t]*["']?(.+?)["']?[ \t\r]*$"#))
}
