//! Fallback copy: a templated description built locally from title keywords.
//! Used when the generation service is down or its reply is unusable.

use std::sync::Arc;

use crate::copy::vocabulary::{KeywordHints, Vocabulary};

const GENERIC_DESCRIPTION: &str =
    "A versatile wardrobe essential, designed for effortless style and everyday comfort.";

pub struct FallbackWriter {
    vocabulary: Arc<Vocabulary>,
}

impl FallbackWriter {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn describe(&self, title: &str) -> String {
        render(&KeywordHints::extract(title, &self.vocabulary))
    }
}

fn render(hints: &KeywordHints) -> String {
    if hints.is_empty() {
        return GENERIC_DESCRIPTION.to_string();
    }

    let subject = match (&hints.color, &hints.product_type) {
        (Some(color), Some(product)) => format!("{color} {product}"),
        (None, Some(product)) => product.clone(),
        (Some(color), None) => format!("{color} piece"),
        (None, None) => "everyday piece".to_string(),
    };

    let pack = hints
        .quantity
        .as_deref()
        .map(|quantity| format!(" ({quantity})"))
        .unwrap_or_default();

    format!(
        "Elevate your everyday wardrobe with our {subject}{pack}: effortless style made for easy wear."
    )
}
