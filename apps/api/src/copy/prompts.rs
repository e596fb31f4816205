// Prompt template for the copywriting call.
// Placeholders are filled by `build_prompt`; keep the reply format in sync with `copy::extractor`.

use crate::copy::normalizer::CopyRules;
use crate::copy::vocabulary::KeywordHints;
use crate::llm_client::ChatPrompt;

/// Copywriting prompt template.
/// Replace: {title_max_words}, {description_max_words}, {exemplars},
///          {banned_openings}, {keyword_hints}, {title}
pub const COPYWRITER_PROMPT_TEMPLATE: &str = r#"You are a product copywriter for a premium UK fashion brand.

1. Rewrite the product title into a polished, professional, SEO-friendly retail title (max {title_max_words} words). Leave out colours, pack sizes and gender words.
2. Write a short, stylish product description (max {description_max_words} words), matching the tone of these rotating examples:

{exemplars}

RULES:
- Do NOT open the description with {banned_openings}.
- Do NOT use markdown, bullet points or emojis.
{keyword_hints}
Reply in exactly this format:
Title: <retail title>
Description: <product description>

Original Title: "{title}""#;

/// Keyword hint line, only included when the title yielded any.
const KEYWORD_HINTS_TEMPLATE: &str = "- Details spotted in the original title: {hints}.\n";

/// Everything that varies per request.
pub struct PromptInput<'a> {
    pub title: &'a str,
    pub image_url: Option<&'a str>,
    pub exemplars: &'a [&'a str],
    pub hints: &'a KeywordHints,
    pub rules: &'a CopyRules,
    pub banned_openings: &'a [String],
}

/// Fills the template; pairs it with the image reference when there is one.
pub fn build_prompt(input: &PromptInput<'_>) -> ChatPrompt {
    let exemplars = input
        .exemplars
        .iter()
        .map(|e| format!("\"{e}\""))
        .collect::<Vec<_>>()
        .join("\n");

    let banned_openings = if input.banned_openings.is_empty() {
        "filler phrases".to_string()
    } else {
        input
            .banned_openings
            .iter()
            .map(|p| format!("\"{}\"", capitalize(p)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let keyword_hints = input
        .hints
        .summary()
        .map(|hints| KEYWORD_HINTS_TEMPLATE.replace("{hints}", &hints))
        .unwrap_or_default();

    let text = COPYWRITER_PROMPT_TEMPLATE
        .replace("{title_max_words}", &input.rules.title_max_words.to_string())
        .replace(
            "{description_max_words}",
            &input.rules.description_max_words.to_string(),
        )
        .replace("{exemplars}", &exemplars)
        .replace("{banned_openings}", &banned_openings)
        .replace("{keyword_hints}", &keyword_hints)
        .replace("{title}", input.title);

    ChatPrompt {
        text,
        image_url: input.image_url.map(str::to_string),
    }
}

fn capitalize(phrase: &str) -> String {
    let mut chars = phrase.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
