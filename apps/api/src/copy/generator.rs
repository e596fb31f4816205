//! Copywriter: orchestrates one generation request.
//!
//! Flow: sample exemplars → extract keyword hints → build prompt →
//!       completion (image attempt, then one text-only retry) →
//!       parse reply → normalize → return pair.
//!
//! Never fails: a double service failure or an unusable reply yields the
//! templated fallback description with a `note` explaining which path ran.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::copy::exemplars::ExemplarPool;
use crate::copy::extractor::{Field, FieldExtractor};
use crate::copy::fallback::FallbackWriter;
use crate::copy::normalizer::{clean_markup, CopyRules, Normalizer};
use crate::copy::prompts::{build_prompt, PromptInput};
use crate::copy::vocabulary::{KeywordHints, Vocabulary};
use crate::llm_client::{ChatPrompt, CompletionService, LlmError};

pub const NOTE_TEXT_ONLY_RETRY: &str = "first attempt failed; generated from a text-only retry";
pub const NOTE_SERVICE_UNAVAILABLE: &str =
    "generation service unavailable; templated description used";
pub const NOTE_UNPARSED_REPLY: &str = "model reply was unusable; templated description used";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub title: String,
    pub image_url: Option<String>,
}

/// The pair returned to the spreadsheet caller. Both fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub formatted_title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Outcome of parsing one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCopy {
    Parsed {
        formatted_title: String,
        description: String,
    },
    /// Nothing usable survived parsing and normalization.
    Unparsed,
}

/// Tunables for the copywriter, built from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct CopySettings {
    pub rules: CopyRules,
    pub exemplar_count: usize,
}

struct Completion {
    text: String,
    retried: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Copywriter
// ────────────────────────────────────────────────────────────────────────────

pub struct Copywriter {
    service: Arc<dyn CompletionService>,
    exemplars: ExemplarPool,
    exemplar_count: usize,
    vocabulary: Arc<Vocabulary>,
    extractor: FieldExtractor,
    normalizer: Normalizer,
    fallback: FallbackWriter,
}

impl Copywriter {
    pub fn new(
        service: Arc<dyn CompletionService>,
        settings: CopySettings,
        exemplars: ExemplarPool,
        vocabulary: Vocabulary,
    ) -> Result<Self, regex::Error> {
        let vocabulary = Arc::new(vocabulary);
        Ok(Self {
            service,
            exemplars,
            exemplar_count: settings.exemplar_count,
            extractor: FieldExtractor::new()?,
            normalizer: Normalizer::new(settings.rules, Arc::clone(&vocabulary)),
            fallback: FallbackWriter::new(Arc::clone(&vocabulary)),
            vocabulary,
        })
    }

    /// Runs the full pipeline for one request. `rng` drives exemplar sampling only.
    pub async fn generate<R: Rng + Send + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> GenerationResult {
        let prompt = self.prompt_for(request, rng);

        let completion = match self.complete_with_retry(&prompt, &request.title).await {
            Ok(completion) => completion,
            Err(e) => {
                error!(
                    "Generation failed twice for \"{}\": {e}. Using templated description.",
                    request.title
                );
                return self.fallback_result(&request.title, NOTE_SERVICE_UNAVAILABLE);
            }
        };

        info!("Model output for \"{}\":\n{}", request.title, completion.text);

        let result = match self.parse_reply(&completion.text, &request.title) {
            ParsedCopy::Parsed {
                formatted_title,
                description,
            } => GenerationResult {
                formatted_title,
                description,
                note: completion
                    .retried
                    .then(|| NOTE_TEXT_ONLY_RETRY.to_string()),
            },
            ParsedCopy::Unparsed => {
                warn!(
                    "Model reply for \"{}\" had no usable description. Using templated description.",
                    request.title
                );
                self.fallback_result(&request.title, NOTE_UNPARSED_REPLY)
            }
        };

        info!(
            "Returning for \"{}\": title={:?} description={:?}",
            request.title, result.formatted_title, result.description
        );
        result
    }

    fn prompt_for<R: Rng + ?Sized>(&self, request: &GenerationRequest, rng: &mut R) -> ChatPrompt {
        let exemplars = self.exemplars.sample(rng, self.exemplar_count);
        let hints = KeywordHints::extract(&request.title, &self.vocabulary);
        build_prompt(&PromptInput {
            title: &request.title,
            image_url: request.image_url.as_deref(),
            exemplars: &exemplars,
            hints: &hints,
            rules: self.normalizer.rules(),
            banned_openings: &self.vocabulary.banned_openings,
        })
    }

    /// Attempt 1 sends the prompt as built (image included). Any failure triggers
    /// exactly one immediate text-only retry.
    async fn complete_with_retry(
        &self,
        prompt: &ChatPrompt,
        title: &str,
    ) -> Result<Completion, LlmError> {
        match self.service.complete(prompt).await {
            Ok(text) => Ok(Completion {
                text,
                retried: false,
            }),
            Err(e) => {
                if prompt.image_url.is_some() {
                    warn!("Vision request failed for \"{title}\" ({e}), retrying without image");
                } else {
                    warn!("Generation failed for \"{title}\" ({e}), retrying once");
                }
                let text = self.service.complete(&prompt.text_only()).await?;
                Ok(Completion {
                    text,
                    retried: true,
                })
            }
        }
    }

    /// Extracts and normalizes both fields from a free-text reply.
    ///
    /// No title label: the input title is used. No description label: the reply
    /// minus any title line is used.
    pub fn parse_reply(&self, reply: &str, input_title: &str) -> ParsedCopy {
        let cleaned = clean_markup(reply);

        let title_match = self.extractor.find(Field::Title, &cleaned);
        let description_match = self.extractor.find(Field::Description, &cleaned);

        let raw_title = title_match
            .as_ref()
            .map_or(input_title, |m| m.value.as_str());

        let raw_description = match (&description_match, &title_match) {
            (Some(m), _) => m.value.clone(),
            (None, Some(t)) => {
                let mut rest = cleaned.clone();
                rest.replace_range(t.span.clone(), " ");
                rest
            }
            (None, None) => cleaned.clone(),
        };

        let formatted_title = self.normalizer.normalize_title(raw_title, &self.extractor);
        let description = self
            .normalizer
            .normalize_description(&raw_description, &self.extractor);

        if description.is_empty() {
            return ParsedCopy::Unparsed;
        }

        ParsedCopy::Parsed {
            formatted_title,
            description,
        }
    }

    fn fallback_result(&self, title: &str, note: &str) -> GenerationResult {
        let description = self.fallback.describe(title);
        GenerationResult {
            formatted_title: self.normalizer.normalize_title(title, &self.extractor),
            description: self
                .normalizer
                .normalize_description(&description, &self.extractor),
            note: Some(note.to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
