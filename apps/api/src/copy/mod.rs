// Product copy generation: prompt building, the completion call with its
// text-only retry, reply parsing, normalization, and the templated fallback.
// All model calls go through llm_client::CompletionService.

pub mod exemplars;
pub mod extractor;
pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod normalizer;
pub mod prompts;
pub mod vocabulary;
