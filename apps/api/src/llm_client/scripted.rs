//! Scripted `CompletionService` for tests: replays queued replies and records every prompt.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatPrompt, CompletionService, LlmError};

pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<ChatPrompt>>,
}

impl ScriptedCompletion {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// A service-side rejection, as the provider would return for a bad image.
    pub fn rejection() -> LlmError {
        LlmError::Api {
            status: 400,
            message: "Invalid image URL".to_string(),
        }
    }

    pub fn calls(&self) -> Vec<ChatPrompt> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(prompt.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}
