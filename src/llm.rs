//! LLM fallback for pages without deployment markers.
//!
//! The model sees a truncated copy of the body text and must answer with one
//! of the three deployment labels, verbatim. Anything else is recorded as
//! `"LLM Inference Failed"`; transport problems as `"LLM API Error"`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::deployment::{DeploymentType, UnknownReason, FALLBACK_LABELS};
use crate::error::LlmError;

/// Body characters sent to the model.
pub const MAX_PROMPT_CHARS: usize = 15_000;

/// Chat model used when none is configured.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Timeout for one model call.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(30);

const INSTRUCTIONS: &str = "You classify Alation documentation pages by the \
deployment they apply to. Answer with exactly one of the following labels \
and nothing else:";

/// A model that answers a classification prompt.
#[async_trait]
pub trait DeploymentOracle: Send + Sync {
    /// Raw answer for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// The first `max_chars` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the classification prompt for a page body.
#[must_use]
pub fn build_prompt(body: &str, max_chars: usize) -> String {
    let labels = FALLBACK_LABELS
        .iter()
        .map(|l| format!("- {l}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{INSTRUCTIONS}\n{labels}\n\nPage text:\n{}",
        truncate_chars(body, max_chars)
    )
}

/// Map a raw model answer onto the closed label set.
pub fn parse_answer(raw: &str) -> Result<DeploymentType, LlmError> {
    let answer = raw.trim();
    DeploymentType::from_label(answer).ok_or_else(|| LlmError::UnexpectedLabel(answer.to_string()))
}

/// Classify `body` with `oracle`, degrading every failure to a sentinel.
pub async fn classify_with_fallback(
    oracle: &dyn DeploymentOracle,
    body: &str,
    max_chars: usize,
    timeout: Duration,
) -> DeploymentType {
    let prompt = build_prompt(body, max_chars);
    let answer = match tokio::time::timeout(timeout, oracle.complete(&prompt)).await {
        Ok(answer) => answer,
        Err(_) => Err(LlmError::Api(format!("no answer within {timeout:?}"))),
    };

    match answer.and_then(|raw| parse_answer(&raw)) {
        Ok(deployment) => {
            debug!(deployment = %deployment, "LLM fallback classified page");
            deployment
        }
        Err(err @ LlmError::UnexpectedLabel(_)) => {
            warn!(error = %err, "LLM fallback answer rejected");
            DeploymentType::Unknown(UnknownReason::LlmInferenceFailed)
        }
        Err(err @ LlmError::Api(_)) => {
            warn!(error = %err, "LLM fallback unavailable");
            DeploymentType::Unknown(UnknownReason::LlmApiError)
        }
    }
}

#[cfg(feature = "llm")]
pub use openai::OpenAiOracle;

#[cfg(feature = "llm")]
mod openai {
    use async_openai::config::OpenAIConfig;
    use async_openai::types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    };
    use async_openai::Client;
    use async_trait::async_trait;

    use super::DeploymentOracle;
    use crate::error::LlmError;

    /// Longest label plus some slack.
    const MAX_ANSWER_TOKENS: u32 = 20;

    /// [`DeploymentOracle`] backed by the OpenAI chat completions API.
    pub struct OpenAiOracle {
        client: Client<OpenAIConfig>,
        model: String,
    }

    impl OpenAiOracle {
        /// Use `api_key`, or `OPENAI_API_KEY` from the environment when `None`.
        #[must_use]
        pub fn new(api_key: Option<&str>, model: impl Into<String>) -> Self {
            let config = match api_key {
                Some(key) => OpenAIConfig::new().with_api_key(key),
                None => OpenAIConfig::new(),
            };
            Self {
                client: Client::with_config(config),
                model: model.into(),
            }
        }
    }

    fn api_error(err: impl std::fmt::Display) -> LlmError {
        LlmError::Api(err.to_string())
    }

    #[async_trait]
    impl DeploymentOracle for OpenAiOracle {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            let messages: Vec<ChatCompletionRequestMessage> =
                vec![ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .map_err(api_error)?
                    .into()];

            let request = CreateChatCompletionRequestArgs::default()
                .model(self.model.as_str())
                .messages(messages)
                .max_tokens(MAX_ANSWER_TOKENS)
                .temperature(0.0_f32)
                .build()
                .map_err(api_error)?;

            let response = self.client.chat().create(request).await.map_err(api_error)?;

            response
                .choices
                .first()
                .and_then(|choice| choice.message.content.clone())
                .ok_or_else(|| LlmError::Api("response has no content".to_string()))
        }
    }
}
