//! Chat-completion client for drafting commit messages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config;
use crate::error::{CredentialError, LlmError};

use super::credential::Credential;
use super::prompt::{SYSTEM_PROMPT, build_user_prompt, clean_reply};

const MAX_TOKENS: u32 = 100;
const TEMPERATURE: f32 = 0.7;

/// Drafts a commit message from the working tree status and staged diff.
///
/// This abstraction allows mocking the API in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommitMessageGenerator: Send + Sync {
    async fn generate(&self, status: &str, diff: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// OpenAI-compatible chat-completion client.
///
/// Construction never fails on a bad key: the credential problem is kept and
/// reported by [`CommitMessageGenerator::generate`] so callers fall back to
/// manual entry through the same path as any other API failure.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    credential: Result<Credential, CredentialError>,
}

impl OpenAiClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        credential: Result<Credential, CredentialError>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
            credential,
        }
    }

    /// Client configured from environment variables.
    pub fn from_env(http: reqwest::Client) -> Self {
        Self::new(
            http,
            config::openai_base_url(),
            config::openai_model(),
            Credential::from_env(),
        )
    }

    /// The credential problem, if the key is unusable.
    pub fn credential_error(&self) -> Option<CredentialError> {
        self.credential.as_ref().err().copied()
    }
}

#[async_trait]
impl CommitMessageGenerator for OpenAiClient {
    async fn generate(&self, status: &str, diff: &str) -> Result<String, LlmError> {
        let key = self.credential.as_ref().map_err(|e| LlmError::Credential(*e))?;

        let user_prompt = build_user_prompt(status, diff);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Requesting commit message from {} ({})", url, self.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(key.expose())
            .json(&request)
            .send()
            .await
            .map_err(LlmError::Transport)?;

        let status_code = response.status();
        let body = response.text().await.map_err(LlmError::Transport)?;

        if !status_code.is_success() {
            return Err(classify_api_error(status_code.as_u16(), &body));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| clean_reply(&content))
            .unwrap_or_default();

        if message.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(message)
    }
}

/// Map a non-success API response to a specific error.
fn classify_api_error(status: u16, body: &str) -> LlmError {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        let snippet: String = body.chars().take(200).collect();
        return LlmError::Api {
            status,
            message: snippet,
        };
    };

    let err = envelope.error;
    let code = err.code.as_deref().or(err.kind.as_deref());
    match code {
        Some("insufficient_quota") => LlmError::QuotaExceeded,
        Some("invalid_api_key") => LlmError::InvalidApiKey,
        _ => LlmError::Api {
            status,
            message: err.message,
        },
    }
}
