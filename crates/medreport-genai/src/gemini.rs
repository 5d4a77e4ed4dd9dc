use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ServiceCallFailure, TextGenerator};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Sent as the `x-goog-api-key` header. Calls fail with
    /// [`ServiceCallFailure::MissingApiKey`] when absent.
    pub api_key: Option<String>,
    /// Model name, e.g. "gemini-1.5-flash"
    pub model: String,
    pub api_base: String,
    /// Upper bound on a single call, connect through last body byte.
    pub request_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base: DEFAULT_API_BASE.into(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Async HTTP client for Google's Generative Language REST API.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(mut config: GeminiConfig) -> Result<Self, reqwest::Error> {
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model_hint(&self) -> Option<&str> {
        Some(&self.config.model)
    }

    async fn generate(&self, prompt: &str) -> Result<String, ServiceCallFailure> {
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ServiceCallFailure::MissingApiKey)?;

        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_failure(e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| self.transport_failure(e))?;
        debug!("gemini: {status}, {} byte body", text.len());

        if !status.is_success() {
            return Err(api_failure(status, &text));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| ServiceCallFailure::MalformedResponse(format!("json decode: {e}")))?;
        parsed.into_text()
    }
}

impl GeminiClient {
    fn transport_failure(&self, e: reqwest::Error) -> ServiceCallFailure {
        if e.is_timeout() {
            ServiceCallFailure::Timeout(self.config.request_timeout)
        } else {
            ServiceCallFailure::Transport(e.to_string())
        }
    }
}

fn api_failure(status: StatusCode, body: &str) -> ServiceCallFailure {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|env| env.error.message)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.to_string()
            }
        });
    ServiceCallFailure::Api {
        status: status.as_u16(),
        message,
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateResponse {
    /// Concatenate the text parts of the first candidate.
    fn into_text(self) -> Result<String, ServiceCallFailure> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => ServiceCallFailure::Blocked(reason),
                None => ServiceCallFailure::MalformedResponse("no candidates returned".into()),
            });
        };

        let texts: Vec<String> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if texts.is_empty() {
            return Err(match candidate.finish_reason.as_deref() {
                Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                    ServiceCallFailure::Blocked(reason.to_string())
                }
                Some(reason) => ServiceCallFailure::MalformedResponse(format!(
                    "candidate has no text (finish reason {reason})"
                )),
                None => ServiceCallFailure::MalformedResponse("candidate has no text".into()),
            });
        }

        Ok(texts.concat())
    }
}
