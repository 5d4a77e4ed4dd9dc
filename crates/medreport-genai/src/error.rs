use std::time::Duration;

use thiserror::Error;

/// Any failure of a call to the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceCallFailure {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("service unreachable: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("response blocked: {0}")]
    Blocked(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ServiceCallFailure {
    /// Whether the service rejected the credentials or quota rather than the request.
    pub fn is_auth_or_quota(&self) -> bool {
        matches!(
            self,
            ServiceCallFailure::MissingApiKey
                | ServiceCallFailure::Api {
                    status: 401 | 403 | 429,
                    ..
                }
        )
    }
}
