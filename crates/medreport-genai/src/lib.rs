pub mod error;
pub mod gemini;
pub mod mock;

use async_trait::async_trait;

pub use error::ServiceCallFailure;
pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::MockGenerator;

/// Trait for generative text backends.
///
/// A backend takes one finished prompt and returns the generated text, or a
/// [`ServiceCallFailure`] describing why the call did not produce any. It does
/// not retry and does not stream.
///
/// The trait does NOT handle:
/// - Prompt assembly (handled by medreport-prompts)
/// - Packaging the text for download (handled by medreport-report)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &str;

    /// Optional model hint for logging/display purposes.
    fn model_hint(&self) -> Option<&str> {
        None
    }

    /// Submit a prompt and wait for the full response text.
    async fn generate(&self, prompt: &str) -> Result<String, ServiceCallFailure>;
}
