use std::sync::Mutex;

use async_trait::async_trait;

use crate::{ServiceCallFailure, TextGenerator};

/// A mock generator for testing that returns a preconfigured result and
/// records every prompt it was given.
pub struct MockGenerator {
    result: Result<String, ServiceCallFailure>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    /// Create a mock that returns the given text.
    pub fn success(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that fails with the given failure.
    pub fn failure(failure: ServiceCallFailure) -> Self {
        Self {
            result: Err(failure),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ServiceCallFailure> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.result.clone()
    }
}
