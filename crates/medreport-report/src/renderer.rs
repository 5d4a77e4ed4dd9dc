use std::fmt;
use std::sync::Arc;

use medreport_core::PatientCase;
use medreport_genai::TextGenerator;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::docx::Artifact;
use crate::download::{DownloadLink, REPORT_FILENAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPhase {
    Idle,
    Pending,
    Ready,
    Failed,
}

impl RenderPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderPhase::Idle => "idle",
            RenderPhase::Pending => "pending",
            RenderPhase::Ready => "ready",
            RenderPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for RenderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully generated report, ready for display and download.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedReport {
    pub prompt: String,
    /// Service output, verbatim.
    pub report: String,
    pub download: DownloadLink,
}

#[derive(Debug, Clone)]
pub enum ReportOutcome {
    Ready(RenderedReport),
    Failed { prompt: String, message: String },
}

impl ReportOutcome {
    pub fn phase(&self) -> RenderPhase {
        match self {
            ReportOutcome::Ready(_) => RenderPhase::Ready,
            ReportOutcome::Failed { .. } => RenderPhase::Failed,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            ReportOutcome::Ready(r) => &r.prompt,
            ReportOutcome::Failed { prompt, .. } => prompt,
        }
    }
}

/// Sends prompts to a text generator and packages the result for download.
pub struct ReportRenderer {
    generator: Arc<dyn TextGenerator>,
}

impl ReportRenderer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn render_case(&self, case: &PatientCase) -> ReportOutcome {
        self.render_prompt(medreport_prompts::build_prompt(case)).await
    }

    /// One call to the generator, no retry. Failures never escape as errors;
    /// they come back as [`ReportOutcome::Failed`] with a display message.
    pub async fn render_prompt(&self, prompt: String) -> ReportOutcome {
        info!(
            phase = %RenderPhase::Pending,
            backend = self.generator.name(),
            model = self.generator.model_hint().unwrap_or("-"),
            "generating report ({} char prompt)",
            prompt.len()
        );

        let report = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                if e.is_auth_or_quota() {
                    warn!(phase = %RenderPhase::Failed, "generation rejected: {e}");
                } else {
                    error!(phase = %RenderPhase::Failed, "generation failed: {e}");
                }
                return failed(prompt, &e);
            }
        };

        let artifact = match Artifact::build(&report) {
            Ok(a) => a,
            Err(e) => {
                error!(phase = %RenderPhase::Failed, "packaging report failed: {e}");
                return failed(prompt, &e);
            }
        };
        info!(
            phase = %RenderPhase::Ready,
            "report ready ({} chars, {} byte docx)",
            report.len(),
            artifact.len()
        );

        ReportOutcome::Ready(RenderedReport {
            prompt,
            report,
            download: DownloadLink::from_artifact(artifact, REPORT_FILENAME),
        })
    }
}

fn failed(prompt: String, e: &dyn std::error::Error) -> ReportOutcome {
    ReportOutcome::Failed {
        prompt,
        message: format!("Error generating report: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD as B64;
    use base64::Engine;
    use medreport_core::{BloodType, Gender, SymptomDuration};
    use medreport_genai::{MockGenerator, ServiceCallFailure};

    use super::*;
    use crate::docx::tests::paragraph_text;

    fn scenario_case() -> PatientCase {
        PatientCase {
            gender: Gender::Male,
            age: 45,
            height_cm: 175,
            weight_kg: 80,
            blood_type: BloodType::OPositive,
            allergies: "None".into(),
            symptoms: "fever for 3 days".into(),
            duration: SymptomDuration::OneToThreeDays,
            medical_history: "diabetes type 2".into(),
            current_medications: "metformin 500mg".into(),
        }
    }

    fn decode_href(href: &str) -> Vec<u8> {
        let (_, payload) = href.split_once(";base64,").unwrap();
        B64.decode(payload).unwrap()
    }

    #[tokio::test]
    async fn scenario_produces_paragraph_with_report_text() {
        let mock = Arc::new(MockGenerator::success("# Diagnosis\n..."));
        let renderer = ReportRenderer::new(mock.clone());

        let outcome = renderer.render_case(&scenario_case()).await;
        assert_eq!(outcome.phase(), RenderPhase::Ready);
        let ReportOutcome::Ready(rendered) = outcome else {
            panic!("expected ready outcome");
        };
        assert_eq!(rendered.report, "# Diagnosis\n...");
        assert_eq!(rendered.download.filename, "medical_report.docx");

        let bytes = decode_href(&rendered.download.href);
        assert_eq!(paragraph_text(&bytes, 1), "# Diagnosis\n...");

        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], rendered.prompt);
        assert!(prompts[0].contains("- fever for 3 days (Duration: 1-3 days)"));
    }

    #[tokio::test]
    async fn failure_yields_message_and_no_link() {
        let mock = Arc::new(MockGenerator::failure(ServiceCallFailure::Transport(
            "simulated outage".into(),
        )));
        let renderer = ReportRenderer::new(mock);

        let outcome = renderer.render_case(&PatientCase::default()).await;
        assert_eq!(outcome.phase(), RenderPhase::Failed);
        match outcome {
            ReportOutcome::Failed { message, prompt } => {
                assert!(message.starts_with("Error generating report: "));
                assert!(message.contains("simulated outage"));
                assert!(prompt.contains("Patient Profile:"));
            }
            ReportOutcome::Ready(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn missing_key_is_surfaced_not_raised() {
        let renderer = ReportRenderer::new(Arc::new(MockGenerator::failure(
            ServiceCallFailure::MissingApiKey,
        )));
        let outcome = renderer.render_prompt("p".into()).await;
        let ReportOutcome::Failed { message, .. } = outcome else {
            panic!("expected failure");
        };
        assert!(message.contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn unpackageable_report_fails_without_link() {
        let renderer = ReportRenderer::new(Arc::new(MockGenerator::success("a\u{b}b")));
        let outcome = renderer.render_prompt("p".into()).await;
        assert_eq!(outcome.phase(), RenderPhase::Failed);
        let ReportOutcome::Failed { message, .. } = outcome else {
            panic!("expected failure");
        };
        assert!(message.starts_with("Error generating report: "));
        assert!(message.contains("not allowed in a document"));
    }

    #[tokio::test]
    async fn prompt_is_kept_on_outcome() {
        let renderer = ReportRenderer::new(Arc::new(MockGenerator::success("ok")));
        let outcome = renderer.render_prompt("custom prompt".into()).await;
        assert_eq!(outcome.prompt(), "custom prompt");
    }

    #[test]
    fn phase_strings() {
        assert_eq!(RenderPhase::Idle.to_string(), "idle");
        assert_eq!(RenderPhase::Pending.as_str(), "pending");
    }
}
