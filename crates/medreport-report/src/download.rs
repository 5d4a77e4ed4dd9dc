use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::Serialize;

use crate::docx::{Artifact, DOCX_MIME};

pub const REPORT_FILENAME: &str = "medical_report.docx";
pub const LINK_TEXT: &str = "Download Full Medical Report";

/// An in-page download link carrying the whole artifact as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub filename: String,
    pub href: String,
}

impl DownloadLink {
    /// Consume the artifact and encode it. The artifact cannot be reused.
    pub fn from_artifact(artifact: Artifact, filename: &str) -> Self {
        let encoded = B64.encode(artifact.into_bytes());
        Self {
            filename: filename.to_string(),
            href: format!("data:{DOCX_MIME};base64,{encoded}"),
        }
    }

    /// Anchor element for embedding in the result page.
    pub fn to_html(&self) -> String {
        format!(
            "<a href=\"{}\" download=\"{}\">{LINK_TEXT}</a>",
            self.href,
            self.filename.replace('&', "&amp;").replace('"', "&quot;")
        )
    }
}
