pub mod docx;
pub mod download;
pub mod renderer;

pub use docx::{Artifact, ArtifactError, REPORT_HEADING};
pub use download::{DownloadLink, LINK_TEXT, REPORT_FILENAME};
pub use renderer::{RenderPhase, RenderedReport, ReportOutcome, ReportRenderer};
