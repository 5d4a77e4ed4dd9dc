use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use medreport_core::{PatientCase, PatientForm};
use medreport_report::{RenderPhase, RenderedReport, ReportOutcome};
use serde::Serialize;
use serde_json::{json, Value};

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/report", post(create_report))
}

#[derive(Serialize)]
struct ReportResponse {
    status: RenderPhase,
    case: PatientCase,
    #[serde(flatten)]
    rendered: RenderedReport,
}

async fn create_report(
    State(state): State<AppState>,
    Json(form): Json<PatientForm>,
) -> Result<Json<ReportResponse>, (StatusCode, Json<Value>)> {
    let case = form.into_case();
    let outcome = state.renderer.render_case(&case).await;
    let phase = outcome.phase();
    match outcome {
        ReportOutcome::Ready(rendered) => Ok(Json(ReportResponse {
            status: phase,
            case,
            rendered,
        })),
        ReportOutcome::Failed { message, .. } => Err((
            StatusCode::BAD_GATEWAY,
            Json(json!({ "status": phase.as_str(), "error": message })),
        )),
    }
}
