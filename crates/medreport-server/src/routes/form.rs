use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use medreport_core::{PatientCase, PatientForm};

use super::AppState;
use crate::page;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(show_form).post(generate_report))
}

async fn show_form() -> Html<String> {
    Html(page::render(&PatientCase::default(), None))
}

/// Handle the "Generate Medical Report" button: build the case, call the
/// service, and re-render the page with the report or the error.
async fn generate_report(
    State(state): State<AppState>,
    Form(form): Form<PatientForm>,
) -> Html<String> {
    let case = form.into_case();
    let outcome = state.renderer.render_case(&case).await;
    Html(page::render(&case, Some(&outcome)))
}
