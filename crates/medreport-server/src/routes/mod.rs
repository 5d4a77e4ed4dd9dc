pub mod form;
pub mod health;
pub mod report;

use std::sync::Arc;

use axum::Router;
use medreport_report::ReportRenderer;
use tower_http::trace::TraceLayer;

pub struct InnerAppState {
    pub renderer: ReportRenderer,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(renderer: ReportRenderer) -> Router {
    let state = Arc::new(InnerAppState { renderer });

    Router::new()
        .merge(form::routes())
        .merge(report::routes())
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
