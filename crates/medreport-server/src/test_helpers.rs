use std::sync::Arc;

use axum::Router;
use medreport_genai::{MockGenerator, ServiceCallFailure, TextGenerator};
use medreport_report::ReportRenderer;
use tokio::net::TcpListener;

/// Build a test router whose generator always returns `report`.
pub fn test_router(report: &str) -> Router {
    router_with(Arc::new(MockGenerator::success(report)))
}

/// Build a test router whose generator always fails with `failure`.
pub fn failing_router(failure: ServiceCallFailure) -> Router {
    router_with(Arc::new(MockGenerator::failure(failure)))
}

pub fn router_with(generator: Arc<dyn TextGenerator>) -> Router {
    crate::routes::build_router(ReportRenderer::new(generator))
}

/// A running test server with base_url and background task handle.
pub struct TestServer {
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

/// Spawn an axum test server on a random port. Returns the TestServer
/// with the `base_url` (e.g. "http://127.0.0.1:12345").
pub async fn spawn_test_server(generator: Arc<dyn TextGenerator>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let app = router_with(generator);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url,
        _handle: handle,
    }
}
