pub mod config;
pub mod markdown;
pub mod page;
mod routes;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use anyhow::Result;
use medreport_report::ReportRenderer;
use tokio::net::TcpListener;

pub use routes::build_router;

pub async fn serve(listener: TcpListener, renderer: ReportRenderer) -> Result<()> {
    let app = routes::build_router(renderer);
    axum::serve(listener, app).await?;
    Ok(())
}
