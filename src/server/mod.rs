//! HTTP surface of the orchestrator: the public calculation API plus the
//! internal endpoints remote workers poll and report to.

pub mod handlers;
pub mod protocol;

use axum::routing::{get, post};
use axum::{Extension, Router};
use tokio::net::TcpListener;

use crate::error::CalcError;
use crate::orchestrator::Orchestrator;
use handlers::*;
use protocol::*;

pub fn router(orch: Orchestrator) -> Router {
    Router::new()
        .route(ENDPOINT_CALCULATE, post(handle_calculate))
        .route(ENDPOINT_EXPRESSIONS, get(handle_list_expressions))
        .route(ENDPOINT_EXPRESSION, get(handle_get_expression))
        .route(
            ENDPOINT_INTERNAL_TASK,
            get(handle_poll_task).post(handle_report_result),
        )
        .layer(Extension(orch))
}

/// Serves the API on `listener` until the process exits.
pub async fn serve(listener: TcpListener, orch: Orchestrator) -> Result<(), CalcError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("HTTP server listening on {}", addr);
    }
    axum::serve(listener, router(orch)).await?;
    Ok(())
}
