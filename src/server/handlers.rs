use axum::body::Bytes;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use super::protocol::*;
use crate::error::CalcError;
use crate::orchestrator::Orchestrator;

pub async fn handle_calculate(
    Extension(orch): Extension<Orchestrator>,
    body: Bytes,
) -> Result<(StatusCode, Json<SubmitResponse>), CalcError> {
    // Decoded by hand so a missing or non-JSON content type is not rejected.
    let req: SubmitRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected submission body: {}", e);
        CalcError::InvalidData
    })?;

    let entry = orch.submit(&req.id, &req.expression).await?;
    Ok((StatusCode::CREATED, Json(SubmitResponse { id: entry.id })))
}

pub async fn handle_list_expressions(
    Extension(orch): Extension<Orchestrator>,
) -> Json<ExpressionsResponse> {
    Json(ExpressionsResponse {
        expressions: orch.expressions(),
    })
}

pub async fn handle_get_expression(
    Extension(orch): Extension<Orchestrator>,
    Path(id): Path<String>,
) -> Result<Json<ExpressionResponse>, CalcError> {
    let expression = orch.expression(&id)?;
    Ok(Json(ExpressionResponse { expression }))
}

pub async fn handle_poll_task(Extension(orch): Extension<Orchestrator>) -> Response {
    match orch.poll_task() {
        Some(task) => Json(task).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn handle_report_result(
    Extension(orch): Extension<Orchestrator>,
    body: Bytes,
) -> Result<StatusCode, CalcError> {
    let report: ResultReport =
        serde_json::from_slice(&body).map_err(|e| CalcError::MalformedReport(e.to_string()))?;
    orch.report_result(&report.id, report.result);
    Ok(StatusCode::OK)
}
