//! Report card handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use report_card_core::domain::{NewReportCard, ReportCard};

/// List all reports, newest first
pub async fn list_reports(State(state): State<AppState>) -> ApiResult<Json<Vec<ReportCard>>> {
    let reports = state.repository.list_reports().await?;
    Ok(Json(reports))
}

/// Get report by post ID
pub async fn get_report(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<ReportCard>> {
    match state.repository.get_report(&post_id).await? {
        Some(report) => Ok(Json(report)),
        None => {
            debug!("Report {} not found", post_id);
            Err(ApiError::NotFound)
        }
    }
}

/// Create a report
pub async fn create_report(
    State(state): State<AppState>,
    payload: Result<Json<NewReportCard>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ReportCard>)> {
    let Json(req) = payload?;
    let report = req.into_report();
    let created = state.repository.create_report(&report).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
