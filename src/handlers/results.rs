use actix_web::{web, HttpResponse};
use uuid::Uuid;

use super::AppState;
use crate::error::{AppError, AppResult};
use crate::models::PaginationParams;
use crate::utils::ApiResponse;

/// GET /api/v1/sessions/{id}/results
pub async fn get_results(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let results = state.assistant_service.results(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        results,
        "Results retrieved successfully",
    )))
}

/// GET /api/v1/results
///
/// Lists persisted assessment rows. Unavailable when the service runs
/// memory-only.
pub async fn list_results(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
) -> AppResult<HttpResponse> {
    let repo = state
        .results_repo
        .as_ref()
        .ok_or(AppError::ResultsStoreUnavailable)?;

    let mut pagination = query.into_inner();
    pagination.normalize();

    let (records, total) = repo.list(&pagination).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        records,
        total,
        pagination.page,
        pagination.per_page,
    )))
}
