use actix_web::{web, HttpResponse};
use uuid::Uuid;

use super::AppState;
use crate::error::AppResult;
use crate::models::UserMessageRequest;
use crate::utils::{validate_request, ApiResponse};

/// POST /api/v1/sessions
pub async fn create_session(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let reply = state.assistant_service.start_session().await;
    Ok(HttpResponse::Created().json(ApiResponse::success(reply, "Session created successfully")))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let session = state.assistant_service.get_session(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        session,
        "Session retrieved successfully",
    )))
}

/// POST /api/v1/sessions/{id}/messages
pub async fn post_message(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UserMessageRequest>,
) -> AppResult<HttpResponse> {
    validate_request(&body.0)?;
    let reply = state
        .assistant_service
        .handle_message(path.into_inner(), &body.message)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(reply, "Message processed successfully")))
}

/// POST /api/v1/sessions/{id}/restart
pub async fn restart_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let reply = state.assistant_service.restart(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        reply,
        "Session restarted successfully",
    )))
}
