use actix_web::{web, HttpResponse};
use uuid::Uuid;

use super::AppState;
use crate::error::AppResult;
use crate::models::{ChatMessage, UserMessageRequest};
use crate::utils::{validate_request, ApiResponse};

/// POST /api/v1/sessions/{id}/chat
pub async fn enter_chat(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let reply = state.assistant_service.enter_chat(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(reply, "Chat opened successfully")))
}

/// POST /api/v1/sessions/{id}/chat/messages
///
/// One advisor round trip: assemble the results context, call the upstream
/// model, then append both sides of the exchange to the transcript.
pub async fn post_chat_message(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UserMessageRequest>,
) -> AppResult<HttpResponse> {
    validate_request(&body.0)?;
    let session_id = path.into_inner();

    let (results, history) = state.assistant_service.chat_context(session_id).await?;
    let answer = state
        .advisor_service
        .reply(&results, &history, &body.message)
        .await?;

    let user_message = ChatMessage::user(&body.message);
    let bot_message = ChatMessage::bot(&answer);
    state
        .assistant_service
        .append_chat_turn(session_id, user_message, bot_message.clone())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        bot_message,
        "Chat message processed successfully",
    )))
}

/// POST /api/v1/sessions/{id}/chat/back
pub async fn leave_chat(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let reply = state.assistant_service.leave_chat(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(reply, "Returned to results")))
}
