pub mod chat;
pub mod questionnaire;
pub mod results;
pub mod session;

use actix_web::HttpResponse;
use std::sync::Arc;

use crate::config::Config;
use crate::database::DbPool;
use crate::models::QuestionBank;
use crate::repository::{ResultsRepository, SessionRepository};
use crate::services::{AdvisorService, AssistantService, SheetsService};
use crate::utils::ApiResponse;

/// Application state shared across all handlers
#[allow(dead_code)] // Fields accessed by various handlers via web::Data
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: Option<DbPool>,
    pub redis_pool: Option<deadpool_redis::Pool>,

    pub question_bank: Arc<QuestionBank>,
    pub session_repo: Arc<SessionRepository>,
    pub results_repo: Option<Arc<ResultsRepository>>,

    pub assistant_service: Arc<AssistantService>,
    pub advisor_service: Arc<AdvisorService>,
    pub sheets_service: Arc<SheetsService>,
}

/// Health check endpoint
pub async fn health_check(state: actix_web::web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        serde_json::json!({
            "status": "healthy",
            "service": "Campus ESG Backend (Rust/Actix)",
            "version": env!("CARGO_PKG_VERSION"),
            "persistence": state.db_pool.is_some(),
        }),
        "Service is healthy",
    ))
}
