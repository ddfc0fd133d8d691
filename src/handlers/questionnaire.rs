use actix_web::{web, HttpResponse};

use super::AppState;
use crate::error::AppResult;
use crate::models::{Dimension, DimensionInfo};
use crate::utils::ApiResponse;

/// GET /api/v1/questionnaire/questions
pub async fn get_questions(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let questions = state.question_bank.all();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        questions,
        "Questions retrieved successfully",
    )))
}

/// GET /api/v1/questionnaire/dimensions
pub async fn get_dimensions(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let dimensions: Vec<DimensionInfo> = Dimension::ORDER
        .into_iter()
        .map(|d| DimensionInfo {
            dimension: d,
            title: d.to_string(),
            focus: d.focus().to_string(),
            question_count: state.question_bank.dimension_len(d),
        })
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        dimensions,
        "Dimensions retrieved successfully",
    )))
}
