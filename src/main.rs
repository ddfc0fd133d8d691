#![allow(dead_code)] // Some repository/model methods back endpoints that are toggled by config

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod database;
mod error;
mod handlers;
mod models;
mod repository;
mod services;
mod utils;

use config::Config;
use database::{create_pool, create_redis_pool};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let config = Arc::new(config);

    info!("Starting Campus ESG Backend on port {}", config.port);

    // Initialize database pool (optional; memory-only without DATABASE_URL)
    let db_pool = match config.database_url {
        Some(_) => {
            let pool = create_pool(&config)
                .await
                .expect("Failed to create database pool");
            database::run_migrations(&pool)
                .await
                .expect("Failed to run migrations");
            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; results will not be persisted");
            None
        }
    };

    // Initialize Redis (optional)
    let redis_pool = match create_redis_pool(&config).await {
        Ok(pool) => {
            info!("Connected to Redis");
            Some(pool)
        }
        Err(e) => {
            tracing::warn!("Redis connection failed: {}. Continuing without Redis.", e);
            None
        }
    };

    // Initialize repositories
    let question_bank = Arc::new(models::QuestionBank::new());
    let session_repo = Arc::new(repository::SessionRepository::new(
        redis_pool.clone(),
        config.session_ttl_hours,
    ));
    let results_repo = db_pool
        .clone()
        .map(|pool| Arc::new(repository::ResultsRepository::new(pool)));

    // Initialize services
    let sheets_service = Arc::new(services::SheetsService::new(config.clone()));
    let advisor_service = Arc::new(services::AdvisorService::new(config.clone()));
    let assistant_service = Arc::new(services::AssistantService::new(
        session_repo.clone(),
        question_bank.clone(),
        results_repo.clone(),
        Some(sheets_service.clone()),
    ));

    // Create application state
    let app_state = web::Data::new(handlers::AppState {
        config: config.clone(),
        db_pool,
        redis_pool,
        question_bank,
        session_repo,
        results_repo,
        assistant_service,
        advisor_service,
        sheets_service,
    });

    let server_port = config.port;
    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origin_str = origin.to_str().unwrap_or("");
                if cors_origins_inner == "*" {
                    return true;
                }
                cors_origins_inner
                    .split(',')
                    .any(|o| o.trim() == origin_str)
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
            .max_age(3600);

        // Custom JSON error handler
        let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
            let message = format!("{}", err);
            actix_web::error::InternalError::from_response(
                err,
                actix_web::HttpResponse::BadRequest().json(serde_json::json!({
                    "success": false,
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": message
                    }
                })),
            )
            .into()
        });

        App::new()
            .app_data(app_state.clone())
            .app_data(json_cfg)
            .wrap(Logger::default())
            .wrap(cors)
            // Health check
            .route("/health", web::get().to(handlers::health_check))
            // API v1 routes
            .service(
                web::scope("/api/v1")
                    // Questionnaire metadata
                    .service(
                        web::scope("/questionnaire")
                            .route(
                                "/questions",
                                web::get().to(handlers::questionnaire::get_questions),
                            )
                            .route(
                                "/dimensions",
                                web::get().to(handlers::questionnaire::get_dimensions),
                            ),
                    )
                    // Conversational sessions
                    .service(
                        web::scope("/sessions")
                            .route("", web::post().to(handlers::session::create_session))
                            .route("/{id}", web::get().to(handlers::session::get_session))
                            .route(
                                "/{id}/messages",
                                web::post().to(handlers::session::post_message),
                            )
                            .route(
                                "/{id}/restart",
                                web::post().to(handlers::session::restart_session),
                            )
                            .route(
                                "/{id}/results",
                                web::get().to(handlers::results::get_results),
                            )
                            .route("/{id}/chat", web::post().to(handlers::chat::enter_chat))
                            .route(
                                "/{id}/chat/messages",
                                web::post().to(handlers::chat::post_chat_message),
                            )
                            .route(
                                "/{id}/chat/back",
                                web::post().to(handlers::chat::leave_chat),
                            ),
                    )
                    // Persisted results
                    .route("/results", web::get().to(handlers::results::list_results)),
            )
    })
    .bind(("0.0.0.0", server_port))?
    .run()
    .await
}
