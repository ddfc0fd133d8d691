use anyhow::Result;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub rust_log: String,

    // Database (optional; the service runs memory-only without it)
    pub database_url: Option<String>,

    // Redis (session snapshot cache)
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_password: String,
    pub redis_db: i64,

    // Sessions
    pub session_ttl_hours: i64,

    // Google Sheets (survey export)
    pub sheets_api_key: String,
    pub sheets_spreadsheet_id: String,
    pub sheets_range: String,

    // Advisor chat (OpenAI-compatible endpoint)
    pub advisor_api_key: String,
    pub advisor_base_url: String,
    pub advisor_model: String,
    pub advisor_max_tokens: u32,
    pub advisor_temperature: f64,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        Ok(Self {
            // Server
            port: get_env_or_default("PORT", "8080").parse().unwrap_or(8080),
            rust_log: get_env_or_default("RUST_LOG", "info"),

            // Database
            database_url,

            // Redis
            redis_host: get_env_or_default("REDIS_HOST", "localhost"),
            redis_port: get_env_or_default("REDIS_PORT", "6379").parse().unwrap_or(6379),
            redis_password: get_env_or_default("REDIS_PASSWORD", ""),
            redis_db: get_env_or_default("REDIS_DB", "0").parse().unwrap_or(0),

            // Sessions expire after a day of inactivity, like the original web client
            session_ttl_hours: get_env_or_default("SESSION_TTL_HOURS", "24")
                .parse()
                .unwrap_or(24),

            // Google Sheets
            sheets_api_key: get_env_or_default("SHEETS_API_KEY", ""),
            sheets_spreadsheet_id: get_env_or_default("SHEETS_SPREADSHEET_ID", ""),
            sheets_range: get_env_or_default("SHEETS_RANGE", "Responses!A:M"),

            // Advisor chat
            advisor_api_key: get_env_or_default("ADVISOR_API_KEY", ""),
            advisor_base_url: get_env_or_default(
                "ADVISOR_BASE_URL",
                "https://api.openai.com/v1",
            ),
            advisor_model: get_env_or_default("ADVISOR_MODEL", "gpt-4o-mini"),
            advisor_max_tokens: get_env_or_default("ADVISOR_MAX_TOKENS", "1000")
                .parse()
                .unwrap_or(1000),
            advisor_temperature: get_env_or_default("ADVISOR_TEMPERATURE", "0.7")
                .parse()
                .unwrap_or(0.7),

            // CORS
            cors_allowed_origins: get_env_or_default(
                "CORS_ALLOWED_ORIGINS",
                "http://localhost:3000,http://localhost:8080",
            ),
        })
    }

    pub fn redis_url(&self) -> String {
        if self.redis_password.is_empty() {
            format!("redis://{}:{}/{}", self.redis_host, self.redis_port, self.redis_db)
        } else {
            format!(
                "redis://:{}@{}:{}/{}",
                self.redis_password, self.redis_host, self.redis_port, self.redis_db
            )
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
