//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::net::SocketAddr;
use std::time::Duration;

use account::{AccountConfig, PgAccountRepository, account_router};
use axum::{
    Json, Router,
    extract::State,
    http::{self, Method, header},
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use platform::config::Env;
use serde_json::{Value, json};
use social::{PgSocialRepository, SocialConfig, social_router};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult, ResultExt},
    kind::ErrorKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Startup settings read from the environment
struct Settings {
    database_url: String,
    bind_addr: SocketAddr,
    max_connections: u32,
    frontend_origins: String,
    development: bool,
    password_pepper: Option<Vec<u8>>,
    reset_code_ttl_secs: u64,
    max_reset_attempts: u32,
    max_title_length: usize,
    max_content_length: usize,
}

impl Settings {
    fn load<F>(env: &Env<F>) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let development = match env.optional("APP_ENV") {
            Some(app_env) => app_env.eq_ignore_ascii_case("development"),
            None => cfg!(debug_assertions),
        };

        let password_pepper = env
            .optional("PASSWORD_PEPPER")
            .map(|b64| general_purpose::STANDARD.decode(b64))
            .transpose()?;

        let post_limits = SocialConfig::default();

        Ok(Self {
            database_url: env.required("DATABASE_URL")?,
            bind_addr: env.parse_or("BIND_ADDR", DEFAULT_BIND_ADDR.parse::<SocketAddr>()?)?,
            max_connections: env.parse_or("DB_MAX_CONNECTIONS", 5)?,
            frontend_origins: env
                .optional("FRONTEND_ORIGINS")
                .unwrap_or_else(|| DEFAULT_ORIGINS.to_string()),
            development,
            password_pepper,
            reset_code_ttl_secs: env.parse_or("RESET_CODE_TTL_SECS", 600)?,
            max_reset_attempts: env.parse_or("RESET_CODE_MAX_ATTEMPTS", 5)?,
            max_title_length: env.parse_or("POST_MAX_TITLE_LENGTH", post_limits.max_title_length)?,
            max_content_length: env
                .parse_or("POST_MAX_CONTENT_LENGTH", post_limits.max_content_length)?,
        })
    }

    fn account_config(&self) -> AccountConfig {
        let base = if self.development {
            AccountConfig::development()
        } else {
            AccountConfig::default()
        };

        AccountConfig {
            password_pepper: self.password_pepper.clone(),
            reset_code_ttl: Duration::from_secs(self.reset_code_ttl_secs),
            max_reset_attempts: self.max_reset_attempts,
            ..base
        }
    }

    fn social_config(&self) -> SocialConfig {
        SocialConfig {
            max_title_length: self.max_title_length,
            max_content_length: self.max_content_length,
        }
    }
}

/// GET /api/health
async fn health(State(pool): State<PgPool>) -> AppResult<Json<Value>> {
    let mut conn = pool
        .acquire()
        .await
        .map_app_err(ErrorKind::ServiceUnavailable, "Database unavailable")?;

    sqlx::query("SELECT 1")
        .execute(&mut *conn)
        .await
        .map_err(AppError::from)?;

    Ok(Json(json!({ "status": "ok" })))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,social=info,account=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load(&Env::process())?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = settings
        .frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let api = social_router(PgSocialRepository::new(pool.clone()), settings.social_config())
        .merge(account_router(
            PgAccountRepository::new(pool.clone()),
            settings.account_config(),
        ))
        .merge(Router::new().route("/health", get(health)).with_state(pool));

    // Build router
    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!(
        addr = %settings.bind_addr,
        development = settings.development,
        "Listening"
    );

    let listener = TcpListener::bind(settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> Env<impl Fn(&str) -> Option<String>> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Env::from_fn(move |key: &str| map.get(key).cloned())
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::load(&env(&[
            ("DATABASE_URL", "postgres://localhost/social"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(settings.bind_addr.port(), 31113);
        assert_eq!(settings.max_connections, 5);
        assert!(!settings.development);
        assert!(!settings.account_config().expose_reset_code);
        assert!(settings.account_config().pepper().is_none());
        assert_eq!(settings.social_config(), SocialConfig::default());
    }

    #[test]
    fn test_settings_overrides() {
        let settings = Settings::load(&env(&[
            ("DATABASE_URL", "postgres://localhost/social"),
            ("APP_ENV", "development"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("PASSWORD_PEPPER", "cGVwcGVy"),
            ("RESET_CODE_TTL_SECS", "60"),
            ("RESET_CODE_MAX_ATTEMPTS", "3"),
            ("POST_MAX_TITLE_LENGTH", "80"),
        ]))
        .unwrap();

        assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:8080");
        let account = settings.account_config();
        assert!(account.expose_reset_code);
        assert_eq!(account.pepper(), Some(&b"pepper"[..]));
        assert_eq!(account.reset_code_ttl, Duration::from_secs(60));
        assert_eq!(account.max_reset_attempts, 3);

        let social = settings.social_config();
        assert_eq!(social.max_title_length, 80);
        assert_eq!(social.max_content_length, 500);
    }

    #[test]
    fn test_settings_require_database_url() {
        assert!(Settings::load(&env(&[])).is_err());
        assert!(
            Settings::load(&env(&[
                ("DATABASE_URL", "postgres://localhost/social"),
                ("DB_MAX_CONNECTIONS", "many"),
            ]))
            .is_err()
        );
    }
}
