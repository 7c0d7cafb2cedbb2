use std::env;
use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use recipebook_auth::TokenVerifier;
use recipebook_config::{AuthConfig, CorsConfig};
use recipebook_db::{init_db_pool, run_migrations};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub verifier: Arc<TokenVerifier>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, verifier: TokenVerifier, cors_config: CorsConfig) -> Self {
        Self {
            db,
            verifier: Arc::new(verifier),
            cors_config,
        }
    }
}

/// Connects the database, applies migrations and builds the token verifier.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let db = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    let verifier = TokenVerifier::new(AuthConfig::from_env())
        .context("Invalid token verification settings")?;

    Ok(AppState::new(db, verifier, CorsConfig::from_env()))
}
