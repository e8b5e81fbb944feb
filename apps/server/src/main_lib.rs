use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::auth::{decode_secret_key, AuthManager};
use crate::config::Config;
use solarfin_core::{
    db,
    quotes::{QuoteRepository, QuoteService, QuoteServiceTrait},
    users::{UserRepository, UserService, UserServiceTrait},
};

pub struct AppState {
    pub quote_service: Arc<dyn QuoteServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let user_repository = Arc::new(UserRepository::new(pool.clone()));
    let user_service: Arc<dyn UserServiceTrait> =
        Arc::new(UserService::new(user_repository.clone()));

    let quote_repository = Arc::new(QuoteRepository::new(pool.clone()));
    let quote_service: Arc<dyn QuoteServiceTrait> =
        Arc::new(QuoteService::new(quote_repository, user_repository));

    let secret = decode_secret_key(&config.jwt_secret)?;
    let auth = Arc::new(AuthManager::new(&secret, config.token_ttl));

    Ok(Arc::new(AppState {
        quote_service,
        user_service,
        auth,
    }))
}
