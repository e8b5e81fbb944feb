mod health;
mod quotes;
mod users;

use std::sync::Arc;

use axum::{http::HeaderValue, middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{auth, config::Config, main_lib::AppState};

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .expect("Invalid SF_CORS_ALLOW_ORIGINS entry")
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let protected = Router::new()
        .merge(quotes::router())
        .merge(users::protected_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_jwt,
        ));

    let api = Router::new()
        .merge(health::router())
        .merge(users::public_router())
        .merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
