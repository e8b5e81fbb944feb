use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::{
    auth::AuthenticatedUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use solarfin_core::quotes::{NewQuote, QuotePage, QuoteView, QuoteWithAuthor};

#[derive(Deserialize)]
struct ListQuotesQuery {
    page: Option<i64>,
    limit: Option<i64>,
}

async fn list_quotes(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<AuthenticatedUser>,
    Query(query): Query<ListQuotesQuery>,
) -> ApiResult<Json<QuotePage>> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let result = state.quote_service.get_all_quotes(
        &principal.user_id,
        page,
        limit,
        Some(&principal.role_name),
    )?;
    Ok(Json(result))
}

async fn get_quote_by_id(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> ApiResult<Json<QuoteWithAuthor>> {
    let quote = state
        .quote_service
        .get_quote_by_id(&id, &principal.user_id)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(quote))
}

async fn create_quote(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<AuthenticatedUser>,
    Json(payload): Json<NewQuote>,
) -> ApiResult<(StatusCode, Json<QuoteView>)> {
    let view = state
        .quote_service
        .create_quote(payload, &principal.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quotes", get(list_quotes).post(create_quote))
        .route("/quotes/{id}", get(get_quote_by_id))
}
