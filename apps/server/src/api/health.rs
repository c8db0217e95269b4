use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use crate::{error::ApiResult, main_lib::AppState};

pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the database answers a query.
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state.birthday_service.count_birthdays(true)?;
    Ok("ok")
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
