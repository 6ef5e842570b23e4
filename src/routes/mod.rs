use axum::Router;
use time::Date;

use crate::{calendar, error::AppError, state::SharedState};

pub mod docs;
pub mod games;
pub mod health;
pub mod meals;
pub mod schedule;
pub mod teams;

/// Compose all route trees under the configured base path, wiring in shared state and docs.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(teams::router())
        .merge(games::router())
        .merge(schedule::router())
        .merge(meals::router());

    let base_path = state.config().base_path().to_owned();
    let api_router = if base_path.is_empty() {
        api_router
    } else {
        Router::new().nest(&base_path, api_router)
    };

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}

/// Parse a `YYYY-MM-DD` path or query parameter.
pub(crate) fn parse_date_param(value: &str) -> Result<Date, AppError> {
    calendar::parse_date(value)
        .map_err(|_| AppError::BadRequest(format!("invalid date `{value}`, expected YYYY-MM-DD")))
}
