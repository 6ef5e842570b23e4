use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use axum_valid::Valid;
use time::OffsetDateTime;

use crate::{
    dto::schedule::{
        CreateSeriesRequest, DayGameResponse, DeleteSeriesResponse, GameSeriesResponse,
        HomeGamesOverviewResponse, HomeGamesQuery, SeriesQuery,
    },
    error::AppError,
    routes::parse_date_param,
    services::schedule_service,
    state::SharedState,
};

/// Routes exposing series and schedule queries.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/schedule/series", get(list_series).post(create_series))
        .route("/api/schedule/series/{series_id}", delete(delete_series))
        .route("/api/schedule/date/{date}", get(games_on_date))
        .route("/api/schedule/home", get(home_games))
}

/// Series built from the stored games, ordered by first game date.
#[utoipa::path(
    get,
    path = "/api/schedule/series",
    tag = "schedule",
    params(SeriesQuery),
    responses((status = 200, description = "Game series", body = [GameSeriesResponse]))
)]
pub async fn list_series(
    State(state): State<SharedState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Vec<GameSeriesResponse>>, AppError> {
    Ok(Json(
        schedule_service::list_series(&state, query.team_id).await?,
    ))
}

/// Schedule the games of a series between two teams in one request.
#[utoipa::path(
    post,
    path = "/api/schedule/series",
    tag = "schedule",
    request_body = CreateSeriesRequest,
    responses(
        (status = 201, description = "Series scheduled", body = GameSeriesResponse),
        (status = 400, description = "Same team twice, no games or malformed date"),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn create_series(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateSeriesRequest>>,
) -> Result<(StatusCode, Json<GameSeriesResponse>), AppError> {
    let series = schedule_service::create_series(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(series)))
}

/// Delete every game of a series.
#[utoipa::path(
    delete,
    path = "/api/schedule/series/{series_id}",
    tag = "schedule",
    params(
        ("series_id" = String, Path, description = "Series identifier, `series-<first game id>`"),
        SeriesQuery
    ),
    responses(
        (status = 200, description = "Series deleted", body = DeleteSeriesResponse),
        (status = 404, description = "Unknown series")
    )
)]
pub async fn delete_series(
    State(state): State<SharedState>,
    Path(series_id): Path<String>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<DeleteSeriesResponse>, AppError> {
    Ok(Json(
        schedule_service::delete_series(&state, &series_id, query.team_id).await?,
    ))
}

/// Games of a day with their series, earliest first pitch first.
#[utoipa::path(
    get,
    path = "/api/schedule/date/{date}",
    tag = "schedule",
    params(("date" = String, Path, description = "Calendar day, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Games of the day", body = [DayGameResponse]),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn games_on_date(
    State(state): State<SharedState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<DayGameResponse>>, AppError> {
    let date = parse_date_param(&date)?;
    Ok(Json(schedule_service::games_on_date(&state, date).await?))
}

/// Home games of a team with today's and the next game highlighted.
#[utoipa::path(
    get,
    path = "/api/schedule/home",
    tag = "schedule",
    params(HomeGamesQuery),
    responses(
        (status = 200, description = "Home games overview", body = HomeGamesOverviewResponse),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn home_games(
    State(state): State<SharedState>,
    Query(query): Query<HomeGamesQuery>,
) -> Result<Json<HomeGamesOverviewResponse>, AppError> {
    let today = match query.today.as_deref() {
        Some(value) => parse_date_param(value)?,
        None => OffsetDateTime::now_utc().date(),
    };
    Ok(Json(
        schedule_service::home_games_overview(&state, &query.team, today).await?,
    ))
}
