use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::game::{CreateGameRequest, GameResponse, UpdateGameRequest},
    error::AppError,
    routes::parse_date_param,
    services::game_service,
    state::SharedState,
};

/// Game scheduling routes.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/games", get(list_games).post(create_game))
        .route("/api/games/date/{date}", get(games_on_date))
        .route("/api/games/team/{team_id}", get(games_for_team))
        .route(
            "/api/games/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
}

/// List every game in calendar order.
#[utoipa::path(
    get,
    path = "/api/games",
    tag = "games",
    responses((status = 200, description = "Scheduled games", body = [GameResponse]))
)]
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    Ok(Json(game_service::list_games(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Game", body = GameResponse),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameResponse>, AppError> {
    Ok(Json(game_service::get_game(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/games/date/{date}",
    tag = "games",
    params(("date" = String, Path, description = "Calendar day, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Games of the day", body = [GameResponse]),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn games_on_date(
    State(state): State<SharedState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    let date = parse_date_param(&date)?;
    Ok(Json(game_service::games_on_date(&state, date).await?))
}

/// Games where the team plays at home or away.
#[utoipa::path(
    get,
    path = "/api/games/team/{team_id}",
    tag = "games",
    params(("team_id" = Uuid, Path, description = "Team identifier")),
    responses((status = 200, description = "Games of the team", body = [GameResponse]))
)]
pub async fn games_for_team(
    State(state): State<SharedState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    Ok(Json(game_service::games_for_team(&state, team_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/games",
    tag = "games",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created", body = GameResponse),
        (status = 400, description = "Invalid game"),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateGameRequest>>,
) -> Result<(StatusCode, Json<GameResponse>), AppError> {
    let game = game_service::create_game(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

#[utoipa::path(
    put,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game identifier")),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = GameResponse),
        (status = 400, description = "Invalid game"),
        (status = 404, description = "Unknown game or team")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<UpdateGameRequest>>,
) -> Result<Json<GameResponse>, AppError> {
    Ok(Json(game_service::update_game(&state, id, payload).await?))
}

/// Delete a game and its meal plan.
#[utoipa::path(
    delete,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game identifier")),
    responses(
        (status = 204, description = "Game deleted"),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    game_service::delete_game(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
