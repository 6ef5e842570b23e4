use std::time::SystemTime;

use time::{Date, Time};
use tracing::info;
use uuid::Uuid;

use crate::{
    calendar,
    dao::models::GameEntity,
    dto::game::{CreateGameRequest, GameResponse, UpdateGameRequest},
    error::ServiceError,
    services::team_service,
    state::SharedState,
};

/// List every game, earliest first; games without a time come last on their day.
pub async fn list_games(state: &SharedState) -> Result<Vec<GameResponse>, ServiceError> {
    select_games(state, |_| true).await
}

pub async fn get_game(state: &SharedState, id: Uuid) -> Result<GameResponse, ServiceError> {
    let game = require_game(state, id).await?;
    let names = team_service::team_names(state).await?;
    Ok(GameResponse::from_entity(game, &names))
}

pub async fn games_on_date(
    state: &SharedState,
    date: Date,
) -> Result<Vec<GameResponse>, ServiceError> {
    select_games(state, |game| game.date == date).await
}

/// Games where `team_id` plays at home or away.
pub async fn games_for_team(
    state: &SharedState,
    team_id: Uuid,
) -> Result<Vec<GameResponse>, ServiceError> {
    select_games(state, |game| involves(game, team_id)).await
}

pub async fn create_game(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<GameResponse, ServiceError> {
    let date = parse_date(&request.date)?;
    let time = request.time.as_deref().map(parse_time).transpose()?;
    ensure_teams(state, request.home_team_id, request.away_team_id).await?;

    let game = GameEntity {
        id: Uuid::new_v4(),
        home_team_id: request.home_team_id,
        away_team_id: request.away_team_id,
        date,
        time,
        created_at: SystemTime::now(),
    };

    let store = state.require_store().await?;
    store.save_game(game.clone()).await?;
    info!(game_id = %game.id, date = %calendar::format_date(game.date), "game created");

    let names = team_service::team_names(state).await?;
    Ok(GameResponse::from_entity(game, &names))
}

/// Apply the provided fields; the resulting pair must be two distinct teams and every team id
/// sent in the request must exist.
pub async fn update_game(
    state: &SharedState,
    id: Uuid,
    request: UpdateGameRequest,
) -> Result<GameResponse, ServiceError> {
    let mut game = require_game(state, id).await?;

    if let Some(date) = request.date.as_deref() {
        game.date = parse_date(date)?;
    }
    if let Some(time) = request.time.as_deref() {
        game.time = Some(parse_time(time)?);
    }
    if let Some(home) = request.home_team_id {
        game.home_team_id = home;
    }
    if let Some(away) = request.away_team_id {
        game.away_team_id = away;
    }
    ensure_distinct(game.home_team_id, game.away_team_id)?;
    // Only the teams named in the request must exist; the stored side is left alone.
    for team_id in [request.home_team_id, request.away_team_id].into_iter().flatten() {
        team_service::require_team(state, team_id).await?;
    }

    let store = state.require_store().await?;
    store.save_game(game.clone()).await?;

    let names = team_service::team_names(state).await?;
    Ok(GameResponse::from_entity(game, &names))
}

/// Delete a game and its meal record.
pub async fn delete_game(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_store().await?;
    if !store.delete_game(id).await? {
        return Err(ServiceError::NotFound(format!("game `{id}` not found")));
    }
    info!(game_id = %id, "game deleted");
    Ok(())
}

pub(crate) async fn require_game(state: &SharedState, id: Uuid) -> Result<GameEntity, ServiceError> {
    let store = state.require_store().await?;
    store
        .find_game(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("game `{id}` not found")))
}

/// Sort games by day, then first pitch, untimed games last.
pub(crate) fn sort_chronologically(games: &mut [GameEntity]) {
    games.sort_by_key(|game| (game.date, game.time.is_none(), game.time));
}

pub(crate) fn involves(game: &GameEntity, team_id: Uuid) -> bool {
    game.home_team_id == team_id || game.away_team_id == team_id
}

async fn select_games<P>(state: &SharedState, keep: P) -> Result<Vec<GameResponse>, ServiceError>
where
    P: Fn(&GameEntity) -> bool,
{
    let store = state.require_store().await?;
    let mut games = store.list_games().await?;
    games.retain(|game| keep(game));
    sort_chronologically(&mut games);

    let names = team_service::team_names(state).await?;
    Ok(games
        .into_iter()
        .map(|game| GameResponse::from_entity(game, &names))
        .collect())
}

pub(crate) async fn ensure_teams(
    state: &SharedState,
    home: Uuid,
    away: Uuid,
) -> Result<(), ServiceError> {
    ensure_distinct(home, away)?;
    team_service::require_team(state, home).await?;
    team_service::require_team(state, away).await?;
    Ok(())
}

fn ensure_distinct(home: Uuid, away: Uuid) -> Result<(), ServiceError> {
    if home == away {
        return Err(ServiceError::InvalidInput(
            "home and away team must differ".into(),
        ));
    }
    Ok(())
}

pub(crate) fn parse_date(value: &str) -> Result<Date, ServiceError> {
    calendar::parse_date(value).map_err(|err| {
        ServiceError::InvalidInput(format!("invalid date `{value}`, expected YYYY-MM-DD: {err}"))
    })
}

pub(crate) fn parse_time(value: &str) -> Result<Time, ServiceError> {
    calendar::parse_time(value).map_err(|err| {
        ServiceError::InvalidInput(format!("invalid time `{value}`, expected HH:MM: {err}"))
    })
}
