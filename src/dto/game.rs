use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::{Date, Time};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    calendar::{calendar_date, clock_time},
    dao::models::GameEntity,
    dto::{format_system_time, validation::validate_distinct_teams},
    state::schedule::ScheduledGame,
};

/// Payload used to schedule a game.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "validate_create_game"))]
pub struct CreateGameRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// First pitch, `HH:MM` (24h).
    #[serde(default)]
    pub time: Option<String>,
}

fn validate_create_game(request: &CreateGameRequest) -> Result<(), ValidationError> {
    validate_distinct_teams(Some(request.home_team_id), Some(request.away_team_id))
}

/// Partial game update; omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "validate_update_game"))]
pub struct UpdateGameRequest {
    #[serde(default)]
    pub home_team_id: Option<Uuid>,
    #[serde(default)]
    pub away_team_id: Option<Uuid>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

fn validate_update_game(request: &UpdateGameRequest) -> Result<(), ValidationError> {
    validate_distinct_teams(request.home_team_id, request.away_team_id)
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
/// Game joined with the names of both teams.
pub struct GameResponse {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_team_name: String,
    pub away_team_name: String,
    #[serde(with = "calendar_date")]
    #[schema(value_type = String, example = "2026-04-21")]
    pub date: Date,
    #[serde(with = "clock_time::option")]
    #[schema(value_type = Option<String>, example = "19:05")]
    pub time: Option<Time>,
    pub created_at: String,
}

impl GameResponse {
    pub fn from_entity(game: GameEntity, team_names: &HashMap<Uuid, String>) -> Self {
        let created_at = format_system_time(game.created_at);
        let scheduled = ScheduledGame::from_entity(game, team_names);
        Self {
            id: scheduled.id,
            home_team_id: scheduled.home_team_id,
            away_team_id: scheduled.away_team_id,
            home_team_name: scheduled.home_team_name,
            away_team_name: scheduled.away_team_name,
            date: scheduled.date,
            time: scheduled.time,
            created_at,
        }
    }
}
