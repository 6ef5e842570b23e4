use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::{Date, Time};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    calendar::{calendar_date, clock_time},
    dto::validation::validate_distinct_teams,
    services::schedule::HomeGamesOverview,
    state::schedule::{GameSeries, HomeGame, SeriesGame},
};

/// Optional team filter applied before series are built.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SeriesQuery {
    /// Only games where this team plays home or away.
    pub team_id: Option<Uuid>,
}

/// Parameters of the home games widget.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HomeGamesQuery {
    /// Name of the hosting team, as used for the series labels.
    pub team: String,
    /// Reference day, `YYYY-MM-DD`; defaults to the current UTC date.
    pub today: Option<String>,
}

/// Games of one series entered in a single step, e.g. three or six consecutive days.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "validate_create_series"))]
pub struct CreateSeriesRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    #[validate(length(min = 1, message = "a series needs at least one game"))]
    pub games: Vec<SeriesGameInput>,
}

fn validate_create_series(request: &CreateSeriesRequest) -> Result<(), ValidationError> {
    validate_distinct_teams(Some(request.home_team_id), Some(request.away_team_id))
}

/// Day and optional first pitch of one game in a new series.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeriesGameInput {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// First pitch, `HH:MM` (24h).
    #[serde(default)]
    pub time: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SeriesGameResponse {
    pub id: Uuid,
    #[serde(with = "calendar_date")]
    #[schema(value_type = String, example = "2026-04-21")]
    pub date: Date,
    #[serde(with = "clock_time::option")]
    #[schema(value_type = Option<String>, example = "19:05")]
    pub time: Option<Time>,
    pub game_number: u32,
}

impl From<SeriesGame> for SeriesGameResponse {
    fn from(game: SeriesGame) -> Self {
        Self {
            id: game.id,
            date: game.date,
            time: game.time,
            game_number: game.game_number,
        }
    }
}

/// Consecutive games between the same two teams.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GameSeriesResponse {
    pub id: String,
    pub home_team: String,
    pub visiting_team: String,
    pub games: Vec<SeriesGameResponse>,
}

impl From<GameSeries> for GameSeriesResponse {
    fn from(series: GameSeries) -> Self {
        Self {
            id: series.id,
            home_team: series.home_team,
            visiting_team: series.visiting_team,
            games: series.games.into_iter().map(Into::into).collect(),
        }
    }
}

/// Game of a given day with the series it belongs to.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayGameResponse {
    pub game: SeriesGameResponse,
    pub series_id: String,
    pub home_team: String,
    pub visiting_team: String,
}

impl DayGameResponse {
    pub fn new(game: &SeriesGame, series: &GameSeries) -> Self {
        Self {
            game: game.clone().into(),
            series_id: series.id.clone(),
            home_team: series.home_team.clone(),
            visiting_team: series.visiting_team.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HomeGameResponse {
    pub game: SeriesGameResponse,
    pub series_id: String,
    pub home_team: String,
    pub visiting_team: String,
}

impl From<HomeGame> for HomeGameResponse {
    fn from(home: HomeGame) -> Self {
        Self {
            game: home.game.into(),
            series_id: home.series_id,
            home_team: home.home_team,
            visiting_team: home.visiting_team,
        }
    }
}

/// Home games widget payload.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HomeGamesOverviewResponse {
    pub today_game: Option<HomeGameResponse>,
    pub next_game: Option<HomeGameResponse>,
    pub games: Vec<HomeGameResponse>,
}

impl From<HomeGamesOverview> for HomeGamesOverviewResponse {
    fn from(overview: HomeGamesOverview) -> Self {
        Self {
            today_game: overview.today_game.map(Into::into),
            next_game: overview.next_game.map(Into::into),
            games: overview.games.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of a series deletion.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteSeriesResponse {
    pub series_id: String,
    pub deleted_games: usize,
}
