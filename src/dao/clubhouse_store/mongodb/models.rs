use mongodb::bson::{DateTime, Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::MongoDaoError;
use crate::{
    calendar::{format_date, format_time, parse_date, parse_time},
    dao::models::{GameEntity, MealEntity, TeamEntity},
};

pub const TEAM_COLLECTION_NAME: &str = "teams";
pub const GAME_COLLECTION_NAME: &str = "games";
pub const MEAL_COLLECTION_NAME: &str = "meals";

// Identifiers are stored as hyphenated strings so documents stay readable in the shell.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoTeamDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slugger_team_id: Option<i64>,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    /// `YYYY-MM-DD`, which keeps lexicographic and chronological order aligned.
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMealDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub game_id: String,
    #[serde(default)]
    pub pre_game_snack: Option<String>,
    #[serde(default)]
    pub post_game_meal: Option<String>,
    pub created_at: DateTime,
}

impl From<TeamEntity> for MongoTeamDocument {
    fn from(value: TeamEntity) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            slugger_team_id: value.slugger_team_id,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl TryFrom<MongoTeamDocument> for TeamEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoTeamDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(TEAM_COLLECTION_NAME, &value.id, &value.id)?,
            name: value.name,
            slugger_team_id: value.slugger_team_id,
            created_at: value.created_at.to_system_time(),
        })
    }
}

impl From<GameEntity> for MongoGameDocument {
    fn from(value: GameEntity) -> Self {
        Self {
            id: value.id.to_string(),
            home_team_id: value.home_team_id.to_string(),
            away_team_id: value.away_team_id.to_string(),
            date: format_date(value.date),
            time: value.time.map(format_time),
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl TryFrom<MongoGameDocument> for GameEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoGameDocument) -> Result<Self, Self::Error> {
        let invalid = |reason: String| MongoDaoError::InvalidDocument {
            collection: GAME_COLLECTION_NAME,
            id: value.id.clone(),
            reason,
        };

        let date = parse_date(&value.date).map_err(|err| invalid(format!("date: {err}")))?;
        let time = value
            .time
            .as_deref()
            .map(parse_time)
            .transpose()
            .map_err(|err| invalid(format!("time: {err}")))?;

        Ok(Self {
            id: parse_uuid(GAME_COLLECTION_NAME, &value.id, &value.id)?,
            home_team_id: parse_uuid(GAME_COLLECTION_NAME, &value.id, &value.home_team_id)?,
            away_team_id: parse_uuid(GAME_COLLECTION_NAME, &value.id, &value.away_team_id)?,
            date,
            time,
            created_at: value.created_at.to_system_time(),
        })
    }
}

impl TryFrom<MongoMealDocument> for MealEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoMealDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(MEAL_COLLECTION_NAME, &value.id, &value.id)?,
            game_id: parse_uuid(MEAL_COLLECTION_NAME, &value.id, &value.game_id)?,
            pre_game_snack: value.pre_game_snack,
            post_game_meal: value.post_game_meal,
            created_at: value.created_at.to_system_time(),
        })
    }
}

fn parse_uuid(collection: &'static str, doc_id: &str, value: &str) -> Result<Uuid, MongoDaoError> {
    Uuid::parse_str(value).map_err(|err| MongoDaoError::InvalidDocument {
        collection,
        id: doc_id.to_owned(),
        reason: err.to_string(),
    })
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": id.to_string()}
}
