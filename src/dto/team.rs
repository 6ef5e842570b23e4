use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::TeamEntity,
    dto::{format_system_time, validation::validate_not_blank},
};

/// Payload used to register a team.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    /// Identifier of the team in the league data provider.
    #[serde(default)]
    pub slugger_team_id: Option<i64>,
}

/// Partial team update; omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateTeamRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[serde(default)]
    pub slugger_team_id: Option<i64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
/// Team as exposed to REST clients.
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub slugger_team_id: Option<i64>,
    pub created_at: String,
}

impl From<TeamEntity> for TeamResponse {
    fn from(team: TeamEntity) -> Self {
        Self {
            id: team.id,
            name: team.name,
            slugger_team_id: team.slugger_team_id,
            created_at: format_system_time(team.created_at),
        }
    }
}
