use std::{collections::HashMap, time::SystemTime};

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::TeamEntity,
    dto::team::{CreateTeamRequest, TeamResponse, UpdateTeamRequest},
    error::ServiceError,
    state::SharedState,
};

/// List every team ordered by name.
pub async fn list_teams(state: &SharedState) -> Result<Vec<TeamResponse>, ServiceError> {
    let store = state.require_store().await?;
    let mut teams = store.list_teams().await?;
    teams.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(teams.into_iter().map(TeamResponse::from).collect())
}

pub async fn get_team(state: &SharedState, id: Uuid) -> Result<TeamResponse, ServiceError> {
    Ok(require_team(state, id).await?.into())
}

pub async fn create_team(
    state: &SharedState,
    request: CreateTeamRequest,
) -> Result<TeamResponse, ServiceError> {
    let name = normalize_name(&request.name)?;
    let team = TeamEntity {
        id: Uuid::new_v4(),
        name,
        slugger_team_id: request.slugger_team_id,
        created_at: SystemTime::now(),
    };

    let store = state.require_store().await?;
    store.save_team(team.clone()).await?;
    info!(team_id = %team.id, name = %team.name, "team created");
    Ok(team.into())
}

/// Apply the provided fields, keeping the stored value for the others.
pub async fn update_team(
    state: &SharedState,
    id: Uuid,
    request: UpdateTeamRequest,
) -> Result<TeamResponse, ServiceError> {
    let mut team = require_team(state, id).await?;
    if let Some(name) = request.name.as_deref() {
        team.name = normalize_name(name)?;
    }
    if let Some(slugger_team_id) = request.slugger_team_id {
        team.slugger_team_id = Some(slugger_team_id);
    }

    let store = state.require_store().await?;
    store.save_team(team.clone()).await?;
    Ok(team.into())
}

pub async fn delete_team(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_store().await?;
    if !store.delete_team(id).await? {
        return Err(ServiceError::NotFound(format!("team `{id}` not found")));
    }
    info!(team_id = %id, "team deleted");
    Ok(())
}

/// Names of every known team, keyed by id, for joining games.
pub async fn team_names(state: &SharedState) -> Result<HashMap<Uuid, String>, ServiceError> {
    let store = state.require_store().await?;
    let teams = store.list_teams().await?;
    Ok(teams.into_iter().map(|team| (team.id, team.name)).collect())
}

pub(crate) async fn require_team(state: &SharedState, id: Uuid) -> Result<TeamEntity, ServiceError> {
    let store = state.require_store().await?;
    store
        .find_team(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("team `{id}` not found")))
}

fn normalize_name(name: &str) -> Result<String, ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::InvalidInput(
            "team name must not be empty".into(),
        ));
    }
    Ok(name.to_owned())
}
