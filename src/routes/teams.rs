use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::team::{CreateTeamRequest, TeamResponse, UpdateTeamRequest},
    error::AppError,
    services::team_service,
    state::SharedState,
};

/// Team management routes.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/teams", get(list_teams).post(create_team))
        .route(
            "/api/teams/{id}",
            get(get_team).put(update_team).delete(delete_team),
        )
}

/// List every team ordered by name.
#[utoipa::path(
    get,
    path = "/api/teams",
    tag = "teams",
    responses((status = 200, description = "Known teams", body = [TeamResponse]))
)]
pub async fn list_teams(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TeamResponse>>, AppError> {
    Ok(Json(team_service::list_teams(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Team identifier")),
    responses(
        (status = 200, description = "Team", body = TeamResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn get_team(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamResponse>, AppError> {
    Ok(Json(team_service::get_team(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/teams",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 400, description = "Invalid team")
    )
)]
pub async fn create_team(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateTeamRequest>>,
) -> Result<(StatusCode, Json<TeamResponse>), AppError> {
    let team = team_service::create_team(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Update the provided fields of a team.
#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Team identifier")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn update_team(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<UpdateTeamRequest>>,
) -> Result<Json<TeamResponse>, AppError> {
    Ok(Json(team_service::update_team(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    tag = "teams",
    params(("id" = Uuid, Path, description = "Team identifier")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    team_service::delete_team(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
