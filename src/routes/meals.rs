use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::meal::{
        CreateMealRequest, MealLookupRequest, MealPlanningEntry, MealPlansQuery, MealResponse,
        MealUpsertRequest,
    },
    error::AppError,
    services::meal_service,
    state::SharedState,
};

/// Meal plan routes.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/meals", get(list_meals).post(create_meal))
        .route("/api/meals/lookup", post(lookup_meals))
        .route("/api/meals/plans", get(meal_plans))
        .route(
            "/api/meals/game/{game_id}",
            get(get_meal_by_game).put(upsert_meal),
        )
        .route(
            "/api/meals/{id}",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

/// List every meal record, newest first.
#[utoipa::path(
    get,
    path = "/api/meals",
    tag = "meals",
    responses((status = 200, description = "Meal records", body = [MealResponse]))
)]
pub async fn list_meals(
    State(state): State<SharedState>,
) -> Result<Json<Vec<MealResponse>>, AppError> {
    Ok(Json(meal_service::list_meals(&state).await?))
}

/// Save a meal plan for the game named in the body.
#[utoipa::path(
    post,
    path = "/api/meals",
    tag = "meals",
    request_body = CreateMealRequest,
    responses(
        (status = 201, description = "Meal saved", body = MealResponse),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn create_meal(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateMealRequest>>,
) -> Result<(StatusCode, Json<MealResponse>), AppError> {
    let meal = meal_service::create_meal(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

/// Fetch the meals of several games at once.
#[utoipa::path(
    post,
    path = "/api/meals/lookup",
    tag = "meals",
    request_body = MealLookupRequest,
    responses((status = 200, description = "Meals found for the games", body = [MealResponse]))
)]
pub async fn lookup_meals(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<MealLookupRequest>>,
) -> Result<Json<Vec<MealResponse>>, AppError> {
    Ok(Json(
        meal_service::get_by_game_ids(&state, payload.game_ids).await?,
    ))
}

/// Home games of a team with their meal plans.
#[utoipa::path(
    get,
    path = "/api/meals/plans",
    tag = "meals",
    params(MealPlansQuery),
    responses((status = 200, description = "Meal planning view", body = [MealPlanningEntry]))
)]
pub async fn meal_plans(
    State(state): State<SharedState>,
    Valid(Query(query)): Valid<Query<MealPlansQuery>>,
) -> Result<Json<Vec<MealPlanningEntry>>, AppError> {
    Ok(Json(
        meal_service::meal_plans_for_team(&state, &query.team).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/meals/game/{game_id}",
    tag = "meals",
    params(("game_id" = Uuid, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Meal of the game", body = MealResponse),
        (status = 404, description = "Unknown game or no meal planned")
    )
)]
pub async fn get_meal_by_game(
    State(state): State<SharedState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<MealResponse>, AppError> {
    Ok(Json(meal_service::get_meal_by_game(&state, game_id).await?))
}

/// Create or partially update the meal plan of a game.
#[utoipa::path(
    put,
    path = "/api/meals/game/{game_id}",
    tag = "meals",
    params(("game_id" = Uuid, Path, description = "Game identifier")),
    request_body = MealUpsertRequest,
    responses(
        (status = 200, description = "Meal saved", body = MealResponse),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn upsert_meal(
    State(state): State<SharedState>,
    Path(game_id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<MealUpsertRequest>>,
) -> Result<Json<MealResponse>, AppError> {
    Ok(Json(
        meal_service::upsert(&state, game_id, payload.into()).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/meals/{id}",
    tag = "meals",
    params(("id" = Uuid, Path, description = "Meal identifier")),
    responses(
        (status = 200, description = "Meal record", body = MealResponse),
        (status = 404, description = "Unknown meal")
    )
)]
pub async fn get_meal(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MealResponse>, AppError> {
    Ok(Json(meal_service::get_meal(&state, id).await?))
}

/// Partially update a meal record by its own id.
#[utoipa::path(
    put,
    path = "/api/meals/{id}",
    tag = "meals",
    params(("id" = Uuid, Path, description = "Meal identifier")),
    request_body = MealUpsertRequest,
    responses(
        (status = 200, description = "Meal updated", body = MealResponse),
        (status = 404, description = "Unknown meal")
    )
)]
pub async fn update_meal(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<MealUpsertRequest>>,
) -> Result<Json<MealResponse>, AppError> {
    Ok(Json(
        meal_service::update_meal(&state, id, payload.into()).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/meals/{id}",
    tag = "meals",
    params(("id" = Uuid, Path, description = "Meal identifier")),
    responses(
        (status = 204, description = "Meal deleted"),
        (status = 404, description = "Unknown meal")
    )
)]
pub async fn delete_meal(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    meal_service::delete_meal(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
