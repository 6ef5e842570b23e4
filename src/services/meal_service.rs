//! Meal plans keyed by game: partial-update upsert, batch lookup and the planning view.

use std::collections::HashMap;

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::MealPatch,
    dto::meal::{CreateMealRequest, MealPlanningEntry, MealResponse},
    error::ServiceError,
    services::{game_service, schedule::ScheduleView, schedule_service},
    state::SharedState,
};

/// Create the meal record of `game_id` or overwrite the fields present in `patch`.
///
/// Concurrent saves for the same game resolve to last writer wins per field.
pub async fn upsert(
    state: &SharedState,
    game_id: Uuid,
    patch: MealPatch,
) -> Result<MealResponse, ServiceError> {
    game_service::require_game(state, game_id).await?;

    let store = state.require_store().await?;
    let meal = store.upsert_meal(game_id, patch).await?;
    info!(game_id = %game_id, meal_id = %meal.id, "meal plan saved");
    Ok(meal.into())
}

/// Save the meal plan named by the game id in the body; same merge rules as [`upsert`].
pub async fn create_meal(
    state: &SharedState,
    request: CreateMealRequest,
) -> Result<MealResponse, ServiceError> {
    let (game_id, patch) = request.into_parts();
    upsert(state, game_id, patch).await
}

/// Overwrite the fields present in `patch` on the meal record `id`.
pub async fn update_meal(
    state: &SharedState,
    id: Uuid,
    patch: MealPatch,
) -> Result<MealResponse, ServiceError> {
    let store = state.require_store().await?;
    let Some(meal) = store.find_meal(id).await? else {
        return Err(ServiceError::NotFound(format!("meal `{id}` not found")));
    };

    let meal = store.upsert_meal(meal.game_id, patch).await?;
    info!(meal_id = %meal.id, game_id = %meal.game_id, "meal plan updated");
    Ok(meal.into())
}

/// Meals of the requested games; unknown ids are simply absent from the result.
pub async fn get_by_game_ids(
    state: &SharedState,
    game_ids: Vec<Uuid>,
) -> Result<Vec<MealResponse>, ServiceError> {
    if game_ids.is_empty() {
        return Ok(Vec::new());
    }

    let store = state.require_store().await?;
    let meals = store.find_meals_by_games(game_ids).await?;
    Ok(meals.into_iter().map(MealResponse::from).collect())
}

/// Every home game of `team` paired with its meal plan.
pub async fn meal_plans_for_team(
    state: &SharedState,
    team: &str,
) -> Result<Vec<MealPlanningEntry>, ServiceError> {
    let series = schedule_service::load_series(state, None).await?;
    let home_games = ScheduleView::new(&series).home_games(team);

    let game_ids = home_games.iter().map(|home| home.game.id).collect();
    let mut meals = get_by_game_ids(state, game_ids)
        .await?
        .into_iter()
        .map(|meal| (meal.game_id, meal))
        .collect::<HashMap<_, _>>();

    Ok(home_games
        .into_iter()
        .map(|home| {
            let meal = meals.remove(&home.game.id);
            MealPlanningEntry {
                planned: meal.as_ref().is_some_and(|meal| meal.planned),
                home_game: home.into(),
                meal,
            }
        })
        .collect())
}

/// All meal records, newest first.
pub async fn list_meals(state: &SharedState) -> Result<Vec<MealResponse>, ServiceError> {
    let store = state.require_store().await?;
    let mut meals = store.list_meals().await?;
    meals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(meals.into_iter().map(MealResponse::from).collect())
}

pub async fn get_meal(state: &SharedState, id: Uuid) -> Result<MealResponse, ServiceError> {
    let store = state.require_store().await?;
    store
        .find_meal(id)
        .await?
        .map(MealResponse::from)
        .ok_or_else(|| ServiceError::NotFound(format!("meal `{id}` not found")))
}

pub async fn get_meal_by_game(
    state: &SharedState,
    game_id: Uuid,
) -> Result<MealResponse, ServiceError> {
    game_service::require_game(state, game_id).await?;

    let store = state.require_store().await?;
    store
        .find_meal_by_game(game_id)
        .await?
        .map(MealResponse::from)
        .ok_or_else(|| ServiceError::NotFound(format!("no meal planned for game `{game_id}`")))
}

pub async fn delete_meal(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_store().await?;
    if !store.delete_meal(id).await? {
        return Err(ServiceError::NotFound(format!("meal `{id}` not found")));
    }
    info!(meal_id = %id, "meal plan deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        game_service::tests::add_game,
        team_service::tests::{add_team, memory_state},
    };

    fn patch(snack: Option<&str>, meal: Option<&str>) -> MealPatch {
        MealPatch {
            pre_game_snack: snack.map(Into::into),
            post_game_meal: meal.map(Into::into),
        }
    }

    #[tokio::test]
    async fn upsert_creates_then_merges_fields() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;
        let game = add_game(&state, birds, ducks, "2026-04-21", None).await;

        let created = upsert(&state, game, patch(Some("fruit"), None)).await.unwrap();
        assert_eq!(created.pre_game_snack, "fruit");
        assert_eq!(created.post_game_meal, "");

        let updated = upsert(&state, game, patch(None, Some("pasta"))).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.pre_game_snack, "fruit");
        assert_eq!(updated.post_game_meal, "pasta");

        let cleared = upsert(&state, game, patch(Some(""), None)).await.unwrap();
        assert_eq!(cleared.pre_game_snack, "");
        assert_eq!(cleared.post_game_meal, "pasta");

        assert_eq!(list_meals(&state).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn upsert_for_unknown_game_is_not_found() {
        let state = memory_state().await;
        let result = upsert(&state, Uuid::new_v4(), patch(Some("fruit"), None)).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert!(list_meals(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_then_update_by_meal_id() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;
        let game = add_game(&state, birds, ducks, "2026-04-21", None).await;

        let created = create_meal(
            &state,
            CreateMealRequest {
                game_id: game,
                pre_game_snack: Some("fruit".into()),
                post_game_meal: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(created.game_id, game);

        let updated = update_meal(&state, created.id, patch(None, Some("pasta")))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.pre_game_snack, "fruit");
        assert_eq!(updated.post_game_meal, "pasta");

        let again = create_meal(
            &state,
            CreateMealRequest {
                game_id: game,
                pre_game_snack: None,
                post_game_meal: Some("tacos".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(again.id, created.id);
        assert_eq!(list_meals(&state).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_unknown_meal_is_not_found() {
        let state = memory_state().await;
        let result = update_meal(&state, Uuid::new_v4(), patch(Some("fruit"), None)).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert!(list_meals(&state).await.unwrap().is_empty());

        let orphan = create_meal(
            &state,
            CreateMealRequest {
                game_id: Uuid::new_v4(),
                pre_game_snack: None,
                post_game_meal: None,
            },
        )
        .await;
        assert!(matches!(orphan, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn lookup_skips_missing_games() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;
        let planned = add_game(&state, birds, ducks, "2026-04-21", None).await;
        let unplanned = add_game(&state, birds, ducks, "2026-04-22", None).await;
        upsert(&state, planned, patch(None, Some("tacos"))).await.unwrap();

        let meals = get_by_game_ids(&state, vec![planned, unplanned, Uuid::new_v4()])
            .await
            .unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].game_id, planned);
    }

    #[tokio::test]
    async fn empty_lookup_does_not_touch_store() {
        let state = memory_state().await;
        state.update_degraded(true);
        assert!(get_by_game_ids(&state, Vec::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn planning_view_flags_planned_home_games() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;
        let first = add_game(&state, birds, ducks, "2026-04-21", None).await;
        add_game(&state, birds, ducks, "2026-04-22", None).await;
        add_game(&state, ducks, birds, "2026-05-02", None).await;
        upsert(&state, first, patch(Some("fruit"), None)).await.unwrap();

        let entries = meal_plans_for_team(&state, "Birds").await.unwrap();
        let flags = entries.iter().map(|entry| entry.planned).collect::<Vec<_>>();
        assert_eq!(flags, vec![true, false, false]);
        assert!(entries[1].meal.is_none());

        assert!(meal_plans_for_team(&state, "Ducks").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn meal_lookups_and_delete() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;
        let game = add_game(&state, birds, ducks, "2026-04-21", None).await;

        assert!(matches!(
            get_meal_by_game(&state, game).await,
            Err(ServiceError::NotFound(_))
        ));

        let meal = upsert(&state, game, patch(Some("fruit"), None)).await.unwrap();
        assert_eq!(get_meal(&state, meal.id).await.unwrap().game_id, game);
        assert_eq!(get_meal_by_game(&state, game).await.unwrap().id, meal.id);

        delete_meal(&state, meal.id).await.unwrap();
        assert!(matches!(
            get_meal(&state, meal.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
