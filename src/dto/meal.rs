use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{MealEntity, MealPatch},
    dto::{format_system_time, schedule::HomeGameResponse, validation::validate_not_blank},
    state::schedule::MealPlan,
};

/// Partial meal update for one game.
///
/// An omitted or `null` field keeps the stored value; an empty string clears it.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct MealUpsertRequest {
    #[serde(default)]
    pub pre_game_snack: Option<String>,
    #[serde(default)]
    pub post_game_meal: Option<String>,
}

impl From<MealUpsertRequest> for MealPatch {
    fn from(request: MealUpsertRequest) -> Self {
        Self {
            pre_game_snack: request.pre_game_snack,
            post_game_meal: request.post_game_meal,
        }
    }
}

/// Meal plan for a game, addressed by the game id in the body.
///
/// Saving a second meal for the same game merges into the existing record.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateMealRequest {
    pub game_id: Uuid,
    #[serde(default)]
    pub pre_game_snack: Option<String>,
    #[serde(default)]
    pub post_game_meal: Option<String>,
}

impl CreateMealRequest {
    pub fn into_parts(self) -> (Uuid, MealPatch) {
        (
            self.game_id,
            MealPatch {
                pre_game_snack: self.pre_game_snack,
                post_game_meal: self.post_game_meal,
            },
        )
    }
}

/// Batch lookup of meals by game.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct MealLookupRequest {
    pub game_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct MealPlansQuery {
    /// Name of the hosting team.
    #[validate(custom(function = "validate_not_blank"))]
    pub team: String,
}

/// Stored meal plan of a game.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MealResponse {
    pub id: Uuid,
    pub game_id: Uuid,
    pub pre_game_snack: String,
    pub post_game_meal: String,
    /// True once either field holds text.
    pub planned: bool,
    pub created_at: String,
}

impl From<MealEntity> for MealResponse {
    fn from(meal: MealEntity) -> Self {
        let created_at = format_system_time(meal.created_at);
        let plan = MealPlan::from(meal);
        Self {
            planned: plan.is_planned(),
            id: plan.id,
            game_id: plan.game_id,
            pre_game_snack: plan.pre_game_snack,
            post_game_meal: plan.post_game_meal,
            created_at,
        }
    }
}

/// Home game with its meal plan, as shown on the meal planning page.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MealPlanningEntry {
    pub home_game: HomeGameResponse,
    pub meal: Option<MealResponse>,
    pub planned: bool,
}
