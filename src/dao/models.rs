use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use time::{Date, Time};
use uuid::Uuid;

/// Team known to the clubhouse (home club or opponent).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamEntity {
    /// Stable identifier for the team.
    pub id: Uuid,
    /// Display name, also used as the series label.
    pub name: String,
    /// Identifier of the team in the league data provider, when linked.
    pub slugger_team_id: Option<i64>,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
}

/// Single scheduled game between two teams.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Primary key of the game.
    pub id: Uuid,
    /// Team hosting the game.
    pub home_team_id: Uuid,
    /// Visiting team.
    pub away_team_id: Uuid,
    /// Calendar day of the game.
    pub date: Date,
    /// First pitch, when known.
    pub time: Option<Time>,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
}

/// Pre/post-game meal record attached to one game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealEntity {
    /// Primary key of the meal record.
    pub id: Uuid,
    /// Game the meal belongs to (unique across meals).
    pub game_id: Uuid,
    /// Snack served before the game.
    pub pre_game_snack: Option<String>,
    /// Meal served after the game.
    pub post_game_meal: Option<String>,
    /// Creation timestamp, also the listing order.
    pub created_at: SystemTime,
}

/// Partial update applied to a meal record.
///
/// `None` keeps the stored value; `Some` overwrites it, including with an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealPatch {
    pub pre_game_snack: Option<String>,
    pub post_game_meal: Option<String>,
}

impl MealEntity {
    /// Build the record created on the first save for `game_id`.
    pub fn create(game_id: Uuid, patch: MealPatch) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_id,
            pre_game_snack: patch.pre_game_snack,
            post_game_meal: patch.post_game_meal,
            created_at: SystemTime::now(),
        }
    }

    /// Overwrite the fields present in `patch`, leaving the others untouched.
    pub fn apply(&mut self, patch: MealPatch) {
        if let Some(snack) = patch.pre_game_snack {
            self.pre_game_snack = Some(snack);
        }
        if let Some(meal) = patch.post_game_meal {
            self.post_game_meal = Some(meal);
        }
    }
}
