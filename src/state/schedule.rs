//! Schedule read models derived from stored games: series, home games and meal plans.

use std::collections::HashMap;

use time::{Date, Time};
use uuid::Uuid;

use crate::dao::models::{GameEntity, MealEntity};

/// How games between the same two teams are grouped into series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesPolicy {
    /// Every game between a pair of teams joins the first series seen for that pair.
    #[default]
    MergeByPair,
    /// Start a new series for a pair once the gap since its previous game exceeds
    /// `max_gap_days`.
    SplitOnGap { max_gap_days: u32 },
}

/// Stored game joined with the names of both teams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledGame {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_team_name: String,
    pub away_team_name: String,
    pub date: Date,
    pub time: Option<Time>,
}

impl ScheduledGame {
    /// Join `game` with the team names, falling back to `Team <id>` for unknown teams.
    pub fn from_entity(game: GameEntity, team_names: &HashMap<Uuid, String>) -> Self {
        let name_of = |id: Uuid| {
            team_names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| format!("Team {id}"))
        };

        Self {
            id: game.id,
            home_team_id: game.home_team_id,
            away_team_id: game.away_team_id,
            home_team_name: name_of(game.home_team_id),
            away_team_name: name_of(game.away_team_id),
            date: game.date,
            time: game.time,
        }
    }
}

/// One game inside a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesGame {
    pub id: Uuid,
    pub date: Date,
    pub time: Option<Time>,
    /// 1-based position in the order the game was folded into the series.
    pub game_number: u32,
}

/// Consecutive games between the same two teams, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSeries {
    /// `series-<id of the first game>`.
    pub id: String,
    pub home_team: String,
    pub visiting_team: String,
    pub games: Vec<SeriesGame>,
}

impl GameSeries {
    pub fn first_date(&self) -> Option<Date> {
        self.games.first().map(|game| game.date)
    }

    pub fn last_date(&self) -> Option<Date> {
        self.games.last().map(|game| game.date)
    }
}

/// Home game flattened out of its series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeGame {
    pub game: SeriesGame,
    pub series_id: String,
    pub home_team: String,
    pub visiting_team: String,
}

impl HomeGame {
    pub fn from_series(series: &GameSeries, game: &SeriesGame) -> Self {
        Self {
            game: game.clone(),
            series_id: series.id.clone(),
            home_team: series.home_team.clone(),
            visiting_team: series.visiting_team.clone(),
        }
    }
}

/// Pre/post-game meal plan as shown to the clubhouse staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPlan {
    pub id: Uuid,
    pub game_id: Uuid,
    pub pre_game_snack: String,
    pub post_game_meal: String,
}

impl MealPlan {
    /// A plan counts as planned once either field holds text.
    pub fn is_planned(&self) -> bool {
        !self.pre_game_snack.is_empty() || !self.post_game_meal.is_empty()
    }
}

impl From<MealEntity> for MealPlan {
    fn from(meal: MealEntity) -> Self {
        Self {
            id: meal.id,
            game_id: meal.game_id,
            pre_game_snack: meal.pre_game_snack.unwrap_or_default(),
            post_game_meal: meal.post_game_meal.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use time::macros::date;

    use super::*;

    #[test]
    fn unknown_team_names_fall_back_to_id() {
        let home = Uuid::new_v4();
        let away = Uuid::new_v4();
        let names = HashMap::from([(home, "Birds".to_string())]);
        let game = GameEntity {
            id: Uuid::new_v4(),
            home_team_id: home,
            away_team_id: away,
            date: date!(2026 - 04 - 21),
            time: None,
            created_at: SystemTime::now(),
        };

        let scheduled = ScheduledGame::from_entity(game, &names);
        assert_eq!(scheduled.home_team_name, "Birds");
        assert_eq!(scheduled.away_team_name, format!("Team {away}"));
    }

    #[test]
    fn meal_plan_is_planned_when_any_field_has_text() {
        let mut plan = MealPlan {
            id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
            pre_game_snack: String::new(),
            post_game_meal: String::new(),
        };
        assert!(!plan.is_planned());

        plan.post_game_meal = "tacos".into();
        assert!(plan.is_planned());
    }
}
