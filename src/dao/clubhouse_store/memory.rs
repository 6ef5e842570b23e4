//! Process-local store used when no database is configured, and by the service tests.

use std::{collections::HashSet, sync::Arc};

use dashmap::DashMap;
use futures::future::{self, BoxFuture};
use uuid::Uuid;

use crate::dao::{
    clubhouse_store::ClubhouseStore,
    models::{GameEntity, MealEntity, MealPatch, TeamEntity},
    storage::StorageResult,
};

#[derive(Clone, Default)]
pub struct MemoryClubhouseStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    teams: DashMap<Uuid, TeamEntity>,
    games: DashMap<Uuid, GameEntity>,
    /// Meals keyed by game id, which makes the game id unique per meal.
    meals: DashMap<Uuid, MealEntity>,
}

impl MemoryClubhouseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ready<T: Send + 'static>(value: T) -> BoxFuture<'static, StorageResult<T>> {
    Box::pin(future::ready(Ok(value)))
}

impl ClubhouseStore for MemoryClubhouseStore {
    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        ready(
            self.inner
                .teams
                .iter()
                .map(|entry| entry.value().clone())
                .collect(),
        )
    }

    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        ready(self.inner.teams.get(&id).map(|entry| entry.value().clone()))
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.teams.insert(team.id, team);
        ready(())
    }

    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        ready(self.inner.teams.remove(&id).is_some())
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        ready(
            self.inner
                .games
                .iter()
                .map(|entry| entry.value().clone())
                .collect(),
        )
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        ready(self.inner.games.get(&id).map(|entry| entry.value().clone()))
    }

    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.games.insert(game.id, game);
        ready(())
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let removed = self.inner.games.remove(&id).is_some();
        self.inner.meals.remove(&id);
        ready(removed)
    }

    fn list_meals(&self) -> BoxFuture<'static, StorageResult<Vec<MealEntity>>> {
        ready(
            self.inner
                .meals
                .iter()
                .map(|entry| entry.value().clone())
                .collect(),
        )
    }

    fn find_meal(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MealEntity>>> {
        ready(
            self.inner
                .meals
                .iter()
                .find(|entry| entry.value().id == id)
                .map(|entry| entry.value().clone()),
        )
    }

    fn find_meal_by_game(
        &self,
        game_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MealEntity>>> {
        ready(
            self.inner
                .meals
                .get(&game_id)
                .map(|entry| entry.value().clone()),
        )
    }

    fn find_meals_by_games(
        &self,
        game_ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MealEntity>>> {
        let wanted = game_ids.into_iter().collect::<HashSet<_>>();
        let mut meals = wanted
            .iter()
            .filter_map(|game_id| self.inner.meals.get(game_id))
            .map(|entry| entry.value().clone())
            .collect::<Vec<_>>();
        // Newest first, as the database backend returns them.
        meals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ready(meals)
    }

    fn upsert_meal(
        &self,
        game_id: Uuid,
        patch: MealPatch,
    ) -> BoxFuture<'static, StorageResult<MealEntity>> {
        // The entry guard holds the shard lock, so read-modify-write is atomic per game.
        let meal = self
            .inner
            .meals
            .entry(game_id)
            .and_modify(|meal| meal.apply(patch.clone()))
            .or_insert_with(|| MealEntity::create(game_id, patch))
            .value()
            .clone();
        ready(meal)
    }

    fn delete_meal(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let game_id = self
            .inner
            .meals
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| *entry.key());
        let removed = game_id.is_some_and(|game_id| self.inner.meals.remove(&game_id).is_some());
        ready(removed)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        ready(())
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        ready(())
    }
}
