pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{GameEntity, MealEntity, MealPatch, TeamEntity};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

pub use memory::MemoryClubhouseStore;

/// Abstraction over the persistence layer for teams, games and meal records.
pub trait ClubhouseStore: Send + Sync {
    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Delete a game together with its meal record.
    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;

    fn list_meals(&self) -> BoxFuture<'static, StorageResult<Vec<MealEntity>>>;
    fn find_meal(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MealEntity>>>;
    fn find_meal_by_game(
        &self,
        game_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MealEntity>>>;
    fn find_meals_by_games(
        &self,
        game_ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MealEntity>>>;
    /// Insert-or-update the meal keyed by `game_id` in a single atomic step.
    fn upsert_meal(
        &self,
        game_id: Uuid,
        patch: MealPatch,
    ) -> BoxFuture<'static, StorageResult<MealEntity>>;
    fn delete_meal(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;

    /// Short backend label reported by the health route.
    fn backend_name(&self) -> &'static str;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
