use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database,
    bson::{DateTime, Document, doc},
    options::{IndexOptions, ReturnDocument},
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{
        GAME_COLLECTION_NAME, MEAL_COLLECTION_NAME, MongoGameDocument, MongoMealDocument,
        MongoTeamDocument, TEAM_COLLECTION_NAME, doc_id,
    },
};
use crate::dao::{
    clubhouse_store::ClubhouseStore,
    models::{GameEntity, MealEntity, MealPatch, TeamEntity},
    storage::StorageResult,
};

#[derive(Clone)]
pub struct MongoClubhouseStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoClubhouseStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        let indexes: [(&'static str, Document, &'static str, bool); 3] = [
            (TEAM_COLLECTION_NAME, doc! {"name": 1}, "team_name_idx", false),
            (GAME_COLLECTION_NAME, doc! {"date": 1, "time": 1}, "game_date_idx", false),
            // One meal per game; the upsert relies on it.
            (MEAL_COLLECTION_NAME, doc! {"game_id": 1}, "meal_game_idx", true),
        ];

        for (collection, keys, name, unique) in indexes {
            let index = mongodb::IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .name(Some(name.to_owned()))
                        .unique(Some(unique))
                        .build(),
                )
                .build();

            database
                .collection::<Document>(collection)
                .create_index(index)
                .await
                .map_err(|source| MongoDaoError::EnsureIndex {
                    collection,
                    index: name,
                    source,
                })?;
        }

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn teams(&self) -> Collection<MongoTeamDocument> {
        self.database().await.collection(TEAM_COLLECTION_NAME)
    }

    async fn games(&self) -> Collection<MongoGameDocument> {
        self.database().await.collection(GAME_COLLECTION_NAME)
    }

    async fn meals(&self) -> Collection<MongoMealDocument> {
        self.database().await.collection(MEAL_COLLECTION_NAME)
    }

    async fn list_teams(&self) -> MongoResult<Vec<TeamEntity>> {
        let documents: Vec<MongoTeamDocument> = self
            .teams()
            .await
            .find(doc! {})
            .sort(doc! {"name": 1})
            .await
            .map_err(|source| list_error(TEAM_COLLECTION_NAME, source))?
            .try_collect()
            .await
            .map_err(|source| list_error(TEAM_COLLECTION_NAME, source))?;

        documents.into_iter().map(TeamEntity::try_from).collect()
    }

    async fn find_team(&self, id: Uuid) -> MongoResult<Option<TeamEntity>> {
        self.teams()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: TEAM_COLLECTION_NAME,
                id,
                source,
            })?
            .map(TeamEntity::try_from)
            .transpose()
    }

    async fn save_team(&self, team: TeamEntity) -> MongoResult<()> {
        let id = team.id;
        let document: MongoTeamDocument = team.into();
        self.teams()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::Save {
                collection: TEAM_COLLECTION_NAME,
                id,
                source,
            })?;
        Ok(())
    }

    async fn delete_team(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .teams()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Delete {
                collection: TEAM_COLLECTION_NAME,
                id,
                source,
            })?;
        Ok(result.deleted_count > 0)
    }

    async fn list_games(&self) -> MongoResult<Vec<GameEntity>> {
        let documents: Vec<MongoGameDocument> = self
            .games()
            .await
            .find(doc! {})
            .sort(doc! {"date": 1, "time": 1})
            .await
            .map_err(|source| list_error(GAME_COLLECTION_NAME, source))?
            .try_collect()
            .await
            .map_err(|source| list_error(GAME_COLLECTION_NAME, source))?;

        documents.into_iter().map(GameEntity::try_from).collect()
    }

    async fn find_game(&self, id: Uuid) -> MongoResult<Option<GameEntity>> {
        self.games()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: GAME_COLLECTION_NAME,
                id,
                source,
            })?
            .map(GameEntity::try_from)
            .transpose()
    }

    async fn save_game(&self, game: GameEntity) -> MongoResult<()> {
        let id = game.id;
        let document: MongoGameDocument = game.into();
        self.games()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::Save {
                collection: GAME_COLLECTION_NAME,
                id,
                source,
            })?;
        Ok(())
    }

    async fn delete_game(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .games()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Delete {
                collection: GAME_COLLECTION_NAME,
                id,
                source,
            })?;

        let meals = self
            .meals()
            .await
            .delete_many(doc! {"game_id": id.to_string()})
            .await
            .map_err(|source| MongoDaoError::Delete {
                collection: MEAL_COLLECTION_NAME,
                id,
                source,
            })?;
        if meals.deleted_count > 0 {
            debug!(game_id = %id, "removed meal attached to deleted game");
        }

        Ok(result.deleted_count > 0)
    }

    async fn find_meals(&self, filter: Document) -> MongoResult<Vec<MealEntity>> {
        let documents: Vec<MongoMealDocument> = self
            .meals()
            .await
            .find(filter)
            .sort(doc! {"created_at": -1})
            .await
            .map_err(|source| list_error(MEAL_COLLECTION_NAME, source))?
            .try_collect()
            .await
            .map_err(|source| list_error(MEAL_COLLECTION_NAME, source))?;

        documents.into_iter().map(MealEntity::try_from).collect()
    }

    async fn find_one_meal(&self, filter: Document, id: Uuid) -> MongoResult<Option<MealEntity>> {
        self.meals()
            .await
            .find_one(filter)
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: MEAL_COLLECTION_NAME,
                id,
                source,
            })?
            .map(MealEntity::try_from)
            .transpose()
    }

    async fn upsert_meal(&self, game_id: Uuid, patch: MealPatch) -> MongoResult<MealEntity> {
        // `$set` only carries the provided fields so omitted ones keep their stored value.
        let mut set = Document::new();
        if let Some(snack) = patch.pre_game_snack {
            set.insert("pre_game_snack", snack);
        }
        if let Some(meal) = patch.post_game_meal {
            set.insert("post_game_meal", meal);
        }

        let mut update = doc! {
            "$setOnInsert": {
                "_id": Uuid::new_v4().to_string(),
                "created_at": DateTime::now(),
            }
        };
        if !set.is_empty() {
            update.insert("$set", set);
        }

        let document = self
            .meals()
            .await
            .find_one_and_update(doc! {"game_id": game_id.to_string()}, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|source| MongoDaoError::UpsertMeal { game_id, source })?
            .ok_or(MongoDaoError::MissingUpsertResult { game_id })?;

        document.try_into()
    }

    async fn delete_meal(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .meals()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Delete {
                collection: MEAL_COLLECTION_NAME,
                id,
                source,
            })?;
        Ok(result.deleted_count > 0)
    }
}

fn list_error(collection: &'static str, source: mongodb::error::Error) -> MongoDaoError {
    MongoDaoError::List { collection, source }
}

impl ClubhouseStore for MongoClubhouseStore {
    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_teams().await.map_err(Into::into) })
    }

    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_team(id).await.map_err(Into::into) })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_team(team).await.map_err(Into::into) })
    }

    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_team(id).await.map_err(Into::into) })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_games().await.map_err(Into::into) })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_game(id).await.map_err(Into::into) })
    }

    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_game(game).await.map_err(Into::into) })
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_game(id).await.map_err(Into::into) })
    }

    fn list_meals(&self) -> BoxFuture<'static, StorageResult<Vec<MealEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_meals(doc! {}).await.map_err(Into::into) })
    }

    fn find_meal(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MealEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_one_meal(doc_id(id), id).await.map_err(Into::into) })
    }

    fn find_meal_by_game(
        &self,
        game_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MealEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_one_meal(doc! {"game_id": game_id.to_string()}, game_id)
                .await
                .map_err(Into::into)
        })
    }

    fn find_meals_by_games(
        &self,
        game_ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MealEntity>>> {
        let store = self.clone();
        let ids = game_ids
            .into_iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>();
        Box::pin(async move {
            store
                .find_meals(doc! {"game_id": {"$in": ids}})
                .await
                .map_err(Into::into)
        })
    }

    fn upsert_meal(
        &self,
        game_id: Uuid,
        patch: MealPatch,
    ) -> BoxFuture<'static, StorageResult<MealEntity>> {
        let store = self.clone();
        Box::pin(async move { store.upsert_meal(game_id, patch).await.map_err(Into::into) })
    }

    fn delete_meal(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_meal(id).await.map_err(Into::into) })
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
