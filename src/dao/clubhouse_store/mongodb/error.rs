use mongodb::error::Error as MongoError;
use thiserror::Error;
use uuid::Uuid;

pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("missing MongoDB environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        uri: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        attempts: u32,
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("failed to save {collection} document `{id}`")]
    Save {
        collection: &'static str,
        id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to load {collection} document `{id}`")]
    Load {
        collection: &'static str,
        id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to delete {collection} document `{id}`")]
    Delete {
        collection: &'static str,
        id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to list {collection} documents")]
    List {
        collection: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("failed to upsert meal for game `{game_id}`")]
    UpsertMeal {
        game_id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("meal upsert for game `{game_id}` returned no document")]
    MissingUpsertResult { game_id: Uuid },
    #[error("invalid {collection} document `{id}`: {reason}")]
    InvalidDocument {
        collection: &'static str,
        id: String,
        reason: String,
    },
}
