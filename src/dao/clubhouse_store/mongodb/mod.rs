mod config;
mod connection;
mod error;
mod models;
pub mod store;

pub use config::MongoConfig;
pub use error::MongoDaoError;
pub use store::MongoClubhouseStore;

use crate::dao::storage::StorageError;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::InvalidDocument {
                collection,
                id,
                reason,
            } => StorageError::Corrupt {
                collection,
                message: format!("`{id}`: {reason}"),
            },
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}
