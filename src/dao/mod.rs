/// Team, game and meal storage and retrieval operations.
pub mod clubhouse_store;
/// Database model definitions.
pub mod models;
/// Storage abstraction layer for database operations.
pub mod storage;
