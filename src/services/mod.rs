/// OpenAPI documentation generation.
pub mod documentation;
/// Team-pair aware game CRUD.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Meal plan upsert, lookup and planning view.
pub mod meal_service;
/// Pure date and home-game queries over series.
pub mod schedule;
/// Series loading, schedule queries and series deletion over the store.
pub mod schedule_service;
/// Grouping of games into series.
pub mod series;
/// Storage connection supervisor with reconnect backoff.
pub mod storage_supervisor;
/// Team CRUD.
pub mod team_service;
