use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Clubhouse Back.
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::teams::list_teams,
        crate::routes::teams::get_team,
        crate::routes::teams::create_team,
        crate::routes::teams::update_team,
        crate::routes::teams::delete_team,
        crate::routes::games::list_games,
        crate::routes::games::get_game,
        crate::routes::games::games_on_date,
        crate::routes::games::games_for_team,
        crate::routes::games::create_game,
        crate::routes::games::update_game,
        crate::routes::games::delete_game,
        crate::routes::schedule::list_series,
        crate::routes::schedule::create_series,
        crate::routes::schedule::delete_series,
        crate::routes::schedule::games_on_date,
        crate::routes::schedule::home_games,
        crate::routes::meals::list_meals,
        crate::routes::meals::create_meal,
        crate::routes::meals::lookup_meals,
        crate::routes::meals::meal_plans,
        crate::routes::meals::get_meal_by_game,
        crate::routes::meals::upsert_meal,
        crate::routes::meals::get_meal,
        crate::routes::meals::update_meal,
        crate::routes::meals::delete_meal,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::team::CreateTeamRequest,
            crate::dto::team::UpdateTeamRequest,
            crate::dto::team::TeamResponse,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::UpdateGameRequest,
            crate::dto::game::GameResponse,
            crate::dto::schedule::CreateSeriesRequest,
            crate::dto::schedule::SeriesGameInput,
            crate::dto::schedule::SeriesGameResponse,
            crate::dto::schedule::GameSeriesResponse,
            crate::dto::schedule::DayGameResponse,
            crate::dto::schedule::HomeGameResponse,
            crate::dto::schedule::HomeGamesOverviewResponse,
            crate::dto::schedule::DeleteSeriesResponse,
            crate::dto::meal::CreateMealRequest,
            crate::dto::meal::MealUpsertRequest,
            crate::dto::meal::MealLookupRequest,
            crate::dto::meal::MealResponse,
            crate::dto::meal::MealPlanningEntry,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "teams", description = "Home club and opponents"),
        (name = "games", description = "Scheduled games"),
        (name = "schedule", description = "Series and schedule queries"),
        (name = "meals", description = "Pre and post-game meal plans"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/teams/{id}",
            "/api/games/date/{date}",
            "/api/schedule/series/{series_id}",
            "/api/schedule/home",
            "/api/meals/lookup",
            "/api/meals/game/{game_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn create_routes_are_documented() {
        let doc = ApiDoc::openapi();
        let series = &doc.paths.paths["/api/schedule/series"];
        assert!(series.get.is_some() && series.post.is_some());
        let meals = &doc.paths.paths["/api/meals"];
        assert!(meals.post.is_some());
        let meal = &doc.paths.paths["/api/meals/{id}"];
        assert!(meal.put.is_some() && meal.delete.is_some());
    }
}
