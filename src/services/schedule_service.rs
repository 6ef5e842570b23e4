use std::time::SystemTime;

use time::Date;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dao::models::GameEntity,
    dto::schedule::{
        CreateSeriesRequest, DayGameResponse, DeleteSeriesResponse, GameSeriesResponse,
        HomeGamesOverviewResponse,
    },
    error::ServiceError,
    services::{
        game_service,
        schedule::ScheduleView,
        series::build_series,
        team_service,
    },
    state::{
        SharedState,
        schedule::{GameSeries, ScheduledGame, SeriesPolicy},
    },
};

/// Build the series of every stored game, optionally restricted to games of one team.
///
/// Games are fed to the builder in chronological order so game numbers follow the calendar.
pub async fn load_series(
    state: &SharedState,
    team_id: Option<Uuid>,
) -> Result<Vec<GameSeries>, ServiceError> {
    let store = state.require_store().await?;
    let mut games = store.list_games().await?;
    if let Some(team_id) = team_id {
        games.retain(|game| game_service::involves(game, team_id));
    }
    game_service::sort_chronologically(&mut games);

    let names = team_service::team_names(state).await?;
    let scheduled = games
        .into_iter()
        .map(|game| ScheduledGame::from_entity(game, &names))
        .collect::<Vec<_>>();

    let series = build_series(&scheduled, state.config().series_policy());
    debug!(
        games = scheduled.len(),
        series = series.len(),
        "built game series"
    );
    Ok(series)
}

pub async fn list_series(
    state: &SharedState,
    team_id: Option<Uuid>,
) -> Result<Vec<GameSeriesResponse>, ServiceError> {
    let series = load_series(state, team_id).await?;
    Ok(series.into_iter().map(Into::into).collect())
}

pub async fn games_on_date(
    state: &SharedState,
    date: Date,
) -> Result<Vec<DayGameResponse>, ServiceError> {
    let series = load_series(state, None).await?;
    let view = ScheduleView::new(&series);
    Ok(view
        .games_on_date(date)
        .into_iter()
        .map(|(game, series)| DayGameResponse::new(game, series))
        .collect())
}

pub async fn home_games_overview(
    state: &SharedState,
    team: &str,
    today: Date,
) -> Result<HomeGamesOverviewResponse, ServiceError> {
    let series = load_series(state, None).await?;
    let view = ScheduleView::new(&series);
    Ok(view.home_games_overview(team, today).into())
}

/// Schedule every game of a series between one home and one visiting team.
///
/// All dates and times are checked before anything is stored. The returned series holds only
/// the new games, numbered in calendar order; listing may later fold them into an older series
/// of the same pair under the merge policy.
pub async fn create_series(
    state: &SharedState,
    request: CreateSeriesRequest,
) -> Result<GameSeriesResponse, ServiceError> {
    if request.games.is_empty() {
        return Err(ServiceError::InvalidInput(
            "a series needs at least one game".into(),
        ));
    }
    game_service::ensure_teams(state, request.home_team_id, request.away_team_id).await?;

    let mut games = request
        .games
        .iter()
        .map(|input| {
            Ok(GameEntity {
                id: Uuid::new_v4(),
                home_team_id: request.home_team_id,
                away_team_id: request.away_team_id,
                date: game_service::parse_date(&input.date)?,
                time: input
                    .time
                    .as_deref()
                    .map(game_service::parse_time)
                    .transpose()?,
                created_at: SystemTime::now(),
            })
        })
        .collect::<Result<Vec<_>, ServiceError>>()?;
    game_service::sort_chronologically(&mut games);

    let store = state.require_store().await?;
    for game in &games {
        store.save_game(game.clone()).await?;
    }

    let names = team_service::team_names(state).await?;
    let scheduled = games
        .into_iter()
        .map(|game| ScheduledGame::from_entity(game, &names))
        .collect::<Vec<_>>();
    let Some(series) = build_series(&scheduled, SeriesPolicy::MergeByPair).into_iter().next()
    else {
        return Err(ServiceError::InvalidInput(
            "a series needs at least one game".into(),
        ));
    };

    info!(series_id = %series.id, games = series.games.len(), "series scheduled");
    Ok(series.into())
}

/// Delete every game of the identified series; the series disappears with its games.
///
/// `team_id` must match the filter the series was listed with, since the grouping depends on
/// which games are fed to the builder.
pub async fn delete_series(
    state: &SharedState,
    series_id: &str,
    team_id: Option<Uuid>,
) -> Result<DeleteSeriesResponse, ServiceError> {
    let all = load_series(state, team_id).await?;
    let view = ScheduleView::new(&all);
    let Some(series) = view.find_series(series_id) else {
        return Err(ServiceError::NotFound(format!(
            "series `{series_id}` not found"
        )));
    };

    let store = state.require_store().await?;
    let mut deleted_games = 0;
    for game in &series.games {
        if store.delete_game(game.id).await? {
            deleted_games += 1;
        }
    }

    info!(series_id, deleted_games, "series deleted");
    Ok(DeleteSeriesResponse {
        series_id: series_id.to_owned(),
        deleted_games,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::macros::date;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::clubhouse_store::MemoryClubhouseStore,
        dto::schedule::SeriesGameInput,
        services::{
            game_service::tests::add_game,
            team_service::tests::{add_team, memory_state},
        },
        state::AppState,
    };

    #[tokio::test]
    async fn series_follow_calendar_order() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;

        let second = add_game(&state, birds, ducks, "2026-04-22", None).await;
        let first = add_game(&state, birds, ducks, "2026-04-21", None).await;

        let series = list_series(&state, None).await.unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].id, format!("series-{first}"));
        assert_eq!(series[0].games[1].id, second);
        assert_eq!(series[0].games[1].game_number, 2);
    }

    #[tokio::test]
    async fn configured_gap_policy_splits_return_sets() {
        let state = AppState::new(
            AppConfig::default().with_series_policy(SeriesPolicy::SplitOnGap { max_gap_days: 3 }),
        );
        state.set_store(Arc::new(MemoryClubhouseStore::new())).await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;
        add_game(&state, birds, ducks, "2026-04-21", None).await;
        add_game(&state, birds, ducks, "2026-04-22", None).await;
        add_game(&state, ducks, birds, "2026-04-28", None).await;

        let series = list_series(&state, None).await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].home_team, "Ducks");
    }

    #[tokio::test]
    async fn team_filter_limits_series() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;
        let owls = add_team(&state, "Owls").await;
        add_game(&state, birds, ducks, "2026-04-21", None).await;
        add_game(&state, owls, ducks, "2026-04-24", None).await;

        let series = list_series(&state, Some(birds)).await.unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].visiting_team, "Ducks");
    }

    #[tokio::test]
    async fn home_overview_uses_team_names() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;
        add_game(&state, birds, ducks, "2026-04-21", Some("19:05")).await;
        add_game(&state, birds, ducks, "2026-04-22", Some("13:05")).await;

        let overview = home_games_overview(&state, "Birds", date!(2026 - 04 - 21))
            .await
            .unwrap();
        assert_eq!(overview.games.len(), 2);
        assert_eq!(
            overview.today_game.map(|home| home.game.date),
            Some(date!(2026 - 04 - 21))
        );
        assert_eq!(
            overview.next_game.map(|home| home.game.date),
            Some(date!(2026 - 04 - 22))
        );

        let day = games_on_date(&state, date!(2026 - 04 - 22)).await.unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].home_team, "Birds");
    }

    #[tokio::test]
    async fn create_series_schedules_numbered_games() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;

        let request = CreateSeriesRequest {
            home_team_id: birds,
            away_team_id: ducks,
            games: ["2026-04-23", "2026-04-21", "2026-04-22"]
                .into_iter()
                .map(|date| SeriesGameInput {
                    date: date.into(),
                    time: Some("19:05".into()),
                })
                .collect(),
        };
        let created = create_series(&state, request).await.unwrap();

        assert_eq!(created.home_team, "Birds");
        assert_eq!(created.visiting_team, "Ducks");
        let numbered = created
            .games
            .iter()
            .map(|game| (game.game_number, game.date))
            .collect::<Vec<_>>();
        assert_eq!(
            numbered,
            vec![
                (1, date!(2026 - 04 - 21)),
                (2, date!(2026 - 04 - 22)),
                (3, date!(2026 - 04 - 23)),
            ]
        );

        let listed = list_series(&state, None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].games.len(), 3);
    }

    #[tokio::test]
    async fn create_series_stores_nothing_on_bad_date() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;

        let request = CreateSeriesRequest {
            home_team_id: birds,
            away_team_id: ducks,
            games: vec![
                SeriesGameInput {
                    date: "2026-04-21".into(),
                    time: None,
                },
                SeriesGameInput {
                    date: "April 22".into(),
                    time: None,
                },
            ],
        };
        let result = create_series(&state, request).await;

        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
        assert!(game_service::list_games(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_series_removes_exactly_its_games() {
        let state = memory_state().await;
        let birds = add_team(&state, "Birds").await;
        let ducks = add_team(&state, "Ducks").await;
        let owls = add_team(&state, "Owls").await;
        let first = add_game(&state, birds, ducks, "2026-04-21", None).await;
        add_game(&state, ducks, birds, "2026-04-22", None).await;
        let kept = add_game(&state, owls, birds, "2026-04-25", None).await;

        let series_id = format!("series-{first}");
        let outcome = delete_series(&state, &series_id, None).await.unwrap();
        assert_eq!(outcome.deleted_games, 2);

        let remaining = game_service::list_games(&state).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept);

        assert!(matches!(
            delete_series(&state, &series_id, None).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
