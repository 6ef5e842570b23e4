//! Date and home-game queries over built series. Lookups never fail; a miss is `None` or empty.

use time::{Date, Time};

use crate::state::schedule::{GameSeries, HomeGame, SeriesGame};

/// Home games of one team around a reference day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeGamesOverview {
    pub today_game: Option<HomeGame>,
    pub next_game: Option<HomeGame>,
    pub games: Vec<HomeGame>,
}

/// Read-only view answering schedule questions over a set of series.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleView<'a> {
    series: &'a [GameSeries],
}

impl<'a> ScheduleView<'a> {
    pub fn new(series: &'a [GameSeries]) -> Self {
        Self { series }
    }

    /// Every game played on `date`, earliest first pitch first and untimed games last.
    pub fn games_on_date(&self, date: Date) -> Vec<(&'a SeriesGame, &'a GameSeries)> {
        let mut games = self
            .series
            .iter()
            .flat_map(|series| series.games.iter().map(move |game| (game, series)))
            .filter(|(game, _)| game.date == date)
            .collect::<Vec<_>>();
        games.sort_by_key(|(game, _)| time_order(game.time));
        games
    }

    /// All games of the series hosted by `team`, ordered by date.
    pub fn home_games(&self, team: &str) -> Vec<HomeGame> {
        let mut games = self
            .series
            .iter()
            .filter(|series| series.home_team == team)
            .flat_map(|series| {
                series
                    .games
                    .iter()
                    .map(move |game| HomeGame::from_series(series, game))
            })
            .collect::<Vec<_>>();
        games.sort_by_key(|home| (home.game.date, time_order(home.game.time)));
        games
    }

    /// First home game strictly after `today`.
    pub fn next_home_game(&self, team: &str, today: Date) -> Option<HomeGame> {
        first_after(&self.home_games(team), today).cloned()
    }

    /// Home game played on `today`, if any.
    pub fn today_game(&self, team: &str, today: Date) -> Option<HomeGame> {
        first_on(&self.home_games(team), today).cloned()
    }

    /// Home games of `team` with the picks of `today_game` and `next_home_game`.
    pub fn home_games_overview(&self, team: &str, today: Date) -> HomeGamesOverview {
        let games = self.home_games(team);
        HomeGamesOverview {
            today_game: first_on(&games, today).cloned(),
            next_game: first_after(&games, today).cloned(),
            games,
        }
    }

    pub fn find_series(&self, series_id: &str) -> Option<&'a GameSeries> {
        self.series.iter().find(|series| series.id == series_id)
    }
}

fn first_on(games: &[HomeGame], day: Date) -> Option<&HomeGame> {
    games.iter().find(|home| home.game.date == day)
}

fn first_after(games: &[HomeGame], day: Date) -> Option<&HomeGame> {
    games.iter().find(|home| home.game.date > day)
}

/// Sort key placing games without a time after every timed game.
fn time_order(time: Option<Time>) -> (bool, Option<Time>) {
    (time.is_none(), time)
}

#[cfg(test)]
mod tests {
    use time::macros::{date, time};
    use uuid::Uuid;

    use super::*;

    fn game(date: Date, time: Option<Time>, game_number: u32) -> SeriesGame {
        SeriesGame {
            id: Uuid::new_v4(),
            date,
            time,
            game_number,
        }
    }

    fn series(home: &str, visiting: &str, games: Vec<SeriesGame>) -> GameSeries {
        GameSeries {
            id: format!("series-{}", games[0].id),
            home_team: home.into(),
            visiting_team: visiting.into(),
            games,
        }
    }

    fn fixture() -> Vec<GameSeries> {
        vec![
            series(
                "Birds",
                "Ducks",
                vec![
                    game(date!(2026 - 04 - 21), Some(time!(19:05)), 1),
                    game(date!(2026 - 04 - 22), None, 2),
                ],
            ),
            series(
                "Owls",
                "Hawks",
                vec![
                    game(date!(2026 - 04 - 22), Some(time!(13:05)), 1),
                    game(date!(2026 - 04 - 23), Some(time!(18:35)), 2),
                ],
            ),
            series(
                "Birds",
                "Owls",
                vec![
                    game(date!(2026 - 04 - 22), Some(time!(18:00)), 1),
                    game(date!(2026 - 04 - 28), Some(time!(18:00)), 2),
                ],
            ),
        ]
    }

    #[test]
    fn games_on_date_sorts_by_time_with_untimed_last() {
        let all = fixture();
        let view = ScheduleView::new(&all);

        let times = view
            .games_on_date(date!(2026 - 04 - 22))
            .into_iter()
            .map(|(game, _)| game.time)
            .collect::<Vec<_>>();

        assert_eq!(times, vec![Some(time!(13:05)), Some(time!(18:00)), None]);
    }

    #[test]
    fn games_on_date_carries_series_context() {
        let all = fixture();
        let view = ScheduleView::new(&all);

        let games = view.games_on_date(date!(2026 - 04 - 23));
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].1.home_team, "Owls");
        assert!(view.games_on_date(date!(2026 - 05 - 01)).is_empty());
    }

    #[test]
    fn home_games_flatten_hosted_series_by_date() {
        let all = fixture();
        let view = ScheduleView::new(&all);

        let dates = view
            .home_games("Birds")
            .into_iter()
            .map(|home| (home.game.date, home.visiting_team))
            .collect::<Vec<_>>();

        assert_eq!(
            dates,
            vec![
                (date!(2026 - 04 - 21), "Ducks".to_string()),
                (date!(2026 - 04 - 22), "Owls".to_string()),
                (date!(2026 - 04 - 22), "Ducks".to_string()),
                (date!(2026 - 04 - 28), "Owls".to_string()),
            ]
        );
        assert!(view.home_games("Hawks").is_empty());
    }

    #[test]
    fn next_home_game_is_strictly_after_today() {
        let all = fixture();
        let view = ScheduleView::new(&all);

        let next = view.next_home_game("Birds", date!(2026 - 04 - 22)).unwrap();
        assert_eq!(next.game.date, date!(2026 - 04 - 28));
        assert!(view.next_home_game("Birds", date!(2026 - 04 - 28)).is_none());
    }

    #[test]
    fn today_game_matches_exact_day() {
        let all = fixture();
        let view = ScheduleView::new(&all);

        let today = view.today_game("Birds", date!(2026 - 04 - 21)).unwrap();
        assert_eq!(today.visiting_team, "Ducks");
        assert!(view.today_game("Birds", date!(2026 - 04 - 25)).is_none());
    }

    #[test]
    fn overview_combines_queries() {
        let all = fixture();
        let view = ScheduleView::new(&all);

        let overview = view.home_games_overview("Owls", date!(2026 - 04 - 22));
        assert_eq!(
            overview.today_game.map(|home| home.game.time),
            Some(Some(time!(13:05)))
        );
        assert_eq!(
            overview.next_game.map(|home| home.game.date),
            Some(date!(2026 - 04 - 23))
        );
        assert_eq!(overview.games.len(), 2);
    }

    #[test]
    fn overview_agrees_with_single_queries() {
        let all = fixture();
        let view = ScheduleView::new(&all);

        for day in [
            date!(2026 - 04 - 20),
            date!(2026 - 04 - 21),
            date!(2026 - 04 - 22),
            date!(2026 - 04 - 28),
        ] {
            let overview = view.home_games_overview("Birds", day);
            assert_eq!(overview.today_game, view.today_game("Birds", day));
            assert_eq!(overview.next_game, view.next_home_game("Birds", day));
        }
    }
}
