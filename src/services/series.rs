//! Grouping of a flat game list into series of games between the same two teams.

use indexmap::IndexMap;
use uuid::Uuid;

use crate::state::schedule::{GameSeries, ScheduledGame, SeriesGame, SeriesPolicy};

type PairKey = (Uuid, Uuid);

/// Fold `games` into series, in input order.
///
/// A game joins the open series of its team pair whichever side is home; the series keeps the
/// home/visiting labels of the first game folded into it and numbers its games by insertion
/// order. Games are never reordered, so callers wanting date-ordered game numbers must pass
/// date-ordered input. The result is sorted by the date of each series' first game.
pub fn build_series(games: &[ScheduledGame], policy: SeriesPolicy) -> Vec<GameSeries> {
    let mut open: IndexMap<PairKey, GameSeries> = IndexMap::new();
    let mut closed: Vec<GameSeries> = Vec::new();

    for game in games {
        let key = (game.home_team_id, game.away_team_id);
        let reverse = (game.away_team_id, game.home_team_id);
        let existing = if open.contains_key(&key) {
            Some(key)
        } else if open.contains_key(&reverse) {
            Some(reverse)
        } else {
            None
        };

        let Some(existing) = existing else {
            open.insert(key, start_series(game));
            continue;
        };

        if should_split(&open[&existing], game, policy) {
            if let Some(finished) = open.shift_remove(&existing) {
                closed.push(finished);
            }
            open.insert(key, start_series(game));
            continue;
        }

        let series = &mut open[&existing];
        let game_number = series.games.len() as u32 + 1;
        series.games.push(SeriesGame {
            id: game.id,
            date: game.date,
            time: game.time,
            game_number,
        });
    }

    let mut series = closed;
    series.extend(open.into_values());
    series.sort_by_key(GameSeries::first_date);
    series
}

fn start_series(game: &ScheduledGame) -> GameSeries {
    GameSeries {
        id: format!("series-{}", game.id),
        home_team: game.home_team_name.clone(),
        visiting_team: game.away_team_name.clone(),
        games: vec![SeriesGame {
            id: game.id,
            date: game.date,
            time: game.time,
            game_number: 1,
        }],
    }
}

fn should_split(series: &GameSeries, game: &ScheduledGame, policy: SeriesPolicy) -> bool {
    match policy {
        SeriesPolicy::MergeByPair => false,
        SeriesPolicy::SplitOnGap { max_gap_days } => series.last_date().is_some_and(|last| {
            (game.date - last).whole_days().abs() > i64::from(max_gap_days)
        }),
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use super::*;

    struct Teams {
        birds: Uuid,
        ducks: Uuid,
        owls: Uuid,
    }

    impl Teams {
        fn new() -> Self {
            Self {
                birds: Uuid::new_v4(),
                ducks: Uuid::new_v4(),
                owls: Uuid::new_v4(),
            }
        }

        fn name(&self, id: Uuid) -> String {
            if id == self.birds {
                "Birds".into()
            } else if id == self.ducks {
                "Ducks".into()
            } else {
                "Owls".into()
            }
        }

        fn game(&self, home: Uuid, away: Uuid, date: Date) -> ScheduledGame {
            ScheduledGame {
                id: Uuid::new_v4(),
                home_team_id: home,
                away_team_id: away,
                home_team_name: self.name(home),
                away_team_name: self.name(away),
                date,
                time: None,
            }
        }
    }

    #[test]
    fn empty_input_yields_no_series() {
        assert!(build_series(&[], SeriesPolicy::MergeByPair).is_empty());
    }

    #[test]
    fn same_pair_games_form_one_numbered_series() {
        let teams = Teams::new();
        let games = vec![
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 21)),
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 22)),
        ];

        let series = build_series(&games, SeriesPolicy::MergeByPair);

        assert_eq!(series.len(), 1);
        let only = &series[0];
        assert_eq!(only.id, format!("series-{}", games[0].id));
        assert_eq!(only.home_team, "Birds");
        assert_eq!(only.visiting_team, "Ducks");
        let numbers = only.games.iter().map(|g| g.game_number).collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn reversed_roles_merge_and_keep_first_labels() {
        let teams = Teams::new();
        let games = vec![
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 21)),
            teams.game(teams.ducks, teams.birds, date!(2026 - 04 - 22)),
        ];

        let series = build_series(&games, SeriesPolicy::MergeByPair);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].home_team, "Birds");
        assert_eq!(series[0].visiting_team, "Ducks");
        assert_eq!(series[0].games[1].id, games[1].id);
        assert_eq!(series[0].games[1].game_number, 2);
    }

    #[test]
    fn later_return_set_merges_under_pair_policy() {
        let teams = Teams::new();
        let games = vec![
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 21)),
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 22)),
            teams.game(teams.ducks, teams.birds, date!(2026 - 04 - 28)),
        ];

        let series = build_series(&games, SeriesPolicy::MergeByPair);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].home_team, "Birds");
        assert_eq!(series[0].games.len(), 3);
        assert_eq!(series[0].games[2].game_number, 3);
    }

    #[test]
    fn later_return_set_splits_under_gap_policy() {
        let teams = Teams::new();
        let games = vec![
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 21)),
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 22)),
            teams.game(teams.ducks, teams.birds, date!(2026 - 04 - 28)),
        ];

        let series = build_series(&games, SeriesPolicy::SplitOnGap { max_gap_days: 3 });

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].home_team, "Birds");
        assert_eq!(series[0].games.len(), 2);
        assert_eq!(series[1].home_team, "Ducks");
        assert_eq!(series[1].visiting_team, "Birds");
        assert_eq!(series[1].games[0].id, games[2].id);
        assert_eq!(series[1].games[0].game_number, 1);
    }

    #[test]
    fn gap_policy_keeps_close_games_together() {
        let teams = Teams::new();
        let games = vec![
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 21)),
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 24)),
        ];

        let series = build_series(&games, SeriesPolicy::SplitOnGap { max_gap_days: 3 });
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn series_are_sorted_by_first_game_date() {
        let teams = Teams::new();
        let games = vec![
            teams.game(teams.owls, teams.birds, date!(2026 - 05 - 10)),
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 21)),
            teams.game(teams.owls, teams.birds, date!(2026 - 05 - 11)),
        ];

        let series = build_series(&games, SeriesPolicy::MergeByPair);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].visiting_team, "Ducks");
        assert_eq!(series[1].home_team, "Owls");
    }

    #[test]
    fn game_numbers_follow_input_order_not_dates() {
        let teams = Teams::new();
        let games = vec![
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 23)),
            teams.game(teams.birds, teams.ducks, date!(2026 - 04 - 21)),
        ];

        let series = build_series(&games, SeriesPolicy::MergeByPair);

        assert_eq!(series[0].games[0].date, date!(2026 - 04 - 23));
        assert_eq!(series[0].games[0].game_number, 1);
        assert_eq!(series[0].games[1].game_number, 2);
    }

    #[test]
    fn no_game_is_dropped_or_duplicated() {
        let teams = Teams::new();
        let pairs = [
            (teams.birds, teams.ducks),
            (teams.ducks, teams.owls),
            (teams.owls, teams.birds),
        ];
        let start = date!(2026 - 04 - 01);
        let games = pairs
            .iter()
            .enumerate()
            .flat_map(|(set, (home, away))| {
                (0..3).map(move |day| (set, *home, *away, day))
            })
            .map(|(set, home, away, day)| {
                let date = start + time::Duration::days((set * 7 + day) as i64);
                teams.game(home, away, date)
            })
            .collect::<Vec<_>>();

        for policy in [
            SeriesPolicy::MergeByPair,
            SeriesPolicy::SplitOnGap { max_gap_days: 2 },
        ] {
            let series = build_series(&games, policy);
            let total: usize = series.iter().map(|s| s.games.len()).sum();
            assert_eq!(total, games.len());
            assert_eq!(series.len(), 3);
        }
    }
}
