use std::collections::HashMap;
use std::sync::Mutex;

use approx::assert_relative_eq;
use toxic_stats::analysis::champion_classes::ChampionClass;
use toxic_stats::analysis::rating::Trend;
use toxic_stats::api::{Resource, StatsSource};
use toxic_stats::model::Side;
use toxic_stats::{AppError, ToxicDataService};

const STATS: &str = r#"{
    "players": [
        {
            "name": "Alice",
            "wins": 20,
            "losses": 12,
            "champions": {
                "Lux": {"name": "Lux", "wins": 8, "losses": 2, "winPercentage": 80, "totalGames": 10},
                "Garen": {"name": "Garen", "wins": 2, "losses": 4, "winPercentage": 33.3, "totalGames": 6}
            },
            "teammates": {
                "Bob": {"name": "Bob", "wins": 5, "losses": 3, "winPercentage": 62.5, "totalGames": 8}
            },
            "opponents": {}
        },
        {"name": "Bob", "wins": 3, "losses": 4}
    ],
    "champions": {
        "Lux": {"name": "Lux", "wins": 12, "losses": 8, "winPercentage": 60, "totalGames": 20},
        "Garen": {"name": "Garen", "wins": 6, "losses": 6, "winPercentage": 50, "totalGames": 12},
        "Teemo": {"name": "Teemo", "wins": 1, "losses": 0, "winPercentage": 100, "totalGames": 1}
    }
}"#;

const PLACEMENT: &str = r#"{"mmr": {"Alice": 1587.6}}"#;

const TRUESKILL: &str = r#"{"ALICE": {"rating": 27.25}, "bob": {"rating": 19.5}}"#;

const MATCHES: &str = r#"{"matches": [
    {
        "id": 1,
        "team1": {
            "players": [
                {"name": "Alice", "champion": "Lux"},
                {"name": "p2", "champion": "Ahri"},
                {"name": "p3", "champion": "Jinx"},
                {"name": "p4", "champion": "Leona"},
                {"name": "p5", "champion": "Darius"}
            ],
            "bans": ["Zed", "Yasuo", "Teemo", "Yuumi", "Draven"]
        },
        "team2": {
            "players": [
                {"name": "Bob", "champion": "Garen"},
                {"name": "p7", "champion": "Annie"},
                {"name": "p8", "champion": "Ezreal"},
                {"name": "p9", "champion": "Thresh"},
                {"name": "p10", "champion": "Vi"}
            ],
            "bans": ["Ahri", "Yasuo", "Master Yi", "Shaco", "Singed"]
        },
        "winner": "Team 1"
    },
    {
        "id": 2,
        "team1": {
            "players": [
                {"name": "Bob", "champion": "Lux"},
                {"name": "p2", "champion": "Sona"},
                {"name": "p3", "champion": "Ashe"},
                {"name": "p4", "champion": "Nami"},
                {"name": "p5", "champion": "Sett"}
            ],
            "bans": ["Zed", "Yasuo", "Garen", "Yuumi", "Draven"]
        },
        "team2": {
            "players": [
                {"name": "alice", "champion": "Ahri"},
                {"name": "p7", "champion": "Annie"},
                {"name": "p8", "champion": "Ezreal"},
                {"name": "p9", "champion": "Thresh"},
                {"name": "p10", "champion": "Vi"}
            ],
            "bans": ["Jinx", "Yasuo", "Master Yi", "Shaco", "Singed"]
        },
        "winner": "Team 1"
    }
]}"#;

const MMR_PER_MATCH: &str = r#"[
    {"gameId": 1, "mmr": {"Alice": 1570.0, "Bob": 1490.0}},
    {"gameId": 2, "mmr": {"Alice": 1587.6, "Bob": 1502.0}}
]"#;

/// Serves canned payloads and records every request it sees.
#[derive(Default)]
struct FakeSource {
    failing: Vec<Resource>,
    overrides: HashMap<Resource, String>,
    calls: Mutex<HashMap<(Resource, Option<u32>), usize>>,
}

impl FakeSource {
    fn failing(resources: &[Resource]) -> Self {
        FakeSource {
            failing: resources.to_vec(),
            ..Default::default()
        }
    }

    fn serving(resource: Resource, body: &str) -> Self {
        FakeSource {
            overrides: HashMap::from([(resource, body.to_string())]),
            ..Default::default()
        }
    }

    fn calls(&self, resource: Resource, season: Option<u32>) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&(resource, season))
            .copied()
            .unwrap_or(0)
    }
}

impl StatsSource for FakeSource {
    fn fetch(&self, resource: Resource, season: Option<u32>) -> Result<String, AppError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry((resource, season))
            .or_default() += 1;

        if self.failing.contains(&resource) {
            return Err(AppError::HttpError(format!("/{} returned status 500", resource)));
        }

        if let Some(body) = self.overrides.get(&resource) {
            return Ok(body.clone());
        }

        let body = match resource {
            Resource::Stats => STATS,
            Resource::Placement => PLACEMENT,
            Resource::TrueSkill => TRUESKILL,
            Resource::Matches => MATCHES,
            Resource::MmrPerMatch => MMR_PER_MATCH,
        };
        Ok(body.to_string())
    }
}

#[test]
fn players_merge_all_three_sources() {
    let service = ToxicDataService::new(FakeSource::default());
    let players = service.players(None).unwrap();

    assert_eq!(players.len(), 2);
    let alice = &players[0];
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.rating, Some(1587.6));
    assert_relative_eq!(alice.secondary_rating, 27.25);
    assert_eq!(alice.champions.len(), 2);
    assert_eq!(alice.teammates["Bob"].wins, 5);

    let bob = &players[1];
    assert_eq!(bob.rating, None);
    assert_relative_eq!(bob.secondary_rating, 19.5);
    assert!(bob.champions.is_empty());
}

#[test]
fn cached_payloads_are_reused() {
    let service = ToxicDataService::new(FakeSource::default());
    service.players(None).unwrap();
    service.player("Alice", None).unwrap();

    let source = service.source();
    assert_eq!(source.calls(Resource::Stats, None), 1);
    assert_eq!(source.calls(Resource::Placement, None), 1);
    assert_eq!(source.calls(Resource::TrueSkill, None), 1);
}

#[test]
fn seasons_are_fetched_separately() {
    let service = ToxicDataService::new(FakeSource::default());
    service.players(Some(2)).unwrap();
    service.players(None).unwrap();

    let source = service.source();
    assert_eq!(source.calls(Resource::Stats, Some(2)), 1);
    assert_eq!(source.calls(Resource::Stats, None), 1);
}

#[test]
fn one_failed_input_fails_the_whole_query() {
    let service = ToxicDataService::new(FakeSource::failing(&[Resource::TrueSkill]));

    let err = service.players(None).unwrap_err();
    assert!(matches!(err, AppError::HttpError(_)));
    assert!(service.player("Alice", None).is_err());
    // queries that do not need the failing resource still work
    assert_eq!(service.match_history(None).unwrap().len(), 2);
}

#[test]
fn failed_fetches_are_retried_on_next_query() {
    let service = ToxicDataService::new(FakeSource::failing(&[Resource::Matches]));
    assert!(service.champions(None).is_err());
    assert!(service.champions(None).is_err());
    assert_eq!(service.source().calls(Resource::Matches, None), 2);
}

#[test]
fn season_zero_shares_the_all_time_cache() {
    let service = ToxicDataService::new(FakeSource::default());
    service.players(Some(0)).unwrap();
    service.players(None).unwrap();

    let source = service.source();
    assert_eq!(source.calls(Resource::Stats, None), 1);
    assert_eq!(source.calls(Resource::Stats, Some(0)), 0);
}

#[test]
fn unrated_trueskill_entry_does_not_fail_players() {
    let source = FakeSource::serving(
        Resource::TrueSkill,
        r#"{"Alice": {"rating": 27.5}, "Bob": {"mu": 25.0, "sigma": 8.3}}"#,
    );
    let service = ToxicDataService::new(source);
    let players = service.players(None).unwrap();

    assert_relative_eq!(players[0].secondary_rating, 27.5);
    assert_relative_eq!(players[1].secondary_rating, 0.0);
}

#[test]
fn broken_match_record_is_dropped_not_fatal() {
    let body = MATCHES.replacen(r#""winner": "Team 1""#, r#""winner": null"#, 1);
    let service = ToxicDataService::new(FakeSource::serving(Resource::Matches, &body));

    let matches = service.match_history(None).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, "2");

    // Lux is only counted from the surviving match: 1 pick over 2 team slots
    let champions = service.champions(None).unwrap();
    assert_relative_eq!(champions["Lux"].pick_percentage.unwrap(), 50.0);
}

#[test]
fn single_player_lookup() {
    let service = ToxicDataService::new(FakeSource::default());

    let alice = service.player("Alice", None).unwrap().unwrap();
    assert_eq!(alice.rating, Some(1588.0));
    assert_eq!(alice.total_games(), 32);

    assert!(service.player("Nobody", None).unwrap().is_none());
}

#[test]
fn champions_carry_pick_and_ban_rates() {
    let service = ToxicDataService::new(FakeSource::default());
    let champions = service.champions(None).unwrap();

    // Lux: picked in both matches, 4 team slots
    let lux = &champions["Lux"];
    assert_relative_eq!(lux.pick_percentage.unwrap(), 50.0);
    assert_relative_eq!(lux.ban_percentage.unwrap(), 0.0);

    // Garen: picked once, banned once
    let garen = &champions["Garen"];
    assert_relative_eq!(garen.pick_percentage.unwrap(), 25.0);
    assert_relative_eq!(garen.ban_percentage.unwrap(), 25.0);

    // Teemo: banned once, never picked
    let teemo = &champions["Teemo"];
    assert_relative_eq!(teemo.pick_percentage.unwrap(), 0.0);
    assert_relative_eq!(teemo.ban_percentage.unwrap(), 25.0);
}

#[test]
fn single_champion_lookup_includes_history() {
    let service = ToxicDataService::new(FakeSource::default());

    let garen = service.champion("Garen", None).unwrap().unwrap();
    assert_eq!(garen.pick_ban_history.len(), 2);
    assert_relative_eq!(garen.pick_ban_history[0].pick, 50.0);
    assert_relative_eq!(garen.pick_ban_history[1].pick, 25.0);

    assert!(service.champion("Zed", None).unwrap().is_none());
}

#[test]
fn match_history_is_normalized() {
    let service = ToxicDataService::new(FakeSource::default());
    let matches = service.match_history(None).unwrap();

    assert_eq!(matches[0].id, "1");
    assert_eq!(matches[0].winner, Side::Team1);
    for m in &matches {
        assert_eq!(m.team1.players.len(), 5);
        assert_eq!(m.team2.bans.len(), 5);
    }

    let second = service.find_match("2", None).unwrap().unwrap();
    assert_eq!(second.side_of("ALICE"), Some(Side::Team2));
    assert!(service.find_match("99", None).unwrap().is_none());
}

#[test]
fn leaderboard_combines_ratings_and_trends() {
    let service = ToxicDataService::new(FakeSource::default());
    let rows = service.leaderboard(None).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Alice");
    assert_eq!(rows[0].spr, 1588);
    assert_eq!(rows[0].trend, Trend::Change(18));
    assert!(rows[0].ranked);

    // Bob has 7 games: no SPR and no trend yet
    assert_eq!(rows[1].spr, 0);
    assert_eq!(rows[1].trend, Trend::Ineligible);
}

#[test]
fn class_win_rates_for_player() {
    let service = ToxicDataService::new(FakeSource::default());
    let rates = service.player_class_win_rates("Alice", None).unwrap().unwrap();

    assert_eq!(rates[&ChampionClass::Burst].wins, 8);
    assert_eq!(rates[&ChampionClass::Artillery].wins, 8);
    assert_eq!(rates[&ChampionClass::Juggernaut].losses, 4);
    assert!(service.player_class_win_rates("Nobody", None).unwrap().is_none());
}

#[test]
fn merging_is_repeatable() {
    let service = ToxicDataService::new(FakeSource::default());

    let first = serde_json::to_string(&service.players(None).unwrap()).unwrap();
    let second = serde_json::to_string(&service.players(None).unwrap()).unwrap();
    assert_eq!(first, second);

    let first = serde_json::to_string(&service.champions(None).unwrap()).unwrap();
    let second = serde_json::to_string(&service.champions(None).unwrap()).unwrap();
    assert_eq!(first, second);
}
