use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::Display;

use crate::model::{Champion, Match, Player, PlayerRecord, Side, PLACEMENT_MIN_GAMES};

pub const CENTURION_GAMES: u32 = 100;

fn by_f64_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Player's champions, best first, scored by `wins * win_percentage`.
pub fn player_top_champions(player: &Player) -> Vec<&Champion> {
    let mut champions: Vec<&Champion> = player.champions.values().collect();
    champions.sort_by(|a, b| {
        by_f64_desc(
            a.wins as f64 * a.win_percentage,
            b.wins as f64 * b.win_percentage,
        )
    });
    champions
}

/// Each player's record on one champion, labelled with the player's name.
pub fn champion_players(champion: &str, players: &[Player]) -> Vec<PlayerRecord> {
    players
        .iter()
        .filter_map(|player| {
            player.champions.get(champion).map(|record| PlayerRecord {
                name: player.name.clone(),
                wins: record.wins,
                losses: record.losses,
                win_percentage: record.win_percentage,
                total_games: record.total_games,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Outcome {
    #[strum(to_string = "WIN")]
    Win,
    #[strum(to_string = "LOSS")]
    Loss,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMatch<'a> {
    pub player: &'a str,
    pub side: Side,
    pub outcome: Outcome,
    pub game: &'a Match,
}

/// Matches the player took part in (names compared case-insensitively), with
/// the result from that player's point of view.
pub fn player_match_history<'a>(player: &'a str, matches: &'a [Match]) -> Vec<PlayerMatch<'a>> {
    matches
        .iter()
        .filter_map(|game| {
            let side = game.side_of(player)?;
            Some(PlayerMatch {
                player,
                side,
                outcome: if game.winner == side {
                    Outcome::Win
                } else {
                    Outcome::Loss
                },
                game,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedChampion {
    pub name: String,
    pub player1_win_rate: f64,
    pub player2_win_rate: f64,
}

/// Champions both players have played, in name order.
pub fn shared_champions(player1: &Player, player2: &Player) -> Vec<SharedChampion> {
    player1
        .champions
        .iter()
        .filter_map(|(name, first)| {
            player2.champions.get(name).map(|second| SharedChampion {
                name: name.clone(),
                player1_win_rate: first.win_percentage,
                player2_win_rate: second.win_percentage,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Accolade {
    #[strum(to_string = "Founding Member")]
    FoundingMember,
    #[strum(to_string = "100 Games")]
    Centurion,
}

pub fn accolades(player: &Player) -> Vec<Accolade> {
    let total = player.total_games();
    let mut earned = Vec::new();
    if total >= PLACEMENT_MIN_GAMES {
        earned.push(Accolade::FoundingMember);
    }
    if total >= CENTURION_GAMES {
        earned.push(Accolade::Centurion);
    }
    earned
}

/// Champions with at least `min_games`, highest win percentage first.
pub fn slideshow_champions(champions: &BTreeMap<String, Champion>, min_games: u32) -> Vec<&Champion> {
    let mut eligible: Vec<&Champion> = champions
        .values()
        .filter(|champion| champion.total_games >= min_games)
        .collect();
    eligible.sort_by(|a, b| by_f64_desc(a.win_percentage, b.win_percentage));
    eligible
}
