//! View-models produced by the aggregation layer. These are immutable
//! snapshots rebuilt on every query.

use serde::Serialize;
use std::collections::BTreeMap;

pub use crate::api::models::Side;

/// Games needed before a player counts as ranked (qualified SPR, rank colour).
pub const RANKED_MIN_GAMES: u32 = 30;
/// Games needed before a rating is shown at all and a trend is computed.
pub const PLACEMENT_MIN_GAMES: u32 = 10;
/// Rating assumed for placed players the rating source has no entry for.
pub const BASELINE_RATING: f64 = 1500.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub rating: Option<f64>,
    pub secondary_rating: f64,
    pub champions: BTreeMap<String, Champion>,
    pub teammates: BTreeMap<String, PlayerRecord>,
    pub opponents: BTreeMap<String, PlayerRecord>,
}

impl Player {
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Champion {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub win_percentage: f64,
    pub total_games: u32,
    pub ban_percentage: Option<f64>,
    pub pick_percentage: Option<f64>,
    /// Only filled in by single-champion queries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pick_ban_history: Vec<PickBanRate>,
}

/// Win/loss record of a player with or against another player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub win_percentage: f64,
    pub total_games: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PickBanRate {
    pub pick: f64,
    pub ban: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchPlayer {
    pub name: String,
    pub champion: String,
}

/// One side of a match. Always five players and five bans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub players: Vec<MatchPlayer>,
    pub bans: Vec<String>,
}

impl Team {
    pub fn has_player(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.players
            .iter()
            .any(|player| player.name.to_lowercase() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub id: String,
    pub team1: Team,
    pub team2: Team,
    pub winner: Side,
}

impl Match {
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Team1 => &self.team1,
            Side::Team2 => &self.team2,
        }
    }

    pub fn teams(&self) -> [&Team; 2] {
        [&self.team1, &self.team2]
    }

    pub fn side_of(&self, player: &str) -> Option<Side> {
        if self.team1.has_player(player) {
            Some(Side::Team1)
        } else if self.team2.has_player(player) {
            Some(Side::Team2)
        } else {
            None
        }
    }
}

/// A player's rating after one match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MmrHistoryItem {
    pub game_id: u64,
    pub rating: f64,
}

/// Every player's rating after one match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlickoHistoryItem {
    pub game_id: u64,
    pub ratings: BTreeMap<String, f64>,
}
