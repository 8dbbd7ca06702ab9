use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::aggregator::TEAM_SIZE;
use crate::model::{MmrHistoryItem, Player, BASELINE_RATING, PLACEMENT_MIN_GAMES, RANKED_MIN_GAMES};

/// Top of the SPR colour scale.
pub const SPR_CEILING: f64 = 1800.0;
/// How many matches back a rating trend looks.
pub const TREND_WINDOW: usize = 5;
/// Value older consumers expect for players without a trend.
pub const TREND_SENTINEL: i64 = -999;
/// Player cards shown in the slideshow.
pub const SLIDESHOW_PLAYERS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SprColor {
    Transparent,
    Hsl { hue: f64, saturation: f64, lightness: f64 },
}

impl SprColor {
    /// Hue reduced into `[0, 360)`.
    pub fn normalized_hue(&self) -> Option<f64> {
        match self {
            SprColor::Transparent => None,
            SprColor::Hsl { hue, .. } => Some(hue.rem_euclid(360.0)),
        }
    }
}

impl fmt::Display for SprColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SprColor::Transparent => f.write_str("transparent"),
            SprColor::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(
                f,
                "hsl({}, {}%, {}%)",
                hue.rem_euclid(360.0),
                saturation,
                lightness
            ),
        }
    }
}

/// Maps a rating onto the red-to-green SPR scale. The hue moves four times
/// faster than the rating, so anything below three quarters of the ceiling
/// wraps around the colour wheel.
pub fn spr_color(rating: f64) -> SprColor {
    if rating <= 0.0 {
        return SprColor::Transparent;
    }

    SprColor::Hsl {
        hue: -480.0 * (SPR_CEILING - rating) / SPR_CEILING + 120.0,
        saturation: 100.0,
        lightness: 67.0,
    }
}

pub fn spr_value(player: &Player) -> i64 {
    player.rating.map(|rating| rating.round() as i64).unwrap_or(0)
}

pub fn is_player_ranked(player: &Player) -> bool {
    player.total_games() >= RANKED_MIN_GAMES
}

fn compare_players_by_rank(p1: &Player, p2: &Player) -> Ordering {
    match (is_player_ranked(p1), is_player_ranked(p2)) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => spr_value(p1).cmp(&spr_value(p2)),
    }
}

/// Ascending rank order: unranked players first, then ranked ones, each
/// group by SPR. Callers reverse it for a standings view.
pub fn order_players_by_rank(players: &mut [Player]) {
    players.sort_by(compare_players_by_rank);
}

/// Average team rating, rounded. Unrated players count at the baseline and
/// the sum is always split over a full team.
pub fn team_spr<I: IntoIterator<Item = Option<f64>>>(ratings: I) -> i64 {
    let total: f64 = ratings
        .into_iter()
        .map(|rating| {
            rating
                .filter(|rating| *rating != 0.0)
                .unwrap_or(BASELINE_RATING)
        })
        .sum();

    (total / TEAM_SIZE as f64).round() as i64
}

/// Rating label shown next to a name in a team sheet.
pub fn player_spr_text(player: &Player) -> String {
    if player.total_games() >= PLACEMENT_MIN_GAMES {
        format!("({})", spr_value(player))
    } else {
        "(unrated)".to_string()
    }
}

fn slideshow_score(player: &Player) -> f64 {
    let rating = player.rating.unwrap_or(0.0);
    if is_player_ranked(player) {
        rating * 1000.0
    } else {
        rating
    }
}

/// Best players first for the slideshow. Ranked players outscore every
/// unranked one; at most `SLIDESHOW_PLAYERS` are returned.
pub fn slideshow_players(players: &[Player]) -> Vec<&Player> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| slideshow_score(b).total_cmp(&slideshow_score(a)));
    sorted.truncate(SLIDESHOW_PLAYERS);
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewAverages {
    pub games: f64,
    /// Mean SPR over players that have one.
    pub spr: i64,
}

/// Population averages for the player overview. `None` when nobody has an
/// SPR yet.
pub fn overview_averages(rows: &[LeaderboardRow]) -> Option<OverviewAverages> {
    let rated: Vec<i64> = rows.iter().map(|row| row.spr).filter(|spr| *spr > 0).collect();
    if rated.is_empty() {
        return None;
    }

    let games: u32 = rows.iter().map(|row| row.total_games).sum();
    let spr_total: i64 = rated.iter().sum();

    Some(OverviewAverages {
        games: games as f64 / rows.len() as f64,
        spr: (spr_total as f64 / rated.len() as f64).round() as i64,
    })
}

/// Rating change between the latest snapshot and the one up to
/// `TREND_WINDOW` matches before it. Histories must be ascending.
pub fn mmr_trending_change(history: &[MmrHistoryItem]) -> i64 {
    let Some(latest) = history.last() else {
        return 0;
    };
    let start = history.len().saturating_sub(TREND_WINDOW + 1);

    (latest.rating - history[start].rating).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    /// Not enough games played for a trend to mean anything.
    Ineligible,
    Change(i64),
}

impl Trend {
    pub fn legacy_value(&self) -> i64 {
        match self {
            Trend::Ineligible => TREND_SENTINEL,
            Trend::Change(change) => *change,
        }
    }
}

pub fn trend_for(total_games: u32, history: &[MmrHistoryItem]) -> Trend {
    if total_games < PLACEMENT_MIN_GAMES {
        Trend::Ineligible
    } else {
        Trend::Change(mmr_trending_change(history))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub win_percentage: u32,
    pub total_games: u32,
    /// Rounded rating, 0 until the player is placed.
    pub spr: i64,
    pub trend: Trend,
    pub ranked: bool,
}

/// Leaderboard rows sorted by name.
pub fn leaderboard(
    players: &[Player],
    history: &BTreeMap<String, Vec<MmrHistoryItem>>,
) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = players
        .iter()
        .map(|player| {
            let total_games = player.total_games();
            let player_history = history.get(&player.name).map(Vec::as_slice).unwrap_or(&[]);

            LeaderboardRow {
                name: player.name.clone(),
                wins: player.wins,
                losses: player.losses,
                win_percentage: if total_games == 0 {
                    0
                } else {
                    (player.wins as f64 / total_games as f64 * 100.0).round() as u32
                },
                total_games,
                spr: if total_games >= PLACEMENT_MIN_GAMES {
                    player.rating.unwrap_or(BASELINE_RATING).round() as i64
                } else {
                    0
                },
                trend: trend_for(total_games, player_history),
                ranked: is_player_ranked(player),
            }
        })
        .collect();

    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}
