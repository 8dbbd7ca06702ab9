use std::collections::BTreeMap;

use tracing::warn;

use super::pick_ban::{compute_pick_ban_rates, current_rate};
use crate::api::models::{
    ChampionDto, GlickoData, GlickoPerMatchData, MatchData, MatchDto, PlayerRecordDto,
    PlayerStatsDto, StatsData, TeamDto, TrueSkillData,
};
use crate::model::{
    Champion, GlickoHistoryItem, Match, MatchPlayer, MmrHistoryItem, Player, PlayerRecord, Team,
};

pub const TEAM_SIZE: usize = 5;

/// Secondary-rating payloads carry names in their original casing. Lookups
/// are made with lowercased names, so the keys are lowercased on the way in.
/// Entries without a rating are left out and read as 0.
pub fn normalize_secondary(data: &TrueSkillData) -> BTreeMap<String, f64> {
    data.iter()
        .filter_map(|(name, entry)| Some((name.to_lowercase(), entry.rating?)))
        .collect()
}

fn champion_from_dto(key: &str, dto: &ChampionDto) -> Champion {
    Champion {
        name: if dto.name.is_empty() {
            key.to_string()
        } else {
            dto.name.clone()
        },
        wins: dto.wins,
        losses: dto.losses,
        win_percentage: dto.win_percentage,
        total_games: dto.total_games,
        ban_percentage: None,
        pick_percentage: None,
        pick_ban_history: Vec::new(),
    }
}

fn records_from_dto(records: &BTreeMap<String, PlayerRecordDto>) -> BTreeMap<String, PlayerRecord> {
    records
        .iter()
        .map(|(key, dto)| {
            let record = PlayerRecord {
                name: if dto.name.is_empty() {
                    key.clone()
                } else {
                    dto.name.clone()
                },
                wins: dto.wins,
                losses: dto.losses,
                win_percentage: dto.win_percentage,
                total_games: dto.total_games,
            };
            (key.clone(), record)
        })
        .collect()
}

fn player_from_dto(
    dto: &PlayerStatsDto,
    rating: Option<f64>,
    secondary: &BTreeMap<String, f64>,
) -> Player {
    Player {
        name: dto.name.clone(),
        wins: dto.wins.unwrap_or(0),
        losses: dto.losses.unwrap_or(0),
        rating,
        secondary_rating: secondary
            .get(&dto.name.to_lowercase())
            .copied()
            .unwrap_or(0.0),
        champions: dto
            .champions
            .iter()
            .map(|(key, champion)| (key.clone(), champion_from_dto(key, champion)))
            .collect(),
        teammates: records_from_dto(&dto.teammates),
        opponents: records_from_dto(&dto.opponents),
    }
}

/// One player per stats entry, with both rating systems attached.
pub fn merge_players(stats: &StatsData, rating: &GlickoData, secondary: &TrueSkillData) -> Vec<Player> {
    let secondary = normalize_secondary(secondary);

    stats
        .players
        .iter()
        .map(|dto| player_from_dto(dto, rating.mmr.get(&dto.name).copied(), &secondary))
        .collect()
}

/// Single-player lookup by exact name. The rating is rounded here, the way
/// profile pages display it.
pub fn merge_player(
    name: &str,
    stats: &StatsData,
    rating: &GlickoData,
    secondary: &TrueSkillData,
) -> Option<Player> {
    let dto = stats.players.iter().find(|player| player.name == name)?;
    let secondary = normalize_secondary(secondary);
    let rating = rating.mmr.get(name).map(|value| value.round());

    Some(player_from_dto(dto, rating, &secondary))
}

fn team_from_dto(match_id: &str, label: &str, dto: &TeamDto) -> Option<Team> {
    if dto.players.len() != TEAM_SIZE || dto.bans.len() != TEAM_SIZE {
        warn!(
            match_id,
            team = label,
            players = dto.players.len(),
            bans = dto.bans.len(),
            "skipping match with incomplete team"
        );
        return None;
    }

    Some(Team {
        players: dto
            .players
            .iter()
            .map(|player| MatchPlayer {
                name: player.name.clone(),
                champion: player.champion.clone(),
            })
            .collect(),
        bans: dto.bans.clone(),
    })
}

fn match_from_dto(dto: &MatchDto) -> Option<Match> {
    Some(Match {
        id: dto.id.clone(),
        team1: team_from_dto(&dto.id, "Team 1", &dto.team1)?,
        team2: team_from_dto(&dto.id, "Team 2", &dto.team2)?,
        winner: dto.winner,
    })
}

/// Normalizes the match payload, dropping records that do not have full
/// rosters and bans on both sides.
pub fn map_match_history(data: &MatchData) -> Vec<Match> {
    data.matches.iter().filter_map(match_from_dto).collect()
}

pub fn find_match<'a>(matches: &'a [Match], id: &str) -> Option<&'a Match> {
    matches.iter().find(|m| m.id == id)
}

/// Champions from the stats payload with their current pick and ban rates.
/// Champions that never show up in the match history keep `None` for both.
pub fn merge_champions(stats: &StatsData, matches: &[Match]) -> BTreeMap<String, Champion> {
    let pick_bans = compute_pick_ban_rates(matches);

    stats
        .champions
        .iter()
        .map(|(key, dto)| {
            let mut champion = champion_from_dto(key, dto);
            if let Some(rate) = pick_bans.get(key).and_then(|history| current_rate(history)) {
                champion.pick_percentage = Some(rate.pick);
                champion.ban_percentage = Some(rate.ban);
            }
            (key.clone(), champion)
        })
        .collect()
}

/// Single-champion lookup, also carrying the running pick/ban series.
pub fn merge_champion(name: &str, stats: &StatsData, matches: &[Match]) -> Option<Champion> {
    let dto = stats.champions.get(name)?;
    let mut pick_bans = compute_pick_ban_rates(matches);

    let mut champion = champion_from_dto(name, dto);
    if let Some(history) = pick_bans.remove(name) {
        if let Some(rate) = current_rate(&history) {
            champion.pick_percentage = Some(rate.pick);
            champion.ban_percentage = Some(rate.ban);
        }
        champion.pick_ban_history = history;
    }

    Some(champion)
}

pub fn map_rating_per_match(data: &[GlickoPerMatchData]) -> Vec<GlickoHistoryItem> {
    data.iter()
        .map(|item| GlickoHistoryItem {
            game_id: item.game_id,
            ratings: item.mmr.clone(),
        })
        .collect()
}

/// Regroups per-match snapshots into one ascending history per player.
pub fn player_rating_history(items: &[GlickoHistoryItem]) -> BTreeMap<String, Vec<MmrHistoryItem>> {
    let mut history: BTreeMap<String, Vec<MmrHistoryItem>> = BTreeMap::new();

    for item in items {
        for (name, rating) in &item.ratings {
            history.entry(name.clone()).or_default().push(MmrHistoryItem {
                game_id: item.game_id,
                rating: *rating,
            });
        }
    }

    for entries in history.values_mut() {
        entries.sort_by_key(|entry| entry.game_id);
    }

    history
}
