use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

// /stats response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsData {
    #[serde(default)]
    pub players: Vec<PlayerStatsDto>,
    #[serde(default)]
    pub champions: BTreeMap<String, ChampionDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsDto {
    pub name: String,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub champions: BTreeMap<String, ChampionDto>,
    #[serde(default)]
    pub teammates: BTreeMap<String, PlayerRecordDto>,
    #[serde(default)]
    pub opponents: BTreeMap<String, PlayerRecordDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionDto {
    // some payloads only carry the name as the map key
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub win_percentage: f64,
    #[serde(default)]
    pub total_games: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecordDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub win_percentage: f64,
    #[serde(default)]
    pub total_games: u32,
}

// /placement response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlickoData {
    #[serde(default)]
    pub mmr: BTreeMap<String, f64>,
}

// /mmr_per_match response: one rating snapshot of every player per match
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlickoPerMatchData {
    pub game_id: u64,
    #[serde(default)]
    pub mmr: BTreeMap<String, f64>,
}

// /trueskill response, keyed by player name in its original casing
pub type TrueSkillData = BTreeMap<String, TrueSkillEntry>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrueSkillEntry {
    #[serde(default, alias = "value")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub mu: Option<f64>,
    #[serde(default)]
    pub sigma: Option<f64>,
}

// /matches response. Records that do not decode are dropped one by one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchData {
    #[serde(default, deserialize_with = "skip_malformed")]
    pub matches: Vec<MatchDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub team1: TeamDto,
    pub team2: TeamDto,
    pub winner: Side,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamDto {
    #[serde(default)]
    pub players: Vec<MatchPlayerDto>,
    #[serde(default)]
    pub bans: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchPlayerDto {
    pub name: String,
    pub champion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "Team 1")]
    Team1,
    #[serde(rename = "Team 2")]
    Team2,
}

fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = Vec::<serde_json::Value>::deserialize(deserializer)?;

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(index, %err, "skipping malformed record");
                None
            }
        })
        .collect())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
