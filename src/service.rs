use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread::{self, ScopedJoinHandle};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::analysis::aggregator::{
    map_match_history, map_rating_per_match, merge_champion, merge_champions, merge_player,
    merge_players, player_rating_history,
};
use crate::analysis::champion_classes::{champion_class_win_rates, ChampionClass, WinLossRecord};
use crate::analysis::rating::{leaderboard, LeaderboardRow};
use crate::api::client::parse_body;
use crate::api::models::{GlickoData, GlickoPerMatchData, MatchData, StatsData, TrueSkillData};
use crate::api::{Resource, StatsSource, ToxicApiClient};
use crate::cache::QueryCache;
use crate::config::Config;
use crate::error::AppError;
use crate::model::{Champion, GlickoHistoryItem, Match, MmrHistoryItem, Player};

type PlayerInputs = (Arc<StatsData>, Arc<GlickoData>, Arc<TrueSkillData>);

/// Query front door: fetches what each view needs through the caches and
/// hands complete inputs to the aggregation functions. A query either gets
/// every input it asked for or fails as a whole.
pub struct ToxicDataService<S: StatsSource> {
    source: S,
    stats: QueryCache<StatsData>,
    placement: QueryCache<GlickoData>,
    trueskill: QueryCache<TrueSkillData>,
    matches: QueryCache<MatchData>,
    mmr_per_match: QueryCache<Vec<GlickoPerMatchData>>,
}

impl ToxicDataService<ToxicApiClient> {
    pub fn from_config(config: Config) -> Self {
        Self::new(ToxicApiClient::new(config))
    }
}

fn joined<T>(handle: ScopedJoinHandle<'_, Result<T, AppError>>) -> Result<T, AppError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(AppError::HttpError("fetch worker panicked".to_string())))
}

impl<S: StatsSource> ToxicDataService<S> {
    pub fn new(source: S) -> Self {
        ToxicDataService {
            source,
            stats: QueryCache::new(Resource::Stats),
            placement: QueryCache::new(Resource::Placement),
            trueskill: QueryCache::new(Resource::TrueSkill),
            matches: QueryCache::new(Resource::Matches),
            mmr_per_match: QueryCache::new(Resource::MmrPerMatch),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn load<T: DeserializeOwned>(
        &self,
        cache: &QueryCache<T>,
        season: Option<u32>,
    ) -> Result<Arc<T>, AppError> {
        let resource = cache.resource();
        // season 0 is the all-time view, same as no season
        let season = season.filter(|season| *season > 0);
        cache.get_or_fetch(season, || {
            let body = self.source.fetch(resource, season)?;
            parse_body(resource, &body)
        })
    }

    fn load_player_inputs(&self, season: Option<u32>) -> Result<PlayerInputs, AppError> {
        thread::scope(|scope| {
            let stats = scope.spawn(|| self.load(&self.stats, season));
            let rating = scope.spawn(|| self.load(&self.placement, season));
            let secondary = scope.spawn(|| self.load(&self.trueskill, season));

            Ok((joined(stats)?, joined(rating)?, joined(secondary)?))
        })
    }

    fn load_champion_inputs(
        &self,
        season: Option<u32>,
    ) -> Result<(Arc<StatsData>, Vec<Match>), AppError> {
        thread::scope(|scope| {
            let stats = scope.spawn(|| self.load(&self.stats, season));
            let matches = scope.spawn(|| self.load(&self.matches, season));

            let stats = joined(stats)?;
            let matches = joined(matches)?;
            Ok((stats, map_match_history(&matches)))
        })
    }

    pub fn players(&self, season: Option<u32>) -> Result<Vec<Player>, AppError> {
        let (stats, rating, secondary) = self.load_player_inputs(season)?;
        let players = merge_players(&stats, &rating, &secondary);
        debug!(count = players.len(), ?season, "merged players");
        Ok(players)
    }

    pub fn player(&self, name: &str, season: Option<u32>) -> Result<Option<Player>, AppError> {
        let (stats, rating, secondary) = self.load_player_inputs(season)?;
        Ok(merge_player(name, &stats, &rating, &secondary))
    }

    pub fn champions(&self, season: Option<u32>) -> Result<BTreeMap<String, Champion>, AppError> {
        let (stats, matches) = self.load_champion_inputs(season)?;
        Ok(merge_champions(&stats, &matches))
    }

    pub fn champion(&self, name: &str, season: Option<u32>) -> Result<Option<Champion>, AppError> {
        let (stats, matches) = self.load_champion_inputs(season)?;
        Ok(merge_champion(name, &stats, &matches))
    }

    pub fn match_history(&self, season: Option<u32>) -> Result<Vec<Match>, AppError> {
        let data = self.load(&self.matches, season)?;
        Ok(map_match_history(&data))
    }

    pub fn find_match(&self, id: &str, season: Option<u32>) -> Result<Option<Match>, AppError> {
        Ok(self
            .match_history(season)?
            .into_iter()
            .find(|m| m.id == id))
    }

    pub fn rating_history(&self, season: Option<u32>) -> Result<Vec<GlickoHistoryItem>, AppError> {
        let data = self.load(&self.mmr_per_match, season)?;
        Ok(map_rating_per_match(&data))
    }

    pub fn player_rating_history(
        &self,
        season: Option<u32>,
    ) -> Result<BTreeMap<String, Vec<MmrHistoryItem>>, AppError> {
        Ok(player_rating_history(&self.rating_history(season)?))
    }

    pub fn leaderboard(&self, season: Option<u32>) -> Result<Vec<LeaderboardRow>, AppError> {
        let (players, history) = thread::scope(|scope| {
            let history = scope.spawn(|| self.player_rating_history(season));
            let players = self.players(season)?;
            Ok::<_, AppError>((players, joined(history)?))
        })?;

        Ok(leaderboard(&players, &history))
    }

    pub fn player_class_win_rates(
        &self,
        name: &str,
        season: Option<u32>,
    ) -> Result<Option<IndexMap<ChampionClass, WinLossRecord>>, AppError> {
        Ok(self
            .player(name, season)?
            .map(|player| champion_class_win_rates(player.champions.values())))
    }
}
