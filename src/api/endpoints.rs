use std::fmt;
use std::time::Duration;

/// Resources served by the stats API. Every one of them accepts an optional
/// `season` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Placement,
    Stats,
    MmrPerMatch,
    Matches,
    TrueSkill,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Placement => "placement",
            Resource::Stats => "stats",
            Resource::MmrPerMatch => "mmr_per_match",
            Resource::Matches => "matches",
            Resource::TrueSkill => "trueskill",
        }
    }

    /// How long a fetched payload may be served from the cache.
    pub fn stale_after(&self) -> Duration {
        match self {
            Resource::Placement | Resource::Stats | Resource::TrueSkill => {
                Duration::from_secs(20)
            }
            Resource::MmrPerMatch | Resource::Matches => Duration::from_secs(2),
        }
    }

    /// Season 0 means all time and is sent without a query.
    pub fn url(&self, base: &str, season: Option<u32>) -> String {
        match season {
            Some(season) if season > 0 => format!("{}/{}?season={}", base, self.path(), season),
            _ => format!("{}/{}", base, self.path()),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
