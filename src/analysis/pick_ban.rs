use std::collections::BTreeMap;

use crate::model::{Match, PickBanRate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickBanCount {
    pub picks: u32,
    pub bans: u32,
}

impl PickBanCount {
    fn rate(&self, matches_seen: usize) -> PickBanRate {
        // two teams pick and ban per match
        let slots = 2.0 * matches_seen as f64;
        PickBanRate {
            pick: self.picks as f64 / slots * 100.0,
            ban: self.bans as f64 / slots * 100.0,
        }
    }
}

fn tally(counts: &mut BTreeMap<String, PickBanCount>, m: &Match) {
    for team in m.teams() {
        for player in &team.players {
            counts.entry(player.champion.clone()).or_default().picks += 1;
        }
        for ban in &team.bans {
            counts.entry(ban.clone()).or_default().bans += 1;
        }
    }
}

/// Total picks and bans per champion over the given matches.
pub fn count_picks_and_bans(matches: &[Match]) -> BTreeMap<String, PickBanCount> {
    let mut counts = BTreeMap::new();
    for m in matches {
        tally(&mut counts, m);
    }
    counts
}

/// Running pick/ban rates per champion. After each match every champion seen
/// so far gets a cumulative snapshot, so the last element of a series is the
/// rate over the whole match set. Series for champions that first appear late
/// are shorter.
pub fn compute_pick_ban_rates(matches: &[Match]) -> BTreeMap<String, Vec<PickBanRate>> {
    let mut counts = BTreeMap::new();
    let mut series: BTreeMap<String, Vec<PickBanRate>> = BTreeMap::new();

    for (index, m) in matches.iter().enumerate() {
        tally(&mut counts, m);

        for (name, count) in &counts {
            series
                .entry(name.clone())
                .or_default()
                .push(count.rate(index + 1));
        }
    }

    series
}

/// The rate shown to users: the last cumulative snapshot.
pub fn current_rate(history: &[PickBanRate]) -> Option<PickBanRate> {
    history.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatchPlayer, Side, Team};
    use approx::assert_relative_eq;

    fn team(champions: [&str; 5], bans: [&str; 5]) -> Team {
        Team {
            players: champions
                .iter()
                .enumerate()
                .map(|(i, champion)| MatchPlayer {
                    name: format!("p{i}"),
                    champion: champion.to_string(),
                })
                .collect(),
            bans: bans.iter().map(|ban| ban.to_string()).collect(),
        }
    }

    fn sample_matches() -> Vec<Match> {
        vec![
            Match {
                id: "1".into(),
                team1: team(
                    ["Ahri", "Jinx", "Leona", "Garen", "Lux"],
                    ["Zed", "Yasuo", "Teemo", "Yuumi", "Draven"],
                ),
                team2: team(
                    ["Zed", "Ezreal", "Thresh", "Darius", "Annie"],
                    ["Ahri", "Yasuo", "Master Yi", "Shaco", "Singed"],
                ),
                winner: Side::Team1,
            },
            Match {
                id: "2".into(),
                team1: team(
                    ["Ahri", "Caitlyn", "Nami", "Sett", "Vex"],
                    ["Yasuo", "Zed", "Teemo", "Yuumi", "Draven"],
                ),
                team2: team(
                    ["Akali", "Ashe", "Lulu", "Olaf", "Syndra"],
                    ["Jinx", "Lux", "Master Yi", "Shaco", "Singed"],
                ),
                winner: Side::Team2,
            },
        ]
    }

    #[test]
    fn every_match_contributes_ten_picks() {
        let matches = sample_matches();
        let counts = count_picks_and_bans(&matches[..1]);
        let picks: u32 = counts.values().map(|count| count.picks).sum();
        let bans: u32 = counts.values().map(|count| count.bans).sum();
        assert_eq!(picks, 10);
        assert_eq!(bans, 10);
    }

    #[test]
    fn current_rate_covers_whole_match_set() {
        let rates = compute_pick_ban_rates(&sample_matches());

        // Ahri: picked twice, banned once, over 2 matches (4 team slots)
        let ahri = current_rate(&rates["Ahri"]).unwrap();
        assert_relative_eq!(ahri.pick, 50.0);
        assert_relative_eq!(ahri.ban, 25.0);

        // Yasuo: banned by both teams in match 1 and once in match 2
        let yasuo = current_rate(&rates["Yasuo"]).unwrap();
        assert_relative_eq!(yasuo.pick, 0.0);
        assert_relative_eq!(yasuo.ban, 75.0);

        // Akali only shows up in the second match
        assert_eq!(rates["Akali"].len(), 1);
        assert_relative_eq!(current_rate(&rates["Akali"]).unwrap().pick, 25.0);
    }

    #[test]
    fn series_accumulates_per_match() {
        let rates = compute_pick_ban_rates(&sample_matches());
        let jinx = &rates["Jinx"];
        assert_eq!(jinx.len(), 2);
        assert_relative_eq!(jinx[0].pick, 50.0);
        assert_relative_eq!(jinx[1].pick, 25.0);
        assert_relative_eq!(jinx[1].ban, 25.0);
    }

    #[test]
    fn no_matches_means_no_rates() {
        assert!(compute_pick_ban_rates(&[]).is_empty());
        assert_eq!(current_rate(&[]), None);
    }

    #[test]
    fn rerunning_gives_identical_output() {
        let matches = sample_matches();
        assert_eq!(compute_pick_ban_rates(&matches), compute_pick_ban_rates(&matches));
    }
}
