use std::collections::HashMap;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::warn;

use crate::model::Champion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum ChampionClass {
    Diver,
    Juggernaut,
    Catcher,
    Enchanter,
    Artillery,
    Battlemage,
    Burst,
    Marksman,
    Assassin,
    Skirmisher,
    Specialist,
    Vanguard,
    Warden,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
}

impl WinLossRecord {
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_rate(&self) -> f64 {
        if self.total_games() == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_games() as f64
        }
    }
}

mod table {
    use super::ChampionClass::{self, *};

    // class assignments from the League of Legends wiki
    pub const CHAMPION_CLASSES: &[(&str, &[ChampionClass])] = &[
        ("Camille", &[Diver]),
        ("Elise", &[Diver]),
        ("Hecarim", &[Diver]),
        ("Irelia", &[Diver]),
        ("Jarvan IV", &[Diver]),
        ("Lee Sin", &[Diver]),
        ("Olaf", &[Diver]),
        ("Pantheon", &[Diver]),
        ("Rek'Sai", &[Diver]),
        ("Renekton", &[Diver]),
        ("Skarner", &[Diver]),
        ("Vi", &[Diver]),
        ("Warwick", &[Diver]),
        ("Wukong", &[Diver]),
        ("Xin Zhao", &[Diver]),
        ("Aatrox", &[Juggernaut]),
        ("Darius", &[Juggernaut]),
        ("Dr. Mundo", &[Juggernaut]),
        ("Garen", &[Juggernaut]),
        ("Illaoi", &[Juggernaut]),
        ("Mordekaiser", &[Juggernaut]),
        ("Nasus", &[Juggernaut]),
        ("Sett", &[Juggernaut]),
        ("Shyvana", &[Juggernaut]),
        ("Trundle", &[Juggernaut]),
        ("Udyr", &[Juggernaut]),
        ("Urgot", &[Juggernaut]),
        ("Volibear", &[Juggernaut]),
        ("Yorick", &[Juggernaut]),
        ("Bard", &[Catcher]),
        ("Blitzcrank", &[Catcher]),
        ("Ivern", &[Catcher]),
        ("Morgana", &[Catcher]),
        ("Neeko", &[Catcher, Burst]),
        ("Pyke", &[Catcher, Assassin]),
        ("Rakan", &[Catcher]),
        ("Thresh", &[Catcher]),
        ("Zyra", &[Catcher]),
        ("Janna", &[Enchanter]),
        ("Karma", &[Enchanter, Burst]),
        ("Lulu", &[Enchanter]),
        ("Nami", &[Enchanter]),
        ("Renata Glasc", &[Enchanter]),
        ("Seraphine", &[Enchanter, Burst]),
        ("Sona", &[Enchanter]),
        ("Soraka", &[Enchanter]),
        ("Taric", &[Enchanter, Warden]),
        ("Yuumi", &[Enchanter]),
        ("Jayce", &[Artillery]),
        ("Lux", &[Artillery, Burst]),
        ("Vel'Koz", &[Artillery]),
        ("Xerath", &[Artillery]),
        ("Ziggs", &[Artillery]),
        ("Anivia", &[Battlemage]),
        ("Aurelion Sol", &[Battlemage]),
        ("Cassiopeia", &[Battlemage]),
        ("Karthus", &[Battlemage]),
        ("Malzahar", &[Battlemage]),
        ("Rumble", &[Battlemage]),
        ("Ryze", &[Battlemage]),
        ("Swain", &[Battlemage]),
        ("Taliyah", &[Battlemage]),
        ("Viktor", &[Battlemage]),
        ("Vladimir", &[Battlemage]),
        ("Ahri", &[Burst]),
        ("Annie", &[Burst]),
        ("Brand", &[Burst]),
        ("LeBlanc", &[Burst]),
        ("Lissandra", &[Burst]),
        ("Orianna", &[Burst]),
        ("Syndra", &[Burst]),
        ("Twisted Fate", &[Burst]),
        ("Veigar", &[Burst]),
        ("Vex", &[Burst]),
        ("Zoe", &[Burst]),
        ("Aphelios", &[Marksman]),
        ("Ashe", &[Marksman]),
        ("Caitlyn", &[Marksman]),
        ("Corki", &[Marksman]),
        ("Draven", &[Marksman]),
        ("Ezreal", &[Marksman]),
        ("Jhin", &[Marksman, Catcher]),
        ("Jinx", &[Marksman]),
        ("Kai'Sa", &[Marksman]),
        ("Kalista", &[Marksman]),
        ("Kindred", &[Marksman]),
        ("Kog'Maw", &[Marksman]),
        ("Lucian", &[Marksman]),
        ("Miss Fortune", &[Marksman]),
        ("Samira", &[Marksman]),
        ("Senna", &[Marksman, Enchanter]),
        ("Sivir", &[Marksman]),
        ("Tristana", &[Marksman]),
        ("Twitch", &[Marksman]),
        ("Varus", &[Marksman, Artillery]),
        ("Vayne", &[Marksman]),
        ("Xayah", &[Marksman]),
        ("Zeri", &[Marksman]),
        ("Akali", &[Assassin]),
        ("Akshan", &[Assassin, Marksman]),
        ("Diana", &[Assassin, Diver]),
        ("Ekko", &[Assassin]),
        ("Evelynn", &[Assassin]),
        ("Fizz", &[Assassin]),
        ("Kassadin", &[Assassin]),
        ("Katarina", &[Assassin]),
        ("Kha'Zix", &[Assassin]),
        ("Nocturne", &[Assassin]),
        ("Qiyana", &[Assassin]),
        ("Rengar", &[Assassin, Diver]),
        ("Shaco", &[Assassin]),
        ("Talon", &[Assassin]),
        ("Zed", &[Assassin]),
        ("Bel'Veth", &[Skirmisher]),
        ("Fiora", &[Skirmisher]),
        ("Gwen", &[Skirmisher]),
        ("Jax", &[Skirmisher]),
        ("Kayn", &[Skirmisher]),
        ("Kled", &[Skirmisher]),
        ("Lillia", &[Skirmisher]),
        ("Master Yi", &[Skirmisher]),
        ("Nilah", &[Skirmisher]),
        ("Riven", &[Skirmisher]),
        ("Sylas", &[Skirmisher, Burst]),
        ("Tryndamere", &[Skirmisher]),
        ("Viego", &[Skirmisher]),
        ("Yasuo", &[Skirmisher]),
        ("Yone", &[Skirmisher, Assassin]),
        ("Azir", &[Specialist]),
        ("Cho'Gath", &[Specialist]),
        ("Fiddlesticks", &[Specialist]),
        ("Gangplank", &[Specialist]),
        ("Gnar", &[Specialist]),
        ("Graves", &[Specialist]),
        ("Heimerdinger", &[Specialist]),
        ("Kayle", &[Specialist]),
        ("Kennen", &[Specialist]),
        ("Nidalee", &[Specialist]),
        ("Quinn", &[Specialist]),
        ("Singed", &[Specialist]),
        ("Teemo", &[Specialist]),
        ("Zilean", &[Specialist]),
        ("Alistar", &[Vanguard]),
        ("Amumu", &[Vanguard]),
        ("Gragas", &[Vanguard]),
        ("Leona", &[Vanguard]),
        ("Malphite", &[Vanguard]),
        ("Maokai", &[Vanguard]),
        ("Nautilus", &[Vanguard]),
        ("Nunu & Willump", &[Vanguard]),
        ("Ornn", &[Vanguard]),
        ("Rammus", &[Vanguard]),
        ("Rell", &[Vanguard]),
        ("Sejuani", &[Vanguard]),
        ("Sion", &[Vanguard]),
        ("Zac", &[Vanguard]),
        ("Braum", &[Warden]),
        ("Galio", &[Warden]),
        ("Poppy", &[Warden]),
        ("Shen", &[Warden]),
        ("Tahm Kench", &[Warden]),
        ("K'Sante", &[Warden, Skirmisher]),
    ];
}

lazy_static! {
    static ref CLASS_MAP: HashMap<&'static str, &'static [ChampionClass]> =
        table::CHAMPION_CLASSES.iter().copied().collect();
}

/// Classes of a champion, or `None` when the champion is not in the table.
pub fn classes_of(champion: &str) -> Option<&'static [ChampionClass]> {
    CLASS_MAP.get(champion).copied()
}

/// Win/loss totals per champion class, listed in declaration order with every
/// class present. A champion with several classes counts towards each of them.
pub fn champion_class_win_rates<'a, I>(champions: I) -> IndexMap<ChampionClass, WinLossRecord>
where
    I: IntoIterator<Item = &'a Champion>,
{
    let mut rates: IndexMap<ChampionClass, WinLossRecord> = ChampionClass::iter()
        .map(|class| (class, WinLossRecord::default()))
        .collect();

    for champion in champions {
        let Some(classes) = classes_of(&champion.name) else {
            warn!(champion = %champion.name, "unknown champion, skipping class win rates");
            continue;
        };

        for class in classes {
            let record = rates.entry(*class).or_default();
            record.wins += champion.wins;
            record.losses += champion.losses;
        }
    }

    rates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn champion(name: &str, wins: u32, losses: u32) -> Champion {
        Champion {
            name: name.to_string(),
            wins,
            losses,
            win_percentage: 0.0,
            total_games: wins + losses,
            ban_percentage: None,
            pick_percentage: None,
            pick_ban_history: Vec::new(),
        }
    }

    #[test]
    fn every_class_is_listed_in_order() {
        let rates = champion_class_win_rates(&[]);
        let classes: Vec<ChampionClass> = rates.keys().copied().collect();
        assert_eq!(classes, ChampionClass::iter().collect::<Vec<_>>());
        assert!(rates.values().all(|record| record.total_games() == 0));
    }

    #[test]
    fn multi_class_champions_count_for_each_class() {
        let champions = [champion("Lux", 3, 1), champion("Ahri", 2, 2), champion("Garen", 1, 0)];
        let rates = champion_class_win_rates(&champions);

        assert_eq!(rates[&ChampionClass::Burst], WinLossRecord { wins: 5, losses: 3 });
        assert_eq!(rates[&ChampionClass::Artillery], WinLossRecord { wins: 3, losses: 1 });
        assert_eq!(rates[&ChampionClass::Juggernaut], WinLossRecord { wins: 1, losses: 0 });
        assert_eq!(rates[&ChampionClass::Warden].total_games(), 0);
    }

    #[test]
    fn unknown_champions_are_skipped() {
        let champions = [champion("Definitely Not A Champion", 10, 10), champion("Teemo", 1, 1)];
        let rates = champion_class_win_rates(&champions);

        let total: u32 = rates.values().map(WinLossRecord::total_games).sum();
        assert_eq!(total, 2);
        assert_eq!(rates[&ChampionClass::Specialist].win_rate(), 0.5);
    }

    #[test]
    fn lookup_uses_display_names() {
        assert_eq!(classes_of("K'Sante"), Some(&[ChampionClass::Warden, ChampionClass::Skirmisher][..]));
        assert_eq!(classes_of("Nunu & Willump"), Some(&[ChampionClass::Vanguard][..]));
        assert_eq!(classes_of("ksante"), None);
    }
}
