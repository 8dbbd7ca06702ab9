use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;
use strum_macros::{Display, EnumIter};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum DamageType {
    Magic,
    Physical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum AuditCode {
    #[strum(to_string = "No Magic Damage")]
    NoMagicDamage,
    #[strum(to_string = "No Physical Damage")]
    NoPhysicalDamage,
    #[strum(to_string = "Low Damage")]
    LowDamage,
}

impl AuditCode {
    pub fn color(&self) -> &'static str {
        match self {
            AuditCode::NoPhysicalDamage => "orange",
            AuditCode::NoMagicDamage => "violet",
            AuditCode::LowDamage => "grey",
        }
    }
}

mod table {
    use super::DamageType::{self, *};

    // Primary damage profile. Utility-first picks carry no tag.
    pub const CHAMPION_DAMAGE: &[(&str, &[DamageType])] = &[
        ("Aatrox", &[Physical]),
        ("Ahri", &[Magic]),
        ("Akali", &[Magic]),
        ("Akshan", &[Physical]),
        ("Alistar", &[Magic]),
        ("Amumu", &[Magic]),
        ("Anivia", &[Magic]),
        ("Annie", &[Magic]),
        ("Aphelios", &[Physical]),
        ("Ashe", &[Physical]),
        ("Aurelion Sol", &[Magic]),
        ("Azir", &[Magic]),
        ("Bard", &[Magic]),
        ("Bel'Veth", &[Physical]),
        ("Blitzcrank", &[Magic]),
        ("Brand", &[Magic]),
        ("Braum", &[Magic]),
        ("Caitlyn", &[Physical]),
        ("Camille", &[Physical]),
        ("Cassiopeia", &[Magic]),
        ("Cho'Gath", &[Magic]),
        ("Corki", &[Magic, Physical]),
        ("Darius", &[Physical]),
        ("Diana", &[Magic]),
        ("Dr. Mundo", &[Magic, Physical]),
        ("Draven", &[Physical]),
        ("Ekko", &[Magic]),
        ("Elise", &[Magic]),
        ("Evelynn", &[Magic]),
        ("Ezreal", &[Physical]),
        ("Fiddlesticks", &[Magic]),
        ("Fiora", &[Physical]),
        ("Fizz", &[Magic]),
        ("Galio", &[Magic]),
        ("Gangplank", &[Physical]),
        ("Garen", &[Physical]),
        ("Gnar", &[Physical]),
        ("Gragas", &[Magic]),
        ("Graves", &[Physical]),
        ("Gwen", &[Magic]),
        ("Hecarim", &[Physical]),
        ("Heimerdinger", &[Magic]),
        ("Illaoi", &[Physical]),
        ("Irelia", &[Physical]),
        ("Ivern", &[]),
        ("Janna", &[]),
        ("Jarvan IV", &[Physical]),
        ("Jax", &[Magic, Physical]),
        ("Jayce", &[Physical]),
        ("Jhin", &[Physical]),
        ("Jinx", &[Physical]),
        ("K'Sante", &[Physical]),
        ("Kai'Sa", &[Magic, Physical]),
        ("Kalista", &[Physical]),
        ("Karma", &[Magic]),
        ("Karthus", &[Magic]),
        ("Kassadin", &[Magic]),
        ("Katarina", &[Magic]),
        ("Kayle", &[Magic, Physical]),
        ("Kayn", &[Physical]),
        ("Kennen", &[Magic]),
        ("Kha'Zix", &[Physical]),
        ("Kindred", &[Physical]),
        ("Kled", &[Physical]),
        ("Kog'Maw", &[Magic, Physical]),
        ("LeBlanc", &[Magic]),
        ("Lee Sin", &[Physical]),
        ("Leona", &[Magic]),
        ("Lillia", &[Magic]),
        ("Lissandra", &[Magic]),
        ("Lucian", &[Physical]),
        ("Lulu", &[Magic]),
        ("Lux", &[Magic]),
        ("Malphite", &[Magic]),
        ("Malzahar", &[Magic]),
        ("Maokai", &[Magic]),
        ("Master Yi", &[Physical]),
        ("Miss Fortune", &[Physical]),
        ("Mordekaiser", &[Magic]),
        ("Morgana", &[Magic]),
        ("Nami", &[Magic]),
        ("Nasus", &[Physical]),
        ("Nautilus", &[Magic]),
        ("Neeko", &[Magic]),
        ("Nidalee", &[Magic]),
        ("Nilah", &[Physical]),
        ("Nocturne", &[Physical]),
        ("Nunu & Willump", &[Magic]),
        ("Olaf", &[Physical]),
        ("Orianna", &[Magic]),
        ("Ornn", &[Magic]),
        ("Pantheon", &[Physical]),
        ("Poppy", &[Physical]),
        ("Pyke", &[Physical]),
        ("Qiyana", &[Physical]),
        ("Quinn", &[Physical]),
        ("Rakan", &[Magic]),
        ("Rammus", &[Magic]),
        ("Rek'Sai", &[Physical]),
        ("Rell", &[Magic]),
        ("Renata Glasc", &[]),
        ("Renekton", &[Physical]),
        ("Rengar", &[Physical]),
        ("Riven", &[Physical]),
        ("Rumble", &[Magic]),
        ("Ryze", &[Magic]),
        ("Samira", &[Physical]),
        ("Sejuani", &[Magic]),
        ("Senna", &[Physical]),
        ("Seraphine", &[Magic]),
        ("Sett", &[Physical]),
        ("Shaco", &[Magic, Physical]),
        ("Shen", &[Magic, Physical]),
        ("Shyvana", &[Magic, Physical]),
        ("Singed", &[Magic]),
        ("Sion", &[Physical]),
        ("Sivir", &[Physical]),
        ("Skarner", &[Physical]),
        ("Sona", &[Magic]),
        ("Soraka", &[]),
        ("Swain", &[Magic]),
        ("Sylas", &[Magic]),
        ("Syndra", &[Magic]),
        ("Tahm Kench", &[Magic]),
        ("Taliyah", &[Magic]),
        ("Talon", &[Physical]),
        ("Taric", &[]),
        ("Teemo", &[Magic]),
        ("Thresh", &[Magic]),
        ("Tristana", &[Physical]),
        ("Trundle", &[Physical]),
        ("Tryndamere", &[Physical]),
        ("Twisted Fate", &[Magic]),
        ("Twitch", &[Physical]),
        ("Udyr", &[Magic, Physical]),
        ("Urgot", &[Physical]),
        ("Varus", &[Physical]),
        ("Vayne", &[Physical]),
        ("Veigar", &[Magic]),
        ("Vel'Koz", &[Magic]),
        ("Vex", &[Magic]),
        ("Vi", &[Physical]),
        ("Viego", &[Physical]),
        ("Viktor", &[Magic]),
        ("Vladimir", &[Magic]),
        ("Volibear", &[Magic, Physical]),
        ("Warwick", &[Magic, Physical]),
        ("Wukong", &[Physical]),
        ("Xayah", &[Physical]),
        ("Xerath", &[Magic]),
        ("Xin Zhao", &[Physical]),
        ("Yasuo", &[Physical]),
        ("Yone", &[Physical]),
        ("Yorick", &[Physical]),
        ("Yuumi", &[]),
        ("Zac", &[Magic]),
        ("Zed", &[Physical]),
        ("Zeri", &[Physical]),
        ("Ziggs", &[Magic]),
        ("Zilean", &[Magic]),
        ("Zoe", &[Magic]),
        ("Zyra", &[Magic]),
    ];
}

lazy_static! {
    static ref DAMAGE_MAP: HashMap<&'static str, &'static [DamageType]> =
        table::CHAMPION_DAMAGE.iter().copied().collect();
}

pub fn damage_of(champion: &str) -> Option<&'static [DamageType]> {
    DAMAGE_MAP.get(champion).copied()
}

/// Audit codes for a team given each pick's damage tags.
///
/// `LowDamage` compares the summed tag counts, so one champion tagged with
/// both damage types is enough to clear it.
pub fn audit_damage_tags(picks: &[&[DamageType]]) -> Vec<AuditCode> {
    let count = |damage: DamageType| {
        picks
            .iter()
            .filter(|tags| tags.contains(&damage))
            .count()
    };
    let magic = count(DamageType::Magic);
    let physical = count(DamageType::Physical);

    let mut codes = Vec::new();
    if magic == 0 {
        codes.push(AuditCode::NoMagicDamage);
    }
    if physical == 0 {
        codes.push(AuditCode::NoPhysicalDamage);
    }
    if magic + physical <= 1 {
        codes.push(AuditCode::LowDamage);
    }
    codes
}

/// Audits a team by champion name. Champions missing from the damage table
/// are logged and treated as dealing no damage.
pub fn audit_team<S: AsRef<str>>(champions: &[S]) -> Vec<AuditCode> {
    let tags: Vec<&[DamageType]> = champions
        .iter()
        .map(|champion| {
            let champion = champion.as_ref();
            damage_of(champion).unwrap_or_else(|| {
                warn!(champion, "unknown champion, no damage tags");
                &[]
            })
        })
        .collect();

    audit_damage_tags(&tags)
}
