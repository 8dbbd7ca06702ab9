use colored::*;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use tabled::{settings::Style, Table, Tabled};

use toxic_stats::analysis::audit::AuditCode;
use toxic_stats::analysis::champion_classes::{ChampionClass, WinLossRecord};
use toxic_stats::analysis::player::{Accolade, Outcome, PlayerMatch};
use toxic_stats::analysis::rating::{
    is_player_ranked, overview_averages, player_spr_text, spr_color, spr_value, team_spr,
    LeaderboardRow, SprColor, Trend,
};
use toxic_stats::model::{Champion, Match, Player, PlayerRecord, Side};

#[derive(Tabled)]
struct LeaderboardTableRow {
    #[tabled(rename = "#")]
    number: String,
    name: String,
    wins: String,
    #[tabled(rename = "win %")]
    win_percentage: String,
    games: String,
    spr: String,
    trend: String,
}

#[derive(Tabled)]
struct ChampionRow {
    champion: String,
    wins: String,
    losses: String,
    #[tabled(rename = "win %")]
    win_percentage: String,
    games: String,
    #[tabled(rename = "pick %")]
    pick: String,
    #[tabled(rename = "ban %")]
    ban: String,
}

#[derive(Tabled)]
struct RecordRow {
    name: String,
    wins: String,
    losses: String,
    #[tabled(rename = "win %")]
    win_percentage: String,
    games: String,
}

#[derive(Tabled)]
struct MatchRow {
    id: String,
    winner: String,
    #[tabled(rename = "team 1")]
    team1: String,
    #[tabled(rename = "spr 1")]
    team1_spr: String,
    #[tabled(rename = "team 2")]
    team2: String,
    #[tabled(rename = "spr 2")]
    team2_spr: String,
    bans: String,
}

#[derive(Tabled)]
struct PlayerMatchRow {
    id: String,
    side: String,
    champion: String,
    result: String,
}

#[derive(Tabled)]
struct ClassRow {
    class: String,
    wins: String,
    losses: String,
    #[tabled(rename = "win %")]
    win_rate: String,
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let s = saturation / 100.0;
    let l = lightness / 100.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

fn colored_spr(spr: i64, ranked: bool) -> String {
    let label = if ranked {
        spr.to_string()
    } else {
        format!("{}*", spr)
    };

    match spr_color(spr as f64) {
        SprColor::Transparent => label.dimmed().to_string(),
        color @ SprColor::Hsl {
            saturation,
            lightness,
            ..
        } => {
            let hue = color.normalized_hue().unwrap_or(0.0);
            let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
            label.truecolor(r, g, b).bold().to_string()
        }
    }
}

fn format_trend(trend: Trend) -> String {
    match trend {
        Trend::Ineligible => "-".dimmed().to_string(),
        Trend::Change(0) => "0 ─".yellow().to_string(),
        Trend::Change(change) if change > 0 => format!("▲ {}", change).green().to_string(),
        Trend::Change(change) => format!("▼ {}", change.abs()).red().to_string(),
    }
}

fn format_percentage(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v))
        .unwrap_or_else(|| "-".to_string())
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn heading(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
}

pub fn display_leaderboard(rows: &[LeaderboardRow], season: Option<u32>) {
    match season {
        Some(season) => heading(&format!("🏆 LEADERBOARD (Season {})", season)),
        None => heading("🏆 LEADERBOARD (All Time)"),
    }

    if rows.is_empty() {
        println!("{}", "No players found".yellow());
        return;
    }

    let table_rows: Vec<LeaderboardTableRow> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| LeaderboardTableRow {
            number: format!("{}", idx + 1),
            name: row.name.clone(),
            wins: row.wins.to_string(),
            win_percentage: format!("{}%", row.win_percentage),
            games: row.total_games.to_string(),
            spr: colored_spr(row.spr, row.ranked),
            trend: format_trend(row.trend),
        })
        .collect();

    print_table(table_rows);
    println!("{}", "* unqualified SPR".dimmed());

    if let Some(averages) = overview_averages(rows) {
        println!(
            "{} {:.1} games, SPR {}",
            "📐 Average:".bold(),
            averages.games,
            averages.spr
        );
    }
}

fn record_rows<'a>(records: impl Iterator<Item = &'a PlayerRecord>) -> Vec<RecordRow> {
    records
        .map(|record| RecordRow {
            name: record.name.clone(),
            wins: record.wins.to_string(),
            losses: record.losses.to_string(),
            win_percentage: format!("{:.1}%", record.win_percentage),
            games: record.total_games.to_string(),
        })
        .collect()
}

fn champion_rows<'a>(champions: impl Iterator<Item = &'a Champion>) -> Vec<ChampionRow> {
    champions
        .map(|champion| ChampionRow {
            champion: champion.name.clone(),
            wins: champion.wins.to_string(),
            losses: champion.losses.to_string(),
            win_percentage: format!("{:.1}%", champion.win_percentage),
            games: champion.total_games.to_string(),
            pick: format_percentage(champion.pick_percentage),
            ban: format_percentage(champion.ban_percentage),
        })
        .collect()
}

pub fn display_player(player: &Player, top_champions: &[&Champion], accolades: &[Accolade]) {
    heading(&format!("👤 {}", player.name.to_uppercase()));

    println!(
        "{} {} W / {} L   {} {}   {} {:.1}",
        "📈 Record:".bold(),
        player.wins.to_string().green(),
        player.losses.to_string().red(),
        "SPR:".bold(),
        colored_spr(spr_value(player), is_player_ranked(player)),
        "TrueSkill:".bold(),
        player.secondary_rating
    );

    if !accolades.is_empty() {
        let names: Vec<String> = accolades.iter().map(|a| a.to_string()).collect();
        println!("{} {}", "🎖  Accolades:".bold(), names.join(", ").yellow());
    }
    println!();

    if !top_champions.is_empty() {
        println!("{}", "Champions".bold().yellow());
        print_table(champion_rows(top_champions.iter().copied()));
    }

    if !player.teammates.is_empty() {
        println!("{}", "Teammates".bold().yellow());
        print_table(record_rows(player.teammates.values()));
    }

    if !player.opponents.is_empty() {
        println!("{}", "Opponents".bold().yellow());
        print_table(record_rows(player.opponents.values()));
    }
}

/// Most recent first.
fn player_match_rows(matches: &[PlayerMatch<'_>]) -> Vec<PlayerMatchRow> {
    matches
        .iter()
        .rev()
        .map(|m| PlayerMatchRow {
            id: m.game.id.clone(),
            side: match m.side {
                Side::Team1 => "Team 1".to_string(),
                Side::Team2 => "Team 2".to_string(),
            },
            champion: m
                .game
                .team(m.side)
                .players
                .iter()
                .find(|p| p.name.to_lowercase() == m.player.to_lowercase())
                .map(|p| p.champion.clone())
                .unwrap_or_default(),
            result: match m.outcome {
                Outcome::Win => m.outcome.to_string().green().to_string(),
                Outcome::Loss => m.outcome.to_string().red().to_string(),
            },
        })
        .collect()
}

pub fn display_player_matches(matches: &[PlayerMatch<'_>]) {
    if matches.is_empty() {
        return;
    }

    let wins = matches
        .iter()
        .filter(|m| m.outcome == Outcome::Win)
        .count();
    println!(
        "{} {} W / {} L over {} games\n",
        "🕹  Match history:".bold(),
        wins.to_string().green(),
        (matches.len() - wins).to_string().red(),
        matches.len()
    );

    print_table(player_match_rows(matches));
}

pub fn display_champions(champions: &BTreeMap<String, Champion>, season: Option<u32>) {
    match season {
        Some(season) => heading(&format!("🛡  CHAMPIONS (Season {})", season)),
        None => heading("🛡  CHAMPIONS (All Time)"),
    }

    if champions.is_empty() {
        println!("{}", "No champion data available".yellow());
        return;
    }

    print_table(champion_rows(champions.values()));
}

pub fn display_champion(champion: &Champion, players: &[PlayerRecord]) {
    heading(&format!("🛡  {}", champion.name));
    print_table(champion_rows(std::iter::once(champion)));

    if let Some(last) = champion.pick_ban_history.last() {
        println!(
            "{} pick {:.1}% / ban {:.1}% over {} matches\n",
            "📊 Pick/Ban:".bold(),
            last.pick,
            last.ban,
            champion.pick_ban_history.len()
        );
    }

    if !players.is_empty() {
        println!("{}", "Players".bold().yellow());
        print_table(record_rows(players.iter()));
    }
}

fn roster(m: &Match, side: Side, players: &HashMap<String, &Player>) -> String {
    m.team(side)
        .players
        .iter()
        .map(|p| {
            let spr = players
                .get(&p.name.to_lowercase())
                .map(|player| player_spr_text(player))
                .unwrap_or_else(|| "(unrated)".to_string());
            format!("{} ({}) {}", p.name, p.champion, spr)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn roster_spr(m: &Match, side: Side, players: &HashMap<String, &Player>) -> String {
    let ratings = m
        .team(side)
        .players
        .iter()
        .map(|p| players.get(&p.name.to_lowercase()).and_then(|player| player.rating));
    team_spr(ratings).to_string()
}

pub fn display_matches(matches: &[Match], players: &[Player]) {
    heading(&format!("📊 MATCH HISTORY ({} games)", matches.len()));

    if matches.is_empty() {
        println!("{}", "No matches found".yellow());
        return;
    }

    let by_name: HashMap<String, &Player> = players
        .iter()
        .map(|player| (player.name.to_lowercase(), player))
        .collect();

    let rows: Vec<MatchRow> = matches
        .iter()
        .map(|m| MatchRow {
            id: m.id.clone(),
            winner: match m.winner {
                Side::Team1 => "Team 1".green().to_string(),
                Side::Team2 => "Team 2".blue().to_string(),
            },
            team1: roster(m, Side::Team1, &by_name),
            team1_spr: roster_spr(m, Side::Team1, &by_name),
            team2: roster(m, Side::Team2, &by_name),
            team2_spr: roster_spr(m, Side::Team2, &by_name),
            bans: format!("{}\n{}", m.team1.bans.join(", "), m.team2.bans.join(", ")),
        })
        .collect();

    print_table(rows);
}

pub fn display_class_win_rates(player: &str, rates: &IndexMap<ChampionClass, WinLossRecord>) {
    heading(&format!("🧭 CLASS WIN RATES: {}", player));

    let rows: Vec<ClassRow> = rates
        .iter()
        .map(|(class, record)| ClassRow {
            class: class.to_string(),
            wins: record.wins.to_string(),
            losses: record.losses.to_string(),
            win_rate: if record.total_games() == 0 {
                "-".to_string()
            } else {
                format!("{:.1}%", record.win_rate() * 100.0)
            },
        })
        .collect();

    print_table(rows);
}

pub fn display_audit(champions: &[String], codes: &[AuditCode]) {
    heading(&format!("🧪 TEAM AUDIT: {}", champions.join(", ")));

    if codes.is_empty() {
        println!("{}", "✓ Balanced damage profile".green());
        return;
    }

    for code in codes {
        let label = code.to_string();
        let painted = match code.color() {
            "orange" => label.truecolor(255, 165, 0),
            "violet" => label.magenta(),
            _ => label.bright_black(),
        };
        println!("  ⚠️  {}", painted.bold());
    }
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
