mod display;

use anyhow::Context;
use clap::{Parser, Subcommand};
use display::output::{
    display_audit, display_champion, display_champions, display_class_win_rates, display_error,
    display_info, display_leaderboard, display_matches, display_player, display_player_matches,
    display_success,
};
use indicatif::ProgressBar;
use std::time::Duration;
use toxic_stats::analysis::audit::audit_team;
use toxic_stats::analysis::player::{
    accolades, champion_players, player_match_history, player_top_champions,
};
use toxic_stats::{AppError, Config, ToxicDataService};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Toxic Stats")]
#[command(about = "Leaderboards, profiles and match history for the custom games league", long_about = None)]
struct Args {
    /// Limit every query to one season (default: all time)
    #[arg(short, long, global = true)]
    season: Option<u32>,

    /// Stats API base URL (overrides TOXIC_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        global = true,
        env = "RUST_LOG",
        default_value = "warn",
        help = "Sets the logging verbosity"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Players sorted by name with SPR and trend
    Leaderboard,
    /// Profile of one player
    Player { name: String },
    /// Every champion with pick and ban rates
    Champions,
    /// One champion and the players who play it
    Champion { name: String },
    /// Recent matches
    Matches {
        /// Number of matches to show, most recent first
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Win rates per champion class for one player
    Classes { name: String },
    /// Damage audit of a five champion team
    Audit {
        #[arg(num_args = 5, required = true)]
        champions: Vec<String>,
    },
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(api_url) = args.api_url {
        config = config.with_api_url(api_url)?;
    }

    let season = args.season;
    display_info(&format!("Using stats API at {}", config.api_url));
    let service = ToxicDataService::from_config(config);

    match args.command {
        Command::Leaderboard => {
            let pb = spinner("Fetching players and rating history");
            let rows = service.leaderboard(season);
            pb.finish_and_clear();

            display_leaderboard(&rows.context("could not load the leaderboard")?, season);
        }
        Command::Player { name } => {
            let pb = spinner("Fetching player");
            let player = service.player(&name, season);
            let matches = service.match_history(season);
            pb.finish_and_clear();

            let player = player
                .context("could not load player stats")?
                .ok_or_else(|| AppError::PlayerNotFound(name.clone()))?;
            let matches = matches.context("could not load match history")?;

            display_player(&player, &player_top_champions(&player), &accolades(&player));
            display_player_matches(&player_match_history(&player.name, &matches));
        }
        Command::Champions => {
            let pb = spinner("Fetching champions");
            let champions = service.champions(season);
            pb.finish_and_clear();

            display_champions(&champions.context("could not load champions")?, season);
        }
        Command::Champion { name } => {
            let pb = spinner("Fetching champion");
            let champion = service.champion(&name, season);
            let players = service.players(season);
            pb.finish_and_clear();

            let champion = champion
                .context("could not load champion stats")?
                .ok_or_else(|| AppError::ChampionNotFound(name.clone()))?;
            let players = players.context("could not load players")?;

            display_champion(&champion, &champion_players(&champion.name, &players));
        }
        Command::Matches { limit } => {
            let pb = spinner("Fetching match history");
            let matches = service.match_history(season);
            let players = service.players(season);
            pb.finish_and_clear();

            let matches = matches.context("could not load match history")?;
            let players = players.context("could not load players")?;
            let recent: Vec<_> = matches.into_iter().rev().take(limit).collect();
            display_matches(&recent, &players);
        }
        Command::Classes { name } => {
            let pb = spinner("Fetching player");
            let rates = service.player_class_win_rates(&name, season);
            pb.finish_and_clear();

            let rates = rates
                .context("could not load player stats")?
                .ok_or_else(|| AppError::PlayerNotFound(name.clone()))?;

            display_class_win_rates(&name, &rates);
        }
        Command::Audit { champions } => {
            let codes = audit_team(&champions);
            display_audit(&champions, &codes);
        }
    }

    display_success("Done");
    Ok(())
}
