use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oth_engine::calculate::{aggregate_player_stats, parse_placement};
use oth_engine::compare::{augment_with_metadata, compare_sessions, CompareMode, CompareRequest};
use oth_engine::config::EngineConfig;
use oth_engine::cover::{extract_cover_url, topic_id_from_link};
use oth_engine::models::{
    qualifying_records, sort_recent_first, BeatmapMeta, GameRecord, TournamentRecord, TrimSpec,
};
use oth_engine::storage::{read_records, JsonlWriter, StorageConfig};

#[derive(Parser)]
#[command(name = "oth-engine")]
#[command(about = "Compare osu! match sessions and summarize tournament history")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two match sessions map by map
    Compare {
        /// First match id
        #[arg(long, required_unless_present = "request")]
        match_a: Option<u64>,

        /// Second match id
        #[arg(long, required_unless_present = "request")]
        match_b: Option<u64>,

        /// Games to ignore at the start of the first match
        #[arg(long, default_value = "0")]
        skip_start_a: usize,

        /// Games to ignore at the end of the first match
        #[arg(long, default_value = "0")]
        skip_end_a: usize,

        /// Games to ignore at the start of the second match
        #[arg(long, default_value = "0")]
        skip_start_b: usize,

        /// Games to ignore at the end of the second match
        #[arg(long, default_value = "0")]
        skip_end_b: usize,

        /// Use the legacy pipeline (collapse replays, look up metadata)
        #[arg(long)]
        legacy: bool,

        /// Read the whole request from a JSON file instead
        #[arg(long, conflicts_with_all = ["match_a", "match_b"])]
        request: Option<PathBuf>,

        /// Also write the comparison as JSONL to this path
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Summarize a player's tournament history
    Stats {
        /// Player (osu! user) id
        #[arg(long)]
        player: u64,

        /// Skip unparseable placements instead of failing
        #[arg(long)]
        tolerant: bool,

        /// Tournament file (defaults to <data-dir>/tournaments.jsonl)
        #[arg(long)]
        tournaments: Option<PathBuf>,
    },

    /// List a player's tournaments, newest first
    History {
        /// Player (osu! user) id
        #[arg(long)]
        player: u64,

        /// Tournament file (defaults to <data-dir>/tournaments.jsonl)
        #[arg(long)]
        tournaments: Option<PathBuf>,
    },

    /// Parse a placement string
    Placement {
        /// Placement text, e.g. "Top 8"
        text: String,
    },

    /// Find a tournament cover in a forum post
    Cover {
        /// File holding the post's raw BBCode
        #[arg(long, required_unless_present = "link")]
        body: Option<PathBuf>,

        /// Forum topic link to extract the topic id from
        #[arg(long)]
        link: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = EngineConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.validate()?;

    // Logs go to stderr; stdout carries the JSON results.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting oth-engine v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Compare {
            match_a,
            match_b,
            skip_start_a,
            skip_end_a,
            skip_start_b,
            skip_end_b,
            legacy,
            request,
            out,
        } => {
            let request = match request {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read request {:?}", path))?;
                    serde_json::from_str::<CompareRequest>(&text)
                        .with_context(|| format!("Invalid request in {:?}", path))?
                }
                None => CompareRequest {
                    match_id_a: match_a.context("--match-a is required")?,
                    match_id_b: match_b.context("--match-b is required")?,
                    trim_a: TrimSpec::new(skip_start_a, skip_end_a),
                    trim_b: TrimSpec::new(skip_start_b, skip_end_b),
                    mode: if legacy {
                        CompareMode::Legacy
                    } else {
                        config.compare.mode
                    },
                },
            };

            tracing::info!(
                "Comparing match {} with match {} (key {})",
                request.match_id_a,
                request.match_id_b,
                request.cache_key()
            );

            let session_a: Vec<GameRecord> =
                read_records(&storage.match_path(request.match_id_a))?;
            let session_b: Vec<GameRecord> =
                read_records(&storage.match_path(request.match_id_b))?;

            let mut entries = compare_sessions(&session_a, &session_b, &request)
                .map_err(|e| anyhow::anyhow!("{}: {}", e.kind(), e))?;

            if request.mode == CompareMode::Legacy {
                let beatmaps: HashMap<_, _> =
                    read_records::<BeatmapMeta>(&storage.beatmaps_path())?
                        .into_iter()
                        .map(|m| (m.id, m))
                        .collect();
                entries = augment_with_metadata(&entries, &beatmaps);
            }

            if let Some(path) = out {
                JsonlWriter::new(path).write_all(&entries)?;
            }

            println!("{}", serde_json::to_string_pretty(&entries)?);
        }

        Commands::Stats {
            player,
            tolerant,
            tournaments,
        } => {
            let path = tournaments.unwrap_or_else(|| storage.tournaments_path());
            let records: Vec<TournamentRecord> = read_records(&path)?;

            let mut options = config.stats;
            options.tolerate_parse_failures |= tolerant;

            let stats = aggregate_player_stats(player, &records, options)
                .map_err(|e| anyhow::anyhow!("{}: {}", e.kind(), e))?;

            println!("{}", serde_json::to_string_pretty(&stats)?);
        }

        Commands::History {
            player,
            tournaments,
        } => {
            let path = tournaments.unwrap_or_else(|| storage.tournaments_path());
            let all: Vec<TournamentRecord> = read_records(&path)?;
            let mut records: Vec<TournamentRecord> =
                qualifying_records(player, &all).into_iter().cloned().collect();
            sort_recent_first(&mut records);

            tracing::info!("Player {} has {} tournaments", player, records.len());
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Commands::Placement { text } => {
            let placement =
                parse_placement(&text).map_err(|e| anyhow::anyhow!("{}: {}", e.kind(), e))?;
            println!("{}", serde_json::to_string_pretty(&placement)?);
        }

        Commands::Cover { body, link } => {
            if let Some(link) = link {
                println!("{}", topic_id_from_link(&link)?);
            }
            if let Some(path) = body {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read post body {:?}", path))?;
                match extract_cover_url(&raw) {
                    Some(url) => println!("{}", url),
                    None => tracing::warn!("No usable image in {:?}", path),
                }
            }
        }
    }

    Ok(())
}
