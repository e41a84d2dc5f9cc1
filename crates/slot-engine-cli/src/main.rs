//! `slots` CLI — compute bookable appointment slots from a JSON store snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for one professional (store snapshot from a file)
//! slots available -s shop.json -d 2026-03-16 --service svc-cut --professional pro-a
//!
//! # Slots across every professional offering the service, as JSON
//! cat shop.json | slots available -d 2026-03-16 --service svc-cut --json
//!
//! # Morning/afternoon split
//! slots available -s shop.json -d 2026-03-16 --service svc-cut --by-period
//!
//! # Per-professional breakdown
//! slots by-professional -s shop.json -d 2026-03-16 --service svc-cut
//!
//! # Assign a professional to an "any professional" booking
//! slots resolve -s shop.json -d 2026-03-16 --service svc-cut --slot 09:30
//!
//! # Open dates over a range
//! slots days -s shop.json --from 2026-03-16 --to 2026-03-22 --service svc-cut
//!
//! # Engine tuning
//! slots --step 15 --exclude-cancelled available -s shop.json -d 2026-03-16 --service svc-cut
//! ```
//!
//! Logs go to stderr and honour `RUST_LOG`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use slot_engine::{split_by_period, AvailabilityEngine, EngineConfig, InMemoryStore};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Appointment slot availability CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with engine settings (`step_minutes`, `include_cancelled`)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Minutes between candidate start times (overrides --config)
    #[arg(long, global = true)]
    step: Option<u32>,

    /// Let cancelled and no-show appointments free their slot
    #[arg(long, global = true)]
    exclude_cancelled: bool,

    /// Log engine decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable start times on a date
    Available {
        /// Store snapshot (reads from stdin if omitted)
        #[arg(short, long)]
        store: Option<String>,
        /// Date to check (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
        /// Service to book
        #[arg(long)]
        service: String,
        /// Pin a professional (any eligible professional if omitted)
        #[arg(long)]
        professional: Option<String>,
        /// Split output into morning and afternoon
        #[arg(long)]
        by_period: bool,
        /// Print JSON instead of one slot per line
        #[arg(long)]
        json: bool,
    },
    /// List bookable start times per professional
    ByProfessional {
        /// Store snapshot (reads from stdin if omitted)
        #[arg(short, long)]
        store: Option<String>,
        /// Date to check (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
        /// Service to book
        #[arg(long)]
        service: String,
    },
    /// Pick a professional for an "any professional" booking
    Resolve {
        /// Store snapshot (reads from stdin if omitted)
        #[arg(short, long)]
        store: Option<String>,
        /// Date of the booking (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
        /// Service to book
        #[arg(long)]
        service: String,
        /// Start time (HH:MM)
        #[arg(long)]
        slot: String,
    },
    /// List dates in a range that have at least one slot
    Days {
        /// Store snapshot (reads from stdin if omitted)
        #[arg(short, long)]
        store: Option<String>,
        /// First date (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// Service to book
        #[arg(long)]
        service: String,
        /// Pin a professional (any eligible professional if omitted)
        #[arg(long)]
        professional: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(cli.config.as_deref(), cli.step, cli.exclude_cancelled)?;
    tracing::debug!(?config, "engine configuration");

    match cli.command {
        Commands::Available {
            store,
            date,
            service,
            professional,
            by_period,
            json,
        } => {
            let engine = load_engine(store.as_deref(), config)?;
            let slots = engine
                .available_slot_values(date, &service, professional.as_deref())
                .context("Failed to compute available slots")?;

            if by_period {
                let periods = split_by_period(&slots);
                if json {
                    println!("{}", serde_json::to_string_pretty(&periods)?);
                } else {
                    println!("Morning:   {}", join(&periods.morning));
                    println!("Afternoon: {}", join(&periods.afternoon));
                }
            } else if json {
                println!("{}", serde_json::to_string(&slots)?);
            } else {
                for slot in &slots {
                    println!("{}", slot);
                }
            }
        }
        Commands::ByProfessional {
            store,
            date,
            service,
        } => {
            let engine = load_engine(store.as_deref(), config)?;
            let by_professional = engine
                .slots_by_professional(date, &service)
                .context("Failed to compute per-professional slots")?;
            println!("{}", serde_json::to_string_pretty(&by_professional)?);
        }
        Commands::Resolve {
            store,
            date,
            service,
            slot,
        } => {
            let engine = load_engine(store.as_deref(), config)?;
            match engine
                .resolve_professional(date, &service, &slot)
                .context("Failed to resolve a professional")?
            {
                Some(assignment) => println!("{}", serde_json::to_string_pretty(&assignment)?),
                None => anyhow::bail!("No professional is free at {} on {}", slot, date),
            }
        }
        Commands::Days {
            store,
            from,
            to,
            service,
            professional,
        } => {
            let engine = load_engine(store.as_deref(), config)?;
            let days = engine
                .available_days(from, to, &service, professional.as_deref())
                .context("Failed to compute available days")?;
            for (date, slots) in &days {
                println!("{}  {}", date, join(slots));
            }
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Build the engine configuration from --config, then apply flag overrides.
///
/// - No flags: engine defaults (30-minute step, every appointment blocks)
/// - `--config` file fields override defaults
/// - `--step` and `--exclude-cancelled` override the file
fn build_config(
    path: Option<&str>,
    step: Option<u32>,
    exclude_cancelled: bool,
) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("Invalid config: {}", path))?
        }
        None => EngineConfig::default(),
    };

    if let Some(step) = step {
        config = config.with_step_minutes(step);
    }
    if exclude_cancelled {
        config = config.with_include_cancelled(false);
    }

    config.validate()?;
    Ok(config)
}

fn load_engine(
    path: Option<&str>,
    config: EngineConfig,
) -> Result<AvailabilityEngine<InMemoryStore>> {
    let json = read_input(path)?;
    let store = InMemoryStore::from_json(&json).context("Failed to load store snapshot")?;
    Ok(AvailabilityEngine::with_config(store, config)?)
}

fn join<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
