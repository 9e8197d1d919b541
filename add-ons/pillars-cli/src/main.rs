//! Pillars CLI: onboarding assessment, daily tasks and progress for one local profile.
//!
//! Usage:
//!   cargo run -p pillars-cli -- assess answers.json
//!   cargo run -p pillars-cli -- tasks [--regenerate]
//!   cargo run -p pillars-cli -- complete <task_id>
//!   cargo run -p pillars-cli -- progress
//!   cargo run -p pillars-cli -- reset
//!
//! State lives in Sled under `storage_path` (see `EngineConfig`). Output is JSON on stdout.

use pillars_core::{
    EngineConfig, EngineToggles, ProgressEngine, RawAnswers, SledStore, SystemClock,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

enum Command {
    Assess(String),
    Tasks { regenerate: bool },
    Complete(String),
    Progress,
    Reset,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<Command> {
    match args.next()?.as_str() {
        "assess" => args.next().map(Command::Assess),
        "tasks" => Some(Command::Tasks {
            regenerate: args.any(|a| a == "--regenerate"),
        }),
        "complete" => args.next().map(Command::Complete),
        "progress" => Some(Command::Progress),
        "reset" => Some(Command::Reset),
        _ => None,
    }
}

fn print_usage() {
    eprintln!("Pillars: progress & assessment");
    eprintln!("  assess <answers.json>    Score onboarding answers and store the result");
    eprintln!("  tasks [--regenerate]     Show today's tasks (generated when the list is empty)");
    eprintln!("  complete <task_id>       Complete a task and show the updated progress");
    eprintln!("  progress                 Show level, XP, streaks and achievements");
    eprintln!("  reset                    Start progress over");
    eprintln!();
    eprintln!("Config: PILLARS_CONFIG (default config/pillars), PILLARS__STORAGE_PATH, PILLARS__USER_ID,");
    eprintln!("        PILLARS__UTC_OFFSET_MINUTES, PILLARS__RNG_SEED");
}

fn print_json(value: &serde_json::Value) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> CliResult<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[pillars-cli] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = parse_args(std::env::args().skip(1)) else {
        print_usage();
        return Ok(());
    };

    let config = EngineConfig::load()?;
    let toggles = EngineToggles::from_env();
    tracing::debug!(
        storage_path = %config.storage_path,
        user_id = %config.user_id,
        utc_offset_minutes = config.utc_offset_minutes,
        "pillars-cli starting"
    );

    let store = SledStore::open_path(&config.storage_path)?;
    let clock = SystemClock::with_offset_minutes(config.utc_offset_minutes);
    let mut engine = ProgressEngine::load(config.user_id.clone(), store, clock)
        .await?
        .with_toggles(toggles.clone());
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match command {
        Command::Assess(path) => {
            let raw: RawAnswers = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
            let answers = raw.validate()?;
            let result = engine.record_assessment(&answers).await?;
            print_json(&serde_json::to_value(&result)?)?;
        }
        Command::Tasks { regenerate } => {
            if regenerate {
                engine.regenerate_daily_tasks(&mut rng).await?;
            } else if toggles.auto_generate_tasks {
                engine.ensure_daily_tasks(&mut rng).await?;
            }
            print_json(&serde_json::to_value(engine.tasks())?)?;
        }
        Command::Complete(task_id) => {
            let report = engine.complete_task(&task_id).await?;
            print_json(&json!({
                "outcome": report.outcome,
                "changes": report.changes,
                "progress": engine.progress(),
            }))?;
        }
        Command::Progress => {
            let p = engine.progress();
            print_json(&json!({
                "progress": p,
                "xpIntoLevel": p.xp_into_level(),
                "xpToNextLevel": p.xp_to_next_level(),
            }))?;
        }
        Command::Reset => {
            engine.reset_progress().await?;
            print_json(&serde_json::to_value(engine.progress())?)?;
        }
    }
    Ok(())
}
