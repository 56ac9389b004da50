use std::io::{self, Write};

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use rand::rngs::StdRng;
use sl_common::config::SessionConfig;
use sl_common::criteria::{rebalance, CriteriaWeights};
use sl_common::logging::{init_tracing_subscriber, install_tracing_panic_hook};
use sl_common::render;
use sl_common::session::{Session, View};
use sl_common::shortlist::ReviewAction;
use tracing::info;

const APP_NAME: &str = "sl-console";
const MIN_SPEED: f64 = 0.001;

#[derive(Debug, Parser)]
#[command(name = "sl-console", about = "Drive the shortlist screening dashboard from a terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Change one criterion weight and print the rebalanced set
    Rebalance {
        /// Starting weights as name=value pairs
        #[arg(long, default_value = "technical=40,experience=25,growth=20,culture=15")]
        weights: CriteriaWeights,

        /// Criterion to change, as name=value
        #[arg(long = "set", value_parser = parse_assignment)]
        assignment: (String, i64),

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run a scripted recruiter session on virtual time
    Demo {
        /// RNG seed (falls back to SL_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let the session run on the wall clock and print progress
    Watch {
        /// Session seconds to run
        #[arg(long, default_value_t = 30)]
        seconds: u64,

        /// Session seconds per real second
        #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
        speed: f64,

        /// RNG seed (falls back to SL_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, i64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("invalid weight {value:?}: {err}"))?;
    Ok((name.trim().to_string(), value))
}

fn parse_speed(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(speed) if speed.is_finite() && speed >= MIN_SPEED => Ok(speed),
        _ => Err(format!("speed must be a number >= {MIN_SPEED}, got {raw:?}")),
    }
}

fn session_config(seed: Option<u64>) -> SessionConfig {
    let config = SessionConfig::from_env();
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

fn run_rebalance<W: Write>(
    out: &mut W,
    weights: &CriteriaWeights,
    name: &str,
    value: i64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let after = rebalance(weights, name, value)?;
    info!(criterion = name, weight = value, before = %weights, after = %after, "rebalanced");

    if json {
        serde_json::to_writer_pretty(&mut *out, &after)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", render::criteria(&after))?;
    }
    Ok(())
}

fn run_demo<W: Write>(out: &mut W, config: SessionConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::from_config(config, Utc::now());

    session.navigate(View::Analytics);
    session.navigate(View::Dashboard);
    writeln!(out, "{}", render::page(&session))?;

    session.open_criteria_setup();
    session.set_criterion_weight("technical", 70)?;
    writeln!(out, "{}", render::page(&session))?;
    session.save_criteria()?;
    session.advance(Duration::seconds(2));
    writeln!(out, "{}", render::page(&session))?;

    session.expand_review_zone();
    session.open_shortlist();
    session.review("lisa", ReviewAction::Approve)?;
    writeln!(out, "{}", render::page(&session))?;

    let mut confirm = |prompt: &str| {
        let _ = writeln!(out, "? {prompt} [yes]");
        true
    };
    session.finalize_shortlist(&mut confirm)?;
    session.advance(Duration::seconds(2));
    writeln!(out, "{}", render::page(&session))?;

    session.advance(Duration::seconds(40));
    writeln!(out, "{}", render::page(&session))?;
    Ok(())
}

/// Drive the session on tokio time, sleeping until each timer comes due.
async fn run_watch<W: Write>(
    out: &mut W,
    session: &mut Session<StdRng>,
    seconds: u64,
    speed: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let end = i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|span| session.now().checked_add_signed(span))
        .ok_or_else(|| format!("--seconds {seconds} is too far in the future"))?;
    let mut last_seen = 0;
    writeln!(out, "{}", render::progress_bar(&session.state().requisition))?;

    while session.now() < end {
        let next = session.next_due().map_or(end, |due| due.min(end));
        let wait = (next - session.now()).to_std().unwrap_or_default();
        let wait = std::time::Duration::try_from_secs_f64(wait.as_secs_f64() / speed)
            .map_err(|err| format!("cannot wait {wait:?} at speed {speed}: {err}"))?;
        tokio::time::sleep(wait).await;

        let screened = session.state().requisition.screened;
        session.advance_to(next);

        if session.state().requisition.screened != screened {
            writeln!(out, "{}", render::progress_bar(&session.state().requisition))?;
        }
        let fresh: Vec<_> = session
            .notifications()
            .all()
            .iter()
            .filter(|n| n.id > last_seen)
            .collect();
        if let Some(last) = fresh.last() {
            last_seen = last.id;
            writeln!(out, "{}", render::notifications(fresh.iter().copied()))?;
        }
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing_subscriber(APP_NAME);
    install_tracing_panic_hook(APP_NAME);

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Rebalance {
            weights,
            assignment: (name, value),
            json,
        } => run_rebalance(&mut out, &weights, &name, value, json)?,
        Command::Demo { seed } => run_demo(&mut out, session_config(seed))?,
        Command::Watch {
            seconds,
            speed,
            seed,
        } => {
            let mut session = Session::from_config(session_config(seed), Utc::now());
            run_watch(&mut out, &mut session, seconds, speed).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(error = %err, "sl-console failed");
        eprintln!("{APP_NAME}: {err}");
        std::process::exit(1);
    }
}
