//! RELEGATION-SIM — league standings and relegation zone simulator.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! reads the points table, fixtures and predictions, runs one simulation
//! and prints the resulting table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use relegation_sim::config::AppConfig;
use relegation_sim::engine::simulation::Simulation;
use relegation_sim::ingest::{self, dates};
use relegation_sim::predictions::{self, Prediction};
use relegation_sim::types::Outcome;
use relegation_sim::{defaults, report};

#[derive(Debug, Parser)]
#[command(name = "relegation-sim", version, about = "League standings and relegation zone simulator")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Points table CSV (Team, Points, Played).
    #[arg(long)]
    points: Option<PathBuf>,

    /// Fixtures CSV (Team1, Team2[, Date]).
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Predictions CSV (Match or Team1/Team2, Result).
    #[arg(long)]
    predictions: Option<PathBuf>,

    /// Single prediction as `MATCH=LABEL`, e.g. `3=Lions wins`. Repeatable.
    #[arg(long = "result", value_name = "MATCH=LABEL")]
    results: Vec<String>,

    /// Only keep fixtures dated today or later.
    #[arg(long)]
    upcoming_only: bool,

    /// Reference date for --upcoming-only (defaults to the local date).
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Size of the relegation zone.
    #[arg(long)]
    relegation: Option<usize>,

    /// Write the full report as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print the numbered fixtures with their outcome labels and exit.
    #[arg(long)]
    list_fixtures: bool,
}

fn parse_today(s: &str) -> Result<NaiveDate, String> {
    dates::parse_date(s).ok_or_else(|| format!("unrecognised date: {s}"))
}

fn parse_result_flag(s: &str) -> Result<Prediction> {
    let (number, label) = s
        .split_once('=')
        .with_context(|| format!("Expected MATCH=LABEL, got {s:?}"))?;
    let number: usize = number
        .trim()
        .parse()
        .with_context(|| format!("Invalid match number in {s:?}"))?;
    Ok(Prediction::by_number(number, label.trim()))
}

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    init_logging();

    let mut cfg = AppConfig::load_or_default(&cli.config)?;
    apply_overrides(&mut cfg, &cli);
    cfg.validate()?;

    info!(
        league = %cfg.league.name,
        relegation_zone = cfg.league.relegation_zone,
        duplicate_policy = ?cfg.league.duplicate_policy,
        "RELEGATION-SIM starting up"
    );

    // -- Load table and fixtures -----------------------------------------

    let (table, mut fixtures) = match (&cfg.input.points_csv, &cfg.input.fixtures_csv) {
        (Some(points), Some(fixtures)) => (
            ingest::load_points_table(points, cfg.league.duplicate_policy)?,
            ingest::load_fixtures(fixtures)?,
        ),
        _ => {
            info!("No CSV input configured, using built-in league");
            (defaults::standings()?, defaults::fixtures())
        }
    };

    if cfg.input.upcoming_only {
        let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());
        fixtures = ingest::filter_upcoming(fixtures, today);
    }

    if cli.list_fixtures {
        print!("{}", report::render_fixtures(&fixtures));
        return Ok(());
    }

    // -- Resolve outcomes ------------------------------------------------

    let mut preds = match &cfg.input.predictions {
        Some(path) => predictions::load_predictions(path)?,
        None => Vec::new(),
    };
    for flag in &cli.results {
        preds.push(parse_result_flag(flag)?);
    }
    let results = predictions::resolve_outcomes(&fixtures, &preds, Outcome::NotPlayed)?;

    // -- Simulate and report ---------------------------------------------

    let sim = Simulation::run(table, &results, cfg.league.relegation_zone);
    print!("{}", report::render_table(&cfg.league.name, &sim));

    if let Some(path) = &cfg.output.json_report {
        report::save_json(&sim, path)?;
        info!(path = %path.display(), "JSON report written");
    }

    Ok(())
}

/// Layer command-line flags over the file configuration.
fn apply_overrides(cfg: &mut AppConfig, cli: &Cli) {
    if cli.points.is_some() {
        cfg.input.points_csv = cli.points.clone();
    }
    if cli.fixtures.is_some() {
        cfg.input.fixtures_csv = cli.fixtures.clone();
    }
    if cli.predictions.is_some() {
        cfg.input.predictions = cli.predictions.clone();
    }
    if cli.upcoming_only {
        cfg.input.upcoming_only = true;
    }
    if let Some(n) = cli.relegation {
        cfg.league.relegation_zone = n;
    }
    if cli.json.is_some() {
        cfg.output.json_report = cli.json.clone();
    }
}

/// Initialise the `tracing` subscriber. Logs go to stderr so the table
/// on stdout stays clean.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("relegation_sim=info"));

    let json_logging = std::env::var("RELEGATION_SIM_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result_flag() {
        let p = parse_result_flag("3 = Lions wins").unwrap();
        assert_eq!(p, Prediction::by_number(3, "Lions wins"));
        assert!(parse_result_flag("Lions wins").is_err());
        assert!(parse_result_flag("x=nr").is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "relegation-sim",
            "--points",
            "p.csv",
            "--fixtures",
            "f.csv",
            "--relegation",
            "3",
            "--upcoming-only",
            "--today",
            "2025-07-01",
        ]);
        let mut cfg = AppConfig::default();
        apply_overrides(&mut cfg, &cli);
        assert_eq!(cfg.input.points_csv, Some(PathBuf::from("p.csv")));
        assert_eq!(cfg.league.relegation_zone, 3);
        assert!(cfg.input.upcoming_only);
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2025, 7, 1));
    }
}
