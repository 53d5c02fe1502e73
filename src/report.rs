//! Rendering and persistence of simulation reports.
//!
//! Produces a plain-text standings table for the terminal and writes the
//! full report to a JSON file.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

use crate::engine::simulation::SimulationReport;
use crate::types::{Fixture, Outcome};

/// Render the ranked table, marking relegation rows, followed by the
/// relegation warning line.
pub fn render_table(title: &str, report: &SimulationReport) -> String {
    let width = report
        .ranked
        .iter()
        .map(|r| r.team.chars().count())
        .max()
        .unwrap_or(0)
        .max("Team".len());

    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{:>3}  {:<width$}  {:>6}  {:>6}", "Pos", "Team", "Points", "Played");
    for row in &report.ranked {
        let marker = if report.is_relegated(&row.team) { "  R" } else { "" };
        let _ = writeln!(
            out,
            "{:>3}  {:<width$}  {:>6}  {:>6}{marker}",
            row.position, row.team, row.points, row.played
        );
    }

    if !report.relegation.is_empty() {
        let _ = writeln!(out, "\nCurrent Relegation Zone: {}", report.relegation.join(", "));
    }
    if report.apply.skipped_count() > 0 {
        let _ = writeln!(
            out,
            "Warning: {} fixture(s) skipped (team not in points table)",
            report.apply.skipped_count()
        );
        for s in &report.apply.skipped {
            let _ = writeln!(out, "  Match {}: {} (missing: {})", s.match_number, s.fixture, s.missing.join(", "));
        }
    }
    out
}

/// Numbered fixture list with the outcome labels each one accepts.
pub fn render_fixtures(fixtures: &[Fixture]) -> String {
    let mut out = String::new();
    for (i, f) in fixtures.iter().enumerate() {
        let labels = Outcome::labels(f).join(" | ");
        let _ = writeln!(out, "Match {}: {f}\n    {labels}", i + 1);
    }
    out
}

/// Write the report as pretty-printed JSON.
pub fn save_json(report: &SimulationReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialise simulation report")?;
    std::fs::write(path, &json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    debug!(path = %path.display(), run_id = %report.run_id, "Report saved");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
