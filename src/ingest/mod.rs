//! CSV ingestion for the points table and fixture list.
//!
//! Column names are matched loosely (case-insensitive, trimmed, with a
//! small alias list) so that spreadsheets exported from different sources
//! load without editing. Everything past this module sees only the fixed
//! shapes: `(team, points, played)` and `(team_a, team_b, date?)`.

pub mod dates;

use anyhow::{Context, Result};
use std::io;
use std::path::Path;
use tracing::{debug, info};

use crate::table::{DuplicatePolicy, StandingsTable};
use crate::types::{Fixture, LeagueError, StandingsEntry};

const TEAM_COLUMNS: &[&str] = &["team", "club", "name"];
const POINTS_COLUMNS: &[&str] = &["points", "pts"];
const PLAYED_COLUMNS: &[&str] = &["played", "p", "matches", "mp", "m"];
pub(crate) const TEAM_A_COLUMNS: &[&str] = &["team1", "team 1", "team a", "team_a", "home"];
pub(crate) const TEAM_B_COLUMNS: &[&str] = &["team2", "team 2", "team b", "team_b", "away"];
const DATE_COLUMNS: &[&str] = &["date", "match date", "day"];

// ---------------------------------------------------------------------------
// Header matching
// ---------------------------------------------------------------------------

/// Index of the first header matching any alias.
pub(crate) fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().trim_start_matches('\u{feff}').to_lowercase();
        aliases.contains(&h.as_str())
    })
}

pub(crate) fn require_column(
    headers: &csv::StringRecord,
    aliases: &[&str],
    source_name: &str,
) -> Result<usize, LeagueError> {
    find_column(headers, aliases).ok_or_else(|| LeagueError::Ingest {
        source_name: source_name.to_string(),
        message: format!("missing column (expected one of: {})", aliases.join(", ")),
    })
}

pub(crate) fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All).flexible(true);
    builder
}

fn ingest_error(source_name: &str, row: usize, message: impl Into<String>) -> LeagueError {
    LeagueError::Ingest {
        source_name: source_name.to_string(),
        message: format!("row {row}: {}", message.into()),
    }
}

/// Parse a non-negative count. Spreadsheet exports often write `46.0`.
fn parse_count(cell: &str, column: &str, source_name: &str, row: usize) -> Result<u32, LeagueError> {
    if let Ok(n) = cell.parse::<u32>() {
        return Ok(n);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 => Ok(v.trunc() as u32),
        _ => Err(ingest_error(
            source_name,
            row,
            format!("invalid {column} value {cell:?}"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Points table
// ---------------------------------------------------------------------------

/// Read a points table from any CSV source.
pub fn read_points_table<R: io::Read>(
    reader: R,
    source_name: &str,
    policy: DuplicatePolicy,
) -> Result<StandingsTable> {
    let mut rdr = reader_builder().from_reader(reader);
    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read headers from {source_name}"))?
        .clone();

    let team_col = require_column(&headers, TEAM_COLUMNS, source_name)?;
    let points_col = require_column(&headers, POINTS_COLUMNS, source_name)?;
    let played_col = require_column(&headers, PLAYED_COLUMNS, source_name)?;

    let mut table = StandingsTable::new();
    for (i, record) in rdr.records().enumerate() {
        // Header is row 1.
        let row = i + 2;
        let record = record.with_context(|| format!("Failed to read row {row} of {source_name}"))?;

        let team = record.get(team_col).unwrap_or_default();
        if team.is_empty() {
            debug!(row, source = source_name, "Skipping row with empty team name");
            continue;
        }
        let points = parse_count(record.get(points_col).unwrap_or_default(), "points", source_name, row)?;
        let played = parse_count(record.get(played_col).unwrap_or_default(), "played", source_name, row)?;

        table.insert(StandingsEntry::new(team, points, played), policy)?;
    }

    info!(source = source_name, teams = table.len(), "Points table loaded");
    Ok(table)
}

/// Load a points table CSV from disk.
pub fn load_points_table(path: &Path, policy: DuplicatePolicy) -> Result<StandingsTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open points table: {}", path.display()))?;
    read_points_table(file, &path.display().to_string(), policy)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Read a fixture list from any CSV source, preserving row order.
pub fn read_fixtures<R: io::Read>(reader: R, source_name: &str) -> Result<Vec<Fixture>> {
    let mut rdr = reader_builder().from_reader(reader);
    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read headers from {source_name}"))?
        .clone();

    let a_col = require_column(&headers, TEAM_A_COLUMNS, source_name)?;
    let b_col = require_column(&headers, TEAM_B_COLUMNS, source_name)?;
    let date_col = find_column(&headers, DATE_COLUMNS);

    let mut fixtures = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row = i + 2;
        let record = record.with_context(|| format!("Failed to read row {row} of {source_name}"))?;

        let team_a = record.get(a_col).unwrap_or_default();
        let team_b = record.get(b_col).unwrap_or_default();
        if team_a.is_empty() && team_b.is_empty() {
            continue;
        }
        if team_a.is_empty() || team_b.is_empty() {
            return Err(ingest_error(source_name, row, "fixture is missing a team").into());
        }

        let mut fixture = Fixture::new(team_a, team_b);
        if let Some(cell) = date_col.and_then(|c| record.get(c)).filter(|c| !c.is_empty()) {
            let date = dates::parse_date(cell)
                .ok_or_else(|| ingest_error(source_name, row, format!("unrecognised date {cell:?}")))?;
            fixture = fixture.with_date(date);
        }
        fixtures.push(fixture);
    }

    info!(source = source_name, fixtures = fixtures.len(), "Fixtures loaded");
    Ok(fixtures)
}

/// Load a fixtures CSV from disk.
pub fn load_fixtures(path: &Path) -> Result<Vec<Fixture>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open fixtures: {}", path.display()))?;
    read_fixtures(file, &path.display().to_string())
}

pub use dates::filter_upcoming;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
