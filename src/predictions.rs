//! Outcome selection — pairing every fixture with a result.
//!
//! Predictions come from a CSV with either a `match` column (1-based
//! fixture number) or `team1`/`team2` columns, plus a `result` column
//! holding an outcome label such as `"Lions wins"` or `"No result"`.
//! Fixtures without a prediction fall back to a default outcome.

use anyhow::{bail, Context, Result};
use std::io;
use std::path::Path;
use tracing::{debug, info};

use crate::ingest::{find_column, reader_builder, require_column, TEAM_A_COLUMNS, TEAM_B_COLUMNS};
use crate::types::{Fixture, LeagueError, Outcome};

const MATCH_COLUMNS: &[&str] = &["match", "match #", "match_no", "no", "#"];
const RESULT_COLUMNS: &[&str] = &["result", "outcome", "prediction"];

/// How a prediction identifies its fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureRef {
    /// 1-based position in the fixture list.
    Number(usize),
    /// First fixture with exactly these two teams, in this order.
    Teams { team_a: String, team_b: String },
}

/// A single raw prediction row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub fixture: FixtureRef,
    pub label: String,
}

impl Prediction {
    pub fn by_number(number: usize, label: impl Into<String>) -> Self {
        Self {
            fixture: FixtureRef::Number(number),
            label: label.into(),
        }
    }

    pub fn by_teams(team_a: impl Into<String>, team_b: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            fixture: FixtureRef::Teams {
                team_a: team_a.into(),
                team_b: team_b.into(),
            },
            label: label.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Column(s) a predictions file uses to point at its fixture.
#[derive(Clone, Copy)]
enum Locator {
    Number(usize),
    Teams(usize, usize),
}

/// Read prediction rows from any CSV source.
pub fn read_predictions<R: io::Read>(reader: R, source_name: &str) -> Result<Vec<Prediction>> {
    let mut rdr = reader_builder().from_reader(reader);
    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read headers from {source_name}"))?
        .clone();

    let result_col = require_column(&headers, RESULT_COLUMNS, source_name)?;
    let locator = match find_column(&headers, MATCH_COLUMNS) {
        Some(c) => Locator::Number(c),
        None => match find_column(&headers, TEAM_A_COLUMNS).zip(find_column(&headers, TEAM_B_COLUMNS)) {
            Some((a, b)) => Locator::Teams(a, b),
            None => {
                return Err(LeagueError::Ingest {
                    source_name: source_name.to_string(),
                    message: "needs a match column or team1/team2 columns".to_string(),
                }
                .into())
            }
        },
    };

    let mut predictions = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row = i + 2;
        let record = record.with_context(|| format!("Failed to read row {row} of {source_name}"))?;
        let label = record.get(result_col).unwrap_or_default();
        if label.is_empty() {
            continue;
        }

        let fixture = match locator {
            Locator::Number(c) => {
                let cell = record.get(c).unwrap_or_default();
                let n: usize = cell
                    .parse()
                    .with_context(|| format!("{source_name} row {row}: invalid match number {cell:?}"))?;
                FixtureRef::Number(n)
            }
            Locator::Teams(a, b) => FixtureRef::Teams {
                team_a: record.get(a).unwrap_or_default().to_string(),
                team_b: record.get(b).unwrap_or_default().to_string(),
            },
        };
        predictions.push(Prediction {
            fixture,
            label: label.to_string(),
        });
    }

    info!(source = source_name, predictions = predictions.len(), "Predictions loaded");
    Ok(predictions)
}

/// Load a predictions CSV from disk.
pub fn load_predictions(path: &Path) -> Result<Vec<Prediction>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open predictions: {}", path.display()))?;
    read_predictions(file, &path.display().to_string())
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Pair every fixture with an outcome.
///
/// Each prediction must point at an existing fixture and carry a
/// recognised label; otherwise resolution fails. Later predictions for
/// the same fixture override earlier ones.
pub fn resolve_outcomes(
    fixtures: &[Fixture],
    predictions: &[Prediction],
    default: Outcome,
) -> Result<Vec<(Fixture, Outcome)>> {
    let mut outcomes = vec![default; fixtures.len()];

    for prediction in predictions {
        let idx = match &prediction.fixture {
            FixtureRef::Number(n) => {
                if *n == 0 || *n > fixtures.len() {
                    bail!("Prediction for match {n} but there are {} fixtures", fixtures.len());
                }
                n - 1
            }
            FixtureRef::Teams { team_a, team_b } => fixtures
                .iter()
                .position(|f| &f.team_a == team_a && &f.team_b == team_b)
                .with_context(|| format!("Prediction for unknown fixture {team_a} vs {team_b}"))?,
        };

        let outcome = Outcome::from_label(&prediction.label, &fixtures[idx])?;
        debug!(match_number = idx + 1, fixture = %fixtures[idx], %outcome, "Prediction resolved");
        outcomes[idx] = outcome;
    }

    Ok(fixtures.iter().cloned().zip(outcomes).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
