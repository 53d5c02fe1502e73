//! Shared types for the relegation simulator.
//!
//! These types form the data model used across all modules: the
//! standings rows, fixtures, outcomes and the domain error enum.
//! Ingestion, the engine and reporting all depend on them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Team identifier. Compared by exact string match, no normalisation.
pub type TeamId = String;

// ---------------------------------------------------------------------------
// Standings entry
// ---------------------------------------------------------------------------

/// Running tally for a single team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub team: TeamId,
    pub points: u32,
    pub played: u32,
}

impl StandingsEntry {
    pub fn new(team: impl Into<TeamId>, points: u32, played: u32) -> Self {
        Self {
            team: team.into(),
            points,
            played,
        }
    }
}

impl fmt::Display for StandingsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} pts, {} played)", self.team, self.points, self.played)
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// A scheduled (or hypothetical) match between two named teams.
///
/// The pair is ordered: `team_a` is the first-listed side and drives the
/// outcome labels, but scoring treats both sides the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub team_a: TeamId,
    pub team_b: TeamId,
    /// Optional match date. The engine ignores it; only ingestion filters on it.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Fixture {
    pub fn new(team_a: impl Into<TeamId>, team_b: impl Into<TeamId>) -> Self {
        Self {
            team_a: team_a.into(),
            team_b: team_b.into(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(d) => write!(f, "{} vs {} ({})", self.team_a, self.team_b, d),
            None => write!(f, "{} vs {}", self.team_a, self.team_b),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result classification for a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    TeamAWins,
    TeamBWins,
    NoResult,
    NotPlayed,
}

impl Outcome {
    /// All outcomes, in menu order.
    pub const ALL: &'static [Outcome] = &[
        Outcome::TeamAWins,
        Outcome::TeamBWins,
        Outcome::NoResult,
        Outcome::NotPlayed,
    ];

    /// Human-readable label for this outcome in the context of a fixture.
    pub fn label(&self, fixture: &Fixture) -> String {
        match self {
            Outcome::TeamAWins => format!("{} wins", fixture.team_a),
            Outcome::TeamBWins => format!("{} wins", fixture.team_b),
            Outcome::NoResult => "No result".to_string(),
            Outcome::NotPlayed => "Not played".to_string(),
        }
    }

    /// The four menu labels for a fixture, in order.
    pub fn labels(fixture: &Fixture) -> Vec<String> {
        Self::ALL.iter().map(|o| o.label(fixture)).collect()
    }

    /// Parse an outcome label relative to a fixture.
    ///
    /// Accepts the menu labels (`"<team> wins"`, `"No result"`,
    /// `"Not played"`) and a handful of short forms. Team names inside a
    /// `"<team> wins"` label must match exactly; only the keywords are
    /// case-insensitive.
    pub fn from_label(label: &str, fixture: &Fixture) -> Result<Self, LeagueError> {
        let label = label.trim();

        if let Some(team) = strip_wins_suffix(label) {
            if team == fixture.team_a {
                return Ok(Outcome::TeamAWins);
            }
            if team == fixture.team_b {
                return Ok(Outcome::TeamBWins);
            }
            return Err(LeagueError::MalformedOutcome(label.to_string()));
        }

        match label.to_ascii_lowercase().as_str() {
            "a" | "home" | "1" => Ok(Outcome::TeamAWins),
            "b" | "away" | "2" => Ok(Outcome::TeamBWins),
            "no result" | "no-result" | "no_result" | "nr" => Ok(Outcome::NoResult),
            "not played" | "not-played" | "not_played" | "np" | "-" => Ok(Outcome::NotPlayed),
            _ => Err(LeagueError::MalformedOutcome(label.to_string())),
        }
    }
}

/// Return the team part of a `"<team> wins"` label, if it has that shape.
fn strip_wins_suffix(label: &str) -> Option<&str> {
    const SUFFIX: &str = " wins";
    let split = label.len().checked_sub(SUFFIX.len())?;
    let tail = label.get(split..)?;
    if !tail.eq_ignore_ascii_case(SUFFIX) {
        return None;
    }
    let team = label[..split].trim_end();
    (!team.is_empty()).then_some(team)
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::TeamAWins => write!(f, "TeamAWins"),
            Outcome::TeamBWins => write!(f, "TeamBWins"),
            Outcome::NoResult => write!(f, "NoResult"),
            Outcome::NotPlayed => write!(f, "NotPlayed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the simulator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeagueError {
    #[error("Unknown team: {0}")]
    UnknownTeam(TeamId),

    #[error("Duplicate team in standings table: {0}")]
    DuplicateTeam(TeamId),

    #[error("Malformed outcome: {0:?}")]
    MalformedOutcome(String),

    #[error("Ingest error ({source_name}): {message}")]
    Ingest { source_name: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
