//! Outcome applier — turns fixture results into table deltas.
//!
//! The scoring rule is fixed: a win is worth 4 points, a no-result gives
//! 2 to the first-listed side and 1 to the second, and a fixture that was
//! not played changes nothing. Every played fixture counts as a match
//! played for both sides.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::table::StandingsTable;
use crate::types::{Fixture, Outcome, TeamId};

pub const WIN_POINTS: u32 = 4;
pub const NO_RESULT_TEAM_A_POINTS: u32 = 2;
pub const NO_RESULT_TEAM_B_POINTS: u32 = 1;

/// Per-side change to a standings entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delta {
    pub points: u32,
    pub played: u32,
}

impl Delta {
    const fn new(points: u32, played: u32) -> Self {
        Self { points, played }
    }
}

/// Deltas for `(team_a, team_b)` under the scoring rule.
pub fn deltas(outcome: Outcome) -> (Delta, Delta) {
    match outcome {
        Outcome::TeamAWins => (Delta::new(WIN_POINTS, 1), Delta::new(0, 1)),
        Outcome::TeamBWins => (Delta::new(0, 1), Delta::new(WIN_POINTS, 1)),
        Outcome::NoResult => (
            Delta::new(NO_RESULT_TEAM_A_POINTS, 1),
            Delta::new(NO_RESULT_TEAM_B_POINTS, 1),
        ),
        Outcome::NotPlayed => (Delta::default(), Delta::default()),
    }
}

// ---------------------------------------------------------------------------
// Apply status / report
// ---------------------------------------------------------------------------

/// What happened to a single fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApplyStatus {
    Applied,
    NotPlayed,
    /// At least one side is absent from the table; nothing was changed.
    Skipped { missing: Vec<TeamId> },
}

/// A fixture that was skipped because of unknown team names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFixture {
    /// 1-based position in the supplied fixture list.
    pub match_number: usize,
    pub fixture: Fixture,
    pub missing: Vec<TeamId>,
}

/// Summary of a full pass over the fixture list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub applied: usize,
    pub not_played: usize,
    pub skipped: Vec<SkippedFixture>,
}

impl ApplyReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Total fixtures considered.
    pub fn total(&self) -> usize {
        self.applied + self.not_played + self.skipped.len()
    }
}

// ---------------------------------------------------------------------------
// Applier
// ---------------------------------------------------------------------------

pub struct OutcomeApplier;

impl OutcomeApplier {
    /// Apply one fixture outcome to the table.
    ///
    /// If either team is missing the fixture is skipped as a whole: no
    /// partial update is ever made.
    pub fn apply(table: &mut StandingsTable, fixture: &Fixture, outcome: Outcome) -> ApplyStatus {
        let missing: Vec<TeamId> = [&fixture.team_a, &fixture.team_b]
            .into_iter()
            .filter(|t| !table.contains(t))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return ApplyStatus::Skipped { missing };
        }

        if outcome == Outcome::NotPlayed {
            return ApplyStatus::NotPlayed;
        }

        let (a, b) = deltas(outcome);
        // Both teams checked above, so neither update can fail.
        let applied = table
            .update(&fixture.team_a, a.points, a.played)
            .and_then(|_| table.update(&fixture.team_b, b.points, b.played));
        match applied {
            Ok(()) => ApplyStatus::Applied,
            Err(_) => ApplyStatus::Skipped { missing: Vec::new() },
        }
    }

    /// Fold every `(fixture, outcome)` pair into the table, in order.
    pub fn apply_all<'a, I>(table: &mut StandingsTable, results: I) -> ApplyReport
    where
        I: IntoIterator<Item = (&'a Fixture, Outcome)>,
    {
        let mut report = ApplyReport::default();

        for (i, (fixture, outcome)) in results.into_iter().enumerate() {
            let match_number = i + 1;
            match Self::apply(table, fixture, outcome) {
                ApplyStatus::Applied => {
                    debug!(match_number, %fixture, %outcome, "Outcome applied");
                    report.applied += 1;
                }
                ApplyStatus::NotPlayed => report.not_played += 1,
                ApplyStatus::Skipped { missing } => {
                    warn!(
                        match_number,
                        %fixture,
                        missing = ?missing,
                        "Fixture skipped: team not in standings table"
                    );
                    report.skipped.push(SkippedFixture {
                        match_number,
                        fixture: fixture.clone(),
                        missing,
                    });
                }
            }
        }

        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
