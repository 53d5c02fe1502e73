//! Simulation run — apply every fixture outcome, rank, flag relegation.
//!
//! Each run owns its own table; nothing is shared between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::engine::applier::{ApplyReport, OutcomeApplier};
use crate::engine::ranker::{RankedEntry, Ranker};
use crate::table::StandingsTable;
use crate::types::{Fixture, Outcome, TeamId};

// ---------------------------------------------------------------------------
// Simulation report
// ---------------------------------------------------------------------------

/// Result of a complete apply → rank → relegate pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub ranked: Vec<RankedEntry>,
    pub relegation: Vec<TeamId>,
    pub apply: ApplyReport,
    pub generated_at: DateTime<Utc>,
}

impl SimulationReport {
    pub fn is_relegated(&self, team: &str) -> bool {
        self.relegation.iter().any(|t| t == team)
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

pub struct Simulation;

impl Simulation {
    /// Fold the outcomes into `table`, rank it and take the bottom
    /// `relegation_n` teams.
    pub fn run(
        mut table: StandingsTable,
        results: &[(Fixture, Outcome)],
        relegation_n: usize,
    ) -> SimulationReport {
        let run_id = Uuid::new_v4();
        let span = info_span!("simulation", %run_id);
        let _guard = span.enter();

        info!(
            teams = table.len(),
            fixtures = results.len(),
            relegation_n,
            "Starting simulation"
        );

        let apply = OutcomeApplier::apply_all(&mut table, results.iter().map(|(f, o)| (f, *o)));
        if apply.skipped_count() > 0 {
            warn!(
                skipped = apply.skipped_count(),
                "Some fixtures referenced unknown teams and were skipped"
            );
        }

        let ranked = Ranker::rank(&table);
        let relegation: Vec<TeamId> = Ranker::relegation_zone(&ranked, relegation_n)
            .iter()
            .map(|r| r.team.clone())
            .collect();

        info!(
            applied = apply.applied,
            not_played = apply.not_played,
            skipped = apply.skipped_count(),
            relegation = ?relegation,
            "Simulation complete"
        );

        SimulationReport {
            run_id,
            ranked,
            relegation,
            apply,
            generated_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
