// Functions for ranking teams in a finished standings table.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::table::StandingsTable;
use crate::types::{StandingsEntry, TeamId};

/// Default size of the relegation zone.
pub const DEFAULT_RELEGATION_ZONE: usize = 2;

/// One row of a ranked table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based table position.
    pub position: usize,
    pub team: TeamId,
    pub points: u32,
    pub played: u32,
}

type CmpFunc = fn(&StandingsEntry, &StandingsEntry) -> Ordering;

fn compare_points(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    b.points.cmp(&a.points)
}

// Lower is better.
fn compare_played(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    a.played.cmp(&b.played)
}

// Anything equal on every criterion keeps its input order (sort is stable).
const CRITERIA: &[CmpFunc] = &[compare_points, compare_played];

fn compare(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    CRITERIA
        .iter()
        .map(|f| f(a, b))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

pub struct Ranker;

impl Ranker {
    /// Sort the table into a total order: points descending, then matches
    /// played ascending, then insertion order.
    pub fn rank(table: &StandingsTable) -> Vec<RankedEntry> {
        let mut entries: Vec<&StandingsEntry> = table.iter().collect();
        entries.sort_by(|a, b| compare(a, b));

        entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| RankedEntry {
                position: i + 1,
                team: e.team.clone(),
                points: e.points,
                played: e.played,
            })
            .collect()
    }

    /// The last `n` rows of a ranked table (all rows if there are fewer).
    pub fn relegation_zone(ranked: &[RankedEntry], n: usize) -> &[RankedEntry] {
        &ranked[ranked.len().saturating_sub(n)..]
    }
}
