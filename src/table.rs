//! Standings table.
//!
//! A team-keyed map of running (points, played) tallies that also
//! remembers insertion order, so ranking ties stay reproducible.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::types::{LeagueError, StandingsEntry, TeamId};

/// How table construction treats a team name seen twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateTeam`.
    #[default]
    Reject,
    /// Later record overwrites the earlier values, keeping the earlier position.
    LastWriteWins,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingsTable {
    entries: Vec<StandingsEntry>,
    index: HashMap<TeamId, usize>,
}

impl StandingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(team, points, played)` records.
    pub fn from_records<I, T>(records: I, policy: DuplicatePolicy) -> Result<Self, LeagueError>
    where
        I: IntoIterator<Item = (T, u32, u32)>,
        T: Into<TeamId>,
    {
        let mut table = Self::new();
        for (team, points, played) in records {
            table.insert(StandingsEntry::new(team, points, played), policy)?;
        }
        Ok(table)
    }

    /// Add a team to the table.
    pub fn insert(&mut self, entry: StandingsEntry, policy: DuplicatePolicy) -> Result<(), LeagueError> {
        match self.index.get(&entry.team) {
            Some(&i) => match policy {
                DuplicatePolicy::Reject => Err(LeagueError::DuplicateTeam(entry.team)),
                DuplicatePolicy::LastWriteWins => {
                    debug!(team = %entry.team, "Duplicate team, keeping last record");
                    self.entries[i] = entry;
                    Ok(())
                }
            },
            None => {
                self.index.insert(entry.team.clone(), self.entries.len());
                self.entries.push(entry);
                Ok(())
            }
        }
    }

    pub fn get(&self, team: &str) -> Result<&StandingsEntry, LeagueError> {
        self.index
            .get(team)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| LeagueError::UnknownTeam(team.to_string()))
    }

    /// Add deltas to a team's tally.
    pub fn update(&mut self, team: &str, points_delta: u32, played_delta: u32) -> Result<(), LeagueError> {
        let &i = self
            .index
            .get(team)
            .ok_or_else(|| LeagueError::UnknownTeam(team.to_string()))?;
        let entry = &mut self.entries[i];
        entry.points = entry.points.saturating_add(points_delta);
        entry.played = entry.played.saturating_add(played_delta);
        Ok(())
    }

    pub fn contains(&self, team: &str) -> bool {
        self.index.contains_key(team)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StandingsEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<StandingsEntry> {
        self.entries
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
