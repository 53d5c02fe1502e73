//! Built-in league used when no CSV input is supplied.

use crate::table::{DuplicatePolicy, StandingsTable};
use crate::types::{Fixture, LeagueError};

pub const LEAGUE_NAME: &str = "Cricket League";

/// Starting table: `(team, points, played)`.
pub const STANDINGS: &[(&str, u32, u32)] = &[
    ("United", 46, 15),
    ("Cosmos", 46, 15),
    ("Windies", 38, 14),
    ("WestVan", 34, 13),
    ("Abbotsford", 32, 13),
    ("StarsVI", 20, 14),
    ("Lions", 20, 14),
    ("HawksIV", 18, 14),
    ("StarsV", 12, 14),
    ("NorthVan", 10, 12),
];

/// Remaining fixtures, in playing order.
pub const FIXTURES: &[(&str, &str)] = &[
    ("HawksIV", "NorthVan"),
    ("WestVan", "Abbotsford"),
    ("Abbotsford", "HawksIV"),
    ("Lions", "StarsVI"),
    ("NorthVan", "StarsV"),
    ("Windies", "WestVan"),
    ("Cosmos", "United"),
    ("WestVan", "Cosmos"),
    ("United", "Lions"),
    ("StarsV", "HawksIV"),
    ("StarsVI", "NorthVan"),
    ("Windies", "Abbotsford"),
    ("HawksIV", "StarsVI"),
    ("Abbotsford", "StarsV"),
    ("Cosmos", "Windies"),
    ("Lions", "WestVan"),
    ("NorthVan", "United"),
    ("Lions", "NorthVan"),
    ("WestVan", "StarsVI"),
    ("Abbotsford", "NorthVan"),
    ("Windies", "StarsV"),
];

pub fn standings() -> Result<StandingsTable, LeagueError> {
    StandingsTable::from_records(STANDINGS.iter().copied(), DuplicatePolicy::Reject)
}

pub fn fixtures() -> Vec<Fixture> {
    FIXTURES.iter().map(|&(a, b)| Fixture::new(a, b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_league_shape() {
        let table = standings().unwrap();
        assert_eq!(table.len(), 10);
        assert_eq!(fixtures().len(), 21);
    }

    #[test]
    fn test_every_fixture_team_is_in_table() {
        let table = standings().unwrap();
        for f in fixtures() {
            assert!(table.contains(&f.team_a), "{}", f.team_a);
            assert!(table.contains(&f.team_b), "{}", f.team_b);
        }
    }
}
