//! Full-pipeline scenarios: table + outcomes → ranked table + relegation.

use relegation_sim::defaults;
use relegation_sim::engine::applier::OutcomeApplier;
use relegation_sim::engine::ranker::Ranker;
use relegation_sim::engine::simulation::Simulation;
use relegation_sim::predictions::{resolve_outcomes, Prediction};
use relegation_sim::table::{DuplicatePolicy, StandingsTable};
use relegation_sim::types::{Fixture, Outcome};

fn table(records: &[(&str, u32, u32)]) -> StandingsTable {
    StandingsTable::from_records(records.iter().copied(), DuplicatePolicy::Reject).unwrap()
}

fn tallies(table: &StandingsTable) -> Vec<(String, u32, u32)> {
    table.iter().map(|e| (e.team.clone(), e.points, e.played)).collect()
}

fn order(report: &relegation_sim::engine::simulation::SimulationReport) -> Vec<&str> {
    report.ranked.iter().map(|r| r.team.as_str()).collect()
}

#[test]
fn test_stable_tie_with_no_fixtures() {
    let report = Simulation::run(table(&[("A", 10, 5), ("B", 10, 5)]), &[], 2);
    assert_eq!(order(&report), vec!["A", "B"]);
    assert_eq!(report.relegation, vec!["A", "B"]);
}

#[test]
fn test_team_a_win_from_zero() {
    let mut t = table(&[("A", 0, 0), ("B", 0, 0)]);
    OutcomeApplier::apply(&mut t, &Fixture::new("A", "B"), Outcome::TeamAWins);
    assert_eq!(tallies(&t), vec![("A".into(), 4, 1), ("B".into(), 0, 1)]);
}

#[test]
fn test_no_result_from_zero() {
    let mut t = table(&[("A", 0, 0), ("B", 0, 0)]);
    OutcomeApplier::apply(&mut t, &Fixture::new("A", "B"), Outcome::NoResult);
    assert_eq!(tallies(&t), vec![("A".into(), 2, 1), ("B".into(), 1, 1)]);
}

#[test]
fn test_unknown_team_is_skipped_without_error() {
    let mut t = table(&[("A", 0, 0)]);
    let report = OutcomeApplier::apply_all(&mut t, [(&Fixture::new("A", "Z"), Outcome::TeamAWins)]);
    assert_eq!(tallies(&t), vec![("A".into(), 0, 0)]);
    assert_eq!(report.skipped_count(), 1);
}

#[test]
fn test_fewer_played_ranks_higher() {
    let t = table(&[("A", 10, 3), ("B", 12, 4), ("C", 12, 3)]);
    let ranked = Ranker::rank(&t);
    let teams: Vec<_> = ranked.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(teams, vec!["C", "B", "A"]);
}

#[test]
fn test_builtin_league_all_not_played() {
    let fixtures = defaults::fixtures();
    let results = resolve_outcomes(&fixtures, &[], Outcome::NotPlayed).unwrap();
    let report = Simulation::run(defaults::standings().unwrap(), &results, 2);

    assert_eq!(
        order(&report),
        vec![
            "United", "Cosmos", "Windies", "WestVan", "Abbotsford",
            "StarsVI", "Lions", "HawksIV", "StarsV", "NorthVan",
        ]
    );
    assert_eq!(report.relegation, vec!["StarsV", "NorthVan"]);
    assert_eq!(report.apply.not_played, 21);
    assert_eq!(report.apply.applied, 0);
}

#[test]
fn test_builtin_league_escape_from_relegation() {
    let fixtures = defaults::fixtures();
    // NorthVan win all six of their remaining matches.
    let preds: Vec<Prediction> = fixtures
        .iter()
        .enumerate()
        .filter(|(_, f)| f.team_a == "NorthVan" || f.team_b == "NorthVan")
        .map(|(i, _)| Prediction::by_number(i + 1, "NorthVan wins"))
        .collect();
    assert_eq!(preds.len(), 6);

    let results = resolve_outcomes(&fixtures, &preds, Outcome::NotPlayed).unwrap();
    let report = Simulation::run(defaults::standings().unwrap(), &results, 2);

    let nv = report.ranked.iter().find(|r| r.team == "NorthVan").unwrap();
    assert_eq!((nv.points, nv.played), (34, 18));
    // HawksIV lose twice to NorthVan and join StarsV at the bottom.
    assert_eq!(report.relegation, vec!["HawksIV", "StarsV"]);
    assert!(!report.is_relegated("NorthVan"));
}

#[test]
fn test_every_fixture_considered_once() {
    let fixtures = defaults::fixtures();
    let results: Vec<(Fixture, Outcome)> = fixtures
        .iter()
        .cloned()
        .zip(Outcome::ALL.iter().copied().cycle())
        .collect();
    let report = Simulation::run(defaults::standings().unwrap(), &results, 2);
    assert_eq!(report.apply.total(), fixtures.len());

    let played_outcomes = results.iter().filter(|(_, o)| *o != Outcome::NotPlayed).count() as u32;
    let before: u32 = defaults::STANDINGS.iter().map(|(_, _, p)| p).sum();
    let after: u32 = report.ranked.iter().map(|r| r.played).sum();
    assert_eq!(after, before + 2 * played_outcomes);
}

#[test]
fn test_malformed_outcome_fails_fast() {
    let fixtures = defaults::fixtures();
    let preds = vec![Prediction::by_number(1, "HawksIV wins"), Prediction::by_number(2, "tie")];
    assert!(resolve_outcomes(&fixtures, &preds, Outcome::NotPlayed).is_err());
}
