//! CSV ingestion through to a finished simulation.

use std::io::Write;

use chrono::NaiveDate;
use relegation_sim::engine::simulation::Simulation;
use relegation_sim::ingest::{filter_upcoming, load_fixtures, load_points_table};
use relegation_sim::predictions::{load_predictions, resolve_outcomes};
use relegation_sim::table::DuplicatePolicy;
use relegation_sim::types::Outcome;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_csv_pipeline() {
    let points = write_temp("Team,Points,Played\nLions,20,14\nStarsV,12,14\nNorthVan,10,12\n");
    let fixtures = write_temp(
        "Team1,Team2,Date\n\
         NorthVan,StarsV,2025-06-01\n\
         Lions,NorthVan,2025-07-20\n\
         StarsV,Ghosts,2025-07-21\n",
    );
    let predictions = write_temp("Match,Result\n1,NorthVan wins\n2,No result\n3,StarsV wins\n");

    let table = load_points_table(points.path(), DuplicatePolicy::Reject).unwrap();
    let fixtures = load_fixtures(fixtures.path()).unwrap();
    let preds = load_predictions(predictions.path()).unwrap();
    let results = resolve_outcomes(&fixtures, &preds, Outcome::NotPlayed).unwrap();

    let report = Simulation::run(table, &results, 2);
    let rows: Vec<_> = report
        .ranked
        .iter()
        .map(|r| (r.team.as_str(), r.points, r.played))
        .collect();
    assert_eq!(rows, vec![("Lions", 22, 15), ("NorthVan", 15, 14), ("StarsV", 12, 15)]);
    assert_eq!(report.apply.skipped_count(), 1);
    assert_eq!(report.relegation, vec!["NorthVan", "StarsV"]);
}

#[test]
fn test_upcoming_filter_before_resolution() {
    let fixtures = write_temp(
        "Home,Away,Date\n\
         A,B,01/06/2025\n\
         B,C,20/07/2025\n\
         C,A,\n",
    );
    let fixtures = load_fixtures(fixtures.path()).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    let upcoming = filter_upcoming(fixtures, today);
    let pairs: Vec<_> = upcoming.iter().map(|f| (f.team_a.as_str(), f.team_b.as_str())).collect();
    assert_eq!(pairs, vec![("B", "C"), ("C", "A")]);
}
