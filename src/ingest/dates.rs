//! Fixture date parsing and upcoming-only filtering.

use chrono::NaiveDate;
use tracing::debug;

use crate::types::Fixture;

/// Date layouts seen in exported fixture sheets.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%b-%Y", "%d %b %Y", "%d %B %Y"];

/// Parse a fixture date, trying each known layout in turn.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Keep fixtures dated on or after `today`. Undated fixtures are kept.
pub fn filter_upcoming(fixtures: Vec<Fixture>, today: NaiveDate) -> Vec<Fixture> {
    let before = fixtures.len();
    let upcoming: Vec<Fixture> = fixtures
        .into_iter()
        .filter(|f| f.date.map_or(true, |d| d >= today))
        .collect();
    debug!(
        %today,
        kept = upcoming.len(),
        dropped = before - upcoming.len(),
        "Filtered fixtures to upcoming only"
    );
    upcoming
}
