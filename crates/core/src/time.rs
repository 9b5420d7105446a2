use chrono::{DateTime, Utc};

/// UTC instant as used across the models.
pub type Timestamp = DateTime<Utc>;

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Wall-clock time in UTC.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Formats a timestamp the way result listings show it, e.g. `Nov 14, 2023 22:13`.
#[must_use]
pub fn format_completed_at(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %H:%M").to_string()
}

/// Formats a calendar day the way plan and receipt listings show it, e.g. `14 Nov 2023`.
#[must_use]
pub fn format_day(at: DateTime<Utc>) -> String {
    at.format("%d %b %Y").to_string()
}
