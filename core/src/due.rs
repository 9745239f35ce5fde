//! Conversions between the form's local date-time input and UTC instants.
//!
//! The input is minute-granular local time (`YYYY-MM-DDTHH:MM`) in whatever
//! zone the host supplies. Functions are generic over `TimeZone` so tests can
//! pin a fixed offset.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::error::ValidationError;

/// Layout of a local date-time input value.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Layout used when showing a due date in a list row.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Shown in place of an absent due date.
pub const UNSET_PLACEHOLDER: &str = "—";

/// How far ahead a fresh form's due field is seeded.
pub const DEFAULT_DUE_OFFSET_MINUTES: i64 = 60;

/// Convert a local input value to an absolute instant. Blank input means no
/// due date. Seconds, if present, are dropped.
pub fn local_input_to_utc<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let naive = NaiveDateTime::parse_from_str(input, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidDueAt(input.to_string()))?;
    let naive = naive
        .with_second(0)
        .ok_or_else(|| ValidationError::InvalidDueAt(input.to_string()))?;

    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Skipped by a DST transition: move past the gap.
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .ok_or_else(|| ValidationError::InvalidDueAt(input.to_string()))?,
    };
    Ok(Some(local.with_timezone(&Utc)))
}

/// Inverse of [`local_input_to_utc`] for pre-filling the form.
pub fn utc_to_local_input<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant
        .with_timezone(tz)
        .naive_local()
        .format(INPUT_FORMAT)
        .to_string()
}

/// The value a fresh creation form's due field starts with.
pub fn default_due_input<Tz: TimeZone>(now: &DateTime<Utc>, tz: &Tz) -> String {
    utc_to_local_input(&(*now + Duration::minutes(DEFAULT_DUE_OFFSET_MINUTES)), tz)
}

/// Human-readable due date for a list row.
pub fn format_due<Tz: TimeZone>(due_at: Option<&DateTime<Utc>>, tz: &Tz) -> String {
    match due_at {
        Some(instant) => instant
            .with_timezone(tz)
            .naive_local()
            .format(DISPLAY_FORMAT)
            .to_string(),
        None => UNSET_PLACEHOLDER.to_string(),
    }
}
