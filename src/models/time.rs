//! Schedule time handling.
//!
//! The store serves dates and times as strings in several shapes ("HH:mm",
//! "HH:mm:ss", full ISO stamps from the spreadsheet import). Everything here
//! normalizes those into `chrono` values for the derived work window and
//! falls back to display sentinels instead of failing.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::flight::DISPLAY_FALLBACK;

/// Fixed length of a page's work window.
pub const WORK_DURATION_HOURS: i64 = 2;

/// Sentinel shown in the "prep window" column. Display only, not a duration.
pub const PREP_WINDOW_SENTINEL: i32 = -1;

/// Base date used when a record carries a time but no usable date.
const FALLBACK_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
    Some(d) => d,
    None => panic!("fallback date is valid"),
};

/// Derived start/end pair for one page's work on one flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Calendar-date prefix of a raw date string (first 10 characters).
///
/// Date filters compare this prefix as exact string equality, so timezone
/// suffixes and time-of-day noise never affect the match.
pub fn date_prefix(raw: &str) -> &str {
    // Count characters, not bytes: imported rows carry free text here.
    match raw.char_indices().nth(10) {
        Some((i, _)) => &raw[..i],
        None => raw,
    }
}

/// Parse a raw time string into a time of day.
///
/// Accepts "HH:mm", "HH:mm:ss" and ISO "…THH:mm[:ss]" shapes; anything else
/// is `None`.
pub fn extract_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // ISO stamp: keep only the time part.
    let time_part = match trimmed.split_once('T') {
        Some((_, t)) => t,
        None => trimmed,
    };

    let mut parts = time_part.split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    let seconds: u32 = parts
        .next()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);

    NaiveTime::from_hms_opt(hours, minutes, seconds)
}

/// Render a time as "HH:mm".
pub fn format_hm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Render a raw time string as "HH:mm", or the display fallback.
pub fn display_hm(raw: &str) -> String {
    match extract_time(raw) {
        Some(t) => format_hm(t),
        None => DISPLAY_FALLBACK.to_string(),
    }
}

/// Compute the work window for a page.
///
/// The anchor time (departure or arrival, per page) is shifted by
/// `offset_hours` to get the start; the end is a fixed two hours later.
/// Returns `None` when the anchor time cannot be parsed.
pub fn work_window(date_raw: &str, time_raw: &str, offset_hours: i64) -> Option<WorkWindow> {
    let time = extract_time(time_raw)?;
    let date = NaiveDate::parse_from_str(date_prefix(date_raw), "%Y-%m-%d").unwrap_or(FALLBACK_DATE);

    let start = date.and_time(time) + Duration::hours(offset_hours);
    let end = start + Duration::hours(WORK_DURATION_HOURS);
    Some(WorkWindow { start, end })
}

/// Completion stamp as the pair of display strings written onto a record
/// the moment a step flips to done: "YYYY/MM/DD" and "HH:mm".
pub fn completion_stamp(now: NaiveDateTime) -> (String, String) {
    (
        now.format("%Y/%m/%d").to_string(),
        now.format("%H:%M").to_string(),
    )
}
