//! Publish timestamp resolution.
//!
//! The listing encodes publish times informally: `5 mins ago`,
//! `Today 10:02`, `Y-day 23:15`, `05-12 08:01`, `01-15 2023`. Rules
//! apply in that order, first match wins. Absolute forms are read off
//! the site's displayed clock, which runs a fixed two hours offset from
//! UTC, and converted to the local time zone.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use thiserror::Error;

/// Hours the site's displayed clock runs ahead of UTC.
pub const SITE_UTC_OFFSET_HOURS: i32 = 2;

/// Timestamp cell that matches none of the known forms.
#[derive(Debug, Error)]
#[error("Unrecognized timestamp: {0:?}")]
pub struct PublishTimeError(pub String);

fn site_offset() -> FixedOffset {
    FixedOffset::east_opt(SITE_UTC_OFFSET_HOURS * 3600).expect("offset within range")
}

/// Resolve a listing timestamp to an absolute local time.
///
/// `now` anchors the relative forms and the year inference; callers
/// pass the moment of resolution.
pub fn resolve_publish_time(
    raw: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Local>, PublishTimeError> {
    let text = raw.replace('\u{a0}', " ");
    let text = text.trim();
    let offset = site_offset();
    let site_now = now.with_timezone(&offset);

    if text.contains("mins ago") {
        let minutes: i64 = text
            .split_whitespace()
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| PublishTimeError(raw.to_string()))?;
        return Ok((now - Duration::minutes(minutes)).with_timezone(&Local));
    }

    if text.contains("Today") {
        let time = clock_token(text, raw)?;
        return site_to_local(site_now.date_naive().and_time(time), offset, raw);
    }

    if text.contains("Y-day") {
        let date = site_now.date_naive() - Duration::days(1);
        let time = clock_token(text, raw)?;
        return site_to_local(date.and_time(time), offset, raw);
    }

    if text.contains(':') {
        // "MM-DD HH:MM" carries no year; assume the current one. Rows
        // scraped across a year boundary can resolve to the wrong year;
        // known limitation of the listing format.
        let dated = format!("{} {}", site_now.year(), text);
        let naive = NaiveDateTime::parse_from_str(&dated, "%Y %m-%d %H:%M")
            .map_err(|_| PublishTimeError(raw.to_string()))?;
        return site_to_local(naive, offset, raw);
    }

    let date = NaiveDate::parse_from_str(text, "%m-%d %Y")
        .map_err(|_| PublishTimeError(raw.to_string()))?;
    site_to_local(date.and_time(NaiveTime::MIN), offset, raw)
}

/// Second whitespace token of the cell, parsed as `HH:MM`.
fn clock_token(text: &str, raw: &str) -> Result<NaiveTime, PublishTimeError> {
    text.split_whitespace()
        .nth(1)
        .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
        .ok_or_else(|| PublishTimeError(raw.to_string()))
}

fn site_to_local(
    naive: NaiveDateTime,
    offset: FixedOffset,
    raw: &str,
) -> Result<DateTime<Local>, PublishTimeError> {
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Local))
        .ok_or_else(|| PublishTimeError(raw.to_string()))
}
