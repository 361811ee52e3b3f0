//! `Retry-After` header parsing

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::Duration;

/// `strftime` layouts for the obsolete HTTP-date forms (RFC 850, asctime).
const OBSOLETE_HTTP_DATE_FORMATS: [&str; 2] = ["%A, %d-%b-%y %H:%M:%S GMT", "%a %b %e %H:%M:%S %Y"];

/// Parse a `Retry-After` value: non-negative integer seconds, or an HTTP-date.
///
/// A date in the past yields `Duration::ZERO`. Anything else is `None`.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    parse_retry_after_at(value, Utc::now())
}

pub(crate) fn parse_retry_after_at(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }
    let when = parse_http_date(value)?;
    Some((when - now).to_std().unwrap_or(Duration::ZERO))
}

fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    // IMF-fixdate is a subset of RFC 2822
    if let Ok(when) = DateTime::parse_from_rfc2822(value) {
        return Some(when.with_timezone(&Utc));
    }
    OBSOLETE_HTTP_DATE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|naive| naive.and_utc())
    })
}
