use chrono::{DateTime, Locale, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;
use thiserror::Error;

use crate::dom::Document;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimeError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Parse a `data-utc` value. RFC 3339 with any offset is accepted, as are
/// naive ISO-8601 date-times, which are taken as UTC.
pub fn parse_utc(value: &str) -> Result<DateTime<Utc>, TimeError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimeError::InvalidTimestamp(value.to_string()))
}

/// Map a browser language tag (`en-US`, `uk_UA`) to a chrono locale,
/// falling back to `en_US`
pub fn resolve_locale(tag: &str) -> Locale {
    let normalized = tag.trim().replace('-', "_");
    Locale::try_from(normalized.as_str()).unwrap_or(Locale::en_US)
}

fn pattern_for(locale: Locale) -> &'static str {
    match locale {
        Locale::en_US => "%B %-d, %Y at %I:%M %p",
        _ => "%-d %B %Y, %H:%M",
    }
}

/// Render a UTC timestamp in the viewer's time zone and locale: long month,
/// numeric day and year, 2-digit hour and minute
pub fn format_post_time<Tz>(utc: &str, locale: &str, tz: &Tz) -> Result<String, TimeError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let instant = parse_utc(utc)?;
    let locale = resolve_locale(locale);
    Ok(instant
        .with_timezone(tz)
        .format_localized(pattern_for(locale), locale)
        .to_string())
}

/// Rewrite every post-time element of the page. Elements with unparseable
/// timestamps keep their text. Returns how many were rewritten.
pub fn localize_document<Tz>(doc: &mut Document, locale: &str, tz: &Tz) -> usize
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut rewritten = 0;
    for element in doc.post_times_mut() {
        match format_post_time(&element.utc, locale, tz) {
            Ok(text) => {
                element.text = text;
                rewritten += 1;
            }
            Err(e) => log::warn!("Leaving post time untouched: {}", e),
        }
    }
    rewritten
}
