//! Epoch integer → PostgreSQL timestamp literal conversion.
//!
//! SQLite has no date type, so applications commonly store Unix epoch
//! seconds or milliseconds in INTEGER columns. Any 10–13 digit integer that
//! starts with `1` is treated as such a value. Large IDs match too.

use chrono::{DateTime, Local, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Values above this are taken to be milliseconds
pub const MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// Format of the emitted literal (inside single quotes)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static RE_EPOCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(1[0-9]{9,12})\b").unwrap());

/// Time zone used to render epoch values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampZone {
    /// The machine's local time zone
    #[default]
    Local,
    Utc,
}

impl TimestampZone {
    /// Render epoch seconds as `YYYY-MM-DD HH:MM:SS`, or None when out of range
    pub fn format_epoch(&self, secs: i64) -> Option<String> {
        let utc = DateTime::<Utc>::from_timestamp(secs, 0)?;
        let formatted = match self {
            TimestampZone::Local => utc
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            TimestampZone::Utc => utc.format(TIMESTAMP_FORMAT).to_string(),
        };
        Some(formatted)
    }
}

/// Result of converting one epoch literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpochLiteral {
    /// Converted to a quoted calendar timestamp
    Converted(String),
    /// Could not be converted; the original digits, quoted
    Fallback(String),
}

impl EpochLiteral {
    pub fn as_str(&self) -> &str {
        match self {
            EpochLiteral::Converted(s) | EpochLiteral::Fallback(s) => s,
        }
    }
}

/// Convert a single run of digits to a quoted timestamp literal.
pub fn epoch_to_literal(digits: &str, zone: TimestampZone) -> EpochLiteral {
    let formatted = digits.parse::<i64>().ok().and_then(|value| {
        let secs = if value > MILLIS_THRESHOLD {
            value / 1000
        } else {
            value
        };
        zone.format_epoch(secs)
    });

    match formatted {
        Some(ts) => EpochLiteral::Converted(format!("'{}'", ts)),
        None => EpochLiteral::Fallback(format!("'{}'", digits)),
    }
}

/// Counts from one pass of [`convert_timestamps`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimestampCounts {
    pub converted: u64,
    pub unconverted: u64,
}

/// Replace every epoch-looking integer in `content` with a quoted timestamp.
pub fn convert_timestamps(content: &str, zone: TimestampZone) -> (String, TimestampCounts) {
    let mut counts = TimestampCounts::default();
    let result = RE_EPOCH.replace_all(content, |caps: &Captures| {
        let literal = epoch_to_literal(&caps[1], zone);
        match literal {
            EpochLiteral::Converted(_) => counts.converted += 1,
            EpochLiteral::Fallback(_) => counts.unconverted += 1,
        }
        literal.as_str().to_string()
    });
    (result.to_string(), counts)
}
