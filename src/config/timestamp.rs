//! Timestamp parsing utilities.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};

/// Parse a command-line timestamp into UTC.
/// Supports:
/// - Plain dates (midnight UTC): "2024-03-15"
/// - RFC 3339 with any offset: "2024-03-15T10:30:00Z", "2024-03-15T12:30:00+02:00"
pub fn parse_timestamp(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty timestamp string");
    }

    if s.contains('T') || s.contains(' ') {
        let parsed = DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid RFC 3339 timestamp: {s}"))?;
        return Ok(parsed.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {s}"))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Parse an optional flag value.
pub fn parse_optional(value: Option<&str>, flag: &str) -> anyhow::Result<Option<DateTime<Utc>>> {
    value
        .map(|v| parse_timestamp(v).with_context(|| format!("Invalid --{flag}")))
        .transpose()
}
