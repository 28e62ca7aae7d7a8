//! Currency and timestamp rendering for the screens.

use chrono::{DateTime, NaiveDateTime, Utc};

const TIMESTAMP_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

/// Render cents as dollars with two decimals: `1050` -> `$10.50`.
///
/// Integer arithmetic only; negative amounts keep the sign after the `$`.
pub fn format_cents(amount_cents: i64) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let abs = amount_cents.unsigned_abs();
    format!("${sign}{}.{:02}", abs / 100, abs % 100)
}

/// Render an ISO-8601 timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// Offset-aware input is shown in UTC. Naive input is shown as written.
/// Anything unparseable comes back unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Utc)
            .format(TIMESTAMP_DISPLAY)
            .to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(TIMESTAMP_DISPLAY).to_string();
    }
    raw.to_string()
}

/// `format_timestamp` for nullable columns; absent renders `-`.
pub fn format_optional_timestamp(raw: Option<&str>) -> String {
    raw.map(format_timestamp).unwrap_or_else(|| "-".to_string())
}
