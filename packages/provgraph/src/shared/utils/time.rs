//! Analysis timestamp handling
//!
//! Timestamps arrive either with second precision (`2016-01-01T10:00:00`) or
//! microsecond precision (`2016-01-01T10:00:00.123456`). Both are normalized
//! to millisecond precision before parsing.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::errors::{ProvGraphError, Result};

const SECOND_PRECISION_LEN: usize = 19;
const MICRO_PRECISION_LEN: usize = 26;

/// Normalize a raw timestamp string to millisecond precision
pub fn normalize_timestamp(raw: &str) -> String {
    match raw.len() {
        SECOND_PRECISION_LEN => format!("{}.000", raw),
        MICRO_PRECISION_LEN => raw.get(..raw.len() - 3).unwrap_or(raw).to_string(),
        _ => raw.to_string(),
    }
}

/// Parse a raw timestamp (naive UTC, or RFC 3339 with offset)
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let normalized = normalize_timestamp(raw.trim());

    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    DateTime::parse_from_rfc3339(&normalized)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ProvGraphError::invalid_input(format!("timestamp '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_normalize_second_precision() {
        assert_eq!(
            normalize_timestamp("2016-02-03T10:11:12"),
            "2016-02-03T10:11:12.000"
        );
    }

    #[test]
    fn test_normalize_microsecond_precision() {
        assert_eq!(
            normalize_timestamp("2016-02-03T10:11:12.123456"),
            "2016-02-03T10:11:12.123"
        );
    }

    #[test]
    fn test_normalize_leaves_millis_untouched() {
        assert_eq!(
            normalize_timestamp("2016-02-03T10:11:12.123"),
            "2016-02-03T10:11:12.123"
        );
    }

    #[test]
    fn test_parse_naive_and_rfc3339() {
        let a = parse_timestamp("2016-02-03T10:11:12").unwrap();
        assert_eq!(a.year(), 2016);
        assert_eq!(a.second(), 12);

        let b = parse_timestamp("2016-02-03T10:11:12Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
