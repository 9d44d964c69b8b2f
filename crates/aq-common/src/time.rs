//! Time windows for granule searches.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// A closed UTC time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> CommonResult<Self> {
        if start > end {
            return Err(CommonError::InvalidTimeRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// The `days` days leading up to `end`.
    pub fn trailing_days(end: DateTime<Utc>, days: u32) -> Self {
        Self {
            start: end - Duration::days(days as i64),
            end,
        }
    }

    /// Parse "start/end" where each side is RFC 3339, naive `%Y-%m-%dT%H:%M:%S`
    /// (assumed UTC) or a bare date.
    pub fn parse(s: &str) -> CommonResult<Self> {
        let (start, end) = s
            .split_once('/')
            .ok_or_else(|| CommonError::InvalidTime(s.to_string()))?;
        Self::new(parse_instant(start)?, parse_instant(end)?)
    }

    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        dt >= &self.start && dt <= &self.end
    }

    /// Dates formatted the way the provider search expects (`%Y-%m-%d`).
    pub fn search_dates(&self) -> (String, String) {
        (
            self.start.format("%Y-%m-%d").to_string(),
            self.end.format("%Y-%m-%d").to_string(),
        )
    }
}

fn parse_instant(s: &str) -> CommonResult<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(&format!("{}T00:00:00", s), "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }
    Err(CommonError::InvalidTime(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_days() {
        let end = Utc.with_ymd_and_hms(2024, 6, 8, 12, 0, 0).unwrap();
        let range = TimeRange::trailing_days(end, 7);
        assert_eq!(range.search_dates(), ("2024-06-01".to_string(), "2024-06-08".to_string()));
        assert!(range.contains(&end));
    }

    #[test]
    fn test_parse_range() {
        let range = TimeRange::parse("2024-06-01/2024-06-02T06:00:00Z").unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 6, 2, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_reversed_and_garbage() {
        assert!(matches!(
            TimeRange::parse("2024-06-02/2024-06-01"),
            Err(CommonError::InvalidTimeRange { .. })
        ));
        assert!(matches!(TimeRange::parse("yesterday"), Err(CommonError::InvalidTime(_))));
    }
}
