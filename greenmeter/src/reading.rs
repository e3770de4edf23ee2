//! Reading model shared by the poller and the display
//!
//! A [`Reading`] is the complete state of one poll cycle. The number on
//! screen and the background color always come from the same reading.

use crate::domain::FetchError;
use chrono::{DateTime, Local, Timelike};
use greenmeter_common::{is_night, StatusColor};

/// Display format for the time line, e.g. `19.10.2026 14:03:00`
pub const TIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub taken_at: DateTime<Local>,
    /// Zero when the fetch failed
    pub percentage: i64,
    pub status: StatusColor,
    /// Why the fetch failed, if it did
    pub error: Option<String>,
}

impl Reading {
    /// Build a reading from one fetch outcome at local time `now`.
    #[must_use]
    pub fn from_outcome(outcome: Result<i64, FetchError>, now: DateTime<Local>) -> Self {
        let status = StatusColor::for_outcome(&outcome, is_night(now.hour()));
        match outcome {
            Ok(percentage) => Self { taken_at: now, percentage, status, error: None },
            Err(e) => Self { taken_at: now, percentage: 0, status, error: Some(e.to_string()) },
        }
    }

    #[must_use]
    pub fn time_label(&self) -> String {
        self.taken_at.format(TIME_FORMAT).to_string()
    }

    /// One-line form used in headless mode
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = format!("{} {}% {}", self.time_label(), self.percentage, self.status.label());
        if let Some(ref err) = self.error {
            line.push_str(" (");
            line.push_str(err);
            line.push(')');
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, hour, 3, 7).single().expect("unambiguous local time")
    }

    #[test]
    fn test_day_reading() {
        let reading = Reading::from_outcome(Ok(44), at(14));
        assert_eq!(reading.percentage, 44);
        assert_eq!(reading.status, StatusColor::DayYellow);
        assert!(reading.error.is_none());
    }

    #[test]
    fn test_night_reading() {
        let reading = Reading::from_outcome(Ok(90), at(23));
        assert_eq!(reading.status, StatusColor::NightGreen);

        let reading = Reading::from_outcome(Ok(10), at(5));
        assert_eq!(reading.status, StatusColor::NightRed);
    }

    #[test]
    fn test_failed_reading_is_grey_zero() {
        let reading = Reading::from_outcome(Err(FetchError::NoData), at(12));
        assert_eq!(reading.percentage, 0);
        assert_eq!(reading.status, StatusColor::Grey);
        assert_eq!(reading.error.as_deref(), Some("no data returned"));
    }

    #[test]
    fn test_missing_endpoint_reading() {
        let reading = Reading::from_outcome(Err(FetchError::MissingEndpoint), at(22));
        assert_eq!(reading.status, StatusColor::Grey);
        assert!(reading.error.is_some());
    }

    #[test]
    fn test_time_label_format() {
        let reading = Reading::from_outcome(Ok(50), at(9));
        assert_eq!(reading.time_label(), "19.10.2026 09:03:07");
    }

    #[test]
    fn test_summary() {
        assert_eq!(Reading::from_outcome(Ok(44), at(14)).summary(), "19.10.2026 14:03:07 44% day-yellow");
        assert_eq!(
            Reading::from_outcome(Err(FetchError::NoData), at(14)).summary(),
            "19.10.2026 14:03:07 0% grey (no data returned)"
        );
    }
}
