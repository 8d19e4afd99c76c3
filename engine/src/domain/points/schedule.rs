//! Delivery schedule kinds and the active-today calendar rules.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Delivery cadence assigned to a single delivery point.
///
/// Serialized with the board's raw display strings (`"Daily"`, `"Weekday"`,
/// `"Alt 1"`, `"Alt 2"`) so persisted documents match what operators see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliverySchedule {
    /// Delivered every calendar day.
    Daily,
    /// Delivered on working days (Sunday through Thursday).
    Weekday,
    /// Delivered on odd days of the month.
    #[serde(rename = "Alt 1")]
    Alt1,
    /// Delivered on even days of the month.
    #[serde(rename = "Alt 2")]
    Alt2,
}

/// Error returned when parsing a delivery schedule from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDeliveryScheduleError;

impl DeliverySchedule {
    /// Returns the board's display string for this schedule.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekday => "Weekday",
            Self::Alt1 => "Alt 1",
            Self::Alt2 => "Alt 2",
        }
    }

    /// Returns whether this schedule produces a delivery on `date`.
    ///
    /// `Daily` is always active; `Alt 1` fires on odd days of the month and
    /// `Alt 2` on even days; `Weekday` covers the Sunday–Thursday working
    /// week.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use engine::domain::points::DeliverySchedule;
    ///
    /// let odd_day = NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date");
    /// assert!(DeliverySchedule::Alt1.is_active_on(odd_day));
    /// assert!(!DeliverySchedule::Alt2.is_active_on(odd_day));
    /// ```
    pub fn is_active_on(self, date: NaiveDate) -> bool {
        match self {
            Self::Daily => true,
            Self::Alt1 => date.day() % 2 == 1,
            Self::Alt2 => date.day() % 2 == 0,
            Self::Weekday => matches!(
                date.weekday(),
                Weekday::Sun | Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu
            ),
        }
    }
}

impl fmt::Display for DeliverySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParseDeliveryScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid delivery schedule")
    }
}

impl std::error::Error for ParseDeliveryScheduleError {}

impl FromStr for DeliverySchedule {
    type Err = ParseDeliveryScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Daily" => Ok(Self::Daily),
            "Weekday" => Ok(Self::Weekday),
            "Alt 1" => Ok(Self::Alt1),
            "Alt 2" => Ok(Self::Alt2),
            _ => Err(ParseDeliveryScheduleError),
        }
    }
}
