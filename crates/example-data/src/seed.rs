//! Seed payload types produced by the generator.

use serde::{Deserialize, Serialize};

/// Delivery cadence of a generated point, mirrored from the board's
/// schedule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleSeed {
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

impl ScheduleSeed {
    /// Returns the board's display string for this schedule.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekday => "Weekday",
            Self::Alt1 => "Alt 1",
            Self::Alt2 => "Alt 2",
        }
    }
}

/// One generated delivery point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePointSeed {
    /// Board-wide unique delivery-point code.
    pub code: String,
    /// Display name of the stop.
    pub name: String,
    /// Delivery cadence.
    pub schedule: ScheduleSeed,
    /// Latitude in degrees; `0.0` together with a zero longitude marks a
    /// stop whose coordinates are unknown.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Optional description line as a key/value pair.
    pub note: Option<(String, String)>,
}

/// One generated route with its stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleRouteSeed {
    /// Display name of the route.
    pub name: String,
    /// Short route code shown in the route list.
    pub code: String,
    /// Shift label (`Morning` or `Evening`).
    pub shift: String,
    /// Generated stops in visiting order.
    pub points: Vec<ExamplePointSeed>,
}
