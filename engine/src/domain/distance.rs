//! Great-circle distances and per-row distance annotation.
//!
//! The board's Km column works in one of two modes: every row measured
//! from a fixed origin (the depot), or each row measured from the row
//! above it with a running total. Both reduce to the haversine formula
//! over WGS84 degrees with a spherical Earth.

use crate::domain::points::DeliveryPoint;

/// Mean Earth radius in kilometres used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
///
/// `(0, 0)` is the board's "no coordinates" sentinel: distances are still
/// computed for such points, and display-layer callers use
/// [`GeoPoint::is_missing`] to suppress the meaningless result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Creates a coordinate pair from degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns the latitude in degrees.
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    /// Returns whether this pair is the "no coordinates" sentinel.
    pub fn is_missing(self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// How row distances relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMode {
    /// Every row is measured from the fixed origin; rows are independent.
    Direct,
    /// Each row is measured from the previous row (the first from the
    /// origin) and the displayed value accumulates, modelling an implied
    /// visiting order.
    Chain,
}

/// Distances computed for one display row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowDistance {
    display: f64,
    segment: f64,
}

impl RowDistance {
    /// Returns the value shown in the Km column.
    pub const fn display(self) -> f64 {
        self.display
    }

    /// Returns the leg distance behind this row.
    pub const fn segment(self) -> f64 {
        self.segment
    }
}

/// Great-circle distance between two coordinate pairs in kilometres.
///
/// # Examples
///
/// ```
/// use engine::domain::distance::{GeoPoint, haversine_km};
///
/// let depot = GeoPoint::new(32.0853, 34.7818);
/// let same = haversine_km(depot, depot);
/// assert!(same.abs() < 1e-9);
/// ```
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlng = (b.longitude - a.longitude).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlng / 2.0).sin();
    let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Computes display and segment distances for rows in display order.
///
/// In [`DistanceMode::Direct`] both values are the origin-to-row distance.
/// In [`DistanceMode::Chain`] the segment is the distance from the
/// previous row (origin for the first row) and the display value is the
/// running sum of segments.
pub fn annotate_rows(
    points: &[DeliveryPoint],
    origin: GeoPoint,
    mode: DistanceMode,
) -> Vec<RowDistance> {
    match mode {
        DistanceMode::Direct => points
            .iter()
            .map(|point| {
                let km = haversine_km(origin, point.geo_point());
                RowDistance {
                    display: km,
                    segment: km,
                }
            })
            .collect(),
        DistanceMode::Chain => {
            let mut previous = origin;
            let mut total = 0.0;
            points
                .iter()
                .map(|point| {
                    let here = point.geo_point();
                    let segment = haversine_km(previous, here);
                    total += segment;
                    previous = here;
                    RowDistance {
                        display: total,
                        segment,
                    }
                })
                .collect()
        }
    }
}

/// Formats a kilometre value for the Km column.
///
/// Values are rounded to one decimal place; whole values drop the
/// trailing `.0`.
///
/// # Examples
///
/// ```
/// use engine::domain::distance::format_km;
///
/// assert_eq!(format_km(12.0), "12 Km");
/// assert_eq!(format_km(12.34), "12.3 Km");
/// ```
pub fn format_km(km: f64) -> String {
    let tenths = (km * 10.0).round() as i64;
    let whole = tenths / 10;
    let fraction = (tenths % 10).abs();
    if fraction == 0 {
        format!("{whole} Km")
    } else {
        format!("{whole}.{fraction} Km")
    }
}
