//! Delivery point entity and its draft payload.

use serde::{Deserialize, Serialize};

use crate::domain::distance::GeoPoint;

use super::{DeliverySchedule, PointValidationError};

/// One ordered key/value line shown in a delivery point's description panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionEntry {
    pub key: String,
    pub value: String,
}

/// Input payload for [`DeliveryPoint::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPointDraft {
    pub code: String,
    pub name: String,
    pub schedule: DeliverySchedule,
    pub latitude: f64,
    pub longitude: f64,
    pub descriptions: Vec<DescriptionEntry>,
    pub qr_code_image_url: Option<String>,
    pub qr_code_destination_url: Option<String>,
}

/// A single stop on a route, identified by a board-wide unique code.
///
/// Code uniqueness across the whole route collection is a working-set
/// invariant enforced by the edit session, not by this constructor; this
/// type only validates its own fields. A `(0, 0)` coordinate pair is the
/// board's "no coordinates" sentinel and is accepted as-is.
///
/// # Examples
///
/// ```
/// use engine::domain::points::{DeliveryPoint, DeliveryPointDraft, DeliverySchedule};
///
/// let point = DeliveryPoint::new(DeliveryPointDraft {
///     code: "120".to_owned(),
///     name: "Harbour kiosk".to_owned(),
///     schedule: DeliverySchedule::Daily,
///     latitude: 32.08,
///     longitude: 34.78,
///     descriptions: Vec::new(),
///     qr_code_image_url: None,
///     qr_code_destination_url: None,
/// })?;
/// assert_eq!(point.code(), "120");
/// # Ok::<(), engine::domain::points::PointValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPoint {
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) schedule: DeliverySchedule,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) descriptions: Vec<DescriptionEntry>,
    pub(crate) qr_code_image_url: Option<String>,
    pub(crate) qr_code_destination_url: Option<String>,
}

impl DeliveryPoint {
    /// Creates a validated delivery point.
    pub fn new(draft: DeliveryPointDraft) -> Result<Self, PointValidationError> {
        Self::try_from(draft)
    }

    /// Returns the board-wide unique code.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the delivery cadence.
    pub fn schedule(&self) -> DeliverySchedule {
        self.schedule
    }

    /// Returns the latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the point's coordinates as a [`GeoPoint`].
    pub fn geo_point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Returns description lines in display order.
    pub fn descriptions(&self) -> &[DescriptionEntry] {
        self.descriptions.as_slice()
    }

    /// Returns the QR code image URL, if one has been generated.
    pub fn qr_code_image_url(&self) -> Option<&str> {
        self.qr_code_image_url.as_deref()
    }

    /// Returns the URL the QR code points at, if any.
    pub fn qr_code_destination_url(&self) -> Option<&str> {
        self.qr_code_destination_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn sample_draft() -> DeliveryPointDraft {
        DeliveryPointDraft {
            code: "42".to_owned(),
            name: "Corner store".to_owned(),
            schedule: DeliverySchedule::Weekday,
            latitude: 32.1,
            longitude: 34.8,
            descriptions: vec![DescriptionEntry {
                key: "Entrance".to_owned(),
                value: "rear door".to_owned(),
            }],
            qr_code_image_url: None,
            qr_code_destination_url: None,
        }
    }

    #[rstest]
    fn new_accepts_valid_draft() {
        let point = DeliveryPoint::new(sample_draft()).expect("valid draft");
        assert_eq!(point.code(), "42");
        assert_eq!(point.schedule(), DeliverySchedule::Weekday);
        assert_eq!(point.descriptions().len(), 1);
    }

    #[rstest]
    fn new_rejects_blank_code() {
        let mut draft = sample_draft();
        draft.code = "  ".to_owned();
        assert_eq!(
            DeliveryPoint::new(draft),
            Err(PointValidationError::EmptyCode)
        );
    }

    #[rstest]
    #[case::latitude_too_low(-90.5, 34.8)]
    #[case::latitude_too_high(91.0, 34.8)]
    fn new_rejects_out_of_range_latitude(#[case] latitude: f64, #[case] longitude: f64) {
        let mut draft = sample_draft();
        draft.latitude = latitude;
        draft.longitude = longitude;
        assert_eq!(
            DeliveryPoint::new(draft),
            Err(PointValidationError::InvalidLatitude { value: latitude })
        );
    }

    #[rstest]
    fn new_rejects_non_finite_longitude() {
        let mut draft = sample_draft();
        draft.longitude = f64::NAN;
        assert!(matches!(
            DeliveryPoint::new(draft),
            Err(PointValidationError::InvalidLongitude { .. })
        ));
    }

    #[rstest]
    fn missing_coordinates_sentinel_is_accepted() {
        let mut draft = sample_draft();
        draft.latitude = 0.0;
        draft.longitude = 0.0;
        let point = DeliveryPoint::new(draft).expect("sentinel accepted");
        assert!(point.geo_point().is_missing());
    }
}
