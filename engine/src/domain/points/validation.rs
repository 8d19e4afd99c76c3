//! Delivery point validation and conversion helpers.

use super::{DeliveryPoint, DeliveryPointDraft, PointValidationError, Route};

impl TryFrom<DeliveryPointDraft> for DeliveryPoint {
    type Error = PointValidationError;

    fn try_from(value: DeliveryPointDraft) -> Result<Self, Self::Error> {
        if value.code.trim().is_empty() {
            return Err(PointValidationError::EmptyCode);
        }
        validate_latitude(value.latitude)?;
        validate_longitude(value.longitude)?;

        Ok(Self {
            code: value.code,
            name: value.name,
            schedule: value.schedule,
            latitude: value.latitude,
            longitude: value.longitude,
            descriptions: value.descriptions,
            qr_code_image_url: value.qr_code_image_url,
            qr_code_destination_url: value.qr_code_destination_url,
        })
    }
}

/// Range- and finiteness-checks a latitude in degrees.
pub(crate) fn validate_latitude(value: f64) -> Result<(), PointValidationError> {
    if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
        return Err(PointValidationError::InvalidLatitude { value });
    }
    Ok(())
}

/// Range- and finiteness-checks a longitude in degrees.
pub(crate) fn validate_longitude(value: f64) -> Result<(), PointValidationError> {
    if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
        return Err(PointValidationError::InvalidLongitude { value });
    }
    Ok(())
}

/// Returns whether `code` is already carried by any point on any route.
///
/// `exempt` names a code to skip, used when renaming a point to a value
/// that may equal its current code.
pub(crate) fn code_in_use(routes: &[Route], code: &str, exempt: Option<&str>) -> bool {
    routes.iter().any(|route| {
        route
            .delivery_points
            .iter()
            .any(|point| point.code == code && Some(point.code.as_str()) != exempt)
    })
}
