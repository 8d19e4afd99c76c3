//! Route entity and its draft payload.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{DeliveryPoint, DeliveryPointDraft, PointValidationError};

/// Input payload for [`Route::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDraft {
    pub name: String,
    pub code: String,
    pub shift: String,
    pub delivery_points: Vec<DeliveryPointDraft>,
}

/// A delivery route: an identity, a shift label, and its ordered stops.
///
/// Route ids are stable and never reused. A route with zero delivery
/// points is valid. `updated_at` is stamped by the edit session when the
/// route's content changes, never by this constructor.
///
/// # Examples
///
/// ```
/// use engine::domain::points::{Route, RouteDraft};
///
/// let route = Route::new(RouteDraft {
///     name: "North loop".to_owned(),
///     code: "N1".to_owned(),
///     shift: "Morning".to_owned(),
///     delivery_points: Vec::new(),
/// })?;
/// assert!(route.delivery_points().is_empty());
/// # Ok::<(), engine::domain::points::PointValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) code: String,
    pub(crate) shift: String,
    pub(crate) delivery_points: Vec<DeliveryPoint>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

impl Route {
    /// Creates a validated route with a fresh id.
    ///
    /// Each point draft is validated individually and codes must be unique
    /// within the draft. Uniqueness against the rest of the board is the
    /// edit session's concern.
    pub fn new(draft: RouteDraft) -> Result<Self, PointValidationError> {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Creates a validated route with a caller-supplied id.
    ///
    /// Used when rehydrating persisted routes whose identity must survive.
    pub fn with_id(id: Uuid, draft: RouteDraft) -> Result<Self, PointValidationError> {
        let mut delivery_points = Vec::with_capacity(draft.delivery_points.len());
        for point_draft in draft.delivery_points {
            let point = DeliveryPoint::new(point_draft)?;
            if delivery_points
                .iter()
                .any(|existing: &DeliveryPoint| existing.code == point.code)
            {
                return Err(PointValidationError::DuplicateCode { code: point.code });
            }
            delivery_points.push(point);
        }

        Ok(Self {
            id,
            name: draft.name,
            code: draft.code,
            shift: draft.shift,
            delivery_points,
            updated_at: None,
        })
    }

    /// Returns the stable route id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the route code.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Returns the shift label.
    pub fn shift(&self) -> &str {
        self.shift.as_str()
    }

    /// Returns the route's stops in storage order.
    pub fn delivery_points(&self) -> &[DeliveryPoint] {
        self.delivery_points.as_slice()
    }

    /// Returns the last persisted-change timestamp, if any.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns whether the route carries a point with the given code.
    pub fn contains_code(&self, code: &str) -> bool {
        self.delivery_points.iter().any(|point| point.code == code)
    }

    /// Returns whether the routes differ in anything except `updated_at`.
    pub(crate) fn content_differs(&self, other: &Self) -> bool {
        self.name != other.name
            || self.code != other.code
            || self.shift != other.shift
            || self.delivery_points != other.delivery_points
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use crate::domain::points::DeliverySchedule;

    use super::*;

    fn point_draft(code: &str) -> DeliveryPointDraft {
        DeliveryPointDraft {
            code: code.to_owned(),
            name: format!("Stop {code}"),
            schedule: DeliverySchedule::Daily,
            latitude: 32.0,
            longitude: 34.8,
            descriptions: Vec::new(),
            qr_code_image_url: None,
            qr_code_destination_url: None,
        }
    }

    #[rstest]
    fn new_builds_points_in_order() {
        let route = Route::new(RouteDraft {
            name: "Centre".to_owned(),
            code: "C2".to_owned(),
            shift: "Evening".to_owned(),
            delivery_points: vec![point_draft("9"), point_draft("10")],
        })
        .expect("valid route");

        let codes: Vec<&str> = route.delivery_points().iter().map(|p| p.code()).collect();
        assert_eq!(codes, ["9", "10"]);
        assert!(route.updated_at().is_none());
    }

    #[rstest]
    fn new_rejects_duplicate_codes_in_draft() {
        let result = Route::new(RouteDraft {
            name: "Centre".to_owned(),
            code: "C2".to_owned(),
            shift: "Evening".to_owned(),
            delivery_points: vec![point_draft("9"), point_draft("9")],
        });

        assert_eq!(
            result,
            Err(PointValidationError::DuplicateCode {
                code: "9".to_owned()
            })
        );
    }

    #[rstest]
    fn with_id_preserves_identity() {
        let id = Uuid::new_v4();
        let route = Route::with_id(
            id,
            RouteDraft {
                name: "South".to_owned(),
                code: "S1".to_owned(),
                shift: "Morning".to_owned(),
                delivery_points: Vec::new(),
            },
        )
        .expect("valid route");

        assert_eq!(route.id(), id);
    }

    #[rstest]
    fn content_differs_ignores_timestamp() {
        let mut a = Route::new(RouteDraft {
            name: "South".to_owned(),
            code: "S1".to_owned(),
            shift: "Morning".to_owned(),
            delivery_points: Vec::new(),
        })
        .expect("valid route");
        let b = a.clone();

        a.updated_at = Some(Utc::now());
        assert!(!a.content_differs(&b));

        a.name = "South loop".to_owned();
        assert!(a.content_differs(&b));
    }
}
