//! Saved row orders and the locally persisted preferences bundle.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, reusable ordering of delivery-point codes.
///
/// Saved orders are scoped to the local installation, not to a single
/// route: applying one to a route whose codes do not all match places the
/// unmatched codes last, stable by their original order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRowOrder {
    pub id: Uuid,
    pub label: String,
    pub codes: Vec<String>,
}

/// The locally persisted preference bundle: saved row orders plus the set
/// of pinned routes shown at the top of the route list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPreferences {
    #[serde(default)]
    pub saved_orders: Vec<SavedRowOrder>,
    #[serde(default)]
    pub pinned_route_ids: Vec<Uuid>,
}

impl BoardPreferences {
    /// Returns whether the route is pinned.
    pub fn is_pinned(&self, route_id: Uuid) -> bool {
        self.pinned_route_ids.contains(&route_id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn preferences_round_trip_through_json() {
        let prefs = BoardPreferences {
            saved_orders: vec![SavedRowOrder {
                id: Uuid::new_v4(),
                label: "Friday run".to_owned(),
                codes: vec!["2".to_owned(), "9".to_owned()],
            }],
            pinned_route_ids: vec![Uuid::new_v4()],
        };

        let json = serde_json::to_string(&prefs).expect("serializes");
        let restored: BoardPreferences = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(restored, prefs);
    }

    #[rstest]
    fn empty_document_deserializes_to_defaults() {
        let prefs: BoardPreferences = serde_json::from_str("{}").expect("deserializes");
        assert!(prefs.saved_orders.is_empty());
        assert!(prefs.pinned_route_ids.is_empty());
    }
}
