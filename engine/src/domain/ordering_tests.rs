//! Tests for row ordering and the position editor.

use chrono::NaiveDate;
use rstest::{fixture, rstest};
use uuid::Uuid;

use crate::domain::distance::DistanceMode;
use crate::domain::points::{
    DeliveryPoint, DeliveryPointDraft, DeliverySchedule, Route, RouteDraft, SavedRowOrder,
};

use super::*;

fn point(code: &str, schedule: DeliverySchedule) -> DeliveryPoint {
    DeliveryPoint::new(DeliveryPointDraft {
        code: code.to_owned(),
        name: format!("Stop {code}"),
        schedule,
        latitude: 32.1,
        longitude: 34.8,
        descriptions: Vec::new(),
        qr_code_image_url: None,
        qr_code_destination_url: None,
    })
    .expect("valid point")
}

fn codes(points: &[DeliveryPoint]) -> Vec<&str> {
    points.iter().map(DeliveryPoint::code).collect()
}

/// 2026-08-03: a Monday with an odd day-of-month, so `Daily`, `Weekday`
/// and `Alt 1` are active while `Alt 2` is not.
#[fixture]
fn monday_odd() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 3).expect("valid date")
}

#[rstest]
fn default_ordering_sorts_codes_naturally(monday_odd: NaiveDate) {
    let rows = order_points(
        &[
            point("9", DeliverySchedule::Daily),
            point("10", DeliverySchedule::Daily),
            point("2", DeliverySchedule::Daily),
        ],
        &RowOrdering::Default,
        monday_odd,
    );
    assert_eq!(codes(&rows), ["2", "9", "10"]);
}

#[rstest]
fn active_rows_always_precede_inactive_rows(monday_odd: NaiveDate) {
    let points = [
        point("1", DeliverySchedule::Alt2),
        point("2", DeliverySchedule::Daily),
        point("3", DeliverySchedule::Alt2),
        point("4", DeliverySchedule::Weekday),
    ];

    for ordering in [
        RowOrdering::Default,
        RowOrdering::Column {
            key: SortKey::Code,
            direction: SortDirection::Descending,
        },
        RowOrdering::Saved(SavedRowOrder {
            id: Uuid::new_v4(),
            label: "test".to_owned(),
            codes: vec!["3".to_owned(), "1".to_owned()],
        }),
    ] {
        let rows = order_points(&points, &ordering, monday_odd);
        let first_inactive = rows
            .iter()
            .position(|p| !p.schedule().is_active_on(monday_odd))
            .expect("has inactive rows");
        assert!(
            rows.iter()
                .skip(first_inactive)
                .all(|p| !p.schedule().is_active_on(monday_odd)),
            "inactive row ahead of an active one under {ordering:?}"
        );
    }
}

#[rstest]
fn column_sort_descending_reverses_raw_comparison(monday_odd: NaiveDate) {
    let rows = order_points(
        &[
            point("2", DeliverySchedule::Daily),
            point("10", DeliverySchedule::Daily),
            point("9", DeliverySchedule::Daily),
        ],
        &RowOrdering::Column {
            key: SortKey::Code,
            direction: SortDirection::Descending,
        },
        monday_odd,
    );
    // Raw string comparison, not natural: "9" > "2" > "10".
    assert_eq!(codes(&rows), ["9", "2", "10"]);
}

#[rstest]
fn saved_order_places_unmatched_codes_last(monday_odd: NaiveDate) {
    let order = SavedRowOrder {
        id: Uuid::new_v4(),
        label: "test".to_owned(),
        codes: vec!["7".to_owned(), "5".to_owned()],
    };
    let rows = order_points(
        &[
            point("5", DeliverySchedule::Daily),
            point("6", DeliverySchedule::Daily),
            point("7", DeliverySchedule::Daily),
            point("8", DeliverySchedule::Daily),
        ],
        &RowOrdering::Saved(order),
        monday_odd,
    );
    // Matched codes by saved position, unmatched stable after them.
    assert_eq!(codes(&rows), ["7", "5", "6", "8"]);
}

#[rstest]
fn distance_mode_follows_ordering() {
    assert_eq!(
        distance_mode_for(&RowOrdering::Default),
        DistanceMode::Direct
    );
    assert_eq!(
        distance_mode_for(&RowOrdering::Column {
            key: SortKey::Name,
            direction: SortDirection::Ascending,
        }),
        DistanceMode::Chain
    );
    assert_eq!(
        distance_mode_for(&RowOrdering::Saved(SavedRowOrder {
            id: Uuid::new_v4(),
            label: "test".to_owned(),
            codes: Vec::new(),
        })),
        DistanceMode::Chain
    );
}

#[rstest]
fn pinned_routes_sort_first_without_disturbing_order() {
    let route = |name: &str| {
        Route::new(RouteDraft {
            name: name.to_owned(),
            code: name.to_owned(),
            shift: "Morning".to_owned(),
            delivery_points: Vec::new(),
        })
        .expect("valid route")
    };
    let a = route("A");
    let b = route("B");
    let c = route("C");
    let pinned = vec![c.id(), b.id()];

    let ordered = order_routes(&[a.clone(), b.clone(), c.clone()], &pinned);
    let names: Vec<&str> = ordered.iter().map(Route::name).collect();
    // Stable partition: pinned keep their relative order, as do the rest.
    assert_eq!(names, ["B", "C", "A"]);
}

#[rstest]
fn display_rows_suppress_km_for_missing_coordinates(monday_odd: NaiveDate) {
    let hidden = DeliveryPoint::new(DeliveryPointDraft {
        code: "1".to_owned(),
        name: "Stop 1".to_owned(),
        schedule: DeliverySchedule::Daily,
        latitude: 0.0,
        longitude: 0.0,
        descriptions: Vec::new(),
        qr_code_image_url: None,
        qr_code_destination_url: None,
    })
    .expect("valid point");

    let mut route = Route::new(RouteDraft {
        name: "North".to_owned(),
        code: "N1".to_owned(),
        shift: "Morning".to_owned(),
        delivery_points: Vec::new(),
    })
    .expect("valid route");
    route.delivery_points = vec![hidden, point("2", DeliverySchedule::Daily)];

    let rows = display_rows(
        &route,
        &RowOrdering::Default,
        GeoPoint::new(32.0853, 34.7818),
        monday_odd,
    );

    let first = rows.first().expect("row exists");
    let second = rows.get(1).expect("row exists");
    assert!(first.km_label().is_none());
    assert!(second.km_label().is_some());
}

mod position_editor {
    use super::*;

    #[fixture]
    fn editor() -> RowPositionEditor {
        RowPositionEditor::new(&[
            point("a", DeliverySchedule::Daily),
            point("b", DeliverySchedule::Daily),
            point("c", DeliverySchedule::Daily),
        ])
    }

    #[rstest]
    fn new_seeds_one_based_positions(editor: RowPositionEditor) {
        let positions: Vec<&str> = editor.rows().iter().map(PositionRow::position).collect();
        assert_eq!(positions, ["1", "2", "3"]);
    }

    #[rstest]
    fn apply_rejects_duplicates_and_keeps_draft(mut editor: RowPositionEditor) {
        editor.set_position("b", "1").expect("row exists");
        let before = editor.clone();

        let result = editor.apply_positions();
        assert_eq!(
            result,
            Err(OrderingValidationError::DuplicatePosition { position: 1 })
        );
        assert_eq!(editor, before);
    }

    #[rstest]
    fn apply_rejects_blank_positions(mut editor: RowPositionEditor) {
        editor.set_position("c", "  ").expect("row exists");
        assert_eq!(
            editor.apply_positions(),
            Err(OrderingValidationError::IncompletePositions)
        );
    }

    #[rstest]
    fn apply_rejects_non_numeric_positions(mut editor: RowPositionEditor) {
        editor.set_position("a", "first").expect("row exists");
        assert_eq!(
            editor.apply_positions(),
            Err(OrderingValidationError::UnparsablePosition {
                value: "first".to_owned()
            })
        );
    }

    #[rstest]
    fn apply_reorders_and_renumbers_contiguously(mut editor: RowPositionEditor) {
        editor.set_position("a", "30").expect("row exists");
        editor.set_position("b", "10").expect("row exists");
        editor.set_position("c", "20").expect("row exists");

        let new_order = editor.apply_positions().expect("valid positions");
        assert_eq!(new_order, ["b", "c", "a"]);

        let positions: Vec<&str> = editor.rows().iter().map(PositionRow::position).collect();
        assert_eq!(positions, ["1", "2", "3"]);
    }

    #[rstest]
    fn save_order_tolerates_gaps(mut editor: RowPositionEditor) {
        editor.set_position("a", "9").expect("row exists");
        editor.set_position("b", "1").expect("row exists");
        editor.set_position("c", "5").expect("row exists");

        let today = NaiveDate::from_ymd_opt(2026, 8, 3).expect("valid date");
        let order = editor.save_order(today).expect("valid positions");
        assert_eq!(order.codes, ["b", "c", "a"]);
        assert_eq!(order.label, "Custom order 2026-08-03");
    }

    #[rstest]
    fn save_order_rejects_duplicates(mut editor: RowPositionEditor) {
        editor.set_position("a", "2").expect("row exists");
        let today = NaiveDate::from_ymd_opt(2026, 8, 3).expect("valid date");
        assert_eq!(
            editor.save_order(today),
            Err(OrderingValidationError::DuplicatePosition { position: 2 })
        );
    }

    #[rstest]
    fn set_position_rejects_unknown_code(mut editor: RowPositionEditor) {
        assert_eq!(
            editor.set_position("zz", "1"),
            Err(OrderingValidationError::UnknownCode {
                code: "zz".to_owned()
            })
        );
    }
}
