//! Tests for the board preference services.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use uuid::Uuid;

use crate::domain::ordering::RowPositionEditor;
use crate::domain::points::{
    BoardPreferences, DeliveryPoint, DeliveryPointDraft, DeliverySchedule, SavedRowOrder,
};
use crate::domain::ports::MockPreferencesRepository;

use super::*;

fn service(repo: MockPreferencesRepository) -> BoardPreferencesService<MockPreferencesRepository> {
    BoardPreferencesService::new(Arc::new(repo), Arc::new(DefaultClock))
}

#[fixture]
fn editor() -> RowPositionEditor {
    let points: Vec<DeliveryPoint> = ["4", "5"]
        .iter()
        .map(|code| {
            DeliveryPoint::new(DeliveryPointDraft {
                code: (*code).to_owned(),
                name: format!("Stop {code}"),
                schedule: DeliverySchedule::Daily,
                latitude: 32.1,
                longitude: 34.8,
                descriptions: Vec::new(),
                qr_code_image_url: None,
                qr_code_destination_url: None,
            })
            .expect("valid point")
        })
        .collect();
    RowPositionEditor::new(&points)
}

#[rstest]
#[tokio::test]
async fn save_row_order_appends_to_the_stored_bundle(editor: RowPositionEditor) {
    let mut repo = MockPreferencesRepository::new();
    repo.expect_load()
        .times(1)
        .returning(|| Ok(BoardPreferences::default()));
    repo.expect_save()
        .withf(|prefs| prefs.saved_orders.len() == 1)
        .times(1)
        .returning(|_| Ok(()));

    let saved = service(repo)
        .save_row_order(&editor)
        .await
        .expect("order saves");
    assert_eq!(saved.codes, ["4", "5"]);
}

#[rstest]
#[tokio::test]
async fn save_row_order_rejects_duplicates_without_writing(mut editor: RowPositionEditor) {
    editor.set_position("5", "1").expect("row exists");

    let mut repo = MockPreferencesRepository::new();
    repo.expect_load().times(0);
    repo.expect_save().times(0);

    let error = service(repo)
        .save_row_order(&editor)
        .await
        .expect_err("duplicate positions");
    assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn delete_row_order_removes_only_the_target() {
    let keep = SavedRowOrder {
        id: Uuid::new_v4(),
        label: "Keep".to_owned(),
        codes: Vec::new(),
    };
    let drop_id = Uuid::new_v4();
    let stored = BoardPreferences {
        saved_orders: vec![
            keep.clone(),
            SavedRowOrder {
                id: drop_id,
                label: "Drop".to_owned(),
                codes: Vec::new(),
            },
        ],
        pinned_route_ids: Vec::new(),
    };

    let mut repo = MockPreferencesRepository::new();
    let loaded = stored.clone();
    repo.expect_load().times(1).return_once(move || Ok(loaded));
    repo.expect_save()
        .withf(move |prefs| prefs.saved_orders == [keep.clone()])
        .times(1)
        .returning(|_| Ok(()));

    service(repo)
        .delete_row_order(drop_id)
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn pin_route_is_idempotent() {
    let route_id = Uuid::new_v4();
    let already_pinned = BoardPreferences {
        saved_orders: Vec::new(),
        pinned_route_ids: vec![route_id],
    };

    let mut repo = MockPreferencesRepository::new();
    repo.expect_load()
        .times(1)
        .return_once(move || Ok(already_pinned));
    repo.expect_save().times(0);

    service(repo).pin_route(route_id).await.expect("no-op pin");
}

#[rstest]
#[tokio::test]
async fn unpin_route_drops_the_id() {
    let route_id = Uuid::new_v4();
    let pinned = BoardPreferences {
        saved_orders: Vec::new(),
        pinned_route_ids: vec![route_id],
    };

    let mut repo = MockPreferencesRepository::new();
    repo.expect_load().times(1).return_once(move || Ok(pinned));
    repo.expect_save()
        .withf(|prefs| prefs.pinned_route_ids.is_empty())
        .times(1)
        .returning(|_| Ok(()));

    service(repo)
        .unpin_route(route_id)
        .await
        .expect("unpin succeeds");
}
