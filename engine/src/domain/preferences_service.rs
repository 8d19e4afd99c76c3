//! Board preference services: saved row orders and pinned routes.
//!
//! The preference bundle lives in local storage behind the preferences
//! port; this service owns the read-modify-write cycle so callers never
//! hand-edit the persisted document.

use std::sync::Arc;

use mockable::Clock;
use uuid::Uuid;

use crate::domain::error::EngineError;
use crate::domain::ordering::RowPositionEditor;
use crate::domain::points::{BoardPreferences, SavedRowOrder};
use crate::domain::ports::{PreferencesRepository, PreferencesRepositoryError};

fn map_preferences_error(error: PreferencesRepositoryError) -> EngineError {
    match error {
        PreferencesRepositoryError::Storage { message } => {
            EngineError::service_unavailable(format!("preference store unavailable: {message}"))
        }
    }
}

/// Service for reading and mutating the local preference bundle.
#[derive(Clone)]
pub struct BoardPreferencesService<P> {
    preferences_repo: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> BoardPreferencesService<P> {
    /// Create a new service with the preferences repository.
    pub fn new(preferences_repo: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            preferences_repo,
            clock,
        }
    }
}

impl<P> BoardPreferencesService<P>
where
    P: PreferencesRepository,
{
    /// Loads the current preference bundle.
    pub async fn load(&self) -> Result<BoardPreferences, EngineError> {
        self.preferences_repo
            .load()
            .await
            .map_err(map_preferences_error)
    }

    /// Validates the position editor and persists a new saved order.
    ///
    /// Gaps between positions are tolerated; duplicates and blanks are
    /// rejected before anything is written.
    pub async fn save_row_order(
        &self,
        editor: &RowPositionEditor,
    ) -> Result<SavedRowOrder, EngineError> {
        let today = self.clock.utc().date_naive();
        let order = editor
            .save_order(today)
            .map_err(|err| EngineError::invalid_request(err.to_string()))?;

        let mut preferences = self.load().await?;
        preferences.saved_orders.push(order.clone());
        self.preferences_repo
            .save(&preferences)
            .await
            .map_err(map_preferences_error)?;
        Ok(order)
    }

    /// Deletes a saved order by id. Unknown ids are a no-op.
    pub async fn delete_row_order(&self, order_id: Uuid) -> Result<(), EngineError> {
        let mut preferences = self.load().await?;
        preferences.saved_orders.retain(|order| order.id != order_id);
        self.preferences_repo
            .save(&preferences)
            .await
            .map_err(map_preferences_error)
    }

    /// Pins a route to the top of the route list.
    pub async fn pin_route(&self, route_id: Uuid) -> Result<(), EngineError> {
        let mut preferences = self.load().await?;
        if !preferences.pinned_route_ids.contains(&route_id) {
            preferences.pinned_route_ids.push(route_id);
            self.preferences_repo
                .save(&preferences)
                .await
                .map_err(map_preferences_error)?;
        }
        Ok(())
    }

    /// Unpins a route. Unknown ids are a no-op.
    pub async fn unpin_route(&self, route_id: Uuid) -> Result<(), EngineError> {
        let mut preferences = self.load().await?;
        preferences.pinned_route_ids.retain(|id| *id != route_id);
        self.preferences_repo
            .save(&preferences)
            .await
            .map_err(map_preferences_error)
    }
}

#[cfg(test)]
#[path = "preferences_service_tests.rs"]
mod tests;
