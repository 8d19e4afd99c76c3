//! In-memory adapters for demos and integration tests.
//!
//! These back the same ports the real dashboard wires to its HTTP/SQL
//! layer, with injectable failures so retry behaviour can be exercised
//! without a broken backend.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::points::{BoardPreferences, Route};
use crate::domain::ports::{
    ChangelogRepository, ChangelogRepositoryError, PreferencesRepository,
    PreferencesRepositoryError, RouteRepository, RouteRepositoryError,
};

/// Route repository holding the collection in memory.
#[derive(Debug, Default)]
pub struct InMemoryRouteRepository {
    routes: Mutex<Vec<Route>>,
    fail_next_save: AtomicBool,
}

impl InMemoryRouteRepository {
    /// Creates a repository seeded with an initial collection.
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes: Mutex::new(routes),
            fail_next_save: AtomicBool::new(false),
        }
    }

    /// Makes the next `save_routes` call fail once.
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    /// Returns a copy of the stored collection for assertions.
    pub fn stored(&self) -> Result<Vec<Route>, RouteRepositoryError> {
        Ok(self
            .routes
            .lock()
            .map_err(|_| RouteRepositoryError::connection("route store mutex poisoned"))?
            .clone())
    }
}

#[async_trait]
impl RouteRepository for InMemoryRouteRepository {
    async fn load_routes(&self) -> Result<Vec<Route>, RouteRepositoryError> {
        self.stored()
    }

    async fn save_routes(&self, routes: &[Route]) -> Result<(), RouteRepositoryError> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(RouteRepositoryError::query("injected save failure"));
        }
        let mut stored = self
            .routes
            .lock()
            .map_err(|_| RouteRepositoryError::connection("route store mutex poisoned"))?;
        *stored = routes.to_vec();
        Ok(())
    }
}

/// Changelog adapter capturing every appended entry.
#[derive(Debug, Default)]
pub struct RecordingChangelog {
    entries: Mutex<Vec<(Uuid, String)>>,
    fail_appends: AtomicBool,
}

impl RecordingChangelog {
    /// Creates an empty recording changelog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent append fail.
    pub fn fail_appends(&self) {
        self.fail_appends.store(true, Ordering::SeqCst);
    }

    /// Returns the entries recorded against one route, in append order.
    pub fn entries_for(&self, route_id: Uuid) -> Result<Vec<String>, ChangelogRepositoryError> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| ChangelogRepositoryError::write("changelog mutex poisoned"))?
            .iter()
            .filter(|(id, _)| *id == route_id)
            .map(|(_, entry)| entry.clone())
            .collect())
    }
}

#[async_trait]
impl ChangelogRepository for RecordingChangelog {
    async fn append(&self, route_id: Uuid, entry: &str) -> Result<(), ChangelogRepositoryError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(ChangelogRepositoryError::write("injected append failure"));
        }
        self.entries
            .lock()
            .map_err(|_| ChangelogRepositoryError::write("changelog mutex poisoned"))?
            .push((route_id, entry.to_owned()));
        Ok(())
    }
}

/// Preference store holding the bundle in memory.
#[derive(Debug, Default)]
pub struct InMemoryPreferencesRepository {
    preferences: Mutex<BoardPreferences>,
}

#[async_trait]
impl PreferencesRepository for InMemoryPreferencesRepository {
    async fn load(&self) -> Result<BoardPreferences, PreferencesRepositoryError> {
        Ok(self
            .preferences
            .lock()
            .map_err(|_| PreferencesRepositoryError::storage("preference mutex poisoned"))?
            .clone())
    }

    async fn save(&self, preferences: &BoardPreferences) -> Result<(), PreferencesRepositoryError> {
        let mut stored = self
            .preferences
            .lock()
            .map_err(|_| PreferencesRepositoryError::storage("preference mutex poisoned"))?;
        *stored = preferences.clone();
        Ok(())
    }
}
