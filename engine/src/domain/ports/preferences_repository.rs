//! Port for the locally persisted preference bundle.

use async_trait::async_trait;

use crate::domain::points::BoardPreferences;

/// Errors raised by preference store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferencesRepositoryError {
    /// The preference document could not be read or written.
    #[error("preference storage failed: {message}")]
    Storage { message: String },
}

impl PreferencesRepositoryError {
    /// Builds a [`Self::Storage`] error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Port for loading and saving the local preference bundle.
///
/// Preferences are scoped to the installation and persist independently
/// of the route collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Load the preference bundle, defaulting when none exists yet.
    async fn load(&self) -> Result<BoardPreferences, PreferencesRepositoryError>;

    /// Replace the preference bundle.
    async fn save(&self, preferences: &BoardPreferences) -> Result<(), PreferencesRepositoryError>;
}

/// Fixture implementation for tests that ignore preferences.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePreferencesRepository;

#[async_trait]
impl PreferencesRepository for FixturePreferencesRepository {
    async fn load(&self) -> Result<BoardPreferences, PreferencesRepositoryError> {
        Ok(BoardPreferences::default())
    }

    async fn save(
        &self,
        _preferences: &BoardPreferences,
    ) -> Result<(), PreferencesRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_load_returns_defaults() {
        let repo = FixturePreferencesRepository;
        let prefs = repo.load().await.expect("fixture load succeeds");
        assert_eq!(prefs, BoardPreferences::default());
    }

    #[rstest]
    fn storage_error_formats_message() {
        let err = PreferencesRepositoryError::storage("file locked");
        assert!(err.to_string().contains("file locked"));
    }
}
