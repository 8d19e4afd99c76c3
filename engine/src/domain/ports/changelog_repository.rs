//! Port for appending human-readable changelog entries.

use async_trait::async_trait;
use uuid::Uuid;

/// Errors raised by changelog adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangelogRepositoryError {
    /// The entry could not be recorded.
    #[error("changelog write failed: {message}")]
    Write { message: String },
}

impl ChangelogRepositoryError {
    /// Builds a [`Self::Write`] error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Port for recording one change line against a route.
///
/// The changelog is best-effort: callers log and swallow failures rather
/// than letting them block or roll back a successful save.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangelogRepository: Send + Sync {
    /// Record one human-readable change line against a route.
    async fn append(&self, route_id: Uuid, entry: &str) -> Result<(), ChangelogRepositoryError>;
}

/// Fixture implementation for tests that ignore the changelog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureChangelogRepository;

#[async_trait]
impl ChangelogRepository for FixtureChangelogRepository {
    async fn append(&self, _route_id: Uuid, _entry: &str) -> Result<(), ChangelogRepositoryError> {
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
    async fn fixture_append_succeeds() {
        let repo = FixtureChangelogRepository;
        repo.append(Uuid::new_v4(), "Name changed: A → B")
            .await
            .expect("fixture append succeeds");
    }

    #[rstest]
    fn write_error_formats_message() {
        let err = ChangelogRepositoryError::write("disk full");
        assert!(err.to_string().contains("disk full"));
    }
}
