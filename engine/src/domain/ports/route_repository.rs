//! Port for route collection persistence.

use async_trait::async_trait;

use crate::domain::points::Route;

/// Errors raised by route repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteRepositoryError {
    /// Repository connection could not be established.
    #[error("route repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("route repository query failed: {message}")]
    Query { message: String },
}

impl RouteRepositoryError {
    /// Builds a [`Self::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Builds a [`Self::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for loading and replacing the full route collection.
///
/// `save_routes` replaces the collection as one logical transaction from
/// the engine's point of view, whatever the adapter does underneath.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Fetch the full route collection.
    async fn load_routes(&self) -> Result<Vec<Route>, RouteRepositoryError>;

    /// Replace the full route collection.
    async fn save_routes(&self, routes: &[Route]) -> Result<(), RouteRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRouteRepository;

#[async_trait]
impl RouteRepository for FixtureRouteRepository {
    async fn load_routes(&self) -> Result<Vec<Route>, RouteRepositoryError> {
        Ok(Vec::new())
    }

    async fn save_routes(&self, _routes: &[Route]) -> Result<(), RouteRepositoryError> {
        Ok(())
    }
}
