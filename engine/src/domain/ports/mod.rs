//! Domain ports and supporting types for the engine boundary.
//!
//! Every collaborator the engine touches (the route store, the
//! changelog, the local preference bundle) sits behind one of these
//! traits. Adapters live in `crate::outbound`; fixtures and mocks live
//! here so tests never need a real backing service.

mod changelog_repository;
mod preferences_repository;
mod route_repository;

#[cfg(test)]
pub use changelog_repository::MockChangelogRepository;
pub use changelog_repository::{
    ChangelogRepository, ChangelogRepositoryError, FixtureChangelogRepository,
};
#[cfg(test)]
pub use preferences_repository::MockPreferencesRepository;
pub use preferences_repository::{
    FixturePreferencesRepository, PreferencesRepository, PreferencesRepositoryError,
};
#[cfg(test)]
pub use route_repository::MockRouteRepository;
pub use route_repository::{FixtureRouteRepository, RouteRepository, RouteRepositoryError};
