//! Domain model and services of the delivery-point list engine.
//!
//! Purpose: everything between the board's views and its collaborators.
//! Entities, orderings, distances, the edit-session state machine, the
//! changelog differ, and the ports the engine talks through. Keep types
//! validated at construction and document invariants in each type's
//! Rustdoc.
//!
//! Public surface, leaves first:
//! - [`points`]: routes, delivery points, schedules, saved orders.
//! - [`distance`]: haversine math and Km-column annotation.
//! - [`ordering`]: row orderings, the active-today partition, and the
//!   row-position editor.
//! - [`session`]: edit-session lifecycle and its manager.
//! - [`changelog`]: before/after diffing into human-readable entries.
//! - [`ports`]: collaborator traits, fixtures, and mocks.

pub mod changelog;
pub mod distance;
pub mod error;
pub mod ordering;
pub mod points;
pub mod ports;
pub mod preferences_service;
pub mod session;

pub use self::changelog::{RouteChanges, diff_routes};
pub use self::error::{EngineError, ErrorCode};
pub use self::preferences_service::BoardPreferencesService;
pub use self::session::{EditSession, EditSessionManager};

/// Convenient engine result alias.
pub type EngineResult<T> = Result<T, EngineError>;
