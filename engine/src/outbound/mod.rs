//! Outbound adapters implementing the domain ports.
//!
//! `memory` covers demos and tests; `persistence` holds the file-backed
//! preference store. The dashboard's HTTP/SQL adapters live outside this
//! crate and implement the same ports.

pub mod memory;
pub mod persistence;

pub use memory::{InMemoryPreferencesRepository, InMemoryRouteRepository, RecordingChangelog};
pub use persistence::JsonPreferencesStore;
