//! Error types for the example-data crate.
//!
//! This module defines semantic error enums for route generation,
//! following the project's error handling conventions with `thiserror`.

use thiserror::Error;

/// Errors that can occur during route generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// At least one route must be requested.
    #[error("route generation requires at least one route")]
    NoRoutesRequested,

    /// The requested board size exceeds the available code space.
    #[error("requested {requested} delivery points, but only {available} codes are available")]
    CodeSpaceExhausted {
        /// Number of delivery points requested across all routes.
        requested: usize,
        /// Number of distinct codes the generator can hand out.
        available: usize,
    },
}
