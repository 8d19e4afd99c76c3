//! Delivery-point list engine for the delivery-operations board.
//!
//! The route-management view of the board embeds an editable table of
//! delivery points. This crate is that table's engine: row orderings and
//! distance annotation, an edit session with snapshot/discard/commit
//! semantics, and a before/after differ that turns every save into a
//! human-readable changelog. Transport and storage stay behind the ports
//! in [`domain::ports`].

pub mod domain;
pub mod outbound;
pub mod settings;

pub use settings::BoardSettings;
