//! Shared DTOs for the shipment translation API.
//!
//! Everything that crosses the HTTP boundary lives here so the wire shape
//! stays in one place. Field names are the Spanish ones the consumers of
//! this API already depend on.

pub mod api;
pub mod sync;
