//! Business logic layer
//!
//! Services apply entity rules and coordinate the store behind the HTTP handlers.

pub mod ships;

pub use ships::ShipService;
