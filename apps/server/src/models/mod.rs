//! Ship entity, write payloads and derived fields

pub mod patch;
pub mod rating;
pub mod ship;

pub use patch::ShipPatch;
pub use rating::{derive_rating, MAX_PROD_YEAR, MIN_PROD_YEAR};
pub use ship::{NewShip, Ship, ShipId, ShipType};
