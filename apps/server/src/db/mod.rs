//! Ship persistence

pub mod memory;
pub mod store;
pub mod traits;

pub use memory::InMemoryShipStore;
pub use store::PostgresShipStore;
pub use traits::ShipStore;
