pub mod ships;

pub use ships::ship_routes;
