pub mod health;
pub mod ships;
