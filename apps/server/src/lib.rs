//! Shipyard - filtered CRUD service for the ship registry
//!
//! The crate is split the same way requests flow through it:
//!
//! - [`search`] turns optional query parameters into a conjunction of predicates
//! - [`models`] holds the ship entity, its validation rules and the rating derivation
//! - [`services`] orchestrates list/count/CRUD over a [`db::ShipStore`]
//! - [`api`] exposes the services over HTTP

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod search;
pub mod services;
pub mod state;

pub use error::{Error, Result};
