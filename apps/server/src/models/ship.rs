use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{models::rating::derive_rating, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    Transport,
    Military,
    Merchant,
}

impl ShipType {
    pub const ALL: [ShipType; 3] = [ShipType::Transport, ShipType::Military, ShipType::Merchant];

    pub fn as_str(self) -> &'static str {
        match self {
            ShipType::Transport => "TRANSPORT",
            ShipType::Military => "MILITARY",
            ShipType::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ShipType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("unknown ship type '{s}'")))
    }
}

/// Identifier of a persisted ship. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShipId(i64);

impl ShipId {
    pub fn new(id: i64) -> Result<Self> {
        if id < 1 {
            return Err(Error::InvalidIdentifier(id.to_string()));
        }
        Ok(Self(id))
    }

    /// Parse a raw path segment. Non-numeric and non-positive values are rejected alike.
    pub fn parse(raw: &str) -> Result<Self> {
        let id: i64 = raw
            .trim()
            .parse()
            .map_err(|_| Error::InvalidIdentifier(raw.to_string()))?;
        Self::new(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted ship as returned to clients.
///
/// `prod_date` travels as epoch milliseconds on the wire. `rating` is derived from
/// `speed`, `is_used` and the production year and is never taken from client input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub id: i64,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub prod_date: DateTime<Utc>,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

impl Ship {
    pub fn prod_year(&self) -> i32 {
        self.prod_date.year()
    }

    /// Recompute `rating` from the current state.
    pub fn refresh_rating(&mut self) {
        self.rating = derive_rating(self.speed, self.is_used, self.prod_year());
    }
}

/// A validated ship that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShip {
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    pub prod_date: DateTime<Utc>,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

impl NewShip {
    pub fn into_ship(self, id: i64) -> Ship {
        Ship {
            id,
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating: self.rating,
        }
    }
}
