//! Single-field predicates over ships
//!
//! A predicate is plain data. The in-memory store evaluates it with
//! [`Predicate::matches`]; the PostgreSQL store renders it into a parameterized
//! `WHERE` fragment. Both readings must agree.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::models::{Ship, ShipType};

/// Filterable and sortable ship attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipField {
    Id,
    Name,
    Planet,
    ShipType,
    ProdDate,
    IsUsed,
    Speed,
    CrewSize,
    Rating,
}

impl ShipField {
    pub fn value_of(self, ship: &Ship) -> Operand {
        match self {
            ShipField::Id => Operand::Integer(ship.id),
            ShipField::Name => Operand::Text(ship.name.clone()),
            ShipField::Planet => Operand::Text(ship.planet.clone()),
            ShipField::ShipType => Operand::ShipType(ship.ship_type),
            ShipField::ProdDate => Operand::Timestamp(ship.prod_date),
            ShipField::IsUsed => Operand::Flag(ship.is_used),
            ShipField::Speed => Operand::Decimal(ship.speed),
            ShipField::CrewSize => Operand::Integer(i64::from(ship.crew_size)),
            ShipField::Rating => Operand::Decimal(ship.rating),
        }
    }
}

/// A typed comparison value.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Text(String),
    ShipType(ShipType),
    Timestamp(DateTime<Utc>),
    Flag(bool),
    Decimal(f64),
    Integer(i64),
}

impl PartialOrd for Operand {
    /// Only operands of the same kind are ordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Operand::Text(a), Operand::Text(b)) => a.partial_cmp(b),
            (Operand::Timestamp(a), Operand::Timestamp(b)) => a.partial_cmp(b),
            (Operand::Flag(a), Operand::Flag(b)) => a.partial_cmp(b),
            (Operand::Decimal(a), Operand::Decimal(b)) => a.partial_cmp(b),
            (Operand::Integer(a), Operand::Integer(b)) => a.partial_cmp(b),
            (Operand::ShipType(a), Operand::ShipType(b)) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-sensitive substring match on a text field.
    Contains { field: ShipField, needle: String },
    Equals { field: ShipField, value: Operand },
    /// Inclusive on both ends.
    Between {
        field: ShipField,
        min: Operand,
        max: Operand,
    },
    AtLeast { field: ShipField, min: Operand },
    AtMost { field: ShipField, max: Operand },
}

impl Predicate {
    /// Inclusive range from an optional pair of bounds.
    ///
    /// Returns `None` when both bounds are absent so that the caller adds no predicate.
    pub fn range(field: ShipField, min: Option<Operand>, max: Option<Operand>) -> Option<Self> {
        match (min, max) {
            (None, None) => None,
            (Some(min), None) => Some(Predicate::AtLeast { field, min }),
            (None, Some(max)) => Some(Predicate::AtMost { field, max }),
            (Some(min), Some(max)) => Some(Predicate::Between { field, min, max }),
        }
    }

    pub fn field(&self) -> ShipField {
        match self {
            Predicate::Contains { field, .. }
            | Predicate::Equals { field, .. }
            | Predicate::Between { field, .. }
            | Predicate::AtLeast { field, .. }
            | Predicate::AtMost { field, .. } => *field,
        }
    }

    pub fn matches(&self, ship: &Ship) -> bool {
        let actual = self.field().value_of(ship);
        match self {
            Predicate::Contains { needle, .. } => match &actual {
                Operand::Text(text) => text.contains(needle.as_str()),
                _ => false,
            },
            Predicate::Equals { value, .. } => actual == *value,
            Predicate::Between { min, max, .. } => actual >= *min && actual <= *max,
            Predicate::AtLeast { min, .. } => actual >= *min,
            Predicate::AtMost { max, .. } => actual <= *max,
        }
    }
}
