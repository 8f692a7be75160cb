//! Composition of optional per-field predicates into one ship filter
//!
//! Each builder below returns `None` when its inputs are absent, so an omitted query
//! parameter adds nothing to the conjunction rather than a vacuous "true" clause.

use crate::{
    models::{Ship, ShipType},
    search::{
        dates::{year_end, year_start},
        Operand, Predicate, ShipField, ShipSearchParams,
    },
    Error, Result,
};

pub fn name_contains(name: Option<&str>) -> Option<Predicate> {
    name.map(|needle| Predicate::Contains {
        field: ShipField::Name,
        needle: needle.to_string(),
    })
}

pub fn planet_contains(planet: Option<&str>) -> Option<Predicate> {
    planet.map(|needle| Predicate::Contains {
        field: ShipField::Planet,
        needle: needle.to_string(),
    })
}

pub fn ship_type_is(ship_type: Option<ShipType>) -> Option<Predicate> {
    ship_type.map(|t| Predicate::Equals {
        field: ShipField::ShipType,
        value: Operand::ShipType(t),
    })
}

/// Production date window. `after` and `before` widen to their year boundaries.
pub fn produced_between(after: Option<i64>, before: Option<i64>) -> Result<Option<Predicate>> {
    let min = after.map(year_start).transpose()?.map(Operand::Timestamp);
    let max = before.map(year_end).transpose()?.map(Operand::Timestamp);
    Ok(Predicate::range(ShipField::ProdDate, min, max))
}

pub fn used_is(is_used: Option<bool>) -> Option<Predicate> {
    is_used.map(|flag| Predicate::Equals {
        field: ShipField::IsUsed,
        value: Operand::Flag(flag),
    })
}

pub fn speed_between(min: Option<f64>, max: Option<f64>) -> Option<Predicate> {
    Predicate::range(
        ShipField::Speed,
        min.map(Operand::Decimal),
        max.map(Operand::Decimal),
    )
}

pub fn crew_size_between(min: Option<i32>, max: Option<i32>) -> Option<Predicate> {
    Predicate::range(
        ShipField::CrewSize,
        min.map(|v| Operand::Integer(i64::from(v))),
        max.map(|v| Operand::Integer(i64::from(v))),
    )
}

pub fn rating_between(min: Option<f64>, max: Option<f64>) -> Option<Predicate> {
    Predicate::range(
        ShipField::Rating,
        min.map(Operand::Decimal),
        max.map(Operand::Decimal),
    )
}

/// Conjunction of predicates. An empty filter matches every ship.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipFilter {
    predicates: Vec<Predicate>,
}

impl ShipFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate if there is one.
    pub fn and(mut self, predicate: Option<Predicate>) -> Self {
        self.predicates.extend(predicate);
        self
    }

    /// Build the filter for a list or count request.
    pub fn from_params(params: &ShipSearchParams) -> Result<Self> {
        Ok(Self::new()
            .and(name_contains(params.name.as_deref()))
            .and(planet_contains(params.planet.as_deref()))
            .and(ship_type_is(params.ship_type))
            .and(produced_between(params.after, params.before)?)
            .and(used_is(params.is_used))
            .and(speed_between(
                finite("minSpeed", params.min_speed)?,
                finite("maxSpeed", params.max_speed)?,
            ))
            .and(crew_size_between(
                params.min_crew_size,
                params.max_crew_size,
            ))
            .and(rating_between(
                finite("minRating", params.min_rating)?,
                finite("maxRating", params.max_rating)?,
            )))
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn matches(&self, ship: &Ship) -> bool {
        self.predicates.iter().all(|p| p.matches(ship))
    }
}

/// NaN and infinities have no consistent ordering across stores.
fn finite(param: &str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(Error::Validation(format!(
            "{param} must be a finite number"
        ))),
        other => Ok(other),
    }
}
