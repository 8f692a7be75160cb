//! Write payload shared by create and partial update
//!
//! Every field is optional. Range rules apply to whichever fields are present, so the
//! same type validates a full create body and a sparse update body.

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{
    models::{
        rating::{derive_rating, MAX_PROD_YEAR, MIN_PROD_YEAR},
        NewShip, Ship, ShipType,
    },
    Error, Result,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShipPatch {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    #[validate(custom(function = "validate_prod_year"))]
    pub prod_date: Option<DateTime<Utc>>,
    pub is_used: Option<bool>,
    #[validate(range(min = 0.01, max = 0.99, message = "must be within [0.01, 0.99]"))]
    pub speed: Option<f64>,
    #[validate(range(min = 1, max = 9999, message = "must be within [1, 9999]"))]
    pub crew_size: Option<i32>,
}

fn validate_prod_year(prod_date: &DateTime<Utc>) -> std::result::Result<(), ValidationError> {
    if (MIN_PROD_YEAR..=MAX_PROD_YEAR).contains(&prod_date.year()) {
        return Ok(());
    }
    let mut error = ValidationError::new("prod_year");
    error.message = Some(format!("year must be within [{MIN_PROD_YEAR}, {MAX_PROD_YEAR}]").into());
    Err(error)
}

/// Overwrite each target field with the patch value when one was supplied.
macro_rules! apply_present {
    ($patch:expr, $target:expr, [$($field:ident),+ $(,)?]) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

impl ShipPatch {
    pub fn is_empty(&self) -> bool {
        *self == ShipPatch::default()
    }

    /// Names of the fields a create body must carry but this patch lacks.
    fn missing_for_create(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.planet.is_none() {
            missing.push("planet");
        }
        if self.ship_type.is_none() {
            missing.push("shipType");
        }
        if self.prod_date.is_none() {
            missing.push("prodDate");
        }
        if self.speed.is_none() {
            missing.push("speed");
        }
        if self.crew_size.is_none() {
            missing.push("crewSize");
        }
        missing
    }

    /// Turn a create body into a validated ship with its rating derived.
    ///
    /// Fails if any required field is absent or any present field is out of range.
    /// `isUsed` defaults to `false`.
    pub fn into_new_ship(self) -> Result<NewShip> {
        let missing = self.missing_for_create();
        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        self.validate()?;

        let (
            Some(name),
            Some(planet),
            Some(ship_type),
            Some(prod_date),
            Some(speed),
            Some(crew_size),
        ) = (
            self.name,
            self.planet,
            self.ship_type,
            self.prod_date,
            self.speed,
            self.crew_size,
        )
        else {
            return Err(Error::Internal(
                "required ship fields vanished after presence check".to_string(),
            ));
        };
        let is_used = self.is_used.unwrap_or(false);

        Ok(NewShip {
            rating: derive_rating(speed, is_used, prod_date.year()),
            name,
            planet,
            ship_type,
            prod_date,
            is_used,
            speed,
            crew_size,
        })
    }

    /// Merge the supplied fields into `ship` and re-derive its rating.
    ///
    /// The caller is expected to have validated the patch already.
    pub fn apply_to(self, ship: &mut Ship) {
        apply_present!(
            self,
            ship,
            [name, planet, ship_type, prod_date, is_used, speed, crew_size]
        );
        ship.refresh_rating();
    }
}
