//! Query-string parameters for listing and counting ships

use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};

use crate::{config::ShipsConfig, models::ShipType, search::ShipField, Error, Result};

/// Sort keys accepted by the `order` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipOrder {
    #[default]
    Id,
    Speed,
    Date,
    Rating,
}

impl ShipOrder {
    pub fn field(self) -> ShipField {
        match self {
            ShipOrder::Id => ShipField::Id,
            ShipOrder::Speed => ShipField::Speed,
            ShipOrder::Date => ShipField::ProdDate,
            ShipOrder::Rating => ShipField::Rating,
        }
    }
}

/// Every parameter of `GET /ships` and `GET /ships/count`.
///
/// The count endpoint accepts the paging fields too and ignores them. A scalar
/// parameter given with an empty value (`?minSpeed=`) counts as absent.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipSearchParams {
    pub order: Option<ShipOrder>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub page_number: Option<i64>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub page_size: Option<i64>,

    pub name: Option<String>,
    pub planet: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub ship_type: Option<ShipType>,
    /// Epoch milliseconds; only the year is significant.
    #[serde_as(as = "NoneAsEmptyString")]
    pub after: Option<i64>,
    /// Epoch milliseconds; only the year is significant.
    #[serde_as(as = "NoneAsEmptyString")]
    pub before: Option<i64>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub is_used: Option<bool>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub min_speed: Option<f64>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub max_speed: Option<f64>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub min_crew_size: Option<i32>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub max_crew_size: Option<i32>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub min_rating: Option<f64>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub max_rating: Option<f64>,
}

/// Resolved paging and ordering for a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub number: u64,
    pub size: u64,
    pub order: ShipOrder,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        self.number.saturating_mul(self.size)
    }
}

impl ShipSearchParams {
    pub fn page_request(&self, limits: &ShipsConfig) -> Result<PageRequest> {
        let number = self.page_number.unwrap_or(0);
        if number < 0 {
            return Err(Error::Validation(format!(
                "pageNumber must not be negative (got {number})"
            )));
        }

        let size = self
            .page_size
            .unwrap_or(i64::from(limits.default_page_size));
        if size < 1 {
            return Err(Error::Validation(format!(
                "pageSize must be at least 1 (got {size})"
            )));
        }
        if let Some(max) = limits.max_page_size {
            if size > i64::from(max) {
                return Err(Error::Validation(format!(
                    "pageSize must not exceed {max} (got {size})"
                )));
            }
        }

        Ok(PageRequest {
            number: number as u64,
            size: size as u64,
            order: self.order.unwrap_or_default(),
        })
    }
}
