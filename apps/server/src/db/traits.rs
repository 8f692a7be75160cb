use async_trait::async_trait;

use crate::{
    models::{NewShip, Ship, ShipId},
    search::{PageRequest, ShipFilter},
    Result,
};

/// Persistence seam for ships.
///
/// `find` and `count` take the same [`ShipFilter`] so a list and its count always
/// agree on which records match.
#[async_trait]
pub trait ShipStore: Send + Sync {
    /// Matching ships, sorted and paged by `page`. `None` returns every match ordered by id.
    async fn find(&self, filter: &ShipFilter, page: Option<&PageRequest>) -> Result<Vec<Ship>>;

    async fn count(&self, filter: &ShipFilter) -> Result<u64>;

    async fn find_by_id(&self, id: ShipId) -> Result<Option<Ship>>;

    /// Persist a new ship and return it with its assigned id.
    async fn insert(&self, ship: NewShip) -> Result<Ship>;

    /// Overwrite the stored row for `ship.id`. `None` if the row no longer exists.
    async fn update(&self, ship: &Ship) -> Result<Option<Ship>>;

    /// `true` if a row was removed.
    async fn delete(&self, id: ShipId) -> Result<bool>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<()>;
}
