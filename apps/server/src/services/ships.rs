//! Ship service - business rules for listing, counting and mutating ships

use std::sync::Arc;

use crate::{
    config::ShipsConfig,
    db::ShipStore,
    models::{Ship, ShipId, ShipPatch},
    search::{ShipFilter, ShipSearchParams},
    Error, Result,
};

pub struct ShipService {
    store: Arc<dyn ShipStore>,
    paging: ShipsConfig,
}

impl ShipService {
    pub fn new(store: Arc<dyn ShipStore>, paging: ShipsConfig) -> Self {
        Self { store, paging }
    }

    /// Filtered, sorted page of ships.
    pub async fn list(&self, params: &ShipSearchParams) -> Result<Vec<Ship>> {
        let page = params.page_request(&self.paging)?;
        let filter = ShipFilter::from_params(params)?;

        let ships = self.store.find(&filter, Some(&page)).await?;

        tracing::debug!(
            predicates = filter.len(),
            page_number = page.number,
            page_size = page.size,
            order = ?page.order,
            returned = ships.len(),
            "Listed ships"
        );
        Ok(ships)
    }

    /// Number of ships matching the filter parameters. Paging fields are ignored.
    pub async fn count(&self, params: &ShipSearchParams) -> Result<u64> {
        let filter = ShipFilter::from_params(params)?;
        let total = self.store.count(&filter).await?;

        tracing::debug!(predicates = filter.len(), total, "Counted ships");
        Ok(total)
    }

    pub async fn get(&self, id: ShipId) -> Result<Ship> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(Error::ShipNotFound { id: id.get() })
    }

    /// Validate a full create body, derive its rating and persist it.
    pub async fn create(&self, patch: ShipPatch) -> Result<Ship> {
        let new_ship = patch.into_new_ship()?;
        let ship = self.store.insert(new_ship).await?;

        tracing::info!(ship_id = ship.id, rating = ship.rating, "Ship created");
        Ok(ship)
    }

    /// Merge the supplied fields into the stored ship and re-derive its rating.
    pub async fn update(&self, id: ShipId, patch: ShipPatch) -> Result<Ship> {
        // Reject bad input before touching the store.
        validator::Validate::validate(&patch)?;

        let mut ship = self.get(id).await?;
        let fields_supplied = !patch.is_empty();
        patch.apply_to(&mut ship);

        let updated = self
            .store
            .update(&ship)
            .await?
            .ok_or(Error::ShipNotFound { id: id.get() })?;

        tracing::info!(
            ship_id = updated.id,
            fields_supplied,
            rating = updated.rating,
            "Ship updated"
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: ShipId) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(Error::ShipNotFound { id: id.get() });
        }

        tracing::info!(ship_id = id.get(), "Ship deleted");
        Ok(())
    }

    /// Succeeds when the backing store answers.
    pub async fn health(&self) -> Result<()> {
        self.store.ping().await
    }
}
