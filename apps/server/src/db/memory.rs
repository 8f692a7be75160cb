//! Process-local `ShipStore` used for development and tests

use async_trait::async_trait;
use parking_lot::RwLock;
use std::{cmp::Ordering, collections::BTreeMap, sync::Arc};

use crate::{
    db::traits::ShipStore,
    models::{NewShip, Ship, ShipId},
    search::{PageRequest, ShipField, ShipFilter, ShipOrder},
    Result,
};

#[derive(Debug)]
struct MemoryData {
    ships: BTreeMap<i64, Ship>,
    next_id: i64,
}

impl Default for MemoryData {
    fn default() -> Self {
        Self {
            ships: BTreeMap::new(),
            next_id: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryShipStore {
    data: Arc<RwLock<MemoryData>>,
}

impl InMemoryShipStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Ship, b: &Ship, order: ShipOrder) -> Ordering {
    let primary = match order.field() {
        ShipField::Speed => a.speed.total_cmp(&b.speed),
        ShipField::ProdDate => a.prod_date.cmp(&b.prod_date),
        ShipField::Rating => a.rating.total_cmp(&b.rating),
        _ => Ordering::Equal,
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl ShipStore for InMemoryShipStore {
    async fn find(&self, filter: &ShipFilter, page: Option<&PageRequest>) -> Result<Vec<Ship>> {
        let data = self.data.read();
        // BTreeMap iteration is already id-ascending.
        let mut matched: Vec<Ship> = data
            .ships
            .values()
            .filter(|ship| filter.matches(ship))
            .cloned()
            .collect();
        drop(data);

        let Some(page) = page else {
            return Ok(matched);
        };

        matched.sort_by(|a, b| compare(a, b, page.order));

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(page.size).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(offset).take(size).collect())
    }

    async fn count(&self, filter: &ShipFilter) -> Result<u64> {
        let data = self.data.read();
        Ok(data.ships.values().filter(|ship| filter.matches(ship)).count() as u64)
    }

    async fn find_by_id(&self, id: ShipId) -> Result<Option<Ship>> {
        Ok(self.data.read().ships.get(&id.get()).cloned())
    }

    async fn insert(&self, ship: NewShip) -> Result<Ship> {
        let mut data = self.data.write();
        let id = data.next_id;
        data.next_id += 1;
        let ship = ship.into_ship(id);
        data.ships.insert(id, ship.clone());
        Ok(ship)
    }

    async fn update(&self, ship: &Ship) -> Result<Option<Ship>> {
        let mut data = self.data.write();
        match data.ships.get_mut(&ship.id) {
            Some(stored) => {
                *stored = ship.clone();
                Ok(Some(ship.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: ShipId) -> Result<bool> {
        Ok(self.data.write().ships.remove(&id.get()).is_some())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
