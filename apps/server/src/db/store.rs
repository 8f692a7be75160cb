//! PostgreSQL-backed `ShipStore` implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    db::traits::ShipStore,
    models::{NewShip, Ship, ShipId},
    search::{Operand, PageRequest, Predicate, ShipField, ShipFilter, ShipOrder},
    Error, Result,
};

const SHIP_COLUMNS: &str =
    "id, name, planet, ship_type, prod_date, is_used, speed, crew_size, rating";

#[derive(Debug, sqlx::FromRow)]
struct ShipRow {
    id: i64,
    name: String,
    planet: String,
    ship_type: String,
    prod_date: DateTime<Utc>,
    is_used: bool,
    speed: f64,
    crew_size: i32,
    rating: f64,
}

impl TryFrom<ShipRow> for Ship {
    type Error = Error;

    fn try_from(row: ShipRow) -> Result<Self> {
        let ship_type = row.ship_type.parse().map_err(|_| {
            Error::Internal(format!(
                "ship {} has unknown ship_type '{}'",
                row.id, row.ship_type
            ))
        })?;

        Ok(Ship {
            id: row.id,
            name: row.name,
            planet: row.planet,
            ship_type,
            prod_date: row.prod_date,
            is_used: row.is_used,
            speed: row.speed,
            crew_size: row.crew_size,
            rating: row.rating,
        })
    }
}

fn column(field: ShipField) -> &'static str {
    match field {
        ShipField::Id => "id",
        ShipField::Name => "name",
        ShipField::Planet => "planet",
        ShipField::ShipType => "ship_type",
        ShipField::ProdDate => "prod_date",
        ShipField::IsUsed => "is_used",
        ShipField::Speed => "speed",
        ShipField::CrewSize => "crew_size",
        ShipField::Rating => "rating",
    }
}

/// `%needle%` with LIKE metacharacters escaped so the needle matches literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn push_operand(qb: &mut QueryBuilder<'_, Postgres>, operand: &Operand) {
    match operand {
        Operand::Text(text) => qb.push_bind(text.clone()),
        Operand::ShipType(ship_type) => qb.push_bind(ship_type.as_str()),
        Operand::Timestamp(ts) => qb.push_bind(*ts),
        Operand::Flag(flag) => qb.push_bind(*flag),
        Operand::Decimal(value) => qb.push_bind(*value),
        Operand::Integer(value) => qb.push_bind(*value),
    };
}

fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    qb.push(column(predicate.field()));
    match predicate {
        Predicate::Contains { needle, .. } => {
            qb.push(" LIKE ");
            qb.push_bind(like_pattern(needle));
            qb.push(" ESCAPE '\\'");
        }
        Predicate::Equals { value, .. } => {
            qb.push(" = ");
            push_operand(qb, value);
        }
        Predicate::Between { min, max, .. } => {
            qb.push(" BETWEEN ");
            push_operand(qb, min);
            qb.push(" AND ");
            push_operand(qb, max);
        }
        Predicate::AtLeast { min, .. } => {
            qb.push(" >= ");
            push_operand(qb, min);
        }
        Predicate::AtMost { max, .. } => {
            qb.push(" <= ");
            push_operand(qb, max);
        }
    }
}

/// Shared by `find` and `count`.
fn push_where(qb: &mut QueryBuilder<'_, Postgres>, filter: &ShipFilter) {
    for (i, predicate) in filter.predicates().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        push_predicate(qb, predicate);
    }
}

fn push_order(qb: &mut QueryBuilder<'_, Postgres>, order: ShipOrder) {
    qb.push(" ORDER BY ");
    qb.push(column(order.field()));
    qb.push(" ASC");
    // Tie-break on id so pages are stable.
    if order.field() != ShipField::Id {
        qb.push(", id ASC");
    }
}

/// PostgreSQL-backed ShipStore implementation
#[derive(Clone)]
pub struct PostgresShipStore {
    pub(crate) pool: PgPool,
}

impl PostgresShipStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShipStore for PostgresShipStore {
    async fn find(&self, filter: &ShipFilter, page: Option<&PageRequest>) -> Result<Vec<Ship>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {SHIP_COLUMNS} FROM ships"));
        push_where(&mut qb, filter);

        match page {
            Some(page) => {
                push_order(&mut qb, page.order);
                qb.push(" LIMIT ");
                qb.push_bind(i64::try_from(page.size).unwrap_or(i64::MAX));
                qb.push(" OFFSET ");
                qb.push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
            }
            None => push_order(&mut qb, ShipOrder::Id),
        }

        let rows: Vec<ShipRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        rows.into_iter().map(Ship::try_from).collect()
    }

    async fn count(&self, filter: &ShipFilter) -> Result<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ships");
        push_where(&mut qb, filter);

        let total: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn find_by_id(&self, id: ShipId) -> Result<Option<Ship>> {
        let row: Option<ShipRow> =
            sqlx::query_as(&format!("SELECT {SHIP_COLUMNS} FROM ships WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(Error::Database)?;

        row.map(Ship::try_from).transpose()
    }

    async fn insert(&self, ship: NewShip) -> Result<Ship> {
        let row: ShipRow = sqlx::query_as(&format!(
            "INSERT INTO ships (name, planet, ship_type, prod_date, is_used, speed, crew_size, rating)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {SHIP_COLUMNS}"
        ))
        .bind(&ship.name)
        .bind(&ship.planet)
        .bind(ship.ship_type.as_str())
        .bind(ship.prod_date)
        .bind(ship.is_used)
        .bind(ship.speed)
        .bind(ship.crew_size)
        .bind(ship.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ship::try_from(row)
    }

    async fn update(&self, ship: &Ship) -> Result<Option<Ship>> {
        let row: Option<ShipRow> = sqlx::query_as(&format!(
            "UPDATE ships
             SET name = $1, planet = $2, ship_type = $3, prod_date = $4,
                 is_used = $5, speed = $6, crew_size = $7, rating = $8
             WHERE id = $9
             RETURNING {SHIP_COLUMNS}"
        ))
        .bind(&ship.name)
        .bind(&ship.planet)
        .bind(ship.ship_type.as_str())
        .bind(ship.prod_date)
        .bind(ship.is_used)
        .bind(ship.speed)
        .bind(ship.crew_size)
        .bind(ship.rating)
        .bind(ship.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(Ship::try_from).transpose()
    }

    async fn delete(&self, id: ShipId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ships WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
