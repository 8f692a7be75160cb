//! Shared harness for router-level integration tests
//!
//! Every test gets a fresh router backed by the in-memory store and drives it with
//! `tower::ServiceExt::oneshot`, so no network or database is involved.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use shipyard::{
    api::create_router,
    config::{Config, StoreBackend},
    db::InMemoryShipStore,
    state::AppState,
};
use std::{future::Future, pin::Pin, sync::Arc};
use tower::ServiceExt;

pub type TestFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>>>>;

#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(config: Config) -> Self {
        let state = AppState::with_store(config, Arc::new(InMemoryShipStore::new()));
        Self {
            router: create_router(state),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Vec<u8>>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, uri, body, &[]).await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Vec<u8>>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }

        let body = match body {
            Some(bytes) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body)?).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, headers, bytes))
    }

    /// POST a ship body and return the created entity.
    pub async fn create_ship(&self, ship: &Value) -> anyhow::Result<Value> {
        let (status, _headers, body) = self
            .request(Method::POST, "/rest/ships", Some(to_json_body(ship)?))
            .await?;
        assert_status(status, StatusCode::OK, "create ship");
        Ok(serde_json::from_slice(&body)?)
    }

    /// GET a JSON document, asserting 200.
    pub async fn get_json(&self, uri: &str) -> anyhow::Result<Value> {
        let (status, _headers, body) = self.request(Method::GET, uri, None).await?;
        assert_status(status, StatusCode::OK, uri);
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Config for tests: in-memory store, everything else default.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.database.backend = StoreBackend::Memory;
    config.database.run_migrations = false;
    config
}

pub async fn with_test_app<F>(f: F) -> anyhow::Result<()>
where
    F: FnOnce(TestApp) -> TestFuture,
{
    with_test_app_with_config(|_| {}, f).await
}

pub async fn with_test_app_with_config<C, F>(configure: C, f: F) -> anyhow::Result<()>
where
    C: FnOnce(&mut Config),
    F: FnOnce(TestApp) -> TestFuture,
{
    let mut config = test_config();
    configure(&mut config);
    f(TestApp::new(config)).await
}

pub fn to_json_body<T: Serialize>(value: &T) -> anyhow::Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn assert_status(status: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(
        status, expected,
        "unexpected status for {context}: got {status}, expected {expected}"
    );
}

/// Epoch millis for mid-June of `year` (UTC).
pub fn year_millis(year: i32) -> i64 {
    millis_at(year, 6, 15)
}

pub fn millis_at(year: i32, month: u32, day: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid test date")
        .timestamp_millis()
}

/// Builds create/update JSON bodies. Starts from a complete, valid ship.
pub struct ShipBuilder {
    value: Value,
}

impl Default for ShipBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShipBuilder {
    pub fn new() -> Self {
        Self {
            value: json!({
                "name": "Enterprise",
                "planet": "Earth",
                "shipType": "MILITARY",
                "prodDate": year_millis(3019),
                "isUsed": false,
                "speed": 0.5,
                "crewSize": 100
            }),
        }
    }

    /// Body with no fields at all, for partial updates.
    pub fn empty() -> Self {
        Self { value: json!({}) }
    }

    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.value[field] = value.into();
        self
    }

    pub fn name(self, name: &str) -> Self {
        self.set("name", name)
    }

    pub fn planet(self, planet: &str) -> Self {
        self.set("planet", planet)
    }

    pub fn ship_type(self, ship_type: &str) -> Self {
        self.set("shipType", ship_type)
    }

    pub fn prod_year(self, year: i32) -> Self {
        self.set("prodDate", year_millis(year))
    }

    pub fn is_used(self, is_used: bool) -> Self {
        self.set("isUsed", is_used)
    }

    pub fn speed(self, speed: f64) -> Self {
        self.set("speed", speed)
    }

    pub fn crew_size(self, crew_size: i64) -> Self {
        self.set("crewSize", crew_size)
    }

    pub fn without(mut self, field: &str) -> Self {
        if let Some(object) = self.value.as_object_mut() {
            object.remove(field);
        }
        self
    }

    pub fn build(self) -> Value {
        self.value
    }
}

/// Seed a small fleet with distinct speeds, crews, years and types.
pub async fn seed_fleet(app: &TestApp) -> anyhow::Result<Vec<Value>> {
    let fleet = [
        ("Falcon", "Earth", "TRANSPORT", 2990, false, 0.25, 12),
        ("Falcon Heavy", "Mars", "MERCHANT", 3005, true, 0.75, 400),
        ("Hawk", "Earth", "MILITARY", 3010, false, 0.9, 50),
        ("Raven", "Venus", "MILITARY", 2850, true, 0.1, 9000),
        ("Sparrow", "Mars", "TRANSPORT", 3019, false, 0.5, 3),
    ];

    let mut created = Vec::with_capacity(fleet.len());
    for (name, planet, ship_type, year, is_used, speed, crew) in fleet {
        let body = ShipBuilder::new()
            .name(name)
            .planet(planet)
            .ship_type(ship_type)
            .prod_year(year)
            .is_used(is_used)
            .speed(speed)
            .crew_size(crew)
            .build();
        created.push(app.create_ship(&body).await?);
    }
    Ok(created)
}
