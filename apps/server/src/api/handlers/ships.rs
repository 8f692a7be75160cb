//! Ship REST handlers

use crate::{
    models::{Ship, ShipId, ShipPatch},
    search::ShipSearchParams,
    state::AppState,
    Error, Result,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

fn query_error(rejection: QueryRejection) -> Error {
    Error::Validation(rejection.body_text())
}

fn body_error(rejection: JsonRejection) -> Error {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return Error::PayloadTooLarge(rejection.body_text());
    }
    Error::Validation(rejection.body_text())
}

/// GET /rest/ships
pub async fn list_ships(
    State(state): State<AppState>,
    params: std::result::Result<Query<ShipSearchParams>, QueryRejection>,
) -> Result<Json<Vec<Ship>>> {
    let Query(params) = params.map_err(query_error)?;
    let ships = state.ship_service.list(&params).await?;
    Ok(Json(ships))
}

/// GET /rest/ships/count
pub async fn count_ships(
    State(state): State<AppState>,
    params: std::result::Result<Query<ShipSearchParams>, QueryRejection>,
) -> Result<Json<u64>> {
    let Query(params) = params.map_err(query_error)?;
    let total = state.ship_service.count(&params).await?;
    Ok(Json(total))
}

/// GET /rest/ships/:id
pub async fn get_ship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ship>> {
    let id = ShipId::parse(&id)?;
    let ship = state.ship_service.get(id).await?;
    Ok(Json(ship))
}

/// POST /rest/ships
pub async fn create_ship(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShipPatch>, JsonRejection>,
) -> Result<Json<Ship>> {
    let Json(patch) = payload.map_err(body_error)?;
    let ship = state.ship_service.create(patch).await?;
    Ok(Json(ship))
}

/// POST /rest/ships/:id
///
/// The id is checked before the body so a bad id wins over a bad payload.
pub async fn update_ship(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ShipPatch>, JsonRejection>,
) -> Result<Json<Ship>> {
    let id = ShipId::parse(&id)?;
    let Json(patch) = payload.map_err(body_error)?;
    let ship = state.ship_service.update(id, patch).await?;
    Ok(Json(ship))
}

/// DELETE /rest/ships/:id
pub async fn delete_ship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = ShipId::parse(&id)?;
    state.ship_service.delete(id).await?;
    Ok(StatusCode::OK)
}
