use crate::api::handlers::ships;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn ship_routes() -> Router<AppState> {
    Router::new()
        .route("/ships", get(ships::list_ships).post(ships::create_ship))
        .route("/ships/", post(ships::create_ship))
        // Static segment; matched ahead of `/ships/:id`.
        .route("/ships/count", get(ships::count_ships))
        .route(
            "/ships/:id",
            get(ships::get_ship)
                .post(ships::update_ship)
                .delete(ships::delete_ship),
        )
}
