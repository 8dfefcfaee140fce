//! Everything related to players.

use axum::routing::get;
use axum::Router;

use crate::middleware::cors;
use crate::State;

pub mod handlers;

/// Returns a router with routes for `/players`.
pub fn router(state: &'static State) -> Router {
	Router::new()
		.route("/:steam_id/progress", get(handlers::progress::get))
		.route_layer(cors::permissive())
		.with_state(state)
}
