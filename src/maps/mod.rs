//! Everything related to maps.

use axum::routing::get;
use axum::Router;

use crate::middleware::cors;
use crate::State;

mod cache;
pub use cache::MapCache;

pub mod handlers;

/// Returns a router with routes for `/maps`.
pub fn router(state: &'static State) -> Router {
	Router::new()
		.route("/", get(handlers::root::get))
		.route("/:map/distribution", get(handlers::distribution::get))
		.route_layer(cors::permissive())
		.with_state(state)
}
