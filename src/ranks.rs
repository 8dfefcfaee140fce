//! The rank ladders of every mode.

use axum::routing::get;
use axum::{Json, Router};
use kz::{Mode, RankTable};
use serde::Serialize;

use crate::extract::Path;
use crate::middleware::cors;

/// A single rung of a rank ladder.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankTier {
	/// The rank's name, e.g. `Pro`.
	pub label: &'static str,

	/// Display color, as a hex string.
	pub color: &'static str,

	/// Minimum amount of points required for this rank.
	pub threshold: u32,
}

/// Returns a router with routes for `/ranks`.
pub fn router() -> Router {
	Router::new()
		.route("/:mode", get(get_ladder))
		.route_layer(cors::permissive())
}

/// Fetch the rank ladder of a mode, lowest rank first.
#[tracing::instrument(level = "debug")]
pub async fn get_ladder(Path(mode): Path<Mode>) -> Json<Vec<RankTier>> {
	let ladder = RankTable::for_mode(mode)
		.tiers()
		.map(|(tier, threshold)| RankTier { label: tier.label, color: tier.color, threshold })
		.collect();

	Json(ladder)
}
