//! Handlers for the `/maps` route.

use axum::Json;
use kz::{GameMap, Mode, Tier};
use serde::Deserialize;

use crate::extract::Query;
use crate::{Result, State};

/// Query parameters for `/maps`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetParams {
	/// Only include maps that are ranked in this mode.
	#[serde(default)]
	mode: Option<Mode>,

	/// Only include maps of this tier.
	#[serde(default)]
	tier: Option<Tier>,
}

/// Fetch the map catalog.
#[tracing::instrument(level = "debug", skip(state))]
pub async fn get(
	state: &'static State,
	Query(GetParams { mode, tier }): Query<GetParams>,
) -> Result<Json<Vec<GameMap>>> {
	let maps = state.maps.get().await?;
	let maps = maps
		.iter()
		.filter(|map| mode.map_or(true, |mode| map.is_ranked_in(mode)))
		.filter(|map| tier.map_or(true, |tier| map.tier == tier))
		.cloned()
		.collect();

	Ok(Json(maps))
}
