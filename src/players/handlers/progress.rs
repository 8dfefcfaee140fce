//! Handlers for the `/players/{steam_id}/progress` route.

use axum::Json;
use kz::{Mode, PlayerProgress};
use serde::Deserialize;

use crate::extract::{Path, Query};
use crate::{Error, Result, State};

/// The smallest valid 64-bit SteamID.
const MIN_STEAM_ID: u64 = 76_561_197_960_265_728;

/// Query parameters for `/players/{steam_id}/progress`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetParams {
	#[serde(default)]
	mode: Mode,
}

/// Fetch a player's progress through the map pool of a mode.
#[tracing::instrument(level = "debug", skip(state))]
pub async fn get(
	state: &'static State,
	Path(steam_id): Path<u64>,
	Query(GetParams { mode }): Query<GetParams>,
) -> Result<Json<PlayerProgress>> {
	if steam_id < MIN_STEAM_ID {
		return Err(Error::invalid(format_args!("SteamID `{steam_id}`")));
	}

	let (maps, pro_finishes, tp_finishes) = tokio::try_join!(
		state.maps.get(),
		state.global_api.finishes(steam_id, mode, false),
		state.global_api.finishes(steam_id, mode, true),
	)?;

	let progress = PlayerProgress::aggregate(mode, &maps, &pro_finishes, &tp_finishes);

	Ok(Json(progress))
}
