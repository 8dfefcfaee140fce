//! A client for the [Global API].
//!
//! [Global API]: https://kztimerglobal.com/swagger/index.html?urls.primaryName=V2

use kz::{DistributionFit, FinishRecord, Mode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::Result;

/// Name used for this service in logs and error messages.
const SERVICE: &str = "Global API";

/// We only ever care about 128 tick records.
const TICKRATE: u16 = 128;

/// Upper bound on how many records we ask for at once.
///
/// This is higher than the amount of maps in the catalog, so one request returns every finish a
/// player has.
const RECORD_LIMIT: u32 = 10_000;

/// A client for the Global API.
#[derive(Debug, Clone)]
pub struct GlobalApi {
	/// HTTP client shared with the rest of the service.
	http_client: reqwest::Client,

	/// Base URL; always ends with a `/`.
	base_url: Url,
}

/// A leaderboard, as the Global API calls it.
#[derive(Debug, Deserialize)]
struct RecordFilter {
	id: u32,
}

impl GlobalApi {
	/// Creates a new [`GlobalApi`] client.
	pub const fn new(http_client: reqwest::Client, base_url: Url) -> Self {
		Self { http_client, base_url }
	}

	/// Joins `path` onto the base URL.
	fn url(&self, path: &str) -> Result<Url> {
		self.base_url
			.join(path)
			.map_err(|error| crate::Error::logic(format_args!("invalid Global API path: {error}")))
	}

	/// Fetches a player's personal bests on the main course of every map.
	///
	/// `has_teleports` selects the category; pro runs by definition have no teleports.
	#[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
	pub async fn finishes(
		&self,
		steam_id: u64,
		mode: Mode,
		has_teleports: bool,
	) -> Result<Vec<FinishRecord>> {
		#[derive(Serialize)]
		struct Query {
			steamid64: u64,
			modes_list_string: &'static str,
			has_teleports: bool,
			stage: u8,
			tickrate: u16,
			limit: u32,
		}

		let query = Query {
			steamid64: steam_id,
			modes_list_string: mode.api(),
			has_teleports,
			stage: 0,
			tickrate: TICKRATE,
			limit: RECORD_LIMIT,
		};

		let records: Vec<FinishRecord> =
			super::get_json(&self.http_client, SERVICE, self.url("records/top")?, &query).await?;

		tracing::debug!(target: "kzprofile::upstream", amount = records.len(), "fetched finishes");

		Ok(records)
	}

	/// Looks up the ID of the leaderboard for the given map / stage / mode / category.
	///
	/// Returns `None` if the Global API does not know about such a leaderboard.
	#[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
	pub async fn record_filter(
		&self,
		map_id: u16,
		stage: u8,
		mode: Mode,
		has_teleports: bool,
	) -> Result<Option<u32>> {
		#[derive(Serialize)]
		struct Query {
			map_ids: u16,
			stages: u8,
			mode_ids: u16,
			tickrates: u16,
			has_teleports: bool,
			limit: u8,
		}

		let query = Query {
			map_ids: map_id,
			stages: stage,
			mode_ids: mode.filter_id(),
			tickrates: TICKRATE,
			has_teleports,
			limit: 1,
		};

		let filters: Vec<RecordFilter> =
			super::get_json(&self.http_client, SERVICE, self.url("record_filters")?, &query)
				.await?;

		Ok(filters.first().map(|filter| filter.id))
	}

	/// Fetches the distribution fitted to the times of a leaderboard.
	#[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
	pub async fn distribution(&self, record_filter_id: u32) -> Result<Option<DistributionFit>> {
		#[derive(Serialize)]
		struct Query {
			record_filter_ids: u32,
		}

		let fits: Vec<DistributionFit> = super::get_json(
			&self.http_client,
			SERVICE,
			self.url("record_filters/distributions")?,
			&Query { record_filter_ids: record_filter_id },
		)
		.await?;

		Ok(fits.into_iter().next())
	}

	/// Fetches the distribution for a map / stage / mode / category in one go.
	///
	/// Returns `None` if either the leaderboard or its fit does not exist.
	pub async fn fit_for(
		&self,
		map_id: u16,
		stage: u8,
		mode: Mode,
		has_teleports: bool,
	) -> Result<Option<DistributionFit>> {
		let Some(record_filter_id) = self.record_filter(map_id, stage, mode, has_teleports).await?
		else {
			tracing::debug!(map_id, stage, %mode, has_teleports, "no such leaderboard");
			return Ok(None);
		};

		self.distribution(record_filter_id).await
	}
}
