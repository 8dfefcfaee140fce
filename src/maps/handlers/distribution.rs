//! Handlers for the `/maps/{map}/distribution` route.

use axum::Json;
use kz::{Burr12, ChartSeries, DistributionFit, Mode, RunDistribution};
use serde::{Deserialize, Serialize};

use crate::extract::{Path, Query};
use crate::{Error, Result, State};

/// Query parameters for `/maps/{map}/distribution`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetParams {
	/// The mode to get the curves for.
	#[serde(default)]
	mode: Mode,

	/// The course; `0` is the main course, everything above is a bonus.
	#[serde(default)]
	stage: u8,

	/// A run time, in seconds, to place on the curves.
	#[serde(default)]
	time: Option<f64>,
}

/// Response body for `/maps/{map}/distribution`.
#[derive(Debug, Serialize)]
pub struct MapDistribution {
	/// The pro and TP curves.
	#[serde(flatten)]
	curves: RunDistribution,

	/// Where the requested run lands on each curve, if a `time` was given.
	#[serde(skip_serializing_if = "Option::is_none")]
	run: Option<RunPercentiles>,
}

/// The fraction of runs slower than a given time, per category.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunPercentiles {
	/// The run time, in seconds.
	time: f64,

	/// `null` if there is no pro curve.
	pro: Option<f64>,

	/// `null` if there is no TP curve.
	tp: Option<f64>,
}

/// Fetch the pro and TP completion time curves of a map.
///
/// Either curve is empty if the Global API has no (usable) distribution for it. `kzpro_` maps
/// always have an empty TP curve.
///
/// If a `time` is given, the response also says which fraction of runs is slower than it.
#[tracing::instrument(level = "debug", skip(state))]
pub async fn get(
	state: &'static State,
	Path(map_name): Path<String>,
	Query(GetParams { mode, stage, time }): Query<GetParams>,
) -> Result<Json<MapDistribution>> {
	if let Some(time) = time.filter(|time| !time.is_finite() || *time < 0.0) {
		return Err(Error::invalid(format_args!("run time `{time}`")));
	}

	let maps = state.maps.get().await?;
	let map = maps
		.iter()
		.find(|map| map.name.eq_ignore_ascii_case(&map_name))
		.ok_or_else(|| Error::not_found(format_args!("map `{map_name}`")))?;

	if stage > map.bonus_count {
		return Err(Error::not_found(format_args!("stage {stage} on `{}`", map.name)));
	}

	let pro = state.global_api.fit_for(map.id, stage, mode, false);
	let tp = async {
		if map.has_teleport_category() {
			state.global_api.fit_for(map.id, stage, mode, true).await
		} else {
			Ok(None)
		}
	};

	let (pro, tp) = tokio::try_join!(pro, tp)?;
	let curves = RunDistribution {
		pro: ChartSeries::estimate(pro.as_ref()),
		tp: ChartSeries::estimate(tp.as_ref()),
	};

	let run = time.map(|time| RunPercentiles {
		time,
		pro: percentile_of(pro, time),
		tp: percentile_of(tp, time),
	});

	Ok(Json(MapDistribution { curves, run }))
}

/// Places `time` on the given fit, if it is usable.
fn percentile_of(fit: Option<DistributionFit>, time: f64) -> Option<f64> {
	let distribution = Burr12::try_from(fit?).ok()?;

	Some(distribution.percentile_of(time))
}

#[cfg(test)]
mod tests {
	use reqwest::StatusCode;
	use serde_json::Value as JsonValue;

	use crate::test::Context;

	#[crate::integration_test]
	async fn both_curves(ctx: &Context) {
		let response = ctx
			.http_client
			.get(ctx.url("/maps/kz_alpha/distribution?mode=kz_timer"))
			.send()
			.await?;

		assert_eq!(response.status(), StatusCode::OK);

		let distribution = response.json::<JsonValue>().await?;

		// the fake upstream fits every leaderboard with c=2, d=1, scale=10.5, which drops below
		// the cutoff after 31 seconds
		for category in ["pro", "tp"] {
			let percentiles = distribution[category]["percentiles"].as_array().map(Vec::len);
			let densities = distribution[category]["densities"].as_array().map(Vec::len);

			assert_eq!(percentiles, Some(32), "{category}");
			assert_eq!(densities, Some(32), "{category}");
		}

		assert_eq!(distribution["pro"]["percentiles"][0]["time"], 0);
		assert_eq!(distribution["pro"]["percentiles"][0]["percentile"], 1.0);
		assert!(distribution.get("run").is_none());
	}

	#[crate::integration_test]
	async fn percentile_of_a_run(ctx: &Context) {
		let distribution = ctx
			.http_client
			.get(ctx.url("/maps/kz_alpha/distribution?mode=kz_timer&time=10.5"))
			.send()
			.await?
			.json::<JsonValue>()
			.await?;

		// (1 + (10.5 / 10.5)^2)^-1
		assert_eq!(distribution["run"]["time"], 10.5);
		assert_eq!(distribution["run"]["pro"], 0.5);
		assert_eq!(distribution["run"]["tp"], 0.5);
		assert_eq!(distribution["pro"]["percentiles"].as_array().map(Vec::len), Some(32));
	}

	#[crate::integration_test]
	async fn percentile_without_tp_curve(ctx: &Context) {
		let distribution = ctx
			.http_client
			.get(ctx.url("/maps/kzpro_beta/distribution?time=10.5"))
			.send()
			.await?
			.json::<JsonValue>()
			.await?;

		assert_eq!(distribution["run"]["pro"], 0.5);
		assert!(distribution["run"]["tp"].is_null());
	}

	#[crate::integration_test]
	async fn negative_run_time(ctx: &Context) {
		let response = ctx
			.http_client
			.get(ctx.url("/maps/kz_alpha/distribution?time=-3"))
			.send()
			.await?;

		assert_eq!(response.status(), StatusCode::BAD_REQUEST);

		let body = response.json::<JsonValue>().await?;

		assert_eq!(body["message"], "invalid run time `-3`");
		assert_eq!(ctx.upstream.map_requests(), 0);
	}

	#[crate::integration_test]
	async fn kzpro_has_no_tp_curve(ctx: &Context) {
		let distribution = ctx
			.http_client
			.get(ctx.url("/maps/kzpro_beta/distribution"))
			.send()
			.await?
			.json::<JsonValue>()
			.await?;

		assert_eq!(distribution["pro"]["percentiles"].as_array().map(Vec::len), Some(32));
		assert_eq!(distribution["tp"]["percentiles"].as_array().map(Vec::len), Some(0));
	}

	#[crate::integration_test]
	async fn missing_leaderboard(ctx: &Context) {
		// the fake upstream only has leaderboards for the main course
		let distribution = ctx
			.http_client
			.get(ctx.url("/maps/kz_gamma/distribution?mode=skz&stage=1"))
			.send()
			.await?
			.json::<JsonValue>()
			.await?;

		assert_eq!(distribution["pro"]["percentiles"].as_array().map(Vec::len), Some(0));
		assert_eq!(distribution["tp"]["densities"].as_array().map(Vec::len), Some(0));
	}

	#[crate::integration_test]
	async fn unknown_map(ctx: &Context) {
		let response = ctx
			.http_client
			.get(ctx.url("/maps/kz_nonexistent/distribution"))
			.send()
			.await?;

		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}

	#[crate::integration_test]
	async fn stage_out_of_range(ctx: &Context) {
		let response = ctx
			.http_client
			.get(ctx.url("/maps/kz_alpha/distribution?stage=7"))
			.send()
			.await?;

		assert_eq!(response.status(), StatusCode::NOT_FOUND);

		let body = response.json::<JsonValue>().await?;

		assert_eq!(body["message"], "could not find stage 7 on `kz_alpha`");
	}
}
