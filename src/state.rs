//! The service's main application state.
//!
//! This is initialized once on startup, and then passed around the application by axum.

use std::convert::Infallible;
use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request;

use crate::maps::MapCache;
use crate::upstream::{GlobalApi, ProfileApi};

/// How long we wait for an upstream to respond before giving up.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// The main application state.
///
/// A `'static` reference to this is passed around the application.
#[derive(Debug)]
pub struct State {
	/// The service configuration.
	pub config: crate::Config,

	/// Client for the Global API.
	pub global_api: GlobalApi,

	/// The cached map catalog.
	pub maps: MapCache,
}

impl State {
	/// Creates a new [`State`] object and leaks it on the heap.
	///
	/// **This function should only be called once per server; it leaks memory.**
	pub fn new(config: crate::Config) -> anyhow::Result<&'static Self> {
		let http_client = reqwest::Client::builder()
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.timeout(UPSTREAM_TIMEOUT)
			.build()
			.context("build http client")?;

		let global_api = GlobalApi::new(http_client.clone(), config.global_api_url.clone());
		let profile_api = ProfileApi::new(http_client, config.profile_api_url.clone());
		let maps = MapCache::new(profile_api, config.maps_ttl);

		Ok(Box::leak(Box::new(Self { config, global_api, maps })))
	}
}

#[async_trait]
impl FromRequestParts<&'static State> for &'static State {
	type Rejection = Infallible;

	async fn from_request_parts(
		_parts: &mut request::Parts,
		state: &&'static State,
	) -> Result<Self, Infallible> {
		Ok(*state)
	}
}
