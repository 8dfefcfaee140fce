//! Clients for the services we fetch our data from.
//!
//! - the [Global API], which knows about every ranked record and fits a distribution to the
//!   times of every leaderboard
//! - the [Profile API], which serves an enriched version of the map catalog
//!
//! [Global API]: global_api
//! [Profile API]: profile_api

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{Error, Result};

pub mod global_api;
pub use global_api::GlobalApi;

pub mod profile_api;
pub use profile_api::ProfileApi;

/// Makes a `GET` request to `url` and deserializes the JSON response body.
///
/// `service` is the name of the upstream, used in error messages.
#[tracing::instrument(
	level = "debug",
	target = "kzprofile::upstream",
	skip(http_client, url, query),
	fields(url = %url),
	err(level = "debug"),
)]
async fn get_json<Q, T>(
	http_client: &reqwest::Client,
	service: &'static str,
	url: Url,
	query: &Q,
) -> Result<T>
where
	Q: Serialize + ?Sized,
	T: DeserializeOwned,
{
	let response = http_client
		.get(url)
		.query(query)
		.send()
		.await
		.map_err(|error| Error::upstream(service, error))?;

	if let Err(error) = response.error_for_status_ref() {
		let response_body = response.text().await.ok();

		tracing::error! {
			target: "kzprofile::upstream",
			?error,
			?response_body,
			"{service} responded with an error",
		};

		return Err(Error::upstream(service, error));
	}

	response
		.json::<T>()
		.await
		.map_err(|error| Error::upstream(service, error))
}
