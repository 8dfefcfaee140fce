//! A client for the Profile API.
//!
//! It serves the map catalog with extra information the Global API does not have, like which
//! modes a map is ranked in and who made it.

use kz::GameMap;
use url::Url;

use crate::Result;

/// Name used for this service in logs and error messages.
const SERVICE: &str = "Profile API";

/// A client for the Profile API.
#[derive(Debug, Clone)]
pub struct ProfileApi {
	/// HTTP client shared with the rest of the service.
	http_client: reqwest::Client,

	/// Base URL; always ends with a `/`.
	base_url: Url,
}

impl ProfileApi {
	/// Creates a new [`ProfileApi`] client.
	pub const fn new(http_client: reqwest::Client, base_url: Url) -> Self {
		Self { http_client, base_url }
	}

	/// Fetches the full map catalog.
	#[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
	pub async fn maps(&self) -> Result<Vec<GameMap>> {
		let url = self.base_url.join("maps").map_err(|error| {
			crate::Error::logic(format_args!("invalid Profile API path: {error}"))
		})?;

		let no_query: [(&str, &str); 0] = [];
		let maps: Vec<GameMap> = super::get_json(&self.http_client, SERVICE, url, &no_query).await?;

		tracing::debug!(target: "kzprofile::upstream", amount = maps.len(), "fetched map catalog");

		Ok(maps)
	}
}
