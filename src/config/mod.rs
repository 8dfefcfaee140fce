//! The service's configuration.
//!
//! Everything is read from environment variables on startup. Values that are not required come
//! with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use derive_more::Debug;
use url::Url;

mod error;
pub use error::{Error, Result};

/// The default address to listen on.
const DEFAULT_ADDR: &str = "127.0.0.1:42069";

/// The default base URL of the Global API.
const DEFAULT_GLOBAL_API_URL: &str = "https://kztimerglobal.com/api/v2/";

/// The default amount of seconds the map catalog is cached for.
const DEFAULT_MAPS_TTL: &str = "600";

/// Configuration values for the service.
#[derive(Debug, Clone)]
pub struct Config {
	/// The address the HTTP server is going to listen on.
	#[debug("{addr}")]
	pub addr: SocketAddr,

	/// Base URL of the Global API.
	///
	/// Always ends with a `/`, so paths can be joined onto it.
	#[debug("{}", global_api_url.as_str())]
	pub global_api_url: Url,

	/// Base URL of the Profile API, which serves the enriched map catalog.
	///
	/// Always ends with a `/`, so paths can be joined onto it.
	#[debug("{}", profile_api_url.as_str())]
	pub profile_api_url: Url,

	/// How long a fetched map catalog stays fresh.
	pub maps_ttl: Duration,

	/// Directory to write log files to.
	///
	/// File logging is disabled if this is `None`.
	pub log_dir: Option<PathBuf>,
}

impl Config {
	/// Creates a new [`Config`] by reading from the environment.
	pub fn new() -> Result<Self> {
		let addr = get_env_var_or::<SocketAddr>("KZ_PROFILE_ADDR", DEFAULT_ADDR)?;
		let global_api_url =
			get_env_var_or::<Url>("KZ_PROFILE_GLOBAL_API_URL", DEFAULT_GLOBAL_API_URL)
				.map(with_trailing_slash)?;
		let profile_api_url =
			get_env_var::<Url>("KZ_PROFILE_PROFILE_API_URL").map(with_trailing_slash)?;
		let maps_ttl = get_env_var_or::<u64>("KZ_PROFILE_MAPS_TTL", DEFAULT_MAPS_TTL)
			.map(Duration::from_secs)?;
		let log_dir = get_env_var::<PathBuf>("KZ_PROFILE_LOG_DIR").ok();

		Ok(Self { addr, global_api_url, profile_api_url, maps_ttl, log_dir })
	}
}

/// Parses the environment variable `var` into a `T`.
///
/// Empty variables are treated as missing.
fn get_env_var<T>(var: &'static str) -> Result<T>
where
	T: FromStr,
	<T as FromStr>::Err: Into<Error>,
{
	env::var(var)
		.ok()
		.filter(|value| !value.is_empty())
		.ok_or(Error::MissingEnvironmentVariable(var))
		.and_then(|value| value.parse().map_err(Into::into))
}

/// Same as [`get_env_var()`], but falls back to `default` if `var` is not set.
fn get_env_var_or<T>(var: &'static str, default: &str) -> Result<T>
where
	T: FromStr,
	<T as FromStr>::Err: Into<Error>,
{
	match get_env_var(var) {
		Err(Error::MissingEnvironmentVariable(_)) => default.parse().map_err(Into::into),
		result => result,
	}
}

/// Makes sure relative paths can be [joined] onto `url` without replacing its last segment.
///
/// [joined]: Url::join
fn with_trailing_slash(mut url: Url) -> Url {
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());
		url.set_path(&path);
	}

	url
}
