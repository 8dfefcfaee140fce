use std::convert::Infallible;
use std::net;
use std::num;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

/// Type alias for a [`Result<T, E>`] with its `E` parameter set to [`Error`].
///
/// [`Result<T, E>`]: std::result::Result
pub type Result<T> = StdResult<T, Error>;

/// Any errors that can occur while constructing the service's [Config].
///
/// [Config]: crate::config::Config
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum Error {
	/// A required environment variable is not set, or empty.
	#[error("missing environment variable `{0}`")]
	MissingEnvironmentVariable(&'static str),

	/// An address that is not `ip:port`.
	#[error("failed to parse network address: {0}")]
	InvalidSocketAddr(#[from] net::AddrParseError),

	/// A TTL that is not a whole amount of seconds.
	#[error("failed to parse number: {0}")]
	InvalidNumber(#[from] num::ParseIntError),

	/// A malformed URL.
	#[error("failed to parse URL: {0}")]
	InvalidURL(#[from] url::ParseError),
}

impl From<Infallible> for Error {
	fn from(infallible: Infallible) -> Self {
		match infallible {}
	}
}
