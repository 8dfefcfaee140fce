//! Runtime errors.
//!
//! This module exposes the [`Error`] type that is used across the service for bubbling up
//! errors. Specific error cases have dedicated constructors, see the methods on [`Error`].
//!
//! [`Error`] implements [`IntoResponse`], which means it can be returned from HTTP handlers and
//! extractors.
//!
//! [`Error`]: struct@Error

use std::fmt::{self, Display, Formatter};
use std::panic::Location;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Type alias for a [`Result<T, E>`] with its `E` parameter set to [`Error`].
///
/// [`Result`]: std::result::Result
/// [`Error`]: struct@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The service's core error type.
///
/// It carries information about the kind of error that occurred and where it was created.
#[derive(Debug, Error)]
pub struct Error {
	/// The kind of error that occurred.
	///
	/// Determines the HTTP status code and message of the response.
	kind: ErrorKind,

	/// The source code location of where the error was created.
	location: Location<'static>,
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "[{}] {}", self.location, self.kind)
	}
}

/// The different kinds of errors that can occur at runtime.
#[derive(Debug, Error)]
enum ErrorKind {
	#[error("could not find {what}")]
	NotFound { what: String },

	#[error("invalid {what}")]
	InvalidInput { what: String },

	#[error("request to the {service} failed")]
	Upstream {
		service: &'static str,

		#[source]
		source: reqwest::Error,
	},

	#[error("the {service} is currently unavailable")]
	Unavailable { service: &'static str },

	#[error("logic assertion failed: {message}")]
	Logic { message: String },
}

impl Error {
	/// Creates a new [`Error`] of the given [`ErrorKind`].
	///
	/// [`Error`]: struct@Error
	#[track_caller]
	fn new(kind: ErrorKind) -> Self {
		Self { kind, location: *Location::caller() }
	}

	/// An error signaling that a resource could not be found.
	///
	/// Produces a `404 Not Found` status.
	#[track_caller]
	pub(crate) fn not_found<T>(what: T) -> Self
	where
		T: Display,
	{
		Self::new(ErrorKind::NotFound { what: what.to_string() })
	}

	/// An error signaling invalid user input.
	///
	/// Produces a `400 Bad Request` status.
	#[track_caller]
	pub(crate) fn invalid<T>(what: T) -> Self
	where
		T: Display,
	{
		Self::new(ErrorKind::InvalidInput { what: what.to_string() })
	}

	/// An error signaling that one of the services we depend on failed, or sent us something we
	/// could not understand.
	///
	/// Produces a `502 Bad Gateway` status.
	#[track_caller]
	pub(crate) fn upstream(service: &'static str, source: reqwest::Error) -> Self {
		Self::new(ErrorKind::Upstream { service, source })
	}

	/// An error signaling that a service we depend on failed recently, and we are not asking it
	/// again just yet.
	///
	/// Produces a `502 Bad Gateway` status.
	#[track_caller]
	pub(crate) fn unavailable(service: &'static str) -> Self {
		Self::new(ErrorKind::Unavailable { service })
	}

	/// An error signaling a bug.
	///
	/// Produces a `500 Internal Server Error` status.
	#[track_caller]
	pub(crate) fn logic<T>(message: T) -> Self
	where
		T: Display,
	{
		Self::new(ErrorKind::Logic { message: message.to_string() })
	}

	/// The HTTP status code this error maps to.
	pub(crate) const fn status(&self) -> StatusCode {
		match self.kind {
			ErrorKind::NotFound { .. } => StatusCode::NOT_FOUND,
			ErrorKind::InvalidInput { .. } => StatusCode::BAD_REQUEST,
			ErrorKind::Upstream { .. } | ErrorKind::Unavailable { .. } => StatusCode::BAD_GATEWAY,
			ErrorKind::Logic { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();

		if status.is_server_error() {
			tracing::error!(target: "kzprofile::errors", error = ?self, "{self}");
		} else {
			tracing::debug!(target: "kzprofile::errors", "{self}");
		}

		let message = match &self.kind {
			ErrorKind::Upstream { service, source } => match source.status() {
				Some(status) => format!("request to the {service} failed with status {status}"),
				None => self.kind.to_string(),
			},
			kind => kind.to_string(),
		};

		(status, Json(json!({ "message": message }))).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_codes() {
		assert_eq!(Error::not_found("map").status(), StatusCode::NOT_FOUND);
		assert_eq!(Error::invalid("mode").status(), StatusCode::BAD_REQUEST);
		assert_eq!(Error::unavailable("Profile API").status(), StatusCode::BAD_GATEWAY);
		assert_eq!(Error::logic("oops").status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn location_is_tracked() {
		let error = Error::not_found("map `kz_nonexistent`");
		let message = error.to_string();

		assert!(message.contains(file!()), "{message}");
		assert!(message.ends_with("could not find map `kz_nonexistent`"), "{message}");
	}
}
