//! Custom [extractors].
//!
//! These wrap axum's own extractors, but reject requests with our own [`Error`] type, so clients
//! get the same response format for every error.
//!
//! [extractors]: axum::extract
//! [`Error`]: struct@crate::Error

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request;
use serde::de::DeserializeOwned;

use crate::Error;

/// An [extractor] for path parameters.
///
/// [extractor]: axum::extract
#[derive(Debug)]
pub struct Path<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Path<T>
where
	S: Send + Sync,
	T: DeserializeOwned + Send,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut request::Parts, state: &S) -> Result<Self, Error> {
		axum::extract::Path::<T>::from_request_parts(parts, state)
			.await
			.map(|axum::extract::Path(value)| Self(value))
			.map_err(|rejection| Error::invalid(format_args!("path: {}", rejection.body_text())))
	}
}

/// An [extractor] for URI query parameters.
///
/// [extractor]: axum::extract
#[derive(Debug)]
pub struct Query<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Query<T>
where
	S: Send + Sync,
	T: DeserializeOwned,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut request::Parts, state: &S) -> Result<Self, Error> {
		axum::extract::Query::<T>::from_request_parts(parts, state)
			.await
			.map(|axum::extract::Query(value)| Self(value))
			.map_err(|rejection| Error::invalid(format_args!("query: {}", rejection.body_text())))
	}
}
