//! CORS middlewares.

use axum::http::Method;
use tower_http::cors::CorsLayer;

/// Creates a permissive CORS layer that allows `GET` requests from anywhere.
///
/// Everything this service serves is public and read-only.
pub fn permissive() -> CorsLayer {
	CorsLayer::permissive().allow_methods([Method::GET])
}
