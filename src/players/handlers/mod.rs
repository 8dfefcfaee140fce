//! HTTP handlers for the `/players` routes.

pub mod progress;
