//! HTTP handlers for the `/maps` routes.

pub mod root;
pub mod distribution;
