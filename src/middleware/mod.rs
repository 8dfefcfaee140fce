//! This module contains general purpose middleware.
//!
//! Middlewares are implemented as [tower services], which means they integrate with [`axum`].
//!
//! [tower services]: tower_http

pub(crate) mod logging;
pub(crate) mod cors;
