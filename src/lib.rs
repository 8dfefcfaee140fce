#![doc = include_str!("../README.md")]

use std::fmt::Write;
use std::future::Future;
use std::net::SocketAddr;

use anyhow::Context;
use axum::{routing, Router};
use tokio::net::TcpListener;
use tokio::signal;

mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::Config;

mod state;
pub(crate) use state::State;

mod extract;


#[cfg(test)]
pub(crate) use kzprofile_macros::integration_test;

pub mod middleware;
pub mod upstream;

pub mod players;
pub mod maps;
pub mod ranks;

/// Every route the service serves, with its query parameters.
const ROUTES: &[&str] = &[
	"/",
	"/players/{steam_id}/progress?mode",
	"/maps?mode&tier",
	"/maps/{map}/distribution?mode&stage",
	"/ranks/{mode}",
];

/// Run the service.
///
/// This function will not exit until a SIGINT signal is received.
/// If you want to supply a custom signal for graceful shutdown, use [`run_until()`] instead.
pub async fn run(config: Config) -> anyhow::Result<()> {
	run_until(config, std::future::pending()).await
}

/// Run the service until a given future completes.
///
/// This function is the same as [`run()`], except that it also waits for the provided `until`
/// future, and shuts down the server when that future resolves.
pub async fn run_until<Until>(config: Config, until: Until) -> anyhow::Result<()>
where
	Until: Future<Output = ()> + Send + 'static,
{
	tracing::debug!(addr = %config.addr, "establishing TCP connection");

	let tcp_listener = TcpListener::bind(config.addr)
		.await
		.context("bind tcp socket")?;

	serve(tcp_listener, config, until).await
}

/// Serves HTTP requests on an already bound `tcp_listener`.
///
/// See [`run()`] and [`run_until()`].
pub(crate) async fn serve<Until>(
	tcp_listener: TcpListener,
	config: Config,
	until: Until,
) -> anyhow::Result<()>
where
	Until: Future<Output = ()> + Send + 'static,
{
	let addr = tcp_listener.local_addr().context("get tcp addr")?;
	tracing::info!(%addr, "listening for requests");

	let state = State::new(config).context("initialize state")?;
	let mut routes_message = String::from("registering routes:\n");

	for route in ROUTES {
		writeln!(&mut routes_message, "    • {route}")?;
	}

	tracing::info!("{routes_message}");
	tracing::debug!(?state, "initializing service");

	let service = Router::new()
		.route("/", routing::get(|| async { "(͡ ͡° ͜ つ ͡͡°)" }))
		.nest("/players", players::router(state))
		.nest("/maps", maps::router(state))
		.nest("/ranks", ranks::router())
		.layer(middleware::logging::layer!())
		.into_make_service_with_connect_info::<SocketAddr>();

	axum::serve(tcp_listener, service)
		.with_graceful_shutdown(async move {
			tokio::select! {
				() = until => {}
				() = sigint() => {}
			}
		})
		.await
		.context("run http server")
}

/// Waits for a SIGINT signal from the operating system.
#[tracing::instrument(name = "runtime::signals")]
async fn sigint() {
	if let Err(error) = signal::ctrl_c().await {
		tracing::error!(target: "kzprofile::runtime", "failed to receive SIGINT: {error}");

		// never resolve, so a broken signal handler does not shut us down
		std::future::pending::<()>().await;
	} else {
		tracing::warn!(target: "kzprofile::runtime", "received SIGINT; shutting down...");
	}
}
