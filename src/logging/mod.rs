//! Log-capturing facilities.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod stderr;
mod files;

/// The filter used if `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "kzprofile=info,kz=info,warn";

/// Initializes [`tracing-subscriber`].
///
/// Logs always go to STDERR. If `log_dir` is given, they are also written to daily-rotated files
/// in that directory.
///
/// NOTE: the returned [`WorkerGuard`] will perform cleanup for the tracing layer that emits logs
///       to files, which means it has to stay alive until the program exits!
///
/// [`tracing-subscriber`]: tracing_subscriber
pub fn init(log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
	let (files_layer, guard) = match log_dir {
		None => (None, None),
		Some(log_dir) => {
			let (layer, guard) = files::layer(log_dir).context("files layer")?;
			(Some(layer), Some(guard))
		}
	};

	tracing_subscriber::registry()
		.with(stderr::layer())
		.with(files_layer)
		.with(env_filter())
		.try_init()
		.context("initialize tracing subscriber")?;

	tracing::info! {
		target: "kzprofile::logging",
		dir = ?log_dir,
		"initialized logging",
	};

	Ok(guard)
}

/// Reads the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
fn env_filter() -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
