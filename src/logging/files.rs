use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::registry::LookupSpan;

/// Provides a tracing layer for emitting JSON logs to daily-rotated files in `log_dir`.
pub fn layer<S>(log_dir: &Path) -> anyhow::Result<(impl tracing_subscriber::Layer<S>, WorkerGuard)>
where
	S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
	if !log_dir.exists() {
		fs::create_dir_all(log_dir)
			.with_context(|| format!("create log directory `{}`", log_dir.display()))?;
	}

	let (writer, guard) = tracing_appender::rolling::Builder::new()
		.rotation(Rotation::DAILY)
		.filename_prefix("kzprofile")
		.filename_suffix("log")
		.build(log_dir)
		.map(tracing_appender::non_blocking)
		.context("initialize log file writer")?;

	let layer = tracing_subscriber::fmt::layer()
		.json()
		.with_ansi(false)
		.with_writer(writer);

	Ok((layer, guard))
}
