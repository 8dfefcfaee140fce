//! Entry point of the `kzprofile` HTTP server.

use anyhow::Context;
use kzprofile::Config;

mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARNING: no `.env` file found ({error})");
	}

	let config = Config::new().context("load config")?;
	let _guard = logging::init(config.log_dir.as_deref()).context("initialize logging")?;

	tracing::info!(?config, "starting up");

	kzprofile::run(config).await
}
