//! Entry point for the API server.

use anyhow::Context;
use ball_dont_lie_api::Config;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Log filter used if `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "ball_dont_lie_api=info,warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let dotenv_result = dotenvy::dotenv();

	tracing_subscriber::fmt()
		.compact()
		.with_ansi(true)
		.with_file(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::CLOSE)
		.with_target(true)
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
		)
		.init();

	if let Err(error) = dotenv_result {
		tracing::warn!(%error, "failed to load `.env` file");
	}

	let config = Config::new().context("load configuration")?;

	tracing::debug!(?config, "loaded configuration");

	if cfg!(not(feature = "production")) {
		tracing::warn!("running in development mode");
	}

	ball_dont_lie_api::run(config).await
}
