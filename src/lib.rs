#![doc = include_str!("../README.md")]

use std::fmt::Write;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::connect_info::IntoMakeServiceWithConnectInfo;
use axum::extract::ConnectInfo;
use axum::Router;
use ::sqlx::{MySql, Pool};
use tokio::net::TcpListener;
use tokio::signal;

mod config;
pub use config::Config;

#[cfg(test)]
mod testing;

pub mod auth;
pub mod middleware;
pub mod openapi;
pub mod players;
pub mod sqlx;

use auth::{AuthorizeLayer, Authorizer, SigningKeys, TokenIssuer};
use players::PlayerService;

#[allow(clippy::missing_docs_in_private_items)]
type Server = axum::serve::Serve<
	IntoMakeServiceWithConnectInfo<Router, SocketAddr>,
	axum::middleware::AddExtension<Router, ConnectInfo<SocketAddr>>,
>;

/// Run the API.
///
/// This function will not exit until a SIGINT signal is received.
/// If you want to supply a custom signal for graceful shutdown, use
/// [`run_until()`] instead.
pub async fn run(config: Config) -> anyhow::Result<()> {
	server(config)
		.await
		.context("build http server")?
		.with_graceful_shutdown(sigint())
		.await
		.context("run http server")
}

/// Run the API until a given future completes.
///
/// This function is the same as [`run()`], except that it also waits for the
/// provided `until` future, and shuts down the server when that future
/// resolves.
pub async fn run_until<Until>(config: Config, until: Until) -> anyhow::Result<()>
where
	Until: Future<Output = ()> + Send + 'static,
{
	server(config)
		.await
		.context("build http server")?
		.with_graceful_shutdown(async move {
			tokio::select! {
				() = until => {}
				() = sigint() => {}
			}
		})
		.await
		.context("run http server")
}

/// Builds the full API service.
///
/// The signing keys are derived from `config` once and shared between the
/// `/token` endpoint and the authorization layer in front of everything else.
///
/// Layers, from the outside in: request logging, CORS, authorization. CORS
/// preflight requests are therefore answered without a token.
pub fn router(database: Pool<MySql>, config: &Config) -> Router {
	let keys = Arc::new(SigningKeys::new(&config.jwt_secret));
	let issuer = TokenIssuer::new(Arc::clone(&keys), config.jwt_ttl);
	let authorizer = Authorizer::new(keys);

	Router::new()
		.nest("/token", Router::from(issuer))
		.nest("/players", Router::from(PlayerService::new(database)))
		.merge(openapi::Spec::new().swagger_ui())
		.layer(AuthorizeLayer::new(authorizer, config.excluded_paths.clone()))
		.layer(middleware::cors::any_origin())
		.layer(middleware::logging::layer!())
}

/// Runs the necessary setup for the API and returns a future that will run
/// the server when polled.
///
/// See [`run()`] and [`run_until()`].
async fn server(config: Config) -> anyhow::Result<Server> {
	tracing::debug!(addr = %config.addr, "establishing TCP connection");

	let tcp_listener = TcpListener::bind(config.addr)
		.await
		.context("bind tcp socket")?;

	let addr = tcp_listener.local_addr().context("get tcp addr")?;
	tracing::info!(%addr, prod = cfg!(feature = "production"), "listening for requests");

	tracing::debug!("connecting to database");

	let database = Pool::<MySql>::connect(config.database_url.as_str())
		.await
		.context("connect to database")?;

	::sqlx::migrate!("./migrations")
		.run(&database)
		.await
		.context("run migrations")?;

	let mut routes_message = String::from("registering routes:\n");

	for (path, methods) in openapi::Spec::new().routes() {
		writeln!(&mut routes_message, "    • {path} => [{methods}]")?;
	}

	tracing::info!("{routes_message}");
	tracing::info!(
		excluded = ?config.excluded_paths,
		ttl = ?config.jwt_ttl,
		"initializing API service"
	);

	let api_service = router(database, &config).into_make_service_with_connect_info::<SocketAddr>();

	Ok(axum::serve(tcp_listener, api_service))
}

/// Waits for a SIGINT signal from the operating system.
#[tracing::instrument(name = "runtime::signals")]
async fn sigint() {
	let signal_result = signal::ctrl_c().await;

	if let Err(err) = signal_result {
		tracing::error!(target: "ball_dont_lie_api::audit_log", "failed to receive SIGINT: {err}");
	} else {
		tracing::warn!(target: "ball_dont_lie_api::audit_log", "received SIGINT; shutting down...");
	}
}
