//! Module containing the [`Config`] struct, the API's configuration.

use std::env;
use std::error::Error as StdError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use derive_more::Debug;
use url::Url;

use crate::auth::ExcludedPaths;

/// The signing secret used if none is configured.
///
/// Anybody can read this, so tokens signed with it are forgeable.
pub const DEFAULT_JWT_SECRET: &str = "ballDontLieSecretKey";

/// How long issued tokens stay valid if nothing else is configured.
pub const DEFAULT_JWT_TTL: Duration = Duration::from_secs(60);

/// Path prefixes that skip authorization if nothing else is configured.
pub const DEFAULT_EXCLUDED_PATHS: &str = "/token,/docs";

/// Configuration values for the API.
///
/// These are read from the environment on startup.
#[derive(Debug, Clone)]
pub struct Config {
	/// The ip address and port the API is going to listen on.
	#[debug("{addr}")]
	pub addr: SocketAddr,

	/// The database URL that the API will connect to.
	#[debug("{}", database_url.as_str())]
	pub database_url: Url,

	/// The secret tokens are signed with.
	#[debug("*****")]
	pub jwt_secret: String,

	/// How long issued tokens stay valid.
	pub jwt_ttl: Duration,

	/// Path prefixes that skip authorization.
	pub excluded_paths: ExcludedPaths,
}

impl Config {
	/// Creates a new [`Config`] object by reading from the environment.
	pub fn new() -> anyhow::Result<Self> {
		Self::from_lookup(|var| env::var(var).ok())
	}

	/// Creates a new [`Config`] object, reading variables through `lookup`.
	fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let ip_addr = parse_or(&lookup, "BDL_API_IP", IpAddr::V4(Ipv4Addr::LOCALHOST))?;
		let port = parse_or(&lookup, "BDL_API_PORT", 8080_u16)?;
		let addr = SocketAddr::new(ip_addr, port);
		let database_url = parse(&lookup, "DATABASE_URL")?;
		let jwt_secret = parse_or(&lookup, "BDL_JWT_SECRET", String::from(DEFAULT_JWT_SECRET))?;
		let jwt_ttl = parse_or(&lookup, "BDL_JWT_TTL", DEFAULT_JWT_TTL.as_secs())
			.map(Duration::from_secs)?;

		let excluded_paths = ExcludedPaths::new(
			lookup("BDL_AUTH_EXCLUDED_PATHS")
				.as_deref()
				.unwrap_or(DEFAULT_EXCLUDED_PATHS)
				.split(','),
		);

		if jwt_ttl.is_zero() {
			anyhow::bail!("`BDL_JWT_TTL` must be at least 1 second");
		}

		if jwt_secret == DEFAULT_JWT_SECRET {
			if cfg!(feature = "production") {
				anyhow::bail!("`BDL_JWT_SECRET` must be set to something other than the default");
			}

			tracing::warn!("using the default JWT secret; tokens can be forged by anyone");
		}

		Ok(Self { addr, database_url, jwt_secret, jwt_ttl, excluded_paths })
	}
}

/// Parses an environment variable into a `T`.
fn parse<F, T>(lookup: F, var: &str) -> anyhow::Result<T>
where
	F: Fn(&str) -> Option<String>,
	T: FromStr,
	T::Err: StdError + Send + Sync + 'static,
{
	let value = lookup(var).with_context(|| format!("missing `{var}` environment variable"))?;

	if value.is_empty() {
		anyhow::bail!("`{var}` cannot be empty");
	}

	<T as FromStr>::from_str(&value).with_context(|| format!("failed to parse `{var}`"))
}

/// Parses an environment variable into a `T`, returning `default` if the
/// variable is not set or empty.
fn parse_or<F, T>(lookup: F, var: &str, default: T) -> anyhow::Result<T>
where
	F: Fn(&str) -> Option<String>,
	T: FromStr,
	T::Err: StdError + Send + Sync + 'static,
{
	match lookup(var) {
		None => Ok(default),
		Some(value) if value.is_empty() => Ok(default),
		Some(value) => {
			<T as FromStr>::from_str(&value).with_context(|| format!("failed to parse `{var}`"))
		}
	}
}
