//! Everything for dealing with [JWTs].
//!
//! The main attraction in this module is the [`Jwt<T>`] struct. It wraps a
//! payload together with its issue and expiration timestamps, and can act as
//! an [extractor] in handlers that sit behind the [`AuthorizeLayer`].
//!
//! [JWTs]: https://jwt.io/introduction/
//! [extractor]: axum::extract
//! [`AuthorizeLayer`]: super::AuthorizeLayer

use std::time::Duration;
use std::{fmt, ops};

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Error;

/// A JWT.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwt<T> {
	/// The payload to encode in the token.
	#[serde(flatten)]
	payload: T,

	/// Timestamp (in seconds) of when this token was issued.
	#[serde(rename = "iat")]
	issued_at: u64,

	/// Timestamp (in seconds) of when this token will expire.
	#[serde(rename = "exp")]
	expiration_timestamp: u64,
}

impl<T> Jwt<T> {
	/// Creates a new [`Jwt`] issued at `issued_at` which expires `ttl` later.
	pub fn new(payload: T, issued_at: u64, ttl: Duration) -> Self {
		Self {
			payload,
			issued_at,
			expiration_timestamp: issued_at.saturating_add(ttl.as_secs()),
		}
	}

	/// Returns a reference to the inner payload.
	pub const fn payload(&self) -> &T {
		&self.payload
	}

	/// Returns the inner payload.
	pub fn into_payload(self) -> T {
		self.payload
	}

	/// Returns a unix timestamp of when this token was issued.
	pub const fn issued_at(&self) -> u64 {
		self.issued_at
	}

	/// Returns a unix timestamp of when this token will expire.
	pub const fn expires_at(&self) -> u64 {
		self.expiration_timestamp
	}

	/// Returns a [`chrono::DateTime`] of when this token will expire.
	pub fn expires_on(&self) -> Option<DateTime<Utc>> {
		let secs = i64::try_from(self.expiration_timestamp).ok()?;

		DateTime::from_timestamp(secs, 0)
	}

	/// Checks if this token has expired at the given unix timestamp.
	///
	/// A token is no longer valid from its expiration second onwards.
	pub const fn has_expired_at(&self, now: u64) -> bool {
		self.expiration_timestamp <= now
	}
}

impl<T> fmt::Debug for Jwt<T>
where
	T: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut debug = f.debug_struct("Jwt");

		debug.field("payload", self.payload());

		match self.expires_on() {
			Some(date) => debug.field(
				"expires_on",
				&format_args!("{}", date.format("%Y/%m/%d %H:%M:%S")),
			),
			None => debug.field("expires_on", &self.expiration_timestamp),
		};

		debug.finish()
	}
}

impl<T> ops::Deref for Jwt<T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		self.payload()
	}
}

/// Handlers behind the [`AuthorizeLayer`] can extract the token it validated.
///
/// [`AuthorizeLayer`]: super::AuthorizeLayer
#[async_trait]
impl<T, S> FromRequestParts<S> for Jwt<T>
where
	T: Clone + Send + Sync + 'static,
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut request::Parts, _state: &S) -> Result<Self, Error> {
		parts
			.extensions
			.get::<Self>()
			.cloned()
			.ok_or(Error::MissingToken)
	}
}
