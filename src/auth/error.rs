//! The errors that can occur when issuing tokens or authorizing requests.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when issuing tokens or authorizing requests.
///
/// Every variant is terminal for the request it occurred in.
#[derive(Debug, Error)]
pub enum Error {
	/// The `Authorization` header was missing, or did not contain a bearer
	/// token.
	#[error("Missing token")]
	MissingToken,

	/// The token's signature did not verify, its claims could not be decoded,
	/// or it has expired.
	///
	/// These cases are deliberately indistinguishable to the caller.
	#[error("Invalid or expired token")]
	InvalidOrExpiredToken,

	/// The token is valid, but does not carry the permission required for
	/// the request's method (or the method is not supported at all).
	#[error("Insufficient permissions")]
	InsufficientPermission,

	/// Signing a freshly issued token failed.
	///
	/// If this error ever gets constructed, it's a bug.
	#[error("internal server error")]
	EncodeJwt(#[source] jwt::errors::Error),
}

impl Error {
	/// The HTTP status code a response carrying this error should have.
	pub const fn status(&self) -> StatusCode {
		match self {
			Self::MissingToken | Self::InvalidOrExpiredToken => StatusCode::UNAUTHORIZED,
			Self::InsufficientPermission => StatusCode::FORBIDDEN,
			Self::EncodeJwt(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();

		if status.is_server_error() {
			tracing::error!(error = ?self, "internal server error occurred");
		} else {
			tracing::debug!(error = %self, %status, "rejecting request");
		}

		(status, Json(json!({ "error": self.to_string() }))).into_response()
	}
}
