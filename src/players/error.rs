//! The errors that can occur when interacting with this service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the player service.
#[derive(Debug, Error)]
pub enum Error {
	/// We have no data to return.
	#[error("no data")]
	NoData,

	/// A request targeted at a specific player was made, but the player could
	/// not be found in the database.
	#[error("player does not exist")]
	PlayerDoesNotExist,

	/// A partial update did not contain any fields.
	#[error("update must change at least one field")]
	EmptyUpdate,

	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),
}

impl Error {
	/// The HTTP status code a response carrying this error should have.
	pub const fn status(&self) -> StatusCode {
		match self {
			Self::NoData => StatusCode::NO_CONTENT,
			Self::PlayerDoesNotExist => StatusCode::NOT_FOUND,
			Self::EmptyUpdate => StatusCode::BAD_REQUEST,
			Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();

		match &self {
			Self::NoData => return status.into_response(),
			Self::Database(error) => {
				tracing::error!(target: "ball_dont_lie_api::audit_log", ?error, "database error");
			}
			Self::PlayerDoesNotExist | Self::EmptyUpdate => {
				tracing::debug!(error = %self, %status, "rejecting request");
			}
		}

		(status, Json(json!({ "error": self.to_string() }))).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn no_data_has_no_body() -> color_eyre::Result<()> {
		let response = Error::NoData.into_response();

		assert_eq!(response.status(), StatusCode::NO_CONTENT);
		assert!(axum::body::to_bytes(response.into_body(), usize::MAX).await?.is_empty());

		Ok(())
	}

	#[tokio::test]
	async fn database_errors_are_not_leaked() -> color_eyre::Result<()> {
		let response = Error::Database(sqlx::Error::PoolTimedOut).into_response();

		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

		let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
		let body = serde_json::from_slice::<serde_json::Value>(&body)?;

		assert_eq!(body, json!({ "error": "something went wrong" }));

		Ok(())
	}
}
