//! Request / Response types for the token endpoints.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Request payload for issuing a token.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[schema(example = json!({ "role": "VISITOR", "permissions": ["READ"] }))]
pub struct IssueTokenRequest {
	/// The role to encode in the token.
	///
	/// Defaults to `VISITOR`.
	#[serde(default)]
	pub role: Option<String>,

	/// The permissions to encode in the token.
	///
	/// Defaults to `["READ"]`.
	#[serde(default)]
	pub permissions: Option<Vec<String>>,
}

/// Query parameters for `GET /token`.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TokenQuery {
	/// The role to encode in the token.
	#[serde(default)]
	role: Option<String>,

	/// The permissions to encode in the token.
	///
	/// Can be repeated, or contain a comma-separated list.
	#[serde(default)]
	permissions: Vec<String>,
}

impl From<TokenQuery> for IssueTokenRequest {
	fn from(TokenQuery { role, permissions }: TokenQuery) -> Self {
		let permissions = permissions
			.iter()
			.flat_map(|permissions| permissions.split(','))
			.map(str::trim)
			.filter(|permission| !permission.is_empty())
			.map(String::from)
			.collect::<Vec<_>>();

		Self {
			role,
			permissions: Some(permissions),
		}
	}
}

/// Response payload for issuing a token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
	/// The signed token.
	///
	/// Send it back as `Authorization: Bearer <token>`.
	pub token: String,
}

impl IntoResponse for TokenResponse {
	fn into_response(self) -> Response {
		Json(self).into_response()
	}
}
