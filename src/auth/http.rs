//! HTTP handlers for issuing tokens.

use axum::extract::State;
use axum::{routing, Json, Router};
use axum_extra::extract::Query;

use super::{Error, IssueTokenRequest, TokenIssuer, TokenQuery, TokenResponse};

impl From<TokenIssuer> for Router {
	fn from(issuer: TokenIssuer) -> Self {
		Router::new()
			.route("/", routing::get(get_token).post(post_token))
			.with_state(issuer)
	}
}

/// Issue a token.
///
/// Permissions default to `READ` and the role defaults to `VISITOR`.
#[tracing::instrument(skip_all, err(Debug, level = "debug"))]
#[utoipa::path(
  get,
  path = "/token",
  tag = "Auth",
  params(TokenQuery),
  responses(
    (status = 200, body = TokenResponse),
  ),
)]
pub(crate) async fn get_token(
	State(issuer): State<TokenIssuer>,
	Query(query): Query<TokenQuery>,
) -> Result<TokenResponse, Error> {
	let credential = issuer.issue(IssueTokenRequest::from(query))?;

	Ok(TokenResponse { token: credential.token })
}

/// Issue a token.
///
/// Same as `GET /token`, but with a JSON body.
#[tracing::instrument(skip_all, err(Debug, level = "debug"))]
#[utoipa::path(
  post,
  path = "/token",
  tag = "Auth",
  request_body = IssueTokenRequest,
  responses(
    (status = 200, body = TokenResponse),
    (status = 400, description = "the request body was malformed"),
  ),
)]
pub(crate) async fn post_token(
	State(issuer): State<TokenIssuer>,
	Json(req): Json<IssueTokenRequest>,
) -> Result<TokenResponse, Error> {
	let credential = issuer.issue(req)?;

	Ok(TokenResponse { token: credential.token })
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::Duration;

	use axum::body::Body;
	use axum::extract::Request;
	use axum::http::{header, Method, StatusCode};
	use tower::ServiceExt;

	use super::*;
	use crate::auth::{Grant, Jwt, Permission, Permissions, Role, SigningKeys};

	fn router() -> Router {
		let keys = Arc::new(SigningKeys::new("secret"));

		Router::from(TokenIssuer::new(keys, Duration::from_secs(60)))
	}

	async fn grant(req: Request) -> color_eyre::Result<Grant> {
		let res = router().oneshot(req).await?;

		color_eyre::eyre::ensure!(res.status() == StatusCode::OK, "status was {}", res.status());

		let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
		let TokenResponse { token } = serde_json::from_slice(&body)?;
		let jwt = SigningKeys::new("secret").decode::<Jwt<Grant>>(&token)?;

		Ok(jwt.into_payload())
	}

	#[tokio::test]
	async fn get_with_defaults() -> color_eyre::Result<()> {
		let req = Request::builder().uri("/").body(Body::empty())?;
		let grant = grant(req).await?;

		assert_eq!(grant.role, Role::visitor());
		assert_eq!(grant.permissions, [Permission::Read].into_iter().collect::<Permissions>());

		Ok(())
	}

	#[tokio::test]
	async fn get_with_query() -> color_eyre::Result<()> {
		let req = Request::builder()
			.uri("/?role=COACH&permissions=READ,CREATE&permissions=DELETE")
			.body(Body::empty())?;

		let grant = grant(req).await?;

		assert_eq!(grant.role, Role::new("COACH"));
		assert_eq!(
			grant.permissions,
			[Permission::Read, Permission::Create, Permission::Delete]
				.into_iter()
				.collect::<Permissions>(),
		);

		Ok(())
	}

	#[tokio::test]
	async fn post_with_body() -> color_eyre::Result<()> {
		let req = Request::builder()
			.method(Method::POST)
			.uri("/")
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(r#"{ "role": "ADMIN", "permissions": [] }"#))?;

		let grant = grant(req).await?;

		assert!(grant.role.is_admin());
		assert_eq!(grant.permissions, [Permission::Read].into_iter().collect::<Permissions>());

		Ok(())
	}
}
