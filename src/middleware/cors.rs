//! CORS middlewares.

use std::time::Duration;

use axum::http::{header, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// How long browsers may cache a preflight response.
const MAX_AGE: Duration = Duration::from_secs(3600);

/// Creates a CORS layer that allows requests from any origin, with any of the
/// methods the API serves.
///
/// Credentials (cookies) are not allowed; tokens travel in the
/// `Authorization` header instead.
pub fn any_origin() -> CorsLayer {
	CorsLayer::new()
		.allow_origin(AllowOrigin::any())
		.allow_methods([
			Method::GET,
			Method::POST,
			Method::PUT,
			Method::PATCH,
			Method::DELETE,
			Method::OPTIONS,
		])
		.allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
		.allow_credentials(false)
		.max_age(MAX_AGE)
}
