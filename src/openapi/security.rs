//! Security modifiers for the OpenAPI spec.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::OpenApi;

/// Name of the security scheme protected routes refer to.
pub const BEARER: &str = "Bearer";

/// Security modifier for the OpenAPI spec.
pub struct Security;

impl utoipa::Modify for Security {
	fn modify(&self, openapi: &mut OpenApi) {
		let bearer = SecurityScheme::Http(
			HttpBuilder::new()
				.scheme(HttpAuthScheme::Bearer)
				.bearer_format("JWT")
				.build(),
		);

		openapi
			.components
			.get_or_insert_with(Default::default)
			.add_security_scheme(BEARER, bearer);
	}
}
