//! Everything related to [OpenAPI].
//!
//! This project uses the [`utoipa`] crate for generating an OpenAPI
//! specification from code. The [`Spec`] struct in this module lists out all
//! the relevant types, routes, and other metadata that will be included in the
//! spec.
//!
//! [OpenAPI]: https://spec.openapis.org/oas/latest.html

use derive_more::{Deref, DerefMut};
use itertools::Itertools;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::security::Security;

pub mod parameters;
pub mod security;

#[derive(Debug, Clone, Deref, DerefMut, OpenApi)]
#[openapi(
  info(
    title = "Ball Don't Lie API",
    description = "CRUD over basketball players. Get a token from `/token` first.",
  ),
  modifiers(&Security),
  paths(
    crate::auth::http::get_token,
    crate::auth::http::post_token,

    crate::players::http::get_many,
    crate::players::http::create_player,
    crate::players::http::get_single,
    crate::players::http::replace_player,
    crate::players::http::update_player,
    crate::players::http::delete_player,
  ),
  components(
    schemas(
      crate::openapi::parameters::Offset,
      crate::openapi::parameters::Limit,
      crate::openapi::parameters::SortingOrder,

      crate::auth::IssueTokenRequest,
      crate::auth::TokenResponse,

      crate::players::Player,
      crate::players::NewPlayer,
      crate::players::PlayerUpdate,
      crate::players::CreatedPlayer,
      crate::players::SortPlayersBy,
      crate::players::FetchPlayersResponse,
    ),
  ),
)]
#[allow(missing_docs)]
pub struct Spec(utoipa::openapi::OpenApi);

impl Spec {
	/// Creates a new [`Spec`].
	pub fn new() -> Self {
		Self(Self::openapi())
	}

	/// Returns an iterator over the registered API routes and their allowed
	/// HTTP methods.
	pub fn routes(&self) -> impl Iterator<Item = (&str, String)> {
		self.paths.paths.iter().map(|(path, handler)| {
			let methods = handler
				.operations
				.keys()
				.map(|method| format!("{method:?}").to_uppercase())
				.join(", ");

			(path.as_str(), methods)
		})
	}

	/// Generates a JSON representation of this OpenAPI spec.
	pub fn as_json(&self) -> serde_json::Result<String> {
		self.to_pretty_json()
	}

	/// Creates a [`SwaggerUi`], which can be turned into an [`axum::Router`],
	/// that will serve a SwaggerUI web page and a JSON file representing this
	/// OpenAPI spec.
	pub fn swagger_ui(self) -> SwaggerUi {
		SwaggerUi::new("/docs/swagger-ui").url("/docs/openapi.json", self.0)
	}
}
