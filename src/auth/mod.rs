//! Token issuance and request authorization.
//!
//! Clients obtain a token from `/token` (see [`TokenIssuer`]), stating the
//! role and permissions they want. No authentication happens there; the token
//! simply records the claim, signed with a secret only the API knows, and
//! expires after a fixed amount of time.
//!
//! Every other request has to carry that token as `Authorization: Bearer …`.
//! The [`AuthorizeLayer`] sits in front of the whole router and runs the
//! [`Authorizer`] on each request:
//!
//! 1. no (or a malformed) header → `401`, [`Error::MissingToken`]
//! 2. bad signature, undecodable claims, or expired → `401`,
//!    [`Error::InvalidOrExpiredToken`]
//! 3. role `ADMIN` → allowed
//! 4. otherwise the request method must map to a permission the token carries
//!    (see [`Permission::required_for()`]) → else `403`,
//!    [`Error::InsufficientPermission`]
//!
//! On success the decoded [`Jwt<Grant>`] is stored in the request extensions,
//! where handlers can extract it.
//!
//! Neither side keeps state; the signing keys are built once on startup and
//! shared between issuer and authorizer.

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

pub(crate) mod models;
pub use models::{IssueTokenRequest, TokenQuery, TokenResponse};

mod permissions;
pub use permissions::{Permission, Permissions};

mod grant;
pub use grant::{Grant, Role};

pub mod jwt;
pub use jwt::Jwt;

mod clock;
pub use clock::Clock;

mod keys;
pub use keys::SigningKeys;

mod issuer;
pub use issuer::{Credential, TokenIssuer};

mod authorizer;
pub use authorizer::Authorizer;

mod layer;
pub use layer::{AuthorizeLayer, AuthorizeService, ExcludedPaths};
