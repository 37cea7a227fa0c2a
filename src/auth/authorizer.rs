//! Validating tokens and deciding whether a request may proceed.

use std::sync::Arc;

use axum::http::{header, HeaderMap, Method};

use super::{Clock, Error, Grant, Jwt, Permission, Result, SigningKeys};

/// The prefix a valid `Authorization` header must start with.
const BEARER_PREFIX: &str = "Bearer ";

/// Validates bearer tokens and checks them against the request method.
///
/// This is a pure function of the request head, the signing keys and the
/// clock; it holds no per-request state.
#[derive(Debug, Clone)]
pub struct Authorizer {
	/// The keys to verify signatures with.
	keys: Arc<SigningKeys>,

	/// Source of "now" for the expiration check.
	clock: Clock,
}

impl Authorizer {
	/// Creates a new [`Authorizer`] using the system clock.
	pub const fn new(keys: Arc<SigningKeys>) -> Self {
		Self { keys, clock: Clock::System }
	}

	/// Replaces the clock this authorizer reads the current time from.
	#[must_use]
	pub fn with_clock(self, clock: Clock) -> Self {
		Self { clock, ..self }
	}

	/// Runs the full pipeline for a request: extract the bearer token,
	/// validate it, and check it grants `method`.
	///
	/// On success, returns the decoded token.
	#[tracing::instrument(
		level = "debug",
		name = "auth::authorize",
		skip(self, headers),
		fields(role = tracing::field::Empty, permissions = tracing::field::Empty),
		err(Debug, level = "debug"),
	)]
	pub fn authorize(&self, method: &Method, headers: &HeaderMap) -> Result<Jwt<Grant>> {
		let jwt = self.authenticate(headers)?;

		tracing::Span::current()
			.record("role", format_args!("{}", jwt.role))
			.record("permissions", format_args!("{}", jwt.permissions));

		if !jwt.allows(method) {
			match Permission::required_for(method) {
				Some(required) => tracing::debug!(%required, "missing required permission"),
				None => tracing::debug!("unsupported method"),
			}

			return Err(Error::InsufficientPermission);
		}

		Ok(jwt)
	}

	/// Extracts and validates the bearer token in `headers` against the
	/// current time.
	pub fn authenticate(&self, headers: &HeaderMap) -> Result<Jwt<Grant>> {
		self.authenticate_at(headers, self.clock.now())
	}

	/// Same as [`Authorizer::authenticate()`], but with an explicit clock
	/// reading.
	pub fn authenticate_at(&self, headers: &HeaderMap, now: u64) -> Result<Jwt<Grant>> {
		let token = bearer_token(headers).ok_or(Error::MissingToken)?;
		let jwt = self.keys.decode::<Jwt<Grant>>(token).map_err(|error| {
			tracing::debug!(%error, "failed to decode token");
			Error::InvalidOrExpiredToken
		})?;

		if jwt.has_expired_at(now) {
			tracing::debug!(expires_at = jwt.expires_at(), now, "token has expired");
			return Err(Error::InvalidOrExpiredToken);
		}

		Ok(jwt)
	}
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-sensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
	headers
		.get(header::AUTHORIZATION)?
		.to_str()
		.ok()?
		.strip_prefix(BEARER_PREFIX)
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use axum::http::HeaderValue;

	use super::*;
	use crate::auth::{IssueTokenRequest, TokenIssuer};

	const SECRET: &str = "ballDontLieSecretKey";

	fn setup(ttl: Duration) -> (TokenIssuer, Authorizer, Clock) {
		let keys = Arc::new(SigningKeys::new(SECRET));
		let clock = Clock::manual(1_700_000_000);
		let issuer = TokenIssuer::new(Arc::clone(&keys), ttl).with_clock(clock.clone());
		let authorizer = Authorizer::new(keys).with_clock(clock.clone());

		(issuer, authorizer, clock)
	}

	fn token(issuer: &TokenIssuer, role: Option<&str>, permissions: &[&str]) -> String {
		let req = IssueTokenRequest {
			role: role.map(String::from),
			permissions: Some(permissions.iter().copied().map(String::from).collect()),
		};

		issuer.issue(req).map(|credential| credential.token).unwrap()
	}

	fn headers(value: &str) -> HeaderMap {
		let mut headers = HeaderMap::new();
		headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
		headers
	}

	fn bearer(token: &str) -> HeaderMap {
		headers(&format!("Bearer {token}"))
	}

	#[test]
	fn valid_right_after_issuing_and_invalid_after_ttl() {
		let (issuer, authorizer, clock) = setup(Duration::from_secs(60));
		let headers = bearer(&token(&issuer, None, &[]));

		assert!(authorizer.authenticate(&headers).is_ok());

		clock.advance(Duration::from_secs(59));
		assert!(authorizer.authenticate(&headers).is_ok());

		clock.advance(Duration::from_secs(1));
		assert!(matches!(authorizer.authenticate(&headers), Err(Error::InvalidOrExpiredToken)));
	}

	#[test]
	fn one_second_ttl() {
		let (issuer, authorizer, clock) = setup(Duration::from_secs(1));
		let headers = bearer(&token(&issuer, Some("VISITOR"), &["READ"]));

		assert!(authorizer.authorize(&Method::GET, &headers).is_ok());

		clock.advance(Duration::from_secs(2));

		assert!(matches!(
			authorizer.authorize(&Method::GET, &headers),
			Err(Error::InvalidOrExpiredToken),
		));
	}

	#[test]
	fn missing_or_malformed_header() {
		let (issuer, authorizer, _) = setup(Duration::from_secs(60));
		let token = token(&issuer, None, &[]);

		for headers in [
			HeaderMap::new(),
			headers(&token),
			headers(&format!("bearer {token}")),
			headers(&format!("Basic {token}")),
			headers("Bearer"),
		] {
			assert!(
				matches!(authorizer.authorize(&Method::GET, &headers), Err(Error::MissingToken)),
				"{headers:?}",
			);
		}
	}

	#[test]
	fn tampered_tokens_are_rejected() {
		let (issuer, authorizer, _) = setup(Duration::from_secs(60));
		let visitor = token(&issuer, Some("VISITOR"), &["READ"]);
		let foreign = TokenIssuer::new(Arc::new(SigningKeys::new("hunter2")), Duration::from_secs(60));
		let admin = token(&foreign, Some("ADMIN"), &[]);

		// admin header + claims, visitor signature
		let (admin_claims, _) = admin.rsplit_once('.').unwrap();
		let (_, visitor_signature) = visitor.rsplit_once('.').unwrap();
		let forged = format!("{admin_claims}.{visitor_signature}");

		for headers in [bearer(&forged), bearer(""), bearer("not.a.jwt")] {
			assert!(
				matches!(
					authorizer.authorize(&Method::GET, &headers),
					Err(Error::InvalidOrExpiredToken),
				),
				"{headers:?}",
			);
		}
	}

	#[test]
	fn foreign_secrets_are_rejected() {
		let (_, authorizer, _) = setup(Duration::from_secs(60));
		let foreign = TokenIssuer::new(Arc::new(SigningKeys::new("hunter2")), Duration::from_secs(60));
		let headers = bearer(&token(&foreign, Some("ADMIN"), &[]));

		assert!(matches!(
			authorizer.authorize(&Method::GET, &headers),
			Err(Error::InvalidOrExpiredToken),
		));
	}

	#[test]
	fn visitors_may_only_read() {
		let (issuer, authorizer, _) = setup(Duration::from_secs(60));
		let headers = bearer(&token(&issuer, Some("VISITOR"), &["READ"]));

		assert!(authorizer.authorize(&Method::GET, &headers).is_ok());

		for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS] {
			assert!(
				matches!(
					authorizer.authorize(&method, &headers),
					Err(Error::InsufficientPermission),
				),
				"{method}",
			);
		}
	}

	#[test]
	fn admins_may_do_anything() {
		let (issuer, authorizer, _) = setup(Duration::from_secs(60));
		let headers = bearer(&token(&issuer, Some("ADMIN"), &[]));

		for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS] {
			let jwt = authorizer.authorize(&method, &headers).unwrap();

			assert!(jwt.role.is_admin());
		}
	}

	#[test]
	fn defaults_behave_like_visitor_read() {
		let (issuer, authorizer, _) = setup(Duration::from_secs(60));
		let headers = bearer(&token(&issuer, None, &[]));
		let jwt = authorizer.authorize(&Method::GET, &headers).unwrap();

		assert_eq!(jwt.role.as_str(), "VISITOR");
		assert!(matches!(
			authorizer.authorize(&Method::DELETE, &headers),
			Err(Error::InsufficientPermission),
		));
	}
}
