//! Key material shared by the [`TokenIssuer`] and the [`Authorizer`].
//!
//! [`TokenIssuer`]: super::TokenIssuer
//! [`Authorizer`]: super::Authorizer

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// The algorithm every token is signed with.
const ALGORITHM: jwt::Algorithm = jwt::Algorithm::HS512;

/// Symmetric signing keys, built once from the configured secret.
pub struct SigningKeys {
	/// Header data to use when signing JWTs.
	header: jwt::Header,

	/// Secret key to use when signing JWTs.
	encoding_key: jwt::EncodingKey,

	/// Secret key to use when validating JWTs.
	decoding_key: jwt::DecodingKey,

	/// Extra validation steps when validating JWTs.
	///
	/// Expiration is checked by the caller against its own [`Clock`], so
	/// it is turned off here.
	///
	/// [`Clock`]: super::Clock
	validation: jwt::Validation,
}

impl fmt::Debug for SigningKeys {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SigningKeys")
			.field("algorithm", &ALGORITHM)
			.finish_non_exhaustive()
	}
}

impl SigningKeys {
	/// Derives signing keys from a plain-text secret.
	pub fn new(secret: &str) -> Self {
		let mut validation = jwt::Validation::new(ALGORITHM);
		validation.validate_exp = false;
		validation.set_required_spec_claims(&["exp"]);

		Self {
			header: jwt::Header::new(ALGORITHM),
			encoding_key: jwt::EncodingKey::from_secret(secret.as_bytes()),
			decoding_key: jwt::DecodingKey::from_secret(secret.as_bytes()),
			validation,
		}
	}

	/// Encodes and signs `claims`.
	pub fn encode<T>(&self, claims: &T) -> jwt::errors::Result<String>
	where
		T: Serialize,
	{
		jwt::encode(&self.header, claims, &self.encoding_key)
	}

	/// Verifies the signature of `token` and decodes its claims.
	pub fn decode<T>(&self, token: &str) -> jwt::errors::Result<T>
	where
		T: DeserializeOwned,
	{
		jwt::decode(token, &self.decoding_key, &self.validation).map(|data| data.claims)
	}
}
