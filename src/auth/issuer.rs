//! Minting tokens.

use std::sync::Arc;
use std::time::Duration;

use derive_more::Debug;

use super::{Clock, Error, Grant, IssueTokenRequest, Jwt, Permission, Result, Role, SigningKeys};

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct Credential {
	/// The encoded token.
	#[debug("*****")]
	pub token: String,

	/// Unix timestamp of when the token was issued.
	pub issued_at: u64,

	/// Unix timestamp of when the token expires.
	pub expires_at: u64,
}

/// Issues signed tokens with a fixed lifetime.
///
/// Issuing is unauthenticated and keeps no record of what it handed out; a
/// token stops being valid only by expiring.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
	/// The keys to sign with.
	keys: Arc<SigningKeys>,

	/// How long issued tokens stay valid.
	ttl: Duration,

	/// Source of the `iat` claim.
	clock: Clock,
}

impl TokenIssuer {
	/// Creates a new [`TokenIssuer`] using the system clock.
	pub fn new(keys: Arc<SigningKeys>, ttl: Duration) -> Self {
		Self { keys, ttl, clock: Clock::System }
	}

	/// Replaces the clock this issuer reads the current time from.
	#[must_use]
	pub fn with_clock(self, clock: Clock) -> Self {
		Self { clock, ..self }
	}

	/// How long issued tokens stay valid.
	pub const fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Issues a token for the requested role and permissions.
	///
	/// Missing or empty permissions default to `[READ]`; a missing or empty
	/// role defaults to `VISITOR`. Nothing else is validated.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub fn issue(&self, req: IssueTokenRequest) -> Result<Credential> {
		self.issue_at(req, self.clock.now())
	}

	/// Same as [`TokenIssuer::issue()`], but with an explicit issue time.
	pub fn issue_at(&self, req: IssueTokenRequest, now: u64) -> Result<Credential> {
		let jwt = Jwt::new(grant_for(req), now, self.ttl);
		let token = self.keys.encode(&jwt).map_err(Error::EncodeJwt)?;

		tracing::info! {
			target: "ball_dont_lie_api::audit_log",
			role = %jwt.role,
			permissions = %jwt.permissions,
			expires_at = jwt.expires_at(),
			"issued token",
		};

		Ok(Credential {
			token,
			issued_at: jwt.issued_at(),
			expires_at: jwt.expires_at(),
		})
	}
}

/// Applies the defaults for missing role / permissions.
fn grant_for(IssueTokenRequest { role, permissions }: IssueTokenRequest) -> Grant {
	let role = role
		.filter(|role| !role.is_empty())
		.map_or_else(Role::visitor, Role::new);

	let permissions = match permissions {
		Some(permissions) if !permissions.is_empty() => {
			permissions.into_iter().map(Permission::from).collect()
		}
		_ => [Permission::Read].into_iter().collect(),
	};

	Grant { role, permissions }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::auth::Permissions;

	fn issuer() -> TokenIssuer {
		TokenIssuer::new(Arc::new(SigningKeys::new("secret")), Duration::from_secs(60))
	}

	fn request(role: Option<&str>, permissions: Option<&[&str]>) -> IssueTokenRequest {
		IssueTokenRequest {
			role: role.map(String::from),
			permissions: permissions.map(|p| p.iter().copied().map(String::from).collect()),
		}
	}

	fn visitor_read() -> Grant {
		Grant {
			role: Role::visitor(),
			permissions: [Permission::Read].into_iter().collect(),
		}
	}

	#[test]
	fn defaults() {
		assert_eq!(grant_for(request(None, None)), visitor_read());
		assert_eq!(grant_for(request(Some(""), Some(&[]))), visitor_read());
	}

	#[test]
	fn anything_goes() {
		let grant = grant_for(request(Some("coach"), Some(&["READ", "READ", "SCOUT"])));

		assert_eq!(grant.role, Role::new("coach"));
		assert_eq!(
			grant.permissions,
			[Permission::Read, Permission::Other(String::from("SCOUT"))]
				.into_iter()
				.collect::<Permissions>(),
		);
	}

	#[test]
	fn expiration_is_ttl_after_issue() -> color_eyre::Result<()> {
		let issuer = issuer();
		let credential = issuer.issue_at(request(None, None), 1_000)?;

		assert_eq!(credential.issued_at, 1_000);
		assert_eq!(credential.expires_at, 1_060);

		let decoded = SigningKeys::new("secret").decode::<Jwt<Grant>>(&credential.token)?;

		assert_eq!(decoded, Jwt::new(visitor_read(), 1_000, Duration::from_secs(60)));

		Ok(())
	}

	#[test]
	fn credentials_do_not_leak_into_logs() -> color_eyre::Result<()> {
		let credential = issuer().issue(request(Some("ADMIN"), None))?;

		assert!(!format!("{credential:?}").contains(&credential.token));

		Ok(())
	}
}
