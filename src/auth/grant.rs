//! The payload of every token: who the caller claims to be, and what they may do.

use std::fmt;

use axum::http::Method;
use serde::{Deserialize, Serialize};

use super::{Permission, Permissions};

/// A role name.
///
/// Roles form an open set; the only one with special meaning is
/// [`Role::ADMIN`], which bypasses all permission checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
	/// The role with full access.
	pub const ADMIN: &'static str = "ADMIN";

	/// The role assigned when none was requested.
	pub const VISITOR: &'static str = "VISITOR";

	/// Creates a new [`Role`].
	pub fn new<S>(name: S) -> Self
	where
		S: Into<String>,
	{
		Self(name.into())
	}

	/// The default role.
	pub fn visitor() -> Self {
		Self::new(Self::VISITOR)
	}

	/// Whether this is [`Role::ADMIN`].
	///
	/// The comparison is case-sensitive.
	pub fn is_admin(&self) -> bool {
		self.0 == Self::ADMIN
	}

	/// The role's name.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// What a token grants its bearer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
	/// The bearer's role.
	pub role: Role,

	/// The bearer's capabilities.
	pub permissions: Permissions,
}

impl Grant {
	/// Checks whether this grant allows a request with the given `method`.
	///
	/// Admins are allowed everything; anybody else needs the permission
	/// returned by [`Permission::required_for()`].
	pub fn allows(&self, method: &Method) -> bool {
		if self.role.is_admin() {
			return true;
		}

		Permission::required_for(method).is_some_and(|required| self.permissions.contains(&required))
	}
}
