//! Capabilities carried by a token.
//!
//! A [`Permission`] is a single capability string such as `READ` or `DELETE`.
//! Tokens may carry arbitrary strings; the four well-known ones have their own
//! variants, everything else is kept verbatim in [`Permission::Other`].

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single capability.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
	/// `READ`
	Read,

	/// `CREATE`
	Create,

	/// `UPDATE`
	Update,

	/// `DELETE`
	Delete,

	/// Any other capability string.
	///
	/// These are accepted on issuance, but no HTTP method requires them.
	Other(String),
}

impl Permission {
	/// Returns the permission a request with the given `method` requires.
	///
	/// Methods outside of the table return `None`; such requests are always
	/// denied unless the caller is an admin.
	///
	/// | Method          | Permission |
	/// |-----------------|------------|
	/// | `GET`           | `READ`     |
	/// | `POST`          | `CREATE`   |
	/// | `PUT` / `PATCH` | `UPDATE`   |
	/// | `DELETE`        | `DELETE`   |
	pub fn required_for(method: &Method) -> Option<Self> {
		match *method {
			Method::GET => Some(Self::Read),
			Method::POST => Some(Self::Create),
			Method::PUT | Method::PATCH => Some(Self::Update),
			Method::DELETE => Some(Self::Delete),
			_ => None,
		}
	}

	/// The string representation of this permission.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Read => "READ",
			Self::Create => "CREATE",
			Self::Update => "UPDATE",
			Self::Delete => "DELETE",
			Self::Other(other) => other.as_str(),
		}
	}
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<String> for Permission {
	fn from(value: String) -> Self {
		match value.as_str() {
			"READ" => Self::Read,
			"CREATE" => Self::Create,
			"UPDATE" => Self::Update,
			"DELETE" => Self::Delete,
			_ => Self::Other(value),
		}
	}
}

impl FromStr for Permission {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s.to_owned()))
	}
}

impl Serialize for Permission {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.as_str().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Permission {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(Self::from)
	}
}

/// A set of [`Permission`]s.
///
/// Duplicates collapse; the encoded form is a JSON array.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(BTreeSet<Permission>);

impl Permissions {
	/// Creates an empty set.
	pub const fn new() -> Self {
		Self(BTreeSet::new())
	}

	/// Checks whether `permission` is part of this set.
	pub fn contains(&self, permission: &Permission) -> bool {
		self.0.contains(permission)
	}

	/// Checks whether this set is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the number of distinct permissions in this set.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns an iterator over the permissions in this set.
	pub fn iter(&self) -> btree_set::Iter<'_, Permission> {
		self.0.iter()
	}
}

impl fmt::Display for Permissions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}]", self.0.iter().join(", "))
	}
}

impl FromIterator<Permission> for Permissions {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = Permission>,
	{
		Self(iter.into_iter().collect())
	}
}

impl<'a> IntoIterator for &'a Permissions {
	type Item = &'a Permission;
	type IntoIter = btree_set::Iter<'a, Permission>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn method_table() {
		assert_eq!(Permission::required_for(&Method::GET), Some(Permission::Read));
		assert_eq!(Permission::required_for(&Method::POST), Some(Permission::Create));
		assert_eq!(Permission::required_for(&Method::PUT), Some(Permission::Update));
		assert_eq!(Permission::required_for(&Method::PATCH), Some(Permission::Update));
		assert_eq!(Permission::required_for(&Method::DELETE), Some(Permission::Delete));
		assert_eq!(Permission::required_for(&Method::OPTIONS), None);
		assert_eq!(Permission::required_for(&Method::HEAD), None);
		assert_eq!(Permission::required_for(&Method::TRACE), None);
	}

	#[test]
	fn unknown_permissions_are_kept_verbatim() {
		let permission = "read".parse::<Permission>().unwrap();

		assert_eq!(permission, Permission::Other(String::from("read")));
		assert_eq!(permission.to_string(), "read");
	}

	#[test]
	fn duplicates_collapse() -> color_eyre::Result<()> {
		let permissions = serde_json::from_str::<Permissions>(r#"["READ", "READ", "FLY"]"#)?;

		assert_eq!(permissions.len(), 2);
		assert!(permissions.contains(&Permission::Read));
		assert!(permissions.contains(&Permission::Other(String::from("FLY"))));
		assert_eq!(serde_json::to_string(&permissions)?, r#"["READ","FLY"]"#);

		Ok(())
	}
}
