//! This module contains useful helper types for query parameters.

use derive_more::Display;
use serde::{Deserialize, Deserializer};
use utoipa::openapi::schema::Schema;
use utoipa::openapi::{ObjectBuilder, RefOr, SchemaType};
use utoipa::ToSchema;

/// An offset used for pagination.
#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(pub u64);

impl<'de> Deserialize<'de> for Offset {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Option::<u64>::deserialize(deserializer)
			.map(Option::unwrap_or_default)
			.map(Self)
	}
}

impl<'s> ToSchema<'s> for Offset {
	fn schema() -> (&'s str, RefOr<Schema>) {
		(
			"Offset",
			Schema::Object(
				ObjectBuilder::new()
					.description(Some("used for pagination"))
					.schema_type(SchemaType::Integer)
					.minimum(Some(0.0))
					.default(Some(0.into()))
					.build(),
			)
			.into(),
		)
	}
}

/// A limit on the amount of returned results from a request.
///
/// This will default to `DEFAULT` (100 unless overridden), and max out at
/// `MAX` (1000 unless overridden).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Limit<const MAX: u64 = 1000, const DEFAULT: u64 = 100>(pub u64);

impl<const MAX: u64, const DEFAULT: u64> Default for Limit<MAX, DEFAULT> {
	fn default() -> Self {
		Self(DEFAULT)
	}
}

impl<'de, const MAX: u64, const DEFAULT: u64> Deserialize<'de> for Limit<MAX, DEFAULT> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		use serde::de::Error;

		match Option::deserialize(deserializer).map(|value| value.unwrap_or(DEFAULT))? {
			value if value <= MAX => Ok(Self(value)),
			value => Err(Error::custom(format_args!(
				"invalid limit `{value}`; cannot exceed `{MAX}`"
			))),
		}
	}
}

impl<'s, const MAX: u64, const DEFAULT: u64> ToSchema<'s> for Limit<MAX, DEFAULT> {
	fn schema() -> (&'s str, RefOr<Schema>) {
		(
			"Limit",
			Schema::Object(
				ObjectBuilder::new()
					.description(Some("limits the amount of returned values"))
					.schema_type(SchemaType::Integer)
					.minimum(Some(0.0))
					.build(),
			)
			.into(),
		)
	}
}

/// A query parameter to decide a sorting order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortingOrder {
	/// Sort from lowest to highest.
	#[default]
	Ascending,

	/// Sort from highest to lowest.
	Descending,
}

impl SortingOrder {
	/// Returns a SQL keyword that can be used in an `ORDER BY` clause.
	pub const fn sql(&self) -> &'static str {
		match *self {
			SortingOrder::Ascending => " ASC ",
			SortingOrder::Descending => " DESC ",
		}
	}
}
