//! Utilities for SQL queries.

use std::fmt::Display;

use derive_more::{Debug, Deref, DerefMut};
use sqlx::{MySql, QueryBuilder};

use crate::openapi::parameters::{Limit, Offset, SortingOrder};

/// Extension trait for [`sqlx::QueryBuilder`].
pub trait QueryBuilderExt {
	/// Pushes `LIMIT` and `OFFSET` clauses into the query.
	fn push_limits(&mut self, limit: Limit, offset: Offset) -> &mut Self;

	/// Pushes an `ORDER BY` clause into the query.
	fn order_by<C>(&mut self, order: SortingOrder, columns: C) -> &mut Self
	where
		C: Display;
}

impl QueryBuilderExt for QueryBuilder<'_, MySql> {
	fn push_limits(&mut self, limit: Limit, offset: Offset) -> &mut Self {
		self.push(" LIMIT ")
			.push_bind(limit.0)
			.push(" OFFSET ")
			.push_bind(offset.0)
	}

	fn order_by<C>(&mut self, order: SortingOrder, columns: C) -> &mut Self
	where
		C: Display,
	{
		self.push(" ORDER BY ").push(columns).push(order.sql())
	}
}

/// Query builder for building `UPDATE` queries.
///
/// This can be used transparently like a [`QueryBuilder`], but also has extra
/// methods. See [`UpdateQuery::set()`] for more details.
#[derive(Debug, Deref, DerefMut)]
pub struct UpdateQuery<'q> {
	/// The underlying query builder.
	#[deref]
	#[deref_mut]
	#[debug(skip)]
	query: QueryBuilder<'q, MySql>,

	/// The current delimiter state.
	delimiter: UpdateDelimiter,
}

/// State machine for determining whether to insert `SET` or `,` into a query.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum UpdateDelimiter {
	/// SQL `SET` clause.
	#[default]
	Set,

	/// A literal `,`.
	Comma,
}

impl UpdateDelimiter {
	/// The corresponding SQL for the current state.
	const fn sql(&self) -> &'static str {
		match self {
			Self::Set => " SET ",
			Self::Comma => " , ",
		}
	}
}

impl<'q> UpdateQuery<'q> {
	/// Creates a new [`UpdateQuery`] for updating the given `table`.
	///
	/// This is a wrapper over [`QueryBuilder::new()`] with a base query of
	/// `UPDATE {table}`.
	pub fn new<S>(table: S) -> Self
	where
		S: AsRef<str>,
	{
		let mut query = QueryBuilder::new("UPDATE ");
		query.push(table.as_ref()).push(' ');

		Self { query, delimiter: UpdateDelimiter::default() }
	}

	/// Set a specific `column` to some `value`.
	///
	/// This will insert `SET {column} = {value}` / `, {column} = {value}` into
	/// the query.
	pub fn set<V>(&mut self, column: &str, value: V) -> &mut Self
	where
		V: sqlx::Type<MySql> + sqlx::Encode<'q, MySql> + Send + 'q,
	{
		self.query
			.push(self.delimiter.sql())
			.push(column)
			.push(" = ")
			.push_bind(value);

		self.delimiter = UpdateDelimiter::Comma;
		self
	}

	/// Like [`UpdateQuery::set()`], but only if `value` is `Some`.
	pub fn set_if_some<V>(&mut self, column: &str, value: Option<V>) -> &mut Self
	where
		V: sqlx::Type<MySql> + sqlx::Encode<'q, MySql> + Send + 'q,
	{
		if let Some(value) = value {
			self.set(column, value);
		}

		self
	}

	/// Whether no `SET` clause has been pushed yet.
	pub fn is_empty(&self) -> bool {
		self.delimiter == UpdateDelimiter::Set
	}
}
