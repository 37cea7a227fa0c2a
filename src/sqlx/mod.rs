//! Helpers and extension traits for [`sqlx`].

pub mod query;

#[doc(inline)]
pub use query::{QueryBuilderExt, UpdateQuery};
