//! This module contains a [`tower::Service`] for authorizing requests using
//! bearer tokens. It will extract the `Authorization: Bearer …` header from the
//! request, validate it with an [`Authorizer`], and either pass the request on
//! (with the decoded [`Jwt<Grant>`] in its extensions) or answer it with the
//! corresponding error response.
//!
//! Requests whose path falls under one of the [`ExcludedPaths`] skip all of
//! this.

use std::sync::Arc;
use std::task::{self, Poll};

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;

use super::{Authorizer, Grant, Jwt};

/// Path prefixes that bypass authorization.
///
/// A path is excluded if it is equal to one of the prefixes, or continues it
/// at a `/` segment boundary. With a prefix of `/token`, both `/token` and
/// `/token/refresh` are excluded, but `/tokens` is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedPaths(Arc<[String]>);

impl ExcludedPaths {
	/// Creates a new set of excluded prefixes.
	///
	/// Trailing slashes are ignored; an empty prefix (or `/`) would exclude
	/// every path and is dropped.
	pub fn new<I, S>(prefixes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let prefixes = prefixes
			.into_iter()
			.map(|prefix| prefix.as_ref().trim().trim_end_matches('/').to_owned())
			.filter(|prefix| !prefix.is_empty())
			.collect::<Vec<_>>();

		Self(prefixes.into())
	}

	/// Checks whether `path` is excluded from authorization.
	pub fn matches(&self, path: &str) -> bool {
		self.0.iter().any(|prefix| {
			path.strip_prefix(prefix.as_str())
				.is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
		})
	}

	/// Returns an iterator over the configured prefixes.
	pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
		self.0.iter().map(String::as_str)
	}
}

/// A layer producing the [`AuthorizeService`] middleware.
#[derive(Debug, Clone)]
pub struct AuthorizeLayer {
	/// For validating tokens.
	authorizer: Authorizer,

	/// Paths that skip authorization.
	excluded: ExcludedPaths,
}

impl AuthorizeLayer {
	/// Creates a new [`AuthorizeLayer`].
	pub const fn new(authorizer: Authorizer, excluded: ExcludedPaths) -> Self {
		Self { authorizer, excluded }
	}
}

impl<S> tower::Layer<S> for AuthorizeLayer {
	type Service = AuthorizeService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AuthorizeService {
			authorizer: self.authorizer.clone(),
			excluded: self.excluded.clone(),
			inner,
		}
	}
}

/// A middleware for validating bearer tokens and checking them against the
/// request method, before passing on the request.
///
/// You can create an instance of this service using [`AuthorizeLayer`].
#[derive(Debug, Clone)]
pub struct AuthorizeService<S> {
	/// For validating tokens.
	authorizer: Authorizer,

	/// Paths that skip authorization.
	excluded: ExcludedPaths,

	/// The inner service.
	inner: S,
}

impl<S> tower::Service<Request> for AuthorizeService<S>
where
	S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Response = Response;
	type Error = S::Error;
	type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, mut req: Request) -> Self::Future {
		// `self.inner` was polled ready; take it and leave a fresh clone behind
		let clone = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, clone);

		if self.excluded.matches(req.uri().path()) {
			tracing::trace!(path = %req.uri().path(), "path is excluded from authorization");
			return Box::pin(inner.call(req));
		}

		match self.authorizer.authorize(req.method(), req.headers()) {
			Ok(jwt) => {
				req.extensions_mut().insert::<Jwt<Grant>>(jwt);
				Box::pin(inner.call(req))
			}
			Err(error) => Box::pin(async move { Ok(error.into_response()) }),
		}
	}
}
