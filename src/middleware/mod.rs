//! This module contains general purpose middleware.
//!
//! Middlewares are implemented as [tower services]. This means they can
//! integrate with [`axum`], our HTTP framework, but are also re-usable
//! independently of that.
//!
//! Authorization lives in [`crate::auth`], next to the types it checks.
//!
//! [tower services]: tower::Service

pub(crate) mod logging;
pub mod cors;
