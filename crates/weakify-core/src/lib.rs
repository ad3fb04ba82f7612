#![forbid(unsafe_code)]

//! Core capabilities for weakify: weak owner resolution and runtime casts.
//!
//! # Role in weakify
//! `weakify-core` defines the two seams the binder is generic over:
//!
//! - [`Resolve`] / [`Downgrade`]: how an owner is referenced without being
//!   kept alive, and how that reference is turned back into a usable handle.
//! - [`TryCast`] / [`CastInto`]: how an incoming argument, borrowed or
//!   owned, is checked against the type a bound function expects.
//!
//! The binder itself lives in the `weakify` crate. Everything here is
//! usable on its own for code that wants the same resolution semantics.

pub mod cast;
pub mod error;
pub mod resolve;

pub use cast::{CastInto, TryCast};
pub use error::Expired;
pub use resolve::{Downgrade, Resolve};
