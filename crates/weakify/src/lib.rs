#![forbid(unsafe_code)]

//! Weakly bound callbacks.
//!
//! # Role
//! `weakify` turns a method or closure that takes an owner into a function
//! that only holds the owner weakly. Registering such a function as a
//! callback cannot create a reference cycle: once every strong owner is
//! dropped, the function becomes a no-op (or returns an absent value)
//! instead of keeping the owner alive.
//!
//! # Primary pieces
//! - **Entry points** ([`weakify`], [`weakify_map`], [`weakify_cast`], ...):
//!   one per input/output shape, each returning a plain closure.
//! - **[`Bound`]**: the value behind every entry point, usable directly for
//!   labels, liveness queries and [`Bound::call_live`].
//! - **[`Shape`]**: how a delegated result, or its absence, is returned.
//! - **[`Resolve`] / [`Downgrade`] / [`TryCast`] / [`CastInto`]**: the
//!   capabilities from
//!   `weakify-core` the binder is generic over.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use weakify::weakify_ignoring;
//!
//! struct Window {
//!     redraws: Cell<u32>,
//! }
//!
//! impl Window {
//!     fn redraw(&self) {
//!         self.redraws.set(self.redraws.get() + 1);
//!     }
//! }
//!
//! let window = Rc::new(Window { redraws: Cell::new(0) });
//! let on_resize = weakify_ignoring(&window, Window::redraw);
//!
//! on_resize((80u16, 24u16));
//! assert_eq!(window.redraws.get(), 1);
//! assert_eq!(Rc::strong_count(&window), 1);
//!
//! drop(window);
//! on_resize((100, 40)); // no-op
//! ```

pub mod bind;
pub mod bound;
pub mod logging;
pub mod shape;

pub use bind::{
    Curried, Weakify, try_weakify, try_weakify_cast, try_weakify_cast_into, try_weakify_ignoring,
    try_weakify_map, try_weakify_returning, try_weakify_with, uncurry, weakify, weakify_cast,
    weakify_cast_into, weakify_ignoring, weakify_map, weakify_returning, weakify_with,
};
pub use bound::Bound;
pub use shape::{Fallible, FallibleMaybe, Maybe, Shape, Unit};
pub use weakify_core::{CastInto, Downgrade, Expired, Resolve, TryCast};

/// Everything needed to bind callbacks, for glob import.
pub mod prelude {
    pub use crate::bind::*;
    pub use crate::bound::Bound;
    pub use crate::shape::{Fallible, FallibleMaybe, Maybe, Shape, Unit};
    pub use weakify_core::{CastInto, Downgrade, Expired, Resolve, TryCast};
}
