#![forbid(unsafe_code)]

//! Runtime-checked argument views.
//!
//! [`TryCast<U>`] is a capability query: "can this value be viewed as a
//! `U`?" A failed query yields `None` rather than an error or a panic, so
//! the caller can always fall back to an absent argument.
//!
//! Implementations are provided for the type-erased `dyn Any` family; they
//! copy the payload out, so `U` must be `Clone`. [`CastInto<U>`] is the
//! consuming counterpart: it takes an owned payload such as `Box<dyn Any>`
//! and moves it into `U`, with no `Clone` bound. Tagged unions implement
//! either trait directly, one impl per typed view:
//!
//! ```
//! use weakify_core::TryCast;
//!
//! enum Payload {
//!     Count(u32),
//!     Text(String),
//! }
//!
//! impl TryCast<u32> for Payload {
//!     fn try_cast(&self) -> Option<u32> {
//!         match self {
//!             Payload::Count(n) => Some(*n),
//!             Payload::Text(_) => None,
//!         }
//!     }
//! }
//!
//! assert_eq!(Payload::Count(3).try_cast(), Some(3));
//! assert_eq!(Payload::Text("3".into()).try_cast(), None::<u32>);
//! ```

use std::any::Any;

/// Fallible, side-effect-free view of `self` as a `U`.
pub trait TryCast<U> {
    /// Returns `Some` when `self` holds a `U`, `None` otherwise.
    fn try_cast(&self) -> Option<U>;
}

impl<U: Any + Clone> TryCast<U> for dyn Any {
    #[inline]
    fn try_cast(&self) -> Option<U> {
        self.downcast_ref::<U>().cloned()
    }
}

impl<U: Any + Clone> TryCast<U> for dyn Any + Send {
    #[inline]
    fn try_cast(&self) -> Option<U> {
        self.downcast_ref::<U>().cloned()
    }
}

impl<U: Any + Clone> TryCast<U> for dyn Any + Send + Sync {
    #[inline]
    fn try_cast(&self) -> Option<U> {
        self.downcast_ref::<U>().cloned()
    }
}

/// Consuming view of `self` as a `U`.
///
/// Borrowed payloads get this for free through [`TryCast`]; owned
/// `Box<dyn Any>` payloads are moved out with [`Box::downcast`].
pub trait CastInto<U> {
    /// Returns `Some` when `self` holds a `U`, `None` otherwise. A mismatched
    /// payload is dropped.
    fn cast_into(self) -> Option<U>;
}

impl<V, U> CastInto<U> for &V
where
    V: TryCast<U> + ?Sized,
{
    #[inline]
    fn cast_into(self) -> Option<U> {
        self.try_cast()
    }
}

impl<U: Any> CastInto<U> for Box<dyn Any> {
    #[inline]
    fn cast_into(self) -> Option<U> {
        self.downcast::<U>().ok().map(|value| *value)
    }
}

impl<U: Any> CastInto<U> for Box<dyn Any + Send> {
    #[inline]
    fn cast_into(self) -> Option<U> {
        self.downcast::<U>().ok().map(|value| *value)
    }
}

impl<U: Any> CastInto<U> for Box<dyn Any + Send + Sync> {
    #[inline]
    fn cast_into(self) -> Option<U> {
        self.downcast::<U>().ok().map(|value| *value)
    }
}
