#![forbid(unsafe_code)]

//! Non-owning owner handles and their resolution.
//!
//! # Design
//!
//! A bound function never stores its owner directly. It stores the
//! [`Resolve`] handle produced by [`Downgrade::downgrade`] and resolves it
//! again on every call. Both traits are implemented for the standard
//! reference-counted pointers:
//!
//! | Owner       | Handle              | Strong handle |
//! |-------------|---------------------|---------------|
//! | `Rc<T>`     | `std::rc::Weak<T>`  | `Rc<T>`       |
//! | `Arc<T>`    | `std::sync::Weak<T>`| `Arc<T>`      |
//!
//! # Invariants
//!
//! 1. Holding a handle never keeps the owner alive (no strong count).
//! 2. Once the last strong owner is dropped, `resolve()` returns `None`
//!    for every subsequent call.
//! 3. A strong handle returned by `resolve()` keeps the owner alive only
//!    for as long as the caller holds it.

use std::ops::Deref;
use std::rc::{self, Rc};
use std::sync::{self, Arc};

/// A non-owning handle that can be resolved to a usable strong handle.
pub trait Resolve {
    /// The value a resolved handle dereferences to.
    type Target: ?Sized;

    /// Strong handle obtained from a successful resolution.
    type Strong: Deref<Target = Self::Target>;

    /// Attempt to resolve the handle. Returns `None` once the owner is gone.
    fn resolve(&self) -> Option<Self::Strong>;

    /// Number of strong owners currently alive. Zero means the handle will
    /// never resolve again.
    fn strong_count(&self) -> usize;

    /// Whether the owner is still alive at this instant.
    ///
    /// The answer may be stale as soon as it is returned; it never
    /// guarantees that a later [`resolve`](Self::resolve) succeeds.
    #[inline]
    fn is_live(&self) -> bool {
        self.strong_count() > 0
    }
}

/// An owning pointer that can hand out a [`Resolve`] handle to itself.
pub trait Downgrade: Deref {
    /// The non-owning handle type.
    type Weak: Resolve<Target = Self::Target>;

    /// Create a non-owning handle to this owner.
    fn downgrade(this: &Self) -> Self::Weak;
}

impl<T: ?Sized> Resolve for rc::Weak<T> {
    type Target = T;
    type Strong = Rc<T>;

    #[inline]
    fn resolve(&self) -> Option<Rc<T>> {
        self.upgrade()
    }

    #[inline]
    fn strong_count(&self) -> usize {
        rc::Weak::strong_count(self)
    }
}

impl<T: ?Sized> Resolve for sync::Weak<T> {
    type Target = T;
    type Strong = Arc<T>;

    #[inline]
    fn resolve(&self) -> Option<Arc<T>> {
        self.upgrade()
    }

    #[inline]
    fn strong_count(&self) -> usize {
        sync::Weak::strong_count(self)
    }
}

impl<T: ?Sized> Downgrade for Rc<T> {
    type Weak = rc::Weak<T>;

    #[inline]
    fn downgrade(this: &Self) -> rc::Weak<T> {
        Rc::downgrade(this)
    }
}

impl<T: ?Sized> Downgrade for Arc<T> {
    type Weak = sync::Weak<T>;

    #[inline]
    fn downgrade(this: &Self) -> sync::Weak<T> {
        Arc::downgrade(this)
    }
}
