#![forbid(unsafe_code)]

//! The weakly bound function value.
//!
//! # Design
//!
//! [`Bound<W, F, S>`] stores a non-owning handle `W`, a function `F` that
//! takes the owner first and one argument second, and an output [`Shape`]
//! `S`. Every entry point in [`crate::bind`] normalizes its input shape to
//! that two-argument form, so the resolve-then-delegate logic lives in one
//! place: [`Bound::call`].
//!
//! # Invariants
//!
//! 1. `Bound` holds no strong reference to its owner. Cloning it clones the
//!    weak handle only.
//! 2. The owner is resolved on every call and the strong handle is dropped
//!    before `call` returns.
//! 3. A released owner means `f` is not called and the argument is dropped
//!    unused. No error is produced by `call`.
//! 4. Whatever `f` returns, including an error, reaches the caller through
//!    [`Shape::present`] unchanged.
//!
//! # Failure Modes
//!
//! | Mode | Condition | Behavior |
//! |------|-----------|----------|
//! | Owner released | Last strong owner dropped | `call` returns `S::absent()` |
//! | `f` fails | `f` returns `Err(e)` | `call` returns `Err(e)` |
//! | `f` panics | Panic inside `f` | Unwinds through `call`; the temporary strong handle is dropped |

use std::fmt;
use std::marker::PhantomData;

use weakify_core::{Downgrade, Expired, Resolve};

use crate::logging::trace_released;
use crate::shape::Shape;

/// A function bound to a weakly held owner.
///
/// Call it with [`call`](Self::call) (or [`invoke`](Self::invoke) when the
/// argument is `()`), or turn it into a plain closure with
/// [`into_fn`](Self::into_fn).
pub struct Bound<W, F, S> {
    weak: W,
    f: F,
    label: Option<&'static str>,
    _shape: PhantomData<fn() -> S>,
}

// Manual Clone: `S` is a marker and need not be Clone.
impl<W: Clone, F: Clone, S> Clone for Bound<W, F, S> {
    fn clone(&self) -> Self {
        Self {
            weak: self.weak.clone(),
            f: self.f.clone(),
            label: self.label,
            _shape: PhantomData,
        }
    }
}

impl<W: Resolve, F, S> fmt::Debug for Bound<W, F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bound")
            .field("label", &self.label)
            .field("live", &self.weak.is_live())
            .field("shape", &std::any::type_name::<S>())
            .finish_non_exhaustive()
    }
}

impl<W: Resolve, F, S> Bound<W, F, S> {
    /// Bind `f` to the owner behind `weak`.
    #[must_use]
    pub fn new(weak: W, f: F) -> Self {
        Self {
            weak,
            f,
            label: None,
            _shape: PhantomData,
        }
    }

    /// Bind `f` to `owner`, keeping only a weak handle to it.
    #[must_use]
    pub fn from_owner<P>(owner: &P, f: F) -> Self
    where
        P: Downgrade<Weak = W>,
    {
        Self::new(P::downgrade(owner), f)
    }

    /// Attach a label shown in `Debug` output, trace events and
    /// [`Expired`] errors.
    #[must_use]
    pub fn named(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// The label set with [`named`](Self::named), if any.
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    /// Whether the owner is alive right now. A later call may still find it
    /// released.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.weak.is_live()
    }

    /// Resolve the owner explicitly.
    ///
    /// The returned strong handle keeps the owner alive for as long as the
    /// caller holds it.
    pub fn owner(&self) -> Result<W::Strong, Expired> {
        self.weak.resolve().ok_or_else(|| self.expired())
    }

    /// Call the bound function with `arg`.
    ///
    /// If the owner is alive, returns `S::present(f(owner, arg))`. If it has
    /// been released, `f` is not called and `S::absent()` is returned.
    pub fn call<A, R>(&self, arg: A) -> S::Output
    where
        F: Fn(&W::Target, A) -> R,
        S: Shape<R>,
    {
        match self.resolve_then(|owner| (self.f)(owner, arg)) {
            Some(r) => S::present(r),
            None => {
                trace_released!(self.label);
                S::absent()
            }
        }
    }

    /// Call a bound function whose argument is `()`.
    pub fn invoke<R>(&self) -> S::Output
    where
        F: Fn(&W::Target, ()) -> R,
        S: Shape<R>,
    {
        self.call(())
    }

    /// Call the bound function, reporting a released owner as [`Expired`]
    /// instead of folding it into the output shape.
    ///
    /// The result of `f` is returned as-is, without applying `S`.
    pub fn call_live<A, R>(&self, arg: A) -> Result<R, Expired>
    where
        F: Fn(&W::Target, A) -> R,
    {
        self.resolve_then(|owner| (self.f)(owner, arg))
            .ok_or_else(|| self.expired())
    }

    /// Convert into a plain closure with the same behavior as
    /// [`call`](Self::call).
    pub fn into_fn<A, R>(self) -> impl Fn(A) -> S::Output
    where
        F: Fn(&W::Target, A) -> R,
        S: Shape<R>,
    {
        move |arg| self.call(arg)
    }

    /// Resolve the owner and, if present, run `call` against a borrow of it.
    /// The strong handle lives only for the duration of `call`.
    fn resolve_then<R>(&self, call: impl FnOnce(&W::Target) -> R) -> Option<R> {
        let owner = self.weak.resolve()?;
        Some(call(&*owner))
    }

    fn expired(&self) -> Expired {
        Expired { label: self.label }
    }
}
