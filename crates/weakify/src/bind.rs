#![forbid(unsafe_code)]

//! Entry points that bind a function to a weakly held owner.
//!
//! Each function takes the owner by reference, downgrades it, and returns a
//! plain closure. The closure resolves the owner on every call: while the
//! owner is alive the call is delegated to `f`, afterwards it is a no-op.
//!
//! | `f` after the owner | `f` returns      | returned closure             | infallible            | fallible                  |
//! |---------------------|------------------|------------------------------|-----------------------|---------------------------|
//! | nothing             | nothing          | `Fn()`                       | [`weakify`]           | [`try_weakify`]           |
//! | ignored argument    | nothing          | `Fn(A)`                      | [`weakify_ignoring`]  | [`try_weakify_ignoring`]  |
//! | `A`                 | nothing          | `Fn(A)`                      | [`weakify_with`]      | [`try_weakify_with`]      |
//! | nothing             | `R`              | `Fn() -> Option<R>`          | [`weakify_returning`] | [`try_weakify_returning`] |
//! | `A`                 | `R`              | `Fn(A) -> Option<R>`         | [`weakify_map`]       | [`try_weakify_map`]       |
//! | `Option<U>`         | nothing          | `Fn(&V)`, `V: TryCast<U>`    | [`weakify_cast`]      | [`try_weakify_cast`]      |
//! | `Option<U>`         | nothing          | `Fn(V)`, `V: CastInto<U>`    | [`weakify_cast_into`] | [`try_weakify_cast_into`] |
//!
//! Fallible variants return `Result`: errors from `f` pass through unchanged,
//! and a released owner yields `Ok(())` / `Ok(None)`.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use weakify::weakify_map;
//!
//! struct Formatter {
//!     calls: Cell<u32>,
//! }
//!
//! impl Formatter {
//!     fn format(&self, n: i32) -> String {
//!         self.calls.set(self.calls.get() + 1);
//!         n.to_string()
//!     }
//! }
//!
//! let owner = Rc::new(Formatter { calls: Cell::new(0) });
//! let format = weakify_map(&owner, Formatter::format);
//!
//! assert_eq!(format(123), Some("123".to_string()));
//! drop(owner);
//! assert_eq!(format(123), None);
//! ```

use weakify_core::{CastInto, Downgrade, TryCast};

use crate::bound::Bound;
use crate::shape::{Fallible, FallibleMaybe, Maybe, Unit};

/// Bind a method taking no argument and returning nothing.
pub fn weakify<P, F>(owner: &P, f: F) -> impl Fn() + use<P, F>
where
    P: Downgrade,
    F: Fn(&P::Target),
{
    let bound: Bound<P::Weak, _, Unit> =
        Bound::from_owner(owner, move |this: &P::Target, (): ()| f(this));
    move || bound.invoke()
}

/// Fallible form of [`weakify`].
pub fn try_weakify<P, F, E>(owner: &P, f: F) -> impl Fn() -> Result<(), E> + use<P, F, E>
where
    P: Downgrade,
    F: Fn(&P::Target) -> Result<(), E>,
{
    let bound: Bound<P::Weak, _, Fallible> =
        Bound::from_owner(owner, move |this: &P::Target, (): ()| f(this));
    move || bound.invoke()
}

/// Bind a method taking no argument to a closure that accepts one.
///
/// The argument is dropped unused. Useful when a callback convention passes
/// a payload the method has no use for.
pub fn weakify_ignoring<P, F, A>(owner: &P, f: F) -> impl Fn(A) + use<P, F, A>
where
    P: Downgrade,
    F: Fn(&P::Target),
{
    let bound: Bound<P::Weak, _, Unit> =
        Bound::from_owner(owner, move |this: &P::Target, _: A| f(this));
    move |arg: A| bound.call(arg)
}

/// Fallible form of [`weakify_ignoring`].
pub fn try_weakify_ignoring<P, F, A, E>(
    owner: &P,
    f: F,
) -> impl Fn(A) -> Result<(), E> + use<P, F, A, E>
where
    P: Downgrade,
    F: Fn(&P::Target) -> Result<(), E>,
{
    let bound: Bound<P::Weak, _, Fallible> =
        Bound::from_owner(owner, move |this: &P::Target, _: A| f(this));
    move |arg: A| bound.call(arg)
}

/// Bind a method taking one argument and returning nothing.
pub fn weakify_with<P, F, A>(owner: &P, f: F) -> impl Fn(A) + use<P, F, A>
where
    P: Downgrade,
    F: Fn(&P::Target, A),
{
    let bound: Bound<P::Weak, F, Unit> = Bound::from_owner(owner, f);
    move |arg: A| bound.call(arg)
}

/// Fallible form of [`weakify_with`].
pub fn try_weakify_with<P, F, A, E>(
    owner: &P,
    f: F,
) -> impl Fn(A) -> Result<(), E> + use<P, F, A, E>
where
    P: Downgrade,
    F: Fn(&P::Target, A) -> Result<(), E>,
{
    let bound: Bound<P::Weak, F, Fallible> = Bound::from_owner(owner, f);
    move |arg: A| bound.call(arg)
}

/// Bind a method taking no argument and returning `R`.
///
/// The closure returns `Some` while the owner lives and `None` afterwards.
pub fn weakify_returning<P, F, R>(owner: &P, f: F) -> impl Fn() -> Option<R> + use<P, F, R>
where
    P: Downgrade,
    F: Fn(&P::Target) -> R,
{
    let bound: Bound<P::Weak, _, Maybe> =
        Bound::from_owner(owner, move |this: &P::Target, (): ()| f(this));
    move || bound.invoke()
}

/// Fallible form of [`weakify_returning`].
pub fn try_weakify_returning<P, F, R, E>(
    owner: &P,
    f: F,
) -> impl Fn() -> Result<Option<R>, E> + use<P, F, R, E>
where
    P: Downgrade,
    F: Fn(&P::Target) -> Result<R, E>,
{
    let bound: Bound<P::Weak, _, FallibleMaybe> =
        Bound::from_owner(owner, move |this: &P::Target, (): ()| f(this));
    move || bound.invoke()
}

/// Bind a method taking `A` and returning `R`.
///
/// The closure returns `Some` while the owner lives and `None` afterwards.
/// When `R` is itself an `Option`, a released owner and a method returning
/// `None` both show up as an absent value at the outer level only.
pub fn weakify_map<P, F, A, R>(owner: &P, f: F) -> impl Fn(A) -> Option<R> + use<P, F, A, R>
where
    P: Downgrade,
    F: Fn(&P::Target, A) -> R,
{
    let bound: Bound<P::Weak, F, Maybe> = Bound::from_owner(owner, f);
    move |arg: A| bound.call(arg)
}

/// Fallible form of [`weakify_map`].
pub fn try_weakify_map<P, F, A, R, E>(
    owner: &P,
    f: F,
) -> impl Fn(A) -> Result<Option<R>, E> + use<P, F, A, R, E>
where
    P: Downgrade,
    F: Fn(&P::Target, A) -> Result<R, E>,
{
    let bound: Bound<P::Weak, F, FallibleMaybe> = Bound::from_owner(owner, f);
    move |arg: A| bound.call(arg)
}

/// Bind a method taking `Option<U>` to a closure that accepts any `&V` that
/// can be checked against `U`.
///
/// On each call with a live owner the argument is cast with
/// [`TryCast::try_cast`]; `f` receives `Some(u)` on success and `None` on a
/// mismatch. `f` is called either way. Nothing is cast once the owner is
/// gone.
///
/// The `dyn Any` impls of [`TryCast`] clone the payload, so `U` must be
/// `Clone` here; use [`weakify_cast_into`] to move owned payloads instead.
///
/// `V` cannot be inferred from `f`, so it comes first in the generic list:
///
/// ```
/// use std::any::Any;
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use weakify::weakify_cast;
///
/// struct Sink {
///     last: Cell<Option<i32>>,
/// }
///
/// let owner = Rc::new(Sink { last: Cell::new(None) });
/// let on_value = weakify_cast::<dyn Any, _, _, _>(&owner, |sink: &Sink, n: Option<i32>| {
///     sink.last.set(n);
/// });
///
/// on_value(&7 as &dyn Any);
/// assert_eq!(owner.last.get(), Some(7));
/// on_value(&"7" as &dyn Any);
/// assert_eq!(owner.last.get(), None);
/// ```
pub fn weakify_cast<V, P, F, U>(owner: &P, f: F) -> impl Fn(&V) + use<V, P, F, U>
where
    V: TryCast<U> + ?Sized,
    P: Downgrade,
    F: Fn(&P::Target, Option<U>),
{
    let bound: Bound<P::Weak, _, Unit> =
        Bound::from_owner(owner, move |this: &P::Target, value: &V| {
            f(this, value.try_cast())
        });
    move |value: &V| bound.call(value)
}

/// Fallible form of [`weakify_cast`].
pub fn try_weakify_cast<V, P, F, U, E>(
    owner: &P,
    f: F,
) -> impl Fn(&V) -> Result<(), E> + use<V, P, F, U, E>
where
    V: TryCast<U> + ?Sized,
    P: Downgrade,
    F: Fn(&P::Target, Option<U>) -> Result<(), E>,
{
    let bound: Bound<P::Weak, _, Fallible> =
        Bound::from_owner(owner, move |this: &P::Target, value: &V| {
            f(this, value.try_cast())
        });
    move |value: &V| bound.call(value)
}

/// Bind a method taking `Option<U>` to a closure that takes ownership of a
/// `V` that can be converted into `U`.
///
/// The by-value counterpart of [`weakify_cast`]: `Box<dyn Any>` payloads are
/// moved into `f` without requiring `U: Clone`. Once the owner is gone the
/// argument is dropped without being cast.
///
/// ```
/// use std::any::Any;
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use weakify::weakify_cast_into;
///
/// // Not `Clone`: only reachable by moving the box.
/// struct Connection(u32);
///
/// struct Pool {
///     idle: RefCell<Vec<Connection>>,
/// }
///
/// let pool = Rc::new(Pool { idle: RefCell::new(Vec::new()) });
/// let give_back = weakify_cast_into::<Box<dyn Any>, _, _, _>(
///     &pool,
///     |pool: &Pool, conn: Option<Connection>| pool.idle.borrow_mut().extend(conn),
/// );
///
/// give_back(Box::new(Connection(1)) as Box<dyn Any>);
/// give_back(Box::new("not a connection") as Box<dyn Any>);
/// assert_eq!(pool.idle.borrow().len(), 1);
/// assert_eq!(pool.idle.borrow()[0].0, 1);
/// ```
pub fn weakify_cast_into<V, P, F, U>(owner: &P, f: F) -> impl Fn(V) + use<V, P, F, U>
where
    V: CastInto<U>,
    P: Downgrade,
    F: Fn(&P::Target, Option<U>),
{
    let bound: Bound<P::Weak, _, Unit> =
        Bound::from_owner(owner, move |this: &P::Target, value: V| {
            f(this, value.cast_into())
        });
    move |value: V| bound.call(value)
}

/// Fallible form of [`weakify_cast_into`].
pub fn try_weakify_cast_into<V, P, F, U, E>(
    owner: &P,
    f: F,
) -> impl Fn(V) -> Result<(), E> + use<V, P, F, U, E>
where
    V: CastInto<U>,
    P: Downgrade,
    F: Fn(&P::Target, Option<U>) -> Result<(), E>,
{
    let bound: Bound<P::Weak, _, Fallible> =
        Bound::from_owner(owner, move |this: &P::Target, value: V| {
            f(this, value.cast_into())
        });
    move |value: V| bound.call(value)
}

/// A curried method `f(owner)(arg)`, applied in one step.
///
/// Implemented for every `F: Fn(Owner) -> G` whose result `G` accepts the
/// argument. `Owner` is usually a borrow `&'a T`; bounding on
/// `for<'a> Curried<&'a T, A, R>` lets `G` differ per borrow, so the inner
/// function may keep borrowing the owner.
pub trait Curried<Owner, A, R> {
    /// Call the outer function with `this`, then the inner one with `arg`.
    fn apply(&self, this: Owner, arg: A) -> R;
}

impl<Owner, A, R, F, G> Curried<Owner, A, R> for F
where
    F: Fn(Owner) -> G,
    G: FnOnce(A) -> R,
{
    #[inline]
    fn apply(&self, this: Owner, arg: A) -> R {
        self(this)(arg)
    }
}

/// Turn a curried method `f(owner)(arg)` into the two-argument form
/// `f(owner, arg)` accepted by the entry points above.
///
/// The inner function may borrow from the owner; it lives only for the
/// duration of one call.
///
/// ```
/// use std::rc::Rc;
/// use weakify::{uncurry, weakify_map};
///
/// struct Scaler {
///     factor: u32,
/// }
///
/// impl Scaler {
///     fn scaler(&self) -> impl Fn(u32) -> u32 + '_ {
///         move |n| n * self.factor
///     }
/// }
///
/// let owner = Rc::new(Scaler { factor: 3 });
/// let scale = weakify_map(&owner, uncurry(Scaler::scaler));
/// assert_eq!(scale(4), Some(12));
/// drop(owner);
/// assert_eq!(scale(4), None);
/// ```
pub fn uncurry<T, F, A, R>(f: F) -> impl Fn(&T, A) -> R
where
    T: ?Sized,
    F: for<'a> Curried<&'a T, A, R>,
{
    move |this: &T, arg: A| f.apply(this, arg)
}

/// Method-syntax binding for any [`Downgrade`] owner.
///
/// `f` takes the owner and one argument; use `()` as the argument type for
/// methods without one. The output shape is chosen with the first generic
/// parameter:
///
/// ```
/// use std::rc::Rc;
/// use weakify::{Maybe, Weakify};
///
/// let owner = Rc::new(10);
/// let add = owner.bind::<Maybe, _>(|base: &i32, n: i32| base + n).named("add");
/// assert_eq!(add.call(5), Some(15));
/// drop(owner);
/// assert_eq!(add.call(5), None);
/// ```
///
/// # Name collisions
///
/// The blanket impl covers `Rc<T>` and `Arc<T>` themselves, and method
/// lookup tries the handle before dereferencing into `T`. If `T` has its
/// own `bind(&self, ..)` method, `rc.bind(..)` resolves to this trait and
/// hides it. Call the inherent method through `(*rc).bind(..)`, or spell
/// this one as `Weakify::bind(&rc, f)`.
pub trait Weakify: Downgrade {
    /// Bind `f` to `self`, keeping only a weak handle.
    fn bind<S, F>(&self, f: F) -> Bound<Self::Weak, F, S>
    where
        Self: Sized,
    {
        Bound::from_owner(self, f)
    }
}

impl<P: Downgrade> Weakify for P {}
