#![forbid(unsafe_code)]

//! Output shapes of bound functions.
//!
//! A bound function either delegates (owner resolved) or does nothing
//! (owner released). A [`Shape`] decides what the caller sees in each case:
//!
//! | Shape            | `f` returns      | bound function returns | released owner |
//! |------------------|------------------|------------------------|----------------|
//! | [`Unit`]         | `()`             | `()`                   | `()`           |
//! | [`Maybe`]        | `R`              | `Option<R>`            | `None`         |
//! | [`Fallible`]     | `Result<(), E>`  | `Result<(), E>`        | `Ok(())`       |
//! | [`FallibleMaybe`]| `Result<R, E>`   | `Result<Option<R>, E>` | `Ok(None)`     |
//!
//! A released owner is never reported as an error. Errors returned by `f`
//! pass through unchanged.

/// Maps the result of a delegated call, or its absence, to the value a
/// bound function returns.
pub trait Shape<R> {
    /// What the bound function returns.
    type Output;

    /// The owner resolved and `f` produced `r`.
    fn present(r: R) -> Self::Output;

    /// The owner was released; `f` was not called.
    fn absent() -> Self::Output;
}

/// `f` returns nothing; neither does the bound function.
#[derive(Debug, Clone, Copy)]
pub enum Unit {}

/// `f` returns a value; the bound function returns it as `Some`.
#[derive(Debug, Clone, Copy)]
pub enum Maybe {}

/// `f` may fail and otherwise returns nothing.
#[derive(Debug, Clone, Copy)]
pub enum Fallible {}

/// `f` may fail and otherwise returns a value.
#[derive(Debug, Clone, Copy)]
pub enum FallibleMaybe {}

impl Shape<()> for Unit {
    type Output = ();

    #[inline]
    fn present((): ()) {}

    #[inline]
    fn absent() {}
}

impl<R> Shape<R> for Maybe {
    type Output = Option<R>;

    #[inline]
    fn present(r: R) -> Option<R> {
        Some(r)
    }

    #[inline]
    fn absent() -> Option<R> {
        None
    }
}

impl<E> Shape<Result<(), E>> for Fallible {
    type Output = Result<(), E>;

    #[inline]
    fn present(r: Result<(), E>) -> Result<(), E> {
        r
    }

    #[inline]
    fn absent() -> Result<(), E> {
        Ok(())
    }
}

impl<R, E> Shape<Result<R, E>> for FallibleMaybe {
    type Output = Result<Option<R>, E>;

    #[inline]
    fn present(r: Result<R, E>) -> Result<Option<R>, E> {
        r.map(Some)
    }

    #[inline]
    fn absent() -> Result<Option<R>, E> {
        Ok(None)
    }
}
