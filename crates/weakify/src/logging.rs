//! Feature-gated tracing hooks.
//!
//! With the `tracing` feature enabled, `trace!` is re-exported
//! here and the binder emits a `trace!` event each time a call is skipped
//! because its owner was released. Without the feature every hook compiles
//! to nothing.

#[cfg(feature = "tracing")]
pub use tracing::trace;

/// Target used for all events emitted by bound functions.
pub const TARGET: &str = "weakify::bound";

/// Record a call that was skipped because the owner is gone.
macro_rules! trace_released {
    ($label:expr) => {{
        #[cfg(feature = "tracing")]
        $crate::logging::trace!(
            target: $crate::logging::TARGET,
            label = $label.unwrap_or("<unnamed>"),
            "owner released; bound call skipped"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = $label;
    }};
}

pub(crate) use trace_released;
