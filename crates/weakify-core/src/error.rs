//! Errors reported by the explicit liveness APIs.

/// The owner behind a weak handle has been released.
///
/// Regular bound calls absorb this condition into a no-op; it only
/// surfaces through APIs that ask for liveness explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Expired {
    /// Label of the bound function that observed the release, if named.
    pub label: Option<&'static str>,
}

impl Expired {
    /// An expiry not attributed to a named bound function.
    #[must_use]
    pub const fn new() -> Self {
        Self { label: None }
    }

    /// An expiry observed by the bound function named `label`.
    #[must_use]
    pub const fn labeled(label: &'static str) -> Self {
        Self { label: Some(label) }
    }
}

impl std::fmt::Display for Expired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.label {
            Some(label) => write!(f, "owner of bound function '{label}' has been released"),
            None => write!(f, "owner has been released"),
        }
    }
}

impl std::error::Error for Expired {}
