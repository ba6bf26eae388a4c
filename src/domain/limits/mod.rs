//! Admission limits applied to inbound requests.
//!
//! Both limits are transport-agnostic: they take plain values (a client key,
//! a declared length) and return a [`Decision`]. The HTTP middleware in
//! [`crate::api::middleware`] decides how a rejection is surfaced.
//!
//! - [`SlidingWindowLimiter`] - per-client trailing-window request counter
//! - [`BodySizeGuard`] - declared `Content-Length` pre-check
//! - [`Clock`] - injectable time source for the limiter

pub mod body_size;
pub mod clock;
pub mod sliding_window;

pub use body_size::BodySizeGuard;
pub use clock::{Clock, SystemClock};
pub use sliding_window::SlidingWindowLimiter;

/// Outcome of evaluating a request against a limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Rejected { reason: String },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_allowed()
    }
}
