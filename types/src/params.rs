//! Queue parameters — the construction-time configuration of a timelock.

use serde::{Deserialize, Serialize};

/// Timing configuration fixed when a queue is constructed, immutable for
/// its lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelockParams {
    /// Minimum scheduling lead time in seconds: `queue` requires
    /// `eta >= now + delay_secs`.
    pub delay_secs: u64,

    /// Execution window after `eta` in seconds. Execution at exactly
    /// `eta + grace_period_secs` is still valid; one second later the
    /// operation is permanently stale.
    pub grace_period_secs: u64,
}

impl TimelockParams {
    /// Lower bound on the configurable delay (2 days).
    pub const MINIMUM_DELAY_SECS: u64 = 2 * 24 * 3600;

    /// Upper bound on the configurable delay (30 days).
    pub const MAXIMUM_DELAY_SECS: u64 = 30 * 24 * 3600;

    /// The standard execution grace window (14 days).
    pub const STANDARD_GRACE_PERIOD_SECS: u64 = 14 * 24 * 3600;

    /// Standard gate configuration: 5-day delay, 14-day grace window.
    pub fn standard() -> Self {
        Self {
            delay_secs: 5 * 24 * 3600,
            grace_period_secs: Self::STANDARD_GRACE_PERIOD_SECS,
        }
    }
}

/// Default is the standard gate configuration.
impl Default for TimelockParams {
    fn default() -> Self {
        Self::standard()
    }
}
