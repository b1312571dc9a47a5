//! Scheduled operations and their lifecycle.

use helm_types::{Amount, OperationId, Principal, ResourceId, Timestamp};
use serde::{Deserialize, Serialize};

/// Stored lifecycle state of a scheduled operation.
///
/// Staleness is never stored — it is derived from `now` at execution time
/// (see [`ScheduledOperation::state`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    /// Recorded and waiting for its window.
    Queued,
    /// Dispatched successfully. Terminal.
    Executed,
}

/// Derived view of an operation, combining stored status with the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationState {
    /// Queued, before `eta`.
    Pending,
    /// Queued, within `[eta, eta + grace]`.
    Ready,
    /// Queued, past the grace window. Terminal.
    Stale,
    /// Executed. Terminal.
    Executed,
}

/// One queued privileged call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduledOperation {
    /// Deterministic key: hash of (target, value, payload, eta).
    pub id: OperationId,
    /// Resource the payload is dispatched to.
    pub target: ResourceId,
    /// Native amount accompanying the call (zero if none).
    pub value: Amount,
    /// Opaque encoded operation + arguments.
    pub payload: Vec<u8>,
    /// Earliest execution time.
    pub eta: Timestamp,
    /// When the operation was queued.
    pub queued_at: Timestamp,
    pub status: OperationStatus,
}

impl ScheduledOperation {
    /// Derived view at `now` for a queue with the given grace window.
    pub fn state(&self, grace_period_secs: u64, now: Timestamp) -> OperationState {
        match self.status {
            OperationStatus::Executed => OperationState::Executed,
            OperationStatus::Queued => {
                if now < self.eta {
                    OperationState::Pending
                } else if now > self.eta.plus(grace_period_secs) {
                    OperationState::Stale
                } else {
                    OperationState::Ready
                }
            }
        }
    }
}

/// Self-administration calls the queue recognizes when an executed
/// operation targets the queue's own resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelockCall {
    /// Nominate a new pending admin.
    SetPendingAdmin(Principal),
}

impl TimelockCall {
    /// Encode for use as a queued operation's payload.
    pub fn encode(&self) -> Vec<u8> {
        bincode::serialize(self).unwrap_or_default()
    }

    pub fn decode(payload: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(payload)
    }
}
