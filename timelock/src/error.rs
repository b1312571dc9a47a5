use helm_types::{OperationId, Timestamp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelockError {
    #[error("caller {0} does not have admin standing on the queue")]
    Unauthorized(String),

    #[error("eta {eta} does not satisfy the queue delay (earliest allowed: {earliest})")]
    DelayNotSatisfied { eta: Timestamp, earliest: Timestamp },

    #[error("operation is not yet due: eta {eta}, now {now}")]
    NotYetDue { eta: Timestamp, now: Timestamp },

    #[error("operation is stale: execution window closed at {window_end}, now {now}")]
    Stale { window_end: Timestamp, now: Timestamp },

    #[error("no queued operation with id {0}")]
    NotFound(OperationId),

    #[error("dispatch to {target} failed: {reason}")]
    DispatchFailed { target: String, reason: String },

    #[error("delay {delay_secs}s is outside the allowed range [{min_secs}s, {max_secs}s]")]
    DelayOutOfRange {
        delay_secs: u64,
        min_secs: u64,
        max_secs: u64,
    },

    #[error("self-targeted operation carries an undecodable payload: {0}")]
    InvalidPayload(String),

    #[error("storage error: {0}")]
    Storage(String),
}
