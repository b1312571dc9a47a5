//! Time-delayed execution queue for privileged operations.
//!
//! Any sensitive operation routed through the queue must be scheduled by
//! the queue admin, age past a minimum delay, and execute within a bounded
//! grace window before becoming permanently stale. The queue also manages
//! its own admin identity through a one-time hand-off protocol: after the
//! first completed transfer, a new admin can only be nominated by an
//! operation executed through the queue itself.

pub mod dispatch;
pub mod error;
pub mod operation;
pub mod queue;

pub use dispatch::{DispatchError, Dispatcher};
pub use error::TimelockError;
pub use operation::{OperationState, OperationStatus, ScheduledOperation, TimelockCall};
pub use queue::TimelockQueue;
