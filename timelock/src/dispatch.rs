//! The dispatch seam — how an executed operation reaches its target.

use helm_types::{Amount, ResourceId};
use thiserror::Error;

/// Error returned by a target that rejected a dispatched operation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DispatchError(pub String);

/// Invokes a target operation on behalf of the queue.
///
/// The queue never interprets the payload of a foreign operation; the
/// external system being protected supplies the dispatcher and is expected
/// to re-check authorization (typically against the authorizer) before
/// mutating its own state.
pub trait Dispatcher {
    fn dispatch(
        &self,
        target: &ResourceId,
        value: Amount,
        payload: &[u8],
    ) -> Result<Vec<u8>, DispatchError>;
}
