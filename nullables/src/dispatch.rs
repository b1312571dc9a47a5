//! Nullable dispatcher — records dispatched operations, can be primed to
//! reject them.

use helm_timelock::{DispatchError, Dispatcher};
use helm_types::{Amount, ResourceId};
use std::sync::Mutex;

/// A dispatcher for testing: accepts every call, records it, and returns
/// an empty result. Prime it with [`NullDispatcher::fail_with`] to model a
/// target that rejects the call.
pub struct NullDispatcher {
    calls: Mutex<Vec<(ResourceId, Amount, Vec<u8>)>>,
    fail_reason: Mutex<Option<String>>,
}

impl NullDispatcher {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_reason: Mutex::new(None),
        }
    }

    /// Make every subsequent dispatch fail with `reason`.
    pub fn fail_with(&self, reason: &str) {
        *self.fail_reason.lock().unwrap() = Some(reason.to_string());
    }

    /// Accept dispatches again.
    pub fn succeed(&self) {
        *self.fail_reason.lock().unwrap() = None;
    }

    /// All calls dispatched so far (successful ones only).
    pub fn calls(&self) -> Vec<(ResourceId, Amount, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of successful dispatches.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for NullDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for NullDispatcher {
    fn dispatch(
        &self,
        target: &ResourceId,
        value: Amount,
        payload: &[u8],
    ) -> Result<Vec<u8>, DispatchError> {
        if let Some(reason) = self.fail_reason.lock().unwrap().clone() {
            return Err(DispatchError(reason));
        }
        self.calls
            .lock()
            .unwrap()
            .push((target.clone(), value, payload.to_vec()));
        Ok(Vec::new())
    }
}
