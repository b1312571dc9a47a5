//! The timelock queue engine.

use crate::dispatch::Dispatcher;
use crate::error::TimelockError;
use crate::operation::{OperationState, OperationStatus, ScheduledOperation, TimelockCall};
use helm_crypto::operation_id;
use helm_store::{MetaStore, OperationStore};
use helm_types::{Amount, OperationId, Principal, ResourceId, TimelockParams, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Meta-store key for the queue's admin-state snapshot.
const ADMIN_STATE_META_KEY: &[u8] = b"timelock_admin_state";

/// Gates arbitrary operations behind a minimum delay and a bounded grace
/// window, and manages its own admin identity.
///
/// Every mutation takes `&mut self`: a precondition check and its state
/// write form one critical section, so two concurrent `execute` calls
/// against the same operation cannot both observe it as queued.
pub struct TimelockQueue {
    /// The queue's own resource identity. Operations targeting it are
    /// decoded as [`TimelockCall`]s instead of being dispatched.
    resource: ResourceId,
    params: TimelockParams,
    admin: Principal,
    pending_admin: Option<Principal>,
    /// Set permanently once the first hand-off completes; from then on
    /// only the queue itself may nominate a pending admin.
    handoff_completed: bool,
    /// Operation table, keyed by the deterministic operation hash.
    operations: HashMap<OperationId, ScheduledOperation>,
}

impl TimelockQueue {
    /// Create a queue administered by `initial_admin`.
    ///
    /// `resource` is the identity under which the queue itself can be
    /// targeted by scheduled operations. The delay must lie within
    /// [`TimelockParams::MINIMUM_DELAY_SECS`, `TimelockParams::MAXIMUM_DELAY_SECS`];
    /// both timing parameters are immutable afterwards.
    pub fn new(
        resource: ResourceId,
        initial_admin: Principal,
        params: TimelockParams,
    ) -> Result<Self, TimelockError> {
        if params.delay_secs < TimelockParams::MINIMUM_DELAY_SECS
            || params.delay_secs > TimelockParams::MAXIMUM_DELAY_SECS
        {
            return Err(TimelockError::DelayOutOfRange {
                delay_secs: params.delay_secs,
                min_secs: TimelockParams::MINIMUM_DELAY_SECS,
                max_secs: TimelockParams::MAXIMUM_DELAY_SECS,
            });
        }
        Ok(Self {
            resource,
            params,
            admin: initial_admin,
            pending_admin: None,
            handoff_completed: false,
            operations: HashMap::new(),
        })
    }

    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    pub fn pending_admin(&self) -> Option<&Principal> {
        self.pending_admin.as_ref()
    }

    pub fn handoff_completed(&self) -> bool {
        self.handoff_completed
    }

    pub fn params(&self) -> &TimelockParams {
        &self.params
    }

    /// The resource identity under which the queue administers itself.
    pub fn resource(&self) -> &ResourceId {
        &self.resource
    }

    /// Look up a recorded operation.
    pub fn operation(&self, id: &OperationId) -> Option<&ScheduledOperation> {
        self.operations.get(id)
    }

    /// Derived state of a recorded operation at `now`.
    pub fn operation_state(&self, id: &OperationId, now: Timestamp) -> Option<OperationState> {
        self.operations
            .get(id)
            .map(|op| op.state(self.params.grace_period_secs, now))
    }

    /// Number of recorded operations (queued and executed).
    pub fn operations_len(&self) -> usize {
        self.operations.len()
    }

    /// Schedule an operation for execution at or after `eta`.
    ///
    /// Re-queuing an identical (target, value, payload, eta) tuple is a
    /// no-op returning the same id.
    pub fn queue(
        &mut self,
        caller: &Principal,
        target: ResourceId,
        value: Amount,
        payload: Vec<u8>,
        eta: Timestamp,
        now: Timestamp,
    ) -> Result<OperationId, TimelockError> {
        self.require_admin(caller)?;
        let earliest = now.plus(self.params.delay_secs);
        if eta < earliest {
            return Err(TimelockError::DelayNotSatisfied { eta, earliest });
        }
        let id = operation_id(&target, value, &payload, eta);
        if self.operations.contains_key(&id) {
            return Ok(id);
        }
        tracing::debug!(operation = %id, target = %target, eta = %eta, "operation queued");
        self.operations.insert(
            id,
            ScheduledOperation {
                id,
                target,
                value,
                payload,
                eta,
                queued_at: now,
                status: OperationStatus::Queued,
            },
        );
        Ok(id)
    }

    /// Remove a queued operation before it executes.
    ///
    /// Fails with `NotFound` if no operation with this id is currently
    /// queued (absent, or already executed).
    pub fn cancel(&mut self, caller: &Principal, id: &OperationId) -> Result<(), TimelockError> {
        self.require_admin(caller)?;
        match self.operations.get(id) {
            Some(op) if op.status == OperationStatus::Queued => {
                self.operations.remove(id);
                tracing::debug!(operation = %id, "operation cancelled");
                Ok(())
            }
            _ => Err(TimelockError::NotFound(*id)),
        }
    }

    /// Execute a queued operation whose window is open.
    ///
    /// Preconditions are checked in order: admin standing, a queued record
    /// under the tuple's hash, `now >= eta`, `now <= eta + grace`. The
    /// operation is then either applied to the queue itself (when `target`
    /// is the queue's own resource) or handed to `dispatcher`. The
    /// Executed marker is written only after the target accepted the call;
    /// a failed dispatch surfaces `DispatchFailed` and leaves the
    /// operation queued.
    pub fn execute(
        &mut self,
        caller: &Principal,
        target: &ResourceId,
        value: Amount,
        payload: &[u8],
        eta: Timestamp,
        now: Timestamp,
        dispatcher: &dyn Dispatcher,
    ) -> Result<Vec<u8>, TimelockError> {
        self.require_admin(caller)?;
        let id = operation_id(target, value, payload, eta);
        let queued = self
            .operations
            .get(&id)
            .map_or(false, |op| op.status == OperationStatus::Queued);
        if !queued {
            return Err(TimelockError::NotFound(id));
        }
        if now < eta {
            return Err(TimelockError::NotYetDue { eta, now });
        }
        let window_end = eta.plus(self.params.grace_period_secs);
        if now > window_end {
            return Err(TimelockError::Stale { window_end, now });
        }

        let result = if *target == self.resource {
            self.apply_call(payload)?
        } else {
            dispatcher
                .dispatch(target, value, payload)
                .map_err(|e| TimelockError::DispatchFailed {
                    target: target.to_string(),
                    reason: e.to_string(),
                })?
        };

        if let Some(op) = self.operations.get_mut(&id) {
            op.status = OperationStatus::Executed;
        }
        tracing::info!(operation = %id, target = %target, "operation executed");
        Ok(result)
    }

    /// Nominate a new admin directly.
    ///
    /// Only valid before the first completed hand-off; afterwards the
    /// nomination must be routed through `queue`/`execute` targeting the
    /// queue itself.
    pub fn set_pending_admin(
        &mut self,
        caller: &Principal,
        candidate: Principal,
    ) -> Result<(), TimelockError> {
        if self.handoff_completed {
            return Err(TimelockError::Unauthorized(caller.to_string()));
        }
        self.require_admin(caller)?;
        self.install_pending_admin(candidate);
        Ok(())
    }

    /// Complete a hand-off: the nominated principal claims admin standing.
    pub fn accept_admin(&mut self, caller: &Principal) -> Result<(), TimelockError> {
        match self.pending_admin.take() {
            Some(pending) if pending == *caller => {
                self.admin = pending;
                self.handoff_completed = true;
                tracing::info!(admin = %self.admin, "admin hand-off completed");
                Ok(())
            }
            restore => {
                self.pending_admin = restore;
                Err(TimelockError::Unauthorized(caller.to_string()))
            }
        }
    }

    fn require_admin(&self, caller: &Principal) -> Result<(), TimelockError> {
        if *caller != self.admin {
            return Err(TimelockError::Unauthorized(caller.to_string()));
        }
        Ok(())
    }

    /// Apply a self-targeted call (the queue administering itself).
    fn apply_call(&mut self, payload: &[u8]) -> Result<Vec<u8>, TimelockError> {
        let call = TimelockCall::decode(payload)
            .map_err(|e| TimelockError::InvalidPayload(e.to_string()))?;
        match call {
            TimelockCall::SetPendingAdmin(candidate) => {
                self.install_pending_admin(candidate);
            }
        }
        Ok(Vec::new())
    }

    fn install_pending_admin(&mut self, candidate: Principal) {
        tracing::info!(candidate = %candidate, "pending admin nominated");
        self.pending_admin = Some(candidate);
    }
}

/// Serializable snapshot of the queue's identity and admin state.
#[derive(Serialize, Deserialize)]
struct AdminState {
    resource: ResourceId,
    params: TimelockParams,
    admin: Principal,
    pending_admin: Option<Principal>,
    handoff_completed: bool,
}

impl TimelockQueue {
    /// Persist the queue to durable storage: one record per operation plus
    /// the admin-state snapshot.
    pub fn save_to_store(
        &self,
        store: &(impl OperationStore + MetaStore),
    ) -> Result<(), TimelockError> {
        let state = AdminState {
            resource: self.resource.clone(),
            params: self.params.clone(),
            admin: self.admin.clone(),
            pending_admin: self.pending_admin.clone(),
            handoff_completed: self.handoff_completed,
        };
        let bytes =
            bincode::serialize(&state).map_err(|e| TimelockError::Storage(e.to_string()))?;
        store
            .put_meta(ADMIN_STATE_META_KEY, &bytes)
            .map_err(|e| TimelockError::Storage(e.to_string()))?;

        for (id, op) in &self.operations {
            let bytes =
                bincode::serialize(op).map_err(|e| TimelockError::Storage(e.to_string()))?;
            store
                .put_operation(id, &bytes)
                .map_err(|e| TimelockError::Storage(e.to_string()))?;
        }

        // Drop records for operations no longer in the table (cancelled
        // since the last save).
        let stored = store
            .iter_operations()
            .map_err(|e| TimelockError::Storage(e.to_string()))?;
        for (id, _) in stored {
            if !self.operations.contains_key(&id) {
                store
                    .delete_operation(&id)
                    .map_err(|e| TimelockError::Storage(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Restore a queue from durable storage.
    ///
    /// A missing admin-state snapshot is an error: without it the queue
    /// has no admin identity.
    pub fn load_from_store(
        store: &(impl OperationStore + MetaStore),
    ) -> Result<Self, TimelockError> {
        let bytes = store
            .get_meta(ADMIN_STATE_META_KEY)
            .map_err(|e| TimelockError::Storage(e.to_string()))?
            .ok_or_else(|| TimelockError::Storage("admin state snapshot missing".into()))?;
        let state: AdminState =
            bincode::deserialize(&bytes).map_err(|e| TimelockError::Storage(e.to_string()))?;

        let entries = store
            .iter_operations()
            .map_err(|e| TimelockError::Storage(e.to_string()))?;
        let mut operations = HashMap::new();
        for (id, bytes) in entries {
            let op: ScheduledOperation =
                bincode::deserialize(&bytes).map_err(|e| TimelockError::Storage(e.to_string()))?;
            operations.insert(id, op);
        }

        Ok(Self {
            resource: state.resource,
            params: state.params,
            admin: state.admin,
            pending_admin: state.pending_admin,
            handoff_completed: state.handoff_completed,
            operations,
        })
    }

    /// The meta-store key used for admin-state persistence.
    pub fn meta_key() -> &'static [u8] {
        ADMIN_STATE_META_KEY
    }
}
