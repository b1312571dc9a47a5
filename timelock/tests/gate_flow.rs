//! End-to-end gate flows: the timelock queue driving protected subsystems,
//! including the authorizer itself.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use helm_authorizer::{derive_capability, Authorizer, GrantScope};
use helm_nullables::{NullClock, NullDispatcher};
use helm_timelock::{
    DispatchError, Dispatcher, TimelockCall, TimelockError, TimelockQueue,
};
use helm_types::{Amount, CapabilityId, Principal, ResourceId, TimelockParams};

/// 5 days.
const DELAY: u64 = 432_000;
/// 14 days.
const GRACE: u64 = 1_209_600;

fn principal(name: &str) -> Principal {
    Principal::new(name)
}

fn resource(name: &str) -> ResourceId {
    ResourceId::new(name)
}

fn make_queue(admin: &Principal) -> TimelockQueue {
    TimelockQueue::new(
        resource("timelock"),
        admin.clone(),
        TimelockParams {
            delay_secs: DELAY,
            grace_period_secs: GRACE,
        },
    )
    .unwrap()
}

#[test]
fn timelocked_fee_change_executes_within_window() {
    let admin = principal("dao-multisig");
    let mut queue = make_queue(&admin);
    let clock = NullClock::new(1_650_000_000);
    let dispatcher = NullDispatcher::new();

    // Queue a fee change 6 days out.
    let eta = clock.now().plus(518_400);
    queue
        .queue(
            &admin,
            resource("fees-collector"),
            Amount::ZERO,
            b"set_swap_fee:2000".to_vec(),
            eta,
            clock.now(),
        )
        .unwrap();

    // Advance 6 days and a bit, then execute.
    clock.advance(518_500);
    queue
        .execute(
            &admin,
            &resource("fees-collector"),
            Amount::ZERO,
            b"set_swap_fee:2000",
            eta,
            clock.now(),
            &dispatcher,
        )
        .unwrap();

    let calls = dispatcher.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, resource("fees-collector"));
    assert_eq!(calls[0].2, b"set_swap_fee:2000");
}

#[test]
fn stale_operation_is_rejected() {
    let admin = principal("dao-multisig");
    let mut queue = make_queue(&admin);
    let clock = NullClock::new(1_650_000_000);
    let dispatcher = NullDispatcher::new();

    let eta = clock.now().plus(518_400);
    queue
        .queue(
            &admin,
            resource("fees-collector"),
            Amount::ZERO,
            b"set_swap_fee:2000".to_vec(),
            eta,
            clock.now(),
        )
        .unwrap();

    // eta + grace period + one second: permanently stale.
    clock.advance(518_400 + GRACE + 1);
    let result = queue.execute(
        &admin,
        &resource("fees-collector"),
        Amount::ZERO,
        b"set_swap_fee:2000",
        eta,
        clock.now(),
        &dispatcher,
    );
    assert!(matches!(result, Err(TimelockError::Stale { .. })));
    assert_eq!(dispatcher.call_count(), 0);
}

#[test]
fn eta_short_of_the_delay_is_rejected() {
    let admin = principal("dao-multisig");
    let mut queue = make_queue(&admin);
    let clock = NullClock::new(1_650_000_000);

    let eta = clock.now().plus(DELAY - 100);
    let result = queue.queue(
        &admin,
        resource("fees-collector"),
        Amount::ZERO,
        b"set_swap_fee:2000".to_vec(),
        eta,
        clock.now(),
    );
    assert!(matches!(result, Err(TimelockError::DelayNotSatisfied { .. })));
}

#[test]
fn admin_transfer_goes_through_the_queue_after_the_first_handoff() {
    let admin = principal("dao-multisig");
    let mut queue = make_queue(&admin);
    let clock = NullClock::new(1_650_000_000);
    let dispatcher = NullDispatcher::new();

    // First transfer: direct, one time only.
    queue.set_pending_admin(&admin, principal("user")).unwrap();
    queue.accept_admin(&principal("user")).unwrap();
    assert_eq!(queue.admin(), &principal("user"));

    // Direct nomination is now closed, even to the sitting admin.
    assert!(matches!(
        queue.set_pending_admin(&principal("user"), principal("other")),
        Err(TimelockError::Unauthorized(_))
    ));

    // The nomination has to ride the queue, targeting the queue itself.
    let payload = TimelockCall::SetPendingAdmin(principal("other")).encode();
    let eta = clock.now().plus(518_400);
    queue
        .queue(
            &principal("user"),
            resource("timelock"),
            Amount::ZERO,
            payload.clone(),
            eta,
            clock.now(),
        )
        .unwrap();

    clock.advance(518_500);
    queue
        .execute(
            &principal("user"),
            &resource("timelock"),
            Amount::ZERO,
            &payload,
            eta,
            clock.now(),
            &dispatcher,
        )
        .unwrap();
    queue.accept_admin(&principal("other")).unwrap();

    assert_eq!(queue.admin(), &principal("other"));
    assert_eq!(dispatcher.call_count(), 0);
}

/// Grant/revoke requests the queue can address to the authorizer.
#[derive(Serialize, Deserialize)]
enum AuthorizerCall {
    Grant {
        capability: CapabilityId,
        principal: Principal,
        scope: GrantScope,
    },
}

/// Dispatcher that routes operations targeting "authorizer" into an
/// authorizer instance, acting with the queue's own principal — the target
/// re-checks authorization against its relation table.
struct AuthorizerDispatcher {
    authorizer: RefCell<Authorizer>,
    queue_principal: Principal,
}

impl Dispatcher for AuthorizerDispatcher {
    fn dispatch(
        &self,
        target: &ResourceId,
        _value: Amount,
        payload: &[u8],
    ) -> Result<Vec<u8>, DispatchError> {
        if target != &resource("authorizer") {
            return Err(DispatchError(format!("unknown target {target}")));
        }
        let call: AuthorizerCall = bincode::deserialize(payload)
            .map_err(|e| DispatchError(e.to_string()))?;
        match call {
            AuthorizerCall::Grant {
                capability,
                principal,
                scope,
            } => self
                .authorizer
                .borrow_mut()
                .grant(&self.queue_principal, capability, &principal, scope)
                .map_err(|e| DispatchError(e.to_string()))?,
        }
        Ok(Vec::new())
    }
}

#[test]
fn timelock_becomes_default_admin_of_the_authorizer() {
    let dao = principal("dao-multisig");
    let timelock_principal = principal("timelock");
    let clock = NullClock::new(1_650_000_000);

    let mut queue = make_queue(&dao);
    let mut authorizer = Authorizer::new(dao.clone());

    // Hand the relation table to the queue: grant it DEFAULT_ADMIN, then
    // revoke the dao's own grant.
    authorizer
        .grant(
            &dao,
            CapabilityId::DEFAULT_ADMIN,
            &timelock_principal,
            GrantScope::Global,
        )
        .unwrap();
    authorizer
        .revoke(&dao, CapabilityId::DEFAULT_ADMIN, &dao, GrantScope::Global)
        .unwrap();

    // The dao can no longer grant directly.
    let set_fee = derive_capability(&resource("fees-collector"), "set_swap_fee");
    assert!(authorizer
        .grant(
            &dao,
            set_fee,
            &principal("keeper"),
            GrantScope::Resource(resource("fees-collector")),
        )
        .is_err());

    // But it can still schedule the grant through the queue, which now
    // holds the admin capability.
    let payload = bincode::serialize(&AuthorizerCall::Grant {
        capability: set_fee,
        principal: principal("keeper"),
        scope: GrantScope::Resource(resource("fees-collector")),
    })
    .unwrap();
    let eta = clock.now().plus(518_400);
    queue
        .queue(
            &dao,
            resource("authorizer"),
            Amount::ZERO,
            payload.clone(),
            eta,
            clock.now(),
        )
        .unwrap();

    clock.advance(518_500);
    let dispatcher = AuthorizerDispatcher {
        authorizer: RefCell::new(authorizer),
        queue_principal: timelock_principal,
    };
    queue
        .execute(
            &dao,
            &resource("authorizer"),
            Amount::ZERO,
            &payload,
            eta,
            clock.now(),
            &dispatcher,
        )
        .unwrap();

    let authorizer = dispatcher.authorizer.into_inner();
    assert!(authorizer.can_perform(&set_fee, &principal("keeper"), &resource("fees-collector")));
    assert!(!authorizer.can_perform(&set_fee, &principal("keeper"), &resource("vault")));
}
