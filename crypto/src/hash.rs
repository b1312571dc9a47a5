//! Blake2b hashing and identifier derivation.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use helm_types::{Amount, CapabilityId, OperationId, ResourceId, Timestamp};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash a sequence of fields, each preceded by its 64-bit big-endian length.
///
/// The length prefix keeps the encoding injective: ("ab", "c") and
/// ("a", "bc") digest differently.
fn blake2b_256_framed(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Derive the capability identifier for an operation on a resource.
///
/// Pure and deterministic: the same (resource, operation) pair always
/// yields the same capability, and distinct pairs collide only if Blake2b
/// does.
pub fn derive_capability(resource: &ResourceId, operation: &str) -> CapabilityId {
    CapabilityId::new(blake2b_256_framed(&[
        resource.as_str().as_bytes(),
        operation.as_bytes(),
    ]))
}

/// Derive the queue key for a scheduled operation.
///
/// The key covers every field of the operation tuple, so two operations
/// with identical fields collapse to one queue entry.
pub fn operation_id(
    target: &ResourceId,
    value: Amount,
    payload: &[u8],
    eta: Timestamp,
) -> OperationId {
    OperationId::new(blake2b_256_framed(&[
        target.as_str().as_bytes(),
        &value.raw().to_be_bytes(),
        payload,
        &eta.as_secs().to_be_bytes(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str) -> ResourceId {
        ResourceId::new(name)
    }

    #[test]
    fn blake2b_deterministic() {
        let h1 = blake2b_256(b"hello helm");
        let h2 = blake2b_256(b"hello helm");
        assert_eq!(h1, h2);
    }

    #[test]
    fn blake2b_different_inputs() {
        let h1 = blake2b_256(b"hello");
        let h2 = blake2b_256(b"world");
        assert_ne!(h1, h2);
    }

    #[test]
    fn capability_stable_across_calls() {
        let a = derive_capability(&resource("fees-collector"), "set_swap_fee");
        let b = derive_capability(&resource("fees-collector"), "set_swap_fee");
        assert_eq!(a, b);
    }

    #[test]
    fn capability_distinguishes_operations() {
        let a = derive_capability(&resource("fees-collector"), "set_swap_fee");
        let b = derive_capability(&resource("fees-collector"), "withdraw_fees");
        assert_ne!(a, b);
    }

    #[test]
    fn capability_distinguishes_resources() {
        let a = derive_capability(&resource("vault"), "pause");
        let b = derive_capability(&resource("fees-collector"), "pause");
        assert_ne!(a, b);
    }

    #[test]
    fn capability_framing_is_injective() {
        // Without length prefixes these two would concatenate identically.
        let a = derive_capability(&resource("ab"), "c");
        let b = derive_capability(&resource("a"), "bc");
        assert_ne!(a, b);
    }

    #[test]
    fn derived_capability_is_never_default_admin() {
        let cap = derive_capability(&resource("vault"), "pause");
        assert_ne!(cap, CapabilityId::DEFAULT_ADMIN);
    }

    #[test]
    fn operation_id_covers_every_field() {
        let base = operation_id(
            &resource("vault"),
            Amount::ZERO,
            b"payload",
            Timestamp::new(1000),
        );
        let other_target = operation_id(
            &resource("fees-collector"),
            Amount::ZERO,
            b"payload",
            Timestamp::new(1000),
        );
        let other_value = operation_id(
            &resource("vault"),
            Amount::new(1),
            b"payload",
            Timestamp::new(1000),
        );
        let other_payload = operation_id(
            &resource("vault"),
            Amount::ZERO,
            b"payloae",
            Timestamp::new(1000),
        );
        let other_eta = operation_id(
            &resource("vault"),
            Amount::ZERO,
            b"payload",
            Timestamp::new(1001),
        );
        assert_ne!(base, other_target);
        assert_ne!(base, other_value);
        assert_ne!(base, other_payload);
        assert_ne!(base, other_eta);
    }

    #[test]
    fn identical_tuples_collapse() {
        let a = operation_id(&resource("vault"), Amount::ZERO, b"x", Timestamp::new(7));
        let b = operation_id(&resource("vault"), Amount::ZERO, b"x", Timestamp::new(7));
        assert_eq!(a, b);
    }
}
