//! Capability identifiers — "permission to perform operation X on resource Y".

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte capability identifier.
///
/// Derived deterministically from a resource identifier and an operation
/// name (see `helm-crypto`): the same operation on the same resource always
/// yields the same capability, and distinct pairs never collide.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityId([u8; 32]);

impl CapabilityId {
    /// The distinguished capability gating grant/revoke on the authorizer
    /// itself. All-zero, so it can never collide with a derived capability.
    pub const DEFAULT_ADMIN: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
pub(crate) mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
