//! Operation identifiers — the deterministic keys of the timelock queue.

use crate::capability::hex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte scheduled-operation identifier.
///
/// Derived from `(target, value, payload, eta)` (see `helm-crypto`); two
/// operations with identical fields are indistinguishable and collapse to
/// one queue entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId([u8; 32]);

impl OperationId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperationId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}
