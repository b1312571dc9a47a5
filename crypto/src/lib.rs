//! Deterministic identifier derivation for the helm gate.
//!
//! Capability and operation identifiers are Blake2b-256 digests over
//! length-prefixed fields, so distinct field splits can never produce the
//! same digest.

pub mod hash;

pub use hash::{blake2b_256, derive_capability, operation_id};
