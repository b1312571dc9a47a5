//! Resource identity — a target a capability or operation applies to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque resource identifier.
///
/// Resources name the subsystems the gate protects (a fee collector, a
/// vault, the queue itself). Like principals, they carry no structure the
/// gate interprets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
