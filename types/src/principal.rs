//! Principal identity — an actor that invokes gate operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque principal identifier (an account).
///
/// The gate performs no operation on principals beyond equality; what a
/// principal string denotes (a key, an address, a service name) is the
/// embedder's concern.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal(String);

impl Principal {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Principal {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
