//! Native amount carried by a scheduled operation.
//!
//! Amounts are fixed-point integers (u128) to avoid floating-point errors.
//! The gate never does arithmetic on them; it only records the amount and
//! hands it to the dispatcher unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A native-transfer amount in raw units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
