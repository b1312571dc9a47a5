//! Grant scope — the breadth of a capability grant.

use helm_types::ResourceId;
use serde::{Deserialize, Serialize};

/// Scope of a grant — determines which resources it applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantScope {
    /// The principal may exercise the capability against any resource.
    Global,
    /// The principal may exercise it only against this resource.
    Resource(ResourceId),
}
