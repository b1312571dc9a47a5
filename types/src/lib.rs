//! Fundamental types for the helm gate.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: principals, resources, capability and operation identifiers,
//! native amounts, timestamps, and queue parameters.

pub mod amount;
pub mod capability;
pub mod operation;
pub mod params;
pub mod principal;
pub mod resource;
pub mod time;

pub use amount::Amount;
pub use capability::CapabilityId;
pub use operation::OperationId;
pub use params::TimelockParams;
pub use principal::Principal;
pub use resource::ResourceId;
pub use time::Timestamp;
