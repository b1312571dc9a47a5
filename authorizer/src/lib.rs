//! Role-based authorization for the helm gate.
//!
//! The authorizer is the single source of truth for "who may do what,
//! where": it holds the relation table mapping (capability, principal,
//! scope) to granted/not and answers `can_perform` queries. Mutating the
//! table is itself gated on the distinguished DEFAULT_ADMIN capability, so
//! administration can be handed to the timelock queue by granting it
//! DEFAULT_ADMIN and revoking everyone else's.

pub mod engine;
pub mod error;
pub mod scope;

pub use engine::Authorizer;
pub use error::AuthorizerError;
pub use scope::GrantScope;

pub use helm_crypto::derive_capability;
