//! The relation-table engine — grants, revocations, and `can_perform`.

use crate::error::AuthorizerError;
use crate::scope::GrantScope;
use helm_store::MetaStore;
use helm_types::{CapabilityId, Principal, ResourceId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Meta-store key used for persisting the relation table.
const RELATION_TABLE_META_KEY: &[u8] = b"authorizer_relation_table";

/// The authorizer — maps (capability, principal, scope) to granted/not.
///
/// One instance per deployment owns its relation table exclusively; no
/// other component mutates it directly. Every mutation takes `&mut self`,
/// so a standing check and its corresponding write form a single critical
/// section.
pub struct Authorizer {
    /// Relation table: (capability, principal) → granted scopes.
    grants: HashMap<(CapabilityId, Principal), HashSet<GrantScope>>,
}

impl Authorizer {
    /// Create an authorizer with `initial_admin` holding a global
    /// DEFAULT_ADMIN grant.
    pub fn new(initial_admin: Principal) -> Self {
        let mut grants: HashMap<(CapabilityId, Principal), HashSet<GrantScope>> = HashMap::new();
        grants
            .entry((CapabilityId::DEFAULT_ADMIN, initial_admin))
            .or_default()
            .insert(GrantScope::Global);
        Self { grants }
    }

    /// Whether `principal` may exercise `capability` against `resource`.
    ///
    /// True iff a global grant exists for (capability, principal) or a
    /// grant scoped to exactly `resource`.
    pub fn can_perform(
        &self,
        capability: &CapabilityId,
        principal: &Principal,
        resource: &ResourceId,
    ) -> bool {
        self.grants
            .get(&(*capability, principal.clone()))
            .map_or(false, |scopes| {
                scopes.contains(&GrantScope::Global)
                    || scopes.contains(&GrantScope::Resource(resource.clone()))
            })
    }

    /// Whether `principal` holds `capability` with global scope.
    pub fn can_perform_globally(&self, capability: &CapabilityId, principal: &Principal) -> bool {
        self.grants
            .get(&(*capability, principal.clone()))
            .map_or(false, |scopes| scopes.contains(&GrantScope::Global))
    }

    /// Add a grant. Granting an already-held relation is a no-op.
    ///
    /// Fails with `Unauthorized` unless the caller holds DEFAULT_ADMIN
    /// covering the grant's scope.
    pub fn grant(
        &mut self,
        caller: &Principal,
        capability: CapabilityId,
        principal: &Principal,
        scope: GrantScope,
    ) -> Result<(), AuthorizerError> {
        if !self.has_admin_standing(caller, &scope) {
            return Err(AuthorizerError::Unauthorized(caller.to_string()));
        }
        let inserted = self
            .grants
            .entry((capability, principal.clone()))
            .or_default()
            .insert(scope.clone());
        if inserted {
            tracing::debug!(
                capability = %capability,
                principal = %principal,
                scope = ?scope,
                "grant added"
            );
        }
        Ok(())
    }

    /// Remove a grant. Revoking an ungranted relation is a no-op.
    pub fn revoke(
        &mut self,
        caller: &Principal,
        capability: CapabilityId,
        principal: &Principal,
        scope: GrantScope,
    ) -> Result<(), AuthorizerError> {
        if !self.has_admin_standing(caller, &scope) {
            return Err(AuthorizerError::Unauthorized(caller.to_string()));
        }
        let key = (capability, principal.clone());
        if let Some(scopes) = self.grants.get_mut(&key) {
            if scopes.remove(&scope) {
                tracing::debug!(
                    capability = %capability,
                    principal = %principal,
                    scope = ?scope,
                    "grant revoked"
                );
            }
            if scopes.is_empty() {
                self.grants.remove(&key);
            }
        }
        Ok(())
    }

    /// Grant several capabilities to one principal under one scope.
    pub fn grant_many(
        &mut self,
        caller: &Principal,
        capabilities: &[CapabilityId],
        principal: &Principal,
        scope: GrantScope,
    ) -> Result<(), AuthorizerError> {
        for capability in capabilities {
            self.grant(caller, *capability, principal, scope.clone())?;
        }
        Ok(())
    }

    /// Revoke several capabilities from one principal under one scope.
    pub fn revoke_many(
        &mut self,
        caller: &Principal,
        capabilities: &[CapabilityId],
        principal: &Principal,
        scope: GrantScope,
    ) -> Result<(), AuthorizerError> {
        for capability in capabilities {
            self.revoke(caller, *capability, principal, scope.clone())?;
        }
        Ok(())
    }

    /// Number of (capability, principal, scope) triples in the table.
    pub fn relation_count(&self) -> usize {
        self.grants.values().map(|scopes| scopes.len()).sum()
    }

    /// Admin standing required to mutate a grant with the given scope:
    /// a global DEFAULT_ADMIN grant always suffices; one scoped to the
    /// same resource suffices for mutations scoped to that resource.
    fn has_admin_standing(&self, caller: &Principal, scope: &GrantScope) -> bool {
        match scope {
            GrantScope::Global => {
                self.can_perform_globally(&CapabilityId::DEFAULT_ADMIN, caller)
            }
            GrantScope::Resource(resource) => {
                self.can_perform(&CapabilityId::DEFAULT_ADMIN, caller, resource)
            }
        }
    }
}

/// Serializable snapshot of the relation table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthorizerSnapshot {
    pub grants: HashMap<(CapabilityId, Principal), HashSet<GrantScope>>,
}

impl Authorizer {
    /// Persist the relation table to a meta store.
    pub fn save_to_store(&self, store: &dyn MetaStore) -> Result<(), AuthorizerError> {
        let snapshot = AuthorizerSnapshot {
            grants: self.grants.clone(),
        };
        let bytes =
            bincode::serialize(&snapshot).map_err(|e| AuthorizerError::Storage(e.to_string()))?;
        store
            .put_meta(RELATION_TABLE_META_KEY, &bytes)
            .map_err(|e| AuthorizerError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Restore the relation table from a meta store.
    ///
    /// A missing snapshot is an error: an authorizer with an empty table
    /// has no admin and could never be administered again.
    pub fn load_from_store(store: &dyn MetaStore) -> Result<Self, AuthorizerError> {
        let bytes = store
            .get_meta(RELATION_TABLE_META_KEY)
            .map_err(|e| AuthorizerError::Storage(e.to_string()))?
            .ok_or_else(|| AuthorizerError::Storage("relation table snapshot missing".into()))?;
        let snapshot: AuthorizerSnapshot =
            bincode::deserialize(&bytes).map_err(|e| AuthorizerError::Storage(e.to_string()))?;
        Ok(Self {
            grants: snapshot.grants,
        })
    }

    /// The meta-store key used for relation-table persistence.
    pub fn meta_key() -> &'static [u8] {
        RELATION_TABLE_META_KEY
    }
}
