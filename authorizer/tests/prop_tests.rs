use proptest::prelude::*;

use helm_authorizer::{Authorizer, GrantScope};
use helm_types::{CapabilityId, Principal, ResourceId};

fn principal(name: &str) -> Principal {
    Principal::new(name)
}

proptest! {
    /// A scoped grant never authorizes a different resource.
    #[test]
    fn scoped_grant_never_leaks(
        granted in "[a-z]{1,12}",
        queried in "[a-z]{1,12}",
        seed in 1u8..=255,
    ) {
        let admin = principal("admin");
        let mut auth = Authorizer::new(admin.clone());
        let cap = CapabilityId::new([seed; 32]);

        auth.grant(
            &admin,
            cap,
            &principal("keeper"),
            GrantScope::Resource(ResourceId::new(granted.clone())),
        ).unwrap();

        let allowed = auth.can_perform(&cap, &principal("keeper"), &ResourceId::new(queried.clone()));
        prop_assert_eq!(allowed, granted == queried);
    }

    /// A global grant authorizes every resource.
    #[test]
    fn global_grant_covers_all(resource in "[a-z/]{1,16}", seed in 1u8..=255) {
        let admin = principal("admin");
        let mut auth = Authorizer::new(admin.clone());
        let cap = CapabilityId::new([seed; 32]);

        auth.grant(&admin, cap, &principal("keeper"), GrantScope::Global).unwrap();
        prop_assert!(auth.can_perform(&cap, &principal("keeper"), &ResourceId::new(resource)));
    }

    /// Repeated grants leave the relation table unchanged.
    #[test]
    fn grant_is_idempotent(repeats in 2usize..6, seed in 1u8..=255) {
        let admin = principal("admin");
        let mut auth = Authorizer::new(admin.clone());
        let cap = CapabilityId::new([seed; 32]);

        auth.grant(&admin, cap, &principal("keeper"), GrantScope::Global).unwrap();
        let count = auth.relation_count();
        for _ in 0..repeats {
            auth.grant(&admin, cap, &principal("keeper"), GrantScope::Global).unwrap();
        }
        prop_assert_eq!(auth.relation_count(), count);
    }

    /// Grant followed by revoke restores the denied state.
    #[test]
    fn revoke_undoes_grant(resource in "[a-z]{1,12}", seed in 1u8..=255) {
        let admin = principal("admin");
        let mut auth = Authorizer::new(admin.clone());
        let cap = CapabilityId::new([seed; 32]);
        let scope = GrantScope::Resource(ResourceId::new(resource.clone()));

        auth.grant(&admin, cap, &principal("keeper"), scope.clone()).unwrap();
        auth.revoke(&admin, cap, &principal("keeper"), scope).unwrap();

        prop_assert!(!auth.can_perform(&cap, &principal("keeper"), &ResourceId::new(resource)));
    }
}
