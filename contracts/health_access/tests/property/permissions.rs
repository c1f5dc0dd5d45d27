#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the category permission store.
//!
//! Invariants tested:
//! - `Full` satisfies every level; `Read` and `Write` satisfy only themselves
//! - A permission with an expiration is live strictly before that height
//! - Unknown category codes are rejected before any write

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env};
use health_access::{ContractError, HealthAccessContract, HealthAccessContractClient};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, HealthAccessContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(HealthAccessContract, ());
    let client = HealthAccessContractClient::new(&env, &contract_id);
    client.initialize(&Address::generate(&env));

    let owner = Address::generate(&env);
    client.register_owner(&owner);

    (env, client, owner)
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    /// Level satisfaction follows the exact-or-full rule for every category.
    #[test]
    fn prop_level_satisfaction_matrix(
        category in 1u32..=4,
        granted in 1u32..=3,
        required in 1u32..=3,
    ) {
        let (env, client, owner) = setup();
        let accessor = Address::generate(&env);

        client.grant_permission(&owner, &category, &accessor, &granted, &None);

        let expected = granted == required || granted == 3;
        prop_assert_eq!(
            client.has_permission(&owner, &category, &accessor, &required),
            expected
        );
    }

    /// Expiry is strict: live at `expiration - 1`, dead at `expiration`.
    #[test]
    fn prop_expiration_is_strict(start in 0u32..2_000, lifetime in 1u32..2_000) {
        let (env, client, owner) = setup();
        let accessor = Address::generate(&env);
        env.ledger().set_sequence_number(start);

        let expiration = start + lifetime;
        client.grant_permission(&owner, &1, &accessor, &1, &Some(expiration));

        env.ledger().set_sequence_number(expiration - 1);
        prop_assert!(client.has_permission(&owner, &1, &accessor, &1));
        env.ledger().set_sequence_number(expiration);
        prop_assert!(!client.has_permission(&owner, &1, &accessor, &1));
    }

    /// Category codes outside the closed set never produce a record.
    #[test]
    fn prop_unknown_category_rejected(category in prop_oneof![Just(0u32), 5u32..=u32::MAX]) {
        let (env, client, owner) = setup();
        let accessor = Address::generate(&env);

        let result = client.try_grant_permission(&owner, &category, &accessor, &1, &None);
        prop_assert_eq!(result, Err(Ok(ContractError::InvalidDataCategory)));
        prop_assert!(!client.has_permission(&owner, &category, &accessor, &1));
    }

    /// Revocation always clears every level.
    #[test]
    fn prop_revoke_clears_permission(category in 1u32..=4, granted in 1u32..=3) {
        let (env, client, owner) = setup();
        let accessor = Address::generate(&env);

        client.grant_permission(&owner, &category, &accessor, &granted, &None);
        client.revoke_permission(&owner, &category, &accessor);

        for required in 1u32..=3 {
            prop_assert!(!client.has_permission(&owner, &category, &accessor, &required));
        }
    }
}
