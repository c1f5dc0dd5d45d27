#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for provider access grants.
//!
//! Invariants tested:
//! - Approved grants expire at approval height plus the requested duration
//! - `check_data_access` succeeds exactly while the grant is live
//! - Request ids increase by one per successful request
//! - Open requests per provider stop at the cap with a typed error

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env, String, Vec};
use health_access::validation::MAX_PENDING_PER_PROVIDER;
use health_access::{
    AccessLevel, ContractError, HealthAccessContract, HealthAccessContractClient,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, HealthAccessContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(0);

    let contract_id = env.register(HealthAccessContract, ());
    let client = HealthAccessContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin);

    let patient = Address::generate(&env);
    client.register_owner(&patient);

    let provider = Address::generate(&env);
    client.register_provider(
        &provider,
        &String::from_str(&env, "Dr. Property"),
        &String::from_str(&env, "Neurology"),
        &String::from_str(&env, "LIC-PROP"),
    );
    client.verify_provider(&admin, &provider);

    (env, client, patient, provider)
}

fn vitals(env: &Env) -> Vec<String> {
    let mut out = Vec::new(env);
    out.push_back(String::from_str(env, "vitals"));
    out
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    /// Expiry is measured from the approval ledger, not the request ledger.
    #[test]
    fn prop_approval_uses_approval_height(
        requested_at in 0u32..1_000,
        delay in 0u32..1_000,
        duration in 1u32..10_000,
    ) {
        let (env, client, patient, provider) = setup();

        env.ledger().set_sequence_number(requested_at);
        let request_id = client.request_access(
            &provider,
            &patient,
            &duration,
            &AccessLevel::Basic.code(),
            &vitals(&env),
            &String::from_str(&env, ""),
        );

        let approved_at = requested_at + delay;
        env.ledger().set_sequence_number(approved_at);
        let grant = client.approve_request(&patient, &provider, &request_id);

        prop_assert_eq!(grant.granted_at, approved_at);
        prop_assert_eq!(grant.expires_at, approved_at + duration);
    }

    /// Data access holds for every height in `[granted_at, expires_at)` and fails after.
    #[test]
    fn prop_check_access_matches_liveness(duration in 1u32..500, probe in 0u32..1_000) {
        let (env, client, patient, provider) = setup();
        let label = String::from_str(&env, "vitals");

        client.grant_access(&patient, &provider, &duration, &AccessLevel::Full.code(), &vitals(&env));
        env.ledger().set_sequence_number(probe);

        let result = client.try_check_data_access(&provider, &patient, &label);
        if probe < duration {
            prop_assert_eq!(result, Ok(Ok(())));
        } else {
            prop_assert_eq!(result, Err(Ok(ContractError::AccessExpired)));
        }
    }

    /// Every successful request takes the next id; the count matches the last id.
    #[test]
    fn prop_request_ids_are_sequential(count in 1usize..=(MAX_PENDING_PER_PROVIDER as usize)) {
        let (env, client, patient, provider) = setup();

        for expected in 1..=count as u64 {
            let id = client.request_access(
                &provider,
                &patient,
                &10,
                &AccessLevel::Basic.code(),
                &vitals(&env),
                &String::from_str(&env, "again"),
            );
            prop_assert_eq!(id, expected);
        }
        prop_assert_eq!(client.get_request_count(), count as u64);
        prop_assert_eq!(client.get_pending_requests(&patient).len(), count as u32);
    }

    /// A provider can never hold more open requests on one patient than the cap.
    #[test]
    fn prop_pending_requests_never_exceed_cap(attempts in 1u32..12) {
        let (env, client, patient, provider) = setup();

        for n in 0..attempts {
            let result = client.try_request_access(
                &provider,
                &patient,
                &10,
                &AccessLevel::Basic.code(),
                &vitals(&env),
                &String::from_str(&env, ""),
            );
            if n < MAX_PENDING_PER_PROVIDER {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result.err(), Some(Ok(ContractError::InvalidRequest)));
            }
        }
        prop_assert_eq!(
            client.get_pending_requests(&patient).len(),
            attempts.min(MAX_PENDING_PER_PROVIDER)
        );
    }

    /// More than ten labels is always rejected.
    #[test]
    fn prop_too_many_data_types_rejected(extra in 1u32..20) {
        let (env, client, patient, provider) = setup();
        let mut types = Vec::new(&env);
        for _ in 0..(10 + extra) {
            types.push_back(String::from_str(&env, "label"));
        }

        let result = client.try_grant_access(&patient, &provider, &10, &AccessLevel::Basic.code(), &types);
        prop_assert_eq!(result, Err(Ok(ContractError::InvalidRequest)));
    }
}
