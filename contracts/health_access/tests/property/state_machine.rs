#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for a single patient/provider pair.
//!
//! A random sequence of grant, revoke, extend, request, approve and ledger
//! advance operations is applied to both the contract and a small in-memory
//! model. After every step the reported access status and pending request
//! count must agree with the model.

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env, String, Vec};
use health_access::validation::MAX_PENDING_PER_PROVIDER;
use health_access::{
    AccessLevel, ContractError, HealthAccessContract, HealthAccessContractClient,
};

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    Grant {
        #[proptest(strategy = "0u32..50")]
        duration: u32,
    },
    Revoke,
    Extend {
        #[proptest(strategy = "0u32..50")]
        additional: u32,
    },
    Advance {
        #[proptest(strategy = "0u32..30")]
        blocks: u32,
    },
    Request {
        #[proptest(strategy = "1u32..50")]
        duration: u32,
    },
    ApproveOldest,
}

#[derive(Default)]
struct Model {
    height: u32,
    expires_at: Option<u32>,
    pending: std::vec::Vec<(u64, u32)>,
    issued: u64,
}

impl Model {
    fn active(&self) -> bool {
        self.expires_at.map_or(false, |at| at > self.height)
    }
}

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
    let provider = Address::generate(&env);
    client.register_provider(
        &provider,
        &String::from_str(&env, "Dr. Machine"),
        &String::from_str(&env, "Pathology"),
        &String::from_str(&env, "LIC-SM"),
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
    #[test]
    fn prop_grant_lifecycle_matches_model(ops in prop::collection::vec(any::<Op>(), 1..40)) {
        let (env, client, patient, provider) = setup();
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Grant { duration } => {
                    let result = client.try_grant_access(
                        &patient, &provider, &duration, &AccessLevel::Basic.code(), &vitals(&env),
                    );
                    if duration == 0 {
                        prop_assert_eq!(result.err(), Some(Ok(ContractError::InvalidRequest)));
                    } else {
                        prop_assert!(result.is_ok());
                        model.expires_at = Some(model.height + duration);
                    }
                }
                Op::Revoke => {
                    let result = client.try_revoke_access(&patient, &provider);
                    if model.active() {
                        prop_assert!(result.is_ok());
                        model.expires_at = None;
                    } else {
                        prop_assert_eq!(result, Err(Ok(ContractError::NoAccessGranted)));
                    }
                }
                Op::Extend { additional } => {
                    let result = client.try_extend_access(&patient, &provider, &additional);
                    match model.expires_at {
                        None => prop_assert_eq!(
                            result.err(),
                            Some(Ok(ContractError::NoAccessGranted))
                        ),
                        Some(_) if additional == 0 => prop_assert_eq!(
                            result.err(),
                            Some(Ok(ContractError::InvalidRequest))
                        ),
                        Some(at) => {
                            prop_assert!(result.is_ok());
                            model.expires_at = Some(at + additional);
                        }
                    }
                }
                Op::Advance { blocks } => {
                    model.height += blocks;
                    env.ledger().set_sequence_number(model.height);
                }
                Op::Request { duration } => {
                    let result = client.try_request_access(
                        &provider,
                        &patient,
                        &duration,
                        &AccessLevel::Full.code(),
                        &vitals(&env),
                        &String::from_str(&env, "model"),
                    );
                    if model.pending.len() as u32 >= MAX_PENDING_PER_PROVIDER {
                        prop_assert_eq!(result.err(), Some(Ok(ContractError::InvalidRequest)));
                    } else {
                        model.issued += 1;
                        prop_assert_eq!(result, Ok(Ok(model.issued)));
                        model.pending.push((model.issued, duration));
                    }
                }
                Op::ApproveOldest => {
                    if model.pending.is_empty() {
                        let result = client.try_approve_request(&patient, &provider, &(model.issued + 1));
                        prop_assert_eq!(result.err(), Some(Ok(ContractError::InvalidRequest)));
                    } else {
                        let (id, duration) = model.pending.remove(0);
                        let grant = client.approve_request(&patient, &provider, &id);
                        model.expires_at = Some(model.height + duration);
                        prop_assert_eq!(Some(grant.expires_at), model.expires_at);
                    }
                }
            }

            let status = client.get_access_status(&patient, &patient, &provider);
            prop_assert_eq!(status.has_access, model.active());
            prop_assert_eq!(status.expired, model.expires_at.is_some() && !model.active());
            prop_assert_eq!(
                client.get_pending_requests(&patient).len() as usize,
                model.pending.len()
            );
        }
    }
}
