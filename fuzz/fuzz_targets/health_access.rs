#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env, String, Vec,
};
use health_access::{AccessLevel, HealthAccessContract, HealthAccessContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    RegisterOwner,
    GrantPermission { owner: u8, accessor: u8, category: u32, level: u32, expiration: Option<u16> },
    RevokePermission { owner: u8, accessor: u8, category: u32 },
    HasPermission { owner: u8, accessor: u8, category: u32, level: u32 },
    RequestAccess { patient: u8, duration: u16, types: u8, level: u8 },
    GrantAccess { patient: u8, duration: u16, types: u8 },
    Approve { patient: u8, request_id: u8 },
    Revoke { patient: u8 },
    Extend { patient: u8, additional: u16 },
    Advance { blocks: u8 },
}

fn access_level(seed: u8) -> AccessLevel {
    match seed % 3 {
        0 => AccessLevel::Basic,
        1 => AccessLevel::Full,
        _ => AccessLevel::Emergency,
    }
}

fn pick(users: &[Address], seed: u8) -> Address {
    users[seed as usize % users.len()].clone()
}

fn data_types(env: &Env, count: u8) -> Vec<String> {
    let mut out = Vec::new(env);
    // Up to twelve labels so the cap is crossed.
    for _ in 0..(count % 13) {
        out.push_back(String::from_str(env, "vitals"));
    }
    out
}

fuzz_target!(|actions: std::vec::Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(0);

    let contract_id = env.register(HealthAccessContract, ());
    let client = HealthAccessContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let _ = client.try_initialize(&admin);

    let provider = Address::generate(&env);
    let _ = client.try_register_provider(
        &provider,
        &String::from_str(&env, "Provider"),
        &String::from_str(&env, "General"),
        &String::from_str(&env, "LIC-1"),
    );
    let _ = client.try_verify_provider(&admin, &provider);

    let mut users = vec![provider.clone(), Address::generate(&env)];
    let mut height: u32 = 0;

    for action in actions {
        match action {
            FuzzAction::RegisterOwner => {
                let owner = Address::generate(&env);
                let _ = client.try_register_owner(&owner);
                users.push(owner);
            }
            FuzzAction::GrantPermission { owner, accessor, category, level, expiration } => {
                let expiration = expiration.map(|e| height.saturating_add(e as u32));
                let _ = client.try_grant_permission(
                    &pick(&users, owner),
                    &category,
                    &pick(&users, accessor),
                    &level,
                    &expiration,
                );
            }
            FuzzAction::RevokePermission { owner, accessor, category } => {
                let _ = client.try_revoke_permission(&pick(&users, owner), &category, &pick(&users, accessor));
            }
            FuzzAction::HasPermission { owner, accessor, category, level } => {
                let _ = client.has_permission(&pick(&users, owner), &category, &pick(&users, accessor), &level);
            }
            FuzzAction::RequestAccess { patient, duration, types, level } => {
                let _ = client.try_request_access(
                    &provider,
                    &pick(&users, patient),
                    &(duration as u32),
                    &access_level(level).code(),
                    &data_types(&env, types),
                    &String::from_str(&env, "fuzz"),
                );
            }
            FuzzAction::GrantAccess { patient, duration, types } => {
                let _ = client.try_grant_access(
                    &pick(&users, patient),
                    &provider,
                    &(duration as u32),
                    &AccessLevel::Basic.code(),
                    &data_types(&env, types),
                );
            }
            FuzzAction::Approve { patient, request_id } => {
                let _ = client.try_approve_request(&pick(&users, patient), &provider, &(request_id as u64));
            }
            FuzzAction::Revoke { patient } => {
                let _ = client.try_revoke_access(&pick(&users, patient), &provider);
            }
            FuzzAction::Extend { patient, additional } => {
                let _ = client.try_extend_access(&pick(&users, patient), &provider, &(additional as u32));
            }
            FuzzAction::Advance { blocks } => {
                height = height.saturating_add(blocks as u32).min(100_000);
                env.ledger().set_sequence_number(height);
            }
        }

        // Status must agree with the stored expiry.
        let patient = users[1].clone();
        let status = client.get_access_status(&patient, &patient, &provider);
        if let Some(grant) = status.details {
            assert_eq!(status.has_access, grant.expires_at > height);
        }
    }
});
