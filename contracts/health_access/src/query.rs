//! Read-only authorization evaluation over the permission store and grants.
//!
//! Nothing here writes state. Expiry is always judged against the ledger
//! height of the current invocation.

use common::{current_height, is_live, is_live_opt};
use soroban_sdk::{Address, Env, String};

use crate::{
    errors::ContractError,
    grants, permissions,
    types::{AccessGrant, AccessStatus, DataCategory, PermissionLevel, PermissionRecord},
};

/// Whether `record` satisfies `required` at height `now`.
pub fn record_allows(record: &PermissionRecord, required: PermissionLevel, now: u32) -> bool {
    record.level.satisfies(required) && is_live_opt(record.expiration, now)
}

pub fn has_permission(
    env: &Env,
    owner: &Address,
    category: DataCategory,
    accessor: &Address,
    required: PermissionLevel,
) -> bool {
    permissions::load_permission(env, owner, category, accessor)
        .map_or(false, |record| record_allows(&record, required, current_height(env)))
}

/// Wire-level variant: unknown category or level codes are never authorized.
pub fn has_permission_codes(
    env: &Env,
    owner: &Address,
    category_code: u32,
    accessor: &Address,
    required_code: u32,
) -> bool {
    match (
        DataCategory::from_code(category_code),
        PermissionLevel::from_code(required_code),
    ) {
        (Ok(category), Ok(required)) => has_permission(env, owner, category, accessor, required),
        _ => false,
    }
}

pub fn grant_is_active(grant: &AccessGrant, now: u32) -> bool {
    is_live(grant.expires_at, now)
}

/// Only the two parties of a grant may inspect it.
pub fn require_party(
    caller: &Address,
    patient: &Address,
    provider: &Address,
) -> Result<(), ContractError> {
    if caller != patient && caller != provider {
        return Err(ContractError::NotAuthorized);
    }
    Ok(())
}

pub fn access_status(env: &Env, patient: &Address, provider: &Address) -> AccessStatus {
    match grants::load_grant(env, patient, provider) {
        Some(grant) => {
            let active = grant_is_active(&grant, current_height(env));
            AccessStatus {
                has_access: active,
                details: Some(grant),
                expired: !active,
            }
        }
        None => AccessStatus {
            has_access: false,
            details: None,
            expired: false,
        },
    }
}

/// Succeeds when the provider holds a live grant covering `data_type`.
pub fn check_data_access(
    env: &Env,
    provider: &Address,
    patient: &Address,
    data_type: &String,
) -> Result<(), ContractError> {
    let grant =
        grants::load_grant(env, patient, provider).ok_or(ContractError::NoAccessGranted)?;

    if !grant_is_active(&grant, current_height(env)) {
        return Err(ContractError::AccessExpired);
    }

    if !grant.data_types.contains(data_type) {
        return Err(ContractError::NoAccessGranted);
    }

    Ok(())
}
