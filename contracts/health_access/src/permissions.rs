//! Category-scoped permission store and owner data references.
//!
//! Every entry point validates in the same order: owner registration, then
//! the category code, then the permission level code, then record existence.
//! Nothing is written until all checks pass.

use common::{current_height, ttl};
use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::{
    errors::ContractError,
    events, query, registry,
    types::{DataCategory, DataReference, PermissionEntry, PermissionLevel, PermissionRecord},
    validation,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const PERM: Symbol = symbol_short!("PERM");
const PERM_IDX: Symbol = symbol_short!("PERM_IDX");
const DATA_REF: Symbol = symbol_short!("DATA_REF");

fn permission_key(
    owner: &Address,
    category: DataCategory,
    accessor: &Address,
) -> (Symbol, Address, DataCategory, Address) {
    (PERM, owner.clone(), category, accessor.clone())
}

fn accessor_index_key(owner: &Address, category: DataCategory) -> (Symbol, Address, DataCategory) {
    (PERM_IDX, owner.clone(), category)
}

fn data_reference_key(owner: &Address, category: DataCategory) -> (Symbol, Address, DataCategory) {
    (DATA_REF, owner.clone(), category)
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub fn load_permission(
    env: &Env,
    owner: &Address,
    category: DataCategory,
    accessor: &Address,
) -> Option<PermissionRecord> {
    env.storage()
        .persistent()
        .get(&permission_key(owner, category, accessor))
}

fn load_accessors(env: &Env, owner: &Address, category: DataCategory) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&accessor_index_key(owner, category))
        .unwrap_or(Vec::new(env))
}

fn index_accessor(env: &Env, owner: &Address, category: DataCategory, accessor: &Address) {
    let mut accessors = load_accessors(env, owner, category);
    if !accessors.contains(accessor) {
        accessors.push_back(accessor.clone());
        ttl::set_persistent(env, &accessor_index_key(owner, category), &accessors);
    }
}

fn unindex_accessor(env: &Env, owner: &Address, category: DataCategory, accessor: &Address) {
    let mut accessors = load_accessors(env, owner, category);
    if let Some(pos) = accessors.first_index_of(accessor) {
        accessors.remove(pos);
        ttl::set_persistent(env, &accessor_index_key(owner, category), &accessors);
    }
}

/// Shared validation for `grant_permission` and `update_permission`.
fn validate_permission_write(
    env: &Env,
    owner: &Address,
    category_code: u32,
    accessor: &Address,
    level_code: u32,
    expiration: Option<u32>,
) -> Result<(DataCategory, PermissionLevel), ContractError> {
    registry::require_registered_owner(env, owner)?;
    let category = DataCategory::from_code(category_code)?;
    let level = PermissionLevel::from_code(level_code)?;
    validation::validate_distinct(owner, accessor)?;
    validation::validate_expiration(expiration, current_height(env))?;
    Ok((category, level))
}

fn store_permission(
    env: &Env,
    owner: &Address,
    category: DataCategory,
    accessor: &Address,
    level: PermissionLevel,
    expiration: Option<u32>,
) -> PermissionRecord {
    let record = PermissionRecord {
        level,
        granted_at: current_height(env),
        expiration,
    };
    ttl::set_persistent(env, &permission_key(owner, category, accessor), &record);
    record
}

// ── Data references ──────────────────────────────────────────────────────────

pub fn set_data_reference(
    env: &Env,
    owner: &Address,
    category_code: u32,
    data_contract: Address,
    reference_id: Option<String>,
) -> Result<DataReference, ContractError> {
    registry::require_registered_owner(env, owner)?;
    let category = DataCategory::from_code(category_code)?;
    validation::validate_reference_id(&reference_id)?;

    let reference = DataReference {
        data_contract: data_contract.clone(),
        reference_id,
    };
    ttl::set_persistent(env, &data_reference_key(owner, category), &reference);

    events::publish_data_reference_set(env, owner.clone(), category, data_contract);

    Ok(reference)
}

/// Discloses the pointer to the owner, or to an accessor with live read access.
pub fn get_data_reference(
    env: &Env,
    caller: &Address,
    owner: &Address,
    category_code: u32,
) -> Result<DataReference, ContractError> {
    registry::require_registered_owner(env, owner)?;
    let category = DataCategory::from_code(category_code)?;

    if caller != owner && !query::has_permission(env, owner, category, caller, PermissionLevel::Read)
    {
        return Err(ContractError::NotAuthorized);
    }

    let key = data_reference_key(owner, category);
    let reference: DataReference = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::NoPermissionFound)?;
    ttl::extend_persistent(env, &key);
    Ok(reference)
}

// ── Permissions ──────────────────────────────────────────────────────────────

/// Creates or overwrites the permission held by `accessor` on the owner's category.
pub fn grant_permission(
    env: &Env,
    owner: &Address,
    category_code: u32,
    accessor: &Address,
    level_code: u32,
    expiration: Option<u32>,
) -> Result<PermissionRecord, ContractError> {
    let (category, level) =
        validate_permission_write(env, owner, category_code, accessor, level_code, expiration)?;

    let record = store_permission(env, owner, category, accessor, level, expiration);
    index_accessor(env, owner, category, accessor);

    events::publish_permission_changed(
        env,
        false,
        owner.clone(),
        category,
        accessor.clone(),
        level,
        expiration,
    );

    Ok(record)
}

/// Same as [`grant_permission`] but requires an existing record.
pub fn update_permission(
    env: &Env,
    owner: &Address,
    category_code: u32,
    accessor: &Address,
    level_code: u32,
    expiration: Option<u32>,
) -> Result<PermissionRecord, ContractError> {
    let (category, level) =
        validate_permission_write(env, owner, category_code, accessor, level_code, expiration)?;

    if load_permission(env, owner, category, accessor).is_none() {
        return Err(ContractError::NoPermissionFound);
    }

    let record = store_permission(env, owner, category, accessor, level, expiration);

    events::publish_permission_changed(
        env,
        true,
        owner.clone(),
        category,
        accessor.clone(),
        level,
        expiration,
    );

    Ok(record)
}

pub fn revoke_permission(
    env: &Env,
    owner: &Address,
    category_code: u32,
    accessor: &Address,
) -> Result<(), ContractError> {
    registry::require_registered_owner(env, owner)?;
    let category = DataCategory::from_code(category_code)?;

    let key = permission_key(owner, category, accessor);
    if !env.storage().persistent().has(&key) {
        return Err(ContractError::NoPermissionFound);
    }

    env.storage().persistent().remove(&key);
    unindex_accessor(env, owner, category, accessor);

    events::publish_permission_revoked(env, owner.clone(), category, accessor.clone());

    Ok(())
}

/// Discloses a single record to its owner or its accessor.
pub fn get_permission(
    env: &Env,
    caller: &Address,
    owner: &Address,
    category_code: u32,
    accessor: &Address,
) -> Result<PermissionRecord, ContractError> {
    let category = DataCategory::from_code(category_code)?;
    if caller != owner && caller != accessor {
        return Err(ContractError::NotAuthorized);
    }
    load_permission(env, owner, category, accessor).ok_or(ContractError::NoPermissionFound)
}

/// Lists every permission on the owner's category, expired ones included.
/// Visible to the owner and to accessors holding live `Full` permission.
pub fn get_permissions_for_category(
    env: &Env,
    caller: &Address,
    owner: &Address,
    category_code: u32,
) -> Result<Vec<PermissionEntry>, ContractError> {
    registry::require_registered_owner(env, owner)?;
    let category = DataCategory::from_code(category_code)?;

    if caller != owner && !query::has_permission(env, owner, category, caller, PermissionLevel::Full)
    {
        return Err(ContractError::NotAuthorized);
    }

    let mut entries = Vec::new(env);
    for accessor in load_accessors(env, owner, category).iter() {
        if let Some(record) = load_permission(env, owner, category, &accessor) {
            entries.push_back(PermissionEntry { accessor, record });
        }
    }
    Ok(entries)
}
