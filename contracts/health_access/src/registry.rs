//! Owner and provider identities, plus the single contract administrator.

use common::{current_height, ttl};
use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

use crate::{
    errors::ContractError,
    events,
    types::{OwnerInfo, ProviderInfo},
    validation,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const OWNER: Symbol = symbol_short!("OWNER");
const PROVIDER: Symbol = symbol_short!("PROVIDER");

fn owner_key(owner: &Address) -> (Symbol, Address) {
    (OWNER, owner.clone())
}

fn provider_key(provider: &Address) -> (Symbol, Address) {
    (PROVIDER, provider.clone())
}

// ── Administrator ────────────────────────────────────────────────────────────

pub fn initialize(env: &Env, admin: &Address) -> Result<(), ContractError> {
    if env.storage().instance().has(&INITIALIZED) {
        return Err(ContractError::AlreadyInitialized);
    }

    env.storage().instance().set(&ADMIN, admin);
    env.storage().instance().set(&INITIALIZED, &true);
    ttl::extend_instance(env);

    events::publish_initialized(env, admin.clone());

    Ok(())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let admin = get_admin(env)?;
    if *caller != admin {
        return Err(ContractError::NotAdmin);
    }
    ttl::extend_instance(env);
    Ok(())
}

/// Hands the administrator role to `new_admin`. Only the current holder may call this.
pub fn set_admin(env: &Env, current: &Address, new_admin: &Address) -> Result<(), ContractError> {
    let admin = get_admin(env)?;
    if *current != admin {
        return Err(ContractError::NotAuthorized);
    }

    env.storage().instance().set(&ADMIN, new_admin);
    ttl::extend_instance(env);

    events::publish_admin_changed(env, admin, new_admin.clone());

    Ok(())
}

// ── Owners ───────────────────────────────────────────────────────────────────

pub fn register_owner(env: &Env, owner: &Address) -> Result<OwnerInfo, ContractError> {
    let key = owner_key(owner);
    if env.storage().persistent().has(&key) {
        return Err(ContractError::UserAlreadyRegistered);
    }

    let info = OwnerInfo {
        owner: owner.clone(),
        registered_at: current_height(env),
    };
    ttl::set_persistent(env, &key, &info);

    events::publish_owner_registered(env, owner.clone());

    Ok(info)
}

pub fn get_owner(env: &Env, owner: &Address) -> Option<OwnerInfo> {
    let key = owner_key(owner);
    let info: Option<OwnerInfo> = env.storage().persistent().get(&key);
    if info.is_some() {
        ttl::extend_persistent(env, &key);
    }
    info
}

pub fn is_owner_registered(env: &Env, owner: &Address) -> bool {
    env.storage().persistent().has(&owner_key(owner))
}

pub fn require_registered_owner(env: &Env, owner: &Address) -> Result<(), ContractError> {
    if !is_owner_registered(env, owner) {
        return Err(ContractError::UserNotRegistered);
    }
    Ok(())
}

// ── Providers ────────────────────────────────────────────────────────────────

pub fn register_provider(
    env: &Env,
    provider: &Address,
    name: String,
    specialty: String,
    license_id: String,
) -> Result<ProviderInfo, ContractError> {
    let key = provider_key(provider);
    if env.storage().persistent().has(&key) {
        return Err(ContractError::AlreadyRegistered);
    }

    validation::validate_provider_profile(&name, &specialty, &license_id)?;

    let info = ProviderInfo {
        provider: provider.clone(),
        name: name.clone(),
        specialty: specialty.clone(),
        license_id,
        verified: false,
        registered_at: current_height(env),
    };
    ttl::set_persistent(env, &key, &info);

    events::publish_provider_registered(env, provider.clone(), name, specialty);

    Ok(info)
}

/// Marks a registered provider as verified. Verifying twice is a no-op.
pub fn verify_provider(env: &Env, admin: &Address, provider: &Address) -> Result<(), ContractError> {
    require_admin(env, admin)?;

    let key = provider_key(provider);
    let mut info: ProviderInfo = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::UnknownProvider)?;

    if info.verified {
        return Ok(());
    }

    info.verified = true;
    ttl::set_persistent(env, &key, &info);

    events::publish_provider_verified(env, provider.clone(), admin.clone());

    Ok(())
}

pub fn get_provider(env: &Env, provider: &Address) -> Option<ProviderInfo> {
    let key = provider_key(provider);
    let info: Option<ProviderInfo> = env.storage().persistent().get(&key);
    if info.is_some() {
        ttl::extend_persistent(env, &key);
    }
    info
}

pub fn is_provider_verified(env: &Env, provider: &Address) -> bool {
    get_provider(env, provider).map_or(false, |info| info.verified)
}

/// Unregistered and unverified providers are rejected alike.
pub fn require_verified_provider(env: &Env, provider: &Address) -> Result<(), ContractError> {
    if !is_provider_verified(env, provider) {
        return Err(ContractError::UnknownProvider);
    }
    Ok(())
}
