use crate::types::{AccessLevel, DataCategory, PermissionLevel};
use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub ledger: u32,
}

/// Event published when the administrator role moves to a new address.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChangedEvent {
    pub previous: Address,
    pub admin: Address,
    pub ledger: u32,
}

/// Event published when a data owner registers.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerRegisteredEvent {
    pub owner: Address,
    pub ledger: u32,
}

/// Event published when a provider registers itself.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderRegisteredEvent {
    pub provider: Address,
    pub name: String,
    pub specialty: String,
    pub ledger: u32,
}

/// Event published when the administrator verifies a provider.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderVerifiedEvent {
    pub provider: Address,
    pub verifier: Address,
    pub ledger: u32,
}

/// Event published when an owner points a category at external data.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataReferenceSetEvent {
    pub owner: Address,
    pub category: DataCategory,
    pub data_contract: Address,
    pub ledger: u32,
}

/// Event published when a category permission is granted or updated.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermissionChangedEvent {
    pub owner: Address,
    pub category: DataCategory,
    pub accessor: Address,
    pub level: PermissionLevel,
    pub expiration: Option<u32>,
    pub ledger: u32,
}

/// Event published when a category permission is revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermissionRevokedEvent {
    pub owner: Address,
    pub category: DataCategory,
    pub accessor: Address,
    pub ledger: u32,
}

/// Event published when a provider asks a patient for access.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequestedEvent {
    pub request_id: u64,
    pub patient: Address,
    pub provider: Address,
    pub access_level: AccessLevel,
    pub duration: u32,
    pub ledger: u32,
}

/// Event published when a grant is created, either directly or by approval.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub patient: Address,
    pub provider: Address,
    pub access_level: AccessLevel,
    pub expires_at: u32,
    /// Set when the grant came from an approved request
    pub request_id: Option<u64>,
    pub ledger: u32,
}

/// Event published when a grant is revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub patient: Address,
    pub provider: Address,
    pub ledger: u32,
}

/// Event published when a grant's expiry is pushed out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessExtendedEvent {
    pub patient: Address,
    pub provider: Address,
    pub additional: u32,
    pub expires_at: u32,
    pub ledger: u32,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_admin_changed(env: &Env, previous: Address, admin: Address) {
    let topics = (symbol_short!("ADM_SET"), admin.clone());
    let data = AdminChangedEvent {
        previous,
        admin,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_owner_registered(env: &Env, owner: Address) {
    let topics = (symbol_short!("OWN_REG"), owner.clone());
    let data = OwnerRegisteredEvent {
        owner,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a provider self-registers.
/// The provider starts unverified; verification emits its own event.
pub fn publish_provider_registered(
    env: &Env,
    provider: Address,
    name: String,
    specialty: String,
) {
    let topics = (symbol_short!("PRV_REG"), provider.clone());
    let data = ProviderRegisteredEvent {
        provider,
        name,
        specialty,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_provider_verified(env: &Env, provider: Address, verifier: Address) {
    let topics = (symbol_short!("PRV_VER"), provider.clone());
    let data = ProviderVerifiedEvent {
        provider,
        verifier,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_data_reference_set(
    env: &Env,
    owner: Address,
    category: DataCategory,
    data_contract: Address,
) {
    let topics = (symbol_short!("DREF_SET"), owner.clone());
    let data = DataReferenceSetEvent {
        owner,
        category,
        data_contract,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a permission is granted (`PERM_GRT`) or updated (`PERM_UPD`).
pub fn publish_permission_changed(
    env: &Env,
    updated: bool,
    owner: Address,
    category: DataCategory,
    accessor: Address,
    level: PermissionLevel,
    expiration: Option<u32>,
) {
    let name = if updated {
        symbol_short!("PERM_UPD")
    } else {
        symbol_short!("PERM_GRT")
    };
    let topics = (name, owner.clone(), accessor.clone());
    let data = PermissionChangedEvent {
        owner,
        category,
        accessor,
        level,
        expiration,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_permission_revoked(
    env: &Env,
    owner: Address,
    category: DataCategory,
    accessor: Address,
) {
    let topics = (symbol_short!("PERM_REV"), owner.clone(), accessor.clone());
    let data = PermissionRevokedEvent {
        owner,
        category,
        accessor,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a provider files an access request.
/// Includes the allocated request id so patients can approve it.
pub fn publish_access_requested(
    env: &Env,
    request_id: u64,
    patient: Address,
    provider: Address,
    access_level: AccessLevel,
    duration: u32,
) {
    let topics = (symbol_short!("ACC_REQ"), patient.clone(), provider.clone());
    let data = AccessRequestedEvent {
        request_id,
        patient,
        provider,
        access_level,
        duration,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_granted(
    env: &Env,
    patient: Address,
    provider: Address,
    access_level: AccessLevel,
    expires_at: u32,
    request_id: Option<u64>,
) {
    let topics = (symbol_short!("ACC_GRT"), patient.clone(), provider.clone());
    let data = AccessGrantedEvent {
        patient,
        provider,
        access_level,
        expires_at,
        request_id,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_revoked(env: &Env, patient: Address, provider: Address) {
    let topics = (symbol_short!("ACC_REV"), patient.clone(), provider.clone());
    let data = AccessRevokedEvent {
        patient,
        provider,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_extended(
    env: &Env,
    patient: Address,
    provider: Address,
    additional: u32,
    expires_at: u32,
) {
    let topics = (symbol_short!("ACC_EXT"), patient.clone(), provider.clone());
    let data = AccessExtendedEvent {
        patient,
        provider,
        additional,
        expires_at,
        ledger: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}
