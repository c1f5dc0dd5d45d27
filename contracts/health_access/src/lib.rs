#![no_std]
#![allow(clippy::too_many_arguments)]

pub mod errors;
pub mod events;
pub mod grants;
pub mod permissions;
pub mod query;
pub mod registry;
pub mod types;
pub mod validation;


use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

pub use errors::ContractError;
pub use types::{
    AccessGrant, AccessLevel, AccessRequest, AccessStatus, DataCategory, DataReference, OwnerInfo,
    PermissionEntry, PermissionLevel, PermissionRecord, ProviderInfo, RequestRef,
};

#[contract]
pub struct HealthAccessContract;

#[contractimpl]
impl HealthAccessContract {
    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Initialize the contract with the deploying administrator
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        admin.require_auth();
        registry::initialize(&env, &admin)
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        registry::get_admin(&env)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        registry::is_initialized(&env)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    // ── Identity Registry ────────────────────────────────────────────────────

    /// Transfer the administrator role. Only the current admin can call this.
    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), ContractError> {
        caller.require_auth();
        registry::set_admin(&env, &caller, &new_admin)
    }

    /// Register the caller as a data owner
    pub fn register_owner(env: Env, owner: Address) -> Result<OwnerInfo, ContractError> {
        owner.require_auth();
        registry::register_owner(&env, &owner)
    }

    /// Register the caller as an (unverified) healthcare provider
    pub fn register_provider(
        env: Env,
        provider: Address,
        name: String,
        specialty: String,
        license_id: String,
    ) -> Result<ProviderInfo, ContractError> {
        provider.require_auth();
        registry::register_provider(&env, &provider, name, specialty, license_id)
    }

    /// Mark a registered provider as verified. Admin only.
    pub fn verify_provider(env: Env, caller: Address, provider: Address) -> Result<(), ContractError> {
        caller.require_auth();
        registry::verify_provider(&env, &caller, &provider)
    }

    pub fn is_owner_registered(env: Env, owner: Address) -> bool {
        registry::is_owner_registered(&env, &owner)
    }

    pub fn is_provider_verified(env: Env, provider: Address) -> bool {
        registry::is_provider_verified(&env, &provider)
    }

    pub fn get_provider_info(env: Env, provider: Address) -> Result<ProviderInfo, ContractError> {
        registry::get_provider(&env, &provider).ok_or(ContractError::UnknownProvider)
    }

    pub fn get_owner_info(env: Env, owner: Address) -> Result<OwnerInfo, ContractError> {
        registry::get_owner(&env, &owner).ok_or(ContractError::UserNotRegistered)
    }

    // ── Permission Store ─────────────────────────────────────────────────────

    /// Point one of the caller's data categories at an external store
    pub fn set_data_reference(
        env: Env,
        owner: Address,
        category: u32,
        data_contract: Address,
        reference_id: Option<String>,
    ) -> Result<DataReference, ContractError> {
        owner.require_auth();
        permissions::set_data_reference(&env, &owner, category, data_contract, reference_id)
    }

    /// Read an owner's data reference. Requires ownership or live read permission.
    pub fn get_data_reference(
        env: Env,
        caller: Address,
        owner: Address,
        category: u32,
    ) -> Result<DataReference, ContractError> {
        caller.require_auth();
        permissions::get_data_reference(&env, &caller, &owner, category)
    }

    /// Grant (or overwrite) a category permission for an accessor
    pub fn grant_permission(
        env: Env,
        owner: Address,
        category: u32,
        accessor: Address,
        level: u32,
        expiration: Option<u32>,
    ) -> Result<PermissionRecord, ContractError> {
        owner.require_auth();
        permissions::grant_permission(&env, &owner, category, &accessor, level, expiration)
    }

    /// Update an existing category permission
    pub fn update_permission(
        env: Env,
        owner: Address,
        category: u32,
        accessor: Address,
        level: u32,
        expiration: Option<u32>,
    ) -> Result<PermissionRecord, ContractError> {
        owner.require_auth();
        permissions::update_permission(&env, &owner, category, &accessor, level, expiration)
    }

    pub fn revoke_permission(
        env: Env,
        owner: Address,
        category: u32,
        accessor: Address,
    ) -> Result<(), ContractError> {
        owner.require_auth();
        permissions::revoke_permission(&env, &owner, category, &accessor)
    }

    /// Whether `accessor` currently holds `required` (or `Full`) on the category.
    /// Unknown codes are reported as not permitted.
    pub fn has_permission(
        env: Env,
        owner: Address,
        category: u32,
        accessor: Address,
        required: u32,
    ) -> bool {
        query::has_permission_codes(&env, &owner, category, &accessor, required)
    }

    pub fn get_permission(
        env: Env,
        caller: Address,
        owner: Address,
        category: u32,
        accessor: Address,
    ) -> Result<PermissionRecord, ContractError> {
        caller.require_auth();
        permissions::get_permission(&env, &caller, &owner, category, &accessor)
    }

    pub fn get_permissions_for_category(
        env: Env,
        caller: Address,
        owner: Address,
        category: u32,
    ) -> Result<Vec<PermissionEntry>, ContractError> {
        caller.require_auth();
        permissions::get_permissions_for_category(&env, &caller, &owner, category)
    }

    // ── Access-Grant Workflow ────────────────────────────────────────────────

    /// Provider asks a patient for time-bound access; returns the request id.
    /// `access_level` is an [`AccessLevel`] code.
    pub fn request_access(
        env: Env,
        provider: Address,
        patient: Address,
        duration: u32,
        access_level: u32,
        data_types: Vec<String>,
        message: String,
    ) -> Result<u64, ContractError> {
        provider.require_auth();
        grants::request_access(
            &env,
            &provider,
            &patient,
            duration,
            access_level,
            data_types,
            message,
        )
    }

    /// Patient grants a provider access directly
    pub fn grant_access(
        env: Env,
        patient: Address,
        provider: Address,
        duration: u32,
        access_level: u32,
        data_types: Vec<String>,
    ) -> Result<AccessGrant, ContractError> {
        patient.require_auth();
        grants::grant_access(&env, &patient, &provider, duration, access_level, data_types)
    }

    /// Patient approves a pending provider request
    pub fn approve_request(
        env: Env,
        patient: Address,
        provider: Address,
        request_id: u64,
    ) -> Result<AccessGrant, ContractError> {
        patient.require_auth();
        grants::approve_request(&env, &patient, &provider, request_id)
    }

    pub fn revoke_access(env: Env, patient: Address, provider: Address) -> Result<(), ContractError> {
        patient.require_auth();
        grants::revoke_access(&env, &patient, &provider)
    }

    pub fn extend_access(
        env: Env,
        patient: Address,
        provider: Address,
        additional: u32,
    ) -> Result<AccessGrant, ContractError> {
        patient.require_auth();
        grants::extend_access(&env, &patient, &provider, additional)
    }

    /// Provider checks that its grant from `patient` is live and covers `data_type`
    pub fn check_data_access(
        env: Env,
        provider: Address,
        patient: Address,
        data_type: String,
    ) -> Result<(), ContractError> {
        provider.require_auth();
        query::check_data_access(&env, &provider, &patient, &data_type)
    }

    // ── Authorization Queries ────────────────────────────────────────────────

    pub fn get_access_status(
        env: Env,
        caller: Address,
        patient: Address,
        provider: Address,
    ) -> Result<AccessStatus, ContractError> {
        caller.require_auth();
        query::require_party(&caller, &patient, &provider)?;
        Ok(query::access_status(&env, &patient, &provider))
    }

    /// All requests awaiting the patient's decision
    pub fn get_pending_requests(env: Env, patient: Address) -> Vec<AccessRequest> {
        patient.require_auth();
        grants::pending_requests(&env, &patient)
    }

    pub fn get_request(
        env: Env,
        caller: Address,
        patient: Address,
        provider: Address,
        request_id: u64,
    ) -> Result<AccessRequest, ContractError> {
        caller.require_auth();
        query::require_party(&caller, &patient, &provider)?;
        grants::load_request(&env, &patient, &provider, request_id)
            .ok_or(ContractError::InvalidRequest)
    }

    /// Number of request ids issued so far
    pub fn get_request_count(env: Env) -> u64 {
        grants::request_count(&env)
    }
}
