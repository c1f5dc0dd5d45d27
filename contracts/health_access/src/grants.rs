//! Provider access grants and the request/approve protocol.
//!
//! A (patient, provider) pair holds at most one grant. New grants and
//! approved requests overwrite it wholesale. Expired grants stay stored until
//! they are overwritten or revoked.
//!
//! Request ids come from a single contract-wide sequence that only
//! [`request_access`] advances. A patient holds at most
//! [`validation::MAX_PENDING_REQUESTS`] open requests, and at most
//! [`validation::MAX_PENDING_PER_PROVIDER`] from any one provider.

use common::{current_height, expiry_after, ttl};
use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::{
    errors::ContractError,
    events, query, registry,
    types::{AccessGrant, AccessLevel, AccessRequest, RequestRef},
    validation,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const GRANT: Symbol = symbol_short!("GRANT");
const REQUEST: Symbol = symbol_short!("REQUEST");
const PAT_REQ: Symbol = symbol_short!("PAT_REQ");
const REQ_SEQ: Symbol = symbol_short!("REQ_SEQ");

fn grant_key(patient: &Address, provider: &Address) -> (Symbol, Address, Address) {
    (GRANT, patient.clone(), provider.clone())
}

fn request_key(
    patient: &Address,
    provider: &Address,
    request_id: u64,
) -> (Symbol, Address, Address, u64) {
    (REQUEST, patient.clone(), provider.clone(), request_id)
}

fn patient_requests_key(patient: &Address) -> (Symbol, Address) {
    (PAT_REQ, patient.clone())
}

// ── Request sequence ─────────────────────────────────────────────────────────

pub fn request_count(env: &Env) -> u64 {
    env.storage().instance().get(&REQ_SEQ).unwrap_or(0)
}

fn next_request_id(env: &Env) -> Result<u64, ContractError> {
    let next = request_count(env)
        .checked_add(1)
        .ok_or(ContractError::InvalidRequest)?;
    env.storage().instance().set(&REQ_SEQ, &next);
    ttl::extend_instance(env);
    Ok(next)
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub fn load_grant(env: &Env, patient: &Address, provider: &Address) -> Option<AccessGrant> {
    env.storage().persistent().get(&grant_key(patient, provider))
}

fn store_grant(env: &Env, grant: &AccessGrant) {
    ttl::set_persistent(env, &grant_key(&grant.patient, &grant.provider), grant);
}

pub fn load_request(
    env: &Env,
    patient: &Address,
    provider: &Address,
    request_id: u64,
) -> Option<AccessRequest> {
    env.storage()
        .persistent()
        .get(&request_key(patient, provider, request_id))
}

fn load_patient_requests(env: &Env, patient: &Address) -> Vec<RequestRef> {
    env.storage()
        .persistent()
        .get(&patient_requests_key(patient))
        .unwrap_or(Vec::new(env))
}

/// Checks shared by direct grants and provider requests.
/// Self-authorization is reported ahead of provider status and payload problems.
fn validate_terms(
    env: &Env,
    patient: &Address,
    provider: &Address,
    duration: u32,
    access_level_code: u32,
    data_types: &Vec<String>,
) -> Result<AccessLevel, ContractError> {
    validation::validate_distinct(patient, provider)?;
    registry::require_verified_provider(env, provider)?;
    let access_level = AccessLevel::from_code(access_level_code)?;
    validation::validate_duration(duration)?;
    validation::validate_data_types(data_types)?;
    Ok(access_level)
}

fn issue_grant(
    env: &Env,
    patient: &Address,
    provider: &Address,
    duration: u32,
    access_level: AccessLevel,
    data_types: Vec<String>,
) -> Result<AccessGrant, ContractError> {
    let now = current_height(env);
    let expires_at = expiry_after(now, duration).ok_or(ContractError::InvalidRequest)?;
    Ok(AccessGrant {
        patient: patient.clone(),
        provider: provider.clone(),
        granted_at: now,
        expires_at,
        access_level,
        data_types,
    })
}

// ── Workflow ─────────────────────────────────────────────────────────────────

/// Files a request from `provider` to `patient` and returns its id.
pub fn request_access(
    env: &Env,
    provider: &Address,
    patient: &Address,
    duration: u32,
    access_level_code: u32,
    data_types: Vec<String>,
    message: String,
) -> Result<u64, ContractError> {
    let access_level =
        validate_terms(env, patient, provider, duration, access_level_code, &data_types)?;
    validation::validate_message(&message)?;

    let mut pending = load_patient_requests(env, patient);
    validation::validate_pending_capacity(&pending, provider)?;

    let request_id = next_request_id(env)?;
    let request = AccessRequest {
        request_id,
        patient: patient.clone(),
        provider: provider.clone(),
        requested_at: current_height(env),
        requested_duration: duration,
        access_level,
        data_types,
        message,
    };
    ttl::set_persistent(env, &request_key(patient, provider, request_id), &request);

    pending.push_back(RequestRef {
        provider: provider.clone(),
        request_id,
    });
    ttl::set_persistent(env, &patient_requests_key(patient), &pending);

    events::publish_access_requested(
        env,
        request_id,
        patient.clone(),
        provider.clone(),
        access_level,
        duration,
    );

    Ok(request_id)
}

/// Patient grants access directly, replacing any existing grant for the pair.
pub fn grant_access(
    env: &Env,
    patient: &Address,
    provider: &Address,
    duration: u32,
    access_level_code: u32,
    data_types: Vec<String>,
) -> Result<AccessGrant, ContractError> {
    let access_level =
        validate_terms(env, patient, provider, duration, access_level_code, &data_types)?;

    let grant = issue_grant(env, patient, provider, duration, access_level, data_types)?;
    store_grant(env, &grant);

    events::publish_access_granted(
        env,
        patient.clone(),
        provider.clone(),
        access_level,
        grant.expires_at,
        None,
    );

    Ok(grant)
}

/// Turns a pending request into a grant measured from the approval ledger,
/// then consumes the request.
pub fn approve_request(
    env: &Env,
    patient: &Address,
    provider: &Address,
    request_id: u64,
) -> Result<AccessGrant, ContractError> {
    let request = load_request(env, patient, provider, request_id)
        .ok_or(ContractError::InvalidRequest)?;

    let grant = issue_grant(
        env,
        patient,
        provider,
        request.requested_duration,
        request.access_level,
        request.data_types,
    )?;
    store_grant(env, &grant);

    env.storage()
        .persistent()
        .remove(&request_key(patient, provider, request_id));

    let mut pending = load_patient_requests(env, patient);
    let consumed = RequestRef {
        provider: provider.clone(),
        request_id,
    };
    if let Some(pos) = pending.first_index_of(&consumed) {
        pending.remove(pos);
        ttl::set_persistent(env, &patient_requests_key(patient), &pending);
    }

    events::publish_access_granted(
        env,
        patient.clone(),
        provider.clone(),
        grant.access_level,
        grant.expires_at,
        Some(request_id),
    );

    Ok(grant)
}

/// Removes an active grant. Expired or missing grants cannot be revoked.
pub fn revoke_access(env: &Env, patient: &Address, provider: &Address) -> Result<(), ContractError> {
    let grant = load_grant(env, patient, provider).ok_or(ContractError::NoAccessGranted)?;
    if !query::grant_is_active(&grant, current_height(env)) {
        return Err(ContractError::NoAccessGranted);
    }

    env.storage().persistent().remove(&grant_key(patient, provider));

    events::publish_access_revoked(env, patient.clone(), provider.clone());

    Ok(())
}

/// Pushes the expiry of an existing grant out by `additional` ledgers.
/// Expired grants can be extended too.
pub fn extend_access(
    env: &Env,
    patient: &Address,
    provider: &Address,
    additional: u32,
) -> Result<AccessGrant, ContractError> {
    let mut grant = load_grant(env, patient, provider).ok_or(ContractError::NoAccessGranted)?;
    validation::validate_duration(additional)?;

    grant.expires_at = expiry_after(grant.expires_at, additional)
        .ok_or(ContractError::InvalidRequest)?;
    store_grant(env, &grant);

    events::publish_access_extended(
        env,
        patient.clone(),
        provider.clone(),
        additional,
        grant.expires_at,
    );

    Ok(grant)
}

/// Every request still waiting on `patient`, oldest first.
pub fn pending_requests(env: &Env, patient: &Address) -> Vec<AccessRequest> {
    let mut requests = Vec::new(env);
    for entry in load_patient_requests(env, patient).iter() {
        if let Some(request) = load_request(env, patient, &entry.provider, entry.request_id) {
            requests.push_back(request);
        }
    }
    requests
}
