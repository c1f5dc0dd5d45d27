use soroban_sdk::{Address, String, Vec};

use crate::{errors::ContractError, types::RequestRef};

pub const MAX_DATA_TYPES: u32 = 10;
pub const MAX_DATA_TYPE_LEN: u32 = 32;
pub const MAX_NAME_LEN: u32 = 100;
pub const MAX_SPECIALTY_LEN: u32 = 100;
pub const MAX_LICENSE_LEN: u32 = 50;
pub const MAX_MESSAGE_LEN: u32 = 256;
pub const MAX_REFERENCE_ID_LEN: u32 = 64;
pub const MAX_PENDING_REQUESTS: u32 = 50;
pub const MAX_PENDING_PER_PROVIDER: u32 = 5;

fn validate_text(value: &String, max_len: u32) -> Result<(), ContractError> {
    if value.is_empty() || value.len() > max_len {
        return Err(ContractError::InvalidRequest);
    }
    Ok(())
}

pub fn validate_provider_profile(
    name: &String,
    specialty: &String,
    license_id: &String,
) -> Result<(), ContractError> {
    validate_text(name, MAX_NAME_LEN)?;
    validate_text(specialty, MAX_SPECIALTY_LEN)?;
    validate_text(license_id, MAX_LICENSE_LEN)
}

/// Owners and accessors, patients and providers, must be distinct identities.
pub fn validate_distinct(subject: &Address, counterpart: &Address) -> Result<(), ContractError> {
    if subject == counterpart {
        return Err(ContractError::SelfAuthorization);
    }
    Ok(())
}

pub fn validate_duration(duration: u32) -> Result<(), ContractError> {
    if duration == 0 {
        return Err(ContractError::InvalidRequest);
    }
    Ok(())
}

/// Between one and [`MAX_DATA_TYPES`] non-empty labels.
pub fn validate_data_types(data_types: &Vec<String>) -> Result<(), ContractError> {
    if data_types.is_empty() || data_types.len() > MAX_DATA_TYPES {
        return Err(ContractError::InvalidRequest);
    }
    for label in data_types.iter() {
        validate_text(&label, MAX_DATA_TYPE_LEN)?;
    }
    Ok(())
}

/// Request messages may be empty.
pub fn validate_message(message: &String) -> Result<(), ContractError> {
    if message.len() > MAX_MESSAGE_LEN {
        return Err(ContractError::InvalidRequest);
    }
    Ok(())
}

pub fn validate_reference_id(reference_id: &Option<String>) -> Result<(), ContractError> {
    match reference_id {
        Some(id) => validate_text(id, MAX_REFERENCE_ID_LEN),
        None => Ok(()),
    }
}

/// Room for one more open request from `provider` in a patient's queue.
pub fn validate_pending_capacity(
    pending: &Vec<RequestRef>,
    provider: &Address,
) -> Result<(), ContractError> {
    if pending.len() >= MAX_PENDING_REQUESTS {
        return Err(ContractError::InvalidRequest);
    }
    let from_provider = pending
        .iter()
        .filter(|entry| entry.provider == *provider)
        .count() as u32;
    if from_provider >= MAX_PENDING_PER_PROVIDER {
        return Err(ContractError::InvalidRequest);
    }
    Ok(())
}

/// An explicit expiration must still lie ahead of the current ledger.
pub fn validate_expiration(expiration: Option<u32>, now: u32) -> Result<(), ContractError> {
    match expiration {
        Some(expires_at) if !common::is_live(expires_at, now) => Err(ContractError::InvalidRequest),
        _ => Ok(()),
    }
}
