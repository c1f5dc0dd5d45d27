use soroban_sdk::{contracttype, Address, String, Vec};

use crate::errors::ContractError;

/// Health data categories an owner can share.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DataCategory {
    Vitals = 1,
    LabResults = 2,
    Medications = 3,
    MedicalHistory = 4,
}

impl DataCategory {
    /// Parses a wire code into a category.
    pub fn from_code(code: u32) -> Result<Self, ContractError> {
        match code {
            1 => Ok(DataCategory::Vitals),
            2 => Ok(DataCategory::LabResults),
            3 => Ok(DataCategory::Medications),
            4 => Ok(DataCategory::MedicalHistory),
            _ => Err(ContractError::InvalidDataCategory),
        }
    }

    pub fn code(&self) -> u32 {
        *self as u32
    }
}

/// Permission levels held by an accessor on a data category.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PermissionLevel {
    /// Read-only access to the category
    Read = 1,
    /// Write access to the category
    Write = 2,
    /// Full access; satisfies any required level
    Full = 3,
}

impl PermissionLevel {
    /// Parses a wire code into a permission level.
    pub fn from_code(code: u32) -> Result<Self, ContractError> {
        match code {
            1 => Ok(PermissionLevel::Read),
            2 => Ok(PermissionLevel::Write),
            3 => Ok(PermissionLevel::Full),
            _ => Err(ContractError::InvalidPermissionType),
        }
    }

    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// `Full` covers everything; `Read` and `Write` only match themselves.
    pub fn satisfies(&self, required: PermissionLevel) -> bool {
        match self {
            PermissionLevel::Full => true,
            PermissionLevel::Read => required == PermissionLevel::Read,
            PermissionLevel::Write => required == PermissionLevel::Write,
        }
    }
}

/// Access levels carried by provider grants
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AccessLevel {
    /// Routine care access
    Basic = 1,
    /// Unrestricted access to the granted data types
    Full = 2,
    /// Emergency access
    Emergency = 3,
}

impl AccessLevel {
    /// Parses a wire code into a grant access level.
    pub fn from_code(code: u32) -> Result<Self, ContractError> {
        match code {
            1 => Ok(AccessLevel::Basic),
            2 => Ok(AccessLevel::Full),
            3 => Ok(AccessLevel::Emergency),
            _ => Err(ContractError::InvalidRequest),
        }
    }

    pub fn code(&self) -> u32 {
        *self as u32
    }
}

/// Registered data owner
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerInfo {
    pub owner: Address,
    pub registered_at: u32,
}

/// Healthcare provider profile
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderInfo {
    pub provider: Address,
    pub name: String,
    pub specialty: String,
    pub license_id: String,
    pub verified: bool,
    pub registered_at: u32,
}

/// Category-scoped permission held by an accessor
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermissionRecord {
    pub level: PermissionLevel,
    pub granted_at: u32,
    /// `None` means the permission never expires
    pub expiration: Option<u32>,
}

/// Permission record paired with its accessor, for category listings
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermissionEntry {
    pub accessor: Address,
    pub record: PermissionRecord,
}

/// Opaque pointer to where the owner's data for a category lives
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataReference {
    pub data_contract: Address,
    pub reference_id: Option<String>,
}

/// Time-bound grant from a patient to a provider
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrant {
    pub patient: Address,
    pub provider: Address,
    pub granted_at: u32,
    pub expires_at: u32,
    pub access_level: AccessLevel,
    pub data_types: Vec<String>,
}

/// Provider request awaiting patient approval
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequest {
    pub request_id: u64,
    pub patient: Address,
    pub provider: Address,
    pub requested_at: u32,
    pub requested_duration: u32,
    pub access_level: AccessLevel,
    pub data_types: Vec<String>,
    pub message: String,
}

/// Index entry locating a pending request under its patient
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestRef {
    pub provider: Address,
    pub request_id: u64,
}

/// Result of an access status query
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessStatus {
    pub has_access: bool,
    pub details: Option<AccessGrant>,
    pub expired: bool,
}
