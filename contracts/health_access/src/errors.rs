/// Stable error codes returned by every fallible entrypoint.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    NotAdmin = 4,
    UserNotRegistered = 5,
    UserAlreadyRegistered = 6,
    UnknownProvider = 7,
    AlreadyRegistered = 8,
    InvalidDataCategory = 9,
    InvalidPermissionType = 10,
    NoPermissionFound = 11,
    AlreadyGranted = 12,
    InvalidRequest = 13,
    NoAccessGranted = 14,
    AccessExpired = 15,
    SelfAuthorization = 16,
    AlreadyAuthorized = 17,
}
