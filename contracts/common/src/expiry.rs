//! Ledger-height expiry rules.
//!
//! Heights are ledger sequence numbers. An expiry height is exclusive: an
//! entry expiring at `h` is already expired when the ledger reaches `h`.

use soroban_sdk::Env;

/// Current ledger height.
pub fn current_height(env: &Env) -> u32 {
    env.ledger().sequence()
}

/// Returns `true` while `now` is strictly before `expires_at`.
pub fn is_live(expires_at: u32, now: u32) -> bool {
    expires_at > now
}

/// Liveness for an optional expiry; `None` never expires.
pub fn is_live_opt(expiration: Option<u32>, now: u32) -> bool {
    match expiration {
        Some(expires_at) => is_live(expires_at, now),
        None => true,
    }
}

/// Expiry height for a duration starting at `now`, or `None` on overflow.
pub fn expiry_after(now: u32, duration: u32) -> Option<u32> {
    now.checked_add(duration)
}
