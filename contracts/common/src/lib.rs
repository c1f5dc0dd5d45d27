//! Ledger helpers shared by the health access contracts.
//!
//! This crate provides:
//! - [`ttl`]: storage time-to-live constants and extension helpers.
//! - [`expiry`]: ledger-height liveness predicates used for permission and
//!   grant expiry.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod expiry;
pub mod ttl;

pub use expiry::*;
