//! Repository layer: the address-keyed pet gateway.
//!
//! # Responsibility
//! - Define the gateway contract consumed by services and front ends.
//! - Isolate SQLite statement building from use-case orchestration.
//!
//! # Invariants
//! - Writes validate field maps before any statement is prepared.
//! - Address matching is identical across every gateway operation.

pub mod pet_gateway;
