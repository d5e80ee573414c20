//! Pet catalog domain model.
//!
//! # Responsibility
//! - Define the pet record, its gender code and column contract.
//! - Define addresses and field maps accepted by the gateway.
//! - Own per-field validation applied before any store mutation.
//!
//! # Invariants
//! - Stored rows always carry a non-empty name, a known gender code and a
//!   non-negative weight.
//! - Pet ids are assigned by the store and never written by callers.

pub mod address;
pub mod contract;
pub mod pet;
pub mod values;
