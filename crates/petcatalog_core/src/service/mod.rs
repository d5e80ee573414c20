//! Catalog use-case services.
//!
//! # Responsibility
//! - Turn list/editor screen actions into gateway calls.
//! - Keep front ends free of address and field-map details.

pub mod catalog_service;
pub mod pet_form;
