//! Core data access for the pet catalog.
//! This crate is the single source of truth for pet invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::address::{match_address, AddressMatch, ContentType, PetAddress};
pub use model::contract::PetColumn;
pub use model::pet::{Gender, Pet, PetId, PetRecord};
pub use model::values::{FieldValue, PetValidationError, PetValues};
pub use repo::pet_gateway::{
    GatewayError, GatewayResult, PetCursor, PetGateway, PetQuery, Selection, SortDirection,
    SqlitePetGateway,
};
pub use service::catalog_service::{
    CatalogError, CatalogResult, CatalogService, DeleteOutcome, SaveOutcome,
};
pub use service::pet_form::{has_unsaved_changes, FormError, PetForm};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
