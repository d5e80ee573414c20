//! Catalog and editor use-case service.
//!
//! # Responsibility
//! - Provide list/load/save/delete entry points for catalog front ends.
//! - Translate form snapshots into gateway field maps.
//! - Map soft write failures into explicit outcome values.
//!
//! # Invariants
//! - Service APIs never bypass gateway validation.
//! - Blank new-pet forms never reach the store.

use crate::model::address::{ContentType, PetAddress};
use crate::model::contract::PetColumn;
use crate::model::pet::{Gender, Pet};
use crate::model::values::PetValues;
use crate::repo::pet_gateway::{GatewayError, PetGateway, PetQuery, SortDirection};
use crate::service::pet_form::{FormError, PetForm};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogError {
    /// Editor input could not be converted into a field map.
    Form(FormError),
    /// Gateway rejected the request.
    Gateway(GatewayError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(err) => write!(f, "{err}"),
            Self::Gateway(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Gateway(err) => Some(err),
        }
    }
}

impl From<FormError> for CatalogError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<GatewayError> for CatalogError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result of saving an editor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New-pet form was blank; nothing was written.
    Skipped,
    Inserted(PetAddress),
    InsertFailed,
    Updated(usize),
    /// Zero rows changed: the pet is gone or the store refused the write.
    UpdateFailed,
}

/// Result of deleting one pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(usize),
    DeleteFailed,
}

/// Use-case facade over any gateway implementation.
pub struct CatalogService<G: PetGateway> {
    gateway: G,
}

impl<G: PetGateway> CatalogService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Lists every pet ordered by id.
    pub fn list_pets(&self) -> CatalogResult<Vec<Pet>> {
        let query = PetQuery::all().order_by(PetColumn::Id, SortDirection::Ascending);
        let cursor = self
            .gateway
            .query(&PetAddress::Collection.to_string(), &query)?;
        let pets = cursor
            .map(|record| {
                record
                    .into_pet()
                    .ok_or_else(|| GatewayError::InvalidData("incomplete pet row".to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pets)
    }

    /// Loads one pet for editing. Returns `None` when it no longer exists.
    pub fn load_pet(&self, address: PetAddress) -> CatalogResult<Option<Pet>> {
        require_item(address, "load")?;
        let mut cursor = self.gateway.query(&address.to_string(), &PetQuery::all())?;
        match cursor.next() {
            Some(record) => Ok(Some(record.into_pet().ok_or_else(|| {
                GatewayError::InvalidData("incomplete pet row".to_string())
            })?)),
            None => Ok(None),
        }
    }

    /// Saves an editor form.
    ///
    /// `target = None` inserts a new pet; `Some(item address)` updates it.
    pub fn save_pet(&self, target: Option<PetAddress>, form: &PetForm) -> CatalogResult<SaveOutcome> {
        match target {
            None => {
                if form.is_blank() {
                    info!("event=pet_save module=service status=ok result=skipped");
                    return Ok(SaveOutcome::Skipped);
                }
                let values = form.to_values()?;
                match self
                    .gateway
                    .insert(&PetAddress::Collection.to_string(), &values)?
                {
                    Some(address) => Ok(SaveOutcome::Inserted(address)),
                    None => Ok(SaveOutcome::InsertFailed),
                }
            }
            Some(address) => {
                require_item(address, "save")?;
                let values = form.to_values()?;
                match self.gateway.update(&address.to_string(), &values, None)? {
                    0 => Ok(SaveOutcome::UpdateFailed),
                    changed => Ok(SaveOutcome::Updated(changed)),
                }
            }
        }
    }

    /// Deletes one pet.
    pub fn delete_pet(&self, address: PetAddress) -> CatalogResult<DeleteOutcome> {
        require_item(address, "delete")?;
        match self.gateway.delete(&address.to_string(), None)? {
            0 => Ok(DeleteOutcome::DeleteFailed),
            removed => Ok(DeleteOutcome::Deleted(removed)),
        }
    }

    /// Deletes every pet and returns how many rows were removed.
    pub fn delete_all_pets(&self) -> CatalogResult<usize> {
        let removed = self
            .gateway
            .delete(&PetAddress::Collection.to_string(), None)?;
        info!("event=pet_delete_all module=service status=ok rows={removed}");
        Ok(removed)
    }

    /// Inserts the sample pet offered by the catalog menu.
    pub fn insert_dummy_pet(&self) -> CatalogResult<Option<PetAddress>> {
        let values = PetValues::new()
            .name("Toto")
            .breed("Terrier")
            .gender(Gender::Male)
            .weight(7);
        Ok(self
            .gateway
            .insert(&PetAddress::Collection.to_string(), &values)?)
    }

    /// Resolves raw address text to its content type.
    pub fn content_type(&self, raw: &str) -> CatalogResult<ContentType> {
        Ok(self.gateway.resolve_type(raw)?)
    }
}

fn require_item(address: PetAddress, operation: &'static str) -> Result<(), GatewayError> {
    match address {
        PetAddress::Item(_) => Ok(()),
        PetAddress::Collection => Err(GatewayError::UnsupportedAddress { operation, address }),
    }
}
