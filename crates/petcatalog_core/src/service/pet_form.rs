//! Editor form state.
//!
//! A `PetForm` is an immutable snapshot of what the editor shows. Save and
//! discard decisions compare snapshots instead of tracking mutable flags.

use crate::model::pet::{Gender, Pet};
use crate::model::values::PetValues;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw editor input. `weight` stays text until the form is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetForm {
    pub name: String,
    pub breed: String,
    pub gender: Gender,
    pub weight: String,
}

impl PetForm {
    /// Empty form shown when adding a pet.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Form pre-filled from a stored pet.
    pub fn from_pet(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            breed: pet.breed.clone().unwrap_or_default(),
            gender: pet.gender,
            weight: pet.weight.to_string(),
        }
    }

    /// True when nothing was entered.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.breed.trim().is_empty()
            && self.weight.trim().is_empty()
            && self.gender == Gender::Unknown
    }

    /// Builds the full field map written on save.
    ///
    /// Text fields are trimmed and an empty weight is saved as `0`.
    pub fn to_values(&self) -> Result<PetValues, FormError> {
        let weight_text = self.weight.trim();
        let weight = if weight_text.is_empty() {
            0
        } else {
            weight_text
                .parse::<i64>()
                .map_err(|_| FormError::InvalidWeight(weight_text.to_string()))?
        };

        Ok(PetValues::new()
            .name(self.name.trim())
            .breed(self.breed.trim())
            .gender(self.gender)
            .weight(weight))
    }
}

/// Whether leaving the editor would lose input.
///
/// `original` is the snapshot the editor opened with, `None` for a new pet.
pub fn has_unsaved_changes(original: Option<&PetForm>, current: &PetForm) -> bool {
    match original {
        Some(original) => original != current,
        None => !current.is_blank(),
    }
}

/// Form input that cannot be turned into a field map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    InvalidWeight(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWeight(text) => write!(f, "weight `{text}` is not a whole number"),
        }
    }
}

impl Error for FormError {}
