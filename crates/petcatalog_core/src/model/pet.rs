//! Pet domain model.
//!
//! # Responsibility
//! - Define the canonical pet read model and its gender enumeration.
//! - Provide the projection-shaped record returned by gateway queries.
//!
//! # Invariants
//! - `Gender` codes are exactly `0`, `1`, `2`; no other code maps to a value.
//! - `id` is assigned by the store and never changes afterwards.

use crate::model::contract::PetColumn;
use serde::{Deserialize, Serialize};

/// Store-assigned row identifier.
pub type PetId = i64;

/// Closed gender enumeration persisted as a small integer code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Unknown,
    Male,
    Female,
}

impl Gender {
    pub const UNKNOWN_CODE: i64 = 0;
    pub const MALE_CODE: i64 = 1;
    pub const FEMALE_CODE: i64 = 2;

    /// Integer code stored in `pets.gender`.
    pub fn code(self) -> i64 {
        match self {
            Self::Unknown => Self::UNKNOWN_CODE,
            Self::Male => Self::MALE_CODE,
            Self::Female => Self::FEMALE_CODE,
        }
    }

    /// Maps a stored code back to a gender. Unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            Self::UNKNOWN_CODE => Some(Self::Unknown),
            Self::MALE_CODE => Some(Self::Male),
            Self::FEMALE_CODE => Some(Self::Female),
            _ => None,
        }
    }

    /// Short lowercase label, also accepted by [`Gender::parse_label`].
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Parses a case-insensitive label.
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unknown" => Some(Self::Unknown),
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

/// One complete row of the `pets` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    /// `None` when the breed was never set.
    pub breed: Option<String>,
    pub gender: Gender,
    /// Non-negative measurement, `0` when unspecified.
    pub weight: i64,
}

/// Projection-shaped row returned by gateway queries.
///
/// Only the columns requested by the caller are populated; everything else
/// stays `None`. A nullable column that was requested but is null in storage
/// is also `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetRecord {
    pub id: Option<PetId>,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub weight: Option<i64>,
}

impl PetRecord {
    /// Returns the value of `column` rendered as text, if populated.
    pub fn display_value(&self, column: PetColumn) -> Option<String> {
        match column {
            PetColumn::Id => self.id.map(|id| id.to_string()),
            PetColumn::Name => self.name.clone(),
            PetColumn::Breed => self.breed.clone(),
            PetColumn::Gender => self.gender.map(|gender| gender.label().to_string()),
            PetColumn::Weight => self.weight.map(|weight| weight.to_string()),
        }
    }

    /// Converts into a full [`Pet`] when every non-nullable column is present.
    pub fn into_pet(self) -> Option<Pet> {
        Some(Pet {
            id: self.id?,
            name: self.name?,
            breed: self.breed,
            gender: self.gender?,
            weight: self.weight?,
        })
    }
}

impl From<Pet> for PetRecord {
    fn from(value: Pet) -> Self {
        Self {
            id: Some(value.id),
            name: Some(value.name),
            breed: value.breed,
            gender: Some(value.gender),
            weight: Some(value.weight),
        }
    }
}
