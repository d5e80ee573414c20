//! Field maps and write validation.
//!
//! # Responsibility
//! - Carry column/value pairs for insert and update requests.
//! - Validate present keys and normalize them into typed bind values.
//!
//! # Invariants
//! - Validation is all-or-nothing: the first failing field aborts the write.
//! - Checks run in column order `name`, `gender`, `weight`.
//! - `_id` is never accepted as a writable key.

use crate::model::contract::PetColumn;
use crate::model::pet::Gender;
use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Loosely typed value supplied for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
}

impl FieldValue {
    /// Integer view: integers pass through, text is parsed as a decimal.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Null => None,
            Self::Integer(value) => Some(*value),
            Self::Text(value) => value.parse().ok(),
        }
    }

    /// Text view: integers are rendered in decimal.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Integer(value) => Some(value.to_string()),
            Self::Text(value) => Some(value.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub(crate) fn to_sql_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Integer(value) => Value::Integer(*value),
            Self::Text(value) => Value::Text(value.clone()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Gender> for FieldValue {
    fn from(value: Gender) -> Self {
        Self::Integer(value.code())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered column/value map for insert and update requests.
///
/// Putting a column twice replaces the earlier value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetValues {
    entries: Vec<(PetColumn, FieldValue)>,
}

impl PetValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to `value`.
    pub fn put(&mut self, column: PetColumn, value: impl Into<FieldValue>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
        self
    }

    /// Builder-style `put`.
    pub fn with(mut self, column: PetColumn, value: impl Into<FieldValue>) -> Self {
        self.put(column, value);
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.with(PetColumn::Name, name.into())
    }

    pub fn breed(self, breed: impl Into<String>) -> Self {
        self.with(PetColumn::Breed, breed.into())
    }

    pub fn gender(self, gender: Gender) -> Self {
        self.with(PetColumn::Gender, gender)
    }

    pub fn weight(self, weight: i64) -> Self {
        self.with(PetColumn::Weight, weight)
    }

    pub fn get(&self, column: PetColumn) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: PetColumn) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PetColumn, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Validates an insert request: `name` is mandatory on top of the
    /// per-field checks.
    pub fn validate_for_insert(&self) -> Result<ValidatedValues, PetValidationError> {
        if !self.contains(PetColumn::Name) {
            return Err(PetValidationError::NameRequired);
        }
        self.validate_present()
    }

    /// Validates only the keys present in the map (partial update rules).
    pub fn validate_present(&self) -> Result<ValidatedValues, PetValidationError> {
        if self.contains(PetColumn::Id) {
            return Err(PetValidationError::ImmutableId);
        }

        if let Some(value) = self.get(PetColumn::Name) {
            let name = value.as_text().unwrap_or_default();
            if name.trim().is_empty() {
                return Err(PetValidationError::NameRequired);
            }
        }

        if let Some(value) = self.get(PetColumn::Gender) {
            let valid = value.as_integer().and_then(Gender::from_code).is_some();
            if !valid {
                return Err(PetValidationError::InvalidGender);
            }
        }

        if let Some(value) = self.get(PetColumn::Weight) {
            if !value.is_null() && !value.as_integer().is_some_and(|weight| weight >= 0) {
                return Err(PetValidationError::InvalidWeight);
            }
        }

        let bindings = self
            .entries
            .iter()
            .map(|(column, value)| (*column, normalize(*column, value)))
            .collect();
        Ok(ValidatedValues { bindings })
    }
}

fn normalize(column: PetColumn, value: &FieldValue) -> Value {
    match column {
        PetColumn::Gender | PetColumn::Weight => value
            .as_integer()
            .map_or(Value::Null, Value::Integer),
        PetColumn::Name | PetColumn::Breed => {
            value.as_text().map_or(Value::Null, Value::Text)
        }
        PetColumn::Id => value.to_sql_value(),
    }
}

/// Field map that passed validation, with values coerced to column types.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedValues {
    bindings: Vec<(PetColumn, Value)>,
}

impl ValidatedValues {
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub(crate) fn columns(&self) -> impl Iterator<Item = PetColumn> + '_ {
        self.bindings.iter().map(|(column, _)| *column)
    }

    pub(crate) fn into_values(self) -> impl Iterator<Item = Value> {
        self.bindings.into_iter().map(|(_, value)| value)
    }
}

/// A field map contains a value the pet table must never hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetValidationError {
    NameRequired,
    InvalidGender,
    InvalidWeight,
    ImmutableId,
}

impl Display for PetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "name required"),
            Self::InvalidGender => write!(f, "invalid gender"),
            Self::InvalidWeight => write!(f, "invalid weight"),
            Self::ImmutableId => write!(f, "id is assigned by the store"),
        }
    }
}

impl Error for PetValidationError {}
