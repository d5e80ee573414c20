//! Persisted layout and address constants for the pet store.
//!
//! Column names and content types are part of the on-disk and caller-facing
//! contract; changing any of them breaks existing databases or callers.

/// Authority segment of canonical pet addresses.
pub const CONTENT_AUTHORITY: &str = "com.example.petcatalog";
/// Scheme prefix of canonical pet addresses.
pub const CONTENT_SCHEME: &str = "content://";
/// Path segment naming the pet collection.
pub const PATH_PETS: &str = "pets";

/// Single table backing the catalog.
pub const TABLE_NAME: &str = "pets";

pub const COLUMN_ID: &str = "_id";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_BREED: &str = "breed";
pub const COLUMN_GENDER: &str = "gender";
pub const COLUMN_WEIGHT: &str = "weight";

/// Content type reported for the collection address.
pub const CONTENT_LIST_TYPE: &str = "vnd.android.cursor.dir/com.example.petcatalog/pets";
/// Content type reported for an item address.
pub const CONTENT_ITEM_TYPE: &str = "vnd.android.cursor.item/com.example.petcatalog/pets";

/// One column of the `pets` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PetColumn {
    Id,
    Name,
    Breed,
    Gender,
    Weight,
}

impl PetColumn {
    /// Every column in table order.
    pub const ALL: [PetColumn; 5] = [
        PetColumn::Id,
        PetColumn::Name,
        PetColumn::Breed,
        PetColumn::Gender,
        PetColumn::Weight,
    ];

    /// Column name as stored in SQLite.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => COLUMN_ID,
            Self::Name => COLUMN_NAME,
            Self::Breed => COLUMN_BREED,
            Self::Gender => COLUMN_GENDER,
            Self::Weight => COLUMN_WEIGHT,
        }
    }

    /// Parses a stored column name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            COLUMN_ID => Some(Self::Id),
            COLUMN_NAME => Some(Self::Name),
            COLUMN_BREED => Some(Self::Breed),
            COLUMN_GENDER => Some(Self::Gender),
            COLUMN_WEIGHT => Some(Self::Weight),
            _ => None,
        }
    }
}
