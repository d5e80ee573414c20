//! Pet addresses and address matching.
//!
//! # Responsibility
//! - Parse raw address text into collection/item/no-match variants.
//! - Render canonical `content://<authority>/pets[/<id>]` addresses.
//!
//! # Invariants
//! - Item ids are non-negative decimal integers that fit in `i64`.
//! - The same raw text always resolves to the same match on every operation.

use crate::model::contract::{
    CONTENT_AUTHORITY, CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE, CONTENT_SCHEME, PATH_PETS,
};
use crate::model::pet::PetId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static PET_ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"^(?:{}{}/)?{}(?:/(\d+))?/?$",
        regex::escape(CONTENT_SCHEME),
        regex::escape(CONTENT_AUTHORITY),
        regex::escape(PATH_PETS),
    );
    Regex::new(&pattern).expect("valid pet address regex")
});

/// Result of matching raw address text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMatch {
    /// All pets.
    Collection,
    /// One pet by id.
    Item(PetId),
    /// Text that matches neither known shape.
    NoMatch,
}

impl AddressMatch {
    /// Narrows the match to a usable address.
    pub fn address(self) -> Option<PetAddress> {
        match self {
            Self::Collection => Some(PetAddress::Collection),
            Self::Item(id) => Some(PetAddress::Item(id)),
            Self::NoMatch => None,
        }
    }
}

/// Matches raw address text against the two known pet address shapes.
///
/// Accepts canonical `content://<authority>/pets[/<id>]` text as well as the
/// bare `pets[/<id>]` path, each with an optional trailing slash.
pub fn match_address(raw: &str) -> AddressMatch {
    let Some(captures) = PET_ADDRESS_RE.captures(raw.trim()) else {
        return AddressMatch::NoMatch;
    };

    match captures.get(1) {
        None => AddressMatch::Collection,
        Some(id) => match id.as_str().parse::<PetId>() {
            Ok(id) => AddressMatch::Item(id),
            Err(_) => AddressMatch::NoMatch,
        },
    }
}

/// A recognized pet address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetAddress {
    Collection,
    Item(PetId),
}

impl PetAddress {
    /// Addresses the pet with `id`.
    pub fn item(id: PetId) -> Self {
        Self::Item(id)
    }

    /// Content type tag for this address shape.
    pub fn content_type(self) -> ContentType {
        match self {
            Self::Collection => ContentType::Collection,
            Self::Item(_) => ContentType::Item,
        }
    }

    /// Short `pets[/<id>]` form without scheme and authority.
    pub fn path(self) -> String {
        match self {
            Self::Collection => PATH_PETS.to_string(),
            Self::Item(id) => format!("{PATH_PETS}/{id}"),
        }
    }
}

impl Display for PetAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{CONTENT_SCHEME}{CONTENT_AUTHORITY}/{}", self.path())
    }
}

/// Type tag reported by `resolve_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Collection,
    Item,
}

impl ContentType {
    /// MIME-like content type string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collection => CONTENT_LIST_TYPE,
            Self::Item => CONTENT_ITEM_TYPE,
        }
    }
}
