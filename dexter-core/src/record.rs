//! Catalog record model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Positive catalog identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(NonZeroU32);

impl RecordId {
    pub const FIRST: RecordId = RecordId(NonZeroU32::MIN);

    /// Returns `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Previous identifier, floored at 1.
    pub fn pred(self) -> Self {
        Self::new(self.get().saturating_sub(1)).unwrap_or(Self::FIRST)
    }

    /// Next identifier. Saturates at `u32::MAX`, far beyond any catalog.
    pub fn succ(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Catalog number padded to three digits, e.g. `#007`.
    pub fn padded(self) -> String {
        format!("#{:03}", self.get())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog entry. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub image_url: String,
}

impl Record {
    pub fn new(id: RecordId, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: image_url.into(),
        }
    }

    /// Name with each hyphen-separated word capitalized (`mr-mime` → `Mr-Mime`).
    pub fn display_name(&self) -> String {
        self.name
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join("-")
    }
}
