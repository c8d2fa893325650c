//! Part identity - the deduplication key for occurrences

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::entities::{Occurrence, PartDocument};

/// Identifies "the same kind of part" across placements
///
/// Derived from the underlying document's display name, so every occurrence
/// of one document maps to the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartIdentity(String);

impl PartIdentity {
    /// Identity of a part document
    pub fn of(part: &PartDocument) -> Self {
        Self(part.display_name.clone())
    }

    /// Identity of the document an occurrence places
    pub fn of_occurrence(occurrence: &Occurrence) -> Self {
        Self::of(occurrence.part())
    }

    /// The display name this identity was derived from
    pub fn display_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PartIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PartIdentity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
