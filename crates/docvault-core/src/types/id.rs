//! Newtype wrapper around the numeric document identifier.
//!
//! Identifiers are assigned by the metadata store and double as the
//! addressing prefix of the physical file (`"<id>#<display name>"`). When the
//! `sqlx` feature is enabled the type maps transparently onto a PostgreSQL
//! `BIGINT`.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator between the identifier and the display name in a physical
/// file name.
pub const PHYSICAL_NAME_SEPARATOR: char = '#';

/// Unique identifier of a document record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
#[serde(transparent)]
pub struct DocumentId(pub i64);

impl DocumentId {
    /// Return the inner numeric value.
    pub fn value(self) -> i64 {
        self.0
    }

    /// The prefix every physical file of this document starts with.
    pub fn physical_prefix(self) -> String {
        format!("{}{PHYSICAL_NAME_SEPARATOR}", self.0)
    }

    /// The physical file name for a display name: `"<id>#<display name>"`.
    pub fn physical_name(self, display_name: &str) -> String {
        format!("{}{display_name}", self.physical_prefix())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<DocumentId> for i64 {
    fn from(id: DocumentId) -> i64 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_name() {
        let id = DocumentId(42);
        assert_eq!(id.physical_prefix(), "42#");
        assert_eq!(id.physical_name("report.pdf"), "42#report.pdf");
    }

    #[test]
    fn test_prefix_does_not_collide_with_longer_ids() {
        let name = DocumentId(12).physical_name("a.txt");
        assert!(!name.starts_with(&DocumentId(1).physical_prefix()));
    }

    #[test]
    fn test_parse() {
        assert_eq!(" 7 ".parse::<DocumentId>().unwrap(), DocumentId(7));
        assert!("abc".parse::<DocumentId>().is_err());
    }
}
