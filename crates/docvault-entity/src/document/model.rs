//! Document entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use docvault_core::types::DocumentId;

/// Metadata record of a stored document.
///
/// The physical file lives in `file_path` under the name
/// `"<id>#<file_name>"` (see [`Document::physical_name`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Identifier assigned by the metadata store.
    pub id: DocumentId,
    /// Display name including extension.
    pub file_name: String,
    /// Lower-cased extension captured at upload.
    pub extension: String,
    /// Byte length at upload.
    pub file_size: i64,
    /// Storage directory holding the physical file.
    pub file_path: String,
}

impl Document {
    /// Name of the physical file backing this record.
    pub fn physical_name(&self) -> String {
        self.id.physical_name(&self.file_name)
    }

    /// Display name produced by renaming to `base_name`; the extension never changes.
    pub fn renamed_file_name(&self, base_name: &str) -> String {
        format!("{base_name}.{}", self.extension)
    }
}

/// Data required to create a new document record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    /// Display name including extension.
    pub file_name: String,
    /// Lower-cased extension.
    pub extension: String,
    /// Byte length of the uploaded content.
    pub file_size: i64,
    /// Storage directory.
    pub file_path: String,
}

impl NewDocument {
    /// Attach the identifier assigned by the store.
    pub fn into_document(self, id: DocumentId) -> Document {
        Document {
            id,
            file_name: self.file_name,
            extension: self.extension,
            file_size: self.file_size,
            file_path: self.file_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        NewDocument {
            file_name: "report.pdf".to_string(),
            extension: "pdf".to_string(),
            file_size: 10,
            file_path: "/data".to_string(),
        }
        .into_document(DocumentId(3))
    }

    #[test]
    fn test_physical_name() {
        assert_eq!(sample().physical_name(), "3#report.pdf");
    }

    #[test]
    fn test_renamed_file_name_keeps_extension() {
        assert_eq!(sample().renamed_file_name("summary"), "summary.pdf");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["fileName"], "report.pdf");
        assert_eq!(json["fileSize"], 10);
        assert_eq!(json["filePath"], "/data");
        assert_eq!(json["id"], 3);
    }
}
