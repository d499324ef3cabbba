//! File name and extension validation.

use regex::Regex;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;

/// Checks file names against the accepted-extension pattern.
#[derive(Debug, Clone)]
pub struct ExtensionValidator {
    pattern: Regex,
}

impl ExtensionValidator {
    /// Compile an accepted-extension pattern such as `pdf|docx|xlsx|txt`.
    ///
    /// The pattern must match the whole extension, so `pdf` does not accept
    /// `pdfx`.
    pub fn new(pattern: &str) -> AppResult<Self> {
        let anchored = format!("^(?:{pattern})$");
        let pattern = Regex::new(&anchored).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid accepted-extension pattern {pattern:?}"),
                e,
            )
        })?;
        Ok(Self { pattern })
    }

    /// Validate a file name and return its lower-cased extension.
    pub fn validate(&self, file_name: &str) -> AppResult<String> {
        let (_, extension) = file_name
            .rsplit_once('.')
            .ok_or_else(|| AppError::invalid_name("Invalid File Name"))?;

        let extension = extension.to_lowercase();
        if !self.pattern.is_match(&extension) {
            return Err(AppError::invalid_name(format!(
                "Extension {extension:?} is not accepted"
            )));
        }

        Ok(extension)
    }

    /// Validate a display name that must become a single file name in the
    /// storage directory.
    pub fn validate_display_name(file_name: &str) -> AppResult<()> {
        if file_name.trim().is_empty() {
            return Err(AppError::invalid_name("File name cannot be empty"));
        }
        if file_name.contains('/') || file_name.contains('\\') {
            return Err(AppError::invalid_name(format!(
                "File name {file_name:?} must not contain path separators"
            )));
        }
        Ok(())
    }
}
