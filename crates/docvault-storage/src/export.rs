//! Export encoder for ZIP-based office containers.
//!
//! `docx` and `xlsx` files are not streamed back as stored. The container is
//! opened, checked for the parts its format requires, and every entry is
//! written again through a fresh ZIP writer. The result holds the same
//! entries with the same contents, in the same order, but with a freshly
//! written central directory and uniform deflate compression.

use std::fmt;
use std::io::{Cursor, Read, Write};

use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;

/// Container formats that are re-serialized on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// Office Open XML word-processing document.
    Docx,
    /// Office Open XML spreadsheet.
    Xlsx,
}

impl ContainerFormat {
    /// The format handling a stored extension, if any.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// Parts a container must hold to be opened as this format.
    fn required_parts(self) -> &'static [&'static str] {
        match self {
            Self::Docx => &["[Content_Types].xml", "word/document.xml"],
            Self::Xlsx => &["[Content_Types].xml", "xl/workbook.xml"],
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Docx => write!(f, "docx"),
            Self::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// Re-serializes container documents through a ZIP writer.
pub struct ExportEncoder;

impl ExportEncoder {
    /// Maximum entries in a container.
    const MAX_ENTRIES: usize = 10_000;
    /// Maximum total uncompressed size (1 GB).
    const MAX_EXPANDED_SIZE: u64 = 1024 * 1024 * 1024;

    /// Open `data` as `format` and write it out again.
    pub fn encode(format: ContainerFormat, data: &[u8]) -> AppResult<Bytes> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            AppError::with_source(
                ErrorKind::ExportFailed,
                format!("Stored file is not a readable {format} container"),
                e,
            )
        })?;

        if archive.len() > Self::MAX_ENTRIES {
            return Err(AppError::export_failed(format!(
                "{format} container holds {} entries, exceeding limit of {}",
                archive.len(),
                Self::MAX_ENTRIES
            )));
        }

        for part in format.required_parts() {
            if !archive.file_names().any(|name| name == *part) {
                return Err(AppError::export_failed(format!(
                    "{format} container is missing required part {part}"
                )));
            }
        }

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(data.len())));
        let mut expanded = 0u64;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| zip_failure(format, e))?;
            let name = entry.name().to_string();

            if entry.is_dir() {
                writer
                    .add_directory(name, options)
                    .map_err(|e| zip_failure(format, e))?;
                continue;
            }

            expanded = Self::add_expanded(format, expanded, entry.size())?;

            let mut content = Vec::with_capacity(Self::capacity_hint(entry.size(), data.len()));
            entry.read_to_end(&mut content).map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExportFailed,
                    format!("Failed to read {name} from {format} container"),
                    e,
                )
            })?;

            writer
                .start_file(name.clone(), options)
                .map_err(|e| zip_failure(format, e))?;
            writer.write_all(&content).map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExportFailed,
                    format!("Failed to write {name} to {format} container"),
                    e,
                )
            })?;
        }

        let cursor = writer.finish().map_err(|e| zip_failure(format, e))?;
        Ok(Bytes::from(cursor.into_inner()))
    }
}

impl ExportEncoder {
    /// Add an entry's declared size to the running total, failing once the
    /// total passes the limit or cannot be represented.
    fn add_expanded(format: ContainerFormat, total: u64, declared: u64) -> AppResult<u64> {
        total
            .checked_add(declared)
            .filter(|sum| *sum <= Self::MAX_EXPANDED_SIZE)
            .ok_or_else(|| {
                AppError::export_failed(format!(
                    "{format} container expands beyond {} bytes",
                    Self::MAX_EXPANDED_SIZE
                ))
            })
    }

    /// Buffer size to reserve for an entry. Header sizes are untrusted, so the
    /// reservation is bounded by a multiple of the container's own length.
    fn capacity_hint(declared: u64, container_len: usize) -> usize {
        let bound = (container_len as u64).saturating_mul(4);
        usize::try_from(declared.min(bound)).unwrap_or(0)
    }
}

fn zip_failure(format: ContainerFormat, e: zip::result::ZipError) -> AppError {
    AppError::with_source(
        ErrorKind::ExportFailed,
        format!("Failed to re-serialize {format} container: {e}"),
        e,
    )
}
