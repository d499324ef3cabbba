//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use docvault_entity::document::Document;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// A document record as shown in tables.
#[derive(Debug, Serialize, Tabled)]
pub struct DocumentRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub file_name: String,
    #[tabled(rename = "Ext")]
    pub extension: String,
    #[tabled(rename = "Size")]
    pub file_size: i64,
    #[tabled(rename = "Directory")]
    pub file_path: String,
}

impl From<&Document> for DocumentRow {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id.value(),
            file_name: document.file_name.clone(),
            extension: document.extension.clone(),
            file_size: document.file_size,
            file_path: document.file_path.clone(),
        }
    }
}

/// Print documents in the selected format
pub fn print_documents(documents: &[Document], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let rows: Vec<DocumentRow> = documents.iter().map(DocumentRow::from).collect();
            print_list(&rows, format);
        }
        OutputFormat::Json => print_json(&documents, "[]"),
    }
}

/// Print a single document in the selected format
pub fn print_document(document: &Document, format: OutputFormat) {
    match format {
        OutputFormat::Table => print_list(&[DocumentRow::from(document)], format),
        OutputFormat::Json => print_json(document, "{}"),
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No documents stored.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(&items, "[]"),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T, fallback: &str) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string());
    println!("{json}");
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
