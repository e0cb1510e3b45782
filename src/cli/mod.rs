//! CLI support for riboquery
//!
//! Provides programmatic access to the riboquery commands so they can be
//! embedded in other tools and tested without spawning the binary.

mod check;
mod convert;
mod docs;
mod search;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::{json_to_record, json_to_records, json_to_value, record_to_json};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use search::{SearchOptions, execute_search};

use std::{fs, io, path::PathBuf};

use crate::{QueryError, Schema};

/// Where the record schema comes from
#[derive(Debug, Clone)]
pub enum SchemaSource {
    /// Built-in preset, `study` or `sample`
    Preset(String),
    /// JSON file with a custom schema
    File(PathBuf),
}

impl Default for SchemaSource {
    fn default() -> Self {
        SchemaSource::Preset("sample".to_string())
    }
}

impl SchemaSource {
    pub fn load(&self) -> Result<Schema, CliError> {
        match self {
            SchemaSource::Preset(name) => {
                Schema::preset(name).ok_or_else(|| CliError::UnknownModel(name.clone()))
            }
            SchemaSource::File(path) => {
                let text = fs::read_to_string(path)?;
                Ok(Schema::from_json(&text)?)
            }
        }
    }
}

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Query compilation error
    Query(QueryError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
    /// Input JSON element is not an object
    NotARecord(String),
    /// Unknown schema preset
    UnknownModel(String),
    /// Unknown documentation category
    UnknownCategory(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Query(e) => write!(f, "Query error: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
            CliError::NotARecord(kind) => {
                write!(f, "Expected a JSON object per record, got {}", kind)
            }
            CliError::UnknownModel(m) => {
                write!(f, "Unknown model: '{}'\nAvailable models: study, sample.", m)
            }
            CliError::UnknownCategory(c) => {
                write!(f, "Unknown category: '{}'\nRun 'riboquery docs' to see available categories.", c)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Query(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
