//! Run a query against JSON records

use super::{CliError, SchemaSource, json_to_records, record_to_json};
use crate::{CompilerConfig, FacetQuery, Predicate, QueryCompiler, selection_predicate};

/// Options for the search command
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// The search query
    pub query: String,
    /// JSON input: an array of flat objects, or a single object
    pub input: Option<String>,
    /// Schema of the records
    pub schema: SchemaSource,
    /// Compiler switches
    pub config: CompilerConfig,
    /// Facet form selections, `name=option&...`; same-column options are OR-ed
    pub facets: Option<String>,
    /// "Select all" string, `name=value&...`; every pair must match exactly
    pub select: Option<String>,
}

/// Execute a riboquery search, returning the matching records as JSON.
pub fn execute_search(options: &SearchOptions) -> Result<serde_json::Value, CliError> {
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;
    let records = json_to_records(json_value)?;

    let schema = options.schema.load()?;
    let compiler = QueryCompiler::new(&schema).with_config(options.config.clone());
    let refine = [
        options
            .facets
            .as_deref()
            .map(|f| FacetQuery::from_query_string(&schema, f).predicate()),
        options
            .select
            .as_deref()
            .map(|s| selection_predicate(&schema, s)),
    ]
    .into_iter()
    .flatten()
    .reduce(Predicate::and);
    let hits = compiler.search_with(&records, &options.query, refine.as_ref())?;

    Ok(serde_json::Value::Array(
        hits.into_iter().map(record_to_json).collect(),
    ))
}
