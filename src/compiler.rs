//! End-to-end query compilation: free text in, predicate out.
//!
//! ```
//! use riboquery::{QueryCompiler, Record, Schema, store::MemoryStore};
//!
//! let schema = Schema::sample();
//! let store: MemoryStore = vec![
//!     Record::new().with("Run", "SRR1").with("Disease", "lung cancer").with("Platform", "Illumina"),
//!     Record::new().with("Run", "SRR2").with("Disease", "none").with("Platform", "Illumina"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let compiler = QueryCompiler::new(&schema);
//! let hits = compiler.search(&store, "cancer[disease] AND Illumina[platform]").unwrap();
//! assert_eq!(hits.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    ast::{CompiledQuery, Infix, Postfix, Predicate, TokenMap},
    evaluator::{EvalError, PredicateBuilder},
    lexer::{self, Lexer},
    parser::{self, ParseError, Parser},
    schema::Schema,
    store::RecordStore,
    value::Record,
};

/// Compiler switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Apply a `~` marker to terms that fall back to searching every field.
    ///
    /// When `false`, such terms ignore the marker and match records that do
    /// contain the value.
    pub negate_fallback: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            negate_fallback: true,
        }
    }
}

/// Errors that can occur while compiling a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The query text could not be parsed
    Parse(ParseError),
    /// The parsed query could not be turned into a predicate
    Eval(EvalError),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::Parse(e) => write!(f, "{}", e),
            QueryError::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Parse(e) => Some(e),
            QueryError::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for QueryError {
    fn from(e: ParseError) -> Self {
        QueryError::Parse(e)
    }
}

impl From<EvalError> for QueryError {
    fn from(e: EvalError) -> Self {
        QueryError::Eval(e)
    }
}

/// Compiles search queries against one schema.
///
/// Holds no per-query state; one compiler can serve any number of queries,
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct QueryCompiler<'a> {
    schema: &'a Schema,
    config: CompilerConfig,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        QueryCompiler {
            schema,
            config: CompilerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Run the whole pipeline on one query string.
    ///
    /// A blank query compiles to [`Predicate::Everything`].
    pub fn compile(&self, query: &str) -> Result<CompiledQuery, QueryError> {
        let normalized = lexer::normalize(query);
        debug!(schema = %self.schema.name, query, normalized = %normalized, "normalized query");

        if normalized.trim().is_empty() {
            return Ok(CompiledQuery {
                source: query.to_string(),
                normalized,
                infix: Infix::default(),
                tokens: TokenMap::new(),
                postfix: Postfix::default(),
                predicate: Predicate::Everything,
            });
        }

        let (infix, tokens) = Lexer::new(&normalized).build_infix();
        debug!(infix = %infix, atoms = tokens.len(), "built infix expression");

        if !parser::is_balanced(&infix.to_string()) {
            return Err(ParseError::UnbalancedBrackets { query: normalized }.into());
        }

        let postfix = Parser::new().to_postfix(&infix)?;
        debug!(postfix = %postfix, "converted to postfix");

        let predicate = PredicateBuilder::new(self.schema, &self.config).build(&postfix, &tokens)?;
        debug!(predicate = %predicate, leaves = predicate.leaf_count(), "built predicate");

        Ok(CompiledQuery {
            source: query.to_string(),
            normalized,
            infix,
            tokens,
            postfix,
            predicate,
        })
    }

    /// Compile `query` and run it against `store`.
    pub fn search<'s, S: RecordStore + ?Sized>(
        &self,
        store: &'s S,
        query: &str,
    ) -> Result<Vec<&'s Record>, QueryError> {
        self.search_with(store, query, None)
    }

    /// Like [`search`](Self::search), with `refine` AND-ed onto the query.
    ///
    /// Used to narrow a text search by facet selections.
    pub fn search_with<'s, S: RecordStore + ?Sized>(
        &self,
        store: &'s S,
        query: &str,
        refine: Option<&Predicate>,
    ) -> Result<Vec<&'s Record>, QueryError> {
        let compiled = self.compile(query)?;
        let hits = match refine {
            Some(extra) => store.filter(&compiled.predicate.and(extra.clone())),
            None => store.filter(&compiled.predicate),
        };
        info!(
            schema = %self.schema.name,
            query,
            refined = refine.is_some(),
            matched = hits.len(),
            total = store.records().len(),
            "search finished"
        );
        Ok(hits)
    }
}
