//! Compile a query and report every intermediate form

use serde_json::json;

use super::{CliError, SchemaSource};
use crate::{
    CompilerConfig, QueryCompiler, QueryError,
    ast::CompiledQuery,
    lexer::{self, Lexer},
    parser::{self, ParseError, Parser},
};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The search query to compile
    pub query: String,
    /// Schema the query is compiled against
    pub schema: SchemaSource,
    /// Compiler switches
    pub config: CompilerConfig,
    /// Only validate syntax, don't build the predicate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query compiled; JSON report of each stage
    Compiled(serde_json::Value),
}

/// Brackets and operator structure only; no schema involved.
fn check_syntax(query: &str) -> Result<(), QueryError> {
    let normalized = lexer::normalize(query);
    let (infix, _) = Lexer::new(&normalized).build_infix();
    if !parser::is_balanced(&infix.to_string()) {
        return Err(ParseError::UnbalancedBrackets { query: normalized }.into());
    }
    Parser::new().to_postfix(&infix)?;
    Ok(())
}

fn report(compiled: &CompiledQuery) -> serde_json::Value {
    let tokens: serde_json::Map<String, serde_json::Value> = compiled
        .tokens
        .iter()
        .map(|(placeholder, atom)| (placeholder.to_string(), json!(atom)))
        .collect();

    json!({
        "query": compiled.source,
        "normalized": compiled.normalized,
        "infix": compiled.infix.to_string(),
        "postfix": compiled.postfix.to_string(),
        "tokens": tokens,
        "predicate": compiled.predicate.to_string(),
    })
}

/// Execute a riboquery check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.syntax_only {
        check_syntax(&options.query)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let schema = options.schema.load()?;
    let compiler = QueryCompiler::new(&schema).with_config(options.config.clone());
    let compiled = compiler.compile(&options.query)?;

    Ok(CheckResult::Compiled(report(&compiled)))
}
