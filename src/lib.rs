pub mod ast;
pub mod cli;
pub mod compiler;
pub mod evaluator;
pub mod facets;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod schema;
pub mod store;
pub mod value;

pub use ast::{Atom, CompiledQuery, Operator, Placeholder, Predicate, Symbol};
pub use compiler::{CompilerConfig, QueryCompiler, QueryError};
pub use evaluator::{EvalError, PredicateBuilder};
pub use facets::{FacetQuery, selection_predicate};
pub use lexer::{Lexer, extract_value_field, normalize};
pub use parser::{ParseError, Parser, infix_to_postfix, is_balanced};
pub use schema::Schema;
pub use store::{MemoryStore, RecordStore};
pub use value::{Record, Value};
