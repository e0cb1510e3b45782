use crate::ast::{Infix, Postfix, Predicate, TokenMap};

/// Every intermediate form of one compiled search query.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    /// Query exactly as received
    pub source: String,

    /// Query after `AND`/`OR` rewriting and quote stripping
    pub normalized: String,

    /// Placeholder expression in infix order
    pub infix: Infix,

    /// Atoms behind each placeholder
    pub tokens: TokenMap,

    /// Placeholder expression in postfix order
    pub postfix: Postfix,

    /// Final filter
    pub predicate: Predicate,
}
