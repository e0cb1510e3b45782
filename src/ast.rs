//! # riboquery - Query Structures
//!
//! This module defines the intermediate forms a metadata search query passes
//! through on its way from free text to an executable filter.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Placeholders and the symbols of a placeholder expression
//! - **[operators]** - Binary operators and their precedence
//! - **[expressions]** - Atoms, the token map, infix and postfix expressions
//! - **[predicate]** - The composed filter tree evaluated against records
//! - **[query]** - A fully compiled query with every intermediate form
//!
//! ## Quick Start
//!
//! ```text
//! cancer[disease] AND (Malawi[country] OR Illumina[platform])
//! ```
//!
//! Each `value[field]` term is an *atom*. The compiler swaps every atom for
//! a placeholder and works on the resulting expression:
//!
//! ```text
//! infix     A*(B+C)
//! postfix   A B C + *
//! tokens    A = (cancer, disease), B = (Malawi, country), C = (Illumina, platform)
//! ```
//!
//! ## Core Concepts
//!
//! ### Operators
//!
//! `AND` / `&` become `*` and `OR` / `|` become `+`, so ordinary arithmetic
//! precedence makes AND bind tighter than OR. Parentheses group as usual.
//!
//! ### Fields
//!
//! A term without `[field]` searches every searchable field of the schema.
//! A field name the schema does not know behaves the same way.
//!
//! ### Negation
//!
//! A leading `~` on either the field (`amplicons[~LIBRARYTYPE]`) or the value
//! (`~amplicons`) excludes the records that match the term.
pub mod tokens;
pub mod operators;
pub mod expressions;
pub mod predicate;
pub mod query;

pub use tokens::{Placeholder, Symbol};
pub use operators::Operator;
pub use expressions::{Atom, Infix, Postfix, TokenMap};
pub use predicate::{Pattern, Predicate};
pub use query::CompiledQuery;
