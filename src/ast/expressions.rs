use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::ast::{Placeholder, Symbol};

/// A single search term: `value` or `value[field]`.
///
/// # Example
/// ```text
/// Malawi[country]   -> Atom { value: "Malawi", field: "country" }
/// Illumina          -> Atom { value: "Illumina", field: "all" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Atom {
    pub value: String,
    pub field: String,
}

impl Atom {
    /// Field name used when the user gives no `[field]` qualifier.
    pub const ALL_FIELDS: &'static str = "all";

    pub fn new(value: impl Into<String>, field: impl Into<String>) -> Self {
        Atom {
            value: value.into(),
            field: field.into(),
        }
    }
}

/// Placeholder to atom mapping built alongside an infix expression.
pub type TokenMap = BTreeMap<Placeholder, Atom>;

/// Placeholder expression in infix order, parentheses included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Infix(pub Vec<Symbol>);

/// Placeholder expression in postfix (reverse Polish) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix(pub Vec<Symbol>);

impl Infix {
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Placeholders in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.0.iter().filter_map(|s| match s {
            Symbol::Operand(p) => Some(*p),
            _ => None,
        })
    }
}

impl Postfix {
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Infix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

// Space separated: placeholders past Z are more than one letter wide.
impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
