use std::fmt;

use crate::value::{Record, Value};

/// Search text of a [`Predicate::Contains`] leaf.
///
/// Keeps the text as typed for display and a lower-cased copy for matching,
/// so the fold happens once per query instead of once per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    text: String,
    folded: String,
}

impl Pattern {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let folded = text.to_lowercase();
        Pattern { text, folded }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Case-insensitive substring test.
    pub fn is_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.folded)
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::new(s)
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::new(s)
    }
}

/// Composed boolean filter over record fields.
///
/// Leaves are case-insensitive substring matches on a single field. The tree
/// is built once per query and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match of `value` in `field`
    ///
    /// # Example
    /// ```text
    /// cancer[Disease]    -> Contains { field: "Disease", value: "cancer", negated: false }
    /// cancer[~Disease]   -> Contains { field: "Disease", value: "cancer", negated: true }
    /// ```
    Contains {
        field: String,
        value: Pattern,
        negated: bool,
    },

    /// Exact match of `value` in `field`, as produced by facet filters
    Equals { field: String, value: Value },

    /// Logical negation of a whole subtree
    Not(Box<Predicate>),

    /// Both sides must match
    And(Box<Predicate>, Box<Predicate>),

    /// Either side must match
    Or(Box<Predicate>, Box<Predicate>),

    /// Matches every record
    Everything,
}

impl Predicate {
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::Contains {
            field: field.into(),
            value: Pattern::new(value),
            negated: false,
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    /// Negate this predicate. A single-field leaf flips its flag instead of
    /// being wrapped.
    pub fn negate(self) -> Self {
        match self {
            Predicate::Contains {
                field,
                value,
                negated,
            } => Predicate::Contains {
                field,
                value,
                negated: !negated,
            },
            Predicate::Not(inner) => *inner,
            other => Predicate::Not(Box::new(other)),
        }
    }

    /// Evaluate the predicate against one record.
    ///
    /// A missing or null field never contains anything, so a negated leaf on
    /// such a field matches.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::Contains {
                field,
                value,
                negated,
            } => {
                let found = record.text(field).is_some_and(|text| value.is_in(&text));
                found != *negated
            }
            Predicate::Equals { field, value } => match (record.get(field), value) {
                (None | Some(Value::Null), _) => false,
                (Some(Value::Boolean(found)), Value::Boolean(expected)) => found == expected,
                (Some(found), expected) => found.as_text() == expected.as_text(),
            },
            Predicate::Not(inner) => !inner.matches(record),
            Predicate::And(left, right) => left.matches(record) && right.matches(record),
            Predicate::Or(left, right) => left.matches(record) || right.matches(record),
            Predicate::Everything => true,
        }
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Predicate::Contains { .. } | Predicate::Equals { .. } | Predicate::Everything => 1,
            Predicate::Not(inner) => inner.leaf_count(),
            Predicate::And(l, r) | Predicate::Or(l, r) => l.leaf_count() + r.leaf_count(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Contains {
                field,
                value,
                negated,
            } => {
                if *negated {
                    f.write_str("NOT ")?;
                }
                write!(f, "{} ~ {:?}", field, value.as_str())
            }
            Predicate::Equals { field, value } => match value {
                Value::String(s) => write!(f, "{} = {:?}", field, s),
                other => write!(f, "{} = {}", field, other.as_text().as_deref().unwrap_or("null")),
            },
            Predicate::Not(inner) => write!(f, "NOT ({})", inner),
            Predicate::And(l, r) => write!(f, "({} AND {})", l, r),
            Predicate::Or(l, r) => write!(f, "({} OR {})", l, r),
            Predicate::Everything => f.write_str("*"),
        }
    }
}
