//! Facet filters from the portal's sidebar forms and "select all" links.
//!
//! A facet form submits `name=option` pairs, where `name` is a column or
//! its display name. Options of one column are OR-ed, columns are AND-ed,
//! and every comparison is an exact match:
//!
//! ```text
//! Disease=cancer&Disease=none&Library-Type=Ribo-Seq&page=2
//!   -> (Disease = "cancer" OR Disease = "none") AND LIBRARYTYPE = "Ribo-Seq"
//! ```
//!
//! ```
//! use riboquery::{Schema, facets::FacetQuery};
//!
//! let schema = Schema::sample();
//! let facets = FacetQuery::from_query_string(&schema, "Disease=cancer&verified=on&page=3");
//! assert_eq!(facets.predicate().to_string(), r#"(Disease = "cancer" AND verified = true)"#);
//! ```

use tracing::debug;

use crate::{ast::Predicate, schema::Schema, value::Value};

/// Pagination parameter sent along with every facet form.
pub const PAGE_PARAM: &str = "page";

/// Value a browser submits for a ticked checkbox.
const CHECKED: &str = "on";

/// All options selected for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetGroup {
    pub column: String,
    pub options: Vec<Value>,
}

/// Facet selections grouped by column, in the order columns first appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetQuery {
    groups: Vec<FacetGroup>,
}

impl FacetQuery {
    /// Build from submitted `(name, option)` pairs.
    ///
    /// `page` is ignored. Names are mapped back to columns through the
    /// schema's display names. On checkbox columns `on` means true and any
    /// other option false.
    pub fn from_pairs<I, K, V>(schema: &Schema, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = FacetQuery::default();

        for (name, option) in pairs {
            let name = name.as_ref();
            if name == PAGE_PARAM {
                continue;
            }

            let column = schema.column_for(name);
            let value = if schema.is_flag(column) {
                Value::Boolean(option.as_ref() == CHECKED)
            } else {
                Value::from(option.as_ref())
            };
            query.push(column, value);
        }

        debug!(schema = %schema.name, columns = query.groups.len(), "parsed facet filters");
        query
    }

    /// Build from a `k=v&k2=v2` form encoding.
    pub fn from_query_string(schema: &Schema, input: &str) -> Self {
        Self::from_pairs(schema, parse_query_string(input))
    }

    fn push(&mut self, column: &str, value: Value) {
        match self.groups.iter_mut().find(|g| g.column == column) {
            Some(group) => group.options.push(value),
            None => self.groups.push(FacetGroup {
                column: column.to_string(),
                options: vec![value],
            }),
        }
    }

    pub fn groups(&self) -> &[FacetGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The combined filter; [`Predicate::Everything`] when nothing is selected.
    pub fn predicate(&self) -> Predicate {
        self.groups
            .iter()
            .filter_map(|group| {
                group
                    .options
                    .iter()
                    .map(|option| Predicate::equals(&group.column, option.clone()))
                    .reduce(Predicate::or)
            })
            .reduce(Predicate::and)
            .unwrap_or(Predicate::Everything)
    }
}

/// Exact-match AND of every pair of a "select all" string.
///
/// Unlike facet forms, `on` becomes true on any column and repeated names
/// are AND-ed rather than grouped.
///
/// ```
/// use riboquery::{Schema, facets::selection_predicate};
///
/// let schema = Schema::sample();
/// let predicate = selection_predicate(&schema, "Cell-Line=HeLa+S3&Disease=none");
/// assert_eq!(predicate.to_string(), r#"(CELL_LINE = "HeLa S3" AND Disease = "none")"#);
/// ```
pub fn selection_predicate(schema: &Schema, selection: &str) -> Predicate {
    parse_query_string(selection)
        .filter(|(name, _)| name != PAGE_PARAM)
        .map(|(name, option)| {
            let value = if option == CHECKED {
                Value::Boolean(true)
            } else {
                Value::String(option)
            };
            Predicate::equals(schema.column_for(&name), value)
        })
        .reduce(Predicate::and)
        .unwrap_or(Predicate::Everything)
}

/// Split `k=v&k2=v2` into pairs, turning `+` into a space.
///
/// Segments without `=` are dropped. Only the first `=` splits, so values
/// may contain more.
pub fn parse_query_string(input: &str) -> impl Iterator<Item = (String, String)> + '_ {
    input
        .split('&')
        .filter_map(|segment| segment.split_once('='))
        .map(|(name, value)| (name.replace('+', " "), value.replace('+', " ")))
}

#[test]
fn test_options_of_one_column_are_grouped() {
    let schema = Schema::sample();
    let facets = FacetQuery::from_pairs(
        &schema,
        [("Disease", "cancer"), ("Platform", "Illumina"), ("Disease", "none")],
    );

    assert_eq!(facets.groups().len(), 2);
    assert_eq!(facets.groups()[0].column, "Disease");
    assert_eq!(facets.groups()[0].options, [Value::from("cancer"), Value::from("none")]);
}
