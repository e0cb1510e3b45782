//! Documentation content for riboquery CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Fields,
    Negation,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "fields" | "field" | "columns" => Some(Self::Fields),
            "negation" | "not" => Some(Self::Negation),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"RIBOQUERY DOCUMENTATION

riboquery compiles the search box syntax of the RiboSeqOrg metadata portal
into a filter and runs it over Study or Sample records.

DOCUMENTATION CATEGORIES

  syntax      Terms, field qualifiers and grouping
  operators   AND / OR and how they bind
  fields      Which columns a term searches
  negation    Excluding records with ~

QUICK REFERENCE

  cancer                      Any searchable column contains "cancer"
  cancer[Disease]             Disease column contains "cancer"
  a AND b      a & b          Both terms match
  a OR b       a | b          Either term matches
  (a OR b) AND c              Grouping
  ~amplicons                  No searchable column contains "amplicons"

Run 'riboquery doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Fields) => Ok(FIELDS_DOC),
        Some(DocCategory::Negation) => Ok(NEGATION_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Search Terms

TERMS
  value
    Matches records where any searchable column contains value.
    Matching is a case-insensitive substring match.

    Example:
      riboquery search 'HeLa' --model sample --input samples.json

  value[field]
    Restricts the term to one column.

    Example:
      riboquery search 'Malawi[country]'

    Constraints:
      - Spaces inside a value are kept: South Africa[country]
      - Surrounding double quotes are removed from the whole query

GROUPING
  ( ... )
    Parentheses group terms. Brackets must balance, otherwise the query
    is rejected with "Invalid query (mismatching brackets)".

    A bracket preceded by a backslash is part of the search value:

      5\) UTR[GENE]      searches GENE for "5) UTR"
      x\[1\]            searches for "x[1]"

INSPECTING A QUERY
  riboquery check 'cancer[disease] AND (Malawi OR Illumina)'
    Prints the placeholder expression, its postfix form, the terms behind
    each placeholder and the final filter.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Combining Terms

AND
  a AND b     a & b
    Both terms must match.

OR
  a OR b      a | b
    Either term must match.

PRECEDENCE
  AND binds tighter than OR:

    a OR b AND c       is   a OR (b AND c)
    (a OR b) AND c     groups explicitly

  Constraints:
    - AND / OR are recognised in upper case with a space on each side
    - 'and' or 'or' in lower case are part of the search value
"#;

const FIELDS_DOC: &str = r#"FIELDS - Which Columns Are Searched

KNOWN FIELDS
  Field names are matched against the schema case-insensitively:

    cancer[disease]    searches the Disease column

UNKNOWN FIELDS
  A field the schema does not know, or no field at all, searches every
  searchable column:

    cancer[illness]    same as plain 'cancer'

EXCLUDED COLUMNS
  Bookkeeping columns are never searched:
    id, verified, trips_id, gwips_id, ribocrypt_id, FASTA_file
  The sample schema also skips readfile and BioProject; the study schema
  skips sample.

CUSTOM SCHEMAS
  --schema schema.json
    {"name": "run", "fields": ["Run", "Platform"], "excluded": []}

FACET FILTERS
  riboquery search '' --facets 'Disease=cancer&Disease=none&Cell-Line=HeLa'
    Exact matches. Options of one column are OR-ed, columns are AND-ed.
    Display names such as Cell-Line map back to their column, '+' is a
    space and 'page' is ignored. On verified, trips_id, gwips_id,
    ribocrypt_id and readfile the value 'on' means true.

  --select 'Cell-Line=HeLa+S3&Disease=none'
    Every pair must match exactly.
"#;

const NEGATION_DOC: &str = r#"NEGATION - Excluding Records

ON A FIELD
  amplicons[~LIBRARYTYPE]
    Records whose LIBRARYTYPE does not contain "amplicons".

ON A VALUE
  ~amplicons
    Records where no searchable column contains "amplicons".

ON BOTH
  ~amplicons[~LIBRARYTYPE]
    Same as a single ~. The markers do not cancel out.

  A term that is only ~, with no value, is ignored.

  --legacy-negation
    Ignores ~ on terms that search every column, matching the portal's
    historical behaviour.
"#;
