use crate::{
    ast::{Atom, Operator, Postfix, Predicate, Symbol, TokenMap},
    compiler::CompilerConfig,
    schema::Schema,
};

/// Negation marker accepted in front of a field or a value.
const NEGATION: char = '~';

/// Errors that can occur while turning a postfix expression into a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// No term of the query produced a condition
    EmptyExpression,

    /// Terms were left over with no operator joining them
    DanglingOperands(usize),

    /// Operator with no meaning in a search query
    UnsupportedOperator(Operator),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::EmptyExpression => write!(f, "Query contains no search terms"),
            EvalError::DanglingOperands(n) => {
                write!(f, "{} search terms are not joined by AND or OR", n)
            }
            EvalError::UnsupportedOperator(op) => {
                write!(f, "Operator '{}' is not supported in search queries", op.symbol())
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Builds the final predicate from a postfix expression and its atoms.
pub struct PredicateBuilder<'a> {
    schema: &'a Schema,
    config: &'a CompilerConfig,
}

impl<'a> PredicateBuilder<'a> {
    pub fn new(schema: &'a Schema, config: &'a CompilerConfig) -> Self {
        PredicateBuilder { schema, config }
    }

    /// Evaluate `postfix` into a single predicate.
    ///
    /// `*` joins with AND and `+` with OR. Placeholders missing from `tokens`
    /// or holding a blank value or field are skipped, a value made of nothing
    /// but the `~` marker included; an operator left with one operand passes
    /// it through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use riboquery::{CompilerConfig, Schema, evaluator::PredicateBuilder};
    /// use riboquery::lexer::Lexer;
    /// use riboquery::parser::Parser;
    ///
    /// let schema = Schema::sample();
    /// let config = CompilerConfig::default();
    /// let (infix, tokens) = Lexer::new("cancer[disease] & Illumina[platform]").build_infix();
    /// let postfix = Parser::new().to_postfix(&infix).unwrap();
    ///
    /// let predicate = PredicateBuilder::new(&schema, &config).build(&postfix, &tokens).unwrap();
    /// assert_eq!(predicate.to_string(), r#"(Disease ~ "cancer" AND Platform ~ "Illumina")"#);
    /// ```
    pub fn build(&self, postfix: &Postfix, tokens: &TokenMap) -> Result<Predicate, EvalError> {
        let mut operands: Vec<Option<Predicate>> = Vec::new();

        for symbol in postfix.symbols() {
            match symbol {
                Symbol::Operand(placeholder) => {
                    let leaf = tokens
                        .get(placeholder)
                        .filter(|atom| !is_blank(atom))
                        .map(|atom| self.leaf(atom));
                    operands.push(leaf);
                }
                Symbol::Operator(op) => {
                    let right = operands.pop().flatten();
                    let left = operands.pop().flatten();
                    operands.push(self.combine(*op, left, right)?);
                }
                // The converter never emits parentheses.
                Symbol::LParen | Symbol::RParen => {}
            }
        }

        let mut results: Vec<Predicate> = operands.into_iter().flatten().collect();
        match results.len() {
            0 => Err(EvalError::EmptyExpression),
            1 => Ok(results.remove(0)),
            n => Err(EvalError::DanglingOperands(n)),
        }
    }

    fn combine(
        &self,
        op: Operator,
        left: Option<Predicate>,
        right: Option<Predicate>,
    ) -> Result<Option<Predicate>, EvalError> {
        let join: fn(Predicate, Predicate) -> Predicate = match op {
            Operator::Multiply => Predicate::and,
            Operator::Add => Predicate::or,
            other => return Err(EvalError::UnsupportedOperator(other)),
        };

        Ok(match (left, right) {
            (Some(l), Some(r)) => Some(join(l, r)),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        })
    }

    /// Build the condition for one atom.
    ///
    /// A known field gives a single-column match. Anything else, `all`
    /// included, searches every searchable column.
    ///
    /// A `~` on the field or on the value negates the leaf. Markers on both
    /// do not cancel out.
    pub fn leaf(&self, atom: &Atom) -> Predicate {
        let (field, field_negated) = strip_negation(&atom.field);
        let (value, value_negated) = strip_negation(&atom.value);
        let negated = field_negated || value_negated;

        if let Some(column) = self.schema.resolve(field) {
            let leaf = Predicate::contains(column, value);
            return if negated { leaf.negate() } else { leaf };
        }

        let any_field = self
            .schema
            .searchable_fields()
            .map(|column| Predicate::contains(column, value))
            .reduce(Predicate::or)
            .unwrap_or(Predicate::Everything);

        if negated && self.config.negate_fallback {
            any_field.negate()
        } else {
            any_field
        }
    }
}

fn is_blank(atom: &Atom) -> bool {
    atom.field.is_empty() || strip_negation(&atom.value).0.is_empty()
}

fn strip_negation(s: &str) -> (&str, bool) {
    match s.strip_prefix(NEGATION) {
        Some(rest) => (rest.trim_start(), true),
        None => (s, false),
    }
}
