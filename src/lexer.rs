use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Atom, Infix, Operator, Placeholder, Symbol, TokenMap};

static KEYWORD_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" (AND|OR) ").expect("static regex"));

/// Rewrite textual `AND` / `OR` into `&` / `|` and strip surrounding quotes.
///
/// Only upper-case keywords with a space on each side count, so values such
/// as `ORF` or `Portland` are left alone.
///
/// ```
/// use riboquery::lexer::normalize;
///
/// assert_eq!(normalize("\"cancer[disease] AND Illumina\""), "cancer[disease] & Illumina");
/// ```
pub fn normalize(input: &str) -> String {
    let mut out = input.to_string();
    // Adjacent keywords share a space, so a single pass can miss every other one.
    loop {
        let next = KEYWORD_OPERATOR
            .replace_all(&out, |caps: &regex::Captures| match &caps[1] {
                "AND" => " & ",
                _ => " | ",
            })
            .into_owned();
        if next == out {
            break;
        }
        out = next;
    }
    out.trim_matches('"').to_string()
}

/// Escape character that makes the following bracket part of an atom.
const ESCAPE: char = '\\';

const ESCAPABLE: [char; 4] = ['(', ')', '[', ']'];

/// Split one atom into its value and field.
///
/// Everything before the first `[` is the value; everything after it, minus
/// any `]`, is the field. A bracket preceded by `\` is kept literally and
/// the backslash dropped. Returns `None` when the value is blank.
///
/// ```
/// use riboquery::lexer::extract_value_field;
///
/// let atom = extract_value_field("Malawi[country]").unwrap();
/// assert_eq!((atom.value.as_str(), atom.field.as_str()), ("Malawi", "country"));
///
/// let atom = extract_value_field("Malawi").unwrap();
/// assert_eq!(atom.field, "all");
///
/// let atom = extract_value_field(r"5\) UTR[GENE]").unwrap();
/// assert_eq!(atom.value, "5) UTR");
///
/// assert!(extract_value_field("   ").is_none());
/// ```
pub fn extract_value_field(input: &str) -> Option<Atom> {
    let mut value = String::new();
    let mut field = String::new();
    let mut in_field = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        let target = if in_field { &mut field } else { &mut value };
        match ch {
            ESCAPE if chars.peek().is_some_and(|c| ESCAPABLE.contains(c)) => {
                if let Some(literal) = chars.next() {
                    target.push(literal);
                }
            }
            '[' => in_field = true,
            ']' if in_field => {}
            _ => target.push(ch),
        }
    }

    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let field = match field.trim() {
        "" => Atom::ALL_FIELDS,
        f => f,
    };

    Some(Atom::new(value, field))
}

/// Scans a normalized query and swaps each atom for a placeholder.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    pending: String,
    next_placeholder: Placeholder,
    infix: Vec<Symbol>,
    tokens: TokenMap,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            pending: String::new(),
            next_placeholder: Placeholder(0),
            infix: Vec::new(),
            tokens: TokenMap::new(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Turn the pending atom text into a placeholder, if it holds a value.
    fn flush_atom(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        if let Some(atom) = extract_value_field(&self.pending) {
            let placeholder = self.next_placeholder;
            self.next_placeholder = placeholder.next();
            self.infix.push(Symbol::Operand(placeholder));
            self.tokens.insert(placeholder, atom);
        }
        self.pending.clear();
    }

    /// Build the placeholder infix expression and its token map.
    ///
    /// `&` becomes `*` and `|` becomes `+`; parentheses are kept as typed
    /// unless escaped with `\`.
    ///
    /// ```
    /// use riboquery::lexer::Lexer;
    ///
    /// let (infix, tokens) = Lexer::new("amplicons | (South Africa[country] & cancer[disease])")
    ///     .build_infix();
    /// assert_eq!(infix.to_string(), "A+(B*C)");
    /// assert_eq!(tokens.len(), 3);
    /// ```
    pub fn build_infix(mut self) -> (Infix, TokenMap) {
        while let Some(ch) = self.current_char() {
            // Escaped brackets stay in the atom text for extract_value_field.
            if ch == ESCAPE && self.peek_char().is_some_and(|c| ESCAPABLE.contains(&c)) {
                self.pending.push(ch);
                self.advance();
                if let Some(literal) = self.current_char() {
                    self.pending.push(literal);
                }
                self.advance();
                continue;
            }

            let structural = match ch {
                '&' => Some(Symbol::Operator(Operator::Multiply)),
                '|' => Some(Symbol::Operator(Operator::Add)),
                '(' => Some(Symbol::LParen),
                ')' => Some(Symbol::RParen),
                _ => None,
            };

            match structural {
                Some(symbol) => {
                    self.flush_atom();
                    self.infix.push(symbol);
                }
                None => self.pending.push(ch),
            }
            self.advance();
        }
        self.flush_atom();

        (Infix(self.infix), self.tokens)
    }
}

#[test]
fn test_keywords_inside_values_are_kept() {
    assert_eq!(normalize("ORF[GENE] OR Portland"), "ORF[GENE] | Portland");
    assert_eq!(normalize("a AND OR b"), "a & | b");
    assert_eq!(normalize("cancer and lung"), "cancer and lung");
}

#[test]
fn test_trailing_blank_atom_gets_no_placeholder() {
    let (infix, tokens) = Lexer::new("cancer & ").build_infix();
    assert_eq!(infix.to_string(), "A*");
    assert_eq!(tokens.len(), 1);
}
