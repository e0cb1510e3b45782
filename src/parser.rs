use crate::ast::{Infix, Operator, Placeholder, Postfix, Symbol};

/// Errors that can occur while validating or reordering a placeholder expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Parentheses or square brackets do not nest; carries the user's query
    UnbalancedBrackets { query: String },

    /// `)` with no matching `(` before it
    UnmatchedParen { position: usize },

    /// `(` never closed
    UnclosedParen { position: usize },

    /// Character that is neither a placeholder letter, an operator nor a parenthesis
    UnexpectedCharacter { ch: char, position: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnbalancedBrackets { query } => {
                write!(f, "Invalid query (mismatching brackets): '{}'", query)
            }
            ParseError::UnmatchedParen { position } => {
                write!(f, "Unmatched ')' at position {}", position)
            }
            ParseError::UnclosedParen { position } => {
                write!(f, "Unclosed '(' at position {}", position)
            }
            ParseError::UnexpectedCharacter { ch, position } => {
                write!(f, "Unexpected character '{}' at position {}", ch, position)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Check that every `(`/`)` and `[`/`]` pair nests and closes.
///
/// A bracket directly preceded by a backslash is literal. Only the single
/// preceding character is looked at, so `\\(` still counts as escaped.
///
/// ```
/// use riboquery::parser::is_balanced;
///
/// assert!(is_balanced("A+(B*C)+(D*E)"));
/// assert!(!is_balanced("A+(B*C+(D*E)"));
/// ```
pub fn is_balanced(expression: &str) -> bool {
    let mut stack = Vec::new();
    let mut previous = None;

    for ch in expression.chars() {
        let escaped = previous == Some('\\');
        previous = Some(ch);
        if escaped {
            continue;
        }

        match ch {
            '(' | '[' => stack.push(ch),
            ')' | ']' => {
                let expected = if ch == ')' { '(' } else { '[' };
                if stack.pop() != Some(expected) {
                    return false;
                }
            }
            _ => {}
        }
    }

    stack.is_empty()
}

/// Shunting-yard converter from infix to postfix placeholder expressions.
///
/// The operator stack lives in the parser and is reset on every call.
#[derive(Debug, Default)]
pub struct Parser {
    // Pending operators and open parentheses, with the index they came from.
    stack: Vec<(Symbol, usize)>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a textual placeholder expression such as `A+(B*C)`.
    ///
    /// Runs of uppercase letters are placeholders, whitespace is ignored.
    pub fn parse_infix(input: &str) -> Result<Infix, ParseError> {
        let chars: Vec<char> = input.chars().collect();
        let mut symbols = Vec::new();
        let mut position = 0;

        while position < chars.len() {
            let ch = chars[position];
            if ch.is_ascii_uppercase() {
                let start = position;
                while position < chars.len() && chars[position].is_ascii_uppercase() {
                    position += 1;
                }
                let letters: String = chars[start..position].iter().collect();
                let placeholder = Placeholder::from_letters(&letters)
                    .ok_or(ParseError::UnexpectedCharacter { ch, position: start })?;
                symbols.push(Symbol::Operand(placeholder));
                continue;
            }

            match ch {
                '(' => symbols.push(Symbol::LParen),
                ')' => symbols.push(Symbol::RParen),
                c if c.is_whitespace() => {}
                c => match Operator::from_char(c) {
                    Some(op) => symbols.push(Symbol::Operator(op)),
                    None => return Err(ParseError::UnexpectedCharacter { ch: c, position }),
                },
            }
            position += 1;
        }

        Ok(Infix(symbols))
    }

    /// Whether the top of the stack must be emitted before pushing `op`.
    fn yields_to_top(&self, op: Operator) -> bool {
        match self.stack.last() {
            Some((Symbol::Operator(top), _)) => top.precedence() >= op.precedence(),
            _ => false,
        }
    }

    /// Reorder an infix expression into postfix.
    ///
    /// Operators of equal precedence associate to the left.
    pub fn to_postfix(&mut self, infix: &Infix) -> Result<Postfix, ParseError> {
        self.stack.clear();
        let mut output = Vec::with_capacity(infix.symbols().len());

        for (position, symbol) in infix.symbols().iter().enumerate() {
            match *symbol {
                Symbol::Operand(_) => output.push(*symbol),
                Symbol::LParen => self.stack.push((Symbol::LParen, position)),
                Symbol::RParen => loop {
                    match self.stack.pop() {
                        Some((Symbol::LParen, _)) => break,
                        Some((top, _)) => output.push(top),
                        None => return Err(ParseError::UnmatchedParen { position }),
                    }
                },
                Symbol::Operator(op) => {
                    while self.yields_to_top(op) {
                        if let Some((top, _)) = self.stack.pop() {
                            output.push(top);
                        }
                    }
                    self.stack.push((*symbol, position));
                }
            }
        }

        while let Some((top, position)) = self.stack.pop() {
            if top == Symbol::LParen {
                return Err(ParseError::UnclosedParen { position });
            }
            output.push(top);
        }

        Ok(Postfix(output))
    }
}

/// Convenience wrapper: textual infix in, space-separated postfix out.
///
/// ```
/// use riboquery::parser::infix_to_postfix;
///
/// assert_eq!(infix_to_postfix("A+(B*C)+(D*E)").unwrap(), "A B C * + D E * +");
/// ```
pub fn infix_to_postfix(expression: &str) -> Result<String, ParseError> {
    let infix = Parser::parse_infix(expression)?;
    let postfix = Parser::new().to_postfix(&infix)?;
    Ok(postfix.to_string())
}

#[test]
fn test_escaped_brackets_are_literal() {
    assert!(is_balanced(r"5\) UTR"));
    assert!(is_balanced(r"\[x"));
    assert!(!is_balanced(")"));
    assert!(is_balanced(r"\\("));
}
