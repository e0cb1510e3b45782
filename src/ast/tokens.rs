use std::fmt;

use crate::ast::Operator;

/// Stand-in identifier for one atom of a search query.
///
/// Placeholders are numbered from zero in the order atoms are found and are
/// displayed with bijective base-26 letters, so the first atoms read exactly
/// like the classic single-letter form while the id space stays unbounded:
///
/// ```text
/// 0 -> A, 1 -> B, ..., 25 -> Z, 26 -> AA, 27 -> AB, ..., 701 -> ZZ, 702 -> AAA
/// ```
///
/// # Examples
///
/// ```
/// use riboquery::ast::Placeholder;
///
/// assert_eq!(Placeholder(0).to_string(), "A");
/// assert_eq!(Placeholder(26).to_string(), "AA");
/// assert_eq!(Placeholder::from_letters("AB"), Some(Placeholder(27)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placeholder(pub usize);

impl Placeholder {
    /// Parse the letter form back into a placeholder.
    ///
    /// Returns `None` for an empty string or anything that is not an ASCII
    /// uppercase letter.
    pub fn from_letters(letters: &str) -> Option<Self> {
        if letters.is_empty() {
            return None;
        }

        let mut n: usize = 0;
        for ch in letters.chars() {
            if !ch.is_ascii_uppercase() {
                return None;
            }
            let digit = (ch as u8 - b'A') as usize + 1;
            n = n.checked_mul(26)?.checked_add(digit)?;
        }
        Some(Placeholder(n - 1))
    }

    /// The next placeholder in sequence.
    pub fn next(self) -> Self {
        Placeholder(self.0 + 1)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.0 + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        let s: String = letters.into_iter().rev().collect();
        f.write_str(&s)
    }
}

/// One symbol of a placeholder expression, in either infix or postfix order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Placeholder standing for an atom
    Operand(Placeholder),

    /// Binary operator
    Operator(Operator),

    /// Opening parenthesis `(`
    LParen,

    /// Closing parenthesis `)`
    RParen,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Operand(p) => write!(f, "{}", p),
            Symbol::Operator(op) => write!(f, "{}", op.symbol()),
            Symbol::LParen => f.write_str("("),
            Symbol::RParen => f.write_str(")"),
        }
    }
}

#[test]
fn test_placeholder_letters_roundtrip_at_boundaries() {
    for n in [0, 1, 25, 26, 27, 51, 52, 701, 702, 18277] {
        let p = Placeholder(n);
        assert_eq!(Placeholder::from_letters(&p.to_string()), Some(p));
    }
    assert_eq!(Placeholder(25).to_string(), "Z");
    assert_eq!(Placeholder(701).to_string(), "ZZ");
    assert_eq!(Placeholder(702).to_string(), "AAA");
}
