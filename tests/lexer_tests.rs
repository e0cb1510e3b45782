// tests/lexer_tests.rs

use riboquery::ast::{Atom, Placeholder, Symbol};
use riboquery::lexer::{Lexer, extract_value_field, normalize};

fn infix_of(query: &str) -> String {
    Lexer::new(&normalize(query)).build_infix().0.to_string()
}

// ============================================================================
// Rewriting
// ============================================================================

#[test]
fn test_normalize_keywords() {
    let test_cases = vec![
        ("a AND b", "a & b"),
        ("a OR b", "a | b"),
        ("a AND b OR c", "a & b | c"),
        ("(a OR b) AND c", "(a | b) & c"),
        ("\"quoted query\"", "quoted query"),
        ("\"a AND b\"", "a & b"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(normalize(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_normalize_leaves_lowercase_and_embedded_keywords() {
    assert_eq!(normalize("rock and roll"), "rock and roll");
    assert_eq!(normalize("ORF1ab"), "ORF1ab");
    assert_eq!(normalize("SANDOR"), "SANDOR");
    assert_eq!(normalize("AND b"), "AND b");
}

// ============================================================================
// Value / field extraction
// ============================================================================

#[test]
fn test_extract_value_field() {
    let test_cases = vec![
        ("Malawi[country]", ("Malawi", "country")),
        ("Malawi", ("Malawi", "all")),
        ("  South Africa [ country ] ", ("South Africa", "country")),
        ("Malawi[]", ("Malawi", "all")),
        ("cancer[~Disease]", ("cancer", "~Disease")),
        ("~amplicons", ("~amplicons", "all")),
    ];

    for (input, (value, field)) in test_cases {
        let atom = extract_value_field(input).unwrap();
        assert_eq!(atom, Atom::new(value, field), "Failed for input: {}", input);
    }
}

#[test]
fn test_extract_blank_value() {
    assert!(extract_value_field("   ").is_none());
    assert!(extract_value_field("").is_none());
    assert!(extract_value_field("[country]").is_none());
}

#[test]
fn test_extract_tolerates_stray_brackets() {
    // Everything after the first '[' belongs to the field; ']' is dropped.
    let atom = extract_value_field("a[b]c").unwrap();
    assert_eq!(atom, Atom::new("a", "bc"));

    let atom = extract_value_field("a[b").unwrap();
    assert_eq!(atom, Atom::new("a", "b"));

    let atom = extract_value_field("a]b").unwrap();
    assert_eq!(atom, Atom::new("a]b", "all"));
}

#[test]
fn test_extract_escaped_brackets() {
    let atom = extract_value_field(r"x\[1\][f]").unwrap();
    assert_eq!(atom, Atom::new("x[1]", "f"));

    let atom = extract_value_field(r"a[b\]c]").unwrap();
    assert_eq!(atom, Atom::new("a", "b]c"));

    // A backslash before anything else is ordinary text.
    let atom = extract_value_field(r"a\b").unwrap();
    assert_eq!(atom, Atom::new(r"a\b", "all"));
}

// ============================================================================
// Infix building
// ============================================================================

#[test]
fn test_build_infix_reference_example() {
    let (infix, tokens) = Lexer::new(
        "~amplicons | (South Africa[country] & cancer[disease]) | (Malawi[country] & Illumina[platform])",
    )
    .build_infix();

    assert_eq!(infix.to_string(), "A+(B*C)+(D*E)");
    assert_eq!(tokens[&Placeholder(0)], Atom::new("~amplicons", "all"));
    assert_eq!(tokens[&Placeholder(1)], Atom::new("South Africa", "country"));
    assert_eq!(tokens[&Placeholder(2)], Atom::new("cancer", "disease"));
    assert_eq!(tokens[&Placeholder(3)], Atom::new("Malawi", "country"));
    assert_eq!(tokens[&Placeholder(4)], Atom::new("Illumina", "platform"));
}

#[test]
fn test_build_infix_symbols() {
    let (infix, _) = Lexer::new("a&(b|c)").build_infix();
    assert_eq!(
        infix.symbols(),
        &[
            Symbol::Operand(Placeholder(0)),
            Symbol::Operator(riboquery::Operator::Multiply),
            Symbol::LParen,
            Symbol::Operand(Placeholder(1)),
            Symbol::Operator(riboquery::Operator::Add),
            Symbol::Operand(Placeholder(2)),
            Symbol::RParen,
        ]
    );
}

#[test]
fn test_build_infix_keyword_queries() {
    assert_eq!(infix_of("cancer[disease] AND Illumina[platform]"), "A*B");
    assert_eq!(infix_of("Malawi[country] OR Illumina[platform]"), "A+B");
    assert_eq!(infix_of("(a OR b) AND c"), "(A+B)*C");
}

#[test]
fn test_blank_atoms_are_skipped() {
    let (infix, tokens) = Lexer::new("a &   & b").build_infix();
    assert_eq!(infix.to_string(), "A**B");
    assert_eq!(tokens.len(), 2);

    let (infix, tokens) = Lexer::new("   ").build_infix();
    assert!(infix.is_empty());
    assert!(tokens.is_empty());
}

#[test]
fn test_more_than_26_atoms() {
    let query: Vec<String> = (0..30).map(|i| format!("term{}", i)).collect();
    let (infix, tokens) = Lexer::new(&query.join(" | ")).build_infix();

    assert_eq!(tokens.len(), 30);
    assert_eq!(tokens[&Placeholder(26)], Atom::new("term26", "all"));
    assert!(infix.to_string().ends_with("+Z+AA+AB+AC+AD"));
}

#[test]
fn test_placeholders_are_subset_of_token_map() {
    let queries = [
        "a",
        "a & b | c",
        "((a))",
        "a & & b",
        "x[y] | ( | z )",
        " & ",
        "a |",
        "~q[~r] & (s[t] | u)",
    ];

    for query in queries {
        let (infix, tokens) = Lexer::new(query).build_infix();
        for placeholder in infix.placeholders() {
            assert!(
                tokens.contains_key(&placeholder),
                "{} missing from token map for query: {}",
                placeholder,
                query
            );
        }
    }
}

#[test]
fn test_escaped_parentheses_stay_in_atoms() {
    let (infix, tokens) = Lexer::new(r"5\) UTR[GENE] | a\(b\)").build_infix();
    assert_eq!(infix.to_string(), "A+B");
    assert_eq!(tokens[&Placeholder(0)], Atom::new("5) UTR", "GENE"));
    assert_eq!(tokens[&Placeholder(1)], Atom::new("a(b)", "all"));
}
