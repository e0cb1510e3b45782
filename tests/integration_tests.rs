use riboquery::{
    CompilerConfig, MemoryStore, ParseError, Predicate, QueryCompiler, QueryError, Record,
    RecordStore, Schema,
};

fn sample(run: &str, country: &str, disease: &str, platform: &str, library: &str) -> Record {
    Record::new()
        .with("id", 77_i64)
        .with("verified", true)
        .with("Run", run)
        .with("country", country)
        .with("disease", disease)
        .with("platform", platform)
        .with("library", library)
}

fn schema() -> Schema {
    Schema::new(
        "sample",
        ["id", "verified", "Run", "country", "disease", "platform", "library"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )
}

fn fixture() -> MemoryStore {
    vec![
        sample("SRR001", "Malawi", "Breast Cancer", "ABI SOLiD", "Ribo-Seq"),
        sample("SRR002", "South Africa", "cancer", "Illumina HiSeq", "Ribo-Seq"),
        sample("SRR003", "Malawi", "healthy", "Illumina NovaSeq", "amplicons"),
        sample("SRR004", "Kenya", "diabetes", "BGISEQ", "RNA-Seq"),
        sample("SRR005", "Peru", "none", "PacBio", "Amplicons panel"),
        sample("SRR006", "Japan", "lung carcinoma", "Illumina", "Ribo-Seq"),
    ]
    .into_iter()
    .collect()
}

fn runs(hits: &[&Record]) -> Vec<String> {
    hits.iter().filter_map(|r| r.text("Run")).collect()
}

fn search(query: &str) -> Result<Vec<String>, QueryError> {
    let schema = schema();
    let store = fixture();
    let compiler = QueryCompiler::new(&schema);
    compiler.search(&store, query).map(|hits| runs(&hits))
}

#[test]
fn test_and_query_is_intersection() {
    assert_eq!(search("cancer[disease] AND Illumina[platform]").unwrap(), ["SRR002"]);
    assert_eq!(search("cancer[disease] & illumina[platform]").unwrap(), ["SRR002"]);
}

#[test]
fn test_or_query_is_union() {
    assert_eq!(
        search("Malawi[country] OR Illumina[platform]").unwrap(),
        ["SRR001", "SRR002", "SRR003", "SRR006"]
    );
}

#[test]
fn test_single_condition_sets() {
    assert_eq!(search("Malawi[country]").unwrap(), ["SRR001", "SRR003"]);
    assert_eq!(
        search("Illumina[platform]").unwrap(),
        ["SRR002", "SRR003", "SRR006"]
    );
}

#[test]
fn test_grouped_query() {
    assert_eq!(
        search("(Malawi[country] OR Kenya[country]) AND Ribo[library]").unwrap(),
        ["SRR001"]
    );
    assert_eq!(
        search("Kenya[country] OR (Malawi[country] AND Illumina[platform])").unwrap(),
        ["SRR003", "SRR004"]
    );
}

#[test]
fn test_bare_value_searches_every_searchable_field() {
    assert_eq!(search("malawi").unwrap(), ["SRR001", "SRR003"]);
    assert_eq!(search("SRR004").unwrap(), ["SRR004"]);
}

#[test]
fn test_excluded_fields_are_not_searched() {
    // Every record has verified = true and id = 77.
    assert!(search("true").unwrap().is_empty());
    assert!(search("77[id]").unwrap().is_empty());
}

#[test]
fn test_negated_bare_value_excludes_matches() {
    assert_eq!(
        search("~amplicons").unwrap(),
        ["SRR001", "SRR002", "SRR004", "SRR006"]
    );
}

#[test]
fn test_negated_bare_value_with_legacy_negation() {
    let schema = schema();
    let store = fixture();
    let compiler = QueryCompiler::new(&schema).with_config(CompilerConfig {
        negate_fallback: false,
    });

    let hits = compiler.search(&store, "~amplicons").unwrap();
    assert_eq!(runs(&hits), ["SRR003", "SRR005"]);
}

#[test]
fn test_negated_field() {
    assert_eq!(
        search("Ribo[~library] AND Illumina[platform]").unwrap(),
        ["SRR003"]
    );
}

#[test]
fn test_stray_negation_marker_does_not_empty_results() {
    assert_eq!(search("cancer[disease] & ~").unwrap(), ["SRR001", "SRR002"]);
    assert_eq!(search("~ | Kenya[country]").unwrap(), ["SRR004"]);
}

#[test]
fn test_blank_query_returns_everything() {
    assert_eq!(search("").unwrap().len(), 6);
    assert_eq!(search("\"\"").unwrap().len(), 6);
}

#[test]
fn test_unbalanced_query_is_rejected() {
    let err = search("cancer | (Malawi[country] & Illumina").unwrap_err();
    assert_eq!(
        err,
        QueryError::Parse(ParseError::UnbalancedBrackets {
            query: "cancer | (Malawi[country] & Illumina".to_string()
        })
    );
    assert_eq!(
        err.to_string(),
        "Invalid query (mismatching brackets): 'cancer | (Malawi[country] & Illumina'"
    );

    // Deterministic across calls.
    assert_eq!(search("a | (b & c").unwrap_err(), search("a | (b & c").unwrap_err());
    assert!(matches!(
        search("a) | (b"),
        Err(QueryError::Parse(ParseError::UnbalancedBrackets { .. }))
    ));
}

#[test]
fn test_escaped_brackets_are_searched_literally() {
    let schema = schema();
    let store: MemoryStore = vec![
        sample("SRR101", "Peru", "none", "Illumina", "5) UTR"),
        sample("SRR102", "Peru", "none", "Illumina", "(3 UTR"),
    ]
    .into_iter()
    .collect();
    let compiler = QueryCompiler::new(&schema);

    let hits = compiler.search(&store, r"5\) UTR[library]").unwrap();
    assert_eq!(runs(&hits), ["SRR101"]);

    let hits = compiler.search(&store, r"\(3 UTR | 5\) UTR").unwrap();
    assert_eq!(runs(&hits), ["SRR101", "SRR102"]);

    assert!(matches!(
        compiler.compile("5) UTR[library]"),
        Err(QueryError::Parse(ParseError::UnbalancedBrackets { .. }))
    ));
}

#[test]
fn test_compiled_query_stages() {
    let schema = schema();
    let compiler = QueryCompiler::new(&schema);
    let compiled = compiler
        .compile("\"~amplicons OR (South Africa[country] AND cancer[disease])\"")
        .unwrap();

    assert_eq!(compiled.normalized, "~amplicons | (South Africa[country] & cancer[disease])");
    assert_eq!(compiled.infix.to_string(), "A+(B*C)");
    assert_eq!(compiled.postfix.to_string(), "A B C * +");
    assert_eq!(compiled.tokens.len(), 3);
    assert!(matches!(compiled.predicate, Predicate::Or(_, _)));
}

#[test]
fn test_more_than_26_terms() {
    let terms: Vec<String> = (0..40).map(|i| format!("nothing{}", i)).collect();
    let query = format!("{} OR SRR005", terms.join(" OR "));
    assert_eq!(search(&query).unwrap(), ["SRR005"]);

    let schema = schema();
    let compiled = QueryCompiler::new(&schema).compile(&query).unwrap();
    assert_eq!(compiled.tokens.len(), 41);
    assert!(compiled.infix.to_string().contains("+AO"));
}

#[test]
fn test_preset_schemas() {
    let store: MemoryStore = vec![
        Record::new()
            .with("Run", "SRR1")
            .with("Disease", "cancer")
            .with("Platform", "Illumina")
            .with("BioProject", "PRJNA1"),
        Record::new()
            .with("Run", "SRR2")
            .with("Disease", "none")
            .with("Platform", "Illumina")
            .with("BioProject", "PRJNA2"),
    ]
    .into_iter()
    .collect();

    let schema = Schema::sample();
    let compiler = QueryCompiler::new(&schema);
    let hits = compiler.search(&store, "cancer[disease] AND Illumina[platform]").unwrap();
    assert_eq!(runs(&hits), ["SRR1"]);

    // BioProject is not searchable on samples.
    assert!(compiler.search(&store, "PRJNA1").unwrap().is_empty());
}

#[test]
fn test_compiler_shared_across_threads() {
    let schema = schema();
    let store = fixture();
    let compiler = QueryCompiler::new(&schema);

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["Malawi[country]", "Illumina[platform]", "~amplicons"]
            .into_iter()
            .map(|q| {
                let compiler = &compiler;
                let store = &store;
                scope.spawn(move || compiler.search(store, q).map(|h| h.len()))
            })
            .collect();

        let counts: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert_eq!(counts, [2, 3, 4]);
    });
}

#[test]
fn test_store_filter_with_hand_built_predicate() {
    let store = fixture();
    let predicate = Predicate::contains("country", "malawi").negate();
    assert_eq!(store.filter(&predicate).len(), 4);
    assert_eq!(store.filter(&Predicate::Everything).len(), store.len());
}
