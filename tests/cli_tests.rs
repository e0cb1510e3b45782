// tests/cli_tests.rs

use riboquery::CompilerConfig;
use riboquery::cli::{
    self, CheckOptions, CheckResult, CliError, DocCategory, SchemaSource, SearchOptions,
};

const SAMPLES: &str = r#"[
    {"id": 1, "Run": "SRR1", "Disease": "cancer", "Platform": "Illumina HiSeq", "spots": 1200},
    {"id": 2, "Run": "SRR2", "Disease": "none", "Platform": "Illumina", "spots": null},
    {"id": 3, "Run": "SRR3", "Disease": "cancer", "Platform": "PacBio", "LIBRARYTYPE": "amplicons"}
]"#;

fn search_options(query: &str) -> SearchOptions {
    SearchOptions {
        query: query.to_string(),
        input: Some(SAMPLES.to_string()),
        ..Default::default()
    }
}

fn hit_runs(output: &serde_json::Value) -> Vec<String> {
    output
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Run"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_check_reports_each_stage() {
    let options = CheckOptions {
        query: "cancer[disease] AND Illumina[platform]".to_string(),
        ..Default::default()
    };

    match cli::execute_check(&options).unwrap() {
        CheckResult::Compiled(report) => {
            assert_eq!(report["normalized"], "cancer[disease] & Illumina[platform]");
            assert_eq!(report["infix"], "A*B");
            assert_eq!(report["postfix"], "A B *");
            assert_eq!(report["tokens"]["A"]["value"], "cancer");
            assert_eq!(report["tokens"]["B"]["field"], "platform");
            assert_eq!(
                report["predicate"],
                r#"(Disease ~ "cancer" AND Platform ~ "Illumina")"#
            );
        }
        CheckResult::SyntaxValid => panic!("Expected a compiled report"),
    }
}

#[test]
fn test_check_syntax_only() {
    let options = CheckOptions {
        query: "a | (b & c)".to_string(),
        syntax_only: true,
        ..Default::default()
    };
    assert!(matches!(
        cli::execute_check(&options).unwrap(),
        CheckResult::SyntaxValid
    ));

    let options = CheckOptions {
        query: "a | (b & c".to_string(),
        syntax_only: true,
        ..Default::default()
    };
    let err = cli::execute_check(&options).unwrap_err();
    assert!(err.to_string().contains("mismatching brackets"));
}

#[test]
fn test_check_unknown_model() {
    let options = CheckOptions {
        query: "x".to_string(),
        schema: SchemaSource::Preset("run".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        cli::execute_check(&options),
        Err(CliError::UnknownModel(m)) if m == "run"
    ));
}

#[test]
fn test_search_and() {
    let output = cli::execute_search(&search_options("cancer[disease] AND Illumina[platform]")).unwrap();
    assert_eq!(hit_runs(&output), ["SRR1"]);
    assert_eq!(output[0]["spots"], 1200);
}

#[test]
fn test_search_or() {
    let output = cli::execute_search(&search_options("none[disease] OR PacBio[platform]")).unwrap();
    assert_eq!(hit_runs(&output), ["SRR2", "SRR3"]);
    assert!(output[0]["spots"].is_null());
}

#[test]
fn test_search_negation() {
    let output = cli::execute_search(&search_options("~amplicons")).unwrap();
    assert_eq!(hit_runs(&output), ["SRR1", "SRR2"]);

    let mut options = search_options("~amplicons");
    options.config = CompilerConfig {
        negate_fallback: false,
    };
    let output = cli::execute_search(&options).unwrap();
    assert_eq!(hit_runs(&output), ["SRR3"]);
}

#[test]
fn test_search_with_facets_and_selection() {
    let mut options = search_options("");
    options.facets = Some("Disease=cancer&Disease=none&page=2".to_string());
    let output = cli::execute_search(&options).unwrap();
    assert_eq!(hit_runs(&output), ["SRR1", "SRR2", "SRR3"]);

    options.select = Some("Platform=PacBio".to_string());
    let output = cli::execute_search(&options).unwrap();
    assert_eq!(hit_runs(&output), ["SRR3"]);

    options.query = "Illumina".to_string();
    let output = cli::execute_search(&options).unwrap();
    assert!(hit_runs(&output).is_empty());
}

#[test]
fn test_search_requires_input() {
    let options = SearchOptions {
        query: "x".to_string(),
        ..Default::default()
    };
    assert!(matches!(cli::execute_search(&options), Err(CliError::NoInput)));
}

#[test]
fn test_search_rejects_bad_json() {
    let mut options = search_options("x");
    options.input = Some("[{".to_string());
    assert!(matches!(cli::execute_search(&options), Err(CliError::Json(_))));

    options.input = Some("[1, 2]".to_string());
    assert!(matches!(
        cli::execute_search(&options),
        Err(CliError::NotARecord(kind)) if kind == "number"
    ));
}

#[test]
fn test_search_single_object_input() {
    let mut options = search_options("SRR9");
    options.input = Some(r#"{"Run": "SRR9", "Platform": "Illumina"}"#.to_string());
    let output = cli::execute_search(&options).unwrap();
    assert_eq!(hit_runs(&output), ["SRR9"]);
}

#[test]
fn test_schema_file() {
    let path = std::env::temp_dir().join(format!("riboquery-schema-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"name": "runs", "fields": ["Run", "Disease"], "excluded": ["Run"]}"#,
    )
    .unwrap();

    let mut options = search_options("SRR1");
    options.schema = SchemaSource::File(path.clone());
    let output = cli::execute_search(&options).unwrap();
    // Run is excluded, so nothing matches the run accession.
    assert!(hit_runs(&output).is_empty());

    std::fs::remove_file(&path).unwrap();

    assert!(matches!(options.schema.load(), Err(CliError::Io(_))));
}

#[test]
fn test_docs() {
    assert!(cli::get_docs_overview().contains("DOCUMENTATION CATEGORIES"));
    assert!(cli::get_doc_category("operators").unwrap().contains("AND binds tighter"));
    assert!(cli::get_doc_category("NOT").unwrap().starts_with("NEGATION"));
    assert_eq!(DocCategory::from_name("Fields"), Some(DocCategory::Fields));
    assert!(matches!(
        cli::get_doc_category("methods"),
        Err(CliError::UnknownCategory(c)) if c == "methods"
    ));
}
