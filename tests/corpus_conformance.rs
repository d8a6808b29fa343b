//! Corpus-based conformance tests.
//!
//! Runs every vector from `tests/corpus/parse_vectors.json`. Each vector names
//! an input, the expected type of the parsed value (or `invalid` when the
//! parse must fail) and, for successful parses, the expected canonical dump.

use std::path::Path;

use jsonplus::{parse, parse_reader};
use serde::Deserialize;

/// Path to the corpus file relative to the project root.
const CORPUS_PATH: &str = "tests/corpus/parse_vectors.json";

#[derive(Debug, Deserialize)]
struct Corpus {
    format_version: String,
    vectors: Vec<Vector>,
}

#[derive(Debug, Deserialize)]
struct Vector {
    id: String,
    input: String,
    #[serde(rename = "type")]
    expected_type: String,
    dump: Option<String>,
}

fn load_corpus() -> Corpus {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(CORPUS_PATH);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read corpus at {:?}: {}", path, e));
    serde_json::from_str(&text).expect("Failed to parse corpus")
}

/// Outcome of one vector, rendered as `type` or `type dump`.
fn describe(result: Option<jsonplus::Value>) -> String {
    match result {
        None => "invalid".to_string(),
        Some(value) => format!("{} {}", value.type_of(), value.dump()),
    }
}

fn expected(vector: &Vector) -> String {
    match &vector.dump {
        None => vector.expected_type.clone(),
        Some(dump) => format!("{} {}", vector.expected_type, dump),
    }
}

#[test]
fn test_corpus_manifest() {
    let corpus = load_corpus();
    assert_eq!(corpus.format_version, "parse-vectors-v1");
    assert!(!corpus.vectors.is_empty());

    let mut ids: Vec<_> = corpus.vectors.iter().map(|v| v.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), corpus.vectors.len(), "vector ids must be unique");
}

#[test]
fn test_full_corpus() {
    let corpus = load_corpus();

    let failures: Vec<String> = corpus
        .vectors
        .iter()
        .filter_map(|vector| {
            let actual = describe(parse(&vector.input));
            let want = expected(vector);
            (actual != want).then(|| {
                format!(
                    "  {} - input {:?}: expected {}, actual {}",
                    vector.id, vector.input, want, actual
                )
            })
        })
        .collect();

    println!(
        "Corpus: {} vectors, {} failures",
        corpus.vectors.len(),
        failures.len()
    );
    assert!(
        failures.is_empty(),
        "Corpus conformance failed:\n{}",
        failures.join("\n")
    );
}

#[test]
fn test_corpus_through_reader() {
    let corpus = load_corpus();
    for vector in &corpus.vectors {
        assert_eq!(
            describe(parse_reader(vector.input.as_bytes())),
            expected(vector),
            "vector {}",
            vector.id
        );
    }
}

#[test]
fn test_corpus_dumps_are_fixed_points() {
    // Parsing a canonical dump and dumping again changes nothing.
    let corpus = load_corpus();
    for vector in &corpus.vectors {
        let Some(dump) = &vector.dump else { continue };
        let reparsed = parse(dump).unwrap_or_else(|| panic!("vector {} dump did not parse", vector.id));
        assert_eq!(&reparsed.dump(), dump, "vector {}", vector.id);
    }
}
