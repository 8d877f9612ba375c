use std::path::Path;
use std::sync::Arc;

use tantivy::{doc, Index};
use tempfile::TempDir;

use lookup_core::error::Error;
use lookup_core::types::LookupOutcome;
use lookup_index::{
    artifact_schema, into_artifacts, into_findings, run_lookups, ArtifactIndex, BatchConfig,
};

/// Build a fixture index with one document per `[u, i, m, n, d]` row.
fn build_index(dir: &Path, docs: &[[&str; 5]]) {
    let schema = artifact_schema();
    let index = Index::create_in_dir(dir, schema.clone()).expect("create index");
    let mut writer = index.writer(50_000_000).expect("writer");
    let u = schema.get_field("u").expect("u");
    let i = schema.get_field("i").expect("i");
    let m = schema.get_field("m").expect("m");
    let n = schema.get_field("n").expect("n");
    let d = schema.get_field("d").expect("d");
    for row in docs {
        writer
            .add_document(doc!(
                u => row[0], i => row[1], m => row[2], n => row[3], d => row[4],
            ))
            .expect("add document");
    }
    writer.commit().expect("commit");
}

fn run_batch(dir: &Path, ids: &[&str], config: &BatchConfig) -> Vec<LookupOutcome> {
    let index = Arc::new(ArtifactIndex::open(dir).expect("open index"));
    let ids: Vec<String> = ids.iter().map(|s| (*s).to_string()).collect();
    tokio::runtime::Runtime::new()
        .expect("runtime")
        .block_on(run_lookups(index, ids, config))
        .expect("batch run")
}

#[test]
fn delimited_hit_returns_stored_fields_with_positive_score() {
    let tmp = TempDir::new().expect("tempdir");
    build_index(tmp.path(), &[["a|X123|b", "g:a", "1.0", "name", "desc"]]);

    let outcomes = run_batch(tmp.path(), &["X123"], &BatchConfig::default());
    assert_eq!(outcomes.len(), 1);
    let artifact = outcomes[0].artifact.as_ref().expect("hit expected");
    assert_eq!(artifact.coordinates, "a|X123|b");
    assert!(artifact.score > 0.0);
}

#[test]
fn end_to_end_foo_and_bar() {
    let tmp = TempDir::new().expect("tempdir");
    build_index(tmp.path(), &[["x|foo|y", "g:a", "1.0", "name", "desc"]]);

    let outcomes = run_batch(tmp.path(), &["foo", "bar"], &BatchConfig::default());
    assert_eq!(outcomes.len(), 2, "one outcome per input identifier");

    let results = into_artifacts(outcomes);
    assert_eq!(results.len(), 1, "nothing emitted for bar");
    assert_eq!(results[0].coordinates, "x|foo|y");
    assert_eq!(results[0].info, "g:a");
    assert_eq!(results[0].modified, "1.0");
    assert_eq!(results[0].name, "name");
    assert_eq!(results[0].description, "desc");
    assert!(results[0].score > 0.0);
}

#[test]
fn no_match_is_filtered_not_an_error() {
    let tmp = TempDir::new().expect("tempdir");
    build_index(tmp.path(), &[["x|foo|y", "", "", "", ""]]);

    let outcomes = run_batch(tmp.path(), &["missing"], &BatchConfig::default());
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].artifact.is_none());
    assert_eq!(outcomes[0].total_hits, 0);
    assert!(into_artifacts(outcomes).is_empty());
}

#[test]
fn result_batch_never_exceeds_input() {
    let tmp = TempDir::new().expect("tempdir");
    build_index(
        tmp.path(),
        &[["x|id0|y", "", "", "", ""], ["x|id2|y", "", "", "", ""]],
    );

    let ids = ["id0", "id1", "id2", "id3", "id4"];
    let results = into_artifacts(run_batch(tmp.path(), &ids, &BatchConfig::default()));
    assert!(results.len() <= ids.len());
    assert_eq!(results.len(), 2);
    for artifact in &results {
        assert!(
            ids.iter().any(|id| artifact.coordinates.contains(&format!("|{}|", id))),
            "every result corresponds to an input identifier"
        );
    }
}

#[test]
fn pool_width_one_and_many_agree() {
    let tmp = TempDir::new().expect("tempdir");
    let docs: Vec<[String; 5]> = (0..10)
        .map(|k| {
            [
                format!("grp|art{}|1.{}", k, k),
                format!("g:{}", k),
                "1.0".to_string(),
                format!("artifact {}", k),
                String::new(),
            ]
        })
        .collect();
    let doc_refs: Vec<[&str; 5]> = docs
        .iter()
        .map(|row| [row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str(), row[4].as_str()])
        .collect();
    build_index(tmp.path(), &doc_refs);

    let ids: Vec<String> = (0..20).map(|k| format!("art{}", k)).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let serial = BatchConfig { parallelism: 1, ..BatchConfig::default() };
    let wide = BatchConfig { parallelism: 8, ..BatchConfig::default() };
    let mut serial_hits: Vec<String> = into_artifacts(run_batch(tmp.path(), &id_refs, &serial))
        .into_iter()
        .map(|a| a.coordinates)
        .collect();
    let mut wide_hits: Vec<String> = into_artifacts(run_batch(tmp.path(), &id_refs, &wide))
        .into_iter()
        .map(|a| a.coordinates)
        .collect();
    serial_hits.sort();
    wide_hits.sort();
    assert_eq!(serial_hits.len(), 10);
    assert_eq!(serial_hits, wide_hits, "pool width must not change the result set");
}

#[test]
fn empty_input_yields_empty_batch() {
    let tmp = TempDir::new().expect("tempdir");
    build_index(tmp.path(), &[["x|foo|y", "", "", "", ""]]);

    let outcomes = run_batch(tmp.path(), &[], &BatchConfig::default());
    assert!(outcomes.is_empty());
    assert!(into_artifacts(outcomes).is_empty());
}

#[test]
fn finding_count_is_bounded_by_limit() {
    let tmp = TempDir::new().expect("tempdir");
    build_index(
        tmp.path(),
        &[
            ["a|dup|1", "", "", "", ""],
            ["b|dup|2", "", "", "", ""],
            ["c|dup|3", "", "", "", ""],
        ],
    );

    let roomy = BatchConfig { limit: 10, ..BatchConfig::default() };
    let findings = into_findings(run_batch(tmp.path(), &["dup"], &roomy));
    assert_eq!(findings.len(), 1, "one finding per identifier");
    assert_eq!(findings[0].number_of_findings, 3);

    let tight = BatchConfig { limit: 2, ..BatchConfig::default() };
    let findings = into_findings(run_batch(tmp.path(), &["dup"], &tight));
    assert_eq!(findings[0].number_of_findings, 2, "count is capped at the limit");
}

#[test]
fn metacharacter_identifiers_match_literally() {
    let tmp = TempDir::new().expect("tempdir");
    build_index(
        tmp.path(),
        &[["lib|a.b|1", "", "", "", ""], ["lib|aXb|1", "", "", "", ""]],
    );

    let results = into_artifacts(run_batch(tmp.path(), &["a.b"], &BatchConfig::default()));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].coordinates, "lib|a.b|1", "dot must not match aXb");
}

#[test]
fn missing_index_path_is_an_open_error() {
    let tmp = TempDir::new().expect("tempdir");
    let bogus = tmp.path().join("no-such-index");
    let err = ArtifactIndex::open(&bogus).expect_err("open must fail");
    assert!(
        matches!(err.downcast_ref::<Error>(), Some(Error::IndexOpen(_, _))),
        "unexpected error: {:?}",
        err
    );
}
