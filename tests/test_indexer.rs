//! Integration tests for the CSV indexer against a mock search index.

mod mocks;

use deed_archive::error::IndexError;
use deed_archive::services::{read_rows, BULK_BATCH_SIZE};
use deed_archive::{IndexerService, Metrics, SearchIndex};
use mocks::MockSearchIndex;
use std::io::Write;
use std::sync::Arc;

const CSV: &str = "\
Document ID,Document Text,Document Type,Grantors,Grantees,Legal Authorities,Acreage,Boundaries,Lot Info,City,County,Province/Colony,Execution Date,Recording Date
B-12,Know all men by these presents,Deed,Thomas Penn,William Allen,John Smith J.P.,200 acres,North by the creek,Lot 4,Philadelphia,Philadelphia,Pennsylvania,\"March 3, 1755\",Not specified
B-13,,Mortgage,,,,,,,,Bucks,Pennsylvania,garbage,\"June 21, 1760\"
";

fn indexer(index: &MockSearchIndex) -> IndexerService {
    IndexerService::new(
        Arc::new(index.clone()) as Arc<dyn SearchIndex>,
        "land_deeds",
        Metrics::new(),
    )
}

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_ensure_index_creates_once() {
    let index = MockSearchIndex::new();
    let service = indexer(&index);

    assert!(service.ensure_index().unwrap());
    assert!(!service.ensure_index().unwrap());

    assert_eq!(index.get_call_count("create_index"), 1);
    let body = index.created_body("land_deeds").unwrap();
    assert_eq!(
        body["mappings"]["properties"]["recording_date"]["type"],
        "date"
    );
}

#[test]
fn test_existing_index_is_left_untouched() {
    let index = MockSearchIndex::new().with_existing_index("land_deeds");
    let file = write_csv(CSV);

    indexer(&index).load_csv(file.path()).unwrap();

    assert_eq!(index.get_call_count("create_index"), 0);
    assert_eq!(index.get_call_count("bulk_index"), 1);
}

#[test]
fn test_load_csv_normalizes_rows() {
    let index = MockSearchIndex::new();
    let file = write_csv(CSV);

    let summary = indexer(&index).load_csv(file.path()).unwrap();

    assert_eq!(summary.indexed, 2);
    assert_eq!(index.get_call_count("ping"), 1);

    let first = index.document("B-12").unwrap();
    assert_eq!(first.grantors, "Thomas Penn");
    assert_eq!(first.province_colony, "Pennsylvania");
    assert_eq!(first.execution_date.as_deref(), Some("1755-03-03"));
    assert_eq!(first.recording_date, None);

    let second = index.document("B-13").unwrap();
    assert_eq!(second.document_text, "");
    assert_eq!(second.grantors, "");
    assert_eq!(second.execution_date, None);
    assert_eq!(second.recording_date.as_deref(), Some("1760-06-21"));
}

#[test]
fn test_reload_overwrites_by_document_id() {
    let index = MockSearchIndex::new();
    let service = indexer(&index);

    let first = write_csv("Document ID,City\nB-1,Chester\nB-2,Bristol\n");
    let second = write_csv("Document ID,City\nB-2,Burlington\n");
    service.load_csv(first.path()).unwrap();
    service.load_csv(second.path()).unwrap();

    assert_eq!(index.document_count(), 2);
    assert_eq!(index.document("B-2").unwrap().city, "Burlington");
}

#[test]
fn test_unreachable_cluster_fails_after_ping() {
    let index = MockSearchIndex::unreachable();
    let file = write_csv(CSV);

    let result = indexer(&index).load_csv(file.path());

    assert!(matches!(result, Err(IndexError::Api(_))));
    assert_eq!(index.get_call_count("ping"), 1);
    assert_eq!(index.get_call_count("bulk_index"), 0);
}

#[test]
fn test_missing_csv_is_an_error() {
    let index = MockSearchIndex::new();
    let result = indexer(&index).load_csv(std::path::Path::new("/nonexistent/deeds.csv"));

    assert!(matches!(result, Err(IndexError::Csv(_))));
    assert_eq!(index.get_call_count("ping"), 0);
}

#[test]
fn test_read_rows_ignores_unknown_columns() {
    let rows = read_rows("Document ID,Reviewer\nB-77,Ann\n".as_bytes()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].document_id.as_deref(), Some("B-77"));
}

#[test]
fn test_large_load_is_sent_in_batches() {
    let index = MockSearchIndex::new().with_existing_index("land_deeds");
    let metrics = Metrics::new();
    let service = IndexerService::new(
        Arc::new(index.clone()) as Arc<dyn SearchIndex>,
        "land_deeds",
        metrics.clone(),
    );

    let mut csv = String::from("Document ID,City\n");
    for n in 0..1201 {
        csv.push_str(&format!("B-{},Chester\n", n));
    }
    let rows = read_rows(csv.as_bytes()).unwrap();

    let summary = service.load_rows(rows).unwrap();

    assert_eq!(index.get_call_count("bulk_index"), 3);
    assert_eq!(index.max_batch_len(), BULK_BATCH_SIZE);
    assert_eq!(summary.indexed, 1201);
    assert_eq!(index.document_count(), 1201);
    assert_eq!(metrics.summary().documents_indexed_total, 1201);
}

#[test]
fn test_batch_summaries_are_merged() {
    let index = MockSearchIndex::new().with_existing_index("land_deeds");
    index.reject_ids(&["B-3", "B-700"]);

    let mut csv = String::from("Document ID\n");
    for n in 0..800 {
        csv.push_str(&format!("B-{}\n", n));
    }
    let summary = indexer(&index)
        .load_rows(read_rows(csv.as_bytes()).unwrap())
        .unwrap();

    assert_eq!(index.get_call_count("bulk_index"), 2);
    assert_eq!(summary.indexed, 798);
    assert_eq!(summary.failed, 2);
    assert_eq!(
        summary.errors,
        vec!["B-3: rejected".to_string(), "B-700: rejected".to_string()]
    );
}
