use rozgar_core::index::LexicalIndex;
use rozgar_core::store::DocumentStore;
use rozgar_core::types::{ContentType, Document};
use tempfile::tempdir;

#[test]
fn upsert_then_list_round_trips() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::open(dir.path()).unwrap();

    let doc = Document::new("job-1", "Electrician vacancy, Ludhiana", ContentType::Job)
        .with_meta("source", "jobs_govt");
    store.upsert(&doc).unwrap();

    let listed = store.list(ContentType::Job).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], doc);
}

#[test]
fn ids_partition_by_content_type() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::open(dir.path()).unwrap();

    // Same natural id under two types is two distinct documents.
    store.upsert(&Document::new("1", "job text", ContentType::Job)).unwrap();
    store.upsert(&Document::new("1", "faq text", ContentType::Faq)).unwrap();

    assert_eq!(store.list(ContentType::Job).unwrap().len(), 1);
    assert_eq!(store.list(ContentType::Faq).unwrap().len(), 1);
    assert_eq!(store.list_all().unwrap().len(), 2);
}

#[test]
fn double_ingest_updates_in_place() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::open(dir.path()).unwrap();

    store
        .upsert(&Document::new("job-9", "Old posting text", ContentType::Job))
        .unwrap();
    store
        .upsert(&Document::new("job-9", "Corrected posting text", ContentType::Job))
        .unwrap();

    let listed = store.list(ContentType::Job).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "Corrected posting text");

    // The rebuilt index sees exactly one entry as well.
    let index = LexicalIndex::build(store.list_all().unwrap());
    assert_eq!(index.len(), 1);
    assert!(index.get("job-9").unwrap().content.contains("Corrected"));
}

#[test]
fn list_all_groups_types_in_declaration_order() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::open(dir.path()).unwrap();

    store.upsert(&Document::new("n1", "news item", ContentType::News)).unwrap();
    store.upsert(&Document::new("j1", "job item", ContentType::Job)).unwrap();
    store.upsert(&Document::new("s1", "scheme item", ContentType::Scheme)).unwrap();

    let all = store.list_all().unwrap();
    let types: Vec<ContentType> = all.iter().map(|d| d.content_type).collect();
    assert_eq!(types, [ContentType::Job, ContentType::Scheme, ContentType::News]);
}
