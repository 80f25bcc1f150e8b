use rozgar_core::index::LexicalIndex;
use rozgar_core::types::{ContentType, Document};

fn doc(id: &str, content: &str) -> Document {
    Document::new(id, content, ContentType::Job)
}

fn corpus() -> Vec<Document> {
    vec![
        doc("j1", "Electrician vacancy in Ludhiana. ITI qualification required."),
        doc("j2", "Data entry operator job in Amritsar. Typing skills required."),
        doc("j3", "Electrician and wireman jobs, government sector, Ludhiana district."),
        doc("j4", "Staff nurse recruitment, civil hospital, Patiala."),
    ]
}

#[test]
fn ranks_by_term_overlap() {
    let index = LexicalIndex::build(corpus());
    let hits = index.query("electrician ludhiana", 4);
    assert!(!hits.is_empty());
    // Both electrician docs must outrank the unrelated ones.
    let top_ids: Vec<&str> = hits.iter().take(2).map(|c| c.document_id.as_str()).collect();
    assert!(top_ids.contains(&"j1"));
    assert!(top_ids.contains(&"j3"));
    // Ranks are 1-based and sequential.
    for (i, hit) in hits.iter().enumerate() {
        assert_eq!(hit.rank, i + 1);
    }
}

#[test]
fn scores_descend() {
    let index = LexicalIndex::build(corpus());
    let hits = index.query("electrician vacancy ludhiana", 4);
    for pair in hits.windows(2) {
        assert!(pair[0].raw_score >= pair[1].raw_score);
    }
}

#[test]
fn empty_index_returns_no_candidates() {
    let index = LexicalIndex::build(Vec::new());
    assert!(index.is_empty());
    assert!(index.query("anything", 5).is_empty());
}

#[test]
fn unknown_terms_return_no_candidates() {
    let index = LexicalIndex::build(corpus());
    assert!(index.query("xylophone zeppelin", 5).is_empty());
}

#[test]
fn truncates_to_top_k() {
    let index = LexicalIndex::build(corpus());
    let hits = index.query("job vacancy recruitment required", 2);
    assert!(hits.len() <= 2);
}

#[test]
fn rebuild_from_same_snapshot_is_idempotent() {
    let first = LexicalIndex::build(corpus());
    let second = LexicalIndex::build(corpus());
    let a = first.query("electrician jobs ludhiana", 4);
    let b = second.query("electrician jobs ludhiana", 4);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.document_id, y.document_id);
        assert_eq!(x.rank, y.rank);
        assert_eq!(x.raw_score, y.raw_score);
    }
}

#[test]
fn repeated_queries_are_deterministic() {
    let index = LexicalIndex::build(corpus());
    let first = index.query("government jobs", 4);
    for _ in 0..5 {
        let again = index.query("government jobs", 4);
        let ids: Vec<_> = again.iter().map(|c| c.document_id.clone()).collect();
        let expected: Vec<_> = first.iter().map(|c| c.document_id.clone()).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn duplicate_ids_collapse_to_last_write() {
    let mut docs = corpus();
    docs.push(doc("j1", "Updated electrician posting, Ludhiana, new deadline."));
    let index = LexicalIndex::build(docs);
    assert_eq!(index.len(), 4);
    let stored = index.get("j1").unwrap();
    assert!(stored.content.contains("Updated"));
}

#[test]
fn equal_scores_keep_insertion_order() {
    let index = LexicalIndex::build(vec![
        doc("a", "welding workshop"),
        doc("b", "welding workshop"),
        doc("c", "welding workshop"),
    ]);
    let hits = index.query("welding", 3);
    let ids: Vec<&str> = hits.iter().map(|c| c.document_id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}
