//! In-memory inverted index with Okapi BM25 scoring.
//!
//! The index is a disposable, process-local cache derived from the document
//! store: it is built wholesale from a snapshot, immutable afterwards, and
//! replaced (never patched) on refresh. An empty build is a valid index that
//! simply returns no candidates.

use crate::tokenizer::tokenize;
use crate::types::{Candidate, Channel, Document};
use std::collections::HashMap;

pub type TermId = u32;

/// Term-frequency saturation.
const K1: f32 = 1.5;
/// Document-length normalization strength.
const B: f32 = 0.75;

#[derive(Debug, Clone)]
struct Posting {
    /// Ordinal of the document in insertion order.
    doc: u32,
    tf: u32,
}

#[derive(Default)]
pub struct LexicalIndex {
    dictionary: HashMap<String, TermId>,
    /// Postings per term id, each list ascending by doc ordinal.
    postings: Vec<Vec<Posting>>,
    doc_len: Vec<u32>,
    avg_doc_len: f32,
    /// Documents in insertion order; the ordinal doubles as the tie-break.
    docs: Vec<Document>,
    by_id: HashMap<String, usize>,
}

impl LexicalIndex {
    /// Build from a store snapshot. Duplicate ids keep the last occurrence's
    /// text but the first occurrence's ordinal, mirroring upsert semantics.
    pub fn build(documents: Vec<Document>) -> Self {
        let mut index = LexicalIndex::default();
        for doc in documents {
            match index.by_id.get(&doc.id) {
                Some(&ordinal) => index.docs[ordinal] = doc,
                None => {
                    index.by_id.insert(doc.id.clone(), index.docs.len());
                    index.docs.push(doc);
                }
            }
        }

        let mut total_len: u64 = 0;
        for (ordinal, doc) in index.docs.iter().enumerate() {
            let terms = tokenize(&doc.content);
            total_len += terms.len() as u64;
            index.doc_len.push(terms.len() as u32);

            let mut tf: HashMap<&str, u32> = HashMap::new();
            for term in &terms {
                *tf.entry(term.as_str()).or_insert(0) += 1;
            }
            let mut seen: Vec<(&str, u32)> = tf.into_iter().collect();
            // Dictionary growth order must not depend on hash iteration.
            seen.sort_unstable_by(|a, b| a.0.cmp(b.0));
            for (term, count) in seen {
                let next_id = index.dictionary.len() as TermId;
                let term_id = *index
                    .dictionary
                    .entry(term.to_string())
                    .or_insert(next_id);
                if term_id as usize == index.postings.len() {
                    index.postings.push(Vec::new());
                }
                index.postings[term_id as usize].push(Posting {
                    doc: ordinal as u32,
                    tf: count,
                });
            }
        }

        if !index.docs.is_empty() {
            index.avg_doc_len = total_len as f32 / index.docs.len() as f32;
        }
        index
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn get(&self, document_id: &str) -> Option<&Document> {
        self.by_id.get(document_id).map(|&ordinal| &self.docs[ordinal])
    }

    /// Top-k keyword candidates by descending BM25 score. Ties keep document
    /// insertion order; ranks are 1-based positions in the returned list.
    pub fn query(&self, text: &str, top_k: usize) -> Vec<Candidate> {
        if self.docs.is_empty() || top_k == 0 {
            return Vec::new();
        }
        let terms = tokenize(text);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut query_tf: HashMap<TermId, u32> = HashMap::new();
        for term in &terms {
            if let Some(&term_id) = self.dictionary.get(term.as_str()) {
                *query_tf.entry(term_id).or_insert(0) += 1;
            }
        }

        // Fixed accumulation order keeps float sums reproducible.
        let mut query_terms: Vec<(TermId, u32)> = query_tf.into_iter().collect();
        query_terms.sort_unstable_by_key(|&(term_id, _)| term_id);

        let n = self.docs.len() as f32;
        let mut scores: Vec<f32> = vec![0.0; self.docs.len()];
        for (term_id, query_count) in query_terms {
            let postings = &self.postings[term_id as usize];
            let df = postings.len() as f32;
            // Lucene-style floor keeps idf positive for very common terms.
            let idf = (1.0 + (n - df + 0.5) / (df + 0.5)).ln();
            for posting in postings {
                let tf = posting.tf as f32;
                let len_norm =
                    1.0 - B + B * self.doc_len[posting.doc as usize] as f32 / self.avg_doc_len;
                scores[posting.doc as usize] +=
                    query_count as f32 * idf * tf * (K1 + 1.0) / (tf + K1 * len_norm);
            }
        }

        let mut scored: Vec<(usize, f32)> = scores
            .into_iter()
            .enumerate()
            .filter(|&(_, score)| score > 0.0)
            .collect();
        // Stable sort: equal scores fall back to insertion order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        scored
            .into_iter()
            .enumerate()
            .map(|(position, (ordinal, score))| Candidate {
                document_id: self.docs[ordinal].id.clone(),
                channel: Channel::Sparse,
                rank: position + 1,
                raw_score: score,
            })
            .collect()
    }
}
