//! Dual-channel retrieval with rank fusion.
//!
//! The retriever owns the lexical index behind a swappable handle: `rebuild`
//! constructs a fresh index off to the side and swaps the `Arc`, so readers
//! mid-query keep scoring against the instance they started with. The dense
//! channel is an external collaborator queried under a deadline; either
//! channel failing narrows the search instead of failing the request.

use parking_lot::RwLock;
use rozgar_core::fusion::reciprocal_rank_fusion;
use rozgar_core::index::LexicalIndex;
use rozgar_core::traits::{DenseHit, DenseIndex};
use rozgar_core::types::{Candidate, Channel, ContentType, Document};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_CHANNEL_TIMEOUT: Duration = Duration::from_secs(2);

/// Served when both channels come back empty; the caller must never see an
/// error for "nothing indexed yet".
pub fn fallback_document() -> Document {
    Document::new(
        "fallback",
        "I can help you find government and private jobs in Punjab. \
         Please specify your qualifications and location.",
        ContentType::Faq,
    )
    .with_meta("source", "system")
}

pub struct HybridRetriever {
    dense: Box<dyn DenseIndex>,
    index: RwLock<Arc<LexicalIndex>>,
    channel_timeout: Duration,
}

impl HybridRetriever {
    /// Starts with an empty lexical index; call `rebuild` once the document
    /// store has been read.
    pub fn new(dense: Box<dyn DenseIndex>) -> Self {
        Self::with_timeout(dense, DEFAULT_CHANNEL_TIMEOUT)
    }

    pub fn with_timeout(dense: Box<dyn DenseIndex>, channel_timeout: Duration) -> Self {
        Self {
            dense,
            index: RwLock::new(Arc::new(LexicalIndex::build(Vec::new()))),
            channel_timeout,
        }
    }

    /// Build a new index from a store snapshot and atomically replace the
    /// one readers see. In-flight queries finish against the old instance.
    pub fn rebuild(&self, documents: Vec<Document>) -> usize {
        let next = LexicalIndex::build(documents);
        let count = next.len();
        *self.index.write() = Arc::new(next);
        tracing::info!(documents = count, "lexical index rebuilt");
        count
    }

    pub fn index_size(&self) -> usize {
        self.index.read().len()
    }

    /// Hybrid search: dense and sparse candidates fused by reciprocal rank,
    /// degraded to whichever channel is available, `scope` narrowing the
    /// sparse channel by content type. Returns at most `top_k` documents and
    /// never an error.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        scope: Option<&[ContentType]>,
    ) -> Vec<Document> {
        let index = self.index.read().clone();

        // The two channels have no mutual ordering; fusion waits for both.
        let (dense_outcome, sparse) = tokio::join!(
            tokio::time::timeout(self.channel_timeout, self.dense.query(query, top_k)),
            async { index.query(query, top_k) },
        );

        let dense_hits: Vec<DenseHit> = match dense_outcome {
            Ok(Ok(hits)) => hits,
            Ok(Err(error)) => {
                tracing::warn!(%error, "dense channel unavailable, using sparse only");
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.channel_timeout.as_millis() as u64,
                    "dense channel timed out, using sparse only"
                );
                Vec::new()
            }
        };

        let dense: Vec<Candidate> = dense_hits
            .iter()
            .enumerate()
            .map(|(i, hit)| Candidate {
                document_id: hit.document_id.clone(),
                channel: Channel::Dense,
                rank: i + 1,
                raw_score: 0.0,
            })
            .collect();
        let sparse = scope_candidates(sparse, scope, &index);

        let ordered_ids: Vec<String> = match (dense.is_empty(), sparse.is_empty()) {
            (true, true) => return vec![fallback_document()],
            (false, true) => dense.into_iter().map(|c| c.document_id).collect(),
            (true, false) => sparse.into_iter().map(|c| c.document_id).collect(),
            (false, false) => reciprocal_rank_fusion(&[&dense, &sparse])
                .into_iter()
                .map(|f| f.document_id)
                .collect(),
        };

        let dense_content: HashMap<&str, &str> = dense_hits
            .iter()
            .map(|hit| (hit.document_id.as_str(), hit.content.as_str()))
            .collect();
        ordered_ids
            .into_iter()
            .take(top_k)
            .filter_map(|id| materialize(&index, &dense_content, id))
            .collect()
    }
}

/// Keep only in-scope sparse candidates and re-assign their ranks, so fusion
/// sees positions within the filtered list.
fn scope_candidates(
    candidates: Vec<Candidate>,
    scope: Option<&[ContentType]>,
    index: &LexicalIndex,
) -> Vec<Candidate> {
    let Some(types) = scope else {
        return candidates;
    };
    candidates
        .into_iter()
        .filter(|c| {
            index
                .get(&c.document_id)
                .is_some_and(|doc| types.contains(&doc.content_type))
        })
        .enumerate()
        .map(|(i, mut c)| {
            c.rank = i + 1;
            c
        })
        .collect()
}

/// Resolve a fused id into a Document: the lexical corpus is authoritative;
/// a dense-only id becomes a job-typed document carrying the hit's content
/// (the dense corpus holds job records).
fn materialize(
    index: &LexicalIndex,
    dense_content: &HashMap<&str, &str>,
    id: String,
) -> Option<Document> {
    if let Some(doc) = index.get(&id) {
        return Some(doc.clone());
    }
    dense_content.get(id.as_str()).map(|content| {
        Document::new(id, *content, ContentType::Job).with_meta("source", "dense")
    })
}
