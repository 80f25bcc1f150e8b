//! Capability contracts for the external collaborators: the vector index,
//! the response generator and the translator. The pipeline depends on these
//! traits only, so tests substitute stubs without touching retrieval logic.

use crate::types::{ConversationTurn, Document, Intent};
use async_trait::async_trait;

/// One nearest-neighbour hit. Rank is the position in the returned list;
/// the collaborator's similarity score is not exposed because fusion never
/// consumes it.
#[derive(Debug, Clone)]
pub struct DenseHit {
    pub document_id: String,
    pub content: String,
}

/// Semantic-similarity search over an externally embedded corpus. The core
/// never computes embeddings; failures degrade to sparse-only retrieval.
#[async_trait]
pub trait DenseIndex: Send + Sync {
    async fn query(&self, text: &str, top_k: usize) -> anyhow::Result<Vec<DenseHit>>;
}

/// Turns a query plus ranked context documents into prose. Callers map
/// errors to a canned reply; retrieval is never affected.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        query: &str,
        context: &[Document],
        intent: Intent,
        language: &str,
        history: &[ConversationTurn],
    ) -> anyhow::Result<String>;
}

/// Text-to-text translation. Fail-open by contract: implementations return
/// the input unchanged on any failure, so a translation outage never blocks
/// the chat pipeline.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> String;
}
