//! HTTP client for the external vector index.
//!
//! The embedding store lives in another process; this client only speaks its
//! query contract: post a query text, get back ids and contents ordered by
//! similarity. Connection errors and non-2xx responses surface as errors and
//! the retriever degrades to sparse-only.

use async_trait::async_trait;
use rozgar_core::traits::{DenseHit, DenseIndex};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct HttpDenseIndex {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    top_k: usize,
}

#[derive(Deserialize)]
struct QueryResponse {
    results: Vec<QueryHit>,
}

#[derive(Deserialize)]
struct QueryHit {
    id: String,
    content: String,
}

impl HttpDenseIndex {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint: endpoint.into() })
    }
}

#[async_trait]
impl DenseIndex for HttpDenseIndex {
    async fn query(&self, text: &str, top_k: usize) -> anyhow::Result<Vec<DenseHit>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&QueryRequest { query: text, top_k })
            .send()
            .await?
            .error_for_status()?;
        let body: QueryResponse = response.json().await?;
        Ok(body
            .results
            .into_iter()
            .map(|hit| DenseHit { document_id: hit.id, content: hit.content })
            .collect())
    }
}
