//! Domain types shared across the retrieval pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Partition a document belongs to. Determines which source fields are
/// rendered into `content` and which partitions a query may be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Job,
    Faq,
    Scheme,
    Training,
    News,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::Job,
        ContentType::Faq,
        ContentType::Scheme,
        ContentType::Training,
        ContentType::News,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Job => "job",
            ContentType::Faq => "faq",
            ContentType::Scheme => "scheme",
            ContentType::Training => "training",
            ContentType::News => "news",
        }
    }
}

/// The unit of retrieval. `content` is the flattened text block rendered
/// from the structured source record; `metadata` is provenance only and
/// never participates in ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            content_type,
            metadata: HashMap::new(),
        }
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// Which retrieval channel produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Dense,
    Sparse,
}

/// Per-query, per-channel result. Fusion consumes only `rank`; `raw_score`
/// is kept for logging because dense and sparse scores are not comparable.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub document_id: String,
    pub channel: Channel,
    /// 1-based position within the channel's result list.
    pub rank: usize,
    pub raw_score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior message of the conversation, supplied read-only by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Closed intent set. Attached transiently to a query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SearchJob,
    SearchScheme,
    JobApplication,
    SchemeApplication,
    CheckStatus,
    GeneralQuery,
    OffTopic,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SearchJob => "search_job",
            Intent::SearchScheme => "search_scheme",
            Intent::JobApplication => "job_application",
            Intent::SchemeApplication => "scheme_application",
            Intent::CheckStatus => "check_status",
            Intent::GeneralQuery => "general_query",
            Intent::OffTopic => "off_topic",
        }
    }

    /// Content-type scope the retriever applies to the keyword channel for
    /// this intent. `None` leaves the query unscoped.
    pub fn retrieval_scope(&self) -> Option<&'static [ContentType]> {
        match self {
            Intent::SearchJob | Intent::JobApplication => {
                Some(&[ContentType::Job, ContentType::Faq])
            }
            Intent::SearchScheme | Intent::SchemeApplication => {
                Some(&[ContentType::Scheme, ContentType::Training, ContentType::Faq])
            }
            Intent::CheckStatus => Some(&[ContentType::Faq]),
            Intent::GeneralQuery | Intent::OffTopic => None,
        }
    }
}
