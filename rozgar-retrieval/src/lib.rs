pub mod dense;
pub mod retriever;

pub use dense::HttpDenseIndex;
pub use retriever::{fallback_document, HybridRetriever, DEFAULT_CHANNEL_TIMEOUT};
