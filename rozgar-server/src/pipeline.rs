//! The chat pipeline: translate in, classify, retrieve, generate, translate
//! out. Classification and retrieval always run in the primary language; the
//! secondary language is bracketed by the fail-open translator, so a
//! translation outage degrades to answering in the primary language instead
//! of failing the request.

use rozgar_core::classifier::classify;
use rozgar_core::traits::{Generator, Translator};
use rozgar_core::types::{ConversationTurn, Intent};
use rozgar_retrieval::HybridRetriever;

/// Ranked documents handed to the generator.
const CONTEXT_TOP_K: usize = 3;
/// Most recent turns forwarded to the classifier and generator.
const HISTORY_WINDOW: usize = 6;

const SECONDARY_LANG: &str = "pa";
const PRIMARY_CODE: &str = "en-IN";
const SECONDARY_CODE: &str = "pa-IN";

const GREETING_REPLY: &str = "Hello! I'm the Rozgar Assistant. I can help you find \
government and private jobs, skill development programs, and employment schemes in \
Punjab. What would you like to know about?";

const OFF_TOPIC_REPLY: &str = "I'm sorry, I can only help with employment \
opportunities, government schemes, and skill development programs in Punjab. Please \
ask me about jobs, training, or career-related queries.";

const GENERATOR_DOWN_REPLY: &str = "I apologize, but I am currently unable to \
generate a response due to a server connection issue.";

pub struct ChatOutcome {
    pub text: String,
    pub intent: Intent,
    /// Content types of the documents that grounded the answer.
    pub sources: Vec<String>,
    /// Set when the incoming message was translated before processing.
    pub translated_query: Option<String>,
}

pub async fn run_chat(
    retriever: &HybridRetriever,
    generator: &dyn Generator,
    translator: &dyn Translator,
    message: &str,
    language: &str,
    history: &[ConversationTurn],
) -> ChatOutcome {
    let mut translated_query = None;
    let query = if language == SECONDARY_LANG {
        let translated = translator.translate(message, SECONDARY_CODE, PRIMARY_CODE).await;
        tracing::debug!(original = message, translated, "query translated");
        translated_query = Some(translated.clone());
        translated
    } else {
        message.to_string()
    };

    let recent = tail(history, HISTORY_WINDOW);
    let intent = classify(&query, recent);

    // Greetings and off-topic queries skip retrieval and generation.
    let (reply, sources) = match intent {
        Intent::GeneralQuery => (GREETING_REPLY.to_string(), Vec::new()),
        Intent::OffTopic => (OFF_TOPIC_REPLY.to_string(), Vec::new()),
        _ => {
            let docs = retriever
                .search(&query, CONTEXT_TOP_K, intent.retrieval_scope())
                .await;
            let sources = docs
                .iter()
                .map(|d| d.content_type.as_str().to_string())
                .collect();
            let reply = match generator.generate(&query, &docs, intent, "en", recent).await {
                Ok(text) => text,
                Err(error) => {
                    tracing::error!(%error, "generation failed");
                    GENERATOR_DOWN_REPLY.to_string()
                }
            };
            (reply, sources)
        }
    };

    let text = if language == SECONDARY_LANG {
        translator.translate(&reply, PRIMARY_CODE, SECONDARY_CODE).await
    } else {
        reply
    };

    ChatOutcome { text, intent, sources, translated_query }
}

fn tail(history: &[ConversationTurn], n: usize) -> &[ConversationTurn] {
    &history[history.len().saturating_sub(n)..]
}
