//! Query entry point
//!
//! [`GuideEngine`] is what the transport layer (webhook handler, console)
//! talks to: it takes a raw question string and returns either an
//! assembled, budget-bounded context or an explicit no-content outcome.
//! The completion-service call that turns context into prose lives outside
//! this crate; the engine's obligation ends at delivering a context string
//! within the documented budget, with provenance markers.

use crate::cache::{SharedStore, TieredCache};
use crate::config::RetrievalConfig;
use crate::crawler::SnapshotSource;
use crate::retrieval::select_context;
use std::sync::Arc;

/// Neutral reply when no site content is available at all
pub const NO_CONTENT_REPLY: &str =
    "目前查不到活動官網的資料，請稍後再試，或直接詢問現場服務台。";

/// Outcome of a retrieval call
///
/// `NoContent` means total data unavailability — no tier held pages and a
/// live crawl attempt also came up empty, or nothing scored above zero.
/// It is an explicit value rather than an empty string so the caller can
/// short-circuit to a fallback message instead of prompting a model with
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievedContext {
    Assembled(String),
    NoContent,
}

impl RetrievedContext {
    /// Converts the outcome into the string handed to the caller
    ///
    /// The caller always receives some text; unavailability surfaces as
    /// the neutral sentinel, never as an error or an empty string.
    pub fn into_reply_text(self) -> String {
        match self {
            RetrievedContext::Assembled(context) => context,
            RetrievedContext::NoContent => NO_CONTENT_REPLY.to_string(),
        }
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self, RetrievedContext::NoContent)
    }
}

/// Answers questions about the cached site snapshot
pub struct GuideEngine<S, C>
where
    S: SharedStore,
    C: SnapshotSource,
{
    cache: Arc<TieredCache<S, C>>,
    retrieval: RetrievalConfig,
}

impl<S, C> GuideEngine<S, C>
where
    S: SharedStore,
    C: SnapshotSource,
{
    pub fn new(cache: Arc<TieredCache<S, C>>, retrieval: RetrievalConfig) -> Self {
        Self { cache, retrieval }
    }

    /// Builds the bounded context for a question
    ///
    /// Reads through the tiered cache (crawling live on a full miss),
    /// scores the snapshot, and assembles the top pages. Never errors:
    /// degradation ends at [`RetrievedContext::NoContent`].
    pub async fn context_for(&self, question: &str) -> RetrievedContext {
        let pages = self.cache.get().await;
        if pages.is_empty() {
            tracing::warn!("No snapshot available for question");
            return RetrievedContext::NoContent;
        }

        let context = select_context(question, &pages, &self.retrieval);
        if context.is_empty() {
            tracing::debug!("No page scored above zero for question");
            return RetrievedContext::NoContent;
        }

        RetrievedContext::Assembled(context)
    }
}
