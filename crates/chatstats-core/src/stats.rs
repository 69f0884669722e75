//! `ChatStatistics`: one loaded export together with everything derived
//! from it.

use std::path::Path;

use tracing::debug;

use crate::config::StatsConfig;
use crate::errors::StatsResult;
use crate::indexer::ledger::Ledger;
use crate::indexer::pipeline::{build, BuildStats, ChatIndex};
use crate::indexer::qa::QaIndex;
use crate::models::RankedUser;
use crate::query::guards::normalize_keywords;
use crate::query::planner::{CacheMode, CacheStats, QueryCache};
use crate::query::rankings::{most_replier, most_talkative, Rankings};
use crate::query::report::{render_qa, render_top_report, render_word_counts};
use crate::query::words::word_frequencies;
use crate::store::MessageStore;

pub struct ChatStatistics {
    config: StatsConfig,
    store: MessageStore,
    index: ChatIndex,
    cache: QueryCache,
}

impl ChatStatistics {
    pub fn from_path(path: impl AsRef<Path>, config: StatsConfig) -> StatsResult<Self> {
        let store = MessageStore::from_path(path)?;
        Ok(Self::from_store(store, config))
    }

    pub fn from_store(store: MessageStore, config: StatsConfig) -> Self {
        let config = config.clamped();
        let index = build(&store, &config);
        let cache = QueryCache::new(config.cache_entries);
        Self {
            config,
            store,
            index,
            cache,
        }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn ledger(&self) -> &Ledger {
        &self.index.ledger
    }

    pub fn qa_index(&self) -> &QaIndex {
        &self.index.qa
    }

    pub fn build_stats(&self) -> &BuildStats {
        &self.index.stats
    }

    pub fn most_talkative(&self, n: usize) -> Vec<RankedUser> {
        most_talkative(&self.index.ledger, n)
    }

    pub fn most_replier(&self, n: usize) -> Vec<RankedUser> {
        most_replier(&self.index.ledger, n)
    }

    pub fn rankings(&self, n: usize) -> Rankings {
        Rankings::compute(&self.index.ledger, n)
    }

    pub fn top_report(&self, n: usize) -> String {
        let rankings = self.rankings(n);
        render_top_report(&rankings.repliers, &rankings.talkative, n)
    }

    pub fn qa_export(&self) -> String {
        render_qa(&self.index.qa)
    }

    /// Rendered export of answered questions matching any keyword. Keywords
    /// are normalised once, so the cache key and the filter see the same
    /// list. Results are cached per keyword set.
    pub fn filtered_export<S: AsRef<str>>(&self, keywords: &[S]) -> String {
        let keywords = normalize_keywords(keywords);
        let (rendered, mode) = self
            .cache
            .get_or_compute(self.store.fingerprint(), &keywords, || {
                render_qa(&self.index.qa.filter(&keywords))
            });
        debug!(cache_hit = mode == CacheMode::Hit, "keyword export");
        rendered
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn word_frequencies(&self, n: usize) -> Vec<(String, u64)> {
        word_frequencies(&self.store, n)
    }

    pub fn word_report(&self, n: usize) -> String {
        render_word_counts(&self.word_frequencies(n))
    }

    pub fn corpus_text(&self) -> String {
        self.store.corpus_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkMode;
    use crate::query::guards::MAX_KEYWORDS;
    use serde_json::json;
    use std::io::Write;

    fn export() -> serde_json::Value {
        json!({
            "name": "Rust Learners",
            "type": "public_supergroup",
            "id": 77,
            "messages": [
                {"id": 1, "type": "message", "from_id": "user1", "from": "Ali", "text": "How to install Rust?"},
                {"id": 2, "type": "message", "from_id": "user2", "from": "Sara", "text": "rustup", "reply_to_message_id": 1},
                {"id": 3, "type": "service", "actor": "Ali", "action": "pin_message"},
                {"id": 4, "type": "message", "from_id": "user3", "from": "Reza", "text": "پایتون بهتره؟"},
                {"id": 5, "type": "message", "from_id": "user1", "from": "Ali", "text": "نه", "reply_to_message_id": 4},
                {"id": 6, "type": "message", "from_id": "user2", "from": "Sara", "text": "Anyone using tokio?"},
                {"id": 90, "type": "message", "from_id": "user2", "from": "Sara", "text": "ping", "reply_to_message_id": 6}
            ]
        })
    }

    fn stats() -> ChatStatistics {
        ChatStatistics::from_store(MessageStore::load(export()).unwrap(), StatsConfig::default())
    }

    #[test]
    fn test_end_to_end_counters() {
        let stats = stats();
        let ali = stats.ledger().get("user1").unwrap();
        assert_eq!((ali.messages_sent, ali.questions_asked, ali.answers_given, ali.replies_made), (2, 1, 1, 1));
        let sara = stats.ledger().get("user2").unwrap();
        assert_eq!((sara.messages_sent, sara.questions_asked, sara.answers_given, sara.replies_made), (3, 1, 1, 2));
        assert_eq!(stats.build_stats().unresolved_replies, 1);
    }

    #[test]
    fn test_qa_export_skips_unanswered() {
        let export = stats().qa_export();
        assert!(export.contains("Question:\nHow to install Rust?\nAnswer 1:\nrustup\n"));
        assert!(export.contains("Question:\nپایتون بهتره؟\nAnswer 1:\nنه\n"));
        assert!(!export.contains("tokio"));
    }

    #[test]
    fn test_filtered_export_and_cache() {
        let stats = stats();
        let filtered = stats.filtered_export(&["RUST"]);
        assert!(filtered.starts_with("Question:\nHow to install Rust?\n"));
        assert!(!filtered.contains("پایتون"));
        assert_eq!(stats.filtered_export(&["rust"]), filtered);
        let cache = stats.cache_stats();
        assert_eq!((cache.hits, cache.misses), (1, 1));
        assert_eq!(stats.filtered_export(&["tokio"]), "");
    }

    #[test]
    fn test_filtered_export_uses_capped_keyword_list() {
        let stats = stats();
        let mut padded: Vec<String> = (0..MAX_KEYWORDS).map(|i| format!("zz{i}")).collect();
        padded.push("rust".to_string());
        let capped: Vec<String> = padded[..MAX_KEYWORDS].to_vec();

        // Only the first MAX_KEYWORDS keywords take part, in the key and in
        // the filter alike.
        let first = stats.filtered_export(&padded);
        assert_eq!(first, render_qa(&stats.qa_index().filter(&capped)));
        assert_eq!(first, "");

        let second = stats.filtered_export(&capped);
        assert_eq!(second, render_qa(&stats.qa_index().filter(&capped)));
        assert_eq!(stats.cache_stats().hits, 1);
    }

    #[test]
    fn test_filtered_export_cache_never_crosses_keyword_sets() {
        let stats = stats();
        let rust = stats.filtered_export(&["rust"]);
        let tokio = stats.filtered_export(&["tokio"]);
        assert!(rust.contains("How to install Rust?"));
        assert_eq!(tokio, render_qa(&stats.qa_index().filter(&["tokio"])));
        assert_eq!(stats.cache_stats().misses, 2);
    }

    #[test]
    fn test_top_report() {
        let report = stats().top_report(2);
        assert_eq!(
            report,
            "Top 2 repliers\n(user2, Sara, 2)\n(user1, Ali, 1)\n\n\
             Top 2 talkative\n(user2, Sara, 3)\n(user1, Ali, 2)\n"
        );
    }

    #[test]
    fn test_direct_mode_resolves_gapped_ids() {
        let config = StatsConfig {
            link_mode: LinkMode::Direct,
            ..StatsConfig::default()
        };
        let stats = ChatStatistics::from_store(MessageStore::load(export()).unwrap(), config);
        // The reply at id 90 now finds "Anyone using tokio?".
        assert_eq!(
            stats.qa_index().answers("Anyone using tokio?"),
            Some(&["ping".to_string()][..])
        );
        assert_eq!(stats.build_stats().unresolved_replies, 0);
    }

    #[test]
    fn test_from_path_and_corpus() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(export().to_string().as_bytes()).unwrap();
        let stats = ChatStatistics::from_path(file.path(), StatsConfig::default()).unwrap();
        assert_eq!(stats.store().info().name.as_deref(), Some("Rust Learners"));
        assert!(stats.corpus_text().starts_with(" How to install Rust? rustup"));
        assert_eq!(stats.word_frequencies(1), vec![("how".to_string(), 1)]);
    }
}
