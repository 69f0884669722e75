//! Build pass: resolve every message once, then feed the ledger and the QA
//! index in a single traversal in store order.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::{LinkMode, StatsConfig};
use crate::indexer::ledger::Ledger;
use crate::indexer::qa::QaIndex;
use crate::indexer::resolver::resolve;
use crate::models::ResolvedLink;
use crate::store::MessageStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub messages: usize,
    pub skipped_records: usize,
    pub questions: usize,
    pub answers: usize,
    pub answers_recorded: usize,
    pub replies: usize,
    pub unresolved_replies: usize,
}

/// Everything one build pass produces. Owned per run; nothing is shared
/// between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatIndex {
    pub ledger: Ledger,
    pub qa: QaIndex,
    pub stats: BuildStats,
}

/// Resolve every record. Non-message records get an empty link. The result
/// is aligned with store positions regardless of `workers`.
pub fn resolve_all(store: &MessageStore, mode: LinkMode, workers: usize) -> Vec<ResolvedLink> {
    let resolve_one = |position: usize| -> ResolvedLink {
        match store.at(position) {
            Some(record) if record.is_message() => resolve(store, position, mode),
            _ => ResolvedLink::default(),
        }
    };

    if workers <= 1 || store.len() < 2 {
        return (0..store.len()).map(resolve_one).collect();
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build();
    match pool {
        Ok(pool) => pool.install(|| (0..store.len()).into_par_iter().map(resolve_one).collect()),
        Err(e) => {
            warn!("falling back to sequential resolution: {e}");
            (0..store.len()).map(resolve_one).collect()
        }
    }
}

pub fn build(store: &MessageStore, config: &StatsConfig) -> ChatIndex {
    let links = resolve_all(store, config.link_mode, config.workers);
    let mut ledger = Ledger::build(store);
    let mut qa = QaIndex::new();
    let mut stats = BuildStats::default();

    for ((position, record), link) in store.iter().zip(&links) {
        if !record.is_message() {
            stats.skipped_records += 1;
            continue;
        }
        stats.messages += 1;
        ledger.apply(position, record, link);

        if link.is_question {
            stats.questions += 1;
            if let Some(text) = record.text.as_plain() {
                qa.register_question(text);
            }
        }
        if link.is_reply {
            stats.replies += 1;
        }
        if link.unresolved.is_some() {
            stats.unresolved_replies += 1;
        }

        // Only questions registered earlier in store order can take the
        // answer.
        if link.is_answer() {
            stats.answers += 1;
            if let (Some(question), Some(answer)) = (&link.target_text, record.text.as_plain()) {
                if qa.record_answer(question, answer) {
                    stats.answers_recorded += 1;
                }
            }
        }
    }

    info!(
        messages = stats.messages,
        users = ledger.len(),
        questions = stats.questions,
        answers = stats.answers,
        answers_recorded = stats.answers_recorded,
        replies = stats.replies,
        unresolved_replies = stats.unresolved_replies,
        "chat index built"
    );

    ChatIndex { ledger, qa, stats }
}
