//! Per-user engagement counters.

use std::cmp::Reverse;

use indexmap::IndexMap;

use crate::models::{Metric, MessageRecord, RankedUser, ResolvedLink, UserProfile};
use crate::store::MessageStore;

/// Sender id -> profile, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    profiles: IndexMap<String, UserProfile>,
}

impl Ledger {
    /// Seed one zeroed profile per distinct sender among message-kind
    /// records. A sender seen under several names keeps the first one.
    pub fn build(store: &MessageStore) -> Self {
        let mut ledger = Self::default();
        for (_, record) in store.iter() {
            if !record.is_message() {
                continue;
            }
            if let Some(sender_id) = &record.sender_id {
                ledger
                    .profiles
                    .entry(sender_id.clone())
                    .or_insert_with(|| UserProfile::new(sender_id.clone(), record.sender_name.clone()));
            }
        }
        ledger
    }

    /// Credit the sender of `record` (found at store `position`) with what
    /// `link` says about it. Non-message records and sender-less messages
    /// contribute nothing.
    pub fn apply(&mut self, position: usize, record: &MessageRecord, link: &ResolvedLink) {
        if !record.is_message() {
            return;
        }
        let Some(sender_id) = &record.sender_id else {
            return;
        };
        let profile = self
            .profiles
            .entry(sender_id.clone())
            .or_insert_with(|| UserProfile::new(sender_id.clone(), record.sender_name.clone()));

        profile.credit(Metric::MessagesSent, position);
        if link.is_question {
            profile.credit(Metric::QuestionsAsked, position);
        }
        if link.is_answer() {
            profile.credit(Metric::AnswersGiven, position);
        }
        // Counted on the presence of the reference alone.
        if link.is_reply {
            profile.credit(Metric::RepliesMade, position);
        }
    }

    pub fn get(&self, sender_id: &str) -> Option<&UserProfile> {
        self.profiles.get(sender_id)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &UserProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Users ranked by `metric`, highest first. Users with a zero count are
    /// not ranked; ties keep the order in which users were first credited.
    /// Truncates when `n` exceeds the number of ranked users.
    pub fn top_n(&self, metric: Metric, n: usize) -> Vec<RankedUser> {
        let mut ranked: Vec<&UserProfile> = self
            .profiles
            .values()
            .filter(|p| p.count(metric) > 0)
            .collect();
        ranked.sort_by_key(|p| (Reverse(p.count(metric)), p.first_credit(metric)));
        ranked
            .into_iter()
            .take(n)
            .map(|p| RankedUser {
                id: p.id.clone(),
                name: p.display_name.clone(),
                count: p.count(metric),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkMode;
    use crate::indexer::resolver::resolve;
    use serde_json::json;

    fn ledger_for(messages: serde_json::Value) -> Ledger {
        let store = MessageStore::load(json!({ "messages": messages })).unwrap();
        let mut ledger = Ledger::build(&store);
        for (position, record) in store.iter() {
            let link = resolve(&store, position, LinkMode::Offset);
            ledger.apply(position, record, &link);
        }
        ledger
    }

    #[test]
    fn test_build_seeds_message_senders_only() {
        let store = MessageStore::load(json!({"messages": [
            {"id": 1, "type": "service", "from_id": "user9", "from": "Bot"},
            {"id": 2, "type": "message", "from_id": "user1", "from": "Ali"},
            {"id": 3, "type": "message", "from_id": "user1", "from": "Ali R."},
            {"id": 4, "type": "message", "from": "Nobody"}
        ]}))
        .unwrap();
        let ledger = Ledger::build(&store);
        assert_eq!(ledger.len(), 1);
        let ali = ledger.get("user1").unwrap();
        assert_eq!(ali.display_name.as_deref(), Some("Ali"));
        assert_eq!(ali.messages_sent, 0);
        assert!(ledger.get("user9").is_none());
    }

    #[test]
    fn test_three_message_scenario() {
        let ledger = ledger_for(json!([
            {"id": 1, "type": "message", "from_id": "A", "from": "Alice", "text": "hi?"},
            {"id": 2, "type": "message", "from_id": "B", "from": "Bob", "text": "yes", "reply_to_message_id": 1},
            {"id": 3, "type": "message", "from_id": "A", "from": "Alice", "text": "thanks", "reply_to_message_id": 2}
        ]));
        let a = ledger.get("A").unwrap();
        assert_eq!(a.messages_sent, 2);
        assert_eq!(a.questions_asked, 1);
        assert_eq!(a.answers_given, 0);
        assert_eq!(a.replies_made, 1);

        let b = ledger.get("B").unwrap();
        assert_eq!(b.messages_sent, 1);
        assert_eq!(b.questions_asked, 0);
        assert_eq!(b.answers_given, 1);
        assert_eq!(b.replies_made, 1);

        assert_eq!(
            ledger.top_n(Metric::MessagesSent, 1),
            vec![RankedUser {
                id: "A".to_string(),
                name: Some("Alice".to_string()),
                count: 2
            }]
        );
    }

    #[test]
    fn test_unresolved_reply_still_counts_as_reply() {
        let ledger = ledger_for(json!([
            {"id": 900, "type": "message", "from_id": "A", "text": "ok", "reply_to_message_id": 1}
        ]));
        let a = ledger.get("A").unwrap();
        assert_eq!(a.replies_made, 1);
        assert_eq!(a.answers_given, 0);
        assert_eq!(a.messages_sent, 1);
    }

    #[test]
    fn test_service_records_do_not_count() {
        let ledger = ledger_for(json!([
            {"id": 1, "type": "service", "from_id": "A", "text": "joined?"},
            {"id": 2, "type": "message", "from_id": "A", "text": "hello"}
        ]));
        let a = ledger.get("A").unwrap();
        assert_eq!(a.messages_sent, 1);
        assert_eq!(a.questions_asked, 0);
    }

    #[test]
    fn test_top_n_tie_break_is_first_credit_order() {
        // B replies first, A and B tie on replies; A was seen first overall.
        let ledger = ledger_for(json!([
            {"id": 1, "type": "message", "from_id": "A", "text": "x"},
            {"id": 2, "type": "message", "from_id": "B", "text": "y", "reply_to_message_id": 1},
            {"id": 3, "type": "message", "from_id": "A", "text": "z", "reply_to_message_id": 2},
            {"id": 4, "type": "message", "from_id": "C", "text": "w"}
        ]));
        let repliers: Vec<String> = ledger
            .top_n(Metric::RepliesMade, 10)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(repliers, vec!["B".to_string(), "A".to_string()]);

        let talkative: Vec<(String, u64)> = ledger
            .top_n(Metric::MessagesSent, 10)
            .into_iter()
            .map(|r| (r.id, r.count))
            .collect();
        assert_eq!(
            talkative,
            vec![
                ("A".to_string(), 2),
                ("B".to_string(), 1),
                ("C".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_top_n_truncates() {
        let ledger = ledger_for(json!([
            {"id": 1, "type": "message", "from_id": "A", "text": "x"}
        ]));
        assert_eq!(ledger.top_n(Metric::MessagesSent, 50).len(), 1);
        assert!(ledger.top_n(Metric::MessagesSent, 0).is_empty());
        assert!(Ledger::default().top_n(Metric::RepliesMade, 3).is_empty());
    }
}
