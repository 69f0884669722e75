//! Word frequency table, the data behind a word cloud.

use std::cmp::Reverse;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::store::MessageStore;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w{2,}").unwrap());

/// Lower-cased Unicode word tokens of at least two characters.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    TOKEN_RE.find_iter(text).map(|m| m.as_str().to_lowercase())
}

/// Top `n` words across message-kind records, structured text included.
/// Ties keep first-seen order.
pub fn word_frequencies(store: &MessageStore, n: usize) -> Vec<(String, u64)> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for (_, record) in store.iter() {
        if !record.is_message() {
            continue;
        }
        let Some(text) = record.text.flatten() else {
            continue;
        };
        for token in tokens(&text) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_by_key(|(_, count)| Reverse(*count));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tokens_unicode_and_case() {
        let found: Vec<String> = tokens("Rust, rust! سلام a 42").collect();
        assert_eq!(found, vec!["rust", "rust", "سلام", "42"]);
    }

    #[test]
    fn test_word_frequencies() {
        let store = MessageStore::load(json!({"messages": [
            {"id": 1, "type": "message", "text": "tokio or async-std?"},
            {"id": 2, "type": "message", "text": ["use ", {"type": "code", "text": "tokio"}]},
            {"id": 3, "type": "service", "text": "tokio tokio tokio"},
            {"id": 4, "type": "message", "text": "async is fine"}
        ]}))
        .unwrap();
        let top = word_frequencies(&store, 3);
        assert_eq!(
            top,
            vec![
                ("tokio".to_string(), 2),
                ("async".to_string(), 2),
                ("or".to_string(), 1)
            ]
        );
    }
}
