//! Question -> answers multimap.
//!
//! Keyed by question text, so distinct messages with identical text share an
//! entry. Iteration follows first-registration order.

use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QaIndex {
    entries: IndexMap<String, Vec<String>>,
}

impl QaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty answer list for `text`. Re-registering is a no-op.
    pub fn register_question(&mut self, text: &str) {
        if !self.entries.contains_key(text) {
            self.entries.insert(text.to_string(), Vec::new());
        }
    }

    /// Append an answer to a registered question. Answers to unknown
    /// questions are dropped; returns whether the answer was kept.
    pub fn record_answer(&mut self, question_text: &str, answer_text: &str) -> bool {
        match self.entries.get_mut(question_text) {
            Some(answers) => {
                answers.push(answer_text.to_string());
                true
            }
            None => false,
        }
    }

    pub fn answers(&self, question_text: &str) -> Option<&[String]> {
        self.entries.get(question_text).map(Vec::as_slice)
    }

    /// All registered questions, answered or not.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(q, a)| (q.as_str(), a.as_slice()))
    }

    /// Questions with at least one answer.
    pub fn answered(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.iter().filter(|(_, answers)| !answers.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn answer_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Answered questions containing any keyword, case-insensitively, in
    /// first-seen order. Blank keywords never match.
    pub fn filter<S: AsRef<str>>(&self, keywords: &[S]) -> QaIndex {
        let needles: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let entries = self
            .answered()
            .filter(|(question, _)| {
                let haystack = question.to_lowercase();
                needles.iter().any(|needle| haystack.contains(needle.as_str()))
            })
            .map(|(question, answers)| (question.to_string(), answers.to_vec()))
            .collect();
        QaIndex { entries }
    }
}
