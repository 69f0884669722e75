//! Shared typed models used across store, indexing, and query layers.

use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// 1. MessageKind
// ---------------------------------------------------------------------------

/// Record kind as carried by the export's `type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Message,
    Service,
    Other,
}

impl MessageKind {
    pub fn from_type_field(value: Option<&str>) -> Self {
        match value {
            Some("message") => MessageKind::Message,
            Some("service") => MessageKind::Service,
            _ => MessageKind::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// 2. MessageText
// ---------------------------------------------------------------------------

/// Message body. Exports carry either a plain string or a list of formatted
/// fragments (plain strings mixed with `{"type": .., "text": ..}` objects).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageText {
    Plain(String),
    Structured(Vec<serde_json::Value>),
    Absent,
}

impl MessageText {
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::String(s)) => MessageText::Plain(s.clone()),
            Some(serde_json::Value::Array(parts)) => MessageText::Structured(parts.clone()),
            _ => MessageText::Absent,
        }
    }

    /// Plain string body, if any. Structured fragments are not textual.
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            MessageText::Plain(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Best-effort plain rendering, including structured fragments.
    pub fn flatten(&self) -> Option<String> {
        match self {
            MessageText::Plain(s) => Some(s.clone()),
            MessageText::Structured(parts) => {
                let mut out = String::new();
                for part in parts {
                    match part {
                        serde_json::Value::String(s) => out.push_str(s),
                        serde_json::Value::Object(obj) => {
                            if let Some(s) = obj.get("text").and_then(|t| t.as_str()) {
                                out.push_str(s);
                            }
                        }
                        _ => {}
                    }
                }
                Some(out)
            }
            MessageText::Absent => None,
        }
    }
}

// ---------------------------------------------------------------------------
// 3. MessageRecord
// ---------------------------------------------------------------------------

/// One transcript entry. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MessageRecord {
    pub id: Option<i64>,
    pub kind: MessageKind,
    pub sender_id: Option<String>,
    pub sender_name: Option<String>,
    pub text: MessageText,
    pub reply_target_id: Option<i64>,
}

impl MessageRecord {
    pub fn is_message(&self) -> bool {
        self.kind == MessageKind::Message
    }
}

// ---------------------------------------------------------------------------
// 4. Metric / UserProfile
// ---------------------------------------------------------------------------

/// Per-user counter selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    MessagesSent,
    QuestionsAsked,
    AnswersGiven,
    RepliesMade,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::MessagesSent,
        Metric::QuestionsAsked,
        Metric::AnswersGiven,
        Metric::RepliesMade,
    ];

    pub(crate) fn slot(self) -> usize {
        match self {
            Metric::MessagesSent => 0,
            Metric::QuestionsAsked => 1,
            Metric::AnswersGiven => 2,
            Metric::RepliesMade => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::MessagesSent => "talkative",
            Metric::QuestionsAsked => "askers",
            Metric::AnswersGiven => "answerers",
            Metric::RepliesMade => "repliers",
        }
    }
}

/// Counters for one distinct sender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub messages_sent: u64,
    pub questions_asked: u64,
    pub answers_given: u64,
    pub replies_made: u64,
    /// Store position at which each metric was first incremented; drives
    /// ranking tie-breaks.
    #[serde(skip)]
    pub(crate) first_credit: [Option<usize>; 4],
}

impl UserProfile {
    pub fn new(id: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id: id.into(),
            display_name,
            messages_sent: 0,
            questions_asked: 0,
            answers_given: 0,
            replies_made: 0,
            first_credit: [None; 4],
        }
    }

    pub fn count(&self, metric: Metric) -> u64 {
        match metric {
            Metric::MessagesSent => self.messages_sent,
            Metric::QuestionsAsked => self.questions_asked,
            Metric::AnswersGiven => self.answers_given,
            Metric::RepliesMade => self.replies_made,
        }
    }

    pub(crate) fn credit(&mut self, metric: Metric, position: usize) {
        let counter = match metric {
            Metric::MessagesSent => &mut self.messages_sent,
            Metric::QuestionsAsked => &mut self.questions_asked,
            Metric::AnswersGiven => &mut self.answers_given,
            Metric::RepliesMade => &mut self.replies_made,
        };
        *counter += 1;
        self.first_credit[metric.slot()].get_or_insert(position);
    }

    pub(crate) fn first_credit(&self, metric: Metric) -> Option<usize> {
        self.first_credit[metric.slot()]
    }
}

// ---------------------------------------------------------------------------
// 5. RankedUser
// ---------------------------------------------------------------------------

/// One row of a top-N ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankedUser {
    pub id: String,
    pub name: Option<String>,
    pub count: u64,
}

impl fmt::Display for RankedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.id,
            self.name.as_deref().unwrap_or(""),
            self.count
        )
    }
}

// ---------------------------------------------------------------------------
// 6. ResolvedLink
// ---------------------------------------------------------------------------

/// Why a present reply reference produced no target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnresolvedReason {
    MissingMessageId,
    OutOfRange { position: i64 },
    TargetNotFound { target_id: i64 },
    NonTextualTarget { position: usize },
}

/// Classification of one message, consumed by the ledger and QA index in the
/// same pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedLink {
    pub is_question: bool,
    pub is_reply: bool,
    pub target_text: Option<String>,
    pub unresolved: Option<UnresolvedReason>,
}

impl ResolvedLink {
    /// A reply whose target is itself a question.
    pub fn is_answer(&self) -> bool {
        self.target_text
            .as_deref()
            .is_some_and(crate::indexer::resolver::is_question_text)
    }
}

// ---------------------------------------------------------------------------
// 7. ChatInfo
// ---------------------------------------------------------------------------

/// Chat-level metadata carried alongside the message list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChatInfo {
    pub name: Option<String>,
    pub chat_type: Option<String>,
    pub id: Option<i64>,
}
