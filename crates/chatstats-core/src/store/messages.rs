//! Immutable, order-preserving message store built from a chat export.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::errors::{StatsError, StatsResult};
use crate::models::{ChatInfo, MessageKind, MessageRecord, MessageText};

/// Records in import order plus an id -> position index.
///
/// Import order is not assumed to be sorted by id. Everything positional
/// (including the offset heuristic) works on array positions.
#[derive(Debug, Clone)]
pub struct MessageStore {
    records: Vec<MessageRecord>,
    positions: HashMap<i64, usize>,
    info: ChatInfo,
    fingerprint: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl MessageStore {
    /// Build from a decoded export. Fails only when the top-level container
    /// has no `messages` list.
    pub fn load(export: Value) -> StatsResult<Self> {
        let fingerprint = fingerprint_bytes(&serde_json::to_vec(&export)?);
        let obj = export.as_object().ok_or_else(|| {
            StatsError::MalformedInput("top-level export is not a JSON object".to_string())
        })?;
        let messages = obj
            .get("messages")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                StatsError::MalformedInput("export has no `messages` list".to_string())
            })?;

        let info = ChatInfo {
            name: obj.get("name").and_then(Value::as_str).map(str::to_string),
            chat_type: obj.get("type").and_then(Value::as_str).map(str::to_string),
            id: obj.get("id").and_then(Value::as_i64),
        };
        let records: Vec<MessageRecord> = messages.iter().map(parse_record).collect();

        let store = Self::assemble(records, info, fingerprint);
        info!(
            records = store.len(),
            messages = store.message_count(),
            chat = store.info.name.as_deref().unwrap_or(""),
            "loaded chat export"
        );
        Ok(store)
    }

    pub fn from_slice(bytes: &[u8]) -> StatsResult<Self> {
        let export: Value = serde_json::from_slice(bytes)?;
        Self::load(export)
    }

    pub fn from_path(path: impl AsRef<Path>) -> StatsResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading chat export");
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes)
    }

    /// Build directly from already-parsed records.
    pub fn from_records(records: Vec<MessageRecord>) -> StatsResult<Self> {
        let fingerprint = fingerprint_bytes(&serde_json::to_vec(&records)?);
        Ok(Self::assemble(records, ChatInfo::default(), fingerprint))
    }

    fn assemble(records: Vec<MessageRecord>, info: ChatInfo, fingerprint: String) -> Self {
        let mut positions = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if let Some(id) = record.id {
                // Duplicate ids keep their first position.
                positions.entry(id).or_insert(position);
            }
        }
        Self {
            records,
            positions,
            info,
            fingerprint,
        }
    }
}

fn parse_record(value: &Value) -> MessageRecord {
    let sender_id = value.get("from_id").and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    MessageRecord {
        id: value.get("id").and_then(Value::as_i64),
        kind: MessageKind::from_type_field(value.get("type").and_then(Value::as_str)),
        sender_id,
        sender_name: value.get("from").and_then(Value::as_str).map(str::to_string),
        text: MessageText::from_value(value.get("text")),
        reply_target_id: value.get("reply_to_message_id").and_then(Value::as_i64),
    }
}

fn fingerprint_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Read access
// ---------------------------------------------------------------------------

impl MessageStore {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bounds-checked positional access.
    pub fn at(&self, position: usize) -> Option<&MessageRecord> {
        self.records.get(position)
    }

    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &MessageRecord)> {
        self.records.iter().enumerate()
    }

    pub fn message_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_message()).count()
    }

    pub fn info(&self) -> &ChatInfo {
        &self.info
    }

    /// SHA-256 hex digest of the loaded export.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Every plain-string text, each prefixed with a single space. This is
    /// the corpus handed to word-cloud renderers.
    pub fn corpus_text(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            if let Some(text) = record.text.as_plain() {
                out.push(' ');
                out.push_str(text);
            }
        }
        out
    }
}
