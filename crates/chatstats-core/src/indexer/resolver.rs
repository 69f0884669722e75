//! Reply-graph resolution.
//!
//! Exports only carry `reply_to_message_id`; the replied-to record is found
//! either by applying the id difference as a positional offset (the legacy
//! heuristic, which assumes ids advance in lockstep with positions) or by a
//! direct id lookup.

use tracing::debug;

use crate::config::LinkMode;
use crate::models::{MessageRecord, ResolvedLink, UnresolvedReason};
use crate::store::MessageStore;

/// Question heuristic: ASCII `?` or Arabic `؟` anywhere in the text.
pub fn is_question_text(text: &str) -> bool {
    text.contains(|c: char| c == '?' || c == '؟')
}

/// Target position under the offset heuristic: `position - (id - reply_id)`.
/// Returns the raw (possibly negative) position.
pub fn offset_position(position: usize, message_id: i64, reply_id: i64) -> i64 {
    let diff = message_id.saturating_sub(reply_id);
    (position as i64).saturating_sub(diff)
}

/// Classify the record at `position` and resolve its reply target, if any.
///
/// Never fails: an unusable reference yields a link with `target_text = None`
/// and the reason recorded in `unresolved`.
pub fn resolve(store: &MessageStore, position: usize, mode: LinkMode) -> ResolvedLink {
    let Some(record) = store.at(position) else {
        return ResolvedLink::default();
    };
    let mut link = ResolvedLink {
        is_question: record.text.as_plain().is_some_and(is_question_text),
        is_reply: record.reply_target_id.is_some(),
        ..Default::default()
    };
    let Some(reply_id) = record.reply_target_id else {
        return link;
    };

    match locate_target(store, record, position, reply_id, mode) {
        Ok(target_position) => {
            let target = store.at(target_position);
            match target.and_then(|t| t.text.as_plain()) {
                Some(text) => link.target_text = Some(text.to_string()),
                None => {
                    link.unresolved = Some(UnresolvedReason::NonTextualTarget {
                        position: target_position,
                    })
                }
            }
        }
        Err(reason) => link.unresolved = Some(reason),
    }

    if let Some(reason) = link.unresolved {
        debug!(
            message_id = ?record.id,
            reply_to = reply_id,
            ?reason,
            "reply reference left unresolved"
        );
    }
    link
}

fn locate_target(
    store: &MessageStore,
    record: &MessageRecord,
    position: usize,
    reply_id: i64,
    mode: LinkMode,
) -> Result<usize, UnresolvedReason> {
    match mode {
        LinkMode::Offset => {
            let message_id = record.id.ok_or(UnresolvedReason::MissingMessageId)?;
            let target = offset_position(position, message_id, reply_id);
            if target < 0 || target >= store.len() as i64 {
                return Err(UnresolvedReason::OutOfRange { position: target });
            }
            Ok(target as usize)
        }
        LinkMode::Direct => store
            .position_of(reply_id)
            .ok_or(UnresolvedReason::TargetNotFound { target_id: reply_id }),
    }
}
