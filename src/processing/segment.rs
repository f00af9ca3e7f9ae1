use chrono::{DateTime, Duration, FixedOffset};
use tracing::debug;

use crate::error::Result;
use crate::models::{Conversation, RawMessage};

/// Splits a scraped dump into conversations.
///
/// The dump is newest first, so it is walked from the end. A message opens a
/// new conversation when it is not a reply and arrived more than `threshold`
/// after the previous message. Replies never open one. Every message lands in
/// exactly one conversation, and the trailing conversation is always returned.
pub fn segment(dump: Vec<RawMessage>, threshold: Duration) -> Result<Vec<Conversation>> {
    let mut conversations = Vec::new();
    let mut current: Option<Conversation> = None;
    let mut prev_time: Option<DateTime<FixedOffset>> = None;

    for message in dump.into_iter().rev() {
        let sent_at = message.sent_at()?;

        let opens_conversation = match prev_time {
            Some(prev) => !message.is_reply() && sent_at - prev > threshold,
            None => true,
        };

        if opens_conversation {
            if let Some(done) = current.take() {
                debug!(
                    messages = done.len(),
                    participants = done.participants().len(),
                    "closing conversation"
                );
                conversations.push(done);
            }
            current = Some(Conversation::starting_with(message));
        } else if let Some(convo) = current.as_mut() {
            convo.push(message);
        }

        prev_time = Some(sent_at);
    }

    conversations.extend(current);
    Ok(conversations)
}
