use crate::models::{Conversation, Turn};

use super::normalize::normalize_message;

/// Merges runs of consecutive same-author messages into turns.
///
/// Each message contributes its normalized text followed by `". "`, so a
/// turn's text always ends with a period and a space.
pub fn combine_turns(conversation: &Conversation) -> Vec<Turn> {
    let mut turns = Vec::new();
    let mut current: Option<Turn> = None;

    for message in &conversation.messages {
        let author = message.username();
        let text = normalize_message(message);

        match current.as_mut() {
            Some(turn) if turn.author == author => {
                turn.text.push_str(&text);
                turn.text.push_str(". ");
            }
            _ => {
                turns.extend(current.replace(Turn {
                    author: author.to_string(),
                    text: format!("{}. ", text),
                }));
            }
        }
    }

    turns.extend(current);
    turns
}
