//! Reserved strings shared by the dataset builder and the serving path.
//!
//! The fine-tuning tokenizer registers these as new vocabulary, so any drift
//! between build time and serve time silently degrades generations.

/// Emitted in place of a message with no text (an attachment).
pub const IMG_PLACEHOLDER: &str = "[IMG]";
/// Emitted in place of an animated-image link.
pub const GIF_PLACEHOLDER: &str = "[GIF]";
/// Emitted in place of any other link token.
pub const LINK_PLACEHOLDER: &str = "[LINK]";

pub const BOS: &str = "[BOS]";
pub const SEP: &str = "[SEP]";
pub const EOS: &str = "[EOS]";
pub const PAD: &str = "[PAD]";

/// Context used for the opening turn of a conversation.
pub const CONTEXT_PLACEHOLDER: &str = " ";

/// Message type the chat API assigns to replies.
pub const REPLY_MESSAGE_TYPE: i64 = 19;

pub const TENOR_PREFIX: &str = "https://tenor.com/";
pub const LINK_PREFIX: &str = "https:";

/// Token some model vocabularies decode apostrophes to.
pub const UNKNOWN_TOKEN: &str = "<unk>";

pub fn placeholders() -> [&'static str; 3] {
    [IMG_PLACEHOLDER, GIF_PLACEHOLDER, LINK_PLACEHOLDER]
}

pub fn is_placeholder(token: &str) -> bool {
    placeholders().contains(&token)
}
