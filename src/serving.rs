//! Text handling around a fine-tuned model at chat time.
//!
//! Live input goes through the same normalizer as the training data, and the
//! prompt uses the same boundary markers as the training strings.

use crate::processing::normalize;
use crate::utils::tokens::{BOS, EOS, SEP, UNKNOWN_TOKEN};

/// Returns the text after `$<username>` when a message addresses the mimic.
pub fn strip_trigger<'a>(content: &'a str, username: &str) -> Option<&'a str> {
    let rest = content.strip_prefix('$')?.strip_prefix(username)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

/// Formats live text as a training-style prompt ending right after the separator.
pub fn build_prompt(text: &str) -> String {
    let mut normalized = normalize(text, &[]);
    if !normalized.ends_with('.') {
        normalized.push('.');
    }
    format!("{} {} {} ", BOS, normalized, SEP)
}

/// Pulls the generated response out of decoded model output.
///
/// The response runs from the first separator to the next end marker, or to
/// the end of the text when generation stopped before emitting one.
pub fn extract_response(decoded: &str) -> Option<String> {
    let start = decoded.find(SEP)? + SEP.len();
    let rest = &decoded[start..];
    let end = rest.find(EOS).unwrap_or(rest.len());
    Some(rest[..end].replace(UNKNOWN_TOKEN, "'").trim().to_string())
}

pub fn format_reply(author: &str, response: &str) -> String {
    format!("@{} {}", author, response)
}
