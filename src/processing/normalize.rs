use crate::models::{Mention, RawMessage};
use crate::utils::tokens::{
    GIF_PLACEHOLDER, IMG_PLACEHOLDER, LINK_PLACEHOLDER, LINK_PREFIX, TENOR_PREFIX, is_placeholder,
};

/// Flattens a message's content into the text the model trains on.
///
/// Empty content (an attachment) and tenor links collapse to a single
/// placeholder. Otherwise mentions become `@username`, links become
/// [`LINK_PLACEHOLDER`], custom emotes keep only their `:name:` code and every
/// other word is lower-cased.
pub fn normalize(content: &str, mentions: &[Mention]) -> String {
    if content.is_empty() {
        return IMG_PLACEHOLDER.to_string();
    }
    if content.starts_with(TENOR_PREFIX) {
        return GIF_PLACEHOLDER.to_string();
    }

    let mut content = content.to_string();
    for mention in mentions {
        content = content.replace(
            &format!("<@{}>", mention.id),
            &format!("@{}", mention.username),
        );
    }

    content
        .split_whitespace()
        .map(normalize_token)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn normalize_message(message: &RawMessage) -> String {
    normalize(&message.content, &message.mentions)
}

fn normalize_token(token: &str) -> String {
    if token.starts_with(LINK_PREFIX) {
        return LINK_PLACEHOLDER.to_string();
    }
    if let Some(code) = find_emote(token) {
        return format!("{}:", code);
    }
    if is_placeholder(token) {
        token.to_string()
    } else {
        token.to_lowercase()
    }
}

/// Finds the emote code inside custom-emote markup such as `<:pog:123>`.
///
/// The match starts at the first `:` and runs up to, but not including, the
/// last `:` that still has a `>` somewhere after it. Case is preserved.
fn find_emote(token: &str) -> Option<&str> {
    let close = token.rfind('>')?;
    let end = token[..close].rfind(':')?;
    let start = token[..end].find(':')?;
    Some(&token[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(id: &str, username: &str) -> Mention {
        Mention {
            id: id.into(),
            username: username.into(),
        }
    }

    #[test]
    fn empty_content_is_an_image() {
        assert_eq!(normalize("", &[]), IMG_PLACEHOLDER);
    }

    #[test]
    fn tenor_link_is_a_gif() {
        assert_eq!(normalize("https://tenor.com/view/x", &[]), GIF_PLACEHOLDER);
        assert_eq!(normalize("https://tenor.com/view/x and more", &[]), GIF_PLACEHOLDER);
    }

    #[test]
    fn links_are_replaced() {
        assert_eq!(
            normalize("look https://example.com/a NOW", &[]),
            format!("look {} now", LINK_PLACEHOLDER)
        );
    }

    #[test]
    fn mentions_and_emotes_keep_emote_case() {
        let out = normalize(
            "Hello <@123> CHECK :KEKW:1234567890123456789>",
            &[mention("123", "bob")],
        );
        assert_eq!(out, "hello @bob check :KEKW:");
    }

    #[test]
    fn custom_emote_markup_keeps_short_name() {
        assert_eq!(normalize("<:Pog:8812>", &[]), ":Pog:");
        assert_eq!(normalize("<a:catJAM:991>", &[]), ":catJAM:");
    }

    #[test]
    fn emote_without_closing_bracket_is_plain_text() {
        assert_eq!(normalize(":KEKW:", &[]), ":kekw:");
        assert_eq!(normalize("x:y>", &[]), "x:y>");
    }

    #[test]
    fn unmatched_mention_markup_is_left_alone() {
        assert_eq!(normalize("hi <@999>", &[mention("123", "bob")]), "hi <@999>");
    }

    #[test]
    fn every_occurrence_of_a_mention_is_replaced() {
        assert_eq!(
            normalize("<@1> and <@1>", &[mention("1", "Carol")]),
            "@carol and @carol"
        );
    }

    #[test]
    fn placeholder_tokens_are_not_lowercased() {
        assert_eq!(normalize("sent [IMG] lol", &[]), "sent [IMG] lol");
    }

    #[test]
    fn whitespace_only_content_becomes_empty() {
        assert_eq!(normalize("  \t ", &[]), "");
    }

    #[test]
    fn whitespace_runs_collapse_to_single_spaces() {
        assert_eq!(normalize("A  B\nC", &[]), "a b c");
    }
}
