use crate::models::{AuthorDataset, TrainingRecord, Turn};
use crate::utils::tokens::{BOS, CONTEXT_PLACEHOLDER, EOS, SEP};

/// Renders the string the trainer feeds to the language model.
pub fn train_string(context: &str, response: &str) -> String {
    format!("{} {} {} {} {}", BOS, context, SEP, response, EOS)
}

/// Pairs every turn with the turn before it and files the record under the
/// responding author.
///
/// Context starts from [`CONTEXT_PLACEHOLDER`] for each call, so callers pass
/// one conversation at a time while reusing the same dataset.
pub fn build_pairs(turns: &[Turn], dataset: &mut AuthorDataset) {
    let mut context = CONTEXT_PLACEHOLDER;

    for turn in turns {
        let record = TrainingRecord {
            context: context.to_string(),
            response: turn.text.clone(),
            train: train_string(context, &turn.text),
        };
        dataset.push(&turn.author, record);
        context = &turn.text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(author: &str, text: &str) -> Turn {
        Turn {
            author: author.into(),
            text: text.into(),
        }
    }

    #[test]
    fn opener_gets_placeholder_context() {
        let mut dataset = AuthorDataset::new();
        build_pairs(&[turn("alice", "hi. ")], &mut dataset);

        let records = dataset.get("alice").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].context, " ");
        assert_eq!(records[0].train, "[BOS]   [SEP] hi.  [EOS]");
    }

    #[test]
    fn context_is_previous_turn() {
        let mut dataset = AuthorDataset::new();
        build_pairs(
            &[turn("alice", "hi. "), turn("bob", "hey. "), turn("alice", "sup. ")],
            &mut dataset,
        );

        let bob = dataset.get("bob").unwrap();
        assert_eq!(bob[0].context, "hi. ");
        assert_eq!(bob[0].response, "hey. ");
        assert_eq!(bob[0].train, "[BOS] hi.  [SEP] hey.  [EOS]");

        let alice = dataset.get("alice").unwrap();
        assert_eq!(alice.len(), 2);
        assert_eq!(alice[1].context, "hey. ");
    }

    #[test]
    fn context_resets_between_conversations() {
        let mut dataset = AuthorDataset::new();
        build_pairs(&[turn("alice", "one. "), turn("bob", "two. ")], &mut dataset);
        build_pairs(&[turn("bob", "three. ")], &mut dataset);

        let bob = dataset.get("bob").unwrap();
        assert_eq!(bob.len(), 2);
        assert_eq!(bob[0].context, "one. ");
        assert_eq!(bob[1].context, " ");
    }
}
