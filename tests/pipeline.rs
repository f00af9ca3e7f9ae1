//! End-to-end runs from a dump on disk to per-author files.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chat_mimic::{
    PipelineConfig, PipelineError,
    processing::{build_dataset, pipeline, segment},
    utils::file::read_records,
};
use serde_json::json;
use tempfile::TempDir;

fn message(id: u32, author: &str, time: &str, kind: u8, content: &str) -> serde_json::Value {
    json!({
        "id": id.to_string(),
        "content": content,
        "timestamp": format!("2024-03-01T{}:00.000000+00:00", time),
        "type": kind,
        "author": {"id": format!("u-{}", author), "username": author, "global_name": null},
        "mentions": [],
        "mention_everyone": false,
        "reactions": {}
    })
}

/// Newest-first dump, the way the scraper writes it.
fn write_dump(dir: &Path) -> std::path::PathBuf {
    let mut chronological = vec![
        message(1, "alice", "12:00", 0, "Anyone around?"),
        message(2, "alice", "12:01", 0, ""),
        message(3, "bob", "12:02", 0, "yeah <:wave:555>"),
        message(4, "carol", "12:03", 0, "https://tenor.com/view/hi"),
        message(5, "bob", "12:30", 19, "replying late"),
        message(6, "alice", "13:00", 0, "New topic https://example.com/x"),
        message(7, "carol", "13:01", 0, "Ok"),
    ];
    chronological.reverse();

    let path = dir.join("all_messages.json");
    fs::write(&path, serde_json::to_string_pretty(&chronological).unwrap()).unwrap();
    path
}

fn config(dir: &TempDir) -> PipelineConfig {
    PipelineConfig {
        input_path: write_dump(dir.path()),
        output_dir: dir.path().join("user_messages"),
        ..PipelineConfig::default()
    }
}

#[test]
fn writes_one_file_per_author() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let (stats, written) = pipeline::run(&config).unwrap();

    assert_eq!(stats.messages, 7);
    assert_eq!(stats.conversations, 2);

    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["alice.jsonl", "bob.jsonl", "carol.jsonl"]);

    let alice = read_records(&config.output_dir.join("alice.jsonl")).unwrap();
    assert_eq!(alice.len(), 2);
    assert_eq!(alice[0].context, " ");
    assert_eq!(alice[0].response, "anyone around?. [IMG]. ");
    assert_eq!(alice[1].context, " ");
    assert_eq!(alice[1].response, "new topic [LINK]. ");

    let bob = read_records(&config.output_dir.join("bob.jsonl")).unwrap();
    assert_eq!(bob[0].response, "yeah :wave:. ");
    assert_eq!(bob[1].context, "[GIF]. ");
    assert_eq!(bob[1].response, "replying late. ");
    assert_eq!(bob[1].train, "[BOS] [GIF].  [SEP] replying late.  [EOS]");
}

#[test]
fn rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);

    pipeline::run(&config).unwrap();
    let first: Vec<_> = ["alice", "bob", "carol"]
        .iter()
        .map(|a| fs::read(config.output_dir.join(format!("{}.jsonl", a))).unwrap())
        .collect();

    pipeline::run(&config).unwrap();
    let second: Vec<_> = ["alice", "bob", "carol"]
        .iter()
        .map(|a| fs::read(config.output_dir.join(format!("{}.jsonl", a))).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn conversations_cover_every_message_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let dump = chat_mimic::utils::file::read_dump(&config.input_path).unwrap();
    let total = dump.len();

    let conversations = segment(dump, config.gap_threshold().unwrap()).unwrap();
    let ids: Vec<_> = conversations
        .iter()
        .flat_map(|c| c.messages.iter().map(|m| m.id.clone()))
        .collect();
    assert_eq!(ids.len(), total);

    let unique: BTreeSet<_> = ids.iter().cloned().collect();
    assert_eq!(unique.len(), total);
    let expected: BTreeSet<_> = (1..=7).map(|id| id.to_string()).collect();
    assert_eq!(unique, expected);

    // Chronological order: ids were assigned oldest first.
    let order: Vec<u32> = ids.iter().map(|id| id.parse().unwrap()).collect();
    assert_eq!(order, (1..=7).collect::<Vec<_>>());
}

#[test]
fn responses_chain_into_next_context() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let dump = chat_mimic::utils::file::read_dump(&config.input_path).unwrap();
    let (dataset, _) = build_dataset(dump, &config).unwrap();

    // First conversation turns: alice, bob, carol, bob.
    let carol = dataset.get("carol").unwrap();
    let bob = dataset.get("bob").unwrap();
    assert_eq!(carol[0].context, bob[0].response);
    assert_eq!(bob[1].context, carol[0].response);
}

#[test]
fn empty_dump_creates_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.json");
    fs::write(&input, "[]").unwrap();
    let config = PipelineConfig {
        input_path: input,
        output_dir: dir.path().join("user_messages"),
        ..PipelineConfig::default()
    };

    let (stats, written) = pipeline::run(&config).unwrap();
    assert!(written.is_empty());
    assert_eq!(stats.records, 0);
    assert!(!config.output_dir.exists());
}

#[test]
fn bad_timestamp_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    let mut broken = message(1, "alice", "12:00", 0, "hi");
    broken["timestamp"] = json!("last tuesday");
    fs::write(&input, serde_json::to_string(&vec![broken]).unwrap()).unwrap();
    let config = PipelineConfig {
        input_path: input,
        output_dir: dir.path().join("user_messages"),
        ..PipelineConfig::default()
    };

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::InvalidTimestamp { .. })
    ));
    assert!(!config.output_dir.exists());
}
