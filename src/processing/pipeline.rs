use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error;
use crate::models::{AuthorDataset, PipelineStats, RawMessage};
use crate::utils::file::{read_dump, write_dataset};

use super::{build_pairs, combine_turns, segment};

/// Runs a newest-first dump through segmentation, turn combining and pairing.
pub fn build_dataset(
    dump: Vec<RawMessage>,
    config: &PipelineConfig,
) -> error::Result<(AuthorDataset, PipelineStats)> {
    let threshold = config.gap_threshold()?;
    let mut stats = PipelineStats::new();
    let mut dataset = AuthorDataset::new();

    for conversation in segment(dump, threshold)? {
        let turns = combine_turns(&conversation);
        debug!(
            messages = conversation.len(),
            turns = turns.len(),
            participants = ?conversation.participants(),
            "processed conversation"
        );
        build_pairs(&turns, &mut dataset);
        stats.add_conversation(conversation.len(), turns.len());
    }

    for (author, records) in dataset.iter() {
        stats.add_author(author, records.len());
    }
    stats.finish();

    Ok((dataset, stats))
}

/// Loads the dump named by `config`, builds every author's dataset and writes it.
pub fn run(config: &PipelineConfig) -> Result<(PipelineStats, Vec<PathBuf>)> {
    info!(input = %config.input_path.display(), threshold_minutes = config.gap_threshold_minutes, "building datasets");

    let dump = read_dump(&config.input_path)
        .with_context(|| format!("Failed to read message dump {}", config.input_path.display()))?;
    let (dataset, stats) = build_dataset(dump, config)?;

    let written = write_dataset(&dataset, &config.output_dir)
        .with_context(|| format!("Failed to write datasets to {}", config.output_dir.display()))?;

    info!(
        messages = stats.messages,
        conversations = stats.conversations,
        records = stats.records,
        authors = written.len(),
        "datasets written"
    );
    Ok((stats, written))
}
